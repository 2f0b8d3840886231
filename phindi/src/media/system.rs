use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use cpal::traits::{DeviceTrait as _, HostTrait as _, StreamTrait as _};
use cpal::{Device, FromSample, Sample, SampleFormat, SizedSample, Stream, StreamConfig};
use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinHandle, spawn_blocking};

use super::{MediaConstraints, MediaDevices, MediaError, MediaStream, MediaTrack, TrackKind};

/// Capture devices of the host machine. Microphone capture goes through the
/// default `cpal` input device; there is no camera backend, so any request
/// for video fails with [`MediaError::Unsupported`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemMediaDevices;

#[async_trait]
impl MediaDevices for SystemMediaDevices {
    async fn get_user_media(
        &self,
        constraints: MediaConstraints,
    ) -> Result<MediaStream, MediaError> {
        if constraints.video {
            return Err(MediaError::Unsupported(TrackKind::Video));
        }
        let mut tracks: Vec<Box<dyn MediaTrack>> = Vec::new();
        if constraints.audio {
            tracks.push(Box::new(MicrophoneTrack::open().await?));
        }
        Ok(MediaStream::new(tracks))
    }
}

enum Command {
    Enable(bool),
    Stop,
}

/// Live microphone. The `cpal` stream is not `Send`, so it is owned by a
/// blocking task and driven through a command channel.
pub struct MicrophoneTrack {
    label: String,
    enabled: bool,
    live: bool,
    level: Arc<AtomicU32>,
    command_tx: mpsc::UnboundedSender<Command>,
    task: Option<JoinHandle<()>>,
}

impl MicrophoneTrack {
    pub async fn open() -> Result<Self, MediaError> {
        let device = cpal::default_host()
            .default_input_device()
            .ok_or(MediaError::NotFound(TrackKind::Audio))?;
        let label = device
            .name()
            .unwrap_or_else(|_| "Default Microphone".to_string());
        let config = device
            .default_input_config()
            .map_err(|e| MediaError::Device(format!("no input config: {}", e)))?;
        tracing::info!(
            "Opening microphone '{}': {} Hz, {} channels, format: {:?}",
            label,
            config.sample_rate().0,
            config.channels(),
            config.sample_format()
        );
        let sample_format = config.sample_format();
        let stream_config: StreamConfig = config.into();
        let level = Arc::new(AtomicU32::new(0));
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (ready_tx, ready_rx) = oneshot::channel();
        let task = {
            let level = level.clone();
            spawn_blocking(move || {
                Self::run(
                    device,
                    stream_config,
                    sample_format,
                    level,
                    command_rx,
                    ready_tx,
                )
            })
        };
        match ready_rx.await {
            Ok(Ok(())) => Ok(Self {
                label,
                enabled: true,
                live: true,
                level,
                command_tx,
                task: Some(task),
            }),
            Ok(Err(err)) => Err(err),
            Err(_) => Err(MediaError::Device(
                "capture task exited before the stream started".to_string(),
            )),
        }
    }

    fn run(
        device: Device,
        config: StreamConfig,
        sample_format: SampleFormat,
        level: Arc<AtomicU32>,
        mut command_rx: mpsc::UnboundedReceiver<Command>,
        ready_tx: oneshot::Sender<Result<(), MediaError>>,
    ) {
        let stream = match sample_format {
            SampleFormat::I8 => Self::build_input_stream::<i8>(&device, &config, level.clone()),
            SampleFormat::I16 => Self::build_input_stream::<i16>(&device, &config, level.clone()),
            SampleFormat::I32 => Self::build_input_stream::<i32>(&device, &config, level.clone()),
            SampleFormat::U8 => Self::build_input_stream::<u8>(&device, &config, level.clone()),
            SampleFormat::U16 => Self::build_input_stream::<u16>(&device, &config, level.clone()),
            SampleFormat::U32 => Self::build_input_stream::<u32>(&device, &config, level.clone()),
            SampleFormat::F32 => Self::build_input_stream::<f32>(&device, &config, level.clone()),
            SampleFormat::F64 => Self::build_input_stream::<f64>(&device, &config, level.clone()),
            other => Err(MediaError::Device(format!(
                "unsupported sample format: {:?}",
                other
            ))),
        };
        let stream = match stream {
            Ok(stream) => stream,
            Err(err) => {
                let _ = ready_tx.send(Err(err));
                return;
            }
        };
        if let Err(err) = stream.play() {
            let _ = ready_tx.send(Err(MediaError::Device(format!(
                "cannot start capture: {}",
                err
            ))));
            return;
        }
        let _ = ready_tx.send(Ok(()));
        while let Some(command) = command_rx.blocking_recv() {
            match command {
                Command::Enable(true) => {
                    if let Err(err) = stream.play() {
                        tracing::error!("Failed to resume microphone: {}", err);
                    }
                }
                Command::Enable(false) => {
                    if let Err(err) = stream.pause() {
                        tracing::error!("Failed to pause microphone: {}", err);
                    }
                    level.store(0, Ordering::Relaxed);
                }
                Command::Stop => break,
            }
        }
        if let Err(err) = stream.pause() {
            tracing::warn!("Failed to pause microphone on stop: {}", err);
        }
        level.store(0, Ordering::Relaxed);
        tracing::debug!("Microphone capture released");
    }

    fn build_input_stream<T>(
        device: &Device,
        config: &StreamConfig,
        level: Arc<AtomicU32>,
    ) -> Result<Stream, MediaError>
    where
        T: SizedSample,
        f32: FromSample<T>,
    {
        let data_fn = move |data: &[T], _: &cpal::InputCallbackInfo| {
            if data.is_empty() {
                return;
            }
            let sum: f32 = data
                .iter()
                .map(|sample| {
                    let value = f32::from_sample(*sample);
                    value * value
                })
                .sum();
            let rms = (sum / data.len() as f32).sqrt().min(1.0);
            // Fast attack, slow release keeps the meter readable.
            let previous = f32::from_bits(level.load(Ordering::Relaxed));
            let next = if rms > previous {
                rms
            } else {
                previous * 0.85 + rms * 0.15
            };
            level.store(next.to_bits(), Ordering::Relaxed);
        };
        let err_fn = |err| {
            tracing::error!("Microphone stream error: {}", err);
        };
        device
            .build_input_stream(config, data_fn, err_fn, None)
            .map_err(|e| MediaError::Device(format!("cannot open microphone: {}", e)))
    }
}

impl MediaTrack for MicrophoneTrack {
    fn kind(&self) -> TrackKind {
        TrackKind::Audio
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if self.live && self.command_tx.send(Command::Enable(enabled)).is_err() {
            tracing::warn!("Microphone task is gone, cannot toggle track");
        }
    }

    fn stop(&mut self) {
        if !self.live {
            return;
        }
        self.live = false;
        let _ = self.command_tx.send(Command::Stop);
        // The blocking task exits on its own once it sees the command.
        self.task.take();
        self.level.store(0, Ordering::Relaxed);
    }

    fn is_live(&self) -> bool {
        self.live
    }

    fn level(&self) -> f32 {
        if !self.enabled {
            return 0.0;
        }
        f32::from_bits(self.level.load(Ordering::Relaxed))
    }
}

impl Drop for MicrophoneTrack {
    fn drop(&mut self) {
        self.stop();
    }
}
