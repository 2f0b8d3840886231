use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Result, anyhow};
use cpal::traits::{DeviceTrait as _, HostTrait as _, StreamTrait as _};
use cpal::{Device, FromSample, SampleFormat, SizedSample, Stream, StreamConfig};
use tokio::task::{JoinHandle, spawn_blocking};

/// Cadenced dual tone heard by the caller while the far end rings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TonePattern {
    pub low_hz: f32,
    pub high_hz: f32,
    pub on: Duration,
    pub off: Duration,
    pub gain: f32,
}

impl TonePattern {
    /// 440 + 480 Hz, two seconds on, four off.
    pub const RINGBACK: Self = Self {
        low_hz: 440.0,
        high_hz: 480.0,
        on: Duration::from_secs(2),
        off: Duration::from_secs(4),
        gain: 0.15,
    };

    pub fn period(&self) -> f32 {
        (self.on + self.off).as_secs_f32()
    }

    /// Signal value at `time` seconds from the start of the pattern.
    pub fn sample_at(&self, time: f32) -> f32 {
        let on = self.on.as_secs_f32();
        let phase = time % self.period();
        if phase >= on {
            return 0.0;
        }
        let t = time * 2.0 * std::f32::consts::PI;
        let mixed = ((self.low_hz * t).sin() + (self.high_hz * t).sin()) * self.gain;
        // 50 ms ramps at both ends of a burst avoid clicks.
        let ramp = 0.05;
        let fade_in = (phase / ramp).min(1.0);
        let fade_out = ((on - phase) / ramp).min(1.0);
        mixed * fade_in * fade_out
    }
}

/// Plays [`TonePattern::RINGBACK`] on the default output device while a call
/// is ringing.
pub struct RingbackPlayer {
    pattern: TonePattern,
    is_playing: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl Default for RingbackPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl RingbackPlayer {
    pub fn new() -> Self {
        Self::with_pattern(TonePattern::RINGBACK)
    }

    pub fn with_pattern(pattern: TonePattern) -> Self {
        Self {
            pattern,
            is_playing: Arc::new(AtomicBool::new(false)),
            task: None,
        }
    }

    /// Start the tone. Starting an already playing tone is a no-op.
    pub fn start(&mut self) -> Result<()> {
        if self.is_playing.swap(true, Ordering::Relaxed) {
            return Ok(());
        }
        let is_playing = self.is_playing.clone();
        let pattern = self.pattern;
        self.task = Some(spawn_blocking(move || {
            if let Err(e) = Self::play_blocking(pattern, is_playing.clone()) {
                tracing::error!("Failed to play ringback tone: {}", e);
                is_playing.store(false, Ordering::Relaxed);
            }
        }));
        Ok(())
    }

    pub fn stop(&mut self) {
        self.is_playing.store(false, Ordering::Relaxed);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing.load(Ordering::Relaxed)
    }

    fn play_blocking(pattern: TonePattern, is_playing: Arc<AtomicBool>) -> Result<()> {
        let device = cpal::default_host()
            .default_output_device()
            .ok_or_else(|| anyhow!("No output device available"))?;
        let config = device
            .default_output_config()
            .map_err(|e| anyhow!("Failed to get default output config: {}", e))?;
        let sample_format = config.sample_format();
        let stream_config: StreamConfig = config.into();
        tracing::debug!(
            "Ringback playback: {} Hz, {} channels, format: {:?}",
            stream_config.sample_rate.0,
            stream_config.channels,
            sample_format
        );
        let flag = is_playing.clone();
        let stream = match sample_format {
            SampleFormat::I16 => Self::build_stream::<i16>(&device, &stream_config, pattern, flag),
            SampleFormat::I32 => Self::build_stream::<i32>(&device, &stream_config, pattern, flag),
            SampleFormat::U16 => Self::build_stream::<u16>(&device, &stream_config, pattern, flag),
            SampleFormat::F32 => Self::build_stream::<f32>(&device, &stream_config, pattern, flag),
            SampleFormat::F64 => Self::build_stream::<f64>(&device, &stream_config, pattern, flag),
            other => return Err(anyhow!("Unsupported sample format: {:?}", other)),
        }?;
        stream
            .play()
            .map_err(|e| anyhow!("Failed to play stream: {}", e))?;
        while is_playing.load(Ordering::Relaxed) {
            std::thread::sleep(Duration::from_millis(100));
        }
        stream.pause().ok();
        Ok(())
    }

    fn build_stream<T>(
        device: &Device,
        config: &StreamConfig,
        pattern: TonePattern,
        is_playing: Arc<AtomicBool>,
    ) -> Result<Stream>
    where
        T: SizedSample + FromSample<f32>,
    {
        let sample_rate = config.sample_rate.0 as f32;
        let channels = config.channels as usize;
        let wrap = sample_rate * pattern.period();
        let mut clock = 0f32;
        let data_fn = move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            let playing = is_playing.load(Ordering::Relaxed);
            for frame in data.chunks_mut(channels) {
                let value = if playing {
                    pattern.sample_at(clock / sample_rate)
                } else {
                    0.0
                };
                for sample in frame.iter_mut() {
                    *sample = T::from_sample(value);
                }
                clock = (clock + 1.0) % wrap;
            }
        };
        let err_fn = |err| {
            tracing::error!("Ringback stream error: {}", err);
        };
        device
            .build_output_stream(config, data_fn, err_fn, None)
            .map_err(|e| anyhow!("Failed to build ringback stream: {}", e))
    }
}

impl Drop for RingbackPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_is_silent_between_bursts() {
        let pattern = TonePattern::RINGBACK;
        for t in [2.0f32, 2.5, 3.9, 5.99] {
            assert_eq!(pattern.sample_at(t), 0.0, "expected silence at {t}s");
        }
    }

    #[test]
    fn test_pattern_ramps_from_zero() {
        let pattern = TonePattern::RINGBACK;
        assert_eq!(pattern.sample_at(0.0), 0.0);
        assert_eq!(pattern.sample_at(6.0), 0.0);
        let peak = (0..2000)
            .map(|i| pattern.sample_at(0.5 + i as f32 / 48000.0).abs())
            .fold(0.0, f32::max);
        assert!(peak > 0.0 && peak <= 2.0 * pattern.gain + f32::EPSILON);
    }
}
