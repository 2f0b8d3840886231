use std::sync::Arc;
use std::time::{Duration, Instant};

use iced::widget::{Space, button, column, container, row, scrollable, slider, text};
use iced::{Alignment, Element, Length, Padding, Task, Theme};
use uuid::Uuid;

use crate::call::{CallKind, CallListener, CallSession, CallStatus, CallTimings, Participant};
use crate::media::{AcquiredStream, MediaError};
use crate::seed;
use crate::ui::components::avatar;
use crate::ui::core::{Screen, ScreenCommand};
use crate::ui::icons::{self, icon};
use crate::ui::theme::{colors, styles};
use crate::ui::{AppContext, UiEvent};

/// How long the "Call ended" state stays on screen.
const ENDED_LINGER: Duration = Duration::from_secs(2);

/// Segments of the microphone level meter.
const LEVEL_BARS: usize = 8;

#[derive(Clone, Debug)]
pub enum CallMessage {
    /// Local media result for the call with the given id.
    MediaReady(Uuid, Result<AcquiredStream, MediaError>),
    ToggleMic,
    ToggleVideo,
    ToggleSpeaker,
    VolumeChanged(u8),
    ToggleScreenShare,
    ToggleRecording,
    ToggleParticipants,
    EndCall,
}

pub struct CallScreen {
    session: CallSession,
    ended_at: Option<Instant>,
    volume: u8,
    is_screen_sharing: bool,
    is_recording: bool,
    show_participants: bool,
    participants: Vec<Participant>,
}

impl CallScreen {
    /// Start a session with the requested peer and ask for local media.
    pub fn new(kind: CallKind, ctx: &mut AppContext) -> (Self, Task<CallMessage>) {
        let peer = ctx.take_call_peer();
        let listener: Arc<dyn CallListener> = ctx.listener();
        let session = CallSession::with_listener(
            peer,
            kind,
            CallTimings::default(),
            Instant::now(),
            listener,
        );
        let call_id = session.id();
        let constraints = session.media_constraints();
        let media = ctx.media.clone();
        let task = Task::perform(
            async move {
                media
                    .get_user_media(constraints)
                    .await
                    .map(AcquiredStream::new)
            },
            move |result| CallMessage::MediaReady(call_id, result),
        );
        (Self::with_session(session, ctx.settings.audio.speaker_volume), task)
    }

    fn with_session(session: CallSession, volume: u8) -> Self {
        let participants = match session.kind() {
            CallKind::Video => seed::video_participants(),
            CallKind::Voice => Vec::new(),
        };
        Self {
            session,
            ended_at: None,
            volume,
            is_screen_sharing: false,
            is_recording: false,
            show_participants: false,
            participants,
        }
    }

    /// Hand a media result to the session it was requested for. Streams
    /// from an earlier call are stopped and dropped.
    fn media_ready(&mut self, call_id: Uuid, result: Result<AcquiredStream, MediaError>) {
        if call_id != self.session.id() {
            if let Some(mut stream) = result.ok().and_then(|acquired| acquired.take()) {
                stream.stop_all();
            }
            tracing::debug!(%call_id, current = %self.session.id(), "Dropping media for a stale call");
            return;
        }
        match result {
            Ok(acquired) => {
                if let Some(stream) = acquired.take() {
                    self.session.attach_media(stream);
                }
            }
            Err(error) => self.session.media_failed(error),
        }
    }

    fn end_call(&mut self, now: Instant) {
        if self.session.end() {
            self.ended_at = Some(now);
            self.is_recording = false;
            self.is_screen_sharing = false;
        }
    }

    fn control<'a>(
        source: &'static str,
        on: bool,
        message: CallMessage,
        theme: &Theme,
    ) -> Element<'a, CallMessage> {
        button(
            container(icon(source, 24.0, colors::text_primary(theme)))
                .center_x(Length::Fixed(56.0))
                .center_y(Length::Fixed(56.0)),
        )
        .on_press(message)
        .padding(0)
        .style(move |t: &Theme, status| styles::button_call_control(t, status, on))
        .into()
    }

    fn hangup<'a>(&self, theme: &Theme) -> Element<'a, CallMessage> {
        button(
            container(icon(icons::HANGUP, 24.0, colors::text_primary(theme)))
                .center_x(Length::Fixed(64.0))
                .center_y(Length::Fixed(56.0)),
        )
        .on_press_maybe((!self.session.is_ended()).then_some(CallMessage::EndCall))
        .padding(0)
        .style(move |t: &Theme, status| styles::button_danger(t, status))
        .into()
    }

    fn status_badge<'a>(&self, theme: &Theme) -> Element<'a, CallMessage> {
        let color = match self.session.status() {
            CallStatus::Connected => colors::text_success(theme),
            CallStatus::Ended => colors::text_error(theme),
            _ => colors::text_secondary(theme),
        };
        container(text(self.session.status_label()).size(14).color(color))
            .padding([6, 14])
            .style(styles::call_status)
            .into()
    }

    fn level_meter<'a>(&self) -> Element<'a, CallMessage> {
        let lit = (self.session.audio_level() * LEVEL_BARS as f32).round() as usize;
        let mut bars = row![].spacing(3).align_y(Alignment::End);
        for index in 0..LEVEL_BARS {
            let on = index < lit;
            bars = bars.push(
                container(Space::new(
                    Length::Fixed(6.0),
                    Length::Fixed(6.0 + index as f32 * 3.0),
                ))
                .style(move |t: &Theme| styles::level_bar(t, on)),
            );
        }
        bars.into()
    }

    /// Notice shown when local media could not be opened. A video request
    /// fails as a whole, so video calls run without a microphone track.
    fn media_notice_text(&self) -> Option<String> {
        let error = self.session.media_error()?;
        Some(match self.session.kind() {
            CallKind::Voice => format!("Media unavailable: {}", error),
            CallKind::Video => format!(
                "Media unavailable: {}. Microphone and level meter are off for this call.",
                error
            ),
        })
    }

    fn media_notice<'a>(&self, theme: &Theme) -> Element<'a, CallMessage> {
        match self.media_notice_text() {
            Some(notice) => text(notice)
                .size(12)
                .color(colors::text_muted(theme))
                .into(),
            None => Space::with_height(0).into(),
        }
    }

    fn build_voice<'a>(&'a self, theme: &'a Theme) -> Element<'a, CallMessage> {
        let peer = self.session.peer();
        let mic = if self.session.is_mic_on() {
            icons::MIC
        } else {
            icons::MIC_OFF
        };
        let speaker = if self.session.is_speaker_on() {
            icons::SPEAKER
        } else {
            icons::SPEAKER_OFF
        };
        let controls = row![
            Self::control(mic, self.session.is_mic_on(), CallMessage::ToggleMic, theme),
            Self::control(
                speaker,
                self.session.is_speaker_on(),
                CallMessage::ToggleSpeaker,
                theme
            ),
            self.hangup(theme),
        ]
        .spacing(24)
        .align_y(Alignment::Center);

        let volume = row![
            icon(icons::SPEAKER, 16.0, colors::text_secondary(theme)),
            slider(0..=100u8, self.volume, CallMessage::VolumeChanged).width(Length::Fixed(160.0)),
            text(format!("{}%", self.volume))
                .size(12)
                .color(colors::text_secondary(theme)),
        ]
        .spacing(8)
        .align_y(Alignment::Center);

        let content = column![
            avatar(&peer.name, 128.0),
            text(&peer.name).size(28).color(colors::text_primary(theme)),
            text(&peer.phone)
                .size(14)
                .color(colors::text_secondary(theme)),
            self.status_badge(theme),
            self.level_meter(),
            self.media_notice(theme),
            Space::with_height(24),
            controls,
            volume,
        ]
        .spacing(12)
        .align_x(Alignment::Center);

        container(content)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(styles::call_background)
            .into()
    }

    fn build_participant<'a>(participant: &'a Participant, theme: &Theme) -> Element<'a, CallMessage> {
        let muted = colors::text_muted(theme);
        let mut flags = row![].spacing(4);
        if participant.is_muted {
            flags = flags.push(icon(icons::MIC_OFF, 14.0, muted));
        }
        if participant.is_video_off {
            flags = flags.push(icon(icons::VIDEO_OFF, 14.0, muted));
        }
        row![
            avatar(&participant.name, 32.0),
            text(participant.display_name())
                .size(13)
                .width(Length::Fill),
            flags,
        ]
        .spacing(8)
        .align_y(Alignment::Center)
        .into()
    }

    fn build_video<'a>(&'a self, ctx: &'a AppContext, theme: &'a Theme) -> Element<'a, CallMessage> {
        let peer = self.session.peer();

        let mut top = row![
            text(&peer.name).size(18).color(colors::text_primary(theme)),
            self.status_badge(theme),
        ]
        .spacing(12)
        .align_y(Alignment::Center);
        if self.is_recording {
            top = top.push(
                container(text("REC").size(11))
                    .padding([2, 6])
                    .style(styles::recording),
            );
        }
        if self.is_screen_sharing {
            top = top.push(hint_text("Sharing your screen", theme));
        }

        let remote = container(
            column![
                avatar(&peer.name, 128.0),
                text(&peer.name).size(20).color(colors::text_primary(theme)),
            ]
            .spacing(12)
            .align_x(Alignment::Center),
        )
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(styles::participant_tile);

        let local_label = if !self.session.is_video_on() {
            "Camera off".to_string()
        } else if self.session.has_video_preview() {
            "Your camera".to_string()
        } else {
            match self.session.media_error() {
                Some(_) => "Camera unavailable".to_string(),
                None => "Starting camera...".to_string(),
            }
        };
        let local = container(
            column![
                avatar(&ctx.profile.profile().name, 48.0),
                text(local_label)
                    .size(11)
                    .color(colors::text_secondary(theme)),
            ]
            .spacing(6)
            .align_x(Alignment::Center),
        )
        .center_x(Length::Fixed(200.0))
        .center_y(Length::Fixed(140.0))
        .style(styles::participant_tile);

        let mut stage = row![
            column![
                remote,
                row![Space::with_width(Length::Fill), local]
            ]
            .spacing(12)
            .width(Length::Fill)
        ]
        .spacing(12)
        .height(Length::Fill);
        if self.show_participants {
            let mut list = column![
                text(format!("Participants ({})", self.participants.len()))
                    .size(14)
                    .color(colors::text_primary(theme)),
            ]
            .spacing(10);
            for participant in &self.participants {
                list = list.push(Self::build_participant(participant, theme));
            }
            stage = stage.push(
                container(scrollable(list))
                    .padding(12)
                    .width(Length::Fixed(240.0))
                    .height(Length::Fill)
                    .style(styles::card),
            );
        }

        let mic = if self.session.is_mic_on() {
            icons::MIC
        } else {
            icons::MIC_OFF
        };
        let camera = if self.session.is_video_on() {
            icons::VIDEO
        } else {
            icons::VIDEO_OFF
        };
        let controls = row![
            Self::control(mic, self.session.is_mic_on(), CallMessage::ToggleMic, theme),
            Self::control(
                camera,
                self.session.is_video_on(),
                CallMessage::ToggleVideo,
                theme
            ),
            Self::control(
                icons::SCREEN_SHARE,
                !self.is_screen_sharing,
                CallMessage::ToggleScreenShare,
                theme
            ),
            Self::control(
                icons::RECORD,
                !self.is_recording,
                CallMessage::ToggleRecording,
                theme
            ),
            Self::control(
                icons::CONTACTS,
                true,
                CallMessage::ToggleParticipants,
                theme
            ),
            self.hangup(theme),
        ]
        .spacing(16)
        .align_y(Alignment::Center);

        container(
            column![
                top,
                stage,
                self.media_notice(theme),
                container(controls).center_x(Length::Fill),
            ]
            .spacing(12),
        )
        .padding(Padding::from([16, 20]))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(styles::call_background)
        .into()
    }
}

fn hint_text<'a>(content: &'a str, theme: &Theme) -> Element<'a, CallMessage> {
    text(content)
        .size(12)
        .color(colors::text_secondary(theme))
        .into()
}

impl Screen for CallScreen {
    type Message = CallMessage;

    fn update(&mut self, message: CallMessage, _ctx: &mut AppContext) -> ScreenCommand<CallMessage> {
        match message {
            CallMessage::MediaReady(call_id, result) => self.media_ready(call_id, result),
            CallMessage::ToggleMic => {
                self.session.toggle_mic();
            }
            CallMessage::ToggleVideo => {
                self.session.toggle_video();
            }
            CallMessage::ToggleSpeaker => {
                self.session.toggle_speaker();
            }
            CallMessage::VolumeChanged(volume) => self.volume = volume,
            CallMessage::ToggleScreenShare => {
                if !self.session.is_ended() {
                    self.is_screen_sharing = !self.is_screen_sharing;
                }
            }
            CallMessage::ToggleRecording => {
                if !self.session.is_ended() {
                    self.is_recording = !self.is_recording;
                }
            }
            CallMessage::ToggleParticipants => self.show_participants = !self.show_participants,
            CallMessage::EndCall => self.end_call(Instant::now()),
        }
        ScreenCommand::None
    }

    fn handle_ui_event(&mut self, event: UiEvent, _ctx: &mut AppContext) -> ScreenCommand<CallMessage> {
        if let UiEvent::CallStatusChanged {
            call_id,
            status: CallStatus::Ended,
        } = event
        {
            if call_id == self.session.id() && self.ended_at.is_none() {
                self.ended_at = Some(Instant::now());
            }
        }
        ScreenCommand::None
    }

    fn tick(&mut self, now: Instant, _ctx: &mut AppContext) -> ScreenCommand<CallMessage> {
        self.session.advance(now);
        match self.ended_at {
            Some(ended_at) if now >= ended_at + ENDED_LINGER => ScreenCommand::Back,
            _ => ScreenCommand::None,
        }
    }

    fn view<'a>(&'a self, ctx: &'a AppContext, theme: &'a Theme) -> Element<'a, CallMessage> {
        match self.session.kind() {
            CallKind::Voice => self.build_voice(theme),
            CallKind::Video => self.build_video(ctx, theme),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{StubMediaDevices, TrackKind};

    fn screen(kind: CallKind) -> CallScreen {
        CallScreen::with_session(CallSession::start(seed::call_peer(), kind, Instant::now()), 80)
    }

    #[test]
    fn test_media_for_previous_call_is_ignored() {
        let previous = screen(CallKind::Video);
        let mut current = screen(CallKind::Voice);

        current.media_ready(
            previous.session.id(),
            Err(MediaError::Unsupported(TrackKind::Video)),
        );
        assert!(current.session.media_error().is_none());

        let devices = StubMediaDevices::new();
        let stale = devices
            .open(previous.session.media_constraints())
            .expect("stub media");
        current.media_ready(previous.session.id(), Ok(AcquiredStream::new(stale)));
        assert!(!current.session.has_media());
        for probe in devices.probes() {
            assert_eq!(probe.stop_count(), 1);
        }
    }

    #[test]
    fn test_media_for_current_call_is_attached() {
        let mut current = screen(CallKind::Voice);
        let devices = StubMediaDevices::new();
        let stream = devices
            .open(current.session.media_constraints())
            .expect("stub media");
        current.media_ready(current.session.id(), Ok(AcquiredStream::new(stream)));
        assert!(current.session.has_media());

        let mut other = screen(CallKind::Video);
        let error = MediaError::Unsupported(TrackKind::Video);
        other.media_ready(other.session.id(), Err(error.clone()));
        assert_eq!(other.session.media_error(), Some(&error));
    }

    #[test]
    fn test_video_media_failure_notice_mentions_microphone() {
        let mut video = screen(CallKind::Video);
        assert_eq!(video.media_notice_text(), None);
        video.media_ready(
            video.session.id(),
            Err(MediaError::Unsupported(TrackKind::Video)),
        );
        let notice = video.media_notice_text().expect("notice");
        assert!(notice.contains("video capture is not supported"));
        assert!(notice.contains("Microphone and level meter are off"));

        let mut voice = screen(CallKind::Voice);
        voice.media_ready(
            voice.session.id(),
            Err(MediaError::PermissionDenied(TrackKind::Audio)),
        );
        assert_eq!(
            voice.media_notice_text().as_deref(),
            Some("Media unavailable: permission to use the audio device was denied")
        );
    }
}
