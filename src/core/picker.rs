use crate::audio::{AudioError, AudioSession, SoundOption};
use crate::core::schedule::DelayedAction;
use crate::core::settings::SettingsState;
use std::time::{Duration, Instant};

pub const PREVIEW_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerState {
    Closed,
    Open,
}

/// Alert sound selector. Picking an item previews it and stops the preview after a few seconds.
#[derive(Debug)]
pub struct SoundPicker {
    state: PickerState,
    preview_stop: DelayedAction,
}

impl Default for SoundPicker {
    fn default() -> Self {
        Self {
            state: PickerState::Closed,
            preview_stop: DelayedAction::new(),
        }
    }
}

impl SoundPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PickerState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == PickerState::Open
    }

    pub fn preview_pending(&self) -> bool {
        self.preview_stop.is_pending()
    }

    pub fn preview_deadline(&self) -> Option<Instant> {
        self.preview_stop.deadline()
    }

    pub fn open_requested(&mut self) {
        if self.state == PickerState::Closed {
            self.state = PickerState::Open;
        }
    }

    pub fn cancelled(&mut self) {
        if self.state == PickerState::Open {
            self.state = PickerState::Closed;
        }
    }

    /// Selects `option`, closes the picker and starts a bounded preview at the current volume.
    ///
    /// Ignored while the picker is closed.
    pub fn item_selected(
        &mut self,
        option: &'static SoundOption,
        settings: &mut SettingsState,
        audio: &mut AudioSession,
        now: Instant,
    ) -> Result<(), AudioError> {
        if self.state != PickerState::Open {
            log::debug!("Ignoring sound selection while picker is closed");
            return Ok(());
        }

        self.state = PickerState::Closed;
        settings.set_selected_sound(option);
        self.preview(option, settings.volume(), audio, now)
    }

    /// Plays `option` at `volume` and schedules it to stop after the preview window.
    pub fn preview(
        &mut self,
        option: &'static SoundOption,
        volume: u8,
        audio: &mut AudioSession,
        now: Instant,
    ) -> Result<(), AudioError> {
        self.preview_stop.cancel();
        audio.play(Some(&option.source), volume)?;
        self.preview_stop.schedule(PREVIEW_DURATION, now);
        log::debug!("Previewing {} for {:?}", option.label, PREVIEW_DURATION);
        Ok(())
    }

    /// Stops the preview once its time is up. Returns true when it did so.
    pub fn poll(&mut self, audio: &mut AudioSession, now: Instant) -> bool {
        if self.preview_stop.fire_if_due(now) {
            log::debug!("Preview time elapsed, stopping sound");
            audio.stop();
            return true;
        }
        false
    }

    /// Drops any pending auto-stop, e.g. when another caller takes over playback.
    pub fn cancel_preview(&mut self) {
        self.preview_stop.cancel();
    }
}
