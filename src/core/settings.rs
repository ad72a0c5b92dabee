use crate::audio::{default_sound, SoundOption};

pub const MAX_VOLUME: u8 = 100;
pub const DEFAULT_VOLUME: u8 = 50;

/// Alert preferences shared by the timer and settings screens. Lives only as long as the app.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsState {
    selected_sound: &'static SoundOption,
    volume: u8,
    alert_enabled: bool,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            selected_sound: default_sound(),
            volume: DEFAULT_VOLUME,
            alert_enabled: true,
        }
    }
}

impl SettingsState {
    pub fn selected_sound(&self) -> &'static SoundOption {
        self.selected_sound
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn alert_enabled(&self) -> bool {
        self.alert_enabled
    }

    pub fn set_selected_sound(&mut self, sound: &'static SoundOption) {
        log::debug!("Alert sound set to {}", sound.label);
        self.selected_sound = sound;
    }

    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(MAX_VOLUME);
    }

    pub fn set_alert_enabled(&mut self, enabled: bool) {
        log::debug!("Alert sound {}", if enabled { "enabled" } else { "disabled" });
        self.alert_enabled = enabled;
    }
}
