use eframe::egui;
use crate::audio::{AudioError, AudioSession, SoundOption, SOUND_OPTIONS};
use crate::core::{SettingsState, SoundPicker, MAX_VOLUME};
use std::time::Instant;

pub struct SettingsScreen {
    pub picker: SoundPicker,
}

impl SettingsScreen {
    pub fn new() -> Self {
        Self {
            picker: SoundPicker::new(),
        }
    }

    /// Stops a finished preview. Returns true when playback was stopped.
    pub fn poll(&mut self, audio: &mut AudioSession, now: Instant) -> bool {
        self.picker.poll(audio, now)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.picker.preview_deadline()
    }

    pub fn set_alert_enabled(&mut self, settings: &mut SettingsState, enabled: bool) {
        settings.set_alert_enabled(enabled);
        if !enabled {
            // The selector is hidden, so an open picker must not stay usable.
            self.picker.cancelled();
        }
    }

    /// Confirms the current settings, replaying the alert sound as a bounded preview.
    pub fn save_settings(
        &mut self,
        settings: &SettingsState,
        audio: &mut AudioSession,
        now: Instant,
    ) -> Result<(), AudioError> {
        log::info!(
            "Settings saved: sound={}, volume={}, alert_enabled={}",
            settings.selected_sound().value,
            settings.volume(),
            settings.alert_enabled()
        );

        if !settings.alert_enabled() {
            return Ok(());
        }
        self.picker
            .preview(settings.selected_sound(), settings.volume(), audio, now)
    }

    /// Draws the settings form. Returns true when "Save Settings" was clicked.
    pub fn show(&mut self, ui: &mut egui::Ui, settings: &mut SettingsState) -> bool {
        ui.vertical_centered(|ui| {
            ui.heading("Pomodoro Settings");
        });
        ui.add_space(20.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Enable Alert Sound").strong());
                let mut enabled = settings.alert_enabled();
                if ui.checkbox(&mut enabled, "").changed() {
                    self.set_alert_enabled(settings, enabled);
                }
            });
        });

        if settings.alert_enabled() {
            self.show_alert_controls(ui, settings);
        }

        ui.add_space(20.0);
        ui.vertical_centered(|ui| {
            ui.add(egui::Button::new("💾 Save Settings").min_size(egui::vec2(160.0, 36.0)))
                .clicked()
        })
        .inner
    }

    fn show_alert_controls(&mut self, ui: &mut egui::Ui, settings: &mut SettingsState) {
        ui.add_space(12.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label(egui::RichText::new("Alert Sound").strong());
            let label = format!("{}  ⏷", settings.selected_sound().label);
            if ui.button(label).clicked() {
                self.picker.open_requested();
            }
        });

        ui.add_space(12.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label(egui::RichText::new("Alert Volume").strong());
            ui.horizontal(|ui| {
                ui.label("🔈");
                let mut volume = settings.volume();
                let slider = egui::Slider::new(&mut volume, 0..=MAX_VOLUME).show_value(false);
                if ui.add(slider).changed() {
                    settings.set_volume(volume);
                }
                ui.label("🔊");
            });
            ui.label(format!("{}%", settings.volume()));
        });
    }

    /// Draws the picker window while it is open and applies the user's choice.
    pub fn show_picker_dialog(
        &mut self,
        ctx: &egui::Context,
        settings: &mut SettingsState,
        audio: &mut AudioSession,
    ) -> Result<(), AudioError> {
        if !self.picker.is_open() {
            return Ok(());
        }

        let mut chosen: Option<&'static SoundOption> = None;
        let mut cancelled = false;
        let selected_value = settings.selected_sound().value;

        egui::Window::new("Select Alert Sound")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                for option in SOUND_OPTIONS.iter() {
                    let text = if option.value == selected_value {
                        format!("✔ {}", option.label)
                    } else {
                        option.label.to_string()
                    };
                    if ui.selectable_label(option.value == selected_value, text).clicked() {
                        chosen = Some(option);
                    }
                }
                ui.separator();
                if ui.button("Cancel").clicked() {
                    cancelled = true;
                }
            });

        if let Some(option) = chosen {
            return self.picker.item_selected(option, settings, audio, Instant::now());
        }
        if cancelled {
            self.picker.cancelled();
        }
        Ok(())
    }
}

impl Default for SettingsScreen {
    fn default() -> Self {
        Self::new()
    }
}
