use eframe::egui;
use crate::audio::{ensure_catalog_sounds, AudioSession, RodioBackend};
use crate::core::{AppConfig, SettingsState, TimerMode};
use crate::gui::settings_screen::SettingsScreen;
use crate::gui::timer_screen::TimerScreen;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Timer,
    Settings,
}

pub struct PomodoroApp {
    pub config: AppConfig,
    pub settings: SettingsState,
    pub audio: AudioSession,
    pub timer_screen: TimerScreen,
    pub settings_screen: SettingsScreen,
    pub active_tab: Tab,
    pub status_message: String,
}

impl PomodoroApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> anyhow::Result<Self> {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let config = AppConfig::load()?;
        let sounds_dir = config.sounds_dir();

        let mut status_message = String::new();
        if let Err(e) = ensure_catalog_sounds(&sounds_dir) {
            log::error!("Failed to prepare alert sounds in {}: {}", sounds_dir.display(), e);
            status_message = "Alert sounds unavailable".to_string();
        }

        let backend = RodioBackend::new(config.output_device_name.clone(), sounds_dir);
        let audio = AudioSession::new(Box::new(backend));

        let mut app = Self::with_audio(config, audio);
        app.status_message = status_message;
        Ok(app)
    }

    /// Builds the app around an existing audio session.
    pub fn with_audio(config: AppConfig, audio: AudioSession) -> Self {
        let mode = if config.start_in_test_mode {
            TimerMode::Test
        } else {
            TimerMode::Normal
        };

        Self {
            config,
            settings: SettingsState::default(),
            audio,
            timer_screen: TimerScreen::mount(mode),
            settings_screen: SettingsScreen::new(),
            active_tab: Tab::Timer,
            status_message: String::new(),
        }
    }

    /// Advances timers and handles anything that came due by `now`.
    pub fn process_timers(&mut self, now: Instant) {
        if self.timer_screen.poll(now) {
            self.on_timer_complete();
        }

        if self.settings_screen.poll(&mut self.audio, now) {
            self.status_message = "Preview finished".to_string();
        }
    }

    fn on_timer_complete(&mut self) {
        if !self.settings.alert_enabled() {
            log::debug!("Alert sound disabled, showing notice only");
            self.status_message = "Pomodoro complete".to_string();
            return;
        }

        // The alert replaces any preview, so its pending auto-stop must not cut the alert short.
        self.settings_screen.picker.cancel_preview();

        let sound = self.settings.selected_sound();
        match self.audio.play(Some(&sound.source), self.settings.volume()) {
            Ok(()) => self.status_message = format!("Pomodoro complete, playing {}", sound.label),
            Err(e) => {
                log::error!("Failed to play alert sound: {}", e);
                self.status_message = "Pomodoro complete (alert sound failed)".to_string();
            }
        }
    }

    pub fn save_settings(&mut self, now: Instant) {
        match self.settings_screen.save_settings(&self.settings, &mut self.audio, now) {
            Ok(()) => self.status_message = "Settings saved".to_string(),
            Err(e) => {
                log::error!("Failed to play confirmation sound: {}", e);
                self.status_message = "Settings saved (sound failed)".to_string();
            }
        }
    }

    pub fn dismiss_completion(&mut self) {
        self.timer_screen.dismiss_completion(&mut self.audio);
        self.status_message.clear();
    }

    fn next_deadline(&self) -> Option<Instant> {
        [self.timer_screen.next_deadline(), self.settings_screen.next_deadline()]
            .into_iter()
            .flatten()
            .min()
    }
}

impl eframe::App for PomodoroApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.process_timers(now);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.active_tab, Tab::Timer, "⏱ Timer");
                ui.selectable_value(&mut self.active_tab, Tab::Settings, "⚙ Settings");
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Status:");
                if self.status_message.is_empty() {
                    ui.label("Ready");
                } else {
                    ui.label(&self.status_message);
                }
            });
        });

        let save_clicked = egui::CentralPanel::default()
            .show(ctx, |ui| match self.active_tab {
                Tab::Timer => {
                    self.timer_screen.show(ui);
                    false
                }
                Tab::Settings => self.settings_screen.show(ui, &mut self.settings),
            })
            .inner;

        if save_clicked {
            self.save_settings(Instant::now());
        }

        if let Err(e) = self
            .settings_screen
            .show_picker_dialog(ctx, &mut self.settings, &mut self.audio)
        {
            log::error!("Failed to preview sound: {}", e);
            self.status_message = "Could not preview sound".to_string();
        }

        if self.timer_screen.show_completion_dialog(ctx) {
            self.dismiss_completion();
        }

        // Wake up for the next tick or preview stop instead of repainting continuously.
        if let Some(deadline) = self.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
        } else {
            ctx.request_repaint_after(Duration::from_secs(1));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.timer_screen.unmount();
        self.audio.stop();
        log::info!("Shutting down");
    }
}
