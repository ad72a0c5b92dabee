use eframe::egui;
use crate::audio::AudioSession;
use crate::core::{format_time, CountdownEngine, TickOutcome, TimerEvent, TimerMode};
use chrono::{DateTime, Local};
use std::time::Instant;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

/// Pending "session over" notice waiting for the user to acknowledge it.
#[derive(Debug, Clone)]
pub struct CompletionNotice {
    pub mode: TimerMode,
    pub finished_at: DateTime<Local>,
}

impl CompletionNotice {
    pub fn message(&self) -> String {
        match self.mode {
            TimerMode::Normal => "Your 25-minute work session is over.".to_string(),
            TimerMode::Test => "Your 5-second test session is over.".to_string(),
        }
    }
}

pub struct TimerScreen {
    pub engine: CountdownEngine,
    event_receiver: broadcast::Receiver<TimerEvent>,
    pub completion: Option<CompletionNotice>,
}

impl TimerScreen {
    /// Mounts the screen with a fresh countdown.
    pub fn mount(mode: TimerMode) -> Self {
        let engine = CountdownEngine::new(mode);
        let event_receiver = engine.subscribe();
        log::debug!("Timer screen mounted in {} mode", mode.as_str());
        Self {
            engine,
            event_receiver,
            completion: None,
        }
    }

    /// Cancels the countdown schedule. The screen must not tick after this.
    pub fn unmount(&mut self) {
        log::debug!("Timer screen unmounted");
        self.engine.teardown();
    }

    /// Advances the countdown. Returns true when a session finished during this call.
    pub fn poll(&mut self, now: Instant) -> bool {
        let completed = self.engine.poll(now).contains(&TickOutcome::Completed);
        self.process_timer_events();

        if completed && self.completion.is_none() {
            // The completion event was dropped from the channel; the tick outcome is authoritative.
            self.completion = Some(CompletionNotice {
                mode: self.engine.mode(),
                finished_at: Local::now(),
            });
        }
        completed
    }

    fn process_timer_events(&mut self) {
        loop {
            match self.event_receiver.try_recv() {
                Ok(TimerEvent::Completed { mode, finished_at }) => {
                    log::info!("Pomodoro finished at {}", finished_at.format("%H:%M:%S"));
                    self.completion = Some(CompletionNotice { mode, finished_at });
                }
                Ok(TimerEvent::Started { mode }) => {
                    log::debug!("Timer event: started ({})", mode.as_str());
                }
                Ok(TimerEvent::Reset { mode }) => {
                    log::debug!("Timer event: reset ({})", mode.as_str());
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    log::warn!("Timer event receiver lagged, skipped {} events", skipped);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }

    /// Acknowledges the completion notice and silences the alert.
    pub fn dismiss_completion(&mut self, audio: &mut AudioSession) {
        if self.completion.take().is_some() {
            audio.stop();
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.engine.next_deadline()
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let running = self.engine.is_running();

        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.label(
                egui::RichText::new(format_time(self.engine.remaining_seconds()))
                    .size(72.0)
                    .strong()
                    .monospace(),
            );
            ui.add_space(40.0);

            ui.horizontal(|ui| {
                // Centre the two buttons in the available width.
                let buttons_width = 180.0;
                ui.add_space(((ui.available_width() - buttons_width) / 2.0).max(0.0));

                if ui
                    .add_enabled(!running, egui::Button::new("▶ Start").min_size(egui::vec2(80.0, 36.0)))
                    .clicked()
                {
                    self.engine.start(Instant::now());
                }
                if ui
                    .add(egui::Button::new("🔄 Reset").min_size(egui::vec2(80.0, 36.0)))
                    .clicked()
                {
                    self.engine.reset();
                }
            });

            ui.add_space(20.0);
            let mut test_mode = self.engine.mode() == TimerMode::Test;
            if ui.checkbox(&mut test_mode, "Test mode (5 seconds)").changed() {
                self.engine
                    .set_mode(if test_mode { TimerMode::Test } else { TimerMode::Normal });
            }
        });
    }

    /// Shows the completion notice, if any. Returns true when the user dismissed it.
    pub fn show_completion_dialog(&self, ctx: &egui::Context) -> bool {
        let Some(notice) = &self.completion else {
            return false;
        };

        let mut dismissed = false;
        egui::Window::new("Pomodoro Complete!")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(notice.message());
                ui.label(format!("Finished at {}", notice.finished_at.format("%H:%M:%S")));
                ui.add_space(10.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        dismissed
    }
}
