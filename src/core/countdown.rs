use crate::core::schedule::TickSchedule;
use chrono::{DateTime, Local};
use std::time::{Duration, Instant};
use tokio::sync::broadcast;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);
pub const NORMAL_DURATION_SECS: u32 = 25 * 60;
pub const TEST_DURATION_SECS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    Normal,
    Test,
}

impl TimerMode {
    pub fn duration_secs(self) -> u32 {
        match self {
            TimerMode::Normal => NORMAL_DURATION_SECS,
            TimerMode::Test => TEST_DURATION_SECS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimerMode::Normal => "normal",
            TimerMode::Test => "test",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownState {
    pub remaining_seconds: u32,
    pub is_running: bool,
    pub mode: TimerMode,
}

impl CountdownState {
    pub fn new(mode: TimerMode) -> Self {
        Self {
            remaining_seconds: mode.duration_secs(),
            is_running: false,
            mode,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TimerEvent {
    Started { mode: TimerMode },
    Completed { mode: TimerMode, finished_at: DateTime<Local> },
    Reset { mode: TimerMode },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No schedule was active, nothing changed.
    Idle,
    Counting(u32),
    Completed,
}

pub struct CountdownEngine {
    state: CountdownState,
    schedule: Option<TickSchedule>,
    events: broadcast::Sender<TimerEvent>,
}

impl CountdownEngine {
    pub fn new(mode: TimerMode) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            state: CountdownState::new(mode),
            schedule: None,
            events,
        }
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.state.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn mode(&self) -> TimerMode {
        self.state.mode
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.events.subscribe()
    }

    pub fn start(&mut self, now: Instant) {
        if self.state.is_running {
            log::debug!("Countdown already running, ignoring start");
            return;
        }

        self.state.is_running = true;
        self.schedule = Some(TickSchedule::every(TICK_PERIOD, now));
        log::info!(
            "Countdown started in {} mode with {} remaining",
            self.state.mode.as_str(),
            format_time(self.state.remaining_seconds)
        );
        self.publish(TimerEvent::Started { mode: self.state.mode });
    }

    /// Runs one tick of the recurring schedule.
    pub fn tick(&mut self) -> TickOutcome {
        if self.schedule.is_none() {
            return TickOutcome::Idle;
        }

        if self.state.remaining_seconds <= 1 {
            self.cancel_schedule();
            self.state.is_running = false;
            let mode = self.state.mode;
            log::info!("Countdown complete ({} mode)", mode.as_str());
            self.publish(TimerEvent::Completed {
                mode,
                finished_at: Local::now(),
            });
            self.state.remaining_seconds = mode.duration_secs();
            return TickOutcome::Completed;
        }

        self.state.remaining_seconds -= 1;
        log::debug!("Tick: {} remaining", format_time(self.state.remaining_seconds));
        TickOutcome::Counting(self.state.remaining_seconds)
    }

    /// Runs every tick that has come due by `now`, oldest first.
    pub fn poll(&mut self, now: Instant) -> Vec<TickOutcome> {
        let mut outcomes = Vec::new();
        while self
            .schedule
            .as_mut()
            .map_or(false, |schedule| schedule.take_due(now))
        {
            outcomes.push(self.tick());
        }
        outcomes
    }

    pub fn reset(&mut self) {
        self.cancel_schedule();
        self.state.is_running = false;
        self.state.remaining_seconds = self.state.mode.duration_secs();
        log::info!("Countdown reset to {}", format_time(self.state.remaining_seconds));
        self.publish(TimerEvent::Reset { mode: self.state.mode });
    }

    /// Switches the duration policy. A running schedule keeps ticking against the new duration.
    pub fn set_mode(&mut self, mode: TimerMode) {
        self.state.mode = mode;
        self.state.remaining_seconds = mode.duration_secs();
        log::info!("Countdown mode set to {}", mode.as_str());
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.schedule.as_ref().map(TickSchedule::next_due)
    }

    pub fn teardown(&mut self) {
        if self.schedule.is_some() {
            log::debug!("Tearing down countdown with an active schedule");
        }
        self.cancel_schedule();
        self.state.is_running = false;
    }

    fn cancel_schedule(&mut self) {
        self.schedule.take();
    }

    fn publish(&self, event: TimerEvent) {
        // No subscribers is fine; the event just has no listeners yet.
        let _ = self.events.send(event);
    }
}

impl Drop for CountdownEngine {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Formats seconds as zero-padded `MM:SS`.
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
