use std::time::{Duration, Instant};

/// Handle to a recurring schedule. Dropping it cancels the schedule.
#[derive(Debug)]
pub struct TickSchedule {
    period: Duration,
    next_due: Instant,
}

impl TickSchedule {
    /// Creates a schedule whose first tick is due one period after `now`.
    pub fn every(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Consumes one due tick, if any, and moves the deadline forward by one period.
    ///
    /// Missed ticks are handed out one call at a time so callers see them in order.
    pub fn take_due(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.period;
        true
    }
}

/// One-shot action that fires once its delay has elapsed, unless cancelled first.
#[derive(Debug, Default)]
pub struct DelayedAction {
    due: Option<Instant>,
}

impl DelayedAction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules the action, replacing any pending one.
    pub fn schedule(&mut self, delay: Duration, now: Instant) {
        if self.due.is_some() {
            log::debug!("Replacing pending delayed action");
        }
        self.due = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.due
    }

    /// Returns true exactly once when the deadline has passed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}
