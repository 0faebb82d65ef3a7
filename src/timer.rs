use std::time::{Duration, Instant};

pub const TIMER_DEC_PER_SECOND: u64 = 60;
/// Most periods `Cadence::ticks_due` will hand out at once after a stall.
pub const MAX_CATCH_UP: u32 = 4;

/// An 8-bit countdown register.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub count: u8,
}

impl Timer {
    pub fn new(init_count: u8) -> Self {
        Self { count: init_count }
    }

    pub fn set(&mut self, value: u8) {
        self.count = value;
    }

    /// Counts down by one, stopping at zero.
    pub fn tick(&mut self) {
        self.count = self.count.saturating_sub(1);
    }

    pub fn is_active(&self) -> bool {
        self.count > 0
    }
}

/// Fixed-rate clock for the host loop: reports how many timer decrements are
/// owed since the last call, independent of how many instructions ran.
#[derive(Debug)]
pub struct Cadence {
    period: Duration,
    last_updated: Instant,
}

impl Cadence {
    pub fn new(per_second: u64, now: Instant) -> Self {
        let per_second = per_second.max(1);
        Self {
            period: Duration::from_nanos(1_000_000_000 / per_second),
            last_updated: now,
        }
    }

    pub fn sixty_hz(now: Instant) -> Self {
        Self::new(TIMER_DEC_PER_SECOND, now)
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Number of whole periods elapsed at `now`. The remainder carries over
    /// so slow frames catch up instead of drifting, but never more than
    /// `MAX_CATCH_UP` periods: after a longer stall the backlog is dropped.
    pub fn ticks_due(&mut self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.last_updated);
        if elapsed >= self.period * MAX_CATCH_UP {
            self.last_updated = now;
            return MAX_CATCH_UP;
        }
        let mut due = 0;
        while now.saturating_duration_since(self.last_updated) >= self.period {
            self.last_updated += self.period;
            due += 1;
        }
        due
    }
}
