use std::time::Duration;

pub const DEFAULT_INTERVAL_COUNT: u32 = 5;
pub const DEFAULT_INTERVAL_SLEEP_MS: u64 = 100;
pub const DEFAULT_MAX_DURATION_SECS: u64 = 300;

/// Pacing of the simulation. One interval is a slice of a simulated hour;
/// the worker cadences are fixed fractions of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationTiming {
    pub interval_count: u32,
    pub interval_sleep: Duration,
    pub max_duration: Duration,
}

impl SimulationTiming {
    pub fn new(interval_count: u32, interval_sleep: Duration, max_duration: Duration) -> Self {
        Self {
            interval_count,
            interval_sleep,
            max_duration,
        }
    }

    pub fn dispatcher_poll(&self) -> Duration {
        self.interval_sleep / 2
    }

    pub fn elevator_tick(&self) -> Duration {
        self.interval_sleep / 8
    }

    pub fn done_poll(&self) -> Duration {
        self.interval_sleep.saturating_mul(2)
    }
}

impl Default for SimulationTiming {
    fn default() -> Self {
        Self::new(
            DEFAULT_INTERVAL_COUNT,
            Duration::from_millis(DEFAULT_INTERVAL_SLEEP_MS),
            Duration::from_secs(DEFAULT_MAX_DURATION_SECS),
        )
    }
}
