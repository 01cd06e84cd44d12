//! Session tuning knobs.

use std::time::Duration;

/// Configuration for the attach poll.
///
/// The poll is a deliberate busy-wait with sleep: real bus enumeration is
/// cheap and the tool is unusable until both peripherals exist, so a
/// fixed short interval keeps reattach latency low on hardware without
/// burning the whole core. No backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Delay between enumeration attempts while a peripheral is absent.
    pub poll_interval: Duration,
}

impl SessionConfig {
    /// Default attach poll cadence.
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

    /// Override the attach poll interval. Tests use [`Duration::ZERO`].
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
        }
    }
}
