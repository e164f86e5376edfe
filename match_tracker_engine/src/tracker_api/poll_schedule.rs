use chrono::{DateTime, Duration, Utc};

/// When to poll the fixture provider for a result.
///
/// The first check runs `first_attempt_delay` after kickoff. While the match is still in progress, check `n + 1` runs
/// `interval` after check `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    pub first_attempt_delay: Duration,
    pub interval: Duration,
}

impl Default for PollSchedule {
    fn default() -> Self {
        Self { first_attempt_delay: Duration::minutes(115), interval: Duration::minutes(15) }
    }
}

impl PollSchedule {
    pub fn new(first_attempt_delay: Duration, interval: Duration) -> Self {
        Self { first_attempt_delay, interval }
    }

    pub fn first_attempt_at(&self, starts_at: DateTime<Utc>) -> DateTime<Utc> {
        starts_at + self.first_attempt_delay
    }

    /// The execution time of the attempt that follows `current_attempt` (1-based).
    pub fn next_attempt_at(&self, starts_at: DateTime<Utc>, current_attempt: i32) -> DateTime<Utc> {
        starts_at + self.first_attempt_delay + self.interval * current_attempt
    }
}
