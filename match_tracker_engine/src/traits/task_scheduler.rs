use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::traits::ScheduledTask;

#[derive(Debug, Clone, Error)]
pub enum SchedulerError {
    #[error("Task {0} already exists")]
    AlreadyExists(String),
    #[error("Task {0} does not exist")]
    NotFound(String),
    #[error("Could not reach the task scheduler. {0}")]
    Transport(String),
    #[error("The task scheduler sent an unexpected response. {0}")]
    InvalidResponse(String),
}

/// An external, at-least-once push scheduler.
///
/// Task names are derived from their arguments, so scheduling the same task twice yields
/// [`SchedulerError::AlreadyExists`] rather than a second task.
#[allow(async_fn_in_trait)]
pub trait TaskScheduler {
    /// Schedules result check number `attempt` for the match, to be executed at `execute_at`.
    async fn schedule_check_result(
        &self,
        match_id: i64,
        attempt: i32,
        execute_at: DateTime<Utc>,
    ) -> Result<ScheduledTask, SchedulerError>;

    /// Fetches a previously scheduled result check.
    async fn fetch_check_result_task(&self, match_id: i64, attempt: i32) -> Result<ScheduledTask, SchedulerError>;

    /// Schedules an immediate notification for the subscription.
    async fn schedule_subscriber_notification(&self, subscription_id: i64) -> Result<(), SchedulerError>;

    async fn delete_task(&self, name: &str) -> Result<(), SchedulerError>;
}
