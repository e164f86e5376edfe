//! # Match tracker public API
//!
//! The `tracker_api` module exposes the lifecycle entry points of the match tracker. Each API is created by
//! supplying the collaborators it needs, so callers only depend on what they use.
//!
//! * [`alias_api`] resolves human-entered team names and seeds teams and aliases.
//! * [`match_flow_api`] registers fixtures for result tracking.
//! * [`result_check_api`] runs one scheduled result check for a match.
//! * [`subscription_api`] manages webhook subscriptions and cleans up matches nobody is waiting for.
//! * [`notification_api`] delivers one result to one subscriber.
//! * [`team_link_api`] links teams to the fixture provider in bulk.
//!
//! # Idempotency
//!
//! Result checks and notifications are driven by an at-least-once push scheduler. Every entry point starts with a
//! status guard so that duplicate or late deliveries are no-ops, and the scheduler's "already exists" response is
//! treated as success wherever a task is scheduled.
//!
//! ```rust,ignore
//! use match_tracker_engine::{MatchFlowApi, PollSchedule, SqliteDatabase};
//! let db = SqliteDatabase::new(5).await?;
//! let api = MatchFlowApi::new(db, provider, scheduler, PollSchedule::default());
//! let registered = api.create_match(kickoff, "Man Utd", "Chelsea").await?;
//! ```
use log::debug;

use crate::traits::{ScheduledTask, SchedulerError, TaskScheduler};

pub mod alias_api;
pub mod errors;
pub mod match_flow_api;
pub mod notification_api;
pub mod poll_schedule;
pub mod result_check_api;
pub mod subscription_api;
pub mod team_link_api;

/// Schedules a result check. If the scheduler already holds the task (a redelivered request got there first), the
/// existing task is returned instead.
pub(crate) async fn schedule_or_fetch_check<S: TaskScheduler>(
    scheduler: &S,
    match_id: i64,
    attempt: i32,
    execute_at: chrono::DateTime<chrono::Utc>,
) -> Result<ScheduledTask, SchedulerError> {
    match scheduler.schedule_check_result(match_id, attempt, execute_at).await {
        Err(SchedulerError::AlreadyExists(name)) => {
            debug!("⏰️ Check task {name} already exists. Fetching it from the scheduler");
            scheduler.fetch_check_result_task(match_id, attempt).await
        },
        result => result,
    }
}
