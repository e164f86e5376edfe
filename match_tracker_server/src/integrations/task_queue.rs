use chrono::{DateTime, Utc};
use fixture_tools::{FixtureToolsError, TaskQueueClient};
use log::*;
use match_tracker_engine::traits::{ScheduledTask, SchedulerError, TaskScheduler};

/// [`TaskScheduler`] backed by the push task queue.
#[derive(Clone)]
pub struct QueueTaskScheduler {
    client: TaskQueueClient,
}

impl QueueTaskScheduler {
    pub fn new(client: TaskQueueClient) -> Self {
        Self { client }
    }
}

impl TaskScheduler for QueueTaskScheduler {
    async fn schedule_check_result(
        &self,
        match_id: i64,
        attempt: i32,
        execute_at: DateTime<Utc>,
    ) -> Result<ScheduledTask, SchedulerError> {
        let task = self.client.schedule_check_result(match_id, attempt, execute_at).await.map_err(scheduler_error)?;
        debug!("⏰️ Result check #{attempt} for match {match_id} queued as {}", task.name);
        Ok(ScheduledTask::new(task.name, task.schedule_time))
    }

    async fn fetch_check_result_task(&self, match_id: i64, attempt: i32) -> Result<ScheduledTask, SchedulerError> {
        let task = self.client.fetch_check_result_task(match_id, attempt).await.map_err(scheduler_error)?;
        Ok(ScheduledTask::new(task.name, task.schedule_time))
    }

    async fn schedule_subscriber_notification(&self, subscription_id: i64) -> Result<(), SchedulerError> {
        let task = self.client.schedule_subscriber_notification(subscription_id).await.map_err(scheduler_error)?;
        debug!("⏰️ Notification for subscription {subscription_id} queued as {}", task.name);
        Ok(())
    }

    async fn delete_task(&self, name: &str) -> Result<(), SchedulerError> {
        self.client.delete_task(name).await.map_err(scheduler_error)
    }
}

fn scheduler_error(e: FixtureToolsError) -> SchedulerError {
    match e {
        FixtureToolsError::TaskAlreadyExists(name) => SchedulerError::AlreadyExists(name),
        FixtureToolsError::TaskNotFound(name) => SchedulerError::NotFound(name),
        FixtureToolsError::JsonError(s) => SchedulerError::InvalidResponse(s),
        e => SchedulerError::Transport(e.to_string()),
    }
}
