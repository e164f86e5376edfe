use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client,
    Response,
    StatusCode,
};
use serde_json::json;

use crate::{
    config::TaskQueueConfig,
    data_objects::{HttpTarget, NewQueueTask, QueueTask},
    FixtureToolsError,
};

pub fn check_result_task_name(match_id: i64, attempt: i32) -> String {
    format!("check-result-{match_id}-{attempt}")
}

pub fn notify_subscriber_task_name(subscription_id: i64) -> String {
    format!("notify-subscriber-{subscription_id}")
}

/// A client for the push task queue.
///
/// Task names are derived from the task's arguments, so the queue rejects a duplicate request with `409 Conflict`,
/// reported as [`FixtureToolsError::TaskAlreadyExists`].
#[derive(Clone)]
pub struct TaskQueueClient {
    config: TaskQueueConfig,
    client: Arc<Client>,
}

impl TaskQueueClient {
    pub fn new(config: TaskQueueConfig) -> Result<Self, FixtureToolsError> {
        let mut headers = HeaderMap::with_capacity(2);
        if config.token.is_set() {
            let bearer = format!("Bearer {}", config.token.reveal());
            let val = HeaderValue::from_str(&bearer).map_err(|e| FixtureToolsError::Initialization(e.to_string()))?;
            headers.insert(AUTHORIZATION, val);
        }
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| FixtureToolsError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn tasks_url(&self) -> String {
        format!("{}/queues/{}/tasks", self.config.base_url.trim_end_matches('/'), self.config.queue)
    }

    fn callback_url(&self, path: &str) -> String {
        format!("{}{path}", self.config.public_url.trim_end_matches('/'))
    }

    pub async fn create_task(&self, task: NewQueueTask) -> Result<QueueTask, FixtureToolsError> {
        trace!("Creating task {} for {}", task.name, task.schedule_time);
        let response = self
            .client
            .post(self.tasks_url())
            .json(&task)
            .send()
            .await
            .map_err(|e| FixtureToolsError::RequestError(e.to_string()))?;
        if response.status() == StatusCode::CONFLICT {
            return Err(FixtureToolsError::TaskAlreadyExists(task.name));
        }
        let created = parse_response::<QueueTask>(response).await?;
        debug!("Task {} created. It runs at {}", created.name, created.schedule_time);
        Ok(created)
    }

    pub async fn get_task(&self, name: &str) -> Result<QueueTask, FixtureToolsError> {
        let url = format!("{}/{name}", self.tasks_url());
        let response = self.client.get(url).send().await.map_err(|e| FixtureToolsError::RequestError(e.to_string()))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(FixtureToolsError::TaskNotFound(name.to_string()));
        }
        parse_response::<QueueTask>(response).await
    }

    pub async fn delete_task(&self, name: &str) -> Result<(), FixtureToolsError> {
        let url = format!("{}/{name}", self.tasks_url());
        let response =
            self.client.delete(url).send().await.map_err(|e| FixtureToolsError::RequestError(e.to_string()))?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(FixtureToolsError::TaskNotFound(name.to_string())),
            s if s.is_success() => {
                debug!("Task {name} deleted");
                Ok(())
            },
            s => {
                let message = response.text().await.unwrap_or_default();
                Err(FixtureToolsError::QueryError { status: s.as_u16(), message })
            },
        }
    }

    /// Schedules a call to `POST {public_url}/tasks/check-result` for the match.
    pub async fn schedule_check_result(
        &self,
        match_id: i64,
        attempt: i32,
        execute_at: DateTime<Utc>,
    ) -> Result<QueueTask, FixtureToolsError> {
        let task = NewQueueTask {
            name: check_result_task_name(match_id, attempt),
            schedule_time: execute_at,
            http_request: HttpTarget::post(self.callback_url("/tasks/check-result"), json!({ "match_id": match_id })),
        };
        self.create_task(task).await
    }

    pub async fn fetch_check_result_task(&self, match_id: i64, attempt: i32) -> Result<QueueTask, FixtureToolsError> {
        self.get_task(&check_result_task_name(match_id, attempt)).await
    }

    /// Schedules an immediate call to `POST {public_url}/tasks/notify-subscriber` for the subscription.
    pub async fn schedule_subscriber_notification(&self, subscription_id: i64) -> Result<QueueTask, FixtureToolsError> {
        let body = json!({ "subscription_id": subscription_id });
        let task = NewQueueTask {
            name: notify_subscriber_task_name(subscription_id),
            schedule_time: Utc::now(),
            http_request: HttpTarget::post(self.callback_url("/tasks/notify-subscriber"), body),
        };
        self.create_task(task).await
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, FixtureToolsError> {
    if response.status().is_success() {
        trace!("Task queue request successful. {}", response.status());
        response.json::<T>().await.map_err(|e| FixtureToolsError::JsonError(e.to_string()))
    } else {
        let status = response.status().as_u16();
        let message = response.text().await.map_err(|e| FixtureToolsError::RequestError(e.to_string()))?;
        Err(FixtureToolsError::QueryError { status, message })
    }
}
