//! HTTP clients for the services the match tracker talks to:
//!
//! * [`FootballApi`] fetches fixtures from the football data provider.
//! * [`TaskQueueClient`] creates and removes tasks on the push task queue.
//! * [`WebhookClient`] delivers signed results to subscribers.
mod config;
mod error;
mod football_api;
mod task_queue;
mod webhook;

pub mod data_objects;

pub use config::{FootballApiConfig, TaskQueueConfig, WebhookConfig};
pub use error::FixtureToolsError;
pub use football_api::FootballApi;
pub use task_queue::{check_result_task_name, notify_subscriber_task_name, TaskQueueClient};
pub use webhook::{calculate_hmac, WebhookClient, SIGNATURE_HEADER};
