//! Adapters that plug the `fixture_tools` HTTP clients into the engine's collaborator traits.
mod football;
mod task_queue;
mod webhook;

pub use football::{fixture_from_api, FootballProvider};
pub use task_queue::QueueTaskScheduler;
pub use webhook::HttpWebhookNotifier;
