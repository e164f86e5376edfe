use std::time::Duration;

use log::*;
use mtr_common::{parse_seconds, Secret};

const DEFAULT_FOOTBALL_API_URL: &str = "https://v3.football.api-sports.io";
const DEFAULT_TASK_QUEUE_URL: &str = "http://127.0.0.1:8123";
const DEFAULT_TASK_QUEUE_NAME: &str = "match-tracker";
const DEFAULT_PUBLIC_URL: &str = "http://127.0.0.1:8460";
const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Default)]
pub struct FootballApiConfig {
    pub base_url: String,
    pub api_key: Secret<String>,
    /// Restrict fixtures to a single league
    pub league: Option<i64>,
    pub season: Option<i64>,
}

impl FootballApiConfig {
    pub fn new_from_env_or_default() -> Self {
        let base_url = std::env::var("MTR_FOOTBALL_API_URL").unwrap_or_else(|_| {
            info!("MTR_FOOTBALL_API_URL not set, using {DEFAULT_FOOTBALL_API_URL} as default");
            DEFAULT_FOOTBALL_API_URL.to_string()
        });
        let api_key = Secret::new(std::env::var("MTR_FOOTBALL_API_KEY").unwrap_or_else(|_| {
            warn!("MTR_FOOTBALL_API_KEY not set, using (probably useless) default");
            "0000000000000000".to_string()
        }));
        let league = optional_i64("MTR_FOOTBALL_LEAGUE");
        let season = optional_i64("MTR_FOOTBALL_SEASON");
        Self { base_url, api_key, league, season }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskQueueConfig {
    pub base_url: String,
    pub queue: String,
    pub token: Secret<String>,
    /// The externally reachable URL of the match tracker server. Task callbacks are sent here.
    pub public_url: String,
}

impl TaskQueueConfig {
    pub fn new_from_env_or_default() -> Self {
        let base_url = std::env::var("MTR_TASK_QUEUE_URL").unwrap_or_else(|_| {
            info!("MTR_TASK_QUEUE_URL not set, using {DEFAULT_TASK_QUEUE_URL} as default");
            DEFAULT_TASK_QUEUE_URL.to_string()
        });
        let queue = std::env::var("MTR_TASK_QUEUE_NAME").unwrap_or_else(|_| {
            info!("MTR_TASK_QUEUE_NAME not set, using {DEFAULT_TASK_QUEUE_NAME} as default");
            DEFAULT_TASK_QUEUE_NAME.to_string()
        });
        let token = Secret::new(std::env::var("MTR_TASK_QUEUE_TOKEN").unwrap_or_else(|_| {
            warn!("MTR_TASK_QUEUE_TOKEN not set. Requests to the task queue will not be authenticated");
            String::default()
        }));
        let public_url = std::env::var("MTR_PUBLIC_URL").unwrap_or_else(|_| {
            warn!("MTR_PUBLIC_URL not set, using {DEFAULT_PUBLIC_URL}. The task queue must be able to reach this URL");
            DEFAULT_PUBLIC_URL.to_string()
        });
        Self { base_url, queue, token, public_url }
    }
}

#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub timeout: Duration,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(DEFAULT_WEBHOOK_TIMEOUT_SECS) }
    }
}

impl WebhookConfig {
    pub fn new_from_env_or_default() -> Self {
        let timeout = std::env::var("MTR_WEBHOOK_TIMEOUT")
            .ok()
            .and_then(|s| {
                parse_seconds(&s)
                    .map_err(|e| warn!("{e}. Using the default webhook timeout of {DEFAULT_WEBHOOK_TIMEOUT_SECS}s"))
                    .ok()
            })
            .and_then(|d| d.to_std().ok())
            .unwrap_or_else(|| Duration::from_secs(DEFAULT_WEBHOOK_TIMEOUT_SECS));
        Self { timeout }
    }
}

fn optional_i64(var: &str) -> Option<i64> {
    let value = std::env::var(var).ok()?;
    value
        .trim()
        .parse::<i64>()
        .map_err(|e| warn!("{var} is not a valid number ({value}). Ignoring it. {e}"))
        .ok()
}
