use std::env;

use chrono::Duration;
use fixture_tools::{FootballApiConfig, TaskQueueConfig, WebhookConfig};
use log::*;
use match_tracker_engine::PollSchedule;
use mtr_common::{parse_boolean_flag, parse_minutes};

const DEFAULT_MTR_HOST: &str = "127.0.0.1";
const DEFAULT_MTR_PORT: u16 = 8460;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/match_tracker.db";
const DEFAULT_FIRST_CHECK_DELAY_MINS: i64 = 115;
const DEFAULT_RECHECK_INTERVAL_MINS: i64 = 15;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// When the first result check runs (relative to kickoff), and how often it is repeated after that.
    pub poll_schedule: PollSchedule,
    /// If true, the access log records the client address from the `Forwarded` / `X-Forwarded-For` headers rather
    /// than the connection's peer address. Only enable this behind a trusted proxy.
    pub use_x_forwarded_for: bool,
    pub football: FootballApiConfig,
    pub task_queue: TaskQueueConfig,
    pub webhook: WebhookConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_MTR_HOST.to_string(),
            port: DEFAULT_MTR_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            poll_schedule: PollSchedule::default(),
            use_x_forwarded_for: false,
            football: FootballApiConfig::default(),
            task_queue: TaskQueueConfig::default(),
            webhook: WebhookConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("MTR_HOST").ok().unwrap_or_else(|| DEFAULT_MTR_HOST.into());
        let port = env::var("MTR_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for MTR_PORT. {e} Using the default, {DEFAULT_MTR_PORT}, instead."
                    );
                    DEFAULT_MTR_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_MTR_PORT);
        let database_url = env::var("MTR_DATABASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ MTR_DATABASE_URL is not set. Using {DEFAULT_DATABASE_URL}.");
            DEFAULT_DATABASE_URL.into()
        });
        let poll_schedule = configure_poll_schedule(
            env::var("MTR_FIRST_CHECK_DELAY").ok(),
            env::var("MTR_RECHECK_INTERVAL").ok(),
        );
        let use_x_forwarded_for = parse_boolean_flag(env::var("MTR_USE_X_FORWARDED_FOR").ok(), false);
        Self {
            host,
            port,
            database_url,
            poll_schedule,
            use_x_forwarded_for,
            football: FootballApiConfig::new_from_env_or_default(),
            task_queue: TaskQueueConfig::new_from_env_or_default(),
            webhook: WebhookConfig::new_from_env_or_default(),
        }
    }
}

fn configure_poll_schedule(first_check_delay: Option<String>, recheck_interval: Option<String>) -> PollSchedule {
    let first_attempt_delay =
        minutes_or_default("MTR_FIRST_CHECK_DELAY", first_check_delay, DEFAULT_FIRST_CHECK_DELAY_MINS);
    let interval = minutes_or_default("MTR_RECHECK_INTERVAL", recheck_interval, DEFAULT_RECHECK_INTERVAL_MINS);
    if interval == Duration::zero() {
        warn!("🪛️ MTR_RECHECK_INTERVAL is zero. In-progress matches will be polled back-to-back.");
    }
    PollSchedule::new(first_attempt_delay, interval)
}

fn minutes_or_default(var: &str, value: Option<String>, default_mins: i64) -> Duration {
    match value {
        None => {
            info!("🪛️ {var} is not set. Using the default value of {default_mins} minutes.");
            Duration::minutes(default_mins)
        },
        Some(s) => parse_minutes(&s).unwrap_or_else(|e| {
            warn!("🪛️ Invalid configuration value for {var}. {e}. Using {default_mins} minutes instead.");
            Duration::minutes(default_mins)
        }),
    }
}
