use chrono::{DateTime, Utc};
use match_tracker_engine::db_types::{Subscription, SubscriptionStatus};
use mtr_common::Secret;
use serde::{Deserialize, Serialize};

use crate::errors::ServerError;

//-------------------------------------------   Matches   ------------------------------------------------------------

/// A request to track the result of the fixture between `home` and `away` (team aliases).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMatchRequest {
    pub starts_at: DateTime<Utc>,
    pub home: String,
    pub away: String,
}

impl NewMatchRequest {
    pub fn validate(&self) -> Result<(), ServerError> {
        require_non_blank("home", &self.home)
            .and_then(|_| require_non_blank("away", &self.away))
            .map_err(ServerError::InvalidRequestBody)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCreated {
    pub match_id: i64,
}

//-----------------------------------------   Subscriptions   --------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct NewSubscriptionRequest {
    pub starts_at: DateTime<Utc>,
    pub home: String,
    pub away: String,
    /// The subscriber's webhook
    pub url: String,
    /// Signs the webhook body
    pub key: Secret<String>,
}

impl NewSubscriptionRequest {
    pub fn validate(&self) -> Result<(), ServerError> {
        require_non_blank("home", &self.home)
            .and_then(|_| require_non_blank("away", &self.away))
            .and_then(|_| require_http_url(&self.url))
            .and_then(|_| if self.key.is_set() { Ok(()) } else { Err("key must not be empty".to_string()) })
            .map_err(ServerError::InvalidRequestBody)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionCreated {
    pub subscription_id: i64,
    pub match_id: i64,
    pub status: SubscriptionStatus,
}

impl From<&Subscription> for SubscriptionCreated {
    fn from(s: &Subscription) -> Self {
        Self { subscription_id: s.id, match_id: s.match_id, status: s.status }
    }
}

/// Query parameters for `DELETE /api/subscriptions`. `url` is matched as a prefix of the subscription's webhook URL.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteSubscriptionParams {
    pub starts_at: DateTime<Utc>,
    pub home: String,
    pub away: String,
    pub url: String,
    pub key: Secret<String>,
}

impl DeleteSubscriptionParams {
    pub fn validate(&self) -> Result<(), ServerError> {
        require_non_blank("home", &self.home)
            .and_then(|_| require_non_blank("away", &self.away))
            .and_then(|_| require_non_blank("url", &self.url))
            .map_err(ServerError::InvalidRequestQuery)
    }
}

//---------------------------------------   Task callbacks   ---------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CheckResultRequest {
    pub match_id: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NotifySubscriberRequest {
    pub subscription_id: i64,
}

fn require_non_blank(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{field} must not be empty"))
    } else {
        Ok(())
    }
}

fn require_http_url(url: &str) -> Result<(), String> {
    let url = url.trim();
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(())
    } else {
        Err(format!("'{url}' is not an http(s) URL"))
    }
}
