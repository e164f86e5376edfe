use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db_types::{ExternalMatchStatus, NewExternalMatch, SubscriptionStatus};

/// One fixture as reported by the fixture provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub provider_match_id: i64,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub home_team_name: String,
    pub away_team_name: String,
    pub starts_at: DateTime<Utc>,
    pub status: ExternalMatchStatus,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
}

impl Fixture {
    pub fn is_between(&self, home_team_id: i64, away_team_id: i64) -> bool {
        self.home_team_id == home_team_id && self.away_team_id == away_team_id
    }

    /// Builds the cached snapshot of this fixture for the given internal match.
    pub fn to_external_match(&self, match_id: i64) -> NewExternalMatch {
        NewExternalMatch {
            match_id,
            provider_match_id: self.provider_match_id,
            home_score: self.home_score,
            away_score: self.away_score,
            status: self.status,
        }
    }
}

/// A task that the push scheduler has accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub name: String,
    pub execute_at: DateTime<Utc>,
}

impl ScheduledTask {
    pub fn new<S: Into<String>>(name: S, execute_at: DateTime<Utc>) -> Self {
        Self { name: name.into(), execute_at }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscriptionQueryFilter {
    pub match_id: Option<i64>,
    pub status: Option<SubscriptionStatus>,
    pub key: Option<String>,
    /// Matches subscriptions whose URL starts with this string
    pub url_prefix: Option<String>,
}

impl SubscriptionQueryFilter {
    pub fn with_match_id(mut self, match_id: i64) -> Self {
        self.match_id = Some(match_id);
        self
    }

    pub fn with_status(mut self, status: SubscriptionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_key<S: Into<String>>(mut self, key: S) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_url_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.url_prefix = Some(prefix.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.match_id.is_none() && self.status.is_none() && self.key.is_none() && self.url_prefix.is_none()
    }
}
