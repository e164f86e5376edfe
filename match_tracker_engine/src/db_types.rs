use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use log::error;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("Invalid {kind}: {value}")]
pub struct ConversionError {
    kind: &'static str,
    value: String,
}

impl ConversionError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self { kind, value: value.to_string() }
    }
}

//--------------------------------------        Team           ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------        Alias          ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Alias {
    pub id: i64,
    pub alias: String,
    pub team_id: i64,
    pub created_at: DateTime<Utc>,
}

/// An alias joined with its team and, if the team has been linked to the fixture provider, the provider's team id.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct AliasRecord {
    pub alias: String,
    pub team_id: i64,
    pub team_name: String,
    pub provider_team_id: Option<i64>,
}

//--------------------------------------     ExternalTeam      ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ExternalTeam {
    pub id: i64,
    pub team_id: i64,
    pub provider_team_id: i64,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------  MatchResultStatus    ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MatchResultStatus {
    /// The match row exists, but the first result check has not been scheduled yet.
    NotScheduled,
    /// A result check is outstanding.
    Scheduled,
    /// The task scheduler rejected a follow-up result check.
    SchedulingError,
    /// The final result was received and subscribers have been queued for notification.
    Received,
    /// The fixture provider could not be reached during a result check.
    ApiError,
    /// The provider reported that the fixture will not produce a result.
    Cancelled,
}

impl Display for MatchResultStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::NotScheduled => "not_scheduled",
            Self::Scheduled => "scheduled",
            Self::SchedulingError => "scheduling_error",
            Self::Received => "received",
            Self::ApiError => "api_error",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

impl FromStr for MatchResultStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_scheduled" => Ok(Self::NotScheduled),
            "scheduled" => Ok(Self::Scheduled),
            "scheduling_error" => Ok(Self::SchedulingError),
            "received" => Ok(Self::Received),
            "api_error" => Ok(Self::ApiError),
            "cancelled" => Ok(Self::Cancelled),
            s => Err(ConversionError::new("match result status", s)),
        }
    }
}

//--------------------------------------        Match          ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Match {
    pub id: i64,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub starts_at: DateTime<Utc>,
    pub result_status: MatchResultStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Upsert payload for a match. When `id` is `None`, the (home, away, match day) key decides whether a row is inserted
/// or updated.
#[derive(Debug, Clone)]
pub struct NewMatch {
    pub id: Option<i64>,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub starts_at: DateTime<Utc>,
    pub result_status: MatchResultStatus,
}

impl NewMatch {
    pub fn new(home_team_id: i64, away_team_id: i64, starts_at: DateTime<Utc>) -> Self {
        Self { id: None, home_team_id, away_team_id, starts_at, result_status: MatchResultStatus::NotScheduled }
    }

    pub fn with_id(mut self, id: Option<i64>) -> Self {
        self.id = id;
        self
    }
}

//--------------------------------------  ExternalMatchStatus  ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ExternalMatchStatus {
    NotStarted,
    InProgress,
    Finished,
    Cancelled,
    Unknown,
}

impl ExternalMatchStatus {
    /// Only fixtures that have not been decided yet can be registered for result tracking.
    pub fn is_schedulable(&self) -> bool {
        matches!(self, Self::NotStarted | Self::InProgress)
    }
}

impl Display for ExternalMatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Finished => "finished",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

impl FromStr for ExternalMatchStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_started" => Ok(Self::NotStarted),
            "in_progress" => Ok(Self::InProgress),
            "finished" => Ok(Self::Finished),
            "cancelled" => Ok(Self::Cancelled),
            "unknown" => Ok(Self::Unknown),
            s => Err(ConversionError::new("external match status", s)),
        }
    }
}

impl From<String> for ExternalMatchStatus {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid external match status: {value}. But this conversion cannot fail. Defaulting to Unknown");
            ExternalMatchStatus::Unknown
        })
    }
}

//--------------------------------------    ExternalMatch      ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ExternalMatch {
    pub id: i64,
    pub match_id: i64,
    pub provider_match_id: i64,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub status: ExternalMatchStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewExternalMatch {
    pub match_id: i64,
    pub provider_match_id: i64,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub status: ExternalMatchStatus,
}

//--------------------------------------   CheckResultTask     ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct CheckResultTask {
    pub id: i64,
    pub match_id: i64,
    /// The task handle, as issued by the task scheduler
    pub name: String,
    /// 1-based count of how many result checks have been scheduled for the match
    pub attempt_number: i32,
    pub execute_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCheckResultTask {
    pub match_id: i64,
    pub name: String,
    pub attempt_number: i32,
    pub execute_at: DateTime<Utc>,
}

//--------------------------------------  SubscriptionStatus   ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Waiting for the match result
    Pending,
    /// The notification task could not be scheduled
    SchedulingError,
    /// The subscriber acknowledged the result
    Successful,
    /// The subscriber's webhook rejected or failed to receive the result
    SubscriberError,
}

impl Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::SchedulingError => "scheduling_error",
            Self::Successful => "successful",
            Self::SubscriberError => "subscriber_error",
        };
        f.write_str(s)
    }
}

impl FromStr for SubscriptionStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "scheduling_error" => Ok(Self::SchedulingError),
            "successful" => Ok(Self::Successful),
            "subscriber_error" => Ok(Self::SubscriberError),
            s => Err(ConversionError::new("subscription status", s)),
        }
    }
}

//--------------------------------------     Subscription      ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Subscription {
    pub id: i64,
    pub match_id: i64,
    pub url: String,
    #[serde(skip_serializing)]
    pub key: String,
    pub status: SubscriptionStatus,
    pub error: Option<String>,
    pub notified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub match_id: i64,
    pub url: String,
    pub key: String,
}

impl NewSubscription {
    pub fn new<S: Into<String>>(match_id: i64, url: S, key: S) -> Self {
        Self { match_id, url: url.into(), key: key.into() }
    }
}

/// A status transition for a subscription. `error` and `notified_at` overwrite the stored values.
#[derive(Debug, Clone)]
pub struct SubscriptionUpdate {
    pub status: SubscriptionStatus,
    pub error: Option<String>,
    pub notified_at: Option<DateTime<Utc>>,
}

impl SubscriptionUpdate {
    pub fn successful(notified_at: DateTime<Utc>) -> Self {
        Self { status: SubscriptionStatus::Successful, error: None, notified_at: Some(notified_at) }
    }

    pub fn failed<S: Display>(status: SubscriptionStatus, error: S) -> Self {
        Self { status, error: Some(error.to_string()), notified_at: None }
    }
}
