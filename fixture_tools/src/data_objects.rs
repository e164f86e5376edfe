use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

//--------------------------------------   Football data API   ---------------------------------------------------------

/// The envelope of every football data API response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    /// Either an empty array, or an object of error messages keyed by parameter name
    #[serde(default)]
    pub errors: Value,
    #[serde(default = "Vec::new")]
    pub response: Vec<T>,
}

impl<T> ApiResponse<T> {
    pub fn has_errors(&self) -> bool {
        match &self.errors {
            Value::Null => false,
            Value::Array(a) => !a.is_empty(),
            Value::Object(o) => !o.is_empty(),
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiFixture {
    pub fixture: FixtureInfo,
    pub teams: FixtureTeams,
    pub goals: Goals,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FixtureInfo {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub status: StatusInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusInfo {
    pub short: String,
    #[serde(default)]
    pub long: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FixtureTeams {
    pub home: ApiTeam,
    pub away: ApiTeam,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiTeam {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Goals {
    pub home: Option<i32>,
    pub away: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureStatus {
    NotStarted,
    InProgress,
    Finished,
    Cancelled,
    Unknown,
}

impl FixtureStatus {
    /// Maps the provider's short status code onto a fixture status.
    pub fn from_short_code(code: &str) -> Self {
        match code {
            "NS" | "TBD" => Self::NotStarted,
            "1H" | "HT" | "2H" | "ET" | "BT" | "P" | "SUSP" | "INT" | "LIVE" => Self::InProgress,
            "FT" | "AET" | "PEN" => Self::Finished,
            "PST" | "CANC" | "ABD" | "AWD" | "WO" => Self::Cancelled,
            _ => Self::Unknown,
        }
    }
}

impl ApiFixture {
    pub fn status(&self) -> FixtureStatus {
        FixtureStatus::from_short_code(&self.fixture.status.short)
    }
}

//--------------------------------------      Task queue       ---------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpTarget {
    pub method: String,
    pub url: String,
    pub body: Value,
}

impl HttpTarget {
    pub fn post<S: Into<String>>(url: S, body: Value) -> Self {
        Self { method: "POST".to_string(), url: url.into(), body }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQueueTask {
    pub name: String,
    pub schedule_time: DateTime<Utc>,
    pub http_request: HttpTarget,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueTask {
    pub name: String,
    pub schedule_time: DateTime<Utc>,
}

//--------------------------------------       Webhooks        ---------------------------------------------------------

/// The body sent to subscribers when a match result is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultPayload {
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
}
