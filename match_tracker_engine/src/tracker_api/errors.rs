use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::traits::{DatabaseError, NotifierError, ProviderError, SchedulerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamRole {
    Home,
    Away,
}

impl Display for TeamRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TeamRole::Home => write!(f, "home"),
            TeamRole::Away => write!(f, "away"),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum AliasError {
    #[error("No team is known as '{0}'")]
    NotFound(String),
    #[error("The team known as '{0}' is not linked to the fixture provider")]
    MissingExternalLink(String),
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl AliasError {
    /// Adds the team's role in the fixture to the error.
    pub fn with_role(self, role: TeamRole) -> ResultTrackerError {
        match self {
            AliasError::NotFound(alias) => ResultTrackerError::AliasNotFound { role, alias },
            AliasError::MissingExternalLink(alias) => ResultTrackerError::MissingExternalTeam { role, alias },
            AliasError::Database(e) => e.into(),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum ResultTrackerError {
    #[error("{0} does not exist")]
    NotFound(String),
    #[error("The {role} team alias '{alias}' does not exist")]
    AliasNotFound { role: TeamRole, alias: String },
    #[error("The {role} team '{alias}' is not linked to the fixture provider")]
    MissingExternalTeam { role: TeamRole, alias: String },
    #[error("{0} already exists")]
    AlreadyExists(String),
    #[error("Cannot process the request. {0}")]
    UnprocessableContent(String),
    #[error("Upstream service error. {0}")]
    Upstream(String),
    #[error("Data integrity error. {0}")]
    DataIntegrity(String),
    #[error("Database error: {0}")]
    Database(String),
}

impl From<DatabaseError> for ResultTrackerError {
    fn from(e: DatabaseError) -> Self {
        match e {
            DatabaseError::NotFound => ResultTrackerError::NotFound("The requested record".into()),
            DatabaseError::AlreadyExists(s) => ResultTrackerError::AlreadyExists(s),
            DatabaseError::Backend(s) => ResultTrackerError::Database(s),
        }
    }
}

impl From<ProviderError> for ResultTrackerError {
    fn from(e: ProviderError) -> Self {
        ResultTrackerError::Upstream(e.to_string())
    }
}

impl From<SchedulerError> for ResultTrackerError {
    fn from(e: SchedulerError) -> Self {
        match e {
            SchedulerError::AlreadyExists(name) => ResultTrackerError::AlreadyExists(format!("Task {name}")),
            SchedulerError::NotFound(name) => ResultTrackerError::NotFound(format!("Task {name}")),
            e => ResultTrackerError::Upstream(e.to_string()),
        }
    }
}

impl From<NotifierError> for ResultTrackerError {
    fn from(e: NotifierError) -> Self {
        ResultTrackerError::Upstream(e.to_string())
    }
}
