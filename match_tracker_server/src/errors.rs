use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use match_tracker_engine::ResultTrackerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("Could not read request query: {0}")]
    InvalidRequestQuery(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error("The record already exists. {0}")]
    AlreadyExists(String),
    #[error("The request cannot be processed. {0}")]
    UnprocessableContent(String),
    #[error("An upstream service failed. {0}")]
    UpstreamError(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRequestQuery(_) => StatusCode::BAD_REQUEST,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::AlreadyExists(_) => StatusCode::CONFLICT,
            Self::UnprocessableContent(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::UpstreamError(_) => StatusCode::BAD_GATEWAY,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

impl From<ResultTrackerError> for ServerError {
    fn from(e: ResultTrackerError) -> Self {
        match e {
            ResultTrackerError::NotFound(_) => Self::NoRecordFound(e.to_string()),
            ResultTrackerError::AliasNotFound { .. } => Self::NoRecordFound(e.to_string()),
            ResultTrackerError::MissingExternalTeam { .. } => Self::UnprocessableContent(e.to_string()),
            ResultTrackerError::AlreadyExists(_) => Self::AlreadyExists(e.to_string()),
            ResultTrackerError::UnprocessableContent(s) => Self::UnprocessableContent(s),
            ResultTrackerError::Upstream(s) => Self::UpstreamError(s),
            ResultTrackerError::DataIntegrity(s) => Self::BackendError(format!("Data integrity error. {s}")),
            ResultTrackerError::Database(s) => Self::BackendError(format!("Database error: {s}")),
        }
    }
}
