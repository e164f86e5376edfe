use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureToolsError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Could not complete the request: {0}")]
    RequestError(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Query failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
    #[error("The provider reported errors: {0}")]
    ProviderErrors(String),
    #[error("Task {0} already exists")]
    TaskAlreadyExists(String),
    #[error("Task {0} does not exist")]
    TaskNotFound(String),
}
