use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum DatabaseError {
    #[error("The requested record does not exist")]
    NotFound,
    #[error("A record with the same unique key already exists. {0}")]
    AlreadyExists(String),
    #[error("Database error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => DatabaseError::NotFound,
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                DatabaseError::AlreadyExists(db_err.message().to_string())
            },
            e => DatabaseError::Backend(e.to_string()),
        }
    }
}
