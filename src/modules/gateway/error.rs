use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Record not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Gateway unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for GatewayError {
    /// Connectivity failures are `Unavailable`; everything else is a database error
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                GatewayError::Unavailable(e.to_string())
            }
            other => GatewayError::Database(other),
        }
    }
}
