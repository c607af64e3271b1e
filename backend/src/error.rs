use shared::{ErrorCode, PublicError, ValidationError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Schema bootstrap failed: {0}")]
    Schema(String),
    #[error("Invalid identity {0:?}: {1}")]
    InvalidIdentity(String, ValidationError),
    #[error("Admin not found: {0}")]
    UnknownAdmin(String),
    #[error("Corrupt record for {0}: {1}")]
    CorruptRecord(String, String),
    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for DirectoryError {
    fn from(e: sqlx::Error) -> Self {
        DirectoryError::Database(e.to_string())
    }
}

impl DirectoryError {
    pub fn code(&self) -> ErrorCode {
        match self {
            DirectoryError::InvalidIdentity(..) => ErrorCode::InvalidInput,
            DirectoryError::UnknownAdmin(_) => ErrorCode::NotFound,
            DirectoryError::Database(_) => ErrorCode::StorageFailure,
            DirectoryError::Schema(_) | DirectoryError::CorruptRecord(..) => ErrorCode::SystemError,
        }
    }

    /// Storage failures keep the raw driver text out of `message`.
    pub fn to_public(&self) -> PublicError {
        match self {
            DirectoryError::Database(cause) | DirectoryError::Schema(cause) => {
                PublicError::new(self.code(), self.code().to_string()).caused_by(cause.as_str())
            }
            _ => PublicError::new(self.code(), self.to_string()),
        }
    }
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;
