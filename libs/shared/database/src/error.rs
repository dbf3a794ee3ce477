use shared_models::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend could not be reached, timed out or failed on its side.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Malformed record: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Malformed(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => AppError::StorageUnavailable(msg),
            other => AppError::Internal(other.to_string()),
        }
    }
}
