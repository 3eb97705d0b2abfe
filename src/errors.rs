use axum::http::StatusCode;
use thiserror::Error;
use tracing::error;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        error!("storage operation failed: {err}");
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode documents: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("database driver error: {0}")]
    Driver(String),

    #[error("stored timestamp {0}ms is out of range")]
    InvalidTimestamp(i64),

    #[error("unsupported connection string `{0}`")]
    UnsupportedUri(String),
}
