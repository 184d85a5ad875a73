use axum::http::StatusCode;
use thiserror::Error;

/// Failures raised by the timeline engine. Never defaulted internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimelineError {
    #[error("invalid date '{value}': {reason}")]
    InvalidDateFormat { value: String, reason: &'static str },

    #[error("invalid timezone '{0}'")]
    InvalidTimezone(String),
}

impl TimelineError {
    pub(crate) fn invalid_date(value: &str, reason: &'static str) -> Self {
        Self::InvalidDateFormat {
            value: value.to_string(),
            reason,
        }
    }
}

pub type Result<T, E = TimelineError> = std::result::Result<T, E>;

/// The data file exists but cannot be used. Start-up stops rather than
/// replacing the stored history with an empty document.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to read data file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse data file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }

    /// Stored records failed validation while computing derived values.
    pub fn corrupt_data(err: TimelineError) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl From<TimelineError> for AppError {
    fn from(err: TimelineError) -> Self {
        Self::corrupt_data(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
