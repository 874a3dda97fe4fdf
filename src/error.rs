use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failures while reading the precomputed rating artifacts at startup.
///
/// Any of these is fatal: the service never starts serving with partial data.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("Missing column '{column}' in {path}")]
    MissingColumn { path: String, column: String },

    #[error("Invalid value '{value}' for {field} in {path} at line {line}")]
    InvalidValue {
        path: String,
        line: u64,
        field: String,
        value: String,
    },

    #[error("Prediction matrix {path} has no product columns")]
    NoProducts { path: String },
}

/// Per-request selector failures, returned as values to the presentation layer
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    #[error("User ID {0} not found.")]
    UserNotFound(String),

    #[error("An error occurred: {0}")]
    LookupFailure(String),
}

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Recommend(#[from] RecommendError),

    #[error("Invalid algorithm selected: {0}")]
    InvalidAlgorithm(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Message shown to the person filling in the form
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidAlgorithm(_) => "Invalid algorithm selected.".to_string(),
            other => other.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Recommend(RecommendError::UserNotFound(_)) => StatusCode::NOT_FOUND,
            AppError::InvalidAlgorithm(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Recommend(RecommendError::LookupFailure(_)) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "error": self.user_message()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
