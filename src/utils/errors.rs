use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Unified error type for the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Method parameter is missing from body")]
    MissingMethod,

    #[error("Forbidden to run command {0}")]
    ForbiddenMethod(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("{0}")]
    Unexpected(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Daemon error {code}: {message}")]
    Daemon { code: i64, message: String },

    #[error("Invalid hex: {0}")]
    InvalidHex(String),
}

impl GatewayError {
    /// HTTP status this error is reported with on the gateway surface.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::MissingMethod => StatusCode::BAD_REQUEST,
            GatewayError::ForbiddenMethod(_) => StatusCode::FORBIDDEN,
            GatewayError::Transport(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            // the caller gets no detail beyond the status
            GatewayError::Transport(_) => status.into_response(),
            other => (status, other.to_string()).into_response(),
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        GatewayError::Unexpected(e.to_string())
    }
}

impl From<hex::FromHexError> for GatewayError {
    fn from(e: hex::FromHexError) -> Self {
        GatewayError::InvalidHex(e.to_string())
    }
}

/// Convenience alias
pub type Result<T> = std::result::Result<T, GatewayError>;
