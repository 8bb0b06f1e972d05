//! Server error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request body")]
    InvalidBody,

    #[error("Password not provided")]
    MissingPassword,

    #[error("Invalid SHA1 hash")]
    InvalidHash,

    #[error("HTTP client error: {0}")]
    Client(#[source] hibp_range::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::InvalidBody | ServerError::MissingPassword | ServerError::InvalidHash => {
                StatusCode::BAD_REQUEST
            }
            ServerError::Client(_) | ServerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
