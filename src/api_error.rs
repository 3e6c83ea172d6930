#![allow(dead_code)]

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Internal server error")]
    InternalServerError,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid game: {0}")]
    InvalidGame(String),

    #[error("Invalid game mode: {0}")]
    InvalidMode(String),

    #[error("Tournament not found")]
    TournamentNotFound,

    #[error("Tournament is not active")]
    TournamentNotActive,

    #[error("Session not found")]
    SessionNotFound,

    #[error("Session belongs to another player")]
    SessionOwnershipMismatch,

    #[error("Session already completed")]
    SessionAlreadyCompleted,

    #[error("Session has expired")]
    SessionExpired,

    #[error("Checksum verification failed")]
    InvalidChecksum,

    #[error("Score validation failed")]
    ScoreValidationFailed,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn validation_error(msg: impl Into<String>) -> Self {
        ApiError::ValidationError(msg.into())
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: u16,
    details: Option<String>,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::InvalidGame(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidMode(_) => StatusCode::BAD_REQUEST,
            ApiError::TournamentNotFound => StatusCode::NOT_FOUND,
            ApiError::TournamentNotActive => StatusCode::CONFLICT,
            ApiError::SessionNotFound => StatusCode::NOT_FOUND,
            ApiError::SessionOwnershipMismatch => StatusCode::FORBIDDEN,
            ApiError::SessionAlreadyCompleted => StatusCode::CONFLICT,
            ApiError::SessionExpired => StatusCode::GONE,
            ApiError::InvalidChecksum => StatusCode::BAD_REQUEST,
            ApiError::ScoreValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = match self {
            ApiError::SerializationError(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        let error_response = ErrorResponse {
            error: message,
            code: status.as_u16(),
            details: Some(self.to_string()),
        };

        HttpResponse::build(status).json(error_response)
    }
}
