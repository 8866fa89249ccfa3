//! Unified error types for the account service.
//! Used by: token, store, auth, handlers.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token expired")]
    TokenExpired,

    #[error("not authorized to access this resource")]
    Forbidden,

    #[error("user {0} not found")]
    UserNotFound(i64),

    #[error("email already registered: {0}")]
    EmailTaken(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("token creation failed: {0}")]
    TokenCreation(String),

    #[error("password hashing failed: {0}")]
    Password(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::MissingToken | Error::InvalidToken(_) | Error::TokenExpired => {
                StatusCode::UNAUTHORIZED
            }
            Error::Forbidden => StatusCode::FORBIDDEN,
            Error::UserNotFound(_) => StatusCode::NOT_FOUND,
            Error::EmailTaken(_) => StatusCode::CONFLICT,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::TokenCreation(_)
            | Error::Password(_)
            | Error::Database(_)
            | Error::Config(_)
            | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::UNAUTHORIZED {
            return (status, [(header::WWW_AUTHENTICATE, "Bearer")], self.to_string())
                .into_response();
        }
        (status, self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
