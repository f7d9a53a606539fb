use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use jwks_providers::token::error::TokenError;
use thiserror::Error;

use crate::model::ErrorResponseDTO;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not found")]
    NotFound,
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("unsupported content type, expected application/json")]
    UnsupportedMediaType,
    #[error("{0}")]
    InvalidBody(String),
    #[error("failed to build key set")]
    KeySet(#[source] TokenError),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::InvalidBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Token(
                TokenError::ClaimEncoding(_)
                | TokenError::HeaderEncoding(_)
                | TokenError::KeyAlgorithm(_),
            ) => StatusCode::BAD_REQUEST,
            Self::KeySet(_) | Self::Token(_) | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        match value {
            JsonRejection::MissingJsonContentType(_) => Self::UnsupportedMediaType,
            other => Self::InvalidBody(other.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            match std::error::Error::source(&self) {
                Some(source) => log::error!("{self}: {source}"),
                None => log::error!("{self}"),
            }
        } else {
            log::warn!("{self}");
        }

        let body = ErrorResponseDTO {
            error: self.to_string(),
            status_code: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}
