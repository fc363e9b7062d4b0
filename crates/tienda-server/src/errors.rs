//! HTTP error mapping.
//!
//! Core errors cross this boundary exactly once: `ApiError` picks the
//! status code and renders the `{"success": false, "error": …}` body the
//! client surfaces verbatim. Wrong verbs go through `MethodNotAllowed`
//! so the 405 path renders the same body as every other failure.

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use serde::Serialize;

use tienda_core::errors::{OrderError, StorageError};
use tienda_core::TiendaErrorCode;

/// Application-level errors surfaced by handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Order(#[from] OrderError),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("resource not found")]
    NotFound,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("admin privileges required")]
    Forbidden,

    #[error("{0}")]
    Validation(String),

    #[error("internal server error")]
    Internal,
}

/// Result type alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// The error body every failure path renders.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub code: &'static str,
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            Self::Order(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::NotFound => "NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::Forbidden => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal => "INTERNAL_ERROR",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Order(e) => {
                StatusCode::from_u16(e.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::Storage(StorageError::NotFound) | Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Storage(_) | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            success: false,
            error: self.to_string(),
            code: self.code(),
        })
    }
}

impl From<actix_web::error::BlockingError> for ApiError {
    fn from(_: actix_web::error::BlockingError) -> Self {
        Self::Internal
    }
}

/// JSON extractor config keeping malformed-body rejections in the same
/// response shape as every other failure path.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let body = ErrorBody {
            success: false,
            error: err.to_string(),
            code: "BAD_REQUEST",
        };
        actix_web::error::InternalError::from_response(err, HttpResponse::BadRequest().json(body))
            .into()
    })
}
