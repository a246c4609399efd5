//! Error responses for the QABOARD web layer.
//!
//! [`ApiError`] is the JSON envelope used under `/api`. [`PageError`] is the
//! HTML page shown by the browser-facing handlers. Both convert from
//! [`QaboardError`](crate::QaboardError) so handlers can use `?`.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::QaboardError;

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Bad request (400).
    BadRequest,
    /// Unauthorized (401).
    Unauthorized,
    /// Forbidden (403).
    Forbidden,
    /// Not found (404).
    NotFound,
    /// Validation error (422).
    ValidationError,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Error detail.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: ErrorCode,
    pub message: String,
}

/// JSON API error.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// The error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<QaboardError> for ApiError {
    fn from(err: QaboardError) -> Self {
        match err {
            QaboardError::Auth(msg) => ApiError::unauthorized(msg),
            QaboardError::NotFound(_) => ApiError::not_found(err.to_string()),
            QaboardError::Validation(msg) => ApiError::validation(msg),
            QaboardError::Conflict(_) => ApiError::validation(err.to_string()),
            QaboardError::Permission(msg) => ApiError::forbidden(msg),
            _ => {
                tracing::error!("Internal error: {}", err);
                ApiError::internal("An internal error occurred")
            }
        }
    }
}

/// HTML error page.
///
/// Messages are fixed per status so nothing about the failure leaks to the
/// browser. Internal errors are logged when converted.
#[derive(Debug)]
pub struct PageError {
    status: StatusCode,
}

impl PageError {
    pub fn new(status: StatusCode) -> Self {
        Self { status }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND)
    }

    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN)
    }

    pub fn bad_request() -> Self {
        Self::new(StatusCode::BAD_REQUEST)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// The HTTP status of the page.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    fn message(&self) -> &'static str {
        match self.status {
            StatusCode::NOT_FOUND => "The page you requested does not exist.",
            StatusCode::FORBIDDEN => "You do not have permission to do that.",
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                "The request could not be processed."
            }
            _ => "Something went wrong. Please try again later.",
        }
    }

    /// Render the page body.
    pub fn to_html(&self) -> String {
        let title = self.status.canonical_reason().unwrap_or("Error");
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{code} {title}</title>\n</head>\n<body>\n<main class=\"error\">\n\
             <h1>{code} {title}</h1>\n<p>{message}</p>\n<p><a href=\"/\">Back to questions</a></p>\n\
             </main>\n</body>\n</html>\n",
            code = self.status.as_u16(),
            title = handlebars::html_escape(title),
            message = handlebars::html_escape(self.message()),
        )
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        (self.status, Html(self.to_html())).into_response()
    }
}

impl std::fmt::Display for PageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.status)
    }
}

impl std::error::Error for PageError {}

impl From<QaboardError> for PageError {
    fn from(err: QaboardError) -> Self {
        match err {
            QaboardError::NotFound(_) => PageError::not_found(),
            QaboardError::Permission(_) => PageError::forbidden(),
            QaboardError::Validation(_) | QaboardError::Conflict(_) => {
                PageError::new(StatusCode::UNPROCESSABLE_ENTITY)
            }
            QaboardError::Auth(_) => PageError::new(StatusCode::UNAUTHORIZED),
            _ => {
                tracing::error!("Internal error: {}", err);
                PageError::internal()
            }
        }
    }
}
