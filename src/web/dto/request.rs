//! Request DTOs and extractors for the web layer.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::web::error::{ApiError, PageError};

/// Login form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    /// Where to go after logging in.
    pub next: Option<String>,
}

/// Sign-up form.
///
/// Serialized back into the page on failure; the password fields are
/// never echoed.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SignupForm {
    pub username: String,
    #[serde(skip_serializing)]
    pub password1: String,
    #[serde(skip_serializing)]
    pub password2: String,
    pub email: String,
}

/// `?page=` query on list pages.
///
/// Kept as a string so a non-numeric value can be answered with 404 rather
/// than a query rejection.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// `?next=` query on the login page.
#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

/// Numeric record ID taken from the last path segment.
///
/// A segment that is not an integer is answered with the 404 page.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = PageError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| PageError::not_found())?;
        raw.parse().map(IdPath).map_err(|_| PageError::not_found())
    }
}

/// Query string extractor for the JSON API.
///
/// A query that does not deserialize is answered with the JSON error
/// envelope instead of a plain-text rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid query: {}", e.body_text())))?;
        Ok(ApiQuery(value))
    }
}

/// Query string extractor for HTML pages.
///
/// A query that does not deserialize is answered with the 400 page.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageQueryString<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for PageQueryString<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = PageError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::debug!("Rejected query string: {}", e);
                PageError::bad_request()
            })?;
        Ok(PageQueryString(value))
    }
}

/// Return `next` if it is a path on this site, otherwise `/`.
///
/// Rejects absolute URLs, protocol-relative `//host` forms and backslash
/// tricks so a login link cannot bounce the user to another origin.
pub fn safe_next(next: Option<&str>) -> String {
    match next.map(str::trim) {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control) =>
        {
            path.to_string()
        }
        _ => "/".to_string(),
    }
}
