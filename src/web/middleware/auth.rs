//! Session authentication for the web layer.
//!
//! A logged-in browser carries a signed JWT in the [`SESSION_COOKIE`]
//! cookie. API clients may send the same token as a `Bearer` header.
//! [`jwt_auth`] puts the [`JwtState`] into the request extensions and the
//! [`AuthUser`] / [`OptionalAuthUser`] extractors resolve the token to a
//! [`User`] row.

use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, OriginalUri},
    http::{header::AUTHORIZATION, request::Parts, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::db::{User, UserRepository};
use crate::web::error::PageError;
use crate::web::handlers::AppState;
use crate::Result;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "qaboard_session";

/// Path of the login page.
pub const LOGIN_PATH: &str = "/auth/login";

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID).
    pub sub: i64,
    /// Username.
    pub username: String,
    /// Issued at timestamp.
    pub iat: u64,
    /// Expiration timestamp.
    pub exp: u64,
    /// JWT ID (unique identifier).
    pub jti: String,
}

/// Application state for JWT authentication.
#[derive(Clone)]
pub struct JwtState {
    /// Decoding key for JWT verification.
    pub decoding_key: DecodingKey,
    /// Validation settings.
    pub validation: Validation,
}

impl JwtState {
    /// Create a new JWT state from a secret key.
    pub fn new(secret: &str) -> Self {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());
        let mut validation = Validation::default();
        validation.validate_exp = true;

        Self {
            decoding_key,
            validation,
        }
    }

    /// Decode and verify a token. Invalid or expired tokens yield `None`.
    pub fn verify(&self, token: &str) -> Option<JwtClaims> {
        match decode::<JwtClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                tracing::debug!("JWT validation failed: {}", e);
                None
            }
        }
    }
}

/// Find the session token: `Authorization: Bearer` first, then the cookie.
fn session_token(parts: &Parts) -> Option<String> {
    let bearer = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string());
    if bearer.is_some() {
        return bearer;
    }

    CookieJar::from_headers(&parts.headers)
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// Resolve the request's session to a user row.
///
/// A missing, invalid or expired token is `Ok(None)`, as is a token for a
/// user that no longer exists.
async fn current_user(parts: &Parts, state: &AppState) -> Result<Option<User>> {
    let Some(token) = session_token(parts) else {
        return Ok(None);
    };
    let Some(jwt_state) = parts.extensions.get::<Arc<JwtState>>() else {
        tracing::warn!("JWT state not configured; treating request as anonymous");
        return Ok(None);
    };
    let Some(claims) = jwt_state.verify(&token) else {
        return Ok(None);
    };

    UserRepository::new(state.db.pool())
        .get_by_id(claims.sub)
        .await
}

/// Login URL that returns to the current request's path afterwards.
pub fn login_redirect_url(parts: &Parts) -> String {
    let uri = parts
        .extensions
        .get::<OriginalUri>()
        .map(|original| &original.0)
        .unwrap_or(&parts.uri);
    let next = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    format!("{LOGIN_PATH}?next={}", urlencoding::encode(next))
}

/// Rejection for [`AuthUser`].
#[derive(Debug)]
pub enum AuthRejection {
    /// Not logged in; send the browser to this login URL.
    LoginRequired(String),
    /// Looking up the session failed.
    Error(PageError),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::LoginRequired(url) => Redirect::to(&url).into_response(),
            AuthRejection::Error(err) => err.into_response(),
        }
    }
}

/// Extractor for a logged-in user.
///
/// Anonymous requests are redirected (303) to the login page.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> std::result::Result<Self, Self::Rejection> {
        match current_user(parts, state).await {
            Ok(Some(user)) => Ok(AuthUser(user)),
            Ok(None) => Err(AuthRejection::LoginRequired(login_redirect_url(parts))),
            Err(e) => Err(AuthRejection::Error(e.into())),
        }
    }
}

/// Optional authentication extractor.
///
/// Similar to AuthUser but lets anonymous requests through.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<User>);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for OptionalAuthUser {
    type Rejection = PageError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> std::result::Result<Self, Self::Rejection> {
        Ok(OptionalAuthUser(current_user(parts, state).await?))
    }
}

/// Middleware function to inject JWT state into request extensions.
pub async fn jwt_auth(
    jwt_state: Arc<JwtState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(jwt_state);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::COOKIE, Request as HttpRequest};
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn claims(exp_offset: i64) -> JwtClaims {
        let now = chrono::Utc::now().timestamp();
        JwtClaims {
            sub: 1,
            username: "tester".to_string(),
            iat: now as u64,
            exp: (now + exp_offset) as u64,
            jti: uuid::Uuid::new_v4().to_string(),
        }
    }

    fn create_test_token(secret: &str, claims: &JwtClaims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn parts_for(request: HttpRequest<()>) -> Parts {
        request.into_parts().0
    }

    #[test]
    fn test_verify_token() {
        let state = JwtState::new("test-secret");
        let token = create_test_token("test-secret", &claims(3600));

        let decoded = state.verify(&token).unwrap();
        assert_eq!(decoded.sub, 1);
        assert_eq!(decoded.username, "tester");
    }

    #[test]
    fn test_expired_token() {
        let state = JwtState::new("test-secret");
        let token = create_test_token("test-secret", &claims(-3600));

        assert!(state.verify(&token).is_none());
    }

    #[test]
    fn test_invalid_secret() {
        let token = create_test_token("secret1", &claims(3600));
        let state = JwtState::new("secret2");

        assert!(state.verify(&token).is_none());
    }

    #[test]
    fn test_session_token_from_cookie() {
        let parts = parts_for(
            HttpRequest::builder()
                .header(COOKIE, format!("theme=dark; {SESSION_COOKIE}=abc.def.ghi"))
                .body(())
                .unwrap(),
        );
        assert_eq!(session_token(&parts).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_session_token_prefers_bearer() {
        let parts = parts_for(
            HttpRequest::builder()
                .header(AUTHORIZATION, "Bearer header-token")
                .header(COOKIE, format!("{SESSION_COOKIE}=cookie-token"))
                .body(())
                .unwrap(),
        );
        assert_eq!(session_token(&parts).as_deref(), Some("header-token"));
    }

    #[test]
    fn test_session_token_missing() {
        let parts = parts_for(HttpRequest::builder().body(()).unwrap());
        assert!(session_token(&parts).is_none());
    }

    #[test]
    fn test_login_redirect_url_uses_original_uri() {
        let mut parts = parts_for(
            HttpRequest::builder()
                .uri("/create")
                .body(())
                .unwrap(),
        );
        parts
            .extensions
            .insert(OriginalUri("/question/create?x=1".parse().unwrap()));

        assert_eq!(
            login_redirect_url(&parts),
            "/auth/login?next=%2Fquestion%2Fcreate%3Fx%3D1"
        );
    }
}
