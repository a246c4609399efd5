//! Middleware for the web layer.

pub mod auth;
pub mod security;

pub use auth::{
    jwt_auth, login_redirect_url, AuthRejection, AuthUser, JwtClaims, JwtState,
    OptionalAuthUser, LOGIN_PATH, SESSION_COOKIE,
};
pub use security::security_headers;
