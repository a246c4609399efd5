//! Shared application state and the login, logout and sign-up pages.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;
use std::sync::Arc;

use crate::auth::{authenticate, register, RegistrationRequest};
use crate::board::DEFAULT_PAGE_SIZE;
use crate::db::{User, UserRepository};
use crate::web::dto::{safe_next, CurrentUser, LoginForm, NextQuery, PageQueryString, SignupForm};
use crate::web::error::PageError;
use crate::web::middleware::{JwtClaims, OptionalAuthUser, SESSION_COOKIE};
use crate::web::templates::Templates;
use crate::{Database, QaboardError};

/// Shared database handle for the web layer.
pub type SharedDatabase = Arc<Database>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: SharedDatabase,
    /// Compiled page templates.
    pub templates: Templates,
    /// JWT encoding key.
    encoding_key: EncodingKey,
    /// Session lifetime in seconds.
    pub session_expiry: u64,
    /// Whether the session cookie is marked `Secure`.
    pub secure_cookies: bool,
    /// Questions per listing page.
    pub page_size: i64,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Fails if a built-in template does not compile.
    pub fn new(db: SharedDatabase, jwt_secret: &str, session_expiry: u64) -> crate::Result<Self> {
        Ok(Self {
            db,
            templates: Templates::new()?,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            session_expiry,
            secure_cookies: false,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Set the number of questions per listing page.
    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = page_size;
        self
    }

    /// Mark the session cookie `Secure`.
    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure_cookies = secure;
        self
    }

    /// Generate a session token for a user.
    pub fn generate_session_token(&self, user: &User) -> Result<String, PageError> {
        let now = chrono::Utc::now().timestamp() as u64;
        let claims = JwtClaims {
            sub: user.id,
            username: user.username.clone(),
            iat: now,
            exp: now + self.session_expiry,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode JWT: {}", e);
            PageError::internal()
        })
    }

    /// Cookie carrying a session token.
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookies)
            .build()
    }

    /// Render a page template.
    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<Html<String>, PageError> {
        Ok(Html(self.templates.render(name, context)?))
    }

    /// Log `user` in: set the session cookie and redirect to `next`.
    fn start_session(&self, jar: CookieJar, user: &User, next: &str) -> Result<Response, PageError> {
        let token = self.generate_session_token(user)?;
        Ok((jar.add(self.session_cookie(token)), Redirect::to(next)).into_response())
    }
}

#[derive(Serialize)]
struct LoginPage<'a> {
    title: &'static str,
    current_user: Option<CurrentUser>,
    error: Option<&'a str>,
    next: &'a str,
    username: &'a str,
}

#[derive(Serialize)]
struct SignupPage<'a> {
    title: &'static str,
    current_user: Option<CurrentUser>,
    error: Option<String>,
    form: &'a SignupForm,
}

/// GET /auth/login - Login form.
pub async fn login_form(
    State(state): State<Arc<AppState>>,
    OptionalAuthUser(user): OptionalAuthUser,
    PageQueryString(query): PageQueryString<NextQuery>,
) -> Result<Response, PageError> {
    let next = safe_next(query.next.as_deref());
    if user.is_some() {
        return Ok(Redirect::to(&next).into_response());
    }

    let page = LoginPage {
        title: "Log in",
        current_user: None,
        error: None,
        next: &next,
        username: "",
    };
    Ok(state.render("login", &page)?.into_response())
}

/// POST /auth/login - Check credentials and start a session.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, PageError> {
    let next = safe_next(form.next.as_deref());
    let repo = UserRepository::new(state.db.pool());

    match authenticate(&repo, &form.username, &form.password).await {
        Ok(user) => state.start_session(jar, &user, &next),
        Err(QaboardError::Auth(message)) => {
            let page = LoginPage {
                title: "Log in",
                current_user: None,
                error: Some(message.as_str()),
                next: &next,
                username: form.username.trim(),
            };
            Ok((StatusCode::UNAUTHORIZED, state.render("login", &page)?).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /auth/logout - End the session.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::to("/"))
}

/// GET /auth/signup - Sign-up form.
pub async fn signup_form(
    State(state): State<Arc<AppState>>,
    OptionalAuthUser(user): OptionalAuthUser,
) -> Result<Response, PageError> {
    if user.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    let form = SignupForm::default();
    let page = SignupPage {
        title: "Sign up",
        current_user: None,
        error: None,
        form: &form,
    };
    Ok(state.render("signup", &page)?.into_response())
}

/// POST /auth/signup - Create an account and log it in.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<SignupForm>,
) -> Result<Response, PageError> {
    let request = RegistrationRequest::new(form.username.trim(), form.password1.as_str())
        .with_confirmation(form.password2.as_str())
        .with_email(form.email.as_str());
    let repo = UserRepository::new(state.db.pool());

    match register(&repo, request).await {
        Ok(user) => state.start_session(jar, &user, "/"),
        Err(e) if e.is_user_error() => {
            let page = SignupPage {
                title: "Sign up",
                current_user: None,
                error: Some(e.to_string()),
                form: &form,
            };
            Ok((StatusCode::UNPROCESSABLE_ENTITY, state.render("signup", &page)?).into_response())
        }
        Err(e) => {
            tracing::error!("Registration failed: {}", e);
            Err(PageError::internal())
        }
    }
}
