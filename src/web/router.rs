//! Router configuration for the web layer.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use super::error::PageError;
use super::handlers::{
    answer_create, answer_create_form, answer_delete, answer_modify, answer_modify_form,
    get_question, list_questions, login, login_form, logout, question_create,
    question_create_form, question_delete, question_detail, question_list, question_modify,
    question_modify_form, signup, signup_form, AppState,
};
use super::middleware::{jwt_auth, security_headers, JwtState};

/// Create the board router: HTML pages, the auth pages and the JSON API.
pub fn create_router(app_state: Arc<AppState>, jwt_state: Arc<JwtState>) -> Router {
    let question_routes = Router::new()
        .route("/create", get(question_create_form).post(question_create))
        .route("/modify/:id", get(question_modify_form).post(question_modify))
        .route("/delete/:id", post(question_delete));

    let answer_routes = Router::new()
        .route("/create/:id", get(answer_create_form).post(answer_create))
        .route("/modify/:id", get(answer_modify_form).post(answer_modify))
        .route("/delete/:id", post(answer_delete));

    let auth_routes = Router::new()
        .route("/login", get(login_form).post(login))
        .route("/logout", post(logout))
        .route("/signup", get(signup_form).post(signup));

    let api_routes = Router::new()
        .route("/questions", get(list_questions))
        .route("/questions/:id", get(get_question));

    Router::new()
        .route("/", get(question_list))
        .route("/detail/:id", get(question_detail))
        .nest("/question", question_routes)
        .nest("/answer", answer_routes)
        .nest("/auth", auth_routes)
        .nest("/api", api_routes)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(security_headers))
                .layer(middleware::from_fn(move |req, next| {
                    let state = jwt_state.clone();
                    jwt_auth(state, req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// The complete application: board routes, health check and compression.
pub fn create_app(app_state: Arc<AppState>, jwt_state: Arc<JwtState>) -> Router {
    create_router(app_state, jwt_state)
        .merge(create_health_router())
        .layer(CompressionLayer::new())
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

async fn not_found() -> PageError {
    PageError::not_found()
}
