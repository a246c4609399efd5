//! Test helpers for the HTTP integration tests.
//!
//! Builds the full router over an in-memory database and drives sign-up,
//! posting and answering through the HTML forms.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::header::{AUTHORIZATION, LOCATION};
use axum::http::StatusCode;
use axum_test::{TestResponse, TestServer};
use serde_json::Value;

use qaboard::db::UserRepository;
use qaboard::web::handlers::AppState;
use qaboard::web::middleware::{JwtState, SESSION_COOKIE};
use qaboard::web::router::create_app;
use qaboard::{Database, User};

/// Secret used to sign test session tokens.
pub const TEST_SECRET: &str = "test-secret-key-for-testing-only";

/// Password used for every test account.
pub const PASSWORD: &str = "password123";

/// Create a test server with an in-memory database.
pub async fn create_test_server() -> (TestServer, Arc<Database>) {
    create_test_server_with_page_size(qaboard::board::DEFAULT_PAGE_SIZE).await
}

/// Create a test server listing `page_size` questions per page.
pub async fn create_test_server_with_page_size(page_size: i64) -> (TestServer, Arc<Database>) {
    let db = Arc::new(
        Database::open_in_memory()
            .await
            .expect("Failed to create test database"),
    );

    let app_state = AppState::new(db.clone(), TEST_SECRET, 3600)
        .expect("Failed to create app state")
        .with_page_size(page_size);
    let jwt_state = Arc::new(JwtState::new(TEST_SECRET));

    let router = create_app(Arc::new(app_state), jwt_state);
    let server = TestServer::new(router).expect("Failed to create test server");

    (server, db)
}

/// Sign up through the form and return the session token.
pub async fn signup(server: &TestServer, username: &str) -> String {
    let response = server
        .post("/auth/signup")
        .form(&[
            ("username", username),
            ("password1", PASSWORD),
            ("password2", PASSWORD),
            ("email", ""),
        ])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    response.cookie(SESSION_COOKIE).value().to_string()
}

/// `Authorization` header value for a session token.
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// The `Location` header of a redirect.
pub fn location(response: &TestResponse) -> String {
    response
        .header(LOCATION)
        .to_str()
        .expect("Location is not ASCII")
        .to_string()
}

/// Load a user row by name.
pub async fn get_user(db: &Database, username: &str) -> User {
    UserRepository::new(db.pool())
        .get_by_username(username)
        .await
        .unwrap()
        .expect("user exists")
}

/// Ask a question through the form and return its ID.
pub async fn ask(server: &TestServer, token: &str, subject: &str, content: &str) -> i64 {
    let response = server
        .post("/question/create")
        .add_header(AUTHORIZATION, bearer(token))
        .form(&[("subject", subject), ("content", content)])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    location(&response)
        .strip_prefix("/detail/")
        .and_then(|id| id.parse().ok())
        .expect("redirect to the question detail page")
}

/// Answer a question through the form and return the answer's ID.
pub async fn answer(server: &TestServer, token: &str, question_id: i64, content: &str) -> i64 {
    let response = server
        .post(&format!("/answer/create/{question_id}"))
        .add_header(AUTHORIZATION, bearer(token))
        .form(&[("content", content)])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/detail/{question_id}"));

    let detail = question_json(server, question_id).await;
    detail["answers"]
        .as_array()
        .and_then(|answers| answers.last())
        .and_then(|a| a["id"].as_i64())
        .expect("answer listed on the question")
}

/// Fetch a question through the JSON API.
pub async fn question_json(server: &TestServer, question_id: i64) -> Value {
    let response = server.get(&format!("/api/questions/{question_id}")).await;
    response.assert_status_ok();
    response.json::<Value>()["data"].clone()
}
