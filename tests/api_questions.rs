//! JSON API tests.

mod common;

use axum::http::StatusCode;
use common::{answer, ask, create_test_server_with_page_size, signup};
use serde_json::Value;

#[tokio::test]
async fn test_list_questions() {
    let (server, _db) = create_test_server_with_page_size(2).await;
    let token = signup(&server, "tester").await;
    let first = ask(&server, &token, "first", "content").await;
    let second = ask(&server, &token, "second", "content").await;
    let third = ask(&server, &token, "third", "content").await;
    answer(&server, &token, third, "an answer").await;

    let response = server.get("/api/questions").await;
    response.assert_status_ok();
    let body: Value = response.json();

    assert_eq!(body["meta"]["page"], 1);
    assert_eq!(body["meta"]["per_page"], 2);
    assert_eq!(body["meta"]["total"], 3);

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["id"], third);
    assert_eq!(data[0]["answer_count"], 1);
    assert_eq!(data[0]["author"]["username"], "tester");
    assert_eq!(data[1]["id"], second);

    let response = server.get("/api/questions").add_query_param("page", "2").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["id"], first);
}

#[tokio::test]
async fn test_list_page_out_of_range() {
    let (server, _db) = create_test_server_with_page_size(10).await;

    // An empty board still has page 1.
    server.get("/api/questions").await.assert_status_ok();

    let response = server.get("/api/questions").add_query_param("page", "2").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    server
        .get("/api/questions")
        .add_query_param("page", "zero")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_malformed_query() {
    let (server, _db) = create_test_server_with_page_size(10).await;

    let response = server
        .get("/api/questions")
        .add_raw_query_param("page=1&page=1")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid query"));
}

#[tokio::test]
async fn test_get_question() {
    let (server, _db) = create_test_server_with_page_size(10).await;
    let token = signup(&server, "tester").await;
    let id = ask(&server, &token, "test", "content").await;
    answer(&server, &token, id, "older").await;
    answer(&server, &token, id, "newer").await;

    let response = server.get(&format!("/api/questions/{id}")).await;
    response.assert_status_ok();
    let data = &response.json::<Value>()["data"];

    assert_eq!(data["id"], id);
    assert_eq!(data["subject"], "test");
    assert_eq!(data["content"], "content");
    assert!(data["create_date"].as_str().unwrap().ends_with('Z'));
    assert!(data.get("modify_date").is_none());
    assert_eq!(data["answer_count"], 2);

    let answers = data["answers"].as_array().unwrap();
    assert_eq!(answers[0]["content"], "older");
    assert_eq!(answers[1]["content"], "newer");
}

#[tokio::test]
async fn test_get_question_not_found() {
    let (server, _db) = create_test_server_with_page_size(10).await;

    let response = server.get("/api/questions/999").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "question not found");

    server
        .get("/api/questions/abc")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
