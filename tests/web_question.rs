//! Question page tests.

mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use common::{
    ask, bearer, create_test_server, create_test_server_with_page_size, get_user, location,
    signup,
};
use qaboard::{QuestionForm, QuestionService};
use serde_json::Value;

async fn question_total(server: &axum_test::TestServer) -> i64 {
    let response = server.get("/api/questions").await;
    response.assert_status_ok();
    response.json::<Value>()["meta"]["total"].as_i64().unwrap()
}

#[tokio::test]
async fn test_empty_list() {
    let (server, _db) = create_test_server().await;

    let response = server.get("/").await;
    response.assert_status_ok();
    assert!(response.text().contains("No questions yet."));
}

#[tokio::test]
async fn test_create_requires_login() {
    let (server, _db) = create_test_server().await;

    let response = server.get("/question/create").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth/login?next=%2Fquestion%2Fcreate");

    let response = server
        .post("/question/create")
        .form(&[("subject", "test"), ("content", "content")])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/auth/login?next="));

    assert_eq!(question_total(&server).await, 0);
}

#[tokio::test]
async fn test_create_question() {
    let (server, _db) = create_test_server().await;
    let token = signup(&server, "tester").await;

    let id = ask(&server, &token, "test", "content").await;

    let response = server.get(&format!("/detail/{id}")).await;
    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("<h1>test</h1>"));
    assert!(body.contains("content"));
    assert!(body.contains("tester"));

    let list = server.get("/").await.text();
    assert!(list.contains(&format!("/detail/{id}")));
}

#[tokio::test]
async fn test_create_invalid_rerenders_form() {
    let (server, _db) = create_test_server().await;
    let token = signup(&server, "tester").await;

    let response = server
        .post("/question/create")
        .add_header(AUTHORIZATION, bearer(&token))
        .form(&[("subject", "   "), ("content", "my draft text")])
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.text();
    assert!(body.contains("Subject is required."));
    assert!(body.contains("my draft text"));

    assert_eq!(question_total(&server).await, 0);
}

#[tokio::test]
async fn test_detail_escapes_user_text() {
    let (server, _db) = create_test_server().await;
    let token = signup(&server, "tester").await;

    let id = ask(&server, &token, "<script>alert(1)</script>", "<b>bold</b>").await;

    let body = server.get(&format!("/detail/{id}")).await.text();
    assert!(!body.contains("<script>alert(1)</script>"));
    assert!(!body.contains("<b>bold</b>"));
    assert!(body.contains("&lt;b&gt;bold&lt;/b&gt;"));
}

#[tokio::test]
async fn test_detail_not_found() {
    let (server, _db) = create_test_server().await;

    server
        .get("/detail/999")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .get("/detail/abc")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_pagination() {
    let (server, db) = create_test_server_with_page_size(10).await;
    signup(&server, "tester").await;
    let author = get_user(&db, "tester").await;

    let service = QuestionService::new(&db);
    for i in 1..=15 {
        service
            .create(&author, &QuestionForm::new(format!("question {i}"), "content"))
            .await
            .unwrap();
    }

    let page1 = server.get("/").await;
    page1.assert_status_ok();
    let body = page1.text();
    assert!(body.contains("question 15"));
    assert!(body.contains("question 6<"));
    assert!(!body.contains("question 5<"));
    assert!(body.contains("/?page=2"));

    let page2 = server.get("/").add_query_param("page", "2").await;
    page2.assert_status_ok();
    let body = page2.text();
    assert!(body.contains("question 5<"));
    assert!(body.contains("question 1<"));
    assert!(!body.contains("question 6<"));

    server
        .get("/")
        .add_query_param("page", "3")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .get("/")
        .add_query_param("page", "abc")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_malformed_query() {
    let (server, _db) = create_test_server().await;

    let response = server.get("/").add_raw_query_param("page=1&page=2").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.text();
    assert!(body.contains("400 Bad Request"));
    assert!(!body.contains("duplicate field"));
}

#[tokio::test]
async fn test_modify_by_author() {
    let (server, _db) = create_test_server().await;
    let token = signup(&server, "tester").await;
    let id = ask(&server, &token, "before", "old content").await;

    let form = server
        .get(&format!("/question/modify/{id}"))
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    form.assert_status_ok();
    assert!(form.text().contains("old content"));

    let response = server
        .post(&format!("/question/modify/{id}"))
        .add_header(AUTHORIZATION, bearer(&token))
        .form(&[("subject", "after"), ("content", "new content")])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/detail/{id}"));

    let question = common::question_json(&server, id).await;
    assert_eq!(question["subject"], "after");
    assert_eq!(question["content"], "new content");
    assert!(question["modify_date"].is_string());
}

#[tokio::test]
async fn test_modify_invalid_rerenders_form() {
    let (server, _db) = create_test_server().await;
    let token = signup(&server, "tester").await;
    let id = ask(&server, &token, "before", "old content").await;

    let response = server
        .post(&format!("/question/modify/{id}"))
        .add_header(AUTHORIZATION, bearer(&token))
        .form(&[("subject", "after"), ("content", "")])
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.text();
    assert!(body.contains("Content is required."));
    assert!(body.contains("after"));

    let question = common::question_json(&server, id).await;
    assert_eq!(question["subject"], "before");
}

#[tokio::test]
async fn test_modify_by_other_user_is_forbidden() {
    let (server, _db) = create_test_server().await;
    let owner = signup(&server, "tester").await;
    let other = signup(&server, "intruder").await;
    let id = ask(&server, &owner, "mine", "content").await;

    server
        .get(&format!("/question/modify/{id}"))
        .add_header(AUTHORIZATION, bearer(&other))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    server
        .post(&format!("/question/modify/{id}"))
        .add_header(AUTHORIZATION, bearer(&other))
        .form(&[("subject", "hijacked"), ("content", "content")])
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let question = common::question_json(&server, id).await;
    assert_eq!(question["subject"], "mine");
}

#[tokio::test]
async fn test_modify_missing_question() {
    let (server, _db) = create_test_server().await;

    // Authentication is checked before the question is looked up.
    let response = server.get("/question/modify/999").await;
    response.assert_status(StatusCode::SEE_OTHER);

    let token = signup(&server, "tester").await;
    server
        .get("/question/modify/999")
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_question() {
    let (server, _db) = create_test_server().await;
    let owner = signup(&server, "tester").await;
    let other = signup(&server, "intruder").await;
    let id = ask(&server, &owner, "doomed", "content").await;

    server
        .post(&format!("/question/delete/{id}"))
        .add_header(AUTHORIZATION, bearer(&other))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let response = server
        .post(&format!("/question/delete/{id}"))
        .add_header(AUTHORIZATION, bearer(&owner))
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    server
        .get(&format!("/detail/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    assert_eq!(question_total(&server).await, 0);
}

#[tokio::test]
async fn test_delete_requires_login() {
    let (server, _db) = create_test_server().await;
    let token = signup(&server, "tester").await;
    let id = ask(&server, &token, "kept", "content").await;

    let response = server.post(&format!("/question/delete/{id}")).await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        format!("/auth/login?next=%2Fquestion%2Fdelete%2F{id}")
    );
    assert_eq!(question_total(&server).await, 1);
}

#[tokio::test]
async fn test_edit_links_only_for_author() {
    let (server, _db) = create_test_server().await;
    let owner = signup(&server, "tester").await;
    let other = signup(&server, "intruder").await;
    let id = ask(&server, &owner, "subject", "content").await;
    let edit_link = format!("/question/modify/{id}");

    let body = server
        .get(&format!("/detail/{id}"))
        .add_header(AUTHORIZATION, bearer(&owner))
        .await
        .text();
    assert!(body.contains(&edit_link));

    let body = server
        .get(&format!("/detail/{id}"))
        .add_header(AUTHORIZATION, bearer(&other))
        .await
        .text();
    assert!(!body.contains(&edit_link));

    let body = server.get(&format!("/detail/{id}")).await.text();
    assert!(!body.contains(&edit_link));
}
