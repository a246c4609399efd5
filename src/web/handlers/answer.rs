//! Answer actions. Every route requires a logged-in user; modify and
//! delete are limited to the answer's author.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Serialize;
use std::sync::Arc;

use crate::auth::ensure_author;
use crate::board::{AnswerForm, AnswerService};
use crate::db::User;
use crate::web::dto::{CurrentUser, IdPath};
use crate::web::error::PageError;
use crate::web::middleware::AuthUser;
use crate::QaboardError;

use super::question::render_detail;
use super::AppState;

#[derive(Serialize)]
struct EditPage<'a> {
    title: &'static str,
    current_user: CurrentUser,
    action: String,
    question_id: i64,
    form: &'a AnswerForm,
    error: Option<&'a str>,
}

fn render_edit(
    state: &AppState,
    user: &User,
    answer_id: i64,
    question_id: i64,
    form: &AnswerForm,
    error: Option<&str>,
) -> Result<Html<String>, PageError> {
    let page = EditPage {
        title: "Edit answer",
        current_user: user.into(),
        action: format!("/answer/modify/{answer_id}"),
        question_id,
        form,
        error,
    };
    state.render("answer_form", &page)
}

fn detail_url(question_id: i64) -> String {
    format!("/detail/{question_id}")
}

/// GET /answer/create/:question_id - The question's detail page.
pub async fn answer_create_form(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    IdPath(question_id): IdPath,
) -> Result<Html<String>, PageError> {
    render_detail(&state, Some(&user), question_id, &AnswerForm::default(), None).await
}

/// POST /answer/create/:question_id - Answer a question.
pub async fn answer_create(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    IdPath(question_id): IdPath,
    Form(form): Form<AnswerForm>,
) -> Result<Response, PageError> {
    match AnswerService::new(&state.db)
        .create(&user, question_id, &form)
        .await
    {
        Ok(answer) => Ok(Redirect::to(&detail_url(answer.question_id)).into_response()),
        Err(QaboardError::Validation(message)) => {
            let html = render_detail(
                &state,
                Some(&user),
                question_id,
                &form,
                Some(message.as_str()),
            )
            .await?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, html).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /answer/modify/:id - Answer form filled with the current text.
pub async fn answer_modify_form(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    IdPath(id): IdPath,
) -> Result<Html<String>, PageError> {
    let answer = AnswerService::new(&state.db).get_by_id(id).await?;
    ensure_author(&user, answer.author_id)?;

    let form = AnswerForm::new(answer.content);
    render_edit(&state, &user, id, answer.question_id, &form, None)
}

/// POST /answer/modify/:id - Save an edited answer.
pub async fn answer_modify(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    IdPath(id): IdPath,
    Form(form): Form<AnswerForm>,
) -> Result<Response, PageError> {
    let service = AnswerService::new(&state.db);
    let answer = service.get_by_id(id).await?;
    ensure_author(&user, answer.author_id)?;

    match service.modify(&answer, &form).await {
        Ok(updated) => Ok(Redirect::to(&detail_url(updated.question_id)).into_response()),
        Err(QaboardError::Validation(message)) => {
            let html = render_edit(
                &state,
                &user,
                id,
                answer.question_id,
                &form,
                Some(message.as_str()),
            )?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, html).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /answer/delete/:id - Delete an answer.
pub async fn answer_delete(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    IdPath(id): IdPath,
) -> Result<Redirect, PageError> {
    let service = AnswerService::new(&state.db);
    let answer = service.get_by_id(id).await?;
    ensure_author(&user, answer.author_id)?;

    service.delete(&answer).await?;
    Ok(Redirect::to(&detail_url(answer.question_id)))
}
