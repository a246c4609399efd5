//! Question pages: list, detail, and the author-only create, modify and
//! delete actions.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Serialize;
use std::sync::Arc;

use crate::auth::ensure_author;
use crate::board::{parse_page_number, AnswerForm, QuestionForm, QuestionService};
use crate::db::User;
use crate::web::dto::{
    question_rows, AnswerResponse, CurrentUser, IdPath, PageNav, PageQuery,
    PageQueryString, QuestionDetailResponse, QuestionResponse, QuestionRow,
};
use crate::web::error::PageError;
use crate::web::middleware::{AuthUser, OptionalAuthUser};
use crate::QaboardError;

use super::AppState;

#[derive(Serialize)]
struct ListPage {
    title: &'static str,
    current_user: Option<CurrentUser>,
    questions: Vec<QuestionRow>,
    page: PageNav,
}

#[derive(Serialize)]
struct DetailPage<'a> {
    title: String,
    current_user: Option<CurrentUser>,
    question: QuestionResponse,
    answers: Vec<AnswerResponse>,
    form: &'a AnswerForm,
    error: Option<&'a str>,
}

#[derive(Serialize)]
struct FormPage<'a> {
    title: &'static str,
    current_user: CurrentUser,
    action: String,
    form: &'a QuestionForm,
    error: Option<&'a str>,
}

/// Render the detail page of a question, with the answer form filled from
/// `form`.
pub(crate) async fn render_detail(
    state: &AppState,
    viewer: Option<&User>,
    question_id: i64,
    form: &AnswerForm,
    error: Option<&str>,
) -> Result<Html<String>, PageError> {
    let detail = QuestionService::new(&state.db).detail(question_id).await?;
    let QuestionDetailResponse { question, answers } = QuestionDetailResponse::new(detail, viewer);

    let page = DetailPage {
        title: question.subject.clone(),
        current_user: viewer.map(CurrentUser::from),
        question,
        answers,
        form,
        error,
    };
    state.render("question_detail", &page)
}

fn render_form(
    state: &AppState,
    user: &User,
    title: &'static str,
    action: String,
    form: &QuestionForm,
    error: Option<&str>,
) -> Result<Html<String>, PageError> {
    let page = FormPage {
        title,
        current_user: user.into(),
        action,
        form,
        error,
    };
    state.render("question_form", &page)
}

/// GET / - Paginated question list, newest first.
pub async fn question_list(
    State(state): State<Arc<AppState>>,
    OptionalAuthUser(user): OptionalAuthUser,
    PageQueryString(query): PageQueryString<PageQuery>,
) -> Result<Html<String>, PageError> {
    let number = parse_page_number(query.page.as_deref())?;
    let page = QuestionService::new(&state.db)
        .with_page_size(state.page_size)
        .list(number)
        .await?;
    let (questions, page) = question_rows(page);

    let context = ListPage {
        title: "Questions",
        current_user: user.as_ref().map(CurrentUser::from),
        questions,
        page,
    };
    state.render("question_list", &context)
}

/// GET /detail/:id - A question with its answers.
pub async fn question_detail(
    State(state): State<Arc<AppState>>,
    OptionalAuthUser(user): OptionalAuthUser,
    IdPath(id): IdPath,
) -> Result<Html<String>, PageError> {
    render_detail(&state, user.as_ref(), id, &AnswerForm::default(), None).await
}

/// GET /question/create - Empty question form.
pub async fn question_create_form(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<Html<String>, PageError> {
    render_form(
        &state,
        &user,
        "Ask a question",
        "/question/create".to_string(),
        &QuestionForm::default(),
        None,
    )
}

/// POST /question/create - Create a question.
pub async fn question_create(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Form(form): Form<QuestionForm>,
) -> Result<Response, PageError> {
    match QuestionService::new(&state.db).create(&user, &form).await {
        Ok(question) => Ok(Redirect::to(&format!("/detail/{}", question.id)).into_response()),
        Err(QaboardError::Validation(message)) => {
            let html = render_form(
                &state,
                &user,
                "Ask a question",
                "/question/create".to_string(),
                &form,
                Some(message.as_str()),
            )?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, html).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /question/modify/:id - Question form filled with the current text.
pub async fn question_modify_form(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    IdPath(id): IdPath,
) -> Result<Html<String>, PageError> {
    let question = QuestionService::new(&state.db).get_by_id(id).await?;
    ensure_author(&user, question.author_id)?;

    let form = QuestionForm::new(question.subject, question.content);
    render_form(
        &state,
        &user,
        "Edit question",
        format!("/question/modify/{id}"),
        &form,
        None,
    )
}

/// POST /question/modify/:id - Save an edited question.
pub async fn question_modify(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    IdPath(id): IdPath,
    Form(form): Form<QuestionForm>,
) -> Result<Response, PageError> {
    let service = QuestionService::new(&state.db);
    let question = service.get_by_id(id).await?;
    ensure_author(&user, question.author_id)?;

    match service.modify(&question, &form).await {
        Ok(question) => Ok(Redirect::to(&format!("/detail/{}", question.id)).into_response()),
        Err(QaboardError::Validation(message)) => {
            let html = render_form(
                &state,
                &user,
                "Edit question",
                format!("/question/modify/{id}"),
                &form,
                Some(message.as_str()),
            )?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, html).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /question/delete/:id - Delete a question and its answers.
pub async fn question_delete(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    IdPath(id): IdPath,
) -> Result<Redirect, PageError> {
    let service = QuestionService::new(&state.db);
    let question = service.get_by_id(id).await?;
    ensure_author(&user, question.author_id)?;

    service.delete(&question).await?;
    Ok(Redirect::to("/"))
}
