//! Read-only JSON API over the board.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::board::{parse_page_number, QuestionService};
use crate::web::dto::{
    ApiQuery, ApiResponse, PageQuery, PaginatedResponse, QuestionDetailResponse, QuestionSummary,
};
use crate::web::error::ApiError;

use super::AppState;

/// GET /api/questions - Paginated question list, newest first.
pub async fn list_questions(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<PaginatedResponse<QuestionSummary>>, ApiError> {
    let number = parse_page_number(query.page.as_deref())?;
    let page = QuestionService::new(&state.db)
        .with_page_size(state.page_size)
        .list(number)
        .await?;

    Ok(Json(PaginatedResponse::from_page(page, QuestionSummary::from)))
}

/// GET /api/questions/:id - A question with its answers.
pub async fn get_question(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<QuestionDetailResponse>>, ApiError> {
    let id: i64 = id
        .parse()
        .map_err(|_| ApiError::not_found("question not found"))?;
    let detail = QuestionService::new(&state.db).detail(id).await?;

    Ok(Json(ApiResponse::new(QuestionDetailResponse::new(detail, None))))
}
