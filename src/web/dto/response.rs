//! Response DTOs for the JSON API and the HTML page contexts.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::board::{Answer, Page, Question, QuestionDetail};
use crate::db::User;

// ============================================================================
// Generic Response Wrappers
// ============================================================================

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    /// Response data.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PaginationMeta,
}

impl<T: Serialize> PaginatedResponse<T> {
    /// Create a new paginated response.
    pub fn new(data: Vec<T>, page: i64, per_page: i64, total: i64) -> Self {
        Self {
            data,
            meta: PaginationMeta {
                page,
                per_page,
                total,
            },
        }
    }

    /// Build a response from a board page, converting each item.
    pub fn from_page<U>(page: Page<U>, f: impl FnMut(U) -> T) -> Self {
        let (number, per_page, total) = (page.number, page.per_page, page.total);
        Self::new(page.items.into_iter().map(f).collect(), number, per_page, total)
    }
}

/// Pagination metadata.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Current page number (1-based).
    pub page: i64,
    /// Items per page.
    pub per_page: i64,
    /// Total number of items.
    pub total: i64,
}

fn timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

// ============================================================================
// Board DTOs
// ============================================================================

/// Author information.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorInfo {
    /// User ID.
    pub id: i64,
    /// Username.
    pub username: String,
}

/// Question as listed on the index page.
#[derive(Debug, Serialize)]
pub struct QuestionSummary {
    pub id: i64,
    pub subject: String,
    pub author: AuthorInfo,
    pub answer_count: i64,
    pub create_date: String,
}

impl From<Question> for QuestionSummary {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            subject: q.subject,
            author: AuthorInfo {
                id: q.author_id,
                username: q.author_username,
            },
            answer_count: q.answer_count,
            create_date: timestamp(&q.create_date),
        }
    }
}

/// Full question.
#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub id: i64,
    pub subject: String,
    pub content: String,
    pub author: AuthorInfo,
    pub answer_count: i64,
    pub create_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modify_date: Option<String>,
    /// Whether the viewer wrote this question. Only used by the HTML pages.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_author: bool,
}

impl QuestionResponse {
    /// Convert a question as seen by `viewer`.
    pub fn new(q: Question, viewer: Option<&User>) -> Self {
        Self {
            is_author: viewer.is_some_and(|u| u.id == q.author_id),
            id: q.id,
            subject: q.subject,
            content: q.content,
            author: AuthorInfo {
                id: q.author_id,
                username: q.author_username,
            },
            answer_count: q.answer_count,
            create_date: timestamp(&q.create_date),
            modify_date: q.modify_date.as_ref().map(timestamp),
        }
    }
}

/// Answer response.
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub id: i64,
    pub question_id: i64,
    pub content: String,
    pub author: AuthorInfo,
    pub create_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modify_date: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_author: bool,
}

impl AnswerResponse {
    /// Convert an answer as seen by `viewer`.
    pub fn new(a: Answer, viewer: Option<&User>) -> Self {
        Self {
            is_author: viewer.is_some_and(|u| u.id == a.author_id),
            id: a.id,
            question_id: a.question_id,
            content: a.content,
            author: AuthorInfo {
                id: a.author_id,
                username: a.author_username,
            },
            create_date: timestamp(&a.create_date),
            modify_date: a.modify_date.as_ref().map(timestamp),
        }
    }
}

/// Question with its answers.
#[derive(Debug, Serialize)]
pub struct QuestionDetailResponse {
    #[serde(flatten)]
    pub question: QuestionResponse,
    pub answers: Vec<AnswerResponse>,
}

impl QuestionDetailResponse {
    pub fn new(detail: QuestionDetail, viewer: Option<&User>) -> Self {
        Self {
            question: QuestionResponse::new(detail.question, viewer),
            answers: detail
                .answers
                .into_iter()
                .map(|a| AnswerResponse::new(a, viewer))
                .collect(),
        }
    }
}

// ============================================================================
// Page contexts
// ============================================================================

/// The logged-in user shown in the page header.
#[derive(Debug, Serialize)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

/// A row in the question list, numbered from the total down.
#[derive(Debug, Serialize)]
pub struct QuestionRow {
    pub number: i64,
    #[serde(flatten)]
    pub question: QuestionSummary,
}

/// Navigation links for a page of results.
#[derive(Debug, Serialize)]
pub struct PageNav {
    pub number: i64,
    pub num_pages: i64,
    pub total: i64,
    pub has_previous: bool,
    pub previous: Option<i64>,
    pub has_next: bool,
    pub next: Option<i64>,
    pub range: Vec<PageLink>,
}

/// One numbered page link.
#[derive(Debug, Serialize)]
pub struct PageLink {
    pub number: i64,
    pub current: bool,
}

impl<T> From<&Page<T>> for PageNav {
    fn from(page: &Page<T>) -> Self {
        Self {
            number: page.number,
            num_pages: page.num_pages(),
            total: page.total,
            has_previous: page.has_previous(),
            previous: page.previous_page_number(),
            has_next: page.has_next(),
            next: page.next_page_number(),
            range: page
                .page_range()
                .into_iter()
                .map(|number| PageLink {
                    number,
                    current: number == page.number,
                })
                .collect(),
        }
    }
}

/// Number the rows of a newest-first page so the oldest question is 1.
pub fn question_rows(page: Page<Question>) -> (Vec<QuestionRow>, PageNav) {
    let nav = PageNav::from(&page);
    let first = page.total - page.start_index() + 1;
    let rows = page
        .items
        .into_iter()
        .enumerate()
        .map(|(i, q)| QuestionRow {
            number: first - i as i64,
            question: q.into(),
        })
        .collect();
    (rows, nav)
}
