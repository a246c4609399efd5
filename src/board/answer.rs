//! Answer model for QABOARD.

use chrono::{DateTime, Utc};

/// Answer entity attached to a question.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Answer {
    /// Unique answer ID.
    pub id: i64,
    /// ID of the question being answered. Fixed at creation.
    pub question_id: i64,
    /// Answer body.
    pub content: String,
    /// ID of the user who wrote the answer.
    pub author_id: i64,
    /// Username of the author.
    pub author_username: String,
    /// Creation timestamp.
    pub create_date: DateTime<Utc>,
    /// Timestamp of the latest modification, if any.
    pub modify_date: Option<DateTime<Utc>>,
}

/// Data for creating a new answer.
#[derive(Debug, Clone)]
pub struct NewAnswer {
    pub question_id: i64,
    pub content: String,
    pub author_id: i64,
    pub create_date: DateTime<Utc>,
}

impl NewAnswer {
    /// Create a new answer stamped with the current time.
    pub fn new(question_id: i64, author_id: i64, content: impl Into<String>) -> Self {
        Self {
            question_id,
            content: content.into(),
            author_id,
            create_date: Utc::now(),
        }
    }
}

/// Data for overwriting an answer's content.
///
/// The parent question is not part of an update.
#[derive(Debug, Clone)]
pub struct AnswerUpdate {
    pub content: String,
    pub modify_date: DateTime<Utc>,
}

impl AnswerUpdate {
    /// Create an update stamped with the current time.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            modify_date: Utc::now(),
        }
    }
}
