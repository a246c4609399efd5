//! Question model for QABOARD.

use chrono::{DateTime, Utc};

use super::answer::Answer;

/// Question entity as read back from the database.
///
/// `author_username` and `answer_count` are joined in at query time.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Question {
    /// Unique question ID.
    pub id: i64,
    /// Question subject line.
    pub subject: String,
    /// Question body.
    pub content: String,
    /// ID of the user who asked the question.
    pub author_id: i64,
    /// Username of the author.
    pub author_username: String,
    /// Number of answers attached to this question.
    pub answer_count: i64,
    /// Creation timestamp.
    pub create_date: DateTime<Utc>,
    /// Timestamp of the latest modification, if any.
    pub modify_date: Option<DateTime<Utc>>,
}

/// A question together with its answers, oldest answer first.
#[derive(Debug, Clone)]
pub struct QuestionDetail {
    pub question: Question,
    pub answers: Vec<Answer>,
}

/// Data for creating a new question.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub subject: String,
    pub content: String,
    pub author_id: i64,
    pub create_date: DateTime<Utc>,
}

impl NewQuestion {
    /// Create a new question stamped with the current time.
    pub fn new(author_id: i64, subject: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            content: content.into(),
            author_id,
            create_date: Utc::now(),
        }
    }
}

/// Data for overwriting an existing question.
#[derive(Debug, Clone)]
pub struct QuestionUpdate {
    pub subject: String,
    pub content: String,
    pub modify_date: DateTime<Utc>,
}

impl QuestionUpdate {
    /// Create an update stamped with the current time.
    pub fn new(subject: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            content: content.into(),
            modify_date: Utc::now(),
        }
    }
}
