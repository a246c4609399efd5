//! Question repository for QABOARD.
//!
//! This module provides CRUD operations for questions in the database.

use async_trait::async_trait;

use super::question::{NewQuestion, Question, QuestionUpdate};
use crate::db::{DbPool, Repository, SortOrder};
use crate::{QaboardError, Result};

const QUESTION_SELECT: &str = "SELECT q.id, q.subject, q.content, q.author_id, \
     u.username AS author_username, \
     (SELECT COUNT(*) FROM answers a WHERE a.question_id = q.id) AS answer_count, \
     q.create_date, q.modify_date \
     FROM questions q JOIN users u ON u.id = q.author_id";

/// Repository for question CRUD operations.
pub struct QuestionRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> QuestionRepository<'a> {
    /// Create a new QuestionRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Check whether a question exists.
    pub async fn exists(&self, id: i64) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM questions WHERE id = ?)")
                .bind(id)
                .fetch_one(self.pool)
                .await?;
        Ok(exists)
    }
}

#[async_trait]
impl Repository for QuestionRepository<'_> {
    type Entity = Question;
    type New = NewQuestion;
    type Update = QuestionUpdate;

    async fn find_by_id(&self, id: i64) -> Result<Option<Question>> {
        let sql = format!("{QUESTION_SELECT} WHERE q.id = ?");
        let question = sqlx::query_as::<_, Question>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(question)
    }

    async fn find_page(&self, offset: i64, limit: i64, order: SortOrder) -> Result<Vec<Question>> {
        let sql = format!(
            "{QUESTION_SELECT} ORDER BY {} LIMIT ? OFFSET ?",
            order.order_by("q")
        );
        let questions = sqlx::query_as::<_, Question>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool)
            .await?;
        Ok(questions)
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    async fn insert(&self, new: &NewQuestion) -> Result<Question> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO questions (subject, content, author_id, create_date) \
             VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(&new.subject)
        .bind(&new.content)
        .bind(new.author_id)
        .bind(new.create_date)
        .fetch_one(self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| QaboardError::not_found("question"))
    }

    async fn update(&self, id: i64, update: &QuestionUpdate) -> Result<Option<Question>> {
        let result = sqlx::query(
            "UPDATE questions SET subject = ?, content = ?, modify_date = ? WHERE id = ?",
        )
        .bind(&update.subject)
        .bind(&update.content)
        .bind(update.modify_date)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM questions WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
