//! Answer repository for QABOARD.

use async_trait::async_trait;

use super::answer::{Answer, AnswerUpdate, NewAnswer};
use crate::db::{DbPool, Repository, SortOrder};
use crate::{QaboardError, Result};

const ANSWER_SELECT: &str = "SELECT a.id, a.question_id, a.content, a.author_id, \
     u.username AS author_username, a.create_date, a.modify_date \
     FROM answers a JOIN users u ON u.id = a.author_id";

/// Repository for answer CRUD operations.
pub struct AnswerRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> AnswerRepository<'a> {
    /// Create a new AnswerRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// List every answer to a question, oldest first.
    pub async fn list_by_question(&self, question_id: i64) -> Result<Vec<Answer>> {
        let sql = format!(
            "{ANSWER_SELECT} WHERE a.question_id = ? ORDER BY {}",
            SortOrder::OldestFirst.order_by("a")
        );
        let answers = sqlx::query_as::<_, Answer>(&sql)
            .bind(question_id)
            .fetch_all(self.pool)
            .await?;
        Ok(answers)
    }
}

#[async_trait]
impl Repository for AnswerRepository<'_> {
    type Entity = Answer;
    type New = NewAnswer;
    type Update = AnswerUpdate;

    async fn find_by_id(&self, id: i64) -> Result<Option<Answer>> {
        let sql = format!("{ANSWER_SELECT} WHERE a.id = ?");
        let answer = sqlx::query_as::<_, Answer>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(answer)
    }

    async fn find_page(&self, offset: i64, limit: i64, order: SortOrder) -> Result<Vec<Answer>> {
        let sql = format!(
            "{ANSWER_SELECT} ORDER BY {} LIMIT ? OFFSET ?",
            order.order_by("a")
        );
        let answers = sqlx::query_as::<_, Answer>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool)
            .await?;
        Ok(answers)
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM answers")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    async fn insert(&self, new: &NewAnswer) -> Result<Answer> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO answers (question_id, content, author_id, create_date) \
             VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(new.question_id)
        .bind(&new.content)
        .bind(new.author_id)
        .bind(new.create_date)
        .fetch_one(self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| QaboardError::not_found("answer"))
    }

    async fn update(&self, id: i64, update: &AnswerUpdate) -> Result<Option<Answer>> {
        let result = sqlx::query("UPDATE answers SET content = ?, modify_date = ? WHERE id = ?")
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
        let result = sqlx::query("DELETE FROM answers WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
