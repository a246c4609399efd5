//! Answer service for QABOARD.

use tracing::info;
use validator::Validate;

use super::answer::{Answer, AnswerUpdate, NewAnswer};
use super::answer_repository::AnswerRepository;
use super::form::AnswerForm;
use super::question_repository::QuestionRepository;
use crate::db::{Database, Repository, User};
use crate::{QaboardError, Result};

/// Service for answer operations.
pub struct AnswerService<'a> {
    db: &'a Database,
}

impl<'a> AnswerService<'a> {
    /// Create a new AnswerService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Get an answer by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Answer> {
        AnswerRepository::new(self.db.pool())
            .find_by_id(id)
            .await?
            .ok_or_else(|| QaboardError::not_found("answer"))
    }

    /// List the answers to a question, oldest first.
    pub async fn list_for_question(&self, question_id: i64) -> Result<Vec<Answer>> {
        self.ensure_question_exists(question_id).await?;
        AnswerRepository::new(self.db.pool())
            .list_by_question(question_id)
            .await
    }

    /// Answer question `question_id` as `author`.
    ///
    /// The question is looked up before the form is validated, so an
    /// answer to a missing question is [`QaboardError::NotFound`] even when
    /// the form is also invalid.
    pub async fn create(
        &self,
        author: &User,
        question_id: i64,
        form: &AnswerForm,
    ) -> Result<Answer> {
        self.ensure_question_exists(question_id).await?;
        form.validate()?;

        let new = NewAnswer::new(question_id, author.id, form.content.trim());
        let answer = AnswerRepository::new(self.db.pool()).insert(&new).await?;

        info!(
            answer_id = answer.id,
            question_id,
            author = %author.username,
            "Answer created"
        );

        Ok(answer)
    }

    /// Overwrite an answer's content.
    pub async fn modify(&self, answer: &Answer, form: &AnswerForm) -> Result<Answer> {
        form.validate()?;

        let updated = AnswerRepository::new(self.db.pool())
            .update(answer.id, &AnswerUpdate::new(form.content.trim()))
            .await?
            .ok_or_else(|| QaboardError::not_found("answer"))?;

        info!(
            answer_id = updated.id,
            question_id = updated.question_id,
            "Answer modified"
        );

        Ok(updated)
    }

    /// Permanently delete an answer.
    pub async fn delete(&self, answer: &Answer) -> Result<()> {
        let deleted = AnswerRepository::new(self.db.pool())
            .delete(answer.id)
            .await?;
        if !deleted {
            return Err(QaboardError::not_found("answer"));
        }

        info!(
            answer_id = answer.id,
            question_id = answer.question_id,
            "Answer deleted"
        );

        Ok(())
    }

    async fn ensure_question_exists(&self, question_id: i64) -> Result<()> {
        if QuestionRepository::new(self.db.pool())
            .exists(question_id)
            .await?
        {
            Ok(())
        } else {
            Err(QaboardError::not_found("question"))
        }
    }
}
