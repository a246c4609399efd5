//! Question service for QABOARD.
//!
//! Wraps the question repository with form validation, timestamps and
//! page-number pagination. Authorization is the caller's job: handlers
//! check authorship with [`crate::auth::ensure_author`] before calling
//! [`QuestionService::modify`] or [`QuestionService::delete`].

use tracing::info;
use validator::Validate;

use super::answer_repository::AnswerRepository;
use super::form::QuestionForm;
use super::pagination::{Page, Paginator};
use super::question::{NewQuestion, Question, QuestionDetail, QuestionUpdate};
use super::question_repository::QuestionRepository;
use super::DEFAULT_PAGE_SIZE;
use crate::db::{Database, Repository, User};
use crate::{QaboardError, Result};

/// Service for question operations.
pub struct QuestionService<'a> {
    db: &'a Database,
    page_size: i64,
}

impl<'a> QuestionService<'a> {
    /// Create a new QuestionService with the default page size.
    pub fn new(db: &'a Database) -> Self {
        Self {
            db,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Use a different page size for [`list`](Self::list).
    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = page_size;
        self
    }

    /// List questions newest first.
    ///
    /// `page` is 1-based. Page 1 always exists; pages past the end are
    /// [`QaboardError::NotFound`].
    pub async fn list(&self, page: i64) -> Result<Page<Question>> {
        let repo = QuestionRepository::new(self.db.pool());
        Paginator::new(&repo, self.page_size).page(page).await
    }

    /// Get a question by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Question> {
        QuestionRepository::new(self.db.pool())
            .find_by_id(id)
            .await?
            .ok_or_else(|| QaboardError::not_found("question"))
    }

    /// Get a question along with its answers.
    pub async fn detail(&self, id: i64) -> Result<QuestionDetail> {
        let question = self.get_by_id(id).await?;
        let answers = AnswerRepository::new(self.db.pool())
            .list_by_question(id)
            .await?;
        Ok(QuestionDetail { question, answers })
    }

    /// Post a new question as `author`.
    ///
    /// Nothing is written when the form fails validation.
    pub async fn create(&self, author: &User, form: &QuestionForm) -> Result<Question> {
        form.validate()?;

        let new = NewQuestion::new(author.id, form.subject.trim(), form.content.trim());
        let question = QuestionRepository::new(self.db.pool()).insert(&new).await?;

        info!(
            question_id = question.id,
            author = %author.username,
            "Question created"
        );

        Ok(question)
    }

    /// Overwrite a question's subject and content.
    pub async fn modify(&self, question: &Question, form: &QuestionForm) -> Result<Question> {
        form.validate()?;

        let update = QuestionUpdate::new(form.subject.trim(), form.content.trim());
        let updated = QuestionRepository::new(self.db.pool())
            .update(question.id, &update)
            .await?
            .ok_or_else(|| QaboardError::not_found("question"))?;

        info!(question_id = updated.id, "Question modified");

        Ok(updated)
    }

    /// Permanently delete a question and every answer to it.
    pub async fn delete(&self, question: &Question) -> Result<()> {
        let deleted = QuestionRepository::new(self.db.pool())
            .delete(question.id)
            .await?;
        if !deleted {
            return Err(QaboardError::not_found("question"));
        }

        info!(
            question_id = question.id,
            answers = question.answer_count,
            "Question deleted"
        );

        Ok(())
    }
}
