//! Board module for QABOARD.
//!
//! This module provides the question and answer board:
//! - Question and answer models and their repositories
//! - Form validation for submitted posts
//! - Page-number pagination over any [`Repository`](crate::db::Repository)
//! - Services wrapping persistence with validation and timestamps

mod answer;
mod answer_repository;
mod answer_service;
mod form;
mod pagination;
mod question;
mod question_repository;
mod question_service;

pub use answer::{Answer, AnswerUpdate, NewAnswer};
pub use answer_repository::AnswerRepository;
pub use answer_service::AnswerService;
pub use form::{AnswerForm, QuestionForm, MAX_CONTENT_LENGTH, MAX_SUBJECT_LENGTH};
pub use pagination::{parse_page_number, Page, Paginator, PAGE_LINK_WINDOW};
pub use question::{NewQuestion, Question, QuestionDetail, QuestionUpdate};
pub use question_repository::QuestionRepository;
pub use question_service::QuestionService;

/// Number of questions shown per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: i64 = 10;
