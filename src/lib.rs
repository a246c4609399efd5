//! QABOARD - Question and Answer Board
//!
//! A small Q&A board served over HTTP: users sign up, ask questions and
//! answer them, and only the author of a post may edit or delete it.

pub mod auth;
pub mod board;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use auth::{
    authenticate, ensure_author, hash_password, register, validate_password, verify_password,
    PasswordError, RegistrationError, RegistrationRequest, ValidationError,
};
pub use board::{
    Answer, AnswerForm, AnswerService, Page, Question, QuestionDetail, QuestionForm,
    QuestionService,
};
pub use config::Config;
pub use db::{Database, NewUser, User, UserRepository};
pub use error::{QaboardError, Result};
pub use web::WebServer;
