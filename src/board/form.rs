//! Form input for questions and answers.
//!
//! Forms are deserialized straight from `application/x-www-form-urlencoded`
//! bodies and checked with [`validator::Validate`]. They also serialize back
//! into the template context so a rejected submission can be shown again
//! with the values the user typed.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Maximum length for question subjects (in characters).
pub const MAX_SUBJECT_LENGTH: u64 = 200;

/// Maximum length for question and answer bodies (in characters).
pub const MAX_CONTENT_LENGTH: u64 = 10_000;

/// Submitted question form.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct QuestionForm {
    #[validate(
        custom(function = "validate_subject"),
        length(max = 200, message = "Subject must be at most 200 characters.")
    )]
    pub subject: String,
    #[validate(
        custom(function = "validate_content"),
        length(max = 10000, message = "Content must be at most 10000 characters.")
    )]
    pub content: String,
}

impl QuestionForm {
    /// Build a form from subject and content.
    pub fn new(subject: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            content: content.into(),
        }
    }
}

/// Submitted answer form.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct AnswerForm {
    #[validate(
        custom(function = "validate_content"),
        length(max = 10000, message = "Content must be at most 10000 characters.")
    )]
    pub content: String,
}

impl AnswerForm {
    /// Build a form from content.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Validate that a string does not contain control characters or NULL bytes.
///
/// Newlines, carriage returns and tabs are allowed.
pub fn no_control_chars(value: &str) -> Result<(), validator::ValidationError> {
    if value
        .chars()
        .any(|c| c.is_control() && c != '\n' && c != '\r' && c != '\t')
    {
        return Err(validator::ValidationError::new("no_control_chars")
            .with_message("Must not contain control characters.".into()));
    }
    Ok(())
}

/// Validate that a string is not empty after trimming whitespace.
fn not_empty_trimmed(
    value: &str,
    message: &'static str,
) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(
            validator::ValidationError::new("not_empty_trimmed").with_message(message.into()),
        );
    }
    Ok(())
}

fn validate_subject(value: &str) -> Result<(), validator::ValidationError> {
    not_empty_trimmed(value, "Subject is required.")?;
    no_control_chars(value)
}

fn validate_content(value: &str) -> Result<(), validator::ValidationError> {
    not_empty_trimmed(value, "Content is required.")
}
