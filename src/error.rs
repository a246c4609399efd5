//! Error types for QABOARD.

use thiserror::Error;

/// Common error type for QABOARD.
#[derive(Error, Debug)]
pub enum QaboardError {
    /// Database error.
    ///
    /// Errors from sqlx are converted into this variant.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// The acting user is not allowed to touch the record.
    #[error("permission denied: {0}")]
    Permission(String),

    /// Submitted form data failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// A unique constraint rejected the write.
    #[error("{0} already exists")]
    Conflict(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Template rendering error.
    #[error("template error: {0}")]
    Template(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl QaboardError {
    /// Shorthand for a not-found error on the named resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        QaboardError::NotFound(what.into())
    }
}

impl From<sqlx::Error> for QaboardError {
    fn from(e: sqlx::Error) -> Self {
        match e.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => {
                QaboardError::Conflict(db_err.message().to_string())
            }
            _ => QaboardError::Database(e.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for QaboardError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let messages: Vec<String> = fields
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {field}"))
                })
            })
            .collect();

        QaboardError::Validation(messages.join(" "))
    }
}

impl From<handlebars::RenderError> for QaboardError {
    fn from(e: handlebars::RenderError) -> Self {
        QaboardError::Template(e.to_string())
    }
}

/// Result type alias for QABOARD operations.
pub type Result<T> = std::result::Result<T, QaboardError>;
