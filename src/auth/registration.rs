//! User registration for QABOARD.

use thiserror::Error;
use tracing::info;

use crate::auth::validation::{validate_signup, ValidationError};
use crate::auth::{hash_password, PasswordError};
use crate::db::{NewUser, User, UserRepository};
use crate::QaboardError;

/// Registration-specific errors.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// Validation failed.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Username already exists.
    #[error("username already exists")]
    UsernameExists,

    /// Password hashing failed.
    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    /// Database error.
    #[error("database error: {0}")]
    Database(String),
}

impl From<QaboardError> for RegistrationError {
    fn from(err: QaboardError) -> Self {
        match err {
            QaboardError::Conflict(_) => RegistrationError::UsernameExists,
            other => RegistrationError::Database(other.to_string()),
        }
    }
}

impl RegistrationError {
    /// Whether the error is the user's to fix, as opposed to a server fault.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            RegistrationError::Validation(_) | RegistrationError::UsernameExists
        )
    }
}

/// Registration request data.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    /// Desired username (4-16 alphanumeric + underscore).
    pub username: String,
    /// Password (8-128 characters).
    pub password: String,
    /// Password typed a second time.
    pub password_confirm: String,
    /// Optional email address.
    pub email: Option<String>,
}

impl RegistrationRequest {
    /// Create a new registration request with a matching confirmation.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        let password = password.into();
        Self {
            username: username.into(),
            password_confirm: password.clone(),
            password,
            email: None,
        }
    }

    /// Set the confirmation separately from the password.
    pub fn with_confirmation(mut self, confirmation: impl Into<String>) -> Self {
        self.password_confirm = confirmation.into();
        self
    }

    /// Set the email address. An empty string means no email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        let email = email.into();
        self.email = (!email.trim().is_empty()).then(|| email.trim().to_string());
        self
    }
}

/// Register a new user.
///
/// This function:
/// 1. Validates all input fields
/// 2. Checks if the username already exists
/// 3. Hashes the password
/// 4. Creates the user in the database
///
/// A concurrent sign-up that takes the name between steps 2 and 4 trips
/// the unique index and is reported as [`RegistrationError::UsernameExists`].
pub async fn register(
    repo: &UserRepository<'_>,
    request: RegistrationRequest,
) -> std::result::Result<User, RegistrationError> {
    validate_signup(
        &request.username,
        &request.password,
        &request.password_confirm,
        request.email.as_deref(),
    )?;

    if repo.username_exists(&request.username).await? {
        return Err(RegistrationError::UsernameExists);
    }

    let password_hash = hash_password(&request.password)?;

    let mut new_user = NewUser::new(&request.username, password_hash);
    if let Some(ref email) = request.email {
        new_user = new_user.with_email(email);
    }

    let user = repo.create(&new_user).await?;

    info!(
        username = %user.username,
        user_id = user.id,
        "New user registered"
    );

    Ok(user)
}
