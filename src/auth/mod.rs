//! Authentication module for QABOARD.
//!
//! This module provides password hashing, user registration, login and
//! the author-only rule for changing posts.

mod login;
mod password;
mod permission;
mod registration;
pub mod validation;

pub use login::{authenticate, INVALID_CREDENTIALS};
pub use password::{
    hash_password, validate_password, verify_password, PasswordError, MAX_PASSWORD_LENGTH,
    MIN_PASSWORD_LENGTH,
};
pub use permission::ensure_author;
pub use registration::{register, RegistrationError, RegistrationRequest};
pub use validation::ValidationError;
