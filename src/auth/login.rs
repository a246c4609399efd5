//! Username/password login for QABOARD.

use tracing::{debug, info};

use crate::auth::verify_password;
use crate::db::{User, UserRepository};
use crate::{QaboardError, Result};

/// Message shown for any failed login, whether the user is unknown or the
/// password is wrong.
pub const INVALID_CREDENTIALS: &str = "Invalid username or password.";

/// Check a username and password and return the matching user.
///
/// The user's last-login timestamp is updated on success.
pub async fn authenticate(
    repo: &UserRepository<'_>,
    username: &str,
    password: &str,
) -> Result<User> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(QaboardError::Auth(INVALID_CREDENTIALS.to_string()));
    }

    let Some(user) = repo.get_by_username(username).await? else {
        debug!(username, "Login for unknown user");
        return Err(QaboardError::Auth(INVALID_CREDENTIALS.to_string()));
    };

    if verify_password(password, &user.password).is_err() {
        debug!(user_id = user.id, "Login with wrong password");
        return Err(QaboardError::Auth(INVALID_CREDENTIALS.to_string()));
    }

    repo.update_last_login(user.id).await?;
    info!(username = %user.username, user_id = user.id, "User logged in");

    Ok(user)
}
