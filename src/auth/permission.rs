//! Ownership checks for QABOARD.
//!
//! Questions and answers may only be changed by the user who wrote them.

use crate::db::User;
use crate::{QaboardError, Result};

/// Require that `actor` wrote the record owned by `author_id`.
///
/// Fails with [`QaboardError::Permission`] otherwise.
///
/// # Examples
///
/// ```ignore
/// use qaboard::auth::ensure_author;
///
/// ensure_author(&user, question.author_id)?;
/// service.modify(&question, &form).await?;
/// ```
pub fn ensure_author(actor: &User, author_id: i64) -> Result<()> {
    if actor.id == author_id {
        Ok(())
    } else {
        tracing::debug!(
            user_id = actor.id,
            author_id,
            "Rejected change to another user's post"
        );
        Err(QaboardError::Permission(
            "only the author may change this post".to_string(),
        ))
    }
}
