//! User repository for QABOARD.

use super::user::{NewUser, User};
use super::DbPool;
use crate::{QaboardError, Result};

const USER_COLUMNS: &str = "id, username, password, email, created_at, last_login";

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// Returns the created user with the assigned ID.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO users (username, password, email) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(&new_user.username)
        .bind(&new_user.password)
        .bind(&new_user.email)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| QaboardError::not_found("user"))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// Get a user by username (case-insensitive).
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ? COLLATE NOCASE");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// Update the last login timestamp for a user.
    pub async fn update_last_login(&self, id: i64) -> Result<()> {
        sqlx::query("UPDATE users SET last_login = datetime('now') WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// Delete a user by ID.
    ///
    /// Returns true if a user was deleted. The user's questions and answers
    /// go with it.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Check if a username is already taken (case-insensitive).
    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = ? COLLATE NOCASE)",
        )
        .bind(username)
        .fetch_one(self.pool)
        .await?;
        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_create_user() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let user = repo.create(&NewUser::new("tester", "hashedpw")).await.unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.username, "tester");
        assert_eq!(user.password, "hashedpw");
        assert!(user.email.is_none());
        assert!(user.last_login.is_none());
    }

    #[tokio::test]
    async fn test_create_duplicate_username_different_case() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        repo.create(&NewUser::new("Tester", "pw")).await.unwrap();

        assert!(matches!(
            repo.create(&NewUser::new("tester", "pw")).await,
            Err(QaboardError::Conflict(_))
        ));
        assert!(matches!(
            repo.create(&NewUser::new("TESTER", "pw")).await,
            Err(QaboardError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let created = repo
            .create(&NewUser::new("tester", "pw").with_email("t@example.com"))
            .await
            .unwrap();

        let found = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(found.email.as_deref(), Some("t@example.com"));

        assert!(repo.get_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_by_username_case_insensitive() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        repo.create(&NewUser::new("TestUser", "pw")).await.unwrap();

        for name in ["TestUser", "testuser", "TESTUSER", "tEsTuSeR"] {
            let found = repo.get_by_username(name).await.unwrap();
            assert_eq!(found.unwrap().username, "TestUser");
        }
        assert!(repo.get_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_last_login() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let user = repo.create(&NewUser::new("tester", "pw")).await.unwrap();
        repo.update_last_login(user.id).await.unwrap();

        let updated = repo.get_by_id(user.id).await.unwrap().unwrap();
        assert!(updated.last_login.is_some());
    }

    #[tokio::test]
    async fn test_delete_user() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let user = repo.create(&NewUser::new("tester", "pw")).await.unwrap();

        assert!(repo.delete(user.id).await.unwrap());
        assert!(repo.get_by_id(user.id).await.unwrap().is_none());
        assert!(!repo.delete(user.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_username_exists() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        assert!(!repo.username_exists("tester").await.unwrap());
        repo.create(&NewUser::new("tester", "pw")).await.unwrap();
        assert!(repo.username_exists("TESTER").await.unwrap());
        assert!(!repo.username_exists("other").await.unwrap());
    }
}
