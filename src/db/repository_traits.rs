//! Repository trait definitions for QABOARD.
//!
//! Board records (questions, answers) are persisted through repositories
//! implementing [`Repository`]. Generic code such as the
//! [`Paginator`](crate::board::Paginator) is written against the trait and
//! dispatched statically.

use async_trait::async_trait;

use crate::Result;

/// Ordering applied by [`Repository::find_page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Most recently created first.
    #[default]
    NewestFirst,
    /// Oldest first.
    OldestFirst,
}

impl SortOrder {
    /// SQL `ORDER BY` clause body for the table aliased as `alias`.
    ///
    /// Rows created within the same instant are ordered by ID.
    pub fn order_by(&self, alias: &str) -> String {
        let direction = match self {
            SortOrder::NewestFirst => "DESC",
            SortOrder::OldestFirst => "ASC",
        };
        format!("{alias}.create_date {direction}, {alias}.id {direction}")
    }
}

/// CRUD interface shared by board repositories.
#[async_trait]
pub trait Repository: Sync {
    /// The entity read back from storage.
    type Entity: Send;
    /// Data for inserting a new entity.
    type New: Sync;
    /// Data for updating an existing entity.
    type Update: Sync;

    /// Get an entity by ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Self::Entity>>;

    /// Fetch `limit` entities starting at `offset` in the given order.
    async fn find_page(&self, offset: i64, limit: i64, order: SortOrder)
        -> Result<Vec<Self::Entity>>;

    /// Count all entities.
    async fn count(&self) -> Result<i64>;

    /// Insert a new entity and return it with its assigned ID.
    async fn insert(&self, new: &Self::New) -> Result<Self::Entity>;

    /// Update an entity. Returns `None` if it does not exist.
    async fn update(&self, id: i64, update: &Self::Update) -> Result<Option<Self::Entity>>;

    /// Delete an entity. Returns true if a row was removed.
    async fn delete(&self, id: i64) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_sql() {
        assert_eq!(
            SortOrder::NewestFirst.order_by("q"),
            "q.create_date DESC, q.id DESC"
        );
        assert_eq!(
            SortOrder::OldestFirst.order_by("a"),
            "a.create_date ASC, a.id ASC"
        );
        assert_eq!(SortOrder::default(), SortOrder::NewestFirst);
    }
}
