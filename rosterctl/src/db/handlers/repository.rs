//! Base repository trait for database operations.
//!
//! A repository is the data access layer for a single table. It provides
//! methods for creating, reading, replacing, and deleting entities, as well
//! as listing them with simple filters. Each repository wraps a mutable
//! SQLite connection (usually borrowed from a transaction).

use crate::db::errors::Result;

/// Base repository trait providing common database operations
///
/// This trait has separate associated types for create requests, replace
/// requests, and responses. Replacement is a full overwrite: PUT semantics,
/// not a patch.
#[async_trait::async_trait]
pub trait Repository {
    /// The request type for creating entities
    type CreateRequest;

    /// The request type for replacing entities
    type ReplaceRequest;

    /// The response/DTO type returned by operations
    type Response;

    /// The identifier type for lookups
    type Id: Send + Sync;

    /// The filter type for list operations
    type Filter: Send + Sync;

    /// Create a new entity
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response>;

    /// Get an entity by ID
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>>;

    /// List entities with filtering and pagination
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>>;

    /// Count entities matching a filter (ignoring its pagination window)
    async fn count(&mut self, filter: &Self::Filter) -> Result<i64>;

    /// Replace an entity by ID
    async fn replace(&mut self, id: Self::Id, request: &Self::ReplaceRequest) -> Result<Self::Response>;

    /// Delete an entity by ID, returning whether a row was removed
    async fn delete(&mut self, id: Self::Id) -> Result<bool>;
}
