//! Seam between the seed logic and the document store.
//!
//! The bootstrap binary implements [`DocumentStore`] on top of the MongoDB
//! driver; [`MemoryStore`] gives the same semantics in-process.

mod error;
mod memory;

pub use error::StoreError;
pub use memory::MemoryStore;

use crate::models::{Principal, ReferenceDocument, UserInfo};

/// Primitives the seed and verification steps need from a document store.
///
/// Databases are addressed by name on every call; selecting a database has
/// no side effect until something is written to it.
#[allow(async_fn_in_trait)]
pub trait DocumentStore {
    /// Health check. Fails unless the server acknowledges with `ok: 1`.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Look up a principal defined on `database`.
    async fn find_user(&self, database: &str, name: &str)
        -> Result<Option<UserInfo>, StoreError>;

    /// All principals defined on `database`, sorted by name.
    async fn list_users(&self, database: &str) -> Result<Vec<UserInfo>, StoreError>;

    /// Create a principal on `database`.
    ///
    /// Returns [`StoreError::DuplicatePrincipal`] if the name is taken.
    async fn create_user(&self, database: &str, principal: &Principal) -> Result<(), StoreError>;

    /// Drop a collection. Dropping a collection that does not exist succeeds.
    async fn drop_collection(&self, database: &str, collection: &str) -> Result<(), StoreError>;

    /// Insert documents, returning the store-assigned identifiers in input order.
    async fn insert_many(
        &self,
        database: &str,
        collection: &str,
        documents: &[ReferenceDocument],
    ) -> Result<Vec<String>, StoreError>;

    /// Every document in a collection. A missing collection is empty.
    async fn find_all(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<Vec<ReferenceDocument>, StoreError>;
}
