//! In-process document store.

use std::collections::{BTreeMap, HashMap};

use tokio::sync::Mutex;

use super::{DocumentStore, StoreError};
use crate::models::{Principal, ReferenceDocument, UserInfo};

#[derive(Debug, Default)]
struct Database {
    users: BTreeMap<String, UserInfo>,
    collections: HashMap<String, Vec<(String, ReferenceDocument)>>,
}

#[derive(Debug, Default)]
struct State {
    databases: HashMap<String, Database>,
    next_id: u64,
}

/// A [`DocumentStore`] held entirely in memory.
///
/// Mirrors the server behaviour the seed relies on: duplicate principals are
/// rejected, dropping a missing collection is a no-op, inserts create the
/// collection and get fresh identifiers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    unreachable: bool,
    insert_error: Option<StoreError>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails with a connection error.
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    /// Make every `insert_many` fail with `error`.
    pub fn fail_inserts(mut self, error: StoreError) -> Self {
        self.insert_error = Some(error);
        self
    }

    /// Whether a collection currently exists.
    pub async fn collection_exists(&self, database: &str, collection: &str) -> bool {
        let state = self.state.lock().await;
        state
            .databases
            .get(database)
            .is_some_and(|db| db.collections.contains_key(collection))
    }

    /// Identifiers currently stored in a collection, in insertion order.
    pub async fn document_ids(&self, database: &str, collection: &str) -> Vec<String> {
        let state = self.state.lock().await;
        state
            .databases
            .get(database)
            .and_then(|db| db.collections.get(collection))
            .map(|docs| docs.iter().map(|(id, _)| id.clone()).collect())
            .unwrap_or_default()
    }

    fn check_reachable(&self) -> Result<(), StoreError> {
        if self.unreachable {
            return Err(StoreError::Connection(
                "server selection timed out".to_string(),
            ));
        }
        Ok(())
    }
}

impl DocumentStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.check_reachable()
    }

    async fn find_user(
        &self,
        database: &str,
        name: &str,
    ) -> Result<Option<UserInfo>, StoreError> {
        self.check_reachable()?;
        let state = self.state.lock().await;
        Ok(state
            .databases
            .get(database)
            .and_then(|db| db.users.get(name))
            .cloned())
    }

    async fn list_users(&self, database: &str) -> Result<Vec<UserInfo>, StoreError> {
        self.check_reachable()?;
        let state = self.state.lock().await;
        Ok(state
            .databases
            .get(database)
            .map(|db| db.users.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn create_user(&self, database: &str, principal: &Principal) -> Result<(), StoreError> {
        self.check_reachable()?;
        let mut state = self.state.lock().await;
        let db = state.databases.entry(database.to_string()).or_default();

        if db.users.contains_key(&principal.name) {
            return Err(StoreError::DuplicatePrincipal {
                name: principal.name.clone(),
                database: database.to_string(),
            });
        }

        db.users.insert(
            principal.name.clone(),
            UserInfo {
                name: principal.name.clone(),
                database: database.to_string(),
                roles: principal.roles.clone(),
            },
        );
        Ok(())
    }

    async fn drop_collection(&self, database: &str, collection: &str) -> Result<(), StoreError> {
        self.check_reachable()?;
        let mut state = self.state.lock().await;
        if let Some(db) = state.databases.get_mut(database) {
            db.collections.remove(collection);
        }
        Ok(())
    }

    async fn insert_many(
        &self,
        database: &str,
        collection: &str,
        documents: &[ReferenceDocument],
    ) -> Result<Vec<String>, StoreError> {
        self.check_reachable()?;
        if let Some(e) = &self.insert_error {
            return Err(e.clone());
        }

        let mut state = self.state.lock().await;
        let mut ids = Vec::with_capacity(documents.len());
        let mut assigned = Vec::with_capacity(documents.len());
        for doc in documents {
            state.next_id += 1;
            let id = format!("{:024x}", state.next_id);
            ids.push(id.clone());
            assigned.push((id, doc.clone()));
        }

        state
            .databases
            .entry(database.to_string())
            .or_default()
            .collections
            .entry(collection.to_string())
            .or_default()
            .extend(assigned);

        Ok(ids)
    }

    async fn find_all(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<Vec<ReferenceDocument>, StoreError> {
        self.check_reachable()?;
        let state = self.state.lock().await;
        Ok(state
            .databases
            .get(database)
            .and_then(|db| db.collections.get(collection))
            .map(|docs| docs.iter().map(|(_, doc)| doc.clone()).collect())
            .unwrap_or_default())
    }
}
