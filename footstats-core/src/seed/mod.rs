//! The one-shot seed run.
//!
//! Steps run strictly in order and the first failure aborts the run:
//!
//! 1. select the target database (implicit, nothing is written)
//! 2. create the principal
//! 3. drop the reference collection
//! 4. insert the reference documents
//!
//! Principal creation is not idempotent by default: a second run fails at
//! step 2. [`PrincipalPolicy::CreateIfAbsent`] checks first and skips it.

mod plan;
mod verify;

pub use plan::{SeedPlan, CONTINENTS_COLLECTION, DATABASE, PRINCIPAL_NAME, PRINCIPAL_SECRET};
pub use verify::{verify_seed, VerifyReport};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::store::{DocumentStore, StoreError};

/// A step of the seed run, used to label failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedStep {
    Connect,
    SelectDatabase,
    CreatePrincipal,
    DropCollection,
    InsertDocuments,
}

impl std::fmt::Display for SeedStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedStep::Connect => write!(f, "connect"),
            SeedStep::SelectDatabase => write!(f, "select database"),
            SeedStep::CreatePrincipal => write!(f, "create principal"),
            SeedStep::DropCollection => write!(f, "drop collection"),
            SeedStep::InsertDocuments => write!(f, "insert documents"),
        }
    }
}

/// A fatal seed failure.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedError {
    pub step: SeedStep,
    pub source: StoreError,
}

impl SeedError {
    fn at(step: SeedStep) -> impl FnOnce(StoreError) -> SeedError {
        move |source| SeedError { step, source }
    }
}

impl std::fmt::Display for SeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seed step '{}' failed: {}", self.step, self.source)
    }
}

impl std::error::Error for SeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// How to treat a principal that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrincipalPolicy {
    /// Always issue create; the store rejects a duplicate and the run aborts.
    #[default]
    Create,
    /// Look the principal up first and skip creation if present.
    CreateIfAbsent,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SeedOptions {
    pub principal_policy: PrincipalPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalOutcome {
    Created,
    AlreadyPresent,
}

/// What a successful run did.
#[derive(Debug, Clone, Serialize)]
pub struct SeedReport {
    pub database: String,
    pub principal: String,
    pub principal_outcome: PrincipalOutcome,
    pub collection: String,
    pub inserted_ids: Vec<String>,
    pub completed_at: DateTime<Utc>,
}

/// Run the seed plan against `store`.
pub async fn run_seed<S: DocumentStore>(
    store: &S,
    plan: &SeedPlan,
    options: SeedOptions,
) -> Result<SeedReport, SeedError> {
    let database = plan.database.as_str();
    let principal = &plan.principal;

    tracing::info!("Selecting database '{}'", database);
    if database.is_empty() {
        return Err(SeedError {
            step: SeedStep::SelectDatabase,
            source: StoreError::Command {
                code: None,
                message: "database name must not be empty".to_string(),
            },
        });
    }

    let principal_outcome = match options.principal_policy {
        PrincipalPolicy::CreateIfAbsent => {
            let existing = store
                .find_user(database, &principal.name)
                .await
                .map_err(SeedError::at(SeedStep::CreatePrincipal))
                .inspect_err(log_failure)?;
            if existing.is_some() {
                tracing::info!(
                    "User '{}' already exists on '{}', skipping creation",
                    principal.name,
                    database
                );
                PrincipalOutcome::AlreadyPresent
            } else {
                create_principal(store, plan).await?
            }
        }
        PrincipalPolicy::Create => create_principal(store, plan).await?,
    };

    tracing::info!("Dropping collection '{}.{}'", database, plan.collection);
    store
        .drop_collection(database, &plan.collection)
        .await
        .map_err(SeedError::at(SeedStep::DropCollection))
        .inspect_err(log_failure)?;
    tracing::info!("Dropped collection '{}.{}'", database, plan.collection);

    tracing::info!(
        "Inserting {} document(s) into '{}.{}'",
        plan.documents.len(),
        database,
        plan.collection
    );
    let inserted_ids = store
        .insert_many(database, &plan.collection, &plan.documents)
        .await
        .map_err(SeedError::at(SeedStep::InsertDocuments))
        .inspect_err(log_failure)?;
    tracing::info!("Inserted {} document(s)", inserted_ids.len());

    Ok(SeedReport {
        database: database.to_string(),
        principal: principal.name.clone(),
        principal_outcome,
        collection: plan.collection.clone(),
        inserted_ids,
        completed_at: Utc::now(),
    })
}

async fn create_principal<S: DocumentStore>(
    store: &S,
    plan: &SeedPlan,
) -> Result<PrincipalOutcome, SeedError> {
    let principal = &plan.principal;
    tracing::info!(
        "Creating user '{}' on '{}' with roles [{}]",
        principal.name,
        plan.database,
        principal
            .roles
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    store
        .create_user(&plan.database, principal)
        .await
        .map_err(SeedError::at(SeedStep::CreatePrincipal))
        .inspect_err(log_failure)?;
    tracing::info!("Created user '{}' on '{}'", principal.name, plan.database);
    Ok(PrincipalOutcome::Created)
}

fn log_failure(e: &SeedError) {
    tracing::error!("{}", e);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Continent, RoleGrant};
    use crate::store::MemoryStore;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    async fn names(store: &MemoryStore) -> Vec<String> {
        store
            .find_all(DATABASE, CONTINENTS_COLLECTION)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect()
    }

    #[tokio::test]
    async fn test_fresh_run_creates_principal_and_continents() {
        let store = MemoryStore::new();
        let plan = SeedPlan::footstats();

        let report = run_seed(&store, &plan, SeedOptions::default())
            .await
            .unwrap();

        assert_eq!(report.principal_outcome, PrincipalOutcome::Created);
        assert_eq!(report.inserted_ids.len(), 7);

        let users = store.list_users(DATABASE).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "vr3n");
        assert_eq!(users[0].roles, vec![RoleGrant::db_owner("footstats")]);

        let stored = names(&store).await;
        let expected: Vec<String> = Continent::ALL.iter().map(|c| c.name().to_string()).collect();
        assert_eq!(stored, expected);
        let unique: HashSet<_> = stored.iter().collect();
        assert_eq!(unique.len(), 7);
    }

    #[tokio::test]
    async fn test_run_logs_each_completed_step() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let store = MemoryStore::new();
        run_seed(&store, &SeedPlan::footstats(), SeedOptions::default())
            .await
            .unwrap();

        let out = logs.contents();
        let created = out.find("Created user 'vr3n' on 'footstats'").unwrap();
        let dropping = out.find("Dropping collection 'footstats.continents'").unwrap();
        let dropped = out.find("Dropped collection 'footstats.continents'").unwrap();
        let inserted = out.find("Inserted 7 document(s)").unwrap();
        assert!(created < dropping);
        assert!(dropping < dropped);
        assert!(dropped < inserted);
    }

    #[tokio::test]
    async fn test_aborted_run_logs_no_completions() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let store = MemoryStore::unreachable();
        run_seed(&store, &SeedPlan::footstats(), SeedOptions::default())
            .await
            .unwrap_err();

        let out = logs.contents();
        assert!(!out.contains("Created user"));
        assert!(!out.contains("Dropped collection"));
    }

    #[tokio::test]
    async fn test_second_run_fails_at_create_principal() {
        let store = MemoryStore::new();
        let plan = SeedPlan::footstats();
        run_seed(&store, &plan, SeedOptions::default()).await.unwrap();

        let err = run_seed(&store, &plan, SeedOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.step, SeedStep::CreatePrincipal);
        assert!(matches!(
            err.source,
            StoreError::DuplicatePrincipal { ref name, .. } if name == "vr3n"
        ));
        // The run aborted before the reset; the first run's data is intact.
        assert_eq!(names(&store).await.len(), 7);
    }

    #[tokio::test]
    async fn test_create_if_absent_makes_rerun_idempotent() {
        let store = MemoryStore::new();
        let plan = SeedPlan::footstats();
        let options = SeedOptions {
            principal_policy: PrincipalPolicy::CreateIfAbsent,
        };

        let first = run_seed(&store, &plan, options).await.unwrap();
        let second = run_seed(&store, &plan, options).await.unwrap();

        assert_eq!(first.principal_outcome, PrincipalOutcome::Created);
        assert_eq!(second.principal_outcome, PrincipalOutcome::AlreadyPresent);
        assert_eq!(store.list_users(DATABASE).await.unwrap().len(), 1);
        assert_eq!(names(&store).await.len(), 7);
        // Fresh documents replace the old ones.
        let ids = store.document_ids(DATABASE, CONTINENTS_COLLECTION).await;
        assert_eq!(ids, second.inserted_ids);
    }

    #[tokio::test]
    async fn test_reset_removes_prior_contents() {
        let store = MemoryStore::new();
        store
            .insert_many(
                DATABASE,
                CONTINENTS_COLLECTION,
                &[
                    crate::models::ReferenceDocument::new("Atlantis"),
                    Continent::Asia.document(),
                ],
            )
            .await
            .unwrap();

        run_seed(&store, &SeedPlan::footstats(), SeedOptions::default())
            .await
            .unwrap();

        let stored = names(&store).await;
        assert_eq!(stored.len(), 7);
        assert!(!stored.contains(&"Atlantis".to_string()));
        assert_eq!(stored.iter().filter(|n| *n == "Asia").count(), 1);
    }

    #[tokio::test]
    async fn test_connection_failure_is_fatal_at_first_step() {
        let store = MemoryStore::unreachable();
        let err = run_seed(&store, &SeedPlan::footstats(), SeedOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.step, SeedStep::CreatePrincipal);
        assert!(err.source.is_connection_error());
    }

    #[tokio::test]
    async fn test_insert_failure_is_fatal() {
        let store = MemoryStore::new()
            .fail_inserts(StoreError::InvalidDocument("bad payload".to_string()));

        let err = run_seed(&store, &SeedPlan::footstats(), SeedOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.step, SeedStep::InsertDocuments);
        assert!(err.to_string().contains("insert documents"));
        // Steps before the failure already took effect.
        assert!(store.find_user(DATABASE, "vr3n").await.unwrap().is_some());
        assert!(!store.collection_exists(DATABASE, CONTINENTS_COLLECTION).await);
    }

    #[tokio::test]
    async fn test_empty_database_name_rejected() {
        let store = MemoryStore::new();
        let mut plan = SeedPlan::footstats();
        plan.database.clear();

        let err = run_seed(&store, &plan, SeedOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.step, SeedStep::SelectDatabase);
    }
}
