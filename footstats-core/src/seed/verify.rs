use std::collections::BTreeMap;

use serde::Serialize;

use super::SeedPlan;
use crate::store::{DocumentStore, StoreError};

/// Result of checking a store against a seed plan.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VerifyReport {
    pub principal_present: bool,
    pub principal_roles_ok: bool,
    pub document_count: usize,
    /// Expected names that are not in the collection.
    pub missing: Vec<String>,
    /// Names in the collection that are not in the plan.
    pub unexpected: Vec<String>,
    /// Names stored more than once.
    pub duplicates: Vec<String>,
}

impl VerifyReport {
    pub fn is_ok(&self) -> bool {
        self.principal_present
            && self.principal_roles_ok
            && self.missing.is_empty()
            && self.unexpected.is_empty()
            && self.duplicates.is_empty()
    }
}

/// Check that the principal exists with every planned role and that the
/// collection holds exactly the planned documents.
pub async fn verify_seed<S: DocumentStore>(
    store: &S,
    plan: &SeedPlan,
) -> Result<VerifyReport, StoreError> {
    let user = store
        .find_user(&plan.database, &plan.principal.name)
        .await?;
    let principal_present = user.is_some();
    let principal_roles_ok = user
        .as_ref()
        .is_some_and(|u| plan.principal.roles.iter().all(|r| u.has_role(r)));

    let documents = store.find_all(&plan.database, &plan.collection).await?;

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for doc in &documents {
        *counts.entry(doc.name.as_str()).or_default() += 1;
    }

    let missing = plan
        .documents
        .iter()
        .filter(|d| !counts.contains_key(d.name.as_str()))
        .map(|d| d.name.clone())
        .collect();
    let unexpected = counts
        .keys()
        .filter(|name| !plan.documents.iter().any(|d| d.name == **name))
        .map(|name| name.to_string())
        .collect();
    let duplicates = counts
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(name, _)| name.to_string())
        .collect();

    let report = VerifyReport {
        principal_present,
        principal_roles_ok,
        document_count: documents.len(),
        missing,
        unexpected,
        duplicates,
    };

    if report.is_ok() {
        tracing::info!("Seed verified: {} document(s)", report.document_count);
    } else {
        tracing::warn!("Seed verification failed: {:?}", report);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Principal, ReferenceDocument, RoleGrant};
    use crate::seed::{run_seed, SeedOptions};
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_verify_after_seed() {
        let store = MemoryStore::new();
        let plan = SeedPlan::footstats();
        run_seed(&store, &plan, SeedOptions::default()).await.unwrap();

        let report = verify_seed(&store, &plan).await.unwrap();
        assert!(report.is_ok());
        assert_eq!(report.document_count, 7);
    }

    #[tokio::test]
    async fn test_verify_empty_store() {
        let store = MemoryStore::new();
        let report = verify_seed(&store, &SeedPlan::footstats()).await.unwrap();

        assert!(!report.is_ok());
        assert!(!report.principal_present);
        assert_eq!(report.missing.len(), 7);
    }

    #[tokio::test]
    async fn test_verify_detects_wrong_role_and_stray_documents() {
        let store = MemoryStore::new();
        let plan = SeedPlan::footstats();
        store
            .create_user(
                &plan.database,
                &Principal::new("vr3n", "x", vec![RoleGrant::new("read", "footstats")]),
            )
            .await
            .unwrap();
        let mut docs = plan.documents.clone();
        docs.push(ReferenceDocument::new("Atlantis"));
        docs.push(ReferenceDocument::new("Europe"));
        store
            .insert_many(&plan.database, &plan.collection, &docs)
            .await
            .unwrap();

        let report = verify_seed(&store, &plan).await.unwrap();
        assert!(report.principal_present);
        assert!(!report.principal_roles_ok);
        assert_eq!(report.unexpected, vec!["Atlantis".to_string()]);
        assert_eq!(report.duplicates, vec!["Europe".to_string()]);
        assert!(report.missing.is_empty());
        assert_eq!(report.document_count, 9);
    }
}
