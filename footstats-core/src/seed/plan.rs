use serde::Serialize;

use crate::models::{continent_documents, Principal, ReferenceDocument, RoleGrant};

pub const DATABASE: &str = "footstats";
pub const PRINCIPAL_NAME: &str = "vr3n";
pub const PRINCIPAL_SECRET: &str = "footyxg";
pub const CONTINENTS_COLLECTION: &str = "continents";

/// Everything one seed run writes.
#[derive(Debug, Clone, Serialize)]
pub struct SeedPlan {
    pub database: String,
    #[serde(skip)]
    pub principal: Principal,
    pub collection: String,
    pub documents: Vec<ReferenceDocument>,
}

impl SeedPlan {
    /// The footstats bootstrap: `vr3n` as owner of `footstats`, and the
    /// `continents` reference collection.
    pub fn footstats() -> Self {
        Self {
            database: DATABASE.to_string(),
            principal: Principal::new(
                PRINCIPAL_NAME,
                PRINCIPAL_SECRET,
                vec![RoleGrant::db_owner(DATABASE)],
            ),
            collection: CONTINENTS_COLLECTION.to_string(),
            documents: continent_documents(),
        }
    }
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self::footstats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footstats_plan() {
        let plan = SeedPlan::footstats();
        assert_eq!(plan.database, "footstats");
        assert_eq!(plan.principal.name, "vr3n");
        assert_eq!(plan.principal.secret, "footyxg");
        assert_eq!(plan.principal.roles, vec![RoleGrant::db_owner("footstats")]);
        assert_eq!(plan.collection, "continents");
        assert_eq!(plan.documents.len(), 7);
    }

    #[test]
    fn test_plan_json_omits_principal() {
        let json = serde_json::to_string(&SeedPlan::footstats()).unwrap();
        assert!(!json.contains("footyxg"));
        assert!(json.contains("North America"));
    }
}
