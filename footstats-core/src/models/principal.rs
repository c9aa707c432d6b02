use serde::{Deserialize, Serialize};
use std::fmt;

/// A role granted on a single database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleGrant {
    pub role: String,
    #[serde(rename = "db")]
    pub database: String,
}

impl RoleGrant {
    pub fn new(role: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            database: database.into(),
        }
    }

    /// Owner-level privileges on `database`.
    pub fn db_owner(database: impl Into<String>) -> Self {
        Self::new("dbOwner", database)
    }
}

impl fmt::Display for RoleGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.role, self.database)
    }
}

/// A credentialed principal to create on the store.
///
/// `Debug` redacts the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Principal {
    pub name: String,
    pub secret: String,
    pub roles: Vec<RoleGrant>,
}

impl Principal {
    pub fn new(name: impl Into<String>, secret: impl Into<String>, roles: Vec<RoleGrant>) -> Self {
        Self {
            name: name.into(),
            secret: secret.into(),
            roles,
        }
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Principal")
            .field("name", &self.name)
            .field("secret", &"<redacted>")
            .field("roles", &self.roles)
            .finish()
    }
}

/// A principal as reported back by the store. Carries no credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(rename = "user")]
    pub name: String,
    #[serde(rename = "db")]
    pub database: String,
    #[serde(default)]
    pub roles: Vec<RoleGrant>,
}

impl UserInfo {
    pub fn has_role(&self, grant: &RoleGrant) -> bool {
        self.roles.contains(grant)
    }
}
