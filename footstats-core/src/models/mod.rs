mod continent;
mod principal;

pub use continent::{continent_documents, Continent, ReferenceDocument};
pub use principal::{Principal, RoleGrant, UserInfo};
