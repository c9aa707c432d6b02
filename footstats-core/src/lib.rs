//! Footstats Core Library
//!
//! Environment bootstrap for footstats: the database seed plan and the
//! utility-CSS scan declaration.

pub mod models;
pub mod seed;
pub mod store;
pub mod style;

pub use models::{Continent, Principal, ReferenceDocument, RoleGrant, UserInfo};
pub use seed::{
    run_seed, verify_seed, PrincipalOutcome, PrincipalPolicy, SeedError, SeedOptions, SeedPlan,
    SeedReport, SeedStep, VerifyReport,
};
pub use store::{DocumentStore, MemoryStore, StoreError};
pub use style::{render_tailwind_config, Breakpoint, ScanConfig};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
