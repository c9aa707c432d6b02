mod mongo_store;

pub use mongo_store::MongoStore;

use footstats_core::{DocumentStore, StoreError};

use crate::config::Config;

/// Connect to the configured server and run the health check.
pub async fn init_store(config: &Config) -> Result<MongoStore, StoreError> {
    tracing::info!("Connecting to {}", config.redacted_uri());

    let store = MongoStore::connect(&config.mongodb_uri.value).await?;
    store.ping().await.inspect_err(|e| {
        tracing::error!("Problem connecting to database cluster: {}", e);
    })?;

    Ok(store)
}
