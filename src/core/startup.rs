use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{error, info};

use crate::api::client::RestStore;
use crate::core::config::{Config, StoreConfig};
use crate::core::state::AppState;
use crate::stores::gift_store::{GiftStore, TABLES};
use crate::stores::user_directory::UserDirectory;

/// Load the user directory and connect the record store
pub fn build_state(config: Config, store_config: &StoreConfig) -> Result<AppState> {
    let users = UserDirectory::from_file(&config.users.path)
        .context("Failed to load user directory")?;

    info!(
        path = %config.users.path.display(),
        users = users.len(),
        "User directory loaded"
    );

    let store = RestStore::new(store_config).context("Failed to create record store client")?;

    info!(endpoint = %store_config.endpoint, "Record store client created");

    Ok(AppState::new(config, Arc::new(store), users))
}

/// Check every table once. A failure is reported but does not stop startup:
/// each request will surface its own store error.
pub async fn check_store(store: &dyn GiftStore) -> bool {
    match store.check_tables().await {
        Ok(()) => {
            info!(tables = ?TABLES, "Record store tables reachable");
            true
        }
        Err(e) => {
            error!(
                error = %e,
                tables = ?TABLES,
                "Record store check failed; make sure the schema has been created"
            );
            false
        }
    }
}
