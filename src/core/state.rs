// Application state (AppState)

use crate::core::config::Config;
use crate::stores::{gift_store::GiftStore, session_store::SessionStore, user_directory::UserDirectory};
use std::sync::Arc;

/// Shared application state
///
/// Built once at startup and handed to every request handler. Nothing in
/// here is reloaded while the process runs.
#[derive(Clone)]
pub struct AppState {
    /// Record store holding lists, gifts and comments
    pub store: Arc<dyn GiftStore>,

    /// Users allowed to log in
    pub users: Arc<UserDirectory>,

    /// Active login sessions
    pub sessions: Arc<SessionStore>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn GiftStore>, users: UserDirectory) -> Self {
        Self {
            store,
            users: Arc::new(users),
            sessions: Arc::new(SessionStore::new()),
            config: Arc::new(config),
        }
    }
}
