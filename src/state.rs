use std::sync::Arc;

use crate::catalog::Catalog;
use crate::db::messages::MessageStore;

/// Shared application state available to all handlers via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// Seed catalog, read-only after startup.
    pub catalog: Arc<Catalog>,
    /// Contact message store. `None` when no database is configured.
    pub messages: Option<Arc<dyn MessageStore>>,
}

impl AppState {
    pub fn new(catalog: Catalog, messages: Option<Arc<dyn MessageStore>>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            messages,
        }
    }

    pub fn message_store(&self) -> Option<&dyn MessageStore> {
        self.messages.as_deref()
    }
}
