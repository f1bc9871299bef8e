use std::sync::Arc;

use crate::warehouse::Warehouse;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Read-only warehouse executor. Postgres in production, in-memory in tests.
    pub warehouse: Arc<dyn Warehouse>,
}

impl AppState {
    pub fn new(warehouse: Arc<dyn Warehouse>) -> Self {
        AppState { warehouse }
    }
}
