//! Warehouse access — the read-only query executor behind every endpoint.
//!
//! Handlers never touch SQL directly; they go through `Arc<dyn Warehouse>` in
//! `AppState`, so tests can substitute the in-memory implementation.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::flags::definition::FlagDefinition;
use crate::models::client::ClientSummaryRow;
use crate::models::flag::FlagRow;

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::{create_pool, PgWarehouse};

#[async_trait]
pub trait Warehouse: Send + Sync {
    /// Rows matching a flag definition. Ordering and distinctness are
    /// re-applied by the caller, so implementations need not guarantee them.
    async fn flag_rows(&self, definition: &FlagDefinition) -> Result<Vec<FlagRow>, AppError>;

    /// Posting totals for the poster with this email, or `None` if no poster matches.
    async fn client_summary(&self, email: &str) -> Result<Option<ClientSummaryRow>, AppError>;
}
