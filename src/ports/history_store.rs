//! History Store Port - persistence seam for calculation history.

use async_trait::async_trait;

use crate::domain::{CalculationRecord, NewCalculation};

/// Port for the hosted calculation-history store.
///
/// Records are write-once: nothing in the system updates or deletes them,
/// and the store grows unboundedly (an accepted non-goal).
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Durably inserts a calculation and returns the stored row with the
    /// store-assigned id and creation timestamp.
    async fn append(&self, new: &NewCalculation) -> Result<CalculationRecord, StoreError>;

    /// Returns the most recent records, newest first.
    async fn list_recent(&self, limit: usize) -> Result<Vec<CalculationRecord>, StoreError>;
}

/// Persistence I/O failures.
///
/// These are logged and surfaced to the caller; the view keeps its previous
/// state instead of crashing.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Request never reached the store or the connection dropped.
    #[error("store network error: {0}")]
    Network(String),

    /// The store rejected the credentials.
    #[error("store authentication rejected: {0}")]
    Auth(String),

    /// The store answered with something the adapter cannot interpret
    /// (schema drift, unexpected status, malformed body).
    #[error("unexpected store response: {0}")]
    Unexpected(String),
}
