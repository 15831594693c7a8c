use thiserror::Error;

use crate::domain::record::{RecordBatch, RecordId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordStoreError {
    #[error("Request to the record store failed")]
    RequestFailed,
    #[error("Record store answered with status {0}")]
    UnexpectedStatus(u16),
    #[error("Record store response could not be parsed")]
    InvalidResponse,
}

#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Every record whose `exported` flag is false, in store order. An empty batch is not an
    /// error.
    async fn fetch_unexported(&self) -> error_stack::Result<RecordBatch, RecordStoreError>;

    /// Sets `exported = true` on the given records. Stops at the first failed request; records
    /// not reached yet keep their flag.
    async fn mark_exported(&self, ids: &[RecordId]) -> error_stack::Result<(), RecordStoreError>;

    /// Cheap read that proves the store is reachable with the configured key.
    async fn check_access(&self) -> error_stack::Result<(), RecordStoreError>;
}
