// Store port for complaint persistence and reads
use crate::domain::complaint::ComplaintRecord;
use crate::domain::dashboard::ComplaintSummary;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

type Cause = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or did not answer in time.
    #[error("complaint store unreachable: {0}")]
    Unreachable(#[source] Cause),

    /// The store answered but refused or garbled the operation.
    #[error("complaint store rejected the request: {0}")]
    Rejected(#[source] Cause),
}

impl StoreError {
    pub fn unreachable(cause: impl Into<Cause>) -> Self {
        StoreError::Unreachable(cause.into())
    }

    pub fn rejected(cause: impl Into<Cause>) -> Self {
        StoreError::Rejected(cause.into())
    }
}

#[async_trait]
pub trait ComplaintStore: Send + Sync {
    /// Insert one complaint row and return the rows as the store wrote them
    async fn insert_complaint(&self, record: &ComplaintRecord) -> Result<Vec<Value>, StoreError>;

    /// Read the location and status of every stored complaint
    async fn list_summaries(&self) -> Result<Vec<ComplaintSummary>, StoreError>;
}
