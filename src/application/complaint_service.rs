// Complaint service - Use case for logging a validated complaint
use crate::application::error::GatewayError;
use crate::application::store_handle::StoreHandle;
use crate::domain::complaint::Complaint;
use serde_json::Value;
use std::time::Duration;

#[derive(Clone)]
pub struct ComplaintService {
    store: StoreHandle,
    timeout: Duration,
}

impl ComplaintService {
    pub fn new(store: StoreHandle, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Write one complaint with status `Open`. Single attempt, no deduplication.
    pub async fn log_complaint(&self, complaint: Complaint) -> Result<Vec<Value>, GatewayError> {
        let store = self.store.store()?;
        let record = complaint.into_open_record();

        let inserted = tokio::time::timeout(self.timeout, store.insert_complaint(&record))
            .await
            .map_err(|_| GatewayError::timed_out(self.timeout))??;

        tracing::info!(
            location = %record.location,
            urgency = %record.urgency,
            rows = inserted.len(),
            "Logged complaint"
        );
        Ok(inserted)
    }
}
