// In-memory store used by service and router tests
use crate::application::complaint_store::{ComplaintStore, StoreError};
use crate::domain::complaint::ComplaintRecord;
use crate::domain::dashboard::ComplaintSummary;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Unreachable,
    Rejected,
}

#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Value>>,
    failure: Option<Failure>,
    delay: Option<Duration>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(failure: Failure) -> Self {
        Self {
            failure: Some(failure),
            ..Self::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    /// Seed a row as if written by another process
    pub fn with_row(self, location: &str, status: &str) -> Self {
        {
            let mut rows = self.rows.lock().unwrap();
            let id = rows.len() + 1;
            rows.push(json!({
                "id": id,
                "location": location,
                "issue": "seeded",
                "urgency": "low",
                "status": status,
            }));
        }
        self
    }

    pub fn rows(&self) -> Vec<Value> {
        self.rows.lock().unwrap().clone()
    }

    async fn check(&self) -> Result<(), StoreError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.failure {
            Some(Failure::Unreachable) => Err(StoreError::unreachable("connection refused")),
            Some(Failure::Rejected) => Err(StoreError::rejected("violates check constraint")),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ComplaintStore for MemoryStore {
    async fn insert_complaint(&self, record: &ComplaintRecord) -> Result<Vec<Value>, StoreError> {
        self.check().await?;

        let mut rows = self.rows.lock().unwrap();
        let mut row = serde_json::to_value(record).map_err(StoreError::rejected)?;
        row["id"] = json!(rows.len() + 1);
        rows.push(row.clone());
        Ok(vec![row])
    }

    async fn list_summaries(&self) -> Result<Vec<ComplaintSummary>, StoreError> {
        self.check().await?;

        let rows = self.rows.lock().unwrap();
        rows.iter()
            .map(|row| serde_json::from_value(row.clone()).map_err(StoreError::rejected))
            .collect()
    }
}
