// Dashboard service - Use case for aggregating complaint statistics
use crate::application::error::GatewayError;
use crate::application::store_handle::StoreHandle;
use crate::domain::dashboard::DashboardStats;
use std::time::Duration;

#[derive(Clone)]
pub struct DashboardService {
    store: StoreHandle,
    timeout: Duration,
    zone_limit: usize,
}

impl DashboardService {
    pub fn new(store: StoreHandle, timeout: Duration, zone_limit: usize) -> Self {
        Self {
            store,
            timeout,
            zone_limit,
        }
    }

    pub async fn get_stats(&self) -> Result<DashboardStats, GatewayError> {
        let store = self.store.store()?;

        let summaries = tokio::time::timeout(self.timeout, store.list_summaries())
            .await
            .map_err(|_| GatewayError::timed_out(self.timeout))??;

        tracing::debug!("Aggregating {} complaints for dashboard", summaries.len());
        Ok(DashboardStats::aggregate(&summaries, self.zone_limit))
    }
}
