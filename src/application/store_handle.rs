// Injected store handle with an explicit unconfigured state
use crate::application::complaint_store::ComplaintStore;
use crate::application::error::GatewayError;
use std::sync::Arc;

#[derive(Clone)]
pub enum StoreHandle {
    Connected(Arc<dyn ComplaintStore>),
    /// Credentials were missing at startup. Stays this way for the process lifetime.
    Unconfigured,
}

impl StoreHandle {
    pub fn connected(store: Arc<dyn ComplaintStore>) -> Self {
        StoreHandle::Connected(store)
    }

    pub fn store(&self) -> Result<&Arc<dyn ComplaintStore>, GatewayError> {
        match self {
            StoreHandle::Connected(store) => Ok(store),
            StoreHandle::Unconfigured => Err(GatewayError::not_configured()),
        }
    }
}

impl std::fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreHandle::Connected(_) => f.write_str("StoreHandle::Connected"),
            StoreHandle::Unconfigured => f.write_str("StoreHandle::Unconfigured"),
        }
    }
}
