// Application error taxonomy
use crate::application::complaint_store::StoreError;
use crate::domain::validation::ValidationError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("service unavailable: {reason}")]
    ServiceUnavailable {
        reason: String,
        #[source]
        source: Option<StoreError>,
    },

    #[error("persistence failure: {0}")]
    Persistence(#[source] StoreError),
}

impl GatewayError {
    pub fn not_configured() -> Self {
        GatewayError::ServiceUnavailable {
            reason: "complaint store is not configured".to_string(),
            source: None,
        }
    }

    pub fn timed_out(after: Duration) -> Self {
        GatewayError::ServiceUnavailable {
            reason: format!("complaint store did not answer within {}ms", after.as_millis()),
            source: None,
        }
    }
}

impl From<StoreError> for GatewayError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unreachable(_) => GatewayError::ServiceUnavailable {
                reason: err.to_string(),
                source: Some(err),
            },
            StoreError::Rejected(_) => GatewayError::Persistence(err),
        }
    }
}
