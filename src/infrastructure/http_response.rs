// HTTP response mapping for gateway errors
use crate::application::error::GatewayError;
use crate::domain::validation::{FieldIssue, ValidationError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub detail: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldIssue>,
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            GatewayError::Validation(ValidationError::MalformedBody(_)) => "malformed_body",
            GatewayError::Validation(ValidationError::InvalidFields(_)) => "validation_failed",
            GatewayError::ServiceUnavailable { .. } => "service_unavailable",
            GatewayError::Persistence(_) => "persistence_failed",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, "{}", self);
        } else if let GatewayError::Validation(err) = &self {
            tracing::warn!(fields = ?err.field_names(), "Rejected complaint: {}", err);
        }

        let fields = match &self {
            GatewayError::Validation(err) => err.issues().to_vec(),
            _ => Vec::new(),
        };
        let body = ErrorBody {
            error: self.code(),
            detail: self.to_string(),
            fields,
        };

        (status, Json(body)).into_response()
    }
}
