// Complaint domain model
use serde::{Deserialize, Serialize};

/// Collection that holds every complaint in the store.
pub const COMPLAINTS_TABLE: &str = "complaints";

/// A complaint that passed schema validation.
///
/// Only [`crate::domain::validation::validate_complaint`] builds these from
/// untrusted input, so every field is present and non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Complaint {
    pub location: String,
    pub issue: String,
    pub urgency: String,
}

impl Complaint {
    pub fn new(location: String, issue: String, urgency: String) -> Self {
        Self {
            location,
            issue,
            urgency,
        }
    }

    /// Build the row written to the store. Status is always assigned here.
    pub fn into_open_record(self) -> ComplaintRecord {
        ComplaintRecord {
            location: self.location,
            issue: self.issue,
            urgency: self.urgency,
            status: ComplaintStatus::Open.as_str().to_string(),
        }
    }
}

/// Row layout of the `complaints` collection as written by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintRecord {
    pub location: String,
    pub issue: String,
    pub urgency: String,
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplaintStatus {
    Open,
    InProgress,
    Resolved,
}

impl ComplaintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Open => "Open",
            ComplaintStatus::InProgress => "In Progress",
            ComplaintStatus::Resolved => "Resolved",
        }
    }

    /// Parse a status written by the gateway or by staff tooling.
    /// Matching ignores case and surrounding whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        [
            ComplaintStatus::Open,
            ComplaintStatus::InProgress,
            ComplaintStatus::Resolved,
        ]
        .into_iter()
        .find(|status| status.as_str().eq_ignore_ascii_case(raw))
    }
}
