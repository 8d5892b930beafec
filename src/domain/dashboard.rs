// Dashboard domain model
use crate::domain::complaint::ComplaintStatus;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The columns of a stored complaint the dashboard needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ComplaintSummary {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl ComplaintSummary {
    pub fn new(location: Option<&str>, status: Option<&str>) -> Self {
        Self {
            location: location.map(str::to_string),
            status: status.map(str::to_string),
        }
    }

    fn is_resolved(&self) -> bool {
        self.status.as_deref().and_then(ComplaintStatus::parse) == Some(ComplaintStatus::Resolved)
    }

    fn zone(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|zone| !zone.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_complaints: u64,
    pub resolved: u64,
    pub pending: u64,
    pub critical_zones: Vec<String>,
}

impl DashboardStats {
    /// Fold stored complaints into dashboard counts.
    ///
    /// Anything not `Resolved` counts as pending. Zones are ranked by
    /// complaint count, highest first, ties by name, and cut to `zone_limit`.
    pub fn aggregate<'a, I>(summaries: I, zone_limit: usize) -> Self
    where
        I: IntoIterator<Item = &'a ComplaintSummary>,
    {
        let mut total = 0u64;
        let mut resolved = 0u64;
        let mut per_zone: HashMap<&str, u64> = HashMap::new();

        for summary in summaries {
            total += 1;
            if summary.is_resolved() {
                resolved += 1;
            }
            if let Some(zone) = summary.zone() {
                *per_zone.entry(zone).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(&str, u64)> = per_zone.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        Self {
            total_complaints: total,
            resolved,
            pending: total - resolved,
            critical_zones: ranked
                .into_iter()
                .take(zone_limit)
                .map(|(zone, _)| zone.to_string())
                .collect(),
        }
    }
}
