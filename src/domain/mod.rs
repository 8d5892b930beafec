// Domain layer - Complaint model, validation and dashboard aggregation
pub mod complaint;
pub mod dashboard;
pub mod validation;
