// Application layer - Use cases and the store port
pub mod complaint_service;
pub mod complaint_store;
pub mod dashboard_service;
pub mod error;
pub mod store_handle;

#[cfg(test)]
pub mod memory_store;
