//! Axum route handlers for all API endpoints.

pub mod conversations;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod settings;
