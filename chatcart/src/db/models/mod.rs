//! Database record models matching table schemas.
//!
//! Each struct here corresponds directly to a table row and derives
//! `sqlx::FromRow` for query results. Database models are kept distinct from the
//! API models in [`crate::api::models`] so the storage and API representations
//! can evolve independently; conversions are plain `From` impls on the API side.

pub mod conversations;
pub mod messages;
pub mod orders;
pub mod products;
pub mod settings;
