//! Data access layer, one repository per table.

pub mod conversations;
pub mod messages;
pub mod orders;
pub mod products;
pub mod repository;
pub mod settings;

pub use repository::Repository;
