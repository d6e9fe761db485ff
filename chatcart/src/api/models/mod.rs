//! Request/response data structures for API communication.

pub mod conversations;
pub mod messages;
pub mod orders;
pub mod products;
pub mod settings;
