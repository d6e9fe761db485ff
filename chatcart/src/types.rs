//! Common type definitions.
//!
//! All entity IDs are UUIDs wrapped in type aliases for readability:
//!
//! - [`AccountId`]: the tenant key scoping conversations, orders, and settings
//! - [`ConversationId`], [`MessageId`], [`OrderId`], [`ProductId`]: row identifiers

use uuid::Uuid;

// Type aliases for IDs
pub type AccountId = Uuid;
pub type ConversationId = Uuid;
pub type MessageId = Uuid;
pub type OrderId = Uuid;
pub type ProductId = Uuid;

/// Abbreviate a UUID to its first 8 characters for more readable logs and traces
/// Example: "550e8400-e29b-41d4-a716-446655440000" -> "550e8400"
pub fn abbrev_uuid(uuid: &Uuid) -> String {
    uuid.to_string().chars().take(8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbrev_uuid_takes_first_eight_chars() {
        let id: Uuid = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        assert_eq!(abbrev_uuid(&id), "550e8400");
    }
}
