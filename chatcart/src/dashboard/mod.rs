//! Dashboard aggregation core.
//!
//! Pure functions that reduce already-fetched conversation, order, and product
//! collections into the KPI summary and activity feed the dashboard renders.
//! Nothing here touches the database or the clock: callers fetch the inputs and
//! pass `now` in explicitly, so every function is referentially transparent and
//! testable without infrastructure.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;
use utoipa::ToSchema;

use crate::db::models::{
    conversations::{Conversation, ConversationStatus},
    orders::Order,
    products::Product,
};

/// AI response rate reported when an account has no conversations yet.
///
/// New accounts would otherwise show a 0% rate, which reads as "the assistant is
/// broken" rather than "there is no data"; the marketing-approved placeholder is
/// shown instead until real conversations exist.
pub const AI_RESPONSE_RATE_FALLBACK: f64 = 94.2;

/// How many entries the recent-activity feed shows.
pub const ACTIVITY_FEED_LIMIT: usize = 4;

/// KPI summary for the dashboard landing screen. Recomputed on every request,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DashboardMetrics {
    /// Sum of order amounts over completed/delivered orders.
    pub total_revenue: Decimal,
    /// Distinct customers with at least one active conversation.
    pub active_customers: i64,
    pub total_conversations: i64,
    /// Percentage in [0, 100] of conversations fully handled by the assistant.
    pub ai_response_rate: f64,
    pub total_products: i64,
    pub active_products: i64,
    pub total_orders: i64,
    pub pending_orders: i64,
}

impl DashboardMetrics {
    /// The record substituted when any of the source fetches fails, so the
    /// dashboard always has something renderable.
    pub fn fallback() -> Self {
        Self {
            total_revenue: Decimal::ZERO,
            active_customers: 0,
            total_conversations: 0,
            ai_response_rate: AI_RESPONSE_RATE_FALLBACK,
            total_products: 0,
            active_products: 0,
            total_orders: 0,
            pending_orders: 0,
        }
    }
}

/// Reduce the three source collections into the dashboard KPI record.
///
/// Total functions over their inputs: unknown order statuses are ignored rather
/// than rejected, and empty collections produce the documented defaults.
pub fn compute_dashboard_metrics(conversations: &[Conversation], orders: &[Order], products: &[Product]) -> DashboardMetrics {
    let total_revenue: Decimal = orders.iter().filter(|o| o.is_completed()).map(|o| o.total_amount).sum();

    // Deduplicate on the customer identifier, not the conversation id: one
    // customer with several open threads is still one active customer.
    let active_customers = conversations
        .iter()
        .filter(|c| c.status == ConversationStatus::Active)
        .map(|c| c.customer_phone.as_str())
        .collect::<HashSet<_>>()
        .len() as i64;

    let total_conversations = conversations.len() as i64;
    let ai_handled = conversations.iter().filter(|c| c.status == ConversationStatus::AiHandled).count();
    let ai_response_rate = if total_conversations > 0 {
        (ai_handled as f64 / total_conversations as f64) * 100.0
    } else {
        AI_RESPONSE_RATE_FALLBACK
    };

    let total_products = products.len() as i64;

    DashboardMetrics {
        total_revenue,
        active_customers,
        total_conversations,
        ai_response_rate,
        total_products,
        // No activity flag is modelled on products yet, so every catalog item
        // counts as active.
        active_products: total_products,
        total_orders: orders.len() as i64,
        pending_orders: orders.iter().filter(|o| o.is_pending()).count() as i64,
    }
}

/// What kind of event an activity entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Message,
    Order,
}

/// One row of the recent-activity feed. Display-only and ephemeral.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ActivityEntry {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub customer: String,
    pub action: String,
    pub time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
}

// Carries the real event timestamp until after sorting; formatting the relative
// label is the last step so the sort never runs on display strings.
struct PendingEntry {
    kind: ActivityKind,
    customer: String,
    action: String,
    occurred_at: DateTime<Utc>,
    amount: Option<Decimal>,
}

/// Interleave recent conversation and order events into a single feed of at most
/// [`ACTIVITY_FEED_LIMIT`] entries, newest first.
///
/// Takes the first 3 conversations and first 2 orders as supplied (callers are
/// expected to have fetched them newest-first), merges on the underlying event
/// timestamps, and formats relative-time labels only after sorting. Orders carry
/// no customer reference, so the caller supplies the label used for them.
pub fn build_recent_activity(
    conversations: &[Conversation],
    orders: &[Order],
    order_customer_label: &str,
    now: DateTime<Utc>,
) -> Vec<ActivityEntry> {
    let mut pending: Vec<PendingEntry> = conversations
        .iter()
        .take(3)
        .map(|conv| PendingEntry {
            kind: ActivityKind::Message,
            customer: conv.customer_label().to_string(),
            action: conv.last_message.clone().unwrap_or_else(|| "started a conversation".to_string()),
            occurred_at: conv.last_activity_at(),
            amount: None,
        })
        .collect();

    pending.extend(orders.iter().take(2).map(|order| PendingEntry {
        kind: ActivityKind::Order,
        customer: order_customer_label.to_string(),
        action: "placed an order".to_string(),
        occurred_at: order.created_at,
        amount: Some(order.total_amount),
    }));

    pending.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
    pending.truncate(ACTIVITY_FEED_LIMIT);

    pending
        .into_iter()
        .map(|entry| ActivityEntry {
            kind: entry.kind,
            customer: entry.customer,
            action: entry.action,
            time: format_relative_age(entry.occurred_at, now),
            amount: entry.amount.map(format_currency),
        })
        .collect()
}

/// Convert an absolute timestamp into a coarse relative-age label.
///
/// Future timestamps (clock skew between writer and reader) floor to "just now"
/// rather than producing a negative count.
pub fn format_relative_age(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed_minutes = now.signed_duration_since(timestamp).num_minutes();

    if elapsed_minutes < 1 {
        "just now".to_string()
    } else if elapsed_minutes < 60 {
        format!("{elapsed_minutes} minutes ago")
    } else if elapsed_minutes < 1440 {
        format!("{} hours ago", elapsed_minutes / 60)
    } else {
        format!("{} days ago", elapsed_minutes / 1440)
    }
}

/// Fixed two-decimal, symbol-prefixed currency convention, e.g. "€1234.50".
pub fn format_currency(amount: Decimal) -> String {
    let mut value = amount;
    value.rescale(2);
    format!("€{value}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn conversation(status: ConversationStatus, phone: &str) -> Conversation {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        Conversation {
            id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            customer_phone: phone.to_string(),
            customer_name: None,
            status,
            last_message: None,
            last_message_at: None,
            created_at: created,
            updated_at: created,
        }
    }

    fn order(status: &str, amount: i64) -> Order {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        Order {
            id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            status: status.to_string(),
            total_amount: Decimal::from(amount),
            created_at: created,
            updated_at: created,
        }
    }

    fn product(name: &str) -> Product {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        Product {
            id: Uuid::new_v4(),
            account_id: None,
            name: name.to_string(),
            description: None,
            price: Decimal::new(999, 2),
            stock_quantity: 5,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn revenue_counts_only_completed_and_delivered() {
        let orders = vec![
            order("completed", 100),
            order("delivered", 40),
            order("pending", 50),
            order("cancelled", 70),
            order("", 30),
            order("shipped", 10),
        ];

        let metrics = compute_dashboard_metrics(&[], &orders, &[]);
        assert_eq!(metrics.total_revenue, Decimal::from(140));
        assert_eq!(metrics.total_orders, 6);
        assert_eq!(metrics.pending_orders, 1);
    }

    #[test]
    fn ai_response_rate_falls_back_when_no_conversations() {
        let metrics = compute_dashboard_metrics(&[], &[], &[]);
        assert_eq!(metrics.ai_response_rate, AI_RESPONSE_RATE_FALLBACK);
        assert_eq!(metrics.total_conversations, 0);
    }

    #[test]
    fn ai_response_rate_is_exact_at_boundaries() {
        let none_handled = vec![
            conversation(ConversationStatus::Active, "A"),
            conversation(ConversationStatus::Resolved, "B"),
        ];
        assert_eq!(compute_dashboard_metrics(&none_handled, &[], &[]).ai_response_rate, 0.0);

        let all_handled = vec![
            conversation(ConversationStatus::AiHandled, "A"),
            conversation(ConversationStatus::AiHandled, "B"),
        ];
        assert_eq!(compute_dashboard_metrics(&all_handled, &[], &[]).ai_response_rate, 100.0);
    }

    #[test]
    fn active_customers_deduplicates_on_phone() {
        let conversations = vec![
            conversation(ConversationStatus::Active, "+491701"),
            conversation(ConversationStatus::Active, "+491701"),
            conversation(ConversationStatus::Active, "+491702"),
            // Not active, must not count even though the phone is new
            conversation(ConversationStatus::Pending, "+491703"),
        ];

        let metrics = compute_dashboard_metrics(&conversations, &[], &[]);
        assert_eq!(metrics.active_customers, 2);
        assert_eq!(metrics.total_conversations, 4);
    }

    #[test]
    fn products_count_into_both_totals() {
        let products = vec![product("Espresso beans"), product("Moka pot"), product("Grinder")];
        let metrics = compute_dashboard_metrics(&[], &[], &products);
        assert_eq!(metrics.total_products, 3);
        assert_eq!(metrics.active_products, 3);
    }

    #[test]
    fn end_to_end_aggregation_scenario() {
        let conversations = vec![
            conversation(ConversationStatus::Active, "A"),
            conversation(ConversationStatus::Active, "A"),
            conversation(ConversationStatus::AiHandled, "B"),
        ];
        let orders = vec![order("completed", 100), order("pending", 50)];

        let metrics = compute_dashboard_metrics(&conversations, &orders, &[]);
        assert_eq!(metrics.total_revenue, Decimal::from(100));
        assert_eq!(metrics.active_customers, 1);
        assert_eq!(metrics.total_conversations, 3);
        assert!((metrics.ai_response_rate - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(metrics.total_orders, 2);
        assert_eq!(metrics.pending_orders, 1);
    }

    #[test]
    fn fallback_record_matches_documented_shape() {
        let fallback = DashboardMetrics::fallback();
        assert_eq!(fallback.total_revenue, Decimal::ZERO);
        assert_eq!(fallback.active_customers, 0);
        assert_eq!(fallback.ai_response_rate, AI_RESPONSE_RATE_FALLBACK);
        assert_eq!(fallback.pending_orders, 0);
    }

    #[test]
    fn relative_age_bands() {
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0).unwrap();
        let at = |mins: i64| now - Duration::minutes(mins);

        assert_eq!(format_relative_age(at(0), now), "just now");
        assert_eq!(format_relative_age(at(1), now), "1 minutes ago");
        assert_eq!(format_relative_age(at(59), now), "59 minutes ago");
        assert_eq!(format_relative_age(at(60), now), "1 hours ago");
        assert_eq!(format_relative_age(at(1439), now), "23 hours ago");
        assert_eq!(format_relative_age(at(1440), now), "1 days ago");
        assert_eq!(format_relative_age(at(3 * 1440 + 5), now), "3 days ago");
    }

    #[test]
    fn relative_age_floors_future_timestamps() {
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0).unwrap();
        let future = now + Duration::minutes(90);
        assert_eq!(format_relative_age(future, now), "just now");
    }

    #[test]
    fn currency_is_symbol_prefixed_two_decimals() {
        assert_eq!(format_currency(Decimal::new(123450, 2)), "€1234.50");
        assert_eq!(format_currency(Decimal::from(7)), "€7.00");
        assert_eq!(format_currency(Decimal::new(99999, 3)), "€100.00");
    }

    #[test]
    fn activity_feed_caps_at_four_entries() {
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0).unwrap();
        let conversations: Vec<_> = (0..5).map(|i| conversation(ConversationStatus::Active, &format!("+49{i}"))).collect();
        let orders = vec![order("completed", 10), order("pending", 20), order("completed", 30)];

        let feed = build_recent_activity(&conversations, &orders, "Customer", now);
        assert_eq!(feed.len(), ACTIVITY_FEED_LIMIT);
    }

    #[test]
    fn activity_feed_sorts_on_event_timestamps_not_labels() {
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0).unwrap();

        // "2 minutes ago" sorts after "10 hours ago" lexicographically; make
        // sure ordering follows the timestamps instead.
        let mut conv = conversation(ConversationStatus::Active, "+49170");
        conv.last_message = Some("where is my order?".to_string());
        conv.last_message_at = Some(now - Duration::hours(10));

        let mut recent_order = order("completed", 55);
        recent_order.created_at = now - Duration::minutes(2);

        let feed = build_recent_activity(&[conv], &[recent_order], "Customer", now);
        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0].kind, ActivityKind::Order);
        assert_eq!(feed[0].time, "2 minutes ago");
        assert_eq!(feed[1].kind, ActivityKind::Message);
        assert_eq!(feed[1].time, "10 hours ago");
    }

    #[test]
    fn conversation_entries_use_name_then_phone_and_default_action() {
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0).unwrap();

        let mut named = conversation(ConversationStatus::Active, "+49171");
        named.customer_name = Some("Maria".to_string());
        named.last_message = Some("Do you have this in blue?".to_string());
        named.last_message_at = Some(now - Duration::minutes(5));

        let anonymous = conversation(ConversationStatus::Pending, "+49172");

        let feed = build_recent_activity(&[named, anonymous], &[], "Customer", now);
        assert_eq!(feed[0].customer, "Maria");
        assert_eq!(feed[0].action, "Do you have this in blue?");
        assert_eq!(feed[1].customer, "+49172");
        assert_eq!(feed[1].action, "started a conversation");
        assert!(feed[1].amount.is_none());
    }

    #[test]
    fn order_entries_carry_currency_amount_and_supplied_label() {
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0).unwrap();
        let mut o = order("completed", 120);
        o.created_at = now - Duration::minutes(30);

        let feed = build_recent_activity(&[], &[o], "Walk-in customer", now);
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].customer, "Walk-in customer");
        assert_eq!(feed[0].action, "placed an order");
        assert_eq!(feed[0].amount.as_deref(), Some("€120.00"));
    }

    #[test]
    fn activity_entry_serializes_with_type_tag() {
        let entry = ActivityEntry {
            kind: ActivityKind::Order,
            customer: "Customer".to_string(),
            action: "placed an order".to_string(),
            time: "just now".to_string(),
            amount: Some("€12.00".to_string()),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "order");
        assert_eq!(json["amount"], "€12.00");

        let no_amount = ActivityEntry { amount: None, ..entry };
        let json = serde_json::to_value(&no_amount).unwrap();
        assert_eq!(json["type"], "order");
        assert!(json.get("amount").is_none());
    }

    #[test]
    fn empty_inputs_yield_empty_feed() {
        let now = Utc::now();
        assert!(build_recent_activity(&[], &[], "Customer", now).is_empty());
    }

    #[test]
    fn takes_three_conversations_and_two_orders_at_most() {
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0).unwrap();

        // Conversations strictly newer than orders so the cap, not the sort,
        // decides the mix.
        let conversations: Vec<_> = (0..5i64)
            .map(|i| {
                let mut c = conversation(ConversationStatus::Active, &format!("+49{i}"));
                c.last_message_at = Some(now - Duration::minutes(i));
                c
            })
            .collect();
        let orders: Vec<_> = (0..3i64)
            .map(|i| {
                let mut o = order("completed", 10 * (i + 1));
                o.created_at = now - Duration::hours(i + 1);
                o
            })
            .collect();

        let feed = build_recent_activity(&conversations, &orders, "Customer", now);
        assert_eq!(feed.len(), 4);
        assert_eq!(feed.iter().filter(|e| e.kind == ActivityKind::Message).count(), 3);
        assert_eq!(feed.iter().filter(|e| e.kind == ActivityKind::Order).count(), 1);
    }
}
