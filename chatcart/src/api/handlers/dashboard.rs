//! Dashboard endpoints: KPI metrics and the recent-activity feed.
//!
//! Both endpoints degrade instead of failing: if the underlying fetches error,
//! the metrics endpoint serves the documented fallback record and the activity
//! endpoint serves an empty feed, each with a 200. A dashboard that renders
//! stale-looking zeros beats one that renders an error page.

use axum::{Json, extract::State};
use chrono::Utc;
use tracing::warn;

use crate::api::extract::AccountScope;
use crate::dashboard::{ActivityEntry, DashboardMetrics, build_recent_activity, compute_dashboard_metrics};
use crate::db::handlers::{
    Repository, conversations::ConversationFilter, conversations::Conversations, orders::OrderFilter, orders::Orders,
    products::ProductFilter, products::Products,
};
use crate::db::models::{conversations::Conversation, orders::Order, products::Product};
use crate::errors::{Error, Result};
use crate::types::AccountId;
use crate::AppState;

/// Label shown for order events in the activity feed. Orders do not reference a
/// conversation or customer yet, so there is no name to resolve.
const ORDER_CUSTOMER_LABEL: &str = "Customer";

async fn fetch_conversations(state: &AppState, account_id: AccountId, limit: Option<i64>) -> Result<Vec<Conversation>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut filter = ConversationFilter::for_account(account_id);
    if let Some(limit) = limit {
        filter = filter.with_limit(limit);
    }
    Ok(Conversations::new(&mut conn).list(&filter).await?)
}

async fn fetch_orders(state: &AppState, account_id: AccountId, limit: Option<i64>) -> Result<Vec<Order>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut filter = OrderFilter::for_account(account_id);
    if let Some(limit) = limit {
        filter = filter.with_limit(limit);
    }
    Ok(Orders::new(&mut conn).list(&filter).await?)
}

async fn fetch_products(state: &AppState, account_id: AccountId) -> Result<Vec<Product>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let filter = if state.config.scope_products_to_account {
        ProductFilter::for_account(account_id)
    } else {
        ProductFilter::shared_catalog()
    };
    Ok(Products::new(&mut conn).list(&filter).await?)
}

#[utoipa::path(
    get,
    path = "/dashboard/metrics",
    tag = "dashboard",
    summary = "Get dashboard metrics",
    description = "Aggregate KPI summary for the account: revenue, customer and conversation counts, \
        AI response rate, catalog size, and order totals. Served from a fallback record if the \
        underlying data cannot be fetched.",
    responses(
        (status = 200, description = "Current metrics", body = DashboardMetrics),
        (status = 401, description = "Unauthorized"),
    ),
    security(("X-Account-Id" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_dashboard_metrics(State(state): State<AppState>, AccountScope(account_id): AccountScope) -> Json<DashboardMetrics> {
    // Independent tables, fetched concurrently on separate pool connections.
    let fetched = tokio::try_join!(
        fetch_conversations(&state, account_id, None),
        fetch_orders(&state, account_id, None),
        fetch_products(&state, account_id),
    );

    let metrics = match fetched {
        Ok((conversations, orders, products)) => compute_dashboard_metrics(&conversations, &orders, &products),
        Err(e) => {
            warn!("Serving fallback dashboard metrics: {e:#}");
            DashboardMetrics::fallback()
        }
    };

    Json(metrics)
}

#[utoipa::path(
    get,
    path = "/dashboard/activity",
    tag = "dashboard",
    summary = "Get recent activity",
    description = "Merged feed of the latest conversation and order events, newest first, capped at \
        four entries. Served empty if the underlying data cannot be fetched.",
    responses(
        (status = 200, description = "Recent activity entries", body = Vec<ActivityEntry>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("X-Account-Id" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_recent_activity(State(state): State<AppState>, AccountScope(account_id): AccountScope) -> Json<Vec<ActivityEntry>> {
    let fetched = tokio::try_join!(
        fetch_conversations(&state, account_id, Some(3)),
        fetch_orders(&state, account_id, Some(2)),
    );

    let feed = match fetched {
        Ok((conversations, orders)) => build_recent_activity(&conversations, &orders, ORDER_CUSTOMER_LABEL, Utc::now()),
        Err(e) => {
            warn!("Serving empty activity feed: {e:#}");
            Vec::new()
        }
    };

    Json(feed)
}
