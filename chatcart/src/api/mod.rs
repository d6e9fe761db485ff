//! API layer for HTTP request handling and data models.
//!
//! This module contains the REST API implementation, organized into:
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//! - **[`extract`]**: Account-scoping request extractors
//!
//! # API Structure
//!
//! The API is divided into several functional areas, all under `/api/v1`:
//!
//! - **Dashboard** (`/dashboard/*`): KPI metrics and the recent-activity feed
//! - **Conversations** (`/conversations/*`): Thread management and messages
//! - **Orders** (`/orders/*`): Order recording and status tracking
//! - **Products** (`/products/*`): Catalog management
//! - **Settings** (`/settings/assistant`): Assistant configuration
//!
//! # OpenAPI Documentation
//!
//! All endpoints are documented with OpenAPI annotations using `utoipa`.
//! Interactive documentation is served at `/docs` when the server is running.

pub mod extract;
pub mod handlers;
pub mod models;
