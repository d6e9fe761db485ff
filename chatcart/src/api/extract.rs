//! Request extractors for account scoping.

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::AppState;
use crate::errors::{Error, Result};
use crate::types::AccountId;

/// Header the fronting proxy sets after it has authenticated the merchant.
pub const ACCOUNT_ID_HEADER: &str = "x-account-id";

/// The account a request operates on behalf of.
///
/// The service sits behind an authenticating proxy, so it trusts the
/// `X-Account-Id` header rather than validating credentials itself. Requests
/// without the header (or with a non-UUID value) are rejected with 401 before
/// any handler runs.
#[derive(Debug, Clone, Copy)]
pub struct AccountScope(pub AccountId);

impl FromRequestParts<AppState> for AccountScope {
    type Rejection = Error;

    #[instrument(skip_all)]
    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self> {
        let header = parts
            .headers
            .get(ACCOUNT_ID_HEADER)
            .ok_or_else(|| Error::Unauthenticated {
                message: Some("Missing X-Account-Id header".to_string()),
            })?
            .to_str()
            .map_err(|_| Error::Unauthenticated {
                message: Some("Invalid X-Account-Id header".to_string()),
            })?;

        let account_id = Uuid::parse_str(header).map_err(|_| Error::Unauthenticated {
            message: Some("Invalid X-Account-Id header".to_string()),
        })?;

        debug!("Request scoped to account {}", crate::types::abbrev_uuid(&account_id));
        Ok(AccountScope(account_id))
    }
}
