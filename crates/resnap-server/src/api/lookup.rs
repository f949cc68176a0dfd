use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use resnap_core::{estimate_prices, listing_prices, Condition, Listing, PriceEstimate};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

const MISSING_FIELDS: &str = "Missing searchTerm or condition in request body.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LookupRequest {
    search_term: Option<String>,
    condition: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct LookupResponse {
    items: Vec<Listing>,
    estimate: PriceEstimate,
}

/// `POST /lookup` (also served as `/ebay-search`).
pub(super) async fn lookup_prices(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<LookupRequest>, JsonRejection>,
) -> Result<Json<LookupResponse>, ApiError> {
    let Json(body) =
        body.map_err(|e| ApiError::new(req_id.0.clone(), "bad_request", e.body_text()))?;

    let (term, condition) = match (non_blank(body.search_term), non_blank(body.condition)) {
        (Some(term), Some(condition)) => (term, condition),
        _ => return Err(ApiError::new(req_id.0, "bad_request", MISSING_FIELDS)),
    };

    let Some(ebay) = state.ebay.as_ref() else {
        return Err(ApiError::new(
            req_id.0,
            "unavailable",
            "marketplace credentials are not configured",
        ));
    };

    let condition = Condition::from_label_lossy(&condition);
    let items = ebay.search(&term, condition).await.map_err(|e| {
        tracing::error!(request_id = %req_id.0, error = %e, term = %term, %condition, "marketplace search failed");
        ApiError::new(
            req_id.0.clone(),
            "upstream_error",
            "Failed to fetch listings from the marketplace.",
        )
    })?;

    let estimate = estimate_prices(listing_prices(&items));
    tracing::info!(
        request_id = %req_id.0,
        term = %term,
        %condition,
        listings = items.len(),
        %estimate,
        "lookup complete"
    );

    Ok(Json(LookupResponse { items, estimate }))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
