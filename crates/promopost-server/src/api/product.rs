use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use promopost_core::ProductRecord;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub(super) struct FetchProductRequest {
    #[serde(default)]
    url: Option<String>,
}

/// Fetches a product page and extracts its listing fields.
///
/// Extraction failures are reported inside the record (`success: false`)
/// rather than as an HTTP error, so callers can always inspect the reason.
pub(super) async fn fetch_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<FetchProductRequest>,
) -> Result<Json<ApiResponse<ProductRecord>>, ApiError> {
    let url = body.url.as_deref().map_or("", str::trim);
    if url.is_empty() {
        return Err(ApiError::new(
            req_id.0.clone(),
            "validation_error",
            "url is required",
        ));
    }

    let record = state.scraper.fetch_product(url).await;

    Ok(Json(ApiResponse {
        data: record,
        meta: ResponseMeta::new(req_id.0),
    }))
}
