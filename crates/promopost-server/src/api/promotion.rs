use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use promopost_core::{affiliate, PromotionMessage};

use super::{ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub(super) struct SendPromotionRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    tag: Option<String>,
    #[serde(default)]
    price_before: Option<String>,
    #[serde(default)]
    price_after: Option<String>,
    #[serde(default)]
    coupon: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct SendPromotionData {
    pub success: bool,
    pub message: String,
    pub affiliate_link: String,
}

/// Rewrites the product link with the affiliate tag, renders the promotion
/// template, and hands it to the Telegram notifier.
pub(super) async fn send_promotion(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<SendPromotionRequest>,
) -> Result<Json<ApiResponse<SendPromotionData>>, ApiError> {
    let name = body.name.as_deref().map_or("", str::trim);
    let link = body.link.as_deref().map_or("", str::trim);
    let tag = body.tag.as_deref().map_or("", str::trim);

    for (field, value) in [("name", name), ("link", link), ("tag", tag)] {
        if value.is_empty() {
            return Err(ApiError::new(
                req_id.0.clone(),
                "validation_error",
                format!("{field} is required"),
            ));
        }
    }

    let affiliate_link = affiliate::format_affiliate_link(link, tag);
    let promotion = PromotionMessage {
        product_name: name.to_owned(),
        affiliate_link: affiliate_link.clone(),
        original_price: body.price_before.clone(),
        sale_price: body.price_after.clone(),
        coupon: body.coupon.clone(),
        description: body.description.clone(),
    };

    if let Err(e) = state.notifier.send_message(&promotion.render()).await {
        tracing::error!(error = %e, "failed to deliver promotion");
        return Err(ApiError::new(req_id.0, "upstream_error", e.to_string()));
    }

    let message = if state.notifier.is_dry_run() {
        "dry-run mode: message logged without delivery".to_owned()
    } else {
        "promotion delivered to the channel".to_owned()
    };

    Ok(Json(ApiResponse {
        data: SendPromotionData {
            success: true,
            message,
            affiliate_link,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
