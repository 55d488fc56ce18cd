mod product;
mod promotion;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use promopost_scraper::ProductPageClient;
use promopost_telegram::TelegramNotifier;

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub scraper: Arc<ProductPageClient>,
    pub notifier: Arc<TelegramNotifier>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    notifier: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/product/fetch", post(product::fetch_product))
        .route("/api/v1/promotion/send", post(promotion::send_promotion))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);
    let notifier = if state.notifier.is_dry_run() {
        "dry-run"
    } else {
        "live"
    };

    (
        StatusCode::OK,
        Json(ApiResponse {
            data: HealthData {
                status: "ok",
                notifier,
            },
            meta,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_scraper() -> Arc<ProductPageClient> {
        Arc::new(
            ProductPageClient::new(5, "promopost-test/0.1", "pt-BR")
                .expect("failed to build test scraper"),
        )
    }

    fn dry_run_app() -> Router {
        build_app(AppState {
            scraper: test_scraper(),
            notifier: Arc::new(TelegramNotifier::dry_run("-100123", false)),
        })
    }

    fn live_app(bot_base_url: &str) -> Router {
        build_app(AppState {
            scraper: test_scraper(),
            notifier: Arc::new(
                TelegramNotifier::with_base_url(
                    "123456:TEST-token",
                    "-100123",
                    false,
                    bot_base_url,
                )
                .expect("failed to build test notifier"),
            ),
        })
    }

    async fn get_response(app: Router, uri: &str) -> axum::response::Response {
        app.oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response")
    }

    async fn post_json(
        app: Router,
        uri: &str,
        body: &serde_json::Value,
    ) -> axum::response::Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
        .expect("response")
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&body).expect("json parse")
    }

    #[test]
    fn api_error_validation_error_maps_to_bad_request() {
        let response = ApiError::new("req-1", "validation_error", "invalid input").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_upstream_error_maps_to_bad_gateway() {
        let response = ApiError::new("req-1", "upstream_error", "chat not found").into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn api_error_unknown_code_maps_to_internal_error() {
        let response = ApiError::new("req-1", "weird_code", "boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn health_reports_dry_run_notifier() {
        let response = get_response(dry_run_app(), "/api/v1/health").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response.headers().contains_key("x-request-id"),
            "response should carry x-request-id"
        );
        let json = body_json(response).await;
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["data"]["notifier"], "dry-run");
        assert!(
            json["meta"]["request_id"].as_str().is_some_and(|id| !id.is_empty()),
            "meta.request_id should be populated"
        );
    }

    #[tokio::test]
    async fn health_reports_live_notifier() {
        // The notifier is never exercised by the health endpoint, so any
        // base URL works here.
        let response = get_response(live_app("https://api.telegram.org"), "/api/v1/health").await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["notifier"], "live");
    }

    #[tokio::test]
    async fn incoming_request_id_is_echoed() {
        let response = dry_run_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .header("x-request-id", "my-trace-42")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(
            response.headers().get("x-request-id").map(|v| v.to_str().unwrap_or_default()),
            Some("my-trace-42")
        );
        let json = body_json(response).await;
        assert_eq!(json["meta"]["request_id"], "my-trace-42");
    }

    #[tokio::test]
    async fn fetch_product_rejects_blank_url() {
        let response = post_json(
            dry_run_app(),
            "/api/v1/product/fetch",
            &serde_json::json!({ "url": "   " }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "validation_error");
        assert_eq!(json["error"]["message"], "url is required");
    }

    #[tokio::test]
    async fn fetch_product_rejects_missing_url() {
        let response = post_json(
            dry_run_app(),
            "/api/v1/product/fetch",
            &serde_json::json!({}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn fetch_product_returns_extracted_fields() {
        let page_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dp/B07XYZ1234"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<html><body>
                  <span id="productTitle">Fone Bluetooth X</span>
                  <span class="a-offscreen">R$ 349,99</span>
                </body></html>"#,
            ))
            .mount(&page_server)
            .await;

        let response = post_json(
            dry_run_app(),
            "/api/v1/product/fetch",
            &serde_json::json!({ "url": format!("{}/dp/B07XYZ1234", page_server.uri()) }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["success"], true);
        assert_eq!(json["data"]["title"], "Fone Bluetooth X");
        assert_eq!(json["data"]["current_price"], "R$ 349,99");
    }

    #[tokio::test]
    async fn fetch_product_returns_failure_record_with_200() {
        let page_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dp/B07XYZ1234"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&page_server)
            .await;

        let response = post_json(
            dry_run_app(),
            "/api/v1/product/fetch",
            &serde_json::json!({ "url": format!("{}/dp/B07XYZ1234", page_server.uri()) }),
        )
        .await;

        // Fetch failures are data, not transport errors: still a 200.
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["success"], false);
        assert!(
            json["data"]["error"]
                .as_str()
                .is_some_and(|reason| reason.contains("404")),
            "got: {json}"
        );
    }

    #[tokio::test]
    async fn send_promotion_rejects_missing_tag() {
        let response = post_json(
            dry_run_app(),
            "/api/v1/promotion/send",
            &serde_json::json!({
                "name": "Fone X",
                "link": "https://www.amazon.com.br/dp/B07XYZ1234"
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "validation_error");
        assert_eq!(json["error"]["message"], "tag is required");
    }

    #[tokio::test]
    async fn send_promotion_dry_run_succeeds_and_rebuilds_link() {
        let response = post_json(
            dry_run_app(),
            "/api/v1/promotion/send",
            &serde_json::json!({
                "name": "Fone X",
                "link": "https://www.amazon.com.br/dp/B07XYZ1234?ref=xyz",
                "tag": "promo-20",
                "price_after": "R$ 99,90"
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["success"], true);
        assert_eq!(
            json["data"]["affiliate_link"],
            "https://www.amazon.com.br/dp/B07XYZ1234?tag=promo-20"
        );
        assert!(
            json["data"]["message"]
                .as_str()
                .is_some_and(|msg| msg.contains("dry-run")),
            "got: {json}"
        );
    }

    #[tokio::test]
    async fn send_promotion_delivers_through_live_notifier() {
        let bot_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123456:TEST-token/sendMessage"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })),
            )
            .mount(&bot_server)
            .await;

        let response = post_json(
            live_app(&bot_server.uri()),
            "/api/v1/promotion/send",
            &serde_json::json!({
                "name": "Fone X",
                "link": "https://www.amazon.com.br/dp/B07XYZ1234",
                "tag": "promo-20"
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["success"], true);
    }

    #[tokio::test]
    async fn send_promotion_maps_api_failure_to_bad_gateway() {
        let bot_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123456:TEST-token/sendMessage"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "ok": false,
                "description": "Bad Request: chat not found"
            })))
            .mount(&bot_server)
            .await;

        let response = post_json(
            live_app(&bot_server.uri()),
            "/api/v1/promotion/send",
            &serde_json::json!({
                "name": "Fone X",
                "link": "https://www.amazon.com.br/dp/B07XYZ1234",
                "tag": "promo-20"
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "upstream_error");
        assert!(
            json["error"]["message"]
                .as_str()
                .is_some_and(|msg| msg.contains("chat not found")),
            "got: {json}"
        );
    }
}
