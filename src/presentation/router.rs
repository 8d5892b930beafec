// Router assembly and cross-cutting HTTP layers
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{dashboard_stats, log_complaint, root_status};
use anyhow::Context;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::{sync::Arc, time::Duration};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Credentialed CORS for a single trusted origin. Methods and headers are
/// mirrored since wildcards are not allowed together with credentials.
pub fn cors_layer(allowed_origin: &str) -> anyhow::Result<CorsLayer> {
    if allowed_origin.trim() == "*" {
        anyhow::bail!("Allowed origin must be a single origin, not `*`, when credentials are allowed");
    }
    let origin = HeaderValue::from_str(allowed_origin)
        .with_context(|| format!("Invalid allowed origin: {}", allowed_origin))?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .max_age(Duration::from_secs(60 * 60)))
}

pub fn build_router(state: Arc<AppState>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(root_status))
        .route("/api/log-complaint", post(log_complaint))
        .route("/api/dashboard-stats", get(dashboard_stats))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::complaint_service::ComplaintService;
    use crate::application::dashboard_service::DashboardService;
    use crate::application::memory_store::{Failure, MemoryStore};
    use crate::application::store_handle::StoreHandle;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const ORIGIN: &str = "http://localhost:3000";

    fn app(store: StoreHandle) -> Router {
        let timeout = Duration::from_secs(5);
        let state = Arc::new(AppState {
            complaint_service: ComplaintService::new(store.clone(), timeout),
            dashboard_service: DashboardService::new(store, timeout, 5),
        });
        build_router(state, cors_layer(ORIGIN).unwrap())
    }

    fn connected() -> (Arc<MemoryStore>, Router) {
        let store = Arc::new(MemoryStore::new());
        let router = app(StoreHandle::connected(store.clone()));
        (store, router)
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .method(Method::GET)
            .body(Body::empty())
            .unwrap()
    }

    fn post_complaint(body: &str) -> Request<Body> {
        Request::builder()
            .uri("/api/log-complaint")
            .method(Method::POST)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    const DWARKA: &str = r#"{"location":"Dwarka","issue":"Garbage overflow","urgency":"high"}"#;

    #[tokio::test]
    async fn test_root_status() {
        let (_, router) = connected();

        let (status, body) = send(router, get_request("/")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "Complaint Gateway Online");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_root_status_in_degraded_mode() {
        let (status, _) = send(app(StoreHandle::Unconfigured), get_request("/")).await;

        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_log_complaint_created() {
        let (store, router) = connected();

        let (status, body) = send(router, post_complaint(DWARKA)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Logged Successfully");
        assert_eq!(body["data"][0]["location"], "Dwarka");
        assert_eq!(body["data"][0]["issue"], "Garbage overflow");
        assert_eq!(body["data"][0]["urgency"], "high");
        assert_eq!(body["data"][0]["status"], "Open");
        assert_eq!(store.rows().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_urgency_is_rejected_without_write() {
        let (store, router) = connected();

        let (status, body) = send(
            router,
            post_complaint(r#"{"location":"Dwarka","issue":"Garbage overflow"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_failed");
        assert_eq!(body["fields"], json!([{"field": "urgency", "problem": "missing"}]));
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn test_client_status_is_rejected_without_write() {
        let (store, router) = connected();

        let (status, body) = send(
            router,
            post_complaint(
                r#"{"location":"Dwarka","issue":"Garbage overflow","urgency":"high","status":"Resolved"}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["fields"][0]["field"], "status");
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let (store, router) = connected();

        let (status, body) = send(router, post_complaint("location=Dwarka")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "malformed_body");
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn test_same_payload_twice_creates_two_records() {
        let (store, router) = connected();

        let (first, _) = send(router.clone(), post_complaint(DWARKA)).await;
        let (second, _) = send(router, post_complaint(DWARKA)).await;

        assert_eq!(first, StatusCode::CREATED);
        assert_eq!(second, StatusCode::CREATED);
        let rows = store.rows();
        assert_eq!(rows.len(), 2);
        assert_ne!(rows[0]["id"], rows[1]["id"]);
    }

    #[tokio::test]
    async fn test_unconfigured_store_is_never_200() {
        let router = app(StoreHandle::Unconfigured);

        let (status, body) = send(router, post_complaint(DWARKA)).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "service_unavailable");
    }

    #[tokio::test]
    async fn test_invalid_input_beats_unconfigured_store() {
        let router = app(StoreHandle::Unconfigured);

        let (status, _) = send(router, post_complaint(r#"{"location":"Dwarka"}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_dashboard_stats_empty_store() {
        let (_, router) = connected();

        let (status, body) = send(router, get_request("/api/dashboard-stats")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "total_complaints": 0,
                "resolved": 0,
                "pending": 0,
                "critical_zones": []
            })
        );
    }

    #[tokio::test]
    async fn test_dashboard_stats_reflect_logged_complaints() {
        let store = Arc::new(MemoryStore::new().with_row("Rohini", "Resolved"));
        let router = app(StoreHandle::connected(store));

        send(router.clone(), post_complaint(DWARKA)).await;
        send(router.clone(), post_complaint(DWARKA)).await;
        let (status, body) = send(router, get_request("/api/dashboard-stats")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_complaints"], 3);
        assert_eq!(body["resolved"], 1);
        assert_eq!(body["pending"], 2);
        assert_eq!(body["critical_zones"], json!(["Dwarka", "Rohini"]));
    }

    #[tokio::test]
    async fn test_dashboard_stats_unconfigured() {
        let router = app(StoreHandle::Unconfigured);

        let (status, body) = send(router, get_request("/api/dashboard-stats")).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "service_unavailable");
    }

    #[tokio::test]
    async fn test_cors_preflight_from_trusted_origin() {
        let (_, router) = connected();
        let request = Request::builder()
            .uri("/api/log-complaint")
            .method(Method::OPTIONS)
            .header(header::ORIGIN, ORIGIN)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();

        let response = router.oneshot(request).await.unwrap();

        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], ORIGIN);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "content-type");
    }

    #[tokio::test]
    async fn test_cors_ignores_untrusted_origin() {
        let (_, router) = connected();
        let request = Request::builder()
            .uri("/")
            .method(Method::GET)
            .header(header::ORIGIN, "https://evil.example.com")
            .body(Body::empty())
            .unwrap();

        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[test]
    fn test_cors_layer_rejects_invalid_origin() {
        assert!(cors_layer("http://bad\norigin").is_err());
    }

    #[test]
    fn test_cors_layer_rejects_wildcard_origin() {
        let err = cors_layer(" * ").unwrap_err();

        assert!(err.to_string().contains("not `*`"));
    }

    #[tokio::test]
    async fn test_dashboard_stats_unreachable_store() {
        let store = Arc::new(MemoryStore::failing(Failure::Unreachable));
        let router = app(StoreHandle::connected(store));

        let (status, body) = send(router, get_request("/api/dashboard-stats")).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "service_unavailable");
        assert!(body["detail"].as_str().unwrap().contains("connection refused"));
    }
}
