use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::Router;
use service_framework::{health_routes, HealthStatus, HttpService};
use tower::ServiceExt;

/// The health router answers without any server running.
#[tokio::test]
async fn test_health_route_in_process() {
    let app: Router = health_routes();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let health: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(health, serde_json::json!({ "status": "healthy" }));
}

/// Full lifecycle: bind an ephemeral port, serve, shut down cleanly.
#[tokio::test]
async fn test_spawned_service_serves_and_shuts_down() {
    let router = health_routes().route("/ping", get(|| async { "pong" }));
    let service = HttpService::bind("test-service", "127.0.0.1:0".parse().unwrap(), router)
        .await
        .expect("Failed to bind");
    assert_eq!(service.name(), "test-service");

    let running = service.spawn().expect("Failed to spawn");
    let base_url = running.base_url();
    assert_ne!(running.address().port(), 0);

    let health: HealthStatus = reqwest::get(format!("{}/health", base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health, HealthStatus::healthy());

    let pong = reqwest::get(format!("{}/ping", base_url))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(pong, "pong");

    running.shutdown().await.expect("Failed to shutdown service");

    // Listener is gone after shutdown.
    assert!(reqwest::get(format!("{}/health", base_url)).await.is_err());
}

/// Binding an address that is already taken reports a Bind error.
#[tokio::test]
async fn test_bind_conflict_is_reported() {
    let first = HttpService::bind("first", "127.0.0.1:0".parse().unwrap(), health_routes())
        .await
        .unwrap();
    let taken = first.local_addr().unwrap();

    let second = HttpService::bind("second", taken, health_routes()).await;
    assert!(matches!(
        second,
        Err(service_framework::FrameworkError::Bind { .. })
    ));
}
