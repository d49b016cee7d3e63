use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use cost_estimation::calculation::CostEstimator;
use cost_estimation::clients::{CalculationApi, CalculationClient, CalculationClientError, CALCULATION_TIMEOUT};
use cost_estimation::lifecycle::CostEstimationSystem;
use cost_estimation::model::{CalculationResult, Complexity, Order, OrderStatus};
use cost_estimation::order::{routes, OrderErrorBody, OrderHandler};
use regex::Regex;
use service_framework::{HealthStatus, HttpService, RecordedLatency, RunningService, ScriptedRandom, SeededRandom, ThreadRandom};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn instant_estimator(seed: u64) -> CostEstimator {
    CostEstimator::new(Arc::new(SeededRandom::new(seed)), Arc::new(RecordedLatency::instant()))
}

async fn spawn(router: Router) -> RunningService {
    HttpService::bind("stub", "127.0.0.1:0".parse().unwrap(), router)
        .await
        .expect("Failed to bind")
        .spawn()
        .expect("Failed to spawn")
}

/// An address nothing listens on.
async fn closed_address() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", address)
}

/// Full end-to-end: client -> order service -> calculation service and back.
#[tokio::test]
async fn test_full_order_flow_over_http() {
    let system = CostEstimationSystem::start(instant_estimator(1))
        .await
        .expect("Failed to start system");
    let pattern = Regex::new(r"^ORD-\d{5}$").unwrap();

    for _ in 0..20 {
        let response = reqwest::get(format!("{}/order", system.order_url())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let order: Order = response.json().await.unwrap();
        assert_eq!(order.status, OrderStatus::Created);
        assert!(pattern.is_match(order.order_id.as_str()));
        let calculation = order.calculation.expect("Created order without calculation");
        assert!(calculation.is_consistent(), "{:?}", calculation);
    }

    system.shutdown().await.expect("Failed to shutdown system");
}

/// Both services report healthy.
#[tokio::test]
async fn test_health_on_both_services() {
    let system = CostEstimationSystem::start(instant_estimator(2)).await.unwrap();

    for base_url in [system.order_url(), system.calculation_url()] {
        let response = reqwest::get(format!("{}/health", base_url)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.json::<HealthStatus>().await.unwrap(), HealthStatus::healthy());
    }

    system.shutdown().await.unwrap();
}

/// Calculation service down: 500, failed status, id still returned.
#[tokio::test]
async fn test_order_fails_when_calculation_unreachable() {
    let handler = OrderHandler::production(&closed_address().await).unwrap();
    let order_service = spawn(routes(handler)).await;

    let response = reqwest::get(format!("{}/order", order_service.base_url())).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: OrderErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Failed to calculate cost");
    assert_eq!(body.status, OrderStatus::Failed);
    assert!(Regex::new(r"^ORD-\d{5}$").unwrap().is_match(body.order_id.as_str()));

    // Order service itself stays healthy.
    let health = reqwest::get(format!("{}/health", order_service.base_url())).await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);

    order_service.shutdown().await.unwrap();
}

/// A calculation slower than the deadline is a failure like any other.
#[tokio::test]
async fn test_order_fails_when_calculation_times_out() {
    // One complex calculation taking a full second, against a 200ms deadline.
    let random = ScriptedRandom::new().with_ints([1, 20_000, 30]).with_floats([1.0]);
    let estimator = CostEstimator::new(Arc::new(random), Arc::new(RecordedLatency::sleeping()));
    let system = CostEstimationSystem::start_with(
        estimator,
        Arc::new(ThreadRandom),
        Some(Duration::from_millis(200)),
    )
    .await
    .unwrap();

    let started = Instant::now();
    let response = reqwest::get(format!("{}/order", system.order_url())).await.unwrap();

    assert!(started.elapsed() < Duration::from_secs(1), "Deadline was not enforced");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: OrderErrorBody = response.json().await.unwrap();
    assert_eq!(body.status, OrderStatus::Failed);

    system.shutdown().await.unwrap();
}

/// Non-2xx from the calculation service is a failure.
#[tokio::test]
async fn test_order_fails_on_calculation_error_status() {
    let stub = spawn(Router::new().route(
        "/calculate",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "overloaded") }),
    ))
    .await;

    let client = CalculationClient::new(&stub.base_url()).unwrap();
    assert_eq!(client.calculate().await, Err(CalculationClientError::Status(503)));

    let order_service = spawn(routes(OrderHandler::new(Arc::new(client), Arc::new(ThreadRandom)))).await;
    let response = reqwest::get(format!("{}/order", order_service.base_url())).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    order_service.shutdown().await.unwrap();
    stub.shutdown().await.unwrap();
}

/// A 200 whose body is not a calculation result is a failure.
#[tokio::test]
async fn test_malformed_calculation_body_is_reported() {
    let stub = spawn(Router::new().route(
        "/calculate",
        get(|| async { Json(serde_json::json!({ "estimated_cost": "a lot" })) }),
    ))
    .await;

    let client = CalculationClient::new(&stub.base_url()).unwrap();
    assert!(matches!(
        client.calculate().await,
        Err(CalculationClientError::InvalidBody(_))
    ));

    stub.shutdown().await.unwrap();
}

/// The client decodes exactly what the calculation service sends.
#[tokio::test]
async fn test_client_decodes_calculation() {
    let expected = CalculationResult {
        estimated_cost: 8_000,
        production_time_hours: 16,
        complexity: Complexity::Simple,
    };
    let stub = spawn(Router::new().route("/calculate", get(move || async move { Json(expected) }))).await;

    let client = CalculationClient::new(&format!("{}/", stub.base_url())).unwrap();
    assert_eq!(client.calculate().await, Ok(expected));

    stub.shutdown().await.unwrap();
}

/// Simultaneous calculations overlap: total time tracks the slowest one,
/// not the sum of all delays.
#[tokio::test]
async fn test_concurrent_calculations_do_not_block_each_other() {
    let latency = Arc::new(RecordedLatency::sleeping());
    let estimator = CostEstimator::new(Arc::new(SeededRandom::new(11)), latency.clone());
    let calculation = spawn(cost_estimation::calculation::routes(estimator)).await;
    let url = format!("{}/calculate", calculation.base_url());
    let http = reqwest::Client::new();

    let started = Instant::now();
    let mut handles = vec![];
    for _ in 0..10 {
        let http = http.clone();
        let url = url.clone();
        handles.push(tokio::spawn(async move {
            http.get(url).send().await?.json::<CalculationResult>().await
        }));
    }
    for handle in handles {
        let result = handle.await.unwrap().expect("Calculation request failed");
        assert!(result.is_consistent());
    }
    let elapsed = started.elapsed();

    let waits = latency.waits();
    assert_eq!(waits.len(), 10);
    let slowest = waits.iter().max().copied().unwrap();
    assert!(elapsed >= slowest, "Finished before the slowest delay");
    assert!(
        elapsed < latency.total(),
        "Requests ran sequentially: {:?} >= {:?}",
        elapsed,
        latency.total()
    );

    calculation.shutdown().await.unwrap();
}

#[test]
fn test_calculation_deadline_is_five_seconds() {
    assert_eq!(CALCULATION_TIMEOUT, Duration::from_secs(5));

    let client = CalculationClient::new("http://calculation-service:8081").unwrap();
    assert_eq!(client.timeout(), Duration::from_secs(5));
}

/// `https` URLs go through a TLS handshake rather than being refused by the
/// client. Against a plaintext server the handshake fails as a transport error.
#[tokio::test]
async fn test_https_url_performs_tls_handshake() {
    let stub = spawn(Router::new().route("/calculate", get(|| async { "plaintext" }))).await;
    let client = CalculationClient::new(&format!("https://{}", stub.address())).unwrap();

    match client.calculate().await {
        Err(CalculationClientError::Transport(message)) => {
            assert!(!message.contains("scheme is not http"), "{message}");
        }
        other => panic!("Expected a TLS transport failure, got {:?}", other),
    }

    stub.shutdown().await.unwrap();
}
