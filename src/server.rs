use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::config::EstimatorConfig;
use crate::handlers::{self, AppState};

/// Build the axum router for the service adapter
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/estimate", post(handlers::estimate::estimate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the estimator service
///
/// Configuration is loaded once by the caller and shared read-only across
/// requests. Uploaded usage documents live only for the duration of their
/// request.
pub async fn start_server(config: EstimatorConfig, host: &str, port: u16) -> Result<()> {
    let state = AppState {
        config: Arc::new(config),
    };
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Estimator service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install shutdown handler: {}", err);
        return;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HardwareProfile, Region, UsageProfile};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::collections::HashMap;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let mut regions = HashMap::new();
        regions.insert(
            "eu-west".to_string(),
            Region {
                power_usage_effectiveness: 1.2,
                carbon_intensity_gco2e_per_kwh: 55.0,
            },
        );

        let mut profiles = HashMap::new();
        profiles.insert(
            "chatbot".to_string(),
            UsageProfile {
                average_input_tokens: 1000.0,
                average_output_tokens: 200.0,
                throughput_tokens_per_second: 60.0,
                hardware: HardwareProfile {
                    gpu_power_watts: 400.0,
                    cpu_power_watts: 100.0,
                    gpu_efficiency: 1.0,
                    cpu_efficiency: 0.2,
                },
            },
        );

        let state = AppState {
            config: Arc::new(EstimatorConfig::from_parts(regions, profiles).unwrap()),
        };
        create_router(state)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_estimate_endpoint_returns_summary() {
        let body = r#"{"entries": [{"date": "2025-08-12", "profile": "chatbot", "count": 1}]}"#;
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/estimate?region=eu-west")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let summary: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(summary["region"], "eu-west");
        assert_eq!(summary["profiles"][0]["total_inferences"], 1);
    }

    #[tokio::test]
    async fn test_estimate_unknown_region_is_404() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/estimate?region=atlantis")
                    .body(Body::from(r#"{"entries": []}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_estimate_malformed_body_is_400() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/estimate?region=eu-west")
                    .body(Body::from("not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_estimate_missing_region_param_is_client_error() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/estimate")
                    .body(Body::from(r#"{"entries": []}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }
}
