use axum::{response::IntoResponse, Json};
use serde_json::json;

/// Handle /health endpoint
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_returns_ok() {
        let response = health().await.into_response();
        assert_eq!(response.status(), 200);
    }
}
