use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use landing_core_health_contracts::{HealthFeatureService, HealthStatus};
use serde::Serialize;

pub fn router(service: Arc<impl HealthFeatureService>) -> Router<()> {
    Router::new()
        .route("/health", routing::get(health))
        .with_state(service)
}

#[derive(Serialize)]
struct HealthResponse {
    http: bool,
    email: bool,
}

async fn health(service: State<Arc<impl HealthFeatureService>>) -> Response {
    let HealthStatus { email } = service.get_status().await;

    let status = if email {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(HealthResponse { http: true, email })).into_response()
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request};
    use landing_core_contact_contracts::MockContactFeatureService;
    use landing_core_health_contracts::MockHealthFeatureService;
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;
    use crate::RestServer;

    #[tokio::test]
    async fn healthy() {
        let health = MockHealthFeatureService::new().with_get_status(HealthStatus { email: true });
        let sut = RestServer::new(health, MockContactFeatureService::new()).router();

        let response = sut.oneshot(get_health()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body(response).await, json!({"http": true, "email": true}));
    }

    #[tokio::test]
    async fn email_unreachable() {
        let health =
            MockHealthFeatureService::new().with_get_status(HealthStatus { email: false });
        let sut = RestServer::new(health, MockContactFeatureService::new()).router();

        let response = sut.oneshot(get_health()).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body(response).await, json!({"http": true, "email": false}));
    }

    fn get_health() -> Request<Body> {
        Request::get("/health").body(Body::empty()).unwrap()
    }

    async fn body(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}
