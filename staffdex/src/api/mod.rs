//! HTTP surface over the consistency engine.
//!
//! Thin pass-through layer: each route delegates to one
//! [`DirectoryService`] operation and maps [`DirectoryError`] kinds to
//! stable status codes so clients can tell "retry later" (429) from
//! "does not exist" (404) from "your input was bad" (400).

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::DirectoryError;
use crate::model::{CreateEmployeeInput, Employee};
use crate::service::{DirectoryService, TOP_EARNER_LIMIT};

/// JSON body returned for every failed request.
#[derive(Clone, Debug, Serialize)]
pub struct ApiErrorPayload {
    pub timestamp: DateTime<Utc>,
    pub status_code: u16,
    pub error: String,
    pub message: String,
}

impl IntoResponse for DirectoryError {
    fn into_response(self) -> Response {
        let status = match &self {
            DirectoryError::NotFound { .. } => StatusCode::NOT_FOUND,
            DirectoryError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            DirectoryError::Validation(_) => StatusCode::BAD_REQUEST,
            DirectoryError::Invariant(_)
            | DirectoryError::Cache(_)
            | DirectoryError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        warn!(status = status.as_u16(), error = %self, "request failed");

        let payload = ApiErrorPayload {
            timestamp: Utc::now(),
            status_code: status.as_u16(),
            error: status
                .canonical_reason()
                .unwrap_or("Unknown")
                .to_string(),
            message: self.to_string(),
        };
        (status, Json(payload)).into_response()
    }
}

/// Builds the employee-directory router.
pub fn router(service: Arc<DirectoryService>) -> Router {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route("/search/:fragment", get(search_employees))
        .route("/highestSalary", get(highest_salary))
        .route(
            "/topTenHighestEarningEmployeeNames",
            get(top_earning_names),
        )
        .route("/:id", get(employee_by_id).delete(delete_employee))
        .with_state(service)
}

/// Binds `addr` and serves the directory API until Ctrl+C.
pub async fn serve(addr: &str, service: Arc<DirectoryService>) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr, "staffdex listening");
    axum::serve(listener, router(service))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await
}

async fn list_employees(
    State(service): State<Arc<DirectoryService>>,
) -> Result<Json<Vec<Employee>>, DirectoryError> {
    service.get_all().await.map(Json)
}

async fn search_employees(
    State(service): State<Arc<DirectoryService>>,
    Path(fragment): Path<String>,
) -> Result<Json<Vec<Employee>>, DirectoryError> {
    service.search_by_name(&fragment).await.map(Json)
}

async fn employee_by_id(
    State(service): State<Arc<DirectoryService>>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, DirectoryError> {
    service.get_by_id(&id).await.map(Json)
}

async fn highest_salary(
    State(service): State<Arc<DirectoryService>>,
) -> Result<Json<i64>, DirectoryError> {
    service.highest_salary().await.map(Json)
}

async fn top_earning_names(
    State(service): State<Arc<DirectoryService>>,
) -> Result<Json<Vec<String>>, DirectoryError> {
    service.top_earning_names(TOP_EARNER_LIMIT).await.map(Json)
}

async fn create_employee(
    State(service): State<Arc<DirectoryService>>,
    Json(input): Json<CreateEmployeeInput>,
) -> Result<(StatusCode, Json<Employee>), DirectoryError> {
    let created = service.create(&input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Returns the deleted employee's name, matching the upstream's
/// acknowledgement shape.
async fn delete_employee(
    State(service): State<Arc<DirectoryService>>,
    Path(id): Path<String>,
) -> Result<Json<String>, DirectoryError> {
    let deleted = service.delete_by_id(&id).await?;
    Ok(Json(deleted.name.unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheStore, MemoryCacheStore};
    use crate::client::{DirectoryClient, HttpClient, MockHttpClient, RetryPolicy};
    use crate::telemetry::DirectoryMetrics;
    use axum::body::Body;
    use axum::http::Request;
    use std::time::Duration;
    use tower::ServiceExt;

    fn app(responses: Vec<Result<Vec<u8>, crate::client::HttpError>>) -> Router {
        let store = Arc::new(MemoryCacheStore::new(10_000_000, None));
        let metrics = Arc::new(DirectoryMetrics::new());
        let client = DirectoryClient::new(
            Arc::new(MockHttpClient::new(responses)) as Arc<dyn HttpClient>,
            RetryPolicy::fixed(2, Duration::from_millis(1)),
            Arc::clone(&metrics),
        );
        let service = Arc::new(DirectoryService::new(
            store as Arc<dyn CacheStore>,
            client,
            metrics,
        ));
        router(service)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();
        (status, body)
    }

    #[tokio::test]
    async fn test_list_returns_employees() {
        let app = app(vec![Ok(
            br#"{"data": [{"id": "e-1", "employee_name": "Alice", "employee_salary": 5000}]}"#
                .to_vec(),
        )]);

        let (status, body) = send(app, Request::get("/").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        let employees: Vec<Employee> = serde_json::from_slice(&body).unwrap();
        assert_eq!(employees.len(), 1);
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404() {
        let app = app(vec![Err(crate::client::HttpError::NotFound)]);

        let (status, body) = send(app, Request::get("/e-9").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let payload: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload["status_code"], 404);
        assert!(payload["message"].as_str().unwrap().contains("e-9"));
    }

    #[tokio::test]
    async fn test_rate_limited_maps_to_429() {
        let app = app(vec![
            Err(crate::client::HttpError::RateLimited),
            Err(crate::client::HttpError::RateLimited),
        ]);

        let (status, _) = send(app, Request::get("/e-1").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_invalid_create_maps_to_400() {
        let app = app(vec![]);

        let body = serde_json::json!({
            "name": "", "salary": 5000, "age": 30, "title": "Engineer"
        });
        let request = Request::post("/")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let (status, _) = send(app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_returns_201() {
        let app = app(vec![Ok(
            br#"{"data": {"id": "e-7", "employee_name": "Eve", "employee_salary": 1}}"#.to_vec(),
        )]);

        let body = serde_json::json!({
            "name": "Eve", "salary": 1, "age": 30, "title": "Engineer"
        });
        let request = Request::post("/")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::CREATED);
        let created: Employee = serde_json::from_slice(&body).unwrap();
        assert_eq!(created.id.as_deref(), Some("e-7"));
    }

    #[tokio::test]
    async fn test_static_routes_win_over_id_capture() {
        let app = app(vec![Ok(
            br#"{"data": [{"id": "e-1", "employee_name": "A", "employee_salary": 42}]}"#.to_vec(),
        )]);

        let (status, body) = send(
            app,
            Request::get("/highestSalary").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let salary: i64 = serde_json::from_slice(&body).unwrap();
        assert_eq!(salary, 42);
    }

    #[tokio::test]
    async fn test_empty_directory_salary_maps_to_500() {
        let app = app(vec![Ok(br#"{"data": []}"#.to_vec())]);

        let (status, _) = send(
            app,
            Request::get("/highestSalary").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_delete_returns_name() {
        let app = app(vec![
            Ok(br#"{"data": {"id": "e-1", "employee_name": "Alice", "employee_salary": 1}}"#
                .to_vec()),
            Ok(br#"{"data": true}"#.to_vec()),
        ]);

        let (status, body) = send(app, Request::delete("/e-1").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        let name: String = serde_json::from_slice(&body).unwrap();
        assert_eq!(name, "Alice");
    }
}
