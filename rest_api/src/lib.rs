// rest_api/src/lib.rs

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Error as AnyhowError};
use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use lib::{
    CatalogStore, ClinicalStore, Clock, InMemoryCatalogStore, InMemoryClinicalStore,
    InMemoryProfileStore, ProfileStore, StoreConfig, SystemClock,
};
use models::StoreError;
use serde_json::json;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
mod handlers;

use crate::config::AppConfig;

// Define the REST API error enum
#[derive(Debug, Error)]
pub enum RestApiError {
    #[error("{0} not found")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

// Implement IntoResponse for RestApiError to convert it into an HTTP response
impl IntoResponse for RestApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            RestApiError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{} not found", what)),
            RestApiError::Store(StoreError::Validation(e)) => (StatusCode::BAD_REQUEST, format!("Validation failed: {}", e)),
            RestApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            RestApiError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Configuration error: {}", msg)),
        };

        let body = Json(json!({
            "status": "error",
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

/// Shared state for the Axum application: one handle per store.
#[derive(Debug, Clone)]
pub struct AppState {
    pub clinical: Arc<dyn ClinicalStore>,
    pub catalog: Arc<dyn CatalogStore>,
    pub profile: Arc<dyn ProfileStore>,
}

impl AppState {
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Builds the in-memory stores, all reading time from `clock`.
    pub fn with_clock(config: &StoreConfig, clock: Arc<dyn Clock>) -> Self {
        AppState {
            clinical: Arc::new(InMemoryClinicalStore::with_clock(config, clock.clone())),
            catalog: Arc::new(InMemoryCatalogStore::with_clock(config, clock.clone())),
            profile: Arc::new(InMemoryProfileStore::with_clock(config, clock)),
        }
    }
}

/// Every route under `/api/v1`, without transport layers.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health_check_handler))
        .route("/version", get(handlers::version_handler))
        .route("/patients", get(handlers::list_patients_handler).post(handlers::create_patient_handler))
        .route(
            "/patients/:id",
            get(handlers::get_patient_handler)
                .patch(handlers::update_patient_handler)
                .delete(handlers::delete_patient_handler),
        )
        .route("/patients/:id/analyses", get(handlers::patient_analyses_handler))
        .route("/analyses", get(handlers::list_analyses_handler).post(handlers::create_analysis_handler))
        .route("/analyses/:id", get(handlers::get_analysis_handler))
        .route("/stats", get(handlers::dashboard_stats_handler))
        .route("/exams", get(handlers::list_exams_handler).post(handlers::create_exam_handler))
        .route(
            "/exams/:id",
            get(handlers::get_exam_handler)
                .patch(handlers::update_exam_handler)
                .delete(handlers::delete_exam_handler),
        )
        .route("/medications", get(handlers::list_medications_handler).post(handlers::create_medication_handler))
        .route(
            "/medications/:id",
            get(handlers::get_medication_handler)
                .patch(handlers::update_medication_handler)
                .delete(handlers::delete_medication_handler),
        )
        .route("/catalog/summary", get(handlers::catalog_summary_handler))
        .route("/profile", get(handlers::get_profile_handler).patch(handlers::update_profile_handler));

    Router::new().nest("/api/v1", api).with_state(state)
}

// Main function to start the REST API server
pub async fn start_server<F>(config: AppConfig, state: AppState, shutdown_signal: F) -> Result<(), AnyhowError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let mut app = build_router(state).layer(TraceLayer::new_for_http());
    if config.rest.allow_any_origin {
        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
            .allow_headers(Any)
            .allow_origin(Any);
        app = app.layer(cors);
    }

    let addr: SocketAddr = format!("{}:{}", config.rest.host, config.rest.port)
        .parse()
        .map_err(|e| RestApiError::Config(format!("invalid listen address: {}", e)))?;

    let listener = TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind to address: {}", addr))?;
    tracing::info!("REST API server listening on {}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal)
        .await
        .context("REST API server failed to start or run")?;

    tracing::info!("REST API server stopped.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use models::ValidationError;

    async fn status_and_body(err: RestApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn errors_map_to_status_codes() {
        let (status, body) = status_and_body(RestApiError::NotFound("Exam '9'".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Exam '9' not found");

        let invalid = RestApiError::Store(StoreError::Validation(ValidationError::InvalidDuration));
        let (status, body) = status_and_body(invalid).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");

        let (status, _) = status_and_body(RestApiError::Config("bad".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn unparsable_listen_address_is_a_config_error() {
        let mut config = AppConfig::default();
        config.rest.host = "not a host".into();
        let state = AppState::from_config(&StoreConfig::unseeded(0));
        let err = start_server(config, state, async {}).await.unwrap_err();
        assert!(err.to_string().contains("invalid listen address"));
    }
}
