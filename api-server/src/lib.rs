//! API Server
//!
//! HTTP front door for the Archway engine. Parses inbound JSON,
//! delegates to the pipeline, and translates pipeline errors into the
//! JSON error envelope. Artifact and metadata failures never become
//! 5xx responses; only a malformed request (400) or a completion
//! failure (500) does.
//!
//! # Endpoints
//!
//! - POST /converse - Run one interview turn through the pipeline
//! - GET /health - Service status
//! - GET /projects/:id - Fetch a project metadata row

use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use archway_engine::llm::ModelGateway;
use archway_engine::pipeline::{ConverseRequest, Pipeline, PipelineError};
use archway_engine::storage::ProjectRepository;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Server state shared across handlers
#[derive(Clone)]
pub struct ServerState {
    pipeline: Arc<Pipeline>,
    projects: Arc<ProjectRepository>,
    gateway: Arc<dyn ModelGateway>,
}

impl ServerState {
    pub fn new(
        pipeline: Arc<Pipeline>,
        projects: Arc<ProjectRepository>,
        gateway: Arc<dyn ModelGateway>,
    ) -> Self {
        Self {
            pipeline,
            projects,
            gateway,
        }
    }
}

/// JSON error envelope: `{ "error": ..., "timestamp": ... }`
fn error_response(status: StatusCode, message: &str) -> Response {
    let body = json!({
        "error": message,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });
    (status, Json(body)).into_response()
}

/// Build the application router with the CORS policy applied.
pub fn router(state: ServerState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/converse", post(converse_handler))
        .route("/health", get(health_handler))
        .route("/projects/:id", get(project_handler))
        .layer(cors)
        .with_state(state)
}

/// Serve the router until the shutdown future resolves.
pub async fn serve(
    addr: SocketAddr,
    state: ServerState,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("API server listening on http://{}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("API server shut down gracefully");
    Ok(())
}

async fn converse_handler(
    State(state): State<ServerState>,
    payload: Result<Json<ConverseRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return error_response(StatusCode::BAD_REQUEST, &rejection.body_text());
        }
    };

    match state.pipeline.handle(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(PipelineError::BadRequest(message)) => {
            error_response(StatusCode::BAD_REQUEST, &message)
        }
        Err(PipelineError::Model(e)) => {
            tracing::error!(kind = e.kind(), error = %e, "completion failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

async fn health_handler(State(state): State<ServerState>) -> Response {
    let model_healthy = state.gateway.check_health().await;
    let body = json!({
        "service": "archway",
        "version": env!("CARGO_PKG_VERSION"),
        "model_gateway": if model_healthy { "ok" } else { "unconfigured" },
    });
    (StatusCode::OK, Json(body)).into_response()
}

async fn project_handler(
    State(state): State<ServerState>,
    Path(project_id): Path<String>,
) -> Response {
    match state.projects.get(&project_id).await {
        Ok(Some(record)) => (StatusCode::OK, Json(record)).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "project not found"),
        Err(e) => {
            tracing::error!(error = %e, "project lookup failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "project lookup failed")
        }
    }
}
