use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::context::{DisplayContext, UpdatePatch};
use crate::error::Error;

/// Builds the API router. The display client polls `/api/polling`; the
/// config client drives the `/api/config` surface. CORS is permissive
/// because the config UI is served from a different origin.
pub fn router(ctx: DisplayContext) -> Router {
    Router::new()
        .route("/api/polling", get(polling))
        .route(
            "/api/config",
            get(config_overview)
                .post(config_create)
                .delete(config_delete)
                .patch(config_update),
        )
        .route(
            "/api/config/entries/{index}",
            axum::routing::post(entry_insert).delete(entry_remove),
        )
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}

pub async fn serve(ctx: DisplayContext, addr: SocketAddr) -> Result<()> {
    let app = router(ctx);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind listener on {addr}"))?;
    info!(%addr, "smart-display server listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server exited")?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.ok();
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        if let Ok(mut stream) = signal(SignalKind::terminate()) {
            stream.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown requested");
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PollingResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    date_time: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigResponse {
    duration_secs: u64,
    image_urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateRequest {
    image_url: String,
    duration_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteRequest {
    image_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateRequest {
    image_url: Option<String>,
    duration_secs: Option<u64>,
}

async fn polling(State(ctx): State<DisplayContext>) -> Json<PollingResponse> {
    let now = Utc::now();
    let image_url = ctx.poll(now).await;
    Json(PollingResponse {
        image_url,
        date_time: now.to_rfc3339(),
    })
}

async fn config_overview(State(ctx): State<DisplayContext>) -> Json<ConfigResponse> {
    let overview = ctx.overview().await;
    Json(ConfigResponse {
        duration_secs: overview.duration_secs,
        image_urls: overview.image_urls,
        image_url: overview.current_url,
    })
}

async fn config_create(
    State(ctx): State<DisplayContext>,
    Json(req): Json<CreateRequest>,
) -> Result<StatusCode, ApiError> {
    ctx.create(req.image_url, req.duration_secs, Utc::now())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn config_delete(
    State(ctx): State<DisplayContext>,
    Json(req): Json<DeleteRequest>,
) -> Result<StatusCode, ApiError> {
    ctx.delete(&req.image_url, Utc::now()).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn config_update(
    State(ctx): State<DisplayContext>,
    Json(req): Json<UpdateRequest>,
) -> Result<StatusCode, ApiError> {
    let patch = UpdatePatch {
        image_url: req.image_url,
        duration_secs: req.duration_secs,
    };
    ctx.update(patch, Utc::now()).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn entry_insert(
    State(ctx): State<DisplayContext>,
    Path(index): Path<usize>,
    Json(req): Json<CreateRequest>,
) -> Result<StatusCode, ApiError> {
    ctx.insert_at(index, req.image_url, req.duration_secs, Utc::now())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn entry_remove(
    State(ctx): State<DisplayContext>,
    Path(index): Path<usize>,
) -> Result<StatusCode, ApiError> {
    ctx.remove_at(index, Utc::now()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Maps library errors onto structured 4xx/5xx payloads.
struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

#[derive(Debug, Serialize)]
struct ErrorPayload {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, field) = match &self.0 {
            Error::Validation { field, .. } => (StatusCode::UNPROCESSABLE_ENTITY, Some(*field)),
            Error::NotFound(_) => (StatusCode::NOT_FOUND, None),
            _ => {
                warn!(error = %self.0, "config mutation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
        };
        let payload = ErrorPayload {
            error: self.0.to_string(),
            field,
        };
        (status, Json(payload)).into_response()
    }
}
