use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use bytes::Bytes;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use crate::config::{ApiConfig, UploadConfig};
use crate::error::GatewayError;
use crate::media_type::{file_extension, MediaExtension};
use crate::naming::{object_key, NamingStrategy};
use crate::object_store::ObjectStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ObjectStore>,
    pub presigned_url_expiry: Duration,
    pub naming: NamingStrategy,
}

/// Response for a successful upload or deletion
#[derive(Debug, Serialize)]
pub struct FileResponse {
    pub message: String,
    pub filename: String,
}

/// Create the API router
pub fn create_router(state: AppState, api: &ApiConfig, upload_config: &UploadConfig) -> Router {
    let cors = if api.cors_enabled {
        if api.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = api
                .cors_origins
                .iter()
                .filter_map(|o| o.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    } else {
        CorsLayer::new()
    };

    Router::new()
        .route("/health", get(health_check))
        .route("/upload", post(upload))
        .route("/images", get(list_images))
        .route("/storage-service/upload", post(upload))
        .route("/storage-service/images", get(list_images))
        .route("/storage-service/delete/:key", delete(delete_object))
        .layer(DefaultBodyLimit::max(upload_config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "media-gateway"
    }))
}

/// Accept a multipart upload, validate its extension, and store it under a
/// derived key.
///
/// The payload is buffered fully in memory before the put; the route's body
/// limit bounds the buffer size. Storage is never attempted for a rejected
/// extension, and a backend failure is not retried.
#[instrument(skip(state, multipart))]
async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<FileResponse>, GatewayError> {
    let mut filename: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut data: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| GatewayError::ClientInput(format!("invalid multipart request: {e}")))?
    {
        if field.name() == Some("file") {
            filename = field.file_name().map(str::to_string);
            content_type = field.content_type().map(str::to_string);
            data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| GatewayError::PayloadRead(e.to_string()))?,
            );
            break;
        }
    }

    let data = data.ok_or_else(|| GatewayError::ClientInput("no file provided".to_string()))?;
    if data.is_empty() {
        return Err(GatewayError::ClientInput("no file provided".to_string()));
    }

    let filename = filename.unwrap_or_default();
    if MediaExtension::from_filename(&filename).is_none() {
        return Err(GatewayError::UnsupportedMediaType(
            file_extension(&filename).to_string(),
        ));
    }

    let key = object_key(state.naming, &filename);
    let size = data.len();

    state
        .store
        .put_object(&key, data, content_type.as_deref())
        .await?;

    info!(key = %key, size_bytes = size, "File uploaded");

    Ok(Json(FileResponse {
        message: "File uploaded successfully".to_string(),
        filename: key,
    }))
}

/// Enumerate the bucket and return one signed read URL per object.
///
/// URLs are generated sequentially in backend enumeration order. The first
/// enumeration or signing failure aborts the whole request; partial results
/// are never returned.
#[instrument(skip(state))]
async fn list_images(State(state): State<AppState>) -> Result<Json<Vec<String>>, GatewayError> {
    let keys = state.store.list_keys().await?;

    let mut urls = Vec::with_capacity(keys.len());
    for key in keys {
        let presigned = state
            .store
            .presign_get(&key, state.presigned_url_expiry)
            .await?;
        urls.push(presigned.url);
    }

    Ok(Json(urls))
}

/// Remove an object by key.
///
/// Removing a missing key reports the same success as removing a present
/// one; the backend's remove semantics are passed through unchanged.
#[instrument(skip(state))]
async fn delete_object(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<FileResponse>, GatewayError> {
    state.store.remove_object(&key).await?;

    info!(key = %key, "File deleted");

    Ok(Json(FileResponse {
        message: "File deleted successfully".to_string(),
        filename: key,
    }))
}

/// Start the gateway HTTP server, shutting down when `shutdown` resolves.
pub async fn start_api_server(
    state: AppState,
    api: &ApiConfig,
    upload_config: &UploadConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    use anyhow::Context;

    let router = create_router(state, api, upload_config);
    let addr = format!("{}:{}", api.host, api.port);

    info!(address = %addr, "Starting media gateway API server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .context("API server error")?;

    Ok(())
}
