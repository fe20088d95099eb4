//! Router definition

use axum::{
  Router,
  extract::DefaultBodyLimit,
  routing::{MethodRouter, get, post},
};
use tower_http::trace::TraceLayer;

use super::handlers::{health_check, post_analyze_upload, post_analyze_url};
use super::state::AppState;
use crate::config::Variant;
use crate::errors::ApiError;

/// Creates the API router
///
/// `POST /analyze` is bound to the configured variant; both variants are
/// also reachable under their own paths.
///
/// # Arguments
/// * `state` - Application state
///
/// # Returns
/// Configured Router
pub fn create_router(state: AppState) -> Router {
  let body_limit = state.config.body_limit();

  Router::new()
    .route("/analyze", variant_route(state.config.variant))
    .route("/analyze/url", post(post_analyze_url))
    .route("/analyze/upload", post(post_analyze_upload))
    .route("/health", get(health_check))
    .layer(DefaultBodyLimit::max(body_limit))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

fn variant_route(variant: Variant) -> MethodRouter<AppState> {
  match variant {
    Variant::Url => post(post_analyze_url),
    Variant::Upload => post(post_analyze_upload),
  }
}

/// Starts the server
///
/// # Arguments
/// * `state` - Application state
///
/// # Errors
/// Returns an error if binding or serving fails
pub async fn run_server(state: AppState) -> crate::errors::Result<()> {
  let addr = state.config.bind_addr.clone();
  let listener = tokio::net::TcpListener::bind(&addr)
    .await
    .map_err(|e| ApiError::config(format!("failed to bind {addr}: {e}")))?;

  tracing::info!(variant = %state.config.variant, "starting server: http://{}", addr);

  let router = create_router(state);

  axum::serve(listener, router)
    .await
    .map_err(|e| ApiError::internal(format!("server error: {e}")))?;

  Ok(())
}
