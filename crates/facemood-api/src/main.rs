//! facemood-api server entry point

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use facemood::EmotionPipeline;
use facemood_api::ApiError;
use facemood_api::api::{AppState, run_server};
use facemood_api::config::{Config, DEFAULT_LOG_FILTER};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
  // Logging
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
  tracing_subscriber::registry().with(filter).with(tracing_subscriber::fmt::layer()).init();

  let config = Config::from_env()?;
  tracing::info!(
    variant = %config.variant,
    analyzer = %config.facemood.analyzer.base_url,
    expose_errors = config.expose_errors,
    "configuration loaded"
  );

  let pipeline = Arc::new(EmotionPipeline::from_config(&config.facemood)?);

  let state = AppState::new(config, pipeline);

  run_server(state).await
}
