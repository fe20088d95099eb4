//! API State Definition

use std::sync::Arc;

use facemood::EmotionPipeline;

use crate::config::Config;

/// Application State
///
/// State shared across the entire server.
/// Contains configuration and the emotion pipeline.
#[derive(Clone)]
pub struct AppState {
  /// Configuration
  pub config: Config,
  /// Emotion analysis pipeline
  ///
  /// - Production: `Arc::new(EmotionPipeline::from_config(&config.facemood)?)`
  /// - Test: `Arc::new(EmotionPipeline::new(stub_fetcher, decoder, stub_analyzer))`
  pub pipeline: Arc<EmotionPipeline>,
}

impl AppState {
  /// Creates a new AppState
  #[must_use]
  pub fn new(config: Config, pipeline: Arc<EmotionPipeline>) -> Self {
    Self { config, pipeline }
  }
}
