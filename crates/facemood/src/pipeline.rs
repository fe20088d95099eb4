// crates/facemood/src/pipeline.rs

//! EmotionPipeline: the facade of the facemood crate.
//!
//! acquire bytes -> decode -> analyze -> map face count
//!
//! HTTP handlers and command-line tools only need this struct. Every
//! collaborator sits behind a trait so tests can inject stubs.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::analyzer::{DeepFaceClient, FaceAnalyzer};
use crate::config::FacemoodConfig;
use crate::decoder::{ImageDecoder, StandardDecoder};
use crate::errors::{AnalyzerError, FacemoodError, FacemoodResult};
use crate::fetcher::{HttpImageFetcher, ImageFetcher};
use crate::models::{Action, AnalysisOutcome, DecodedImage, ImageSource};

/// One request's worth of work, shared by every input variant.
#[derive(Clone)]
pub struct EmotionPipeline {
  fetcher: Arc<dyn ImageFetcher>,
  decoder: Arc<dyn ImageDecoder>,
  analyzer: Arc<dyn FaceAnalyzer>,
}

impl EmotionPipeline {
  /// Assembles a pipeline from explicit collaborators
  #[must_use]
  pub fn new(
    fetcher: Arc<dyn ImageFetcher>,
    decoder: Arc<dyn ImageDecoder>,
    analyzer: Arc<dyn FaceAnalyzer>,
  ) -> Self {
    Self {
      fetcher,
      decoder,
      analyzer,
    }
  }

  /// Builds the production pipeline (reqwest fetcher, `image` decoder,
  /// DeepFace client).
  ///
  /// # Errors
  /// - Invalid configuration
  /// - HTTP client construction failure
  pub fn from_config(config: &FacemoodConfig) -> FacemoodResult<Self> {
    config.validate()?;

    let fetcher = HttpImageFetcher::new(&config.fetch)?;
    let decoder = StandardDecoder::from_config(config);
    let analyzer = DeepFaceClient::new(&config.analyzer)?;

    info!(
      analyzer = analyzer.endpoint(),
      fetch_timeout_secs = config.fetch.timeout_secs,
      max_bytes = config.decode.max_bytes,
      "emotion pipeline ready"
    );

    Ok(Self::new(
      Arc::new(fetcher),
      Arc::new(decoder),
      Arc::new(analyzer),
    ))
  }

  /// Runs the whole pipeline for one image.
  ///
  /// The analyzer is called exactly once, and only after the bytes decoded.
  /// A typed "no face" from the analyzer folds into `AnalysisOutcome::NoFace`.
  ///
  /// # Errors
  /// - `Fetch` when a URL source cannot be downloaded
  /// - `Decode` when the bytes are not an accepted image
  /// - `Analyzer` for any other analyzer failure
  /// - `Internal` when the decode task dies
  pub async fn run(
    &self,
    source: ImageSource,
    actions: Option<&[Action]>,
  ) -> FacemoodResult<AnalysisOutcome> {
    let bytes = self.acquire(source).await?;
    let image = self.decode(bytes).await?;

    debug!(
      width = image.width(),
      height = image.height(),
      channels = image.channels(),
      "image decoded"
    );

    let outcome = match self.analyzer.analyze(&image, actions).await {
      Ok(records) => AnalysisOutcome::from_records(records),
      Err(AnalyzerError::NoFaceDetected) => AnalysisOutcome::NoFace,
      Err(e) => return Err(e.into()),
    };

    debug!(faces = outcome.face_count(), "analysis finished");
    Ok(outcome)
  }

  /// Reads a local image file and runs the pipeline on it.
  ///
  /// # Errors
  /// `Io` if the file cannot be read, otherwise as [`EmotionPipeline::run`].
  pub async fn analyze_file(
    &self,
    path: impl AsRef<Path>,
    actions: Option<&[Action]>,
  ) -> FacemoodResult<AnalysisOutcome> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await.map_err(|e| FacemoodError::Io {
      path: path.display().to_string(),
      reason: e.to_string(),
    })?;

    self.run(ImageSource::Bytes(bytes), actions).await
  }

  async fn acquire(&self, source: ImageSource) -> FacemoodResult<Vec<u8>> {
    match source {
      ImageSource::Url(url) => Ok(self.fetcher.fetch(&url).await?),
      ImageSource::Bytes(bytes) => Ok(bytes),
    }
  }

  async fn decode(&self, bytes: Vec<u8>) -> FacemoodResult<DecodedImage> {
    // CPU-bound; keep it off the async workers
    let decoder = Arc::clone(&self.decoder);
    let decoded = tokio::task::spawn_blocking(move || decoder.decode(&bytes))
      .await
      .map_err(|e| FacemoodError::Internal(format!("decode task failed: {e}")))??;

    Ok(decoded)
  }
}
