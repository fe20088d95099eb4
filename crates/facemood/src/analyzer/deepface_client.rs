//! Client for a DeepFace-compatible REST backend
//!
//! Protocol:
//! ```text
//! POST {base_url}/analyze
//! { "img": "data:image/png;base64,...", "actions": ["emotion"],
//!   "detector_backend": "opencv", "enforce_detection": true }
//!
//! 200 { "results": [ { "dominant_emotion": "happy", ... }, ... ] }
//! 4xx { "error": "..." }   (older servers use "exception")
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::FaceAnalyzer;
use crate::config::AnalyzerConfig;
use crate::errors::AnalyzerError;
use crate::models::{Action, DecodedImage, FaceRecord};

/// Error text the backend uses when detection is enforced and no face is found
const NO_FACE_MARKER: &str = "face could not be detected";

#[derive(Serialize)]
struct AnalyzeBody<'a> {
  img: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  actions: Option<&'a [Action]>,
  detector_backend: &'a str,
  enforce_detection: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AnalyzeReply {
  Wrapped { results: Vec<FaceRecord> },
  Bare(Vec<FaceRecord>),
}

impl AnalyzeReply {
  fn into_records(self) -> Vec<FaceRecord> {
    match self {
      Self::Wrapped { results } => results,
      Self::Bare(records) => records,
    }
  }
}

#[derive(Deserialize)]
struct ErrorReply {
  #[serde(alias = "exception")]
  error: String,
}

/// HTTP client for the analyzer backend.
#[derive(Clone)]
pub struct DeepFaceClient {
  http: Client,
  endpoint: String,
  detector_backend: String,
  enforce_detection: bool,
}

impl DeepFaceClient {
  /// Builds the client from the `[analyzer]` section.
  ///
  /// # Errors
  /// Returns `AnalyzerError::Transport` if the HTTP client cannot be built.
  pub fn new(config: &AnalyzerConfig) -> Result<Self, AnalyzerError> {
    let http = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .map_err(|e| AnalyzerError::Transport(Arc::new(e)))?;

    Ok(Self {
      http,
      endpoint: format!("{}/analyze", config.base_url.trim_end_matches('/')),
      detector_backend: config.detector_backend.clone(),
      enforce_detection: config.enforce_detection,
    })
  }

  /// Full URL of the analyze endpoint
  pub fn endpoint(&self) -> &str {
    &self.endpoint
  }
}

/// Turns a non-success reply into a typed error.
///
/// This is the only place that looks at backend error text.
fn error_from_reply(status: u16, body: &str) -> AnalyzerError {
  let message = serde_json::from_str::<ErrorReply>(body)
    .map(|reply| reply.error)
    .unwrap_or_else(|_| body.trim().to_string());

  if message.to_lowercase().contains(NO_FACE_MARKER) {
    AnalyzerError::NoFaceDetected
  } else {
    AnalyzerError::Backend { status, message }
  }
}

#[async_trait]
impl FaceAnalyzer for DeepFaceClient {
  async fn analyze(
    &self,
    image: &DecodedImage,
    actions: Option<&[Action]>,
  ) -> Result<Vec<FaceRecord>, AnalyzerError> {
    let png = image.to_png_bytes().map_err(|e| AnalyzerError::Encode(e.to_string()))?;
    let body = AnalyzeBody {
      img: format!("data:image/png;base64,{}", BASE64.encode(&png)),
      actions,
      detector_backend: &self.detector_backend,
      enforce_detection: self.enforce_detection,
    };

    debug!(
      endpoint = %self.endpoint,
      width = image.width(),
      height = image.height(),
      "sending image to analyzer"
    );

    let response = self
      .http
      .post(&self.endpoint)
      .json(&body)
      .send()
      .await
      .map_err(|e| AnalyzerError::Transport(Arc::new(e)))?;

    let status = response.status();
    let text = response.text().await.map_err(|e| AnalyzerError::Transport(Arc::new(e)))?;

    if !status.is_success() {
      let err = error_from_reply(status.as_u16(), &text);
      if !matches!(err, AnalyzerError::NoFaceDetected) {
        warn!(status = status.as_u16(), "analyzer backend returned an error");
      }
      return Err(err);
    }

    serde_json::from_str::<AnalyzeReply>(&text)
      .map(AnalyzeReply::into_records)
      .map_err(|e| AnalyzerError::InvalidResponse(e.to_string()))
  }
}
