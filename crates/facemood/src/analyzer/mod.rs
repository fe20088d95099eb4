//! Face analysis boundary

mod deepface_client;

pub use deepface_client::DeepFaceClient;

use async_trait::async_trait;

use crate::errors::AnalyzerError;
use crate::models::{Action, DecodedImage, FaceRecord};

/// Detects faces in an image and describes each one.
///
/// The model itself lives outside this crate. Implementations report
/// "no face found" as `AnalyzerError::NoFaceDetected` (or an empty
/// sequence) so callers never have to inspect error text.
#[async_trait]
pub trait FaceAnalyzer: Send + Sync {
  /// Analyses `image`
  ///
  /// `actions = None` runs the backend's default action set.
  ///
  /// # Errors
  /// - `NoFaceDetected` when the backend refuses to analyse a face-less image
  /// - transport, backend and response errors otherwise
  async fn analyze(
    &self,
    image: &DecodedImage,
    actions: Option<&[Action]>,
  ) -> Result<Vec<FaceRecord>, AnalyzerError>;
}
