//! Response model definitions

use serde::Serialize;
use serde_json::Value;

use facemood::FaceRecord;

/// Successful analysis response
///
/// Serialized without a wrapper: the URL variant answers with the bare
/// `dominant_emotion` value, the upload variant with the record list.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AnalyzeResponse {
  /// Bare dominant emotion value (e.g. `"happy"`)
  Emotion(Value),
  /// Full record list (always one element)
  Records(Vec<FaceRecord>),
}
