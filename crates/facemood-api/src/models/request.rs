//! Request model definitions

use serde::Deserialize;

/// Body of the URL variant
#[derive(Debug, Deserialize)]
pub struct AnalyzeUrlRequest {
  /// URL of the image to analyse
  pub image: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn deserialize_valid_request() {
    let json = r#"{"image": "https://example.com/face.jpg"}"#;
    let req: AnalyzeUrlRequest = serde_json::from_str(json).unwrap();
    assert_eq!(req.image, "https://example.com/face.jpg");
  }

  #[test]
  fn extra_keys_are_ignored() {
    let json = r#"{"image": "http://x/y.png", "note": "hello"}"#;
    assert!(serde_json::from_str::<AnalyzeUrlRequest>(json).is_ok());
  }

  #[test]
  fn missing_image_is_rejected() {
    assert!(serde_json::from_str::<AnalyzeUrlRequest>(r#"{"url": "http://x"}"#).is_err());
  }

  #[test]
  fn non_string_image_is_rejected() {
    assert!(serde_json::from_str::<AnalyzeUrlRequest>(r#"{"image": 42}"#).is_err());
  }
}
