//! Config loading from environment variables

use std::str::FromStr;

use facemood::config::FacemoodConfig;
use facemood::models::Action;

use super::constants::{DEFAULT_BIND_ADDR, DEFAULT_VARIANT, MULTIPART_OVERHEAD_BYTES};
use crate::errors::ApiError;

/// Endpoint variant
///
/// Both variants share one pipeline and differ only in how the image is
/// acquired, which actions are requested, and the wording of their answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
  /// JSON body `{"image": "<url>"}`, answers with the dominant emotion
  Url,
  /// Multipart field `image`, answers with the full record list
  Upload,
}

impl FromStr for Variant {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "url" => Ok(Self::Url),
      "upload" => Ok(Self::Upload),
      _ => Err(format!("Unknown variant: {}. Valid values: url, upload", s)),
    }
  }
}

impl std::fmt::Display for Variant {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Url => write!(f, "url"),
      Self::Upload => write!(f, "upload"),
    }
  }
}

impl Variant {
  /// Error message when no face was found
  pub fn no_face_message(&self) -> &'static str {
    match self {
      Self::Url => "Yüz tespit edilemedi!",
      Self::Upload => "No Face Detected!",
    }
  }

  /// Error message when more than one face was found
  pub fn multiple_faces_message(&self) -> &'static str {
    match self {
      Self::Url => "Birden fazla yüz bulundu!",
      Self::Upload => "More than one faces detected!",
    }
  }

  /// Actions forwarded to the analyzer (`None` = backend default set)
  pub fn actions(&self) -> Option<&'static [Action]> {
    match self {
      Self::Url => Some(Action::EMOTION_ONLY),
      Self::Upload => None,
    }
  }
}

/// API Server Configuration
#[derive(Debug, Clone)]
pub struct Config {
  /// Bind address (e.g. "127.0.0.1:5000")
  pub bind_addr: String,
  /// Variant mounted on `POST /analyze`
  pub variant: Variant,
  /// Whether 500 responses carry the underlying error text
  pub expose_errors: bool,
  /// Pipeline configuration
  pub facemood: FacemoodConfig,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      bind_addr: DEFAULT_BIND_ADDR.to_string(),
      variant: Variant::Upload,
      expose_errors: true,
      facemood: FacemoodConfig::default(),
    }
  }
}

impl Config {
  /// Loads configuration from environment variables
  ///
  /// | variable | meaning |
  /// |---|---|
  /// | `FACEMOOD_BIND_ADDR` | listen address |
  /// | `FACEMOOD_VARIANT` | `url` or `upload` on `POST /analyze` |
  /// | `FACEMOOD_ANALYZER_URL` | analyzer backend base URL |
  /// | `FACEMOOD_DETECTOR_BACKEND` | face detector name for the backend |
  /// | `FACEMOOD_FETCH_TIMEOUT_SECS` | remote image timeout |
  /// | `FACEMOOD_ANALYZER_TIMEOUT_SECS` | analyzer timeout |
  /// | `FACEMOOD_MAX_IMAGE_BYTES` | download, decode and body limit |
  /// | `FACEMOOD_EXPOSE_ERRORS` | raw error text in 500 responses |
  ///
  /// # Errors
  /// Returns an error if environment variable values are invalid
  pub fn from_env() -> crate::errors::Result<Self> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Loads configuration through an arbitrary key lookup
  ///
  /// `from_env` passes `std::env::var`; tests pass a map.
  ///
  /// # Errors
  /// Returns an error if a value cannot be parsed or the result fails validation
  pub fn from_lookup<F>(lookup: F) -> crate::errors::Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let mut config = Self::default();

    if let Some(addr) = lookup("FACEMOOD_BIND_ADDR") {
      config.bind_addr = addr;
    }

    let variant_str = lookup("FACEMOOD_VARIANT").unwrap_or_else(|| DEFAULT_VARIANT.to_string());
    config.variant = Variant::from_str(&variant_str).map_err(ApiError::config)?;

    if let Some(raw) = lookup("FACEMOOD_EXPOSE_ERRORS") {
      config.expose_errors = parse_bool("FACEMOOD_EXPOSE_ERRORS", &raw)?;
    }

    let facemood = &mut config.facemood;
    if let Some(url) = lookup("FACEMOOD_ANALYZER_URL") {
      facemood.analyzer.base_url = url;
    }
    if let Some(detector) = lookup("FACEMOOD_DETECTOR_BACKEND") {
      facemood.analyzer.detector_backend = detector;
    }
    if let Some(raw) = lookup("FACEMOOD_FETCH_TIMEOUT_SECS") {
      facemood.fetch.timeout_secs = parse_number("FACEMOOD_FETCH_TIMEOUT_SECS", &raw)?;
    }
    if let Some(raw) = lookup("FACEMOOD_ANALYZER_TIMEOUT_SECS") {
      facemood.analyzer.timeout_secs = parse_number("FACEMOOD_ANALYZER_TIMEOUT_SECS", &raw)?;
    }
    if let Some(raw) = lookup("FACEMOOD_MAX_IMAGE_BYTES") {
      let max_bytes: usize = parse_number("FACEMOOD_MAX_IMAGE_BYTES", &raw)?;
      facemood.fetch.max_bytes = max_bytes;
      facemood.decode.max_bytes = max_bytes;
    }

    facemood.validate().map_err(|e| ApiError::config(e.to_string()))?;

    Ok(config)
  }

  /// Largest accepted request body
  pub fn body_limit(&self) -> usize {
    self.facemood.decode.max_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES)
  }
}

fn parse_number<T>(key: &str, raw: &str) -> crate::errors::Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  raw
    .trim()
    .parse()
    .map_err(|e| ApiError::config(format!("{key}={raw}: {e}")))
}

fn parse_bool(key: &str, raw: &str) -> crate::errors::Result<bool> {
  match raw.trim().to_lowercase().as_str() {
    "1" | "true" | "yes" | "on" => Ok(true),
    "0" | "false" | "no" | "off" => Ok(false),
    _ => Err(ApiError::config(format!(
      "{key}={raw}: expected true/false"
    ))),
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;

  fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> =
      pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |key: &str| map.get(key).cloned()
  }

  #[test]
  fn variant_from_str() {
    assert_eq!(Variant::from_str("url").unwrap(), Variant::Url);
    assert_eq!(Variant::from_str("UPLOAD").unwrap(), Variant::Upload);
    assert!(Variant::from_str("base64").is_err());
  }

  #[test]
  fn variant_messages() {
    assert_eq!(Variant::Upload.no_face_message(), "No Face Detected!");
    assert_eq!(
      Variant::Upload.multiple_faces_message(),
      "More than one faces detected!"
    );
    assert_eq!(Variant::Url.no_face_message(), "Yüz tespit edilemedi!");
    assert_eq!(Variant::Url.multiple_faces_message(), "Birden fazla yüz bulundu!");
  }

  #[test]
  fn variant_actions() {
    assert_eq!(Variant::Url.actions(), Some(&[Action::Emotion][..]));
    assert_eq!(Variant::Upload.actions(), None);
  }

  #[test]
  fn config_defaults_without_variables() {
    let config = Config::from_lookup(lookup_from(&[])).unwrap();

    assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
    assert_eq!(config.variant, Variant::Upload);
    assert!(config.expose_errors);
  }

  #[test]
  fn config_reads_all_variables() {
    let config = Config::from_lookup(lookup_from(&[
      ("FACEMOOD_BIND_ADDR", "0.0.0.0:8080"),
      ("FACEMOOD_VARIANT", "url"),
      ("FACEMOOD_EXPOSE_ERRORS", "false"),
      ("FACEMOOD_ANALYZER_URL", "http://deepface:5000"),
      ("FACEMOOD_DETECTOR_BACKEND", "retinaface"),
      ("FACEMOOD_FETCH_TIMEOUT_SECS", "5"),
      ("FACEMOOD_ANALYZER_TIMEOUT_SECS", "120"),
      ("FACEMOOD_MAX_IMAGE_BYTES", "2048"),
    ]))
    .unwrap();

    assert_eq!(config.bind_addr, "0.0.0.0:8080");
    assert_eq!(config.variant, Variant::Url);
    assert!(!config.expose_errors);
    assert_eq!(config.facemood.analyzer.base_url, "http://deepface:5000");
    assert_eq!(config.facemood.analyzer.detector_backend, "retinaface");
    assert_eq!(config.facemood.fetch.timeout_secs, 5);
    assert_eq!(config.facemood.analyzer.timeout_secs, 120);
    assert_eq!(config.facemood.fetch.max_bytes, 2048);
    assert_eq!(config.facemood.decode.max_bytes, 2048);
    assert_eq!(config.body_limit(), 2048 + MULTIPART_OVERHEAD_BYTES);
  }

  #[test]
  fn config_rejects_unknown_variant() {
    let err = Config::from_lookup(lookup_from(&[("FACEMOOD_VARIANT", "grpc")])).unwrap_err();
    assert_eq!(err.code(), "config_error");
  }

  #[test]
  fn config_rejects_non_numeric_timeout() {
    let err =
      Config::from_lookup(lookup_from(&[("FACEMOOD_FETCH_TIMEOUT_SECS", "soon")])).unwrap_err();
    assert!(err.to_string().contains("FACEMOOD_FETCH_TIMEOUT_SECS"));
  }

  #[test]
  fn config_rejects_bad_bool() {
    assert!(Config::from_lookup(lookup_from(&[("FACEMOOD_EXPOSE_ERRORS", "maybe")])).is_err());
  }

  #[test]
  fn config_runs_pipeline_validation() {
    let err =
      Config::from_lookup(lookup_from(&[("FACEMOOD_ANALYZER_URL", "ftp://x")])).unwrap_err();
    assert_eq!(err.code(), "config_error");
  }
}
