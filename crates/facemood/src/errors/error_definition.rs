//! Error definitions

use std::sync::Arc;

use thiserror::Error;

/// Configuration (`FacemoodConfig`) validation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
  /// fetch.timeout_secs is out of range
  #[error("fetch.timeout_secs must be within {min}..={max}: actual={actual}")]
  InvalidFetchTimeout {
    /// Lower bound (seconds)
    min: u64,
    /// Upper bound (seconds)
    max: u64,
    /// Configured value
    actual: u64,
  },

  /// analyzer.timeout_secs is out of range
  #[error("analyzer.timeout_secs must be within {min}..={max}: actual={actual}")]
  InvalidAnalyzerTimeout {
    /// Lower bound (seconds)
    min: u64,
    /// Upper bound (seconds)
    max: u64,
    /// Configured value
    actual: u64,
  },

  /// fetch.max_bytes or decode.max_bytes is zero
  #[error("{field} must be at least 1 byte")]
  ZeroByteLimit {
    /// Offending field
    field: &'static str,
  },

  /// decode.allowed_formats is empty
  #[error("decode.allowed_formats must list at least one image format")]
  EmptyAllowedFormats,

  /// analyzer.base_url is not an http(s) URL
  #[error("analyzer.base_url is not a valid http(s) URL: {url} ({reason})")]
  InvalidAnalyzerUrl {
    /// Configured value
    url: String,
    /// Why it was rejected
    reason: String,
  },

  /// analyzer.detector_backend is blank
  #[error("analyzer.detector_backend must not be empty")]
  EmptyDetectorBackend,
}

/// Errors while downloading a remote image
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum FetchError {
  /// URL could not be parsed or uses a scheme other than http(s)
  #[error("invalid image URL {url}: {reason}")]
  InvalidUrl {
    /// Requested URL
    url: String,
    /// Why it was rejected
    reason: String,
  },

  /// Remote server answered with a non-success status
  #[error("image download from {url} returned HTTP {status}")]
  Status {
    /// Requested URL
    url: String,
    /// HTTP status code
    status: u16,
  },

  /// Remote body exceeded the configured limit
  #[error("remote image is too large: {actual} bytes (max: {max} bytes)")]
  TooLarge {
    /// Bytes seen so far (or announced by Content-Length)
    actual: u64,
    /// Configured limit
    max: u64,
  },

  /// Download did not finish within the configured timeout
  #[error("image download from {url} timed out")]
  Timeout {
    /// Requested URL
    url: String,
  },

  /// Connection or protocol failure
  #[error("image download failed: {0}")]
  Transport(Arc<reqwest::Error>),
}

/// Errors while turning raw bytes into a pixel buffer
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
  /// No bytes at all
  #[error("image data is empty")]
  Empty,

  /// Input exceeds decode.max_bytes
  #[error("image data is too large: {actual} bytes (max: {max} bytes)")]
  TooLarge {
    /// Input length
    actual: usize,
    /// Configured limit
    max: usize,
  },

  /// Recognised format that is not in decode.allowed_formats
  #[error("image format {0} is not accepted")]
  UnsupportedFormat(String),

  /// Unknown signature or codec failure
  #[error("image data could not be decoded: {0}")]
  Malformed(String),
}

/// Errors reported by the face analyzer boundary
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum AnalyzerError {
  /// The backend could not find any face in the image
  #[error("face could not be detected in the image")]
  NoFaceDetected,

  /// Decoded image could not be re-encoded for the backend
  #[error("failed to encode image for the analyzer: {0}")]
  Encode(String),

  /// Connection, timeout or protocol failure talking to the backend
  #[error("analyzer request failed: {0}")]
  Transport(Arc<reqwest::Error>),

  /// Backend answered with an error
  #[error("analyzer returned HTTP {status}: {message}")]
  Backend {
    /// HTTP status code
    status: u16,
    /// Error text reported by the backend
    message: String,
  },

  /// Backend answered successfully but the body was not understood
  #[error("analyzer response could not be parsed: {0}")]
  InvalidResponse(String),
}

/// Aggregate error
/// Public APIs of this crate return this error.
/// Use as `FacemoodResult<T>` = `Result<T, FacemoodError>`
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum FacemoodError {
  /// Configuration error
  #[error(transparent)]
  Config(#[from] ConfigError),

  /// Image acquisition error
  #[error(transparent)]
  Fetch(#[from] FetchError),

  /// Decode error
  #[error(transparent)]
  Decode(#[from] DecodeError),

  /// Analyzer error
  #[error(transparent)]
  Analyzer(#[from] AnalyzerError),

  /// Local file could not be read
  #[error("failed to read image file {path}: {reason}")]
  Io {
    /// File path
    path: String,
    /// Underlying IO error text
    reason: String,
  },

  /// Background task failure (panic or cancellation)
  #[error("internal error: {0}")]
  Internal(String),
}

/// Standard Result alias for the facemood crate
pub type FacemoodResult<T> = Result<T, FacemoodError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn config_error_message_names_field() {
    let err = ConfigError::ZeroByteLimit {
      field: "fetch.max_bytes",
    };
    assert!(err.to_string().contains("fetch.max_bytes"));
  }

  #[test]
  fn facemood_error_is_transparent_over_decode() {
    let err: FacemoodError = DecodeError::Empty.into();
    assert_eq!(err.to_string(), "image data is empty");
  }

  #[test]
  fn fetch_status_message_carries_code() {
    let err = FetchError::Status {
      url: "http://example.invalid/a.png".to_string(),
      status: 404,
    };
    assert!(err.to_string().contains("404"));
  }
}
