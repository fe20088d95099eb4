//! API error definitions

use axum::{
  Json,
  extract::multipart::MultipartError,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use facemood::errors::{FacemoodError, FetchError};

use crate::config::GENERIC_INTERNAL_MESSAGE;

/// Message for a URL request whose content type is not JSON
pub const MSG_REQUEST_MUST_BE_JSON: &str = "Request must be JSON";
/// Message for a JSON body without a usable `image` key
pub const MSG_INVALID_JSON_FORMAT: &str = "Invalid JSON format";
/// Message for an upload request without the `image` field
pub const MSG_NO_IMAGE_FILE: &str = "No image file found in the request";
/// Message for an unreachable or rejected remote image
pub const MSG_DOWNLOAD_FAILED: &str = "Failed to download image";
/// Message for bytes that are not an accepted image
pub const MSG_DECODE_FAILED: &str = "Failed to decode the image";

/// Error kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorKind {
  /// Request shape is wrong
  InvalidInput,
  /// Remote image could not be fetched
  DownloadFailed,
  /// Image bytes could not be decoded
  DecodeFailed,
  /// No face in the image
  NoFace,
  /// More than one face in the image
  MultipleFaces,
  /// Request body over the limit
  PayloadTooLarge,
  /// Internal error
  Internal,
  /// Configuration error
  Config,
}

impl ApiErrorKind {
  /// Gets error code
  #[must_use]
  pub fn code(&self) -> &'static str {
    match self {
      Self::InvalidInput => "invalid_input",
      Self::DownloadFailed => "download_failed",
      Self::DecodeFailed => "decode_failed",
      Self::NoFace => "no_face",
      Self::MultipleFaces => "multiple_faces",
      Self::PayloadTooLarge => "payload_too_large",
      Self::Internal => "internal_error",
      Self::Config => "config_error",
    }
  }

  /// Gets HTTP status code
  #[must_use]
  pub fn status(&self) -> StatusCode {
    match self {
      Self::InvalidInput
      | Self::DownloadFailed
      | Self::DecodeFailed
      | Self::NoFace
      | Self::MultipleFaces => StatusCode::BAD_REQUEST,
      Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
      Self::Internal | Self::Config => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

/// API error
///
/// `Display` is exactly the text placed in the `error` field of the response.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Request shape is wrong
  #[error("{0}")]
  InvalidInput(String),

  /// Remote image could not be fetched
  #[error("Failed to download image")]
  DownloadFailed,

  /// Image bytes could not be decoded
  #[error("Failed to decode the image")]
  DecodeFailed,

  /// No face in the image (message depends on the variant)
  #[error("{0}")]
  NoFace(&'static str),

  /// More than one face in the image (message depends on the variant)
  #[error("{0}")]
  MultipleFaces(&'static str),

  /// Request body over the limit
  #[error("{0}")]
  PayloadTooLarge(String),

  /// Internal error
  #[error("{0}")]
  Internal(String),

  /// Configuration error
  #[error("configuration error: {0}")]
  Config(String),
}

impl ApiError {
  /// Gets error kind
  #[must_use]
  pub fn kind(&self) -> ApiErrorKind {
    match self {
      Self::InvalidInput(_) => ApiErrorKind::InvalidInput,
      Self::DownloadFailed => ApiErrorKind::DownloadFailed,
      Self::DecodeFailed => ApiErrorKind::DecodeFailed,
      Self::NoFace(_) => ApiErrorKind::NoFace,
      Self::MultipleFaces(_) => ApiErrorKind::MultipleFaces,
      Self::PayloadTooLarge(_) => ApiErrorKind::PayloadTooLarge,
      Self::Internal(_) => ApiErrorKind::Internal,
      Self::Config(_) => ApiErrorKind::Config,
    }
  }

  /// Gets error code
  #[must_use]
  pub fn code(&self) -> &'static str {
    self.kind().code()
  }

  /// Gets HTTP status code
  #[must_use]
  pub fn status(&self) -> StatusCode {
    self.kind().status()
  }

  /// Creates invalid input error
  #[must_use]
  pub fn invalid_input(message: impl Into<String>) -> Self {
    Self::InvalidInput(message.into())
  }

  /// Creates internal error
  #[must_use]
  pub fn internal(message: impl Into<String>) -> Self {
    Self::Internal(message.into())
  }

  /// Creates config error
  #[must_use]
  pub fn config(message: impl Into<String>) -> Self {
    Self::Config(message.into())
  }

  /// Replaces the text of 500 responses with a generic message when
  /// `expose` is false. Client errors are returned unchanged.
  #[must_use]
  pub fn sanitized(self, expose: bool) -> Self {
    match self {
      Self::Internal(_) if !expose => Self::Internal(GENERIC_INTERNAL_MESSAGE.to_string()),
      other => other,
    }
  }
}

/// Error response JSON structure
#[derive(Serialize)]
struct ErrorResponse {
  error: String,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let body = ErrorResponse {
      error: self.to_string(),
    };

    (status, Json(body)).into_response()
  }
}

/// Conversion from FacemoodError to ApiError
///
/// Maps pipeline errors to the HTTP error taxonomy.
impl From<FacemoodError> for ApiError {
  fn from(err: FacemoodError) -> Self {
    match err {
      FacemoodError::Fetch(
        FetchError::InvalidUrl { .. }
        | FetchError::Status { .. }
        | FetchError::TooLarge { .. }
        | FetchError::Timeout { .. },
      ) => ApiError::DownloadFailed,
      FacemoodError::Decode(_) => ApiError::DecodeFailed,
      FacemoodError::Config(e) => ApiError::config(e.to_string()),
      // Transport failures, analyzer errors, IO and task failures all surface
      // as 500 with the error text; the pipeline already turned
      // `NoFaceDetected` into an outcome.
      // `_` also covers variants added to the #[non_exhaustive] enum later.
      _ => ApiError::internal(err.to_string()),
    }
  }
}

/// Conversion from axum's multipart stream errors
///
/// Body-limit overruns stay 413. Any other parse failure means no usable
/// image part was received, so the parser text is not forwarded.
impl From<MultipartError> for ApiError {
  fn from(err: MultipartError) -> Self {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
      ApiError::PayloadTooLarge(err.body_text())
    } else {
      ApiError::invalid_input(MSG_NO_IMAGE_FILE)
    }
  }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ApiError>;
