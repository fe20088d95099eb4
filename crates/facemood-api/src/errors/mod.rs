//! errors module
pub mod error_definition;

/// Re-export API error types
pub use error_definition::{
  ApiError, ApiErrorKind, MSG_DECODE_FAILED, MSG_DOWNLOAD_FAILED, MSG_INVALID_JSON_FORMAT,
  MSG_NO_IMAGE_FILE, MSG_REQUEST_MUST_BE_JSON, Result,
};
