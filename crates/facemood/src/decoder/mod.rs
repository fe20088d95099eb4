//! Image decoding

mod standard_decoder;

pub use standard_decoder::StandardDecoder;

use crate::errors::DecodeError;
use crate::models::DecodedImage;

/// Turns raw bytes into a pixel buffer.
///
/// Decoding is CPU bound; callers run it on the blocking pool.
pub trait ImageDecoder: Send + Sync {
  /// Decodes `bytes`
  ///
  /// # Errors
  /// Returns a `DecodeError` when the bytes are empty, oversized, of a
  /// format outside the allow-list, or not a valid image.
  fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError>;
}
