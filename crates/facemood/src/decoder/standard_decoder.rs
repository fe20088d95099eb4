//! Decoder built on the `image` crate

use image::ImageFormat;

use super::ImageDecoder;
use crate::config::FacemoodConfig;
use crate::errors::DecodeError;
use crate::models::DecodedImage;

/// Signature-sniffing decoder with a format allow-list and size cap.
#[derive(Debug, Clone)]
pub struct StandardDecoder {
  allowed: Vec<ImageFormat>,
  max_bytes: usize,
}

impl StandardDecoder {
  /// Creates a decoder accepting `allowed` formats up to `max_bytes`
  #[must_use]
  pub fn new(allowed: Vec<ImageFormat>, max_bytes: usize) -> Self {
    Self { allowed, max_bytes }
  }

  /// Creates a decoder from the `[decode]` section
  #[must_use]
  pub fn from_config(config: &FacemoodConfig) -> Self {
    Self::new(config.allowed_image_formats(), config.decode.max_bytes)
  }
}

impl ImageDecoder for StandardDecoder {
  fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    if bytes.is_empty() {
      return Err(DecodeError::Empty);
    }

    if bytes.len() > self.max_bytes {
      return Err(DecodeError::TooLarge {
        actual: bytes.len(),
        max: self.max_bytes,
      });
    }

    // The format is taken from the magic bytes, never from a client-supplied name
    let format = image::guess_format(bytes).map_err(|e| DecodeError::Malformed(e.to_string()))?;

    if !self.allowed.contains(&format) {
      return Err(DecodeError::UnsupportedFormat(format!("{format:?}")));
    }

    let pixels = image::load_from_memory_with_format(bytes, format)
      .map_err(|e| DecodeError::Malformed(e.to_string()))?;

    Ok(DecodedImage::new(pixels, format))
  }
}

#[cfg(test)]
mod tests {
  use std::io::Cursor;

  use image::{DynamicImage, Rgb, RgbImage};

  use super::*;

  fn encode(format: ImageFormat) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 3, Rgb([200, 120, 40])));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).unwrap();
    buf.into_inner()
  }

  fn default_decoder() -> StandardDecoder {
    StandardDecoder::from_config(&FacemoodConfig::default())
  }

  #[test]
  fn decodes_png() {
    let decoded = default_decoder().decode(&encode(ImageFormat::Png)).unwrap();

    assert_eq!((decoded.width(), decoded.height()), (4, 3));
    assert_eq!(decoded.channels(), 3);
    assert_eq!(decoded.format(), ImageFormat::Png);
  }

  #[test]
  fn decodes_jpeg() {
    let decoded = default_decoder().decode(&encode(ImageFormat::Jpeg)).unwrap();
    assert_eq!(decoded.format(), ImageFormat::Jpeg);
  }

  #[test]
  fn rejects_empty_input() {
    assert_eq!(default_decoder().decode(&[]).unwrap_err(), DecodeError::Empty);
  }

  #[test]
  fn rejects_source_code() {
    let err = default_decoder().decode(b"fn main() { println!(\"hi\"); }").unwrap_err();
    assert!(matches!(err, DecodeError::Malformed(_)));
  }

  #[test]
  fn rejects_truncated_png() {
    let png = encode(ImageFormat::Png);
    let err = default_decoder().decode(&png[..png.len() / 2]).unwrap_err();
    assert!(matches!(err, DecodeError::Malformed(_)));
  }

  #[test]
  fn rejects_format_outside_allow_list() {
    let decoder = StandardDecoder::new(vec![ImageFormat::Jpeg], 1024 * 1024);
    let err = decoder.decode(&encode(ImageFormat::Png)).unwrap_err();

    assert_eq!(err, DecodeError::UnsupportedFormat("Png".to_string()));
  }

  #[test]
  fn rejects_oversized_input() {
    let png = encode(ImageFormat::Png);
    let decoder = StandardDecoder::new(vec![ImageFormat::Png], png.len() - 1);

    assert_eq!(
      decoder.decode(&png).unwrap_err(),
      DecodeError::TooLarge {
        actual: png.len(),
        max: png.len() - 1
      }
    );
  }
}
