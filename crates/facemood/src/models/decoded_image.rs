//! Decoded pixel buffers

use std::io::Cursor;

use image::{DynamicImage, ImageFormat};

/// A successfully decoded image (height × width × channels).
#[derive(Debug, Clone)]
pub struct DecodedImage {
  inner: DynamicImage,
  format: ImageFormat,
}

impl DecodedImage {
  /// Wraps a decoded image together with the container format it came from
  #[must_use]
  pub fn new(inner: DynamicImage, format: ImageFormat) -> Self {
    Self { inner, format }
  }

  /// Width in pixels
  pub fn width(&self) -> u32 {
    self.inner.width()
  }

  /// Height in pixels
  pub fn height(&self) -> u32 {
    self.inner.height()
  }

  /// Channels per pixel (1 = gray, 3 = RGB, 4 = RGBA)
  pub fn channels(&self) -> u8 {
    self.inner.color().channel_count()
  }

  /// Source container format
  pub fn format(&self) -> ImageFormat {
    self.format
  }

  /// Re-encodes the pixels as PNG.
  ///
  /// Float buffers (e.g. from OpenEXR-like sources) are not representable in
  /// PNG and are narrowed to 8-bit RGBA first.
  ///
  /// # Errors
  /// Returns the encoder error.
  pub fn to_png_bytes(&self) -> Result<Vec<u8>, image::ImageError> {
    let mut buf = Cursor::new(Vec::new());
    match &self.inner {
      DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => {
        DynamicImage::ImageRgba8(self.inner.to_rgba8()).write_to(&mut buf, ImageFormat::Png)?;
      }
      other => other.write_to(&mut buf, ImageFormat::Png)?,
    }
    Ok(buf.into_inner())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use image::{Rgb, RgbImage};

  #[test]
  fn dimensions_and_channels() {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 2, Rgb([1, 2, 3])));
    let decoded = DecodedImage::new(img, ImageFormat::Jpeg);

    assert_eq!(decoded.width(), 3);
    assert_eq!(decoded.height(), 2);
    assert_eq!(decoded.channels(), 3);
    assert_eq!(decoded.format(), ImageFormat::Jpeg);
  }

  #[test]
  fn png_bytes_start_with_signature() {
    let img = DynamicImage::ImageRgb8(RgbImage::new(2, 2));
    let png = DecodedImage::new(img, ImageFormat::Bmp).to_png_bytes().unwrap();

    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
  }

  #[test]
  fn float_images_are_narrowed_for_png() {
    let img = DynamicImage::ImageRgb32F(image::Rgb32FImage::new(2, 2));
    let png = DecodedImage::new(img, ImageFormat::Png).to_png_bytes();

    assert!(png.is_ok());
  }
}
