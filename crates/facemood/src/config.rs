// crates/facemood/src/config.rs

use serde::Deserialize;

use crate::errors::ConfigError;

/// Default timeout for downloading a remote image (seconds)
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Default timeout for one analyzer round trip (seconds)
///
/// Model warm-up on the backend can take tens of seconds on the first call.
pub const DEFAULT_ANALYZER_TIMEOUT_SECS: u64 = 60;

/// Default upper bound for image payloads (10 MiB)
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Default analyzer backend address
pub const DEFAULT_ANALYZER_URL: &str = "http://127.0.0.1:5005";

/// Default face detector used by the backend
pub const DEFAULT_DETECTOR_BACKEND: &str = "opencv";

const FETCH_TIMEOUT_RANGE: (u64, u64) = (1, 300);
const ANALYZER_TIMEOUT_RANGE: (u64, u64) = (1, 600);

/// Top-level configuration for facemood.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FacemoodConfig {
  /// [fetch] section
  pub fetch: FetchConfig,
  /// [decode] section
  pub decode: DecodeConfig,
  /// [analyzer] section
  pub analyzer: AnalyzerConfig,
}

/// [fetch] section configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
  /// Whole-request timeout for remote images
  pub timeout_secs: u64,
  /// Largest remote body accepted
  pub max_bytes: usize,
}

impl Default for FetchConfig {
  fn default() -> Self {
    Self {
      timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
      max_bytes: DEFAULT_MAX_IMAGE_BYTES,
    }
  }
}

/// [decode] section configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
  /// Largest byte buffer handed to the decoder
  pub max_bytes: usize,
  /// Formats the decoder accepts; anything else is a decode failure
  pub allowed_formats: Vec<ImageFormatName>,
}

impl Default for DecodeConfig {
  fn default() -> Self {
    Self {
      max_bytes: DEFAULT_MAX_IMAGE_BYTES,
      allowed_formats: ImageFormatName::ALL.to_vec(),
    }
  }
}

/// [analyzer] section configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
  /// Base URL of the DeepFace-compatible backend (e.g. "http://127.0.0.1:5005")
  pub base_url: String,
  /// Whole-request timeout for one analysis
  pub timeout_secs: u64,
  /// Face detector name forwarded to the backend
  pub detector_backend: String,
  /// When true the backend reports a missing face as an error instead of
  /// analysing the whole frame
  pub enforce_detection: bool,
}

impl Default for AnalyzerConfig {
  fn default() -> Self {
    Self {
      base_url: DEFAULT_ANALYZER_URL.to_string(),
      timeout_secs: DEFAULT_ANALYZER_TIMEOUT_SECS,
      detector_backend: DEFAULT_DETECTOR_BACKEND.to_string(),
      enforce_detection: true,
    }
  }
}

/// Image formats that may appear in `decode.allowed_formats`.
///
/// `image::ImageFormat` has no `Deserialize` implementation and the orphan
/// rule forbids adding one here, so configuration uses this enum and
/// converts with `.into()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormatName {
  /// PNG
  Png,
  /// JPEG
  Jpeg,
  /// GIF (first frame)
  Gif,
  /// WebP
  Webp,
  /// BMP
  Bmp,
  /// TIFF
  Tiff,
}

impl ImageFormatName {
  /// Every supported format, in default allow-list order
  pub const ALL: [ImageFormatName; 6] = [
    ImageFormatName::Png,
    ImageFormatName::Jpeg,
    ImageFormatName::Gif,
    ImageFormatName::Webp,
    ImageFormatName::Bmp,
    ImageFormatName::Tiff,
  ];

  /// Lowercase name as used in configuration
  pub fn name(&self) -> &'static str {
    match self {
      ImageFormatName::Png => "png",
      ImageFormatName::Jpeg => "jpeg",
      ImageFormatName::Gif => "gif",
      ImageFormatName::Webp => "webp",
      ImageFormatName::Bmp => "bmp",
      ImageFormatName::Tiff => "tiff",
    }
  }
}

impl std::fmt::Display for ImageFormatName {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.name())
  }
}

impl From<ImageFormatName> for image::ImageFormat {
  fn from(name: ImageFormatName) -> Self {
    match name {
      ImageFormatName::Png => image::ImageFormat::Png,
      ImageFormatName::Jpeg => image::ImageFormat::Jpeg,
      ImageFormatName::Gif => image::ImageFormat::Gif,
      ImageFormatName::Webp => image::ImageFormat::WebP,
      ImageFormatName::Bmp => image::ImageFormat::Bmp,
      ImageFormatName::Tiff => image::ImageFormat::Tiff,
    }
  }
}

// ===== Accessor Methods =====

impl FacemoodConfig {
  /// Returns the allow-list converted to `image` crate formats.
  pub fn allowed_image_formats(&self) -> Vec<image::ImageFormat> {
    self.decode.allowed_formats.iter().map(|&f| f.into()).collect()
  }

  /// Validates the configuration.
  ///
  /// # Validation Items
  /// - `fetch.timeout_secs` is within 1..=300
  /// - `fetch.max_bytes` >= 1
  /// - `decode.max_bytes` >= 1
  /// - `decode.allowed_formats` is not empty
  /// - `analyzer.base_url` is an http(s) URL
  /// - `analyzer.timeout_secs` is within 1..=600
  /// - `analyzer.detector_backend` is not blank
  ///
  /// # Errors
  /// Returns the first violated rule as a `ConfigError`.
  pub fn validate(&self) -> Result<(), ConfigError> {
    let (min, max) = FETCH_TIMEOUT_RANGE;
    if !(min..=max).contains(&self.fetch.timeout_secs) {
      return Err(ConfigError::InvalidFetchTimeout {
        min,
        max,
        actual: self.fetch.timeout_secs,
      });
    }

    if self.fetch.max_bytes == 0 {
      return Err(ConfigError::ZeroByteLimit {
        field: "fetch.max_bytes",
      });
    }

    if self.decode.max_bytes == 0 {
      return Err(ConfigError::ZeroByteLimit {
        field: "decode.max_bytes",
      });
    }

    if self.decode.allowed_formats.is_empty() {
      return Err(ConfigError::EmptyAllowedFormats);
    }

    match reqwest::Url::parse(&self.analyzer.base_url) {
      Ok(url) if matches!(url.scheme(), "http" | "https") => {}
      Ok(url) => {
        return Err(ConfigError::InvalidAnalyzerUrl {
          url: self.analyzer.base_url.clone(),
          reason: format!("unsupported scheme `{}`", url.scheme()),
        });
      }
      Err(e) => {
        return Err(ConfigError::InvalidAnalyzerUrl {
          url: self.analyzer.base_url.clone(),
          reason: e.to_string(),
        });
      }
    }

    let (min, max) = ANALYZER_TIMEOUT_RANGE;
    if !(min..=max).contains(&self.analyzer.timeout_secs) {
      return Err(ConfigError::InvalidAnalyzerTimeout {
        min,
        max,
        actual: self.analyzer.timeout_secs,
      });
    }

    if self.analyzer.detector_backend.trim().is_empty() {
      return Err(ConfigError::EmptyDetectorBackend);
    }

    Ok(())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────
