//! facemood emotion analysis library
//!
//! Acquires an image, decodes it, and asks an external face analyzer for the
//! attributes of every face it finds. The face count is mapped onto
//! [`AnalysisOutcome`].

/// Analyzer module - FaceAnalyzer trait and the DeepFace REST client
pub mod analyzer;

/// Configuration module - FacemoodConfig and its sections
pub mod config;

/// Decoder module - ImageDecoder trait and the `image` crate implementation
pub mod decoder;

/// Error module - FacemoodError, FacemoodResult and per-stage errors
pub mod errors;

/// Fetcher module - ImageFetcher trait and the reqwest implementation
pub mod fetcher;

/// Data model module - FaceRecord, DecodedImage, AnalysisOutcome, etc.
pub mod models;

/// Pipeline module - EmotionPipeline facade
pub mod pipeline;

/// Re-exports
pub use config::FacemoodConfig;
pub use errors::{FacemoodError, FacemoodResult};
pub use models::{Action, AnalysisOutcome, DecodedImage, FaceRecord, ImageSource};
pub use pipeline::EmotionPipeline;
