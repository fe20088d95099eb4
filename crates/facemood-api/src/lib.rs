//! facemood-api crate
//!
//! Web server exposing the facemood emotion pipeline as an HTTP API.
//!
//! ## Endpoints
//! - `POST /analyze` - Variant selected by `FACEMOOD_VARIANT`
//! - `POST /analyze/url` - JSON `{"image": "<url>"}`, returns the dominant emotion
//! - `POST /analyze/upload` - multipart field `image`, returns the face records
//! - `GET /health` - Health Check
//!
//! ## Usage Example
//! ```bash
//! curl -X POST http://127.0.0.1:5000/analyze/url \
//!   -H "Content-Type: application/json" \
//!   -d '{"image": "https://example.com/face.jpg"}'
//!
//! curl -X POST http://127.0.0.1:5000/analyze/upload -F image=@face.jpg
//! ```

pub mod api;
pub mod config;
pub mod errors;
pub mod models;

pub use api::AppState;
pub use config::{Config, Variant};
pub use errors::{ApiError, ApiErrorKind};
pub use models::{AnalyzeResponse, AnalyzeUrlRequest};
