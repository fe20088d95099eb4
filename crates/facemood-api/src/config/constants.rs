//! API configuration constants

/// Default bind address
///
/// Localhost only; set `FACEMOOD_BIND_ADDR` to expose the server.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Default variant mounted on `POST /analyze`
pub const DEFAULT_VARIANT: &str = "upload";

/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Extra request-body allowance on top of the image limit
///
/// Covers multipart boundaries and part headers.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Body of 500 responses when error passthrough is disabled
pub const GENERIC_INTERNAL_MESSAGE: &str = "Internal server error";
