//! Remote image acquisition

mod http_fetcher;

pub use http_fetcher::HttpImageFetcher;

use async_trait::async_trait;

use crate::errors::FetchError;

/// Downloads raw image bytes from a URL.
///
/// This trait allows swapping the production implementation
/// (`HttpImageFetcher`) with test stubs.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
  /// Fetches the resource at `url`
  ///
  /// # Errors
  /// - Invalid URL or scheme
  /// - Non-success status, timeout, transport failure
  /// - Body larger than the configured limit
  async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}
