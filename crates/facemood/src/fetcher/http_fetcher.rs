//! reqwest-backed image fetcher

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use super::ImageFetcher;
use crate::config::FetchConfig;
use crate::errors::FetchError;

/// Downloads images over http(s) with a hard timeout and size cap.
#[derive(Clone)]
pub struct HttpImageFetcher {
  client: Client,
  max_bytes: usize,
}

impl HttpImageFetcher {
  /// Builds the HTTP client from `[fetch]` settings.
  ///
  /// # Errors
  /// Returns `FetchError::Transport` if the TLS backend cannot be initialised.
  pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .map_err(|e| FetchError::Transport(Arc::new(e)))?;

    Ok(Self {
      client,
      max_bytes: config.max_bytes,
    })
  }

  fn classify(url: &str, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
      FetchError::Timeout {
        url: url.to_string(),
      }
    } else {
      FetchError::Transport(Arc::new(err))
    }
  }
}

/// Accepts only absolute http(s) URLs.
fn parse_image_url(url: &str) -> Result<Url, FetchError> {
  let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
    url: url.to_string(),
    reason: e.to_string(),
  })?;

  match parsed.scheme() {
    "http" | "https" => Ok(parsed),
    other => Err(FetchError::InvalidUrl {
      url: url.to_string(),
      reason: format!("unsupported scheme `{other}`"),
    }),
  }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
  async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
    let parsed = parse_image_url(url)?;
    let max = self.max_bytes as u64;

    let mut response =
      self.client.get(parsed).send().await.map_err(|e| Self::classify(url, e))?;

    let status = response.status();
    if !status.is_success() {
      return Err(FetchError::Status {
        url: url.to_string(),
        status: status.as_u16(),
      });
    }

    if let Some(announced) = response.content_length()
      && announced > max
    {
      return Err(FetchError::TooLarge {
        actual: announced,
        max,
      });
    }

    // Content-Length can be absent or wrong, so the cap is enforced while reading too
    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(|e| Self::classify(url, e))? {
      let received = (body.len() + chunk.len()) as u64;
      if received > max {
        return Err(FetchError::TooLarge {
          actual: received,
          max,
        });
      }
      body.extend_from_slice(&chunk);
    }

    debug!(url, bytes = body.len(), "image downloaded");
    Ok(body)
  }
}
