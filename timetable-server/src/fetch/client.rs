//! Feed transport contract and its reqwest implementation.

use std::future::Future;
use std::io::Write;
use std::time::Duration;

use futures::StreamExt;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, LAST_MODIFIED, USER_AGENT};
use tempfile::NamedTempFile;

use crate::feed::FeedArchive;

use super::error::FetchError;

/// Default origin for the schedule feed.
pub const DEFAULT_FEED_URL: &str =
    "https://api.transport.nsw.gov.au/v1/gtfs/schedule/sydneytrains";

const DEFAULT_USER_AGENT: &str = "timetable-server";

/// Configuration for the feed transport.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// API key sent as `Authorization: apikey <key>`
    pub api_key: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FetchConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            timeout_secs: 30,
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Transport used to reach the schedule origin.
///
/// The conditional logic in [`super::Fetcher`] is written against this
/// contract so the network stays swappable (and scriptable in tests). An
/// origin that never supplies a validator degrades the fetcher to
/// always-download.
pub trait Transport: Send + Sync {
    /// Ask the origin for the resource's current freshness validator
    /// without downloading the body.
    fn probe(&self, url: &str)
    -> impl Future<Output = Result<Option<String>, FetchError>> + Send;

    /// Download the resource to durable temporary storage.
    ///
    /// A non-success response status is an error; the returned archive
    /// carries the validator the origin sent with the body, if any.
    fn download(&self, url: &str) -> impl Future<Output = Result<FeedArchive, FetchError>> + Send;
}

/// reqwest-backed transport with API-key authentication.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with the API key and user agent installed as
    /// default headers.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();

        let auth = HeaderValue::from_str(&format!("apikey {}", config.api_key))
            .map_err(|_| FetchError::InvalidApiKey)?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    fn probe(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<Option<String>, FetchError>> + Send {
        async move {
            let response = self.http.head(url).send().await?;
            Ok(last_modified(&response))
        }
    }

    fn download(&self, url: &str) -> impl Future<Output = Result<FeedArchive, FetchError>> + Send {
        async move {
            let response = self.http.get(url).send().await?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }

            let validator = last_modified(&response);

            // Archives run to tens of megabytes; stream the body to disk
            // chunk-wise instead of buffering it.
            let mut file = NamedTempFile::new()?;
            let mut body = response.bytes_stream();
            while let Some(chunk) = body.next().await {
                file.write_all(&chunk?)?;
            }
            file.flush()?;

            Ok(FeedArchive::new(file.into_temp_path(), validator))
        }
    }
}

fn last_modified(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get(LAST_MODIFIED)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = FetchConfig::new("test-api-key");
        assert_eq!(config.api_key, "test-api-key");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_with_timeout() {
        let config = FetchConfig::new("test-api-key").with_timeout(5);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn transport_rejects_unsendable_api_key() {
        let err = HttpTransport::new(FetchConfig::new("bad\nkey")).unwrap_err();
        assert!(matches!(err, FetchError::InvalidApiKey));
    }
}
