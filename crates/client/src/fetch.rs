//! Pluggable retrieval of raw snapshot bytes.
//!
//! Anything that can turn a location into bytes implements [`DataFetcher`];
//! the store decodes.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::time::Duration;

use tracing::debug;

use crate::error::{ClientError, Result};

/// Fetch raw bytes from a location (a URL or a path, depending on the
/// implementation).
pub trait DataFetcher: Send + Sync {
    fn fetch<'a>(
        &'a self,
        location: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>>;
}

/// HTTP GET over reqwest. Non-2xx responses are errors.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self> {
        Self::with_user_agent(concat!("gatelogue-client/", env!("CARGO_PKG_VERSION")))
    }

    pub fn with_user_agent(user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .user_agent(user_agent)
            .build()
            .map_err(ClientError::Client)?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        let transport = |source| ClientError::Transport {
            url: url.to_owned(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        debug!(url, bytes = body.len(), "fetched snapshot");
        Ok(body.to_vec())
    }
}

impl DataFetcher for ReqwestFetcher {
    fn fetch<'a>(
        &'a self,
        location: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>> {
        Box::pin(self.get(location))
    }
}

/// Reads the location as a local file path, for offline use.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileFetcher;

impl DataFetcher for FileFetcher {
    fn fetch<'a>(
        &'a self,
        location: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>> {
        Box::pin(async move {
            let bytes = tokio::fs::read(location).await.map_err(|source| ClientError::Io {
                path: PathBuf::from(location),
                source,
            })?;
            debug!(path = location, bytes = bytes.len(), "read snapshot file");
            Ok(bytes)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../types/testdata/sample.json");

    #[tokio::test]
    async fn test_file_fetcher_reads_bytes() {
        let bytes = FileFetcher.fetch(SAMPLE_PATH).await.unwrap();
        assert!(bytes.starts_with(b"{"));
    }

    #[tokio::test]
    async fn test_file_fetcher_missing_file() {
        let err = FileFetcher.fetch("/definitely/not/here.json").await.unwrap_err();
        match err {
            ClientError::Io { path, .. } => assert_eq!(path, PathBuf::from("/definitely/not/here.json")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_reqwest_fetcher_rejects_bad_user_agent() {
        assert!(ReqwestFetcher::with_user_agent("gatelogue-client/test").is_ok());

        match ReqwestFetcher::with_user_agent("bad\nagent") {
            Err(err @ ClientError::Client(_)) => {
                assert!(err.to_string().starts_with("failed to build HTTP client: "));
            }
            Err(other) => panic!("unexpected {other:?}"),
            Ok(_) => panic!("control characters accepted in user agent"),
        }
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_reqwest_fetcher_live() {
        let fetcher = ReqwestFetcher::new().unwrap();
        let bytes = fetcher
            .fetch(&crate::DataSource::NoSources.url())
            .await
            .unwrap();
        assert!(!bytes.is_empty());
    }
}
