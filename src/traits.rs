use crate::error::TransportError;
use reqwest::header::HeaderMap;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
}

/// A successful (2xx) HTTP exchange.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Transport used by the downloader for pages, images and content-type probes
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    /// Perform one request; non-2xx statuses come back as `TransportError::Status`
    async fn fetch(&self, url: &str, method: Method, timeout: Duration) -> Result<FetchResponse, TransportError>;
}
