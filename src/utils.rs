use crate::config::Config;
use crate::error::{Result, TransportError};
use crate::traits::{FetchResponse, Fetcher, Method};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Fetcher for HttpClient {
    async fn fetch(
        &self,
        url: &str,
        method: Method,
        timeout: Duration,
    ) -> std::result::Result<FetchResponse, TransportError> {
        let request = match method {
            Method::Get => self.client.get(url),
            Method::Head => self.client.head(url),
        };

        debug!("[FETCH] {:?} {} (timeout {:?})", method, url, timeout);
        let response = request.timeout(timeout).send().await?;

        if !response.status().is_success() {
            return Err(TransportError::status(url, response.status().as_u16()));
        }

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = match method {
            Method::Get => response.bytes().await?.to_vec(),
            Method::Head => Vec::new(),
        };

        Ok(FetchResponse { status, headers, body })
    }
}
