use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single HTTP exchange.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },
}

#[derive(Error, Debug)]
pub enum GrabError {
    #[error("Page fetch error: {0}")]
    PageFetch(TransportError),

    #[error("Image fetch error: {0}")]
    ImageFetch(TransportError),

    #[error("Write error for {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),
}

impl GrabError {
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Only an unreachable target page stops the primary path of a run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::PageFetch(_))
    }
}

impl TransportError {
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self::Status {
            url: url.into(),
            status,
        }
    }
}

pub type Result<T> = std::result::Result<T, GrabError>;
