//! Fetch one page, discover the images it references and save them locally.

pub mod config;
pub mod downloader;
pub mod error;
pub mod extractor;
pub mod filename;
pub mod models;
pub mod report;
pub mod traits;
pub mod utils;

pub use config::Config;
pub use downloader::Downloader;
pub use error::{GrabError, Result, TransportError};
pub use models::{DownloadResult, ImageReference, RunOutcome, RunSummary};
pub use traits::{FetchResponse, Fetcher, Method};
pub use utils::HttpClient;
