use crate::config::{Config, FallbackConfig};
use crate::error::{GrabError, Result};
use crate::extractor::ImageExtractor;
use crate::filename;
use crate::models::{DownloadResult, FallbackCandidate, ImageReference, RunOutcome, RunSummary};
use crate::report;
use crate::traits::{Fetcher, Method};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use url::Url;

/// Drives one run: fetch the page, extract images, download them in order.
pub struct Downloader<F: Fetcher> {
    config: Config,
    fetcher: F,
    extractor: ImageExtractor,
}

impl<F: Fetcher> Downloader<F> {
    pub fn new(config: Config, fetcher: F) -> Self {
        Self {
            config,
            fetcher,
            extractor: ImageExtractor::new(),
        }
    }

    pub fn output_folder(&self) -> PathBuf {
        PathBuf::from(&self.config.output_folder)
    }

    /// Errors only for an invalid target URL or an output folder that cannot be created.
    pub async fn run(&self) -> Result<RunSummary> {
        let output_folder = self.output_folder();
        tokio::fs::create_dir_all(&output_folder).await?;

        let page_url = Url::parse(&self.config.target_url)?;
        report::loading_page(&page_url);

        let body = match self.fetch_page(&page_url).await {
            Ok(body) => body,
            Err(e) => {
                error!("[DOWNLOADER] {}", e);
                report::page_unreachable(&e);

                if self.config.fallback.on_page_error {
                    info!("[DOWNLOADER] Page unreachable, guessing conventional image locations");
                    return Ok(self.finish(RunOutcome::Fallback, 0, self.run_fallback(&page_url).await));
                }
                return Ok(self.finish(RunOutcome::PageUnreachable, 0, Vec::new()));
            }
        };

        let images = self.extractor.extract(&body, &page_url);
        info!("[DOWNLOADER] Extracted {} images from {}", images.len(), page_url);

        if images.is_empty() {
            report::no_images();
            return Ok(self.finish(RunOutcome::Fallback, 0, self.run_fallback(&page_url).await));
        }

        report::found(images.len());
        let results = self.download_all(&images).await;
        Ok(self.finish(RunOutcome::Extracted, images.len(), results))
    }

    async fn fetch_page(&self, page_url: &Url) -> Result<Vec<u8>> {
        let response = self
            .fetcher
            .fetch(page_url.as_str(), Method::Get, self.page_timeout())
            .await
            .map_err(GrabError::PageFetch)?;
        debug!("[DOWNLOADER] Page body: {} bytes", response.body.len());
        Ok(response.body)
    }

    /// Sequential, in extraction order, pausing between images.
    pub async fn download_all(&self, images: &[ImageReference]) -> Vec<DownloadResult> {
        let total = images.len();
        let delay = Duration::from_millis(self.config.request_delay_ms);
        let mut results = Vec::with_capacity(total);

        for (index, image) in images.iter().enumerate() {
            let ordinal = index + 1;
            report::progress(ordinal, total, image);

            let filename = self.resolve_filename(image.url(), ordinal).await;
            results.push(self.download_to(image.url(), &filename).await);

            if ordinal < total && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        results
    }

    /// Uses the URL's own name when it has one, otherwise probes `Content-Type` with HEAD.
    pub async fn resolve_filename(&self, url: &Url, ordinal: usize) -> String {
        if let Some(name) = filename::provisional_filename(url) {
            return name;
        }

        match self.fetcher.fetch(url.as_str(), Method::Head, self.probe_timeout()).await {
            Ok(response) => filename::resolve(url, Some(ordinal), Some(&response.headers)),
            Err(e) => {
                debug!("[DOWNLOADER] Content-Type probe failed for {}: {}", url, e);
                filename::resolve(url, Some(ordinal), None)
            }
        }
    }

    pub async fn download_to(&self, url: &Url, filename: &str) -> DownloadResult {
        let result = match self.try_download(url, filename).await {
            Ok(bytes) => DownloadResult::success(url.as_str(), filename, bytes),
            Err(e) => {
                warn!("[DOWNLOADER] {} -> {}: {}", url, filename, e);
                DownloadResult::failure(url.as_str(), filename, e.to_string())
            }
        };
        report::attempt(&result);
        result
    }

    async fn try_download(&self, url: &Url, filename: &str) -> Result<u64> {
        let response = self
            .fetcher
            .fetch(url.as_str(), Method::Get, self.page_timeout())
            .await
            .map_err(GrabError::ImageFetch)?;

        let path = self.output_folder().join(filename);
        tokio::fs::write(&path, &response.body)
            .await
            .map_err(|e| GrabError::write(&path, e))?;

        debug!("[DOWNLOADER] Wrote {} bytes to {:?}", response.body.len(), path);
        Ok(response.body.len() as u64)
    }

    /// Guess conventional names; the first hit for a base name ends its search.
    async fn run_fallback(&self, page_url: &Url) -> Vec<DownloadResult> {
        let mut results = Vec::new();

        for base_name in &self.config.fallback.base_names {
            for candidate in candidates_for(&self.config.fallback, base_name) {
                let url = match page_url.join(&candidate.relative_path()) {
                    Ok(url) => url,
                    Err(e) => {
                        warn!("[DOWNLOADER] Bad fallback path {}: {}", candidate.relative_path(), e);
                        continue;
                    }
                };

                let result = self.download_to(&url, &candidate.filename()).await;
                let found = result.is_success();
                results.push(result);
                if found {
                    info!("[DOWNLOADER] Found {} at {}", base_name, url);
                    break;
                }
            }
        }

        results
    }

    fn finish(&self, outcome: RunOutcome, discovered: usize, results: Vec<DownloadResult>) -> RunSummary {
        let summary = RunSummary {
            outcome,
            discovered,
            results,
            output_folder: self.output_folder(),
        };
        report::summary(&summary);
        summary
    }

    fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.config.page_timeout_secs)
    }

    fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.config.probe_timeout_secs)
    }
}

/// Attempt order for one base name: each extension, and within it each prefix.
pub fn candidates_for(fallback: &FallbackConfig, base_name: &str) -> Vec<FallbackCandidate> {
    fallback
        .extensions
        .iter()
        .flat_map(|extension| {
            fallback.prefixes.iter().map(move |prefix| FallbackCandidate {
                base_name: base_name.to_string(),
                extension: extension.clone(),
                prefix: prefix.clone(),
            })
        })
        .collect()
}
