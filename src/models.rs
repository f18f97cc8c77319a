use std::fmt;
use std::path::PathBuf;
use url::Url;

/// Absolute URL of a candidate image; equality is on the serialized URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageReference(Url);

impl ImageReference {
    pub fn new(url: Url) -> Self {
        Self(url)
    }

    pub fn url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct DownloadResult {
    pub url: String,
    pub filename: String,
    /// Bytes written on success, human-readable cause on failure.
    pub outcome: Result<u64, String>,
}

impl DownloadResult {
    pub fn success(url: impl Into<String>, filename: impl Into<String>, bytes: u64) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
            outcome: Ok(bytes),
        }
    }

    pub fn failure(url: impl Into<String>, filename: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
            outcome: Err(detail.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// One conventional guess: `<prefix><base_name>.<extension>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackCandidate {
    pub base_name: String,
    pub extension: String,
    pub prefix: String,
}

impl FallbackCandidate {
    pub fn filename(&self) -> String {
        format!("{}.{}", self.base_name, self.extension)
    }

    pub fn relative_path(&self) -> String {
        format!("{}{}", self.prefix, self.filename())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Images were discovered on the page and downloaded one by one
    Extracted,
    /// The page had no discoverable images; conventional names were guessed
    Fallback,
    /// The page could not be fetched and no guessing was attempted
    PageUnreachable,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    pub discovered: usize,
    pub results: Vec<DownloadResult>,
    pub output_folder: PathBuf,
}

impl RunSummary {
    pub fn downloaded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.downloaded()
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Extracted => write!(f, "Extracted"),
            RunOutcome::Fallback => write!(f, "Fallback"),
            RunOutcome::PageUnreachable => write!(f, "PageUnreachable"),
        }
    }
}
