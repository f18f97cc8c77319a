//! Local filenames for downloaded images.
//!
//! A URL whose last path segment has an extension keeps that segment verbatim.
//! Otherwise a name is synthesized from the ordinal (or a URL digest) and an
//! extension taken from the `Content-Type` header, defaulting to `jpg`.

use reqwest::header::{HeaderMap, CONTENT_TYPE};
use sha2::{Digest, Sha256};
use url::Url;

pub const DEFAULT_EXTENSION: &str = "jpg";

/// Final path segment of `url` when it is non-empty and contains a `.`.
pub fn provisional_filename(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.last()?;
    if segment.is_empty() || !segment.contains('.') {
        return None;
    }
    Some(segment.to_string())
}

/// Extension derived from an `image/*` content type, e.g. `image/svg+xml; charset=utf-8` -> `svg`.
pub fn extension_from_content_type(content_type: &str) -> Option<String> {
    let essence = content_type.split(';').next()?.trim().to_ascii_lowercase();
    let (kind, subtype) = essence.split_once('/')?;
    if kind.trim() != "image" {
        return None;
    }
    let subtype = subtype.trim();
    let subtype = subtype.split_once('+').map_or(subtype, |(base, _)| base);
    if subtype.is_empty() {
        return None;
    }
    Some(subtype.to_string())
}

/// Resolve the filename for `url`. Never fails and never returns an empty string.
///
/// Synthesized extensions come from `image/*` content types only, with any
/// `+suffix` dropped (`image/svg+xml` gives `svg`); other types give `jpg`.
pub fn resolve(url: &Url, ordinal: Option<usize>, headers: Option<&HeaderMap>) -> String {
    if let Some(name) = provisional_filename(url) {
        return name;
    }

    let extension = headers
        .and_then(|h| h.get(CONTENT_TYPE))
        .and_then(|value| value.to_str().ok())
        .and_then(extension_from_content_type)
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

    match ordinal {
        Some(ordinal) => format!("image_{}.{}", ordinal, extension),
        None => format!("image_{}.{}", url_digest(url), extension),
    }
}

/// First 12 hex chars of the SHA-256 of the URL; stable across runs.
fn url_digest(url: &Url) -> String {
    let digest = Sha256::digest(url.as_str().as_bytes());
    hex::encode(&digest[..6])
}
