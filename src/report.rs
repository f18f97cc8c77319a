use crate::models::{DownloadResult, RunOutcome, RunSummary};
use std::fmt::Display;

pub fn loading_page(url: impl Display) {
    println!("Loading page: {}", url);
    println!("Looking for images...");
}

pub fn page_unreachable(reason: impl Display) {
    println!("✗ Failed to load page: {}", reason);
}

pub fn no_images() {
    println!("No images found on the page.");
    println!("\nTrying conventional image locations directly...");
}

pub fn found(total: usize) {
    println!("\nFound {} images", total);
    println!("Starting download...\n");
}

pub fn progress(index: usize, total: usize, url: impl Display) {
    println!("[{}/{}] {}", index, total, url);
}

pub fn attempt(result: &DownloadResult) {
    match &result.outcome {
        Ok(bytes) => println!("✓ Saved: {} ({} bytes)", result.filename, bytes),
        Err(reason) => println!("✗ Failed {}: {}", result.url, reason),
    }
}

/// The fallback branch reports per-attempt lines only.
pub fn summary(summary: &RunSummary) {
    if summary.outcome == RunOutcome::Fallback {
        return;
    }
    println!(
        "\n✓ Done! Downloaded {} of {} images",
        summary.downloaded(),
        summary.discovered
    );
    println!("Images saved to: {}/", summary.output_folder.display());
}
