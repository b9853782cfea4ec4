use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The newest chapter a site lists for a series, as scraped from the series page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterInfo {
    pub title: String,
    pub chapter_number: u64,
    pub chapter_url: String,
}

/// Trait for implementing site adapters (Asura Scans, ...)
#[async_trait]
pub trait SiteScraper: Send + Sync {
    /// Display name used in logs
    fn name(&self) -> &str;

    /// Fetches `series_url` once and extracts its latest chapter.
    ///
    /// Every failure (network, HTTP status, unrecognised page layout, missing chapter
    /// number) is logged by the implementation and reported as `None`.
    async fn get_latest_chapter(&self, series_url: &str) -> Option<ChapterInfo>;
}
