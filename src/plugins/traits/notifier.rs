use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::utils::error::Result;

/// A series whose stored chapter was advanced during a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterUpdate {
    pub site: String,
    pub title: String,
    pub previous_chapter: u64,
    pub chapter_number: u64,
    pub chapter_url: String,
}

/// Trait for implementing notification methods (console, Discord, etc.)
#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &str;

    async fn notify(&self, update: &ChapterUpdate) -> Result<()>;
}
