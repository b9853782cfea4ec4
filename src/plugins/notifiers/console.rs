use crate::plugins::traits::{ChapterUpdate, Notifier};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Prints new chapters to standard output.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        ConsoleNotifier
    }

    fn format_update(&self, update: &ChapterUpdate) -> String {
        format!(
            "✅ NEW CHAPTER FOUND! {} - Chapter {} (was {})\n   -> Link: {}",
            update.title, update.chapter_number, update.previous_chapter, update.chapter_url
        )
    }
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    fn name(&self) -> &str {
        "console"
    }

    async fn notify(&self, update: &ChapterUpdate) -> Result<()> {
        println!("{}", self.format_update(update));
        Ok(())
    }
}
