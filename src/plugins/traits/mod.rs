pub mod scraper;
pub mod notifier;

pub use scraper::{SiteScraper, ChapterInfo};
pub use notifier::{Notifier, ChapterUpdate};
