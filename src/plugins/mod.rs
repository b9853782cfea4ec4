pub mod traits;
pub mod registry;
pub mod scrapers;
pub mod notifiers;

pub use registry::ScraperRegistry;
pub use traits::{SiteScraper, Notifier};
