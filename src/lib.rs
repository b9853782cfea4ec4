pub mod config;
pub mod models;
pub mod plugins;
pub mod storage;
pub mod tracker;
pub mod utils;

// Re-export commonly used types
pub use config::AppConfig;
pub use models::{SeriesCatalog, SeriesRecord, TrackedSeries};
pub use storage::{JsonFileStore, SeriesStore};
pub use tracker::{AddOutcome, CheckSummary, UpdateChecker};
pub use utils::error::AppError;

pub type Result<T> = std::result::Result<T, AppError>;
