use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parsing error: {message}")]
    Parse { message: String },

    #[error("Element not found: {selector}")]
    ElementNotFound { selector: String },

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("No scraper registered for site '{site}'")]
    UnknownSite { site: String },

    #[error("Scraper error: {site}: {message}")]
    Scraper { site: String, message: String },

    #[error("Notification error: {0}")]
    Notification(String),
}

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
