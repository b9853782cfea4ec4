// Site adapter implementations
pub mod asura;

pub use asura::AsuraScraper;
