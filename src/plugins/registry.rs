use std::collections::HashMap;
use std::sync::Arc;

use super::scrapers::AsuraScraper;
use super::traits::SiteScraper;
use crate::config::ScraperConfig;
use crate::utils::error::{AppError, Result};

pub type SiteScraperBox = Box<dyn SiteScraper>;
pub type ScraperFactory = Arc<dyn Fn() -> Result<SiteScraperBox> + Send + Sync>;

/// Site identifiers are matched case-insensitively and without surrounding whitespace.
pub fn normalize_site(site: &str) -> String {
    site.trim().to_lowercase()
}

/// Maps site identifiers to the factory building that site's adapter.
#[derive(Clone, Default)]
pub struct ScraperRegistry {
    factories: HashMap<String, ScraperFactory>,
}

impl ScraperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in adapter, configured from `config`.
    pub fn with_default_scrapers(config: &ScraperConfig) -> Self {
        let mut registry = Self::new();

        let asura_config = config.clone();
        let asura: ScraperFactory = Arc::new(move || -> Result<SiteScraperBox> {
            Ok(Box::new(AsuraScraper::new(&asura_config)?))
        });
        registry.register_factory(AsuraScraper::SITE, asura.clone());
        registry.register_factory("asuracomic", asura);

        registry
    }

    /// Register an adapter factory, replacing any previous one for the same site
    pub fn register<F>(&mut self, site: &str, factory: F)
    where
        F: Fn() -> Result<SiteScraperBox> + Send + Sync + 'static,
    {
        self.register_factory(site, Arc::new(factory));
    }

    pub fn register_factory(&mut self, site: &str, factory: ScraperFactory) {
        self.factories.insert(normalize_site(site), factory);
    }

    /// Check if an adapter exists for a site
    pub fn has_site(&self, site: &str) -> bool {
        self.factories.contains_key(&normalize_site(site))
    }

    /// List all registered site identifiers, sorted
    pub fn list_sites(&self) -> Vec<String> {
        let mut sites: Vec<String> = self.factories.keys().cloned().collect();
        sites.sort();
        sites
    }

    /// Build the adapter for `site`
    pub fn resolve(&self, site: &str) -> Result<SiteScraperBox> {
        let key = normalize_site(site);
        let factory = self
            .factories
            .get(&key)
            .ok_or_else(|| AppError::UnknownSite { site: key.clone() })?;

        factory().map_err(|e| AppError::Scraper {
            site: key,
            message: format!("failed to initialize adapter: {}", e),
        })
    }
}
