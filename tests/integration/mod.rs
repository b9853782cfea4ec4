// Shared fixtures for the integration tests.
// The Asura adapter runs against a local wiremock server and the catalog lives in a temp dir.

pub mod checker_tests;

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use manga_watcher::config::ScraperConfig;
use manga_watcher::plugins::ScraperRegistry;
use manga_watcher::plugins::registry::SiteScraperBox;
use manga_watcher::plugins::scrapers::AsuraScraper;
use manga_watcher::{JsonFileStore, SeriesCatalog, SeriesStore, UpdateChecker};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// File store that counts how many times the catalog was written.
#[derive(Clone)]
pub struct CountingStore {
    inner: JsonFileStore,
    saves: Arc<AtomicUsize>,
}

impl CountingStore {
    pub fn new(path: &Path) -> Self {
        Self {
            inner: JsonFileStore::new(path),
            saves: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl SeriesStore for CountingStore {
    fn load(&self) -> manga_watcher::Result<SeriesCatalog> {
        self.inner.load()
    }

    fn save(&self, catalog: &SeriesCatalog) -> manga_watcher::Result<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(catalog)
    }
}

pub fn series_page(title: &str, newest_chapter: u64) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <body>
    <nav><a href="/series/popular/chapter/500">Popular</a></nav>
    <h1>{title}</h1>
    <div class="grid md:grid-cols-2 lg:grid-cols-3 gap-3">
      <a href="/series/slug/chapter/{newest}">Chapter {newest}</a>
      <a href="/series/slug/chapter/{previous}">Chapter {previous}</a>
    </div>
  </body>
</html>"#,
        title = title,
        newest = newest_chapter,
        previous = newest_chapter.saturating_sub(1),
    )
}

/// Serves `series_page(title, chapter)` at `route`.
pub async fn serve_series(server: &MockServer, route: &str, title: &str, chapter: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(series_page(title, chapter)))
        .mount(server)
        .await;
}

/// Registry exposing the real Asura adapter under `site`.
pub fn asura_registry(site: &str) -> ScraperRegistry {
    let config = ScraperConfig {
        request_timeout: 2,
        ..ScraperConfig::default()
    };

    let mut registry = ScraperRegistry::new();
    registry.register(site, move || -> manga_watcher::Result<SiteScraperBox> {
        Ok(Box::new(AsuraScraper::new(&config)?))
    });
    registry
}

pub fn create_test_checker(store: CountingStore) -> UpdateChecker<CountingStore> {
    UpdateChecker::new(asura_registry("asura"), store)
}
