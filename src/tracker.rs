use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::{SeriesRecord, TrackedSeries};
use crate::plugins::registry::ScraperRegistry;
use crate::plugins::traits::{ChapterUpdate, Notifier};
use crate::storage::SeriesStore;
use crate::utils::error::Result;

/// Outcome of one pass over every tracked series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSummary {
    pub series_checked: usize,
    pub updates: Vec<ChapterUpdate>,
    /// Sites in the catalog with no registered adapter.
    pub skipped_sites: Vec<String>,
    /// Series whose page could not be scraped this cycle.
    pub failed_series: Vec<TrackedSeries>,
}

impl CheckSummary {
    pub fn has_updates(&self) -> bool {
        !self.updates.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added {
        series: TrackedSeries,
        /// True when an entry with the same site and title already existed.
        replaced: bool,
    },
    UnknownSite {
        site: String,
    },
    ScrapeFailed {
        site: String,
        url: String,
    },
}

/// Drives update checks and additions against a [`SeriesStore`].
///
/// The catalog is loaded in full at the start of each operation and saved in full at the
/// end; series are scraped one at a time.
pub struct UpdateChecker<S: SeriesStore> {
    registry: ScraperRegistry,
    store: S,
    notifiers: Vec<Box<dyn Notifier>>,
}

impl<S: SeriesStore> UpdateChecker<S> {
    pub fn new(registry: ScraperRegistry, store: S) -> Self {
        Self {
            registry,
            store,
            notifiers: Vec::new(),
        }
    }

    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifiers.push(notifier);
        self
    }

    pub fn registry(&self) -> &ScraperRegistry {
        &self.registry
    }

    pub async fn check_for_updates(&self) -> Result<CheckSummary> {
        tracing::info!("Checking for new chapters...");

        let mut catalog = self.store.load()?;
        let mut summary = CheckSummary::default();

        for (site, series) in catalog.sites_mut() {
            let scraper = match self.registry.resolve(site) {
                Ok(scraper) => scraper,
                Err(e) => {
                    tracing::warn!("Skipping {} tracked series: {}", series.len(), e);
                    summary.skipped_sites.push(site.clone());
                    continue;
                }
            };

            for (title, record) in series.iter_mut() {
                tracing::info!("Checking '{}' on {}...", title, site);
                summary.series_checked += 1;

                let Some(latest) = scraper.get_latest_chapter(&record.url).await else {
                    summary.failed_series.push(TrackedSeries {
                        site: site.clone(),
                        title: title.clone(),
                        url: record.url.clone(),
                        last_chapter: record.last_chapter,
                    });
                    continue;
                };

                match latest.chapter_number.cmp(&record.last_chapter) {
                    Ordering::Greater => {
                        tracing::info!(
                            "New chapter for '{}': {} -> {}",
                            title,
                            record.last_chapter,
                            latest.chapter_number
                        );
                        summary.updates.push(ChapterUpdate {
                            site: site.clone(),
                            title: title.clone(),
                            previous_chapter: record.last_chapter,
                            chapter_number: latest.chapter_number,
                            chapter_url: latest.chapter_url,
                        });
                        record.last_chapter = latest.chapter_number;
                    }
                    Ordering::Less => {
                        tracing::warn!(
                            "'{}' on {} reports chapter {} but {} is already recorded; keeping {}",
                            title,
                            site,
                            latest.chapter_number,
                            record.last_chapter,
                            record.last_chapter
                        );
                    }
                    Ordering::Equal => {
                        tracing::debug!("'{}' is still at chapter {}", title, record.last_chapter);
                    }
                }
            }
        }

        if !summary.has_updates() {
            tracing::info!("No new chapters found.");
            return Ok(summary);
        }

        self.store.save(&catalog)?;

        for update in &summary.updates {
            self.notify(update).await;
        }

        Ok(summary)
    }

    /// Scrapes `series_url` once and starts tracking it under the scraped title.
    ///
    /// Entries are keyed by the title the site reports, so a series renamed upstream is
    /// added again under its new title rather than replacing the old entry.
    pub async fn add_new_series(&self, site: &str, series_url: &str) -> Result<AddOutcome> {
        let site = site.trim().to_string();
        let series_url = series_url.trim();
        tracing::info!("Adding new series from {}...", site);

        let scraper = match self.registry.resolve(&site) {
            Ok(scraper) => scraper,
            Err(e) => {
                tracing::warn!("{}", e);
                return Ok(AddOutcome::UnknownSite { site });
            }
        };

        let Some(latest) = scraper.get_latest_chapter(series_url).await else {
            return Ok(AddOutcome::ScrapeFailed {
                site,
                url: series_url.to_string(),
            });
        };

        let mut catalog = self.store.load()?;
        let replaced = catalog
            .upsert(
                site.clone(),
                latest.title.clone(),
                SeriesRecord {
                    url: series_url.to_string(),
                    last_chapter: latest.chapter_number,
                },
            )
            .is_some();
        self.store.save(&catalog)?;

        tracing::info!("Now tracking '{}' at chapter {}", latest.title, latest.chapter_number);

        Ok(AddOutcome::Added {
            series: TrackedSeries {
                site,
                title: latest.title,
                url: series_url.to_string(),
                last_chapter: latest.chapter_number,
            },
            replaced,
        })
    }

    pub fn tracked_series(&self) -> Result<Vec<TrackedSeries>> {
        Ok(self.store.load()?.tracked_series())
    }

    async fn notify(&self, update: &ChapterUpdate) {
        for notifier in &self.notifiers {
            if let Err(e) = notifier.notify(update).await {
                tracing::warn!("{} notifier failed for '{}': {}", notifier.name(), update.title, e);
            }
        }
    }
}
