use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Persisted state for one series: where to look and the newest chapter seen there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesRecord {
    pub url: String,
    pub last_chapter: u64,
}

/// Flattened view of a catalog entry, keyed by `(site, title)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedSeries {
    pub site: String,
    pub title: String,
    pub url: String,
    pub last_chapter: u64,
}

pub type SiteSeries = IndexMap<String, SeriesRecord>;

/// Every tracked series, grouped by site identifier and then by series title.
///
/// Serializes as the nested object `{ site: { title: { url, last_chapter } } }`. Sites and
/// titles keep the order they were loaded or added in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesCatalog {
    sites: IndexMap<String, SiteSeries>,
}

impl SeriesCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.values().all(|series| series.is_empty())
    }

    /// Number of tracked series across all sites.
    pub fn len(&self) -> usize {
        self.sites.values().map(|series| series.len()).sum()
    }

    pub fn get(&self, site: &str, title: &str) -> Option<&SeriesRecord> {
        self.sites.get(site).and_then(|series| series.get(title))
    }

    /// Inserts or overwrites the record for `(site, title)`, returning the previous one.
    pub fn upsert(
        &mut self,
        site: impl Into<String>,
        title: impl Into<String>,
        record: SeriesRecord,
    ) -> Option<SeriesRecord> {
        self.sites
            .entry(site.into())
            .or_default()
            .insert(title.into(), record)
    }

    pub fn sites_mut(&mut self) -> impl Iterator<Item = (&String, &mut SiteSeries)> {
        self.sites.iter_mut()
    }

    pub fn tracked_series(&self) -> Vec<TrackedSeries> {
        self.sites
            .iter()
            .flat_map(|(site, series)| {
                series.iter().map(move |(title, record)| TrackedSeries {
                    site: site.clone(),
                    title: title.clone(),
                    url: record.url.clone(),
                    last_chapter: record.last_chapter,
                })
            })
            .collect()
    }
}
