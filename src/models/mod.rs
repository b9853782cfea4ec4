pub mod series;

pub use series::{SeriesCatalog, SeriesRecord, SiteSeries, TrackedSeries};
