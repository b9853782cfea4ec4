use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::models::SeriesCatalog;
use crate::utils::error::Result;

/// Whole-file persistence for the series catalog.
///
/// A missing or corrupted catalog loads as an empty one. Any other read failure is an
/// error, so callers never save over a catalog they could not read.
#[cfg_attr(test, mockall::automock)]
pub trait SeriesStore: Send + Sync {
    fn load(&self) -> Result<SeriesCatalog>;
    fn save(&self, catalog: &SeriesCatalog) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SeriesStore for JsonFileStore {
    fn load(&self) -> Result<SeriesCatalog> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No catalog at {}, starting empty", self.path.display());
                return Ok(SeriesCatalog::new());
            }
            Err(e) => {
                tracing::error!("Could not read {}: {}", self.path.display(), e);
                return Err(e.into());
            }
        };

        match serde_json::from_str(&raw) {
            Ok(catalog) => Ok(catalog),
            Err(e) => {
                tracing::warn!(
                    "{} is empty or corrupted ({}). Starting with an empty catalog.",
                    self.path.display(),
                    e
                );
                Ok(SeriesCatalog::new())
            }
        }
    }

    fn save(&self, catalog: &SeriesCatalog) -> Result<()> {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        catalog.serialize(&mut serializer)?;
        buf.push(b'\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Replace the file in one step so an interrupted write cannot truncate the catalog
        let temp = self.temp_path();
        fs::write(&temp, &buf)?;
        fs::rename(&temp, &self.path)?;

        tracing::info!("Saved {} tracked series to {}", catalog.len(), self.path.display());
        Ok(())
    }
}
