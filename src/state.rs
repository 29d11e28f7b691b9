use std::path::Path;
use std::sync::Arc;

use crate::config::{Settings, FIRST_YEAR, LAST_YEAR};
use crate::data::cache::DatasetCache;
use crate::data::loader::load_dataset;
use crate::data::model::Dataset;
use crate::data::source::{ArchiveSource, FileSource, HttpSource};

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    ByName,
    ByYear,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Overview, Tab::ByName, Tab::ByYear];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::ByName => "By Name",
            Tab::ByYear => "By Year",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Where the next load reads the archive from.
    pub source: Option<Box<dyn ArchiveSource>>,

    pub cache: DatasetCache,

    /// Ingested dataset (None until the first successful load).
    pub dataset: Option<Arc<Dataset>>,

    pub tab: Tab,

    /// "By Name" inputs.
    pub trend_name: String,
    pub plot_female: bool,
    pub plot_male: bool,

    /// "By Year" inputs; kept within the year bounds with start <= end.
    pub ratio_name: String,
    pub year_start: i32,
    pub year_end: i32,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Set one frame before the blocking load so "Downloading…" gets painted.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl AppState {
    /// State reading from the configured download URL.
    pub fn new(settings: &Settings) -> Self {
        match HttpSource::new(settings) {
            Ok(source) => Self::with_source(Box::new(source)),
            Err(e) => {
                log::error!("Cannot set up download: {e:#}");
                let mut state = Self::empty();
                state.status_message = Some(format!("Error: {e}"));
                state
            }
        }
    }

    pub fn with_source(source: Box<dyn ArchiveSource>) -> Self {
        Self {
            source: Some(source),
            ..Self::empty()
        }
    }

    fn empty() -> Self {
        Self {
            source: None,
            cache: DatasetCache::new(),
            dataset: None,
            tab: Tab::default(),
            trend_name: String::new(),
            plot_female: false,
            plot_male: false,
            ratio_name: String::new(),
            year_start: FIRST_YEAR,
            year_end: LAST_YEAR,
            status_message: None,
            loading: false,
        }
    }

    /// Whether a load should be scheduled: nothing loaded, nothing failed.
    pub fn needs_load(&self) -> bool {
        self.source.is_some()
            && self.dataset.is_none()
            && self.status_message.is_none()
            && !self.loading
    }

    /// Ingest from the current source (or the cache), blocking until done.
    pub fn load(&mut self) {
        let Some(source) = self.source.as_deref() else {
            self.loading = false;
            return;
        };

        match load_dataset(source, &self.cache) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} rows from {}",
                    dataset.len(),
                    source.describe()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load names archive: {e:#}");
                self.dataset = None;
                self.status_message = Some(format!("Error: {e}"));
                self.loading = false;
            }
        }
    }

    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
    }

    /// Drop the cached dataset and schedule a fresh ingestion.
    pub fn reload(&mut self) {
        self.cache.invalidate();
        self.dataset = None;
        self.status_message = None;
        self.loading = false;
    }

    /// Switch to a local archive and schedule loading it.
    pub fn open_archive(&mut self, path: &Path) {
        self.source = Some(Box::new(FileSource::new(path)));
        self.reload();
    }

    pub fn set_year_start(&mut self, year: i32) {
        self.year_start = year.clamp(FIRST_YEAR, LAST_YEAR);
        self.year_end = self.year_end.max(self.year_start);
    }

    pub fn set_year_end(&mut self, year: i32) {
        self.year_end = year.clamp(FIRST_YEAR, LAST_YEAR);
        self.year_start = self.year_start.min(self.year_end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::tests::archive_bytes;
    use crate::data::source::MemorySource;

    fn sample_state() -> AppState {
        let bytes = archive_bytes(&[
            ("yob1990.txt", "Mary,F,100\nJohn,M,90\n"),
            ("yob1991.txt", "Mary,F,120\nJohn,M,80\n"),
        ]);
        AppState::with_source(Box::new(MemorySource::new("sample", bytes)))
    }

    #[test]
    fn default_state_waits_to_download() {
        let state = AppState::default();
        let source = state.source.as_deref().unwrap();
        assert_eq!(source.describe(), crate::config::SSA_NAMES_URL);
        assert!(state.needs_load());
        assert!(state.dataset.is_none());
    }

    #[test]
    fn load_populates_the_dataset() {
        let mut state = sample_state();
        assert!(state.needs_load());
        state.loading = true;
        state.load();
        assert_eq!(state.dataset.as_ref().map(|d| d.len()), Some(4));
        assert!(!state.loading);
        assert!(!state.needs_load());
    }

    #[test]
    fn failed_load_reports_and_does_not_retry() {
        let mut state =
            AppState::with_source(Box::new(MemorySource::new("junk", b"not a zip".to_vec())));
        state.load();
        assert!(state.dataset.is_none());
        let msg = state.status_message.clone().unwrap();
        assert!(msg.starts_with("Error: Corrupt archive"));
        assert!(!state.needs_load());
    }

    #[test]
    fn reload_goes_back_to_the_source() {
        let mut state = sample_state();
        state.load();
        let first = state.dataset.clone().unwrap();

        state.reload();
        assert!(state.cache.get().is_none());
        assert!(state.needs_load());
        state.load();
        let second = state.dataset.clone().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn open_archive_switches_to_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.zip");
        std::fs::write(&path, archive_bytes(&[("yob2001.txt", "Ann,F,5\n")])).unwrap();

        let mut state = sample_state();
        state.load();
        state.open_archive(&path);
        state.load();
        assert_eq!(state.dataset.as_ref().map(|d| d.len()), Some(1));
    }

    #[test]
    fn year_range_stays_ordered_and_bounded() {
        let mut state = sample_state();
        state.set_year_start(1990);
        state.set_year_end(1950);
        assert_eq!((state.year_start, state.year_end), (1950, 1950));

        state.set_year_start(2100);
        assert_eq!((state.year_start, state.year_end), (LAST_YEAR, LAST_YEAR));

        state.set_year_end(1700);
        assert_eq!((state.year_start, state.year_end), (FIRST_YEAR, FIRST_YEAR));
    }
}
