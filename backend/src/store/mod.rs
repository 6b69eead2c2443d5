//! Process-wide dataset cache.
//!
//! The normalized penalty table is built once, on first access, and shared
//! read-only afterwards. Concurrent first callers are serialized so the
//! workbook is normalized exactly once. [`invalidate`] drops the cached table
//! so the next access reloads it; source changes are never picked up on
//! their own.
//!
//! # Example
//!
//! ```no_run
//! use penalty_insights::store;
//!
//! let dataset = store::load().expect("Failed to load penalties");
//! println!("{} records from {:?}", dataset.len(), dataset.sheets);
//! ```

pub mod checksum;

use chrono::{DateTime, Utc};
use log::info;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::config::PenaltiesConfig;
use crate::error::LoadResult;
use crate::models::NormalizedRecord;
use crate::parsing::{read_workbook_dir, RawSheet, Workbook};
use crate::preprocessing::{normalize_with_summary, NormalizationSummary};

pub use checksum::calculate_checksum;

/// The normalized penalty table plus provenance.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub records: Vec<NormalizedRecord>,
    /// Sheets that were loaded, in load order.
    pub sheets: Vec<String>,
    /// SHA-256 over the raw sheets.
    pub checksum: String,
    pub loaded_at: DateTime<Utc>,
    pub summary: NormalizationSummary,
}

impl Dataset {
    /// Normalize an already-read workbook.
    pub fn from_workbook(workbook: &Workbook) -> LoadResult<Self> {
        Self::from_sheets(workbook.sheets())
    }

    /// Normalize sheets given in season order.
    pub fn from_sheets(sheets: &[RawSheet]) -> LoadResult<Self> {
        let (records, summary) = normalize_with_summary(sheets)?;
        let dataset = Self {
            records,
            sheets: sheets.iter().map(|s| s.name().to_string()).collect(),
            checksum: calculate_checksum(sheets),
            loaded_at: Utc::now(),
            summary,
        };
        info!(
            "Loaded {} penalty records from {} sheets (checksum {})",
            dataset.records.len(),
            dataset.sheets.len(),
            &dataset.checksum[..12]
        );
        Ok(dataset)
    }

    pub fn records(&self) -> &[NormalizedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Read and normalize the workbook directory named by the configuration.
pub fn load_from_config(config: &PenaltiesConfig) -> LoadResult<Dataset> {
    load_from_dir(&config.source.path, &config.source.sheets)
}

/// Read and normalize `<dir>/<sheet>.csv` for each allow-listed sheet.
pub fn load_from_dir(dir: &Path, sheets: &[String]) -> LoadResult<Dataset> {
    let workbook = read_workbook_dir(dir, sheets)?;
    Dataset::from_workbook(&workbook)
}

/// Memoized holder for one [`Dataset`].
///
/// Readers only clone an `Arc` under a read lock. The init mutex serializes
/// loaders, so a load function runs at most once per invalidation.
pub struct DatasetCache {
    slot: RwLock<Option<Arc<Dataset>>>,
    init: Mutex<()>,
    loads: AtomicUsize,
}

impl DatasetCache {
    pub const fn new() -> Self {
        Self {
            slot: parking_lot::const_rwlock(None),
            init: parking_lot::const_mutex(()),
            loads: AtomicUsize::new(0),
        }
    }

    /// The cached dataset, if one has been loaded.
    pub fn get(&self) -> Option<Arc<Dataset>> {
        self.slot.read().clone()
    }

    /// Return the cached dataset, running `load` first if there is none.
    ///
    /// A failed load leaves the cache empty so a later call can retry.
    pub fn get_or_try_init<F>(&self, load: F) -> LoadResult<Arc<Dataset>>
    where
        F: FnOnce() -> LoadResult<Dataset>,
    {
        if let Some(dataset) = self.get() {
            return Ok(dataset);
        }

        let _guard = self.init.lock();
        if let Some(dataset) = self.get() {
            return Ok(dataset);
        }

        let dataset = Arc::new(load()?);
        self.loads.fetch_add(1, Ordering::SeqCst);
        *self.slot.write() = Some(Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Drop the cached dataset. Callers holding an `Arc` keep their copy.
    pub fn invalidate(&self) {
        let _guard = self.init.lock();
        self.slot.write().take();
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Number of successful loads since creation.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Global dataset instance shared by the whole process.
static DATASET: DatasetCache = DatasetCache::new();

/// Initialize the global dataset from an explicit configuration.
///
/// Has no effect if the dataset is already loaded.
pub fn init_dataset(config: &PenaltiesConfig) -> LoadResult<Arc<Dataset>> {
    DATASET.get_or_try_init(|| load_from_config(config))
}

/// Get the global dataset, loading it from the resolved configuration on
/// first use.
pub fn load() -> LoadResult<Arc<Dataset>> {
    DATASET.get_or_try_init(|| {
        let config = PenaltiesConfig::resolve()?;
        load_from_config(&config)
    })
}

/// Drop the global dataset so the next [`load`] re-reads the source.
pub fn invalidate() {
    DATASET.invalidate();
}
