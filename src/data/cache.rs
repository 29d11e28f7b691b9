use std::sync::{Arc, Mutex, MutexGuard};

use log::debug;

use super::model::Dataset;
use crate::error::Result;

/// Single-slot, lazily filled dataset cache.
///
/// The lock is held for the whole load, so concurrent callers on a cold cache
/// wait for the first load instead of starting their own.
#[derive(Debug, Default)]
pub struct DatasetCache {
    slot: Mutex<Option<Arc<Dataset>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset, or run `load` and keep its result.
    ///
    /// A failed load leaves the slot empty so the next call tries again.
    pub fn get_or_load<F>(&self, load: F) -> Result<Arc<Dataset>>
    where
        F: FnOnce() -> Result<Dataset>,
    {
        let mut slot = self.lock();
        if let Some(ds) = slot.as_ref() {
            debug!("Dataset cache hit ({} rows)", ds.len());
            return Ok(Arc::clone(ds));
        }

        let ds = Arc::new(load()?);
        *slot = Some(Arc::clone(&ds));
        Ok(ds)
    }

    /// Peek without loading.
    #[cfg(test)]
    pub fn get(&self) -> Option<Arc<Dataset>> {
        self.lock().clone()
    }

    /// Drop the cached dataset; the next `get_or_load` fetches again.
    pub fn invalidate(&self) {
        if self.lock().take().is_some() {
            debug!("Dataset cache invalidated");
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Arc<Dataset>>> {
        // The slot only ever holds a finished dataset, so a poisoned lock is still consistent.
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::data::model::{EntryTable, RawRecord, Sex};
    use crate::error::IngestError;

    fn tiny_dataset() -> Dataset {
        Dataset::concat(vec![EntryTable {
            year: 1990,
            records: vec![RawRecord {
                name: "Mary".to_string(),
                sex: Sex::Female,
                count: 1,
            }],
        }])
    }

    #[test]
    fn second_call_reuses_the_first_load() {
        let cache = DatasetCache::new();
        let loads = AtomicUsize::new(0);
        let load = || {
            loads.fetch_add(1, Ordering::SeqCst);
            Ok(tiny_dataset())
        };

        let a = cache.get_or_load(load).unwrap();
        let b = cache.get_or_load(load).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failures_are_not_cached() {
        let cache = DatasetCache::new();
        let err = cache
            .get_or_load(|| {
                Err(IngestError::MalformedFilename {
                    entry: "abc20x1.txt".to_string(),
                })
            })
            .unwrap_err();
        assert!(matches!(err, IngestError::MalformedFilename { .. }));
        assert!(cache.get().is_none());

        assert!(cache.get_or_load(|| Ok(tiny_dataset())).is_ok());
        assert!(cache.get().is_some());
    }

    #[test]
    fn invalidate_forces_a_reload() {
        let cache = DatasetCache::new();
        let loads = AtomicUsize::new(0);
        let load = || {
            loads.fetch_add(1, Ordering::SeqCst);
            Ok(tiny_dataset())
        };

        cache.get_or_load(load).unwrap();
        cache.invalidate();
        assert!(cache.get().is_none());
        cache.get_or_load(load).unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn concurrent_cold_start_loads_once() {
        let cache = DatasetCache::new();
        let loads = AtomicUsize::new(0);

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    cache
                        .get_or_load(|| {
                            loads.fetch_add(1, Ordering::SeqCst);
                            std::thread::sleep(std::time::Duration::from_millis(20));
                            Ok(tiny_dataset())
                        })
                        .unwrap();
                });
            }
        });

        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }
}
