//! Load cache keyed by source path and modification time
//!
//! Repeated filter or goal changes recompute summaries from the loaded
//! record set; they should never re-read or re-parse the source file. The
//! cache memoizes one [`LoadOutcome`] per source, invalidated when the
//! file's modification time changes or explicitly by the caller. Entries
//! are `Arc`-shared so concurrent sessions can hold the immutable record
//! set by reference.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use tracing::debug;

use crate::error::Result;
use crate::import;
use crate::models::LoadOutcome;
use crate::schema::CsvSchema;

#[derive(Debug, Default)]
pub struct LoadCache {
    entries: HashMap<PathBuf, CacheEntry>,
}

#[derive(Debug)]
struct CacheEntry {
    modified: SystemTime,
    outcome: Arc<LoadOutcome>,
}

impl LoadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load through the cache, re-reading only when the file changed.
    ///
    /// The key is the canonicalized path plus the file's mtime, so two
    /// spellings of one path share an entry and an edited file is reloaded.
    pub fn load(&mut self, path: &Path, schema: &CsvSchema) -> Result<Arc<LoadOutcome>> {
        let key = path.canonicalize()?;
        let modified = fs::metadata(&key)?.modified()?;

        if let Some(entry) = self.entries.get(&key) {
            if entry.modified == modified {
                debug!("Load cache hit for {}", key.display());
                return Ok(Arc::clone(&entry.outcome));
            }
            debug!("Load cache stale for {}", key.display());
        }

        let outcome = Arc::new(import::load(&key, schema)?);
        self.entries.insert(
            key,
            CacheEntry {
                modified,
                outcome: Arc::clone(&outcome),
            },
        );
        Ok(outcome)
    }

    /// Drop the entry for one source file
    pub fn invalidate(&mut self, path: &Path) {
        if let Ok(key) = path.canonicalize() {
            let _ = self.entries.remove(&key);
        }
    }

    /// Drop every cached entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
