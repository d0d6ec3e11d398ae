//! Memoized source loads, invalidated by modification time and read options.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;

use chomfy_ingest::{LineSource, modified_time};
use chomfy_model::{ReadOptions, Record, SourceKey};

use crate::error::Result;

#[derive(Debug)]
struct CacheEntry {
    modified: SystemTime,
    options: ReadOptions,
    records: Arc<[Record]>,
}

impl CacheEntry {
    fn is_valid(&self, modified: SystemTime, options: &ReadOptions) -> bool {
        self.modified == modified && self.options == *options
    }
}

/// Per-instance record cache keyed by [`SourceKey`].
///
/// Each key holds at most one entry. A lookup whose modification time or
/// read options differ from the stored ones reloads the source and replaces
/// the entry in place. Nothing is evicted otherwise.
#[derive(Debug, Default)]
pub struct FileCache {
    entries: HashMap<SourceKey, CacheEntry>,
}

impl FileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the records for `key`, loading them on a miss.
    ///
    /// A hit only stats the file. The returned list is shared with the cache,
    /// so two hits on the same entry return the same allocation.
    pub fn get_or_load(&mut self, key: &SourceKey, options: &ReadOptions) -> Result<Arc<[Record]>> {
        let modified = modified_time(key.path())?;
        if let Some(entry) = self.entries.get(key)
            && entry.is_valid(modified, options)
        {
            tracing::debug!(source = %key, "cache hit");
            return Ok(Arc::clone(&entry.records));
        }

        tracing::debug!(source = %key, "cache miss");
        let source = LineSource::open(key.path())?;
        let records: Arc<[Record]> = source.load_with(key.column(), options)?.into();
        self.entries.insert(
            key.clone(),
            CacheEntry {
                modified,
                options: *options,
                records: Arc::clone(&records),
            },
        );
        Ok(records)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
