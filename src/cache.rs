//! Mtime-validated cache of scanned headings, shared across the
//! parallel batch walk.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use dashmap::DashMap;

use crate::types::ScannedHeading;

#[derive(Debug, Default)]
pub struct TocCache {
    map: DashMap<PathBuf, (SystemTime, Arc<[ScannedHeading]>)>,
}

impl TocCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached headings for `path` if the stored mtime still
    /// matches, otherwise run `compute` and replace the entry.
    pub fn get_or_compute<E>(
        &self,
        path: &Path,
        mtime: SystemTime,
        compute: impl FnOnce() -> Result<Vec<ScannedHeading>, E>,
    ) -> Result<Arc<[ScannedHeading]>, E> {
        if let Some(entry) = self.map.get(path) {
            let (cached_mtime, headings) = entry.value();
            if *cached_mtime == mtime {
                return Ok(Arc::clone(headings));
            }
        }

        let headings: Arc<[ScannedHeading]> = compute()?.into();
        self.map
            .insert(path.to_path_buf(), (mtime, Arc::clone(&headings)));
        Ok(headings)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn headings(n: usize) -> Vec<ScannedHeading> {
        use crate::types::HeadingLevel;
        (0..n)
            .map(|i| ScannedHeading {
                level: HeadingLevel::Section,
                text: format!("H{i}"),
                id: None,
                line: i as u32 + 1,
            })
            .collect()
    }

    #[test]
    fn second_lookup_hits_cache() {
        let cache = TocCache::new();
        let path = Path::new("posts/a.md");
        let mtime = SystemTime::UNIX_EPOCH;

        let mut calls = 0;
        let first: Result<_, ()> = cache.get_or_compute(path, mtime, || {
            calls += 1;
            Ok(headings(2))
        });
        first.unwrap();
        let second: Result<_, ()> = cache.get_or_compute(path, mtime, || {
            calls += 1;
            Ok(headings(5))
        });
        let got = second.unwrap();

        assert_eq!(calls, 1);
        assert_eq!(got.len(), 2);
    }

    #[test]
    fn mtime_change_invalidates() {
        let cache = TocCache::new();
        let path = Path::new("posts/a.md");
        let t0 = SystemTime::UNIX_EPOCH;
        let t1 = t0 + Duration::from_secs(5);

        let first: Result<_, ()> = cache.get_or_compute(path, t0, || Ok(headings(2)));
        first.unwrap();
        let second: Result<_, ()> = cache.get_or_compute(path, t1, || Ok(headings(4)));
        let got = second.unwrap();

        assert_eq!(got.len(), 4);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn compute_error_is_propagated_and_not_cached() {
        let cache = TocCache::new();
        let path = Path::new("posts/bad.md");
        let mtime = SystemTime::UNIX_EPOCH;

        let err: Result<_, &str> = cache.get_or_compute(path, mtime, || Err("io"));
        assert!(err.is_err());
        assert!(cache.is_empty());
    }
}
