//! Batch scan of a content directory: one summary line per article,
//! computed in parallel.

use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use globset::{Glob, GlobMatcher};
use ignore::WalkBuilder;
use rayon::prelude::*;

use crate::cache::TocCache;
use crate::error::WaypostError;
use crate::format;
use crate::scan;
use crate::types::HeadingCounts;

// Directories that are never article content — build artifacts,
// dependencies, VCS internals. Skipped explicitly instead of relying
// on .gitignore so drafts kept out of git are still scanned.
const SKIP_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "target",
    "dist",
    "build",
    ".next",
    ".cache",
    "out",
    "public",
];

/// Walk `root`, scan every article file (optionally filtered by a
/// glob on the path relative to `root`), and render a summary.
///
/// Output order is deterministic (sorted by path) regardless of walk
/// or scan order.
pub fn scan_tree(
    root: &Path,
    pattern: Option<&str>,
    cache: &TocCache,
) -> Result<String, WaypostError> {
    let matcher = pattern
        .map(|p| {
            Glob::new(p)
                .map(|g| g.compile_matcher())
                .map_err(|e| WaypostError::InvalidQuery {
                    query: p.to_string(),
                    reason: e.to_string(),
                })
        })
        .transpose()?;

    let files = collect_articles(root, matcher.as_ref());

    let mut results: Vec<(PathBuf, Result<HeadingCounts, WaypostError>)> = files
        .into_par_iter()
        .map(|path| {
            let counts = scan_cached(&path, cache).map(|h| HeadingCounts::tally(&h));
            (path, counts)
        })
        .collect();
    results.sort_by(|a, b| a.0.cmp(&b.0));

    let mut out = format!("# {} — {} articles", root.display(), results.len());
    let mut with_toc = 0usize;
    for (path, result) in &results {
        match result {
            Ok(counts) => {
                if counts.total() > 0 {
                    with_toc += 1;
                }
                let _ = write!(out, "\n{}", format::scan_line(path, *counts));
            }
            Err(e) => {
                let _ = write!(out, "\n  {}  (error: {e})", path.display());
            }
        }
    }
    let _ = write!(out, "\n\n{with_toc} with a TOC");
    Ok(out)
}

fn scan_cached(
    path: &Path,
    cache: &TocCache,
) -> Result<std::sync::Arc<[crate::types::ScannedHeading]>, WaypostError> {
    let mtime = std::fs::metadata(path)
        .and_then(|m| m.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH);
    cache.get_or_compute(path, mtime, || scan::scan_file(path))
}

fn collect_articles(root: &Path, matcher: Option<&GlobMatcher>) -> Vec<PathBuf> {
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .ignore(false)
        .parents(false)
        .filter_entry(|entry| {
            if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                if let Some(name) = entry.file_name().to_str() {
                    return !SKIP_DIRS.contains(&name);
                }
            }
            true
        })
        .build();

    let mut files = Vec::new();
    for entry in walker.flatten() {
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.into_path();
        if !scan::is_article(&path) {
            continue;
        }
        if let Some(m) = matcher {
            let rel = path.strip_prefix(root).unwrap_or(&path);
            if !m.is_match(rel) {
                continue;
            }
        }
        files.push(path);
    }
    files
}
