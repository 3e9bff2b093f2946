//! Article ingestion: route a file to the right heading scanner.

pub mod html;
pub mod markdown;

use std::fs;
use std::path::Path;

use memmap2::Mmap;

use crate::error::WaypostError;
use crate::types::ScannedHeading;

/// Bytes sniffed for NUL when deciding binary vs text.
const BINARY_SNIFF_LEN: usize = 8_192;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArticleKind {
    Markdown,
    Html,
}

fn article_kind(path: &Path) -> Option<ArticleKind> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("md" | "mdx" | "markdown") => Some(ArticleKind::Markdown),
        Some("html" | "htm") => Some(ArticleKind::Html),
        _ => None,
    }
}

/// Whether the batch walker should consider this file at all.
pub(crate) fn is_article(path: &Path) -> bool {
    article_kind(path).is_some()
}

/// Scan an article file for qualifying headings.
///
/// Zero headings is a valid outcome (the TOC is suppressed for such
/// documents), so an empty file or a heading-free article returns an
/// empty list, not an error.
pub fn scan_file(path: &Path) -> Result<Vec<ScannedHeading>, WaypostError> {
    let kind = article_kind(path).ok_or_else(|| WaypostError::Unsupported {
        path: path.to_path_buf(),
        reason: "unrecognized extension (expected .md, .mdx, .markdown, .html, .htm)".into(),
    })?;

    let meta = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(WaypostError::NotFound {
                path: path.to_path_buf(),
                suggestion: suggest_similar(path),
            });
        }
        Err(e) => return Err(WaypostError::from_io(path, e)),
    };

    if meta.is_dir() {
        return Err(WaypostError::Unsupported {
            path: path.to_path_buf(),
            reason: "is a directory".into(),
        });
    }

    // Empty check before mmap — mmap on a 0-byte file may fail on
    // some platforms
    if meta.len() == 0 {
        return Ok(Vec::new());
    }

    let file = fs::File::open(path).map_err(|e| WaypostError::from_io(path, e))?;
    let mmap = unsafe { Mmap::map(&file) }.map_err(|e| WaypostError::from_io(path, e))?;
    let buf = &mmap[..];

    if is_binary(buf) {
        return Err(WaypostError::Unsupported {
            path: path.to_path_buf(),
            reason: "binary file".into(),
        });
    }

    Ok(match kind {
        ArticleKind::Markdown => markdown::scan(buf),
        ArticleKind::Html => html::scan(buf),
    })
}

/// NUL byte in the head of the buffer means binary.
fn is_binary(buf: &[u8]) -> bool {
    let head = &buf[..buf.len().min(BINARY_SNIFF_LEN)];
    memchr::memchr(0, head).is_some()
}

/// Suggest a similar file name from the parent directory (edit
/// distance).
fn suggest_similar(path: &Path) -> Option<String> {
    let parent = path.parent()?;
    let name = path.file_name()?.to_str()?;
    let entries = fs::read_dir(parent).ok()?;

    let mut best: Option<(usize, String)> = None;
    for entry in entries.flatten() {
        let candidate = entry.file_name();
        let candidate = candidate.to_string_lossy();
        let dist = edit_distance(name, &candidate);
        if dist <= 3 {
            match &best {
                Some((d, _)) if dist < *d => best = Some((dist, candidate.into_owned())),
                None => best = Some((dist, candidate.into_owned())),
                _ => {}
            }
        }
    }
    best.map(|(_, name)| name)
}

/// Simple Levenshtein distance — only used on short file names.
fn edit_distance(a: &str, b: &str) -> usize {
    let a = a.as_bytes();
    let b = b.as_bytes();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
