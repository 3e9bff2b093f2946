use std::fmt::Write;
use std::path::Path;

use serde::Serialize;

use crate::types::{HeadingCounts, NavEntry};

/// Build the standard header line:
/// `# path/to/post.md — N entries (S sections, U subsections)`
pub fn toc_header(path: &Path, counts: HeadingCounts) -> String {
    format!(
        "# {} — {} entries ({} sections, {} subsections)",
        path.display(),
        counts.total(),
        counts.sections,
        counts.subsections
    )
}

/// Header for a document whose TOC is suppressed.
pub fn suppressed_header(path: &Path) -> String {
    format!("# {} — no qualifying headings [suppressed]", path.display())
}

/// Render the navigation list. Subsections are indented; the active
/// entry, when there is one, is marked with →.
pub fn render_list(entries: &[NavEntry], active: Option<usize>) -> String {
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        let marker = if active == Some(i) { "→" } else { " " };
        let indent = if entry.depth > 0 { "  " } else { "" };
        let _ = write!(out, "\n{marker} {indent}{}  #{}", entry.label, entry.id);
    }
    out
}

#[derive(Serialize)]
struct TocDocument<'a> {
    entries: &'a [NavEntry],
    active: Option<usize>,
}

/// JSON form of a navigation list, for tooling that consumes the TOC
/// rather than reading it.
pub fn render_json(entries: &[NavEntry], active: Option<usize>) -> String {
    let doc = TocDocument { entries, active };
    serde_json::to_string_pretty(&doc).unwrap_or_else(|_| "{}".into())
}

/// One batch-summary line per article.
pub fn scan_line(path: &Path, counts: HeadingCounts) -> String {
    if counts.total() == 0 {
        format!("  {}  (no toc — suppressed)", path.display())
    } else {
        format!(
            "  {}  ({} sections, {} subsections)",
            path.display(),
            counts.sections,
            counts.subsections
        )
    }
}
