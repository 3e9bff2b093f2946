//! Markdown heading scan via memchr line scan — no markdown parser
//! needed. Lines starting with `#` outside fenced code blocks become
//! headings; only the two qualifying levels are kept. Tracks actual
//! line numbers.

use crate::types::{HeadingLevel, ScannedHeading};

pub fn scan(buf: &[u8]) -> Vec<ScannedHeading> {
    let mut out = Vec::new();
    let mut pos = 0;
    let mut line_num = 0u32;
    let mut in_code_block = false;

    while pos < buf.len() {
        line_num += 1;

        // Find end of current line
        let line_end = memchr::memchr(b'\n', &buf[pos..]).map_or(buf.len(), |i| pos + i);

        let mut line = &buf[pos..line_end];
        if line.ends_with(b"\r") {
            line = &line[..line.len() - 1];
        }

        // Track code blocks
        if line.starts_with(b"```") || line.starts_with(b"~~~") {
            in_code_block = !in_code_block;
            pos = line_end + 1;
            continue;
        }

        if !in_code_block && !line.is_empty() && line[0] == b'#' {
            let hashes = line.iter().take_while(|&&b| b == b'#').count();
            if let Some(level) = HeadingLevel::from_hashes(hashes) {
                let text_start = hashes + usize::from(line.get(hashes) == Some(&b' '));
                if let Ok(raw) = std::str::from_utf8(&line[text_start..]) {
                    let (text, id) = split_custom_id(raw.trim());
                    out.push(ScannedHeading {
                        level,
                        text,
                        id,
                        line: line_num,
                    });
                }
            }
        }

        pos = line_end + 1;
    }

    out
}

/// Split a trailing `{#custom-id}` anchor attribute off a heading.
/// The id must be non-empty and contain no whitespace; anything else
/// is treated as literal heading text.
fn split_custom_id(raw: &str) -> (String, Option<String>) {
    if raw.ends_with('}') {
        if let Some(open) = raw.rfind("{#") {
            let id = &raw[open + 2..raw.len() - 1];
            if !id.is_empty() && !id.contains(char::is_whitespace) {
                return (raw[..open].trim_end().to_string(), Some(id.to_string()));
            }
        }
    }
    (raw.to_string(), None)
}
