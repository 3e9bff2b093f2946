//! Rendered-HTML heading scan — byte-level tag scan, no DOM
//! construction. Article HTML is regular enough that a full parser
//! buys nothing here: headings are located by their opening tags,
//! comments are skipped, inline markup inside a heading is stripped
//! from the label.

use crate::types::{HeadingLevel, ScannedHeading};

pub fn scan(buf: &[u8]) -> Vec<ScannedHeading> {
    let mut out = Vec::new();
    let mut pos = 0usize;
    // Newlines before `counted` have been added to `line` already.
    let mut counted = 0usize;
    let mut line = 1u32;

    while let Some(rel) = memchr::memchr(b'<', &buf[pos..]) {
        let lt = pos + rel;

        if buf[lt..].starts_with(b"<!--") {
            pos = match find_sub(&buf[lt..], b"-->") {
                Some(i) => lt + i + 3,
                None => break,
            };
            continue;
        }

        let Some(level) = heading_tag(&buf[lt + 1..]) else {
            pos = lt + 1;
            continue;
        };
        let Some(gt_rel) = memchr::memchr(b'>', &buf[lt..]) else {
            break;
        };
        let gt = lt + gt_rel;

        let inner_start = gt + 1;
        let digit = match level {
            HeadingLevel::Section => b'1',
            HeadingLevel::Subsection => b'2',
        };
        let Some(close_rel) = find_close(&buf[inner_start..], digit) else {
            pos = gt + 1;
            continue;
        };

        line += count_newlines(&buf[counted..lt]);
        counted = lt;

        // Tag name is always 2 bytes (`h1`/`h2`)
        let attrs = &buf[lt + 3..gt];
        let inner = &buf[inner_start..inner_start + close_rel];

        out.push(ScannedHeading {
            level,
            text: strip_markup(inner),
            id: id_attr(attrs),
            line,
        });

        pos = inner_start + close_rel + 5; // past `</hN>`
    }

    out
}

/// Match `h1`/`h2` at the start of `rest` (just past a `<`), followed
/// by an attribute separator or tag close. Case-insensitive.
fn heading_tag(rest: &[u8]) -> Option<HeadingLevel> {
    if rest.len() < 2 || rest[0].to_ascii_lowercase() != b'h' {
        return None;
    }
    let level = match rest[1] {
        b'1' => HeadingLevel::Section,
        b'2' => HeadingLevel::Subsection,
        _ => return None,
    };
    match rest.get(2) {
        Some(b' ' | b'\t' | b'\n' | b'\r' | b'>') => Some(level),
        _ => None,
    }
}

/// Find `</hN>` for the given digit, case-insensitive on the `h`.
fn find_close(buf: &[u8], digit: u8) -> Option<usize> {
    let mut pos = 0;
    while let Some(rel) = memchr::memchr(b'<', &buf[pos..]) {
        let i = pos + rel;
        let rest = &buf[i..];
        if rest.len() >= 5
            && rest[1] == b'/'
            && rest[2].to_ascii_lowercase() == b'h'
            && rest[3] == digit
            && rest[4] == b'>'
        {
            return Some(i);
        }
        pos = i + 1;
    }
    None
}

/// Naive subslice search. Needles here are a few bytes long.
fn find_sub(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|w| w == needle)
}

fn count_newlines(buf: &[u8]) -> u32 {
    memchr::memchr_iter(b'\n', buf).count() as u32
}

/// Extract the `id` attribute value from an opening tag's attribute
/// region. Handles double-quoted, single-quoted and bare values.
fn id_attr(attrs: &[u8]) -> Option<String> {
    let s = std::str::from_utf8(attrs).ok()?;
    let mut rest = s.trim_start();
    while !rest.is_empty() {
        let name_end = rest
            .find(|c: char| c == '=' || c.is_whitespace())
            .unwrap_or(rest.len());
        let name = &rest[..name_end];
        rest = rest[name_end..].trim_start();

        let mut value = "";
        if let Some(r) = rest.strip_prefix('=') {
            let r = r.trim_start();
            if let Some(q) = r.strip_prefix('"') {
                let end = q.find('"')?;
                value = &q[..end];
                rest = &q[end + 1..];
            } else if let Some(q) = r.strip_prefix('\'') {
                let end = q.find('\'')?;
                value = &q[..end];
                rest = &q[end + 1..];
            } else {
                let end = r.find(char::is_whitespace).unwrap_or(r.len());
                value = &r[..end];
                rest = &r[end..];
            }
        }

        if name.eq_ignore_ascii_case("id") && !value.is_empty() {
            return Some(value.to_string());
        }
        rest = rest.trim_start();
    }
    None
}

/// Reduce heading inner HTML to display text: drop tags, decode the
/// basic entities, collapse whitespace runs.
fn strip_markup(inner: &[u8]) -> String {
    let mut text = String::new();
    let mut pos = 0;
    while pos < inner.len() {
        match memchr::memchr(b'<', &inner[pos..]) {
            Some(rel) => {
                let lt = pos + rel;
                text.push_str(&String::from_utf8_lossy(&inner[pos..lt]));
                pos = memchr::memchr(b'>', &inner[lt..]).map_or(inner.len(), |i| lt + i + 1);
            }
            None => {
                text.push_str(&String::from_utf8_lossy(&inner[pos..]));
                break;
            }
        }
    }

    let decoded = decode_entities(&text);
    let mut collapsed = String::with_capacity(decoded.len());
    for word in decoded.split_whitespace() {
        if !collapsed.is_empty() {
            collapsed.push(' ');
        }
        collapsed.push_str(word);
    }
    collapsed
}

/// Single-pass decode of the five entities article markup actually
/// produces. Unknown entities pass through literally.
fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let (rep, consumed) = if tail.starts_with("&amp;") {
            ("&", 5)
        } else if tail.starts_with("&lt;") {
            ("<", 4)
        } else if tail.starts_with("&gt;") {
            (">", 4)
        } else if tail.starts_with("&quot;") {
            ("\"", 6)
        } else if tail.starts_with("&#39;") {
            ("'", 5)
        } else {
            ("&", 1)
        };
        out.push_str(rep);
        rest = &tail[consumed..];
    }
    out.push_str(rest);
    out
}
