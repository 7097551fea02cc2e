//! Bracketed inline constructs: footnote references, links and images.
//!
//! - `[fn:label]`
//! - `[[https://target][description]]` or `[[https://target]]`
//! - `[[src][alt]]` or `[[src]]`
//!
//! Targets and labels are matched lazily and may contain `]`; the first
//! closing sequence that completes the construct wins.

use memchr::{memchr, memchr_iter};

use super::InlineMatch;
use crate::Range;

const SCHEMES: [&str; 2] = ["https://", "http://"];

/// Find the leftmost `[fn:label]` at or after `from`.
pub fn find_footnote(text: &str, from: usize) -> Option<InlineMatch> {
    let bytes = text.as_bytes();
    let mut search = from;

    while search < bytes.len() {
        let open = search + memchr(b'[', &bytes[search..])?;
        if text[open..].starts_with("[fn:") {
            let start = open + 4;
            if let Some(after_first) = after_first_char(text, start) {
                if let Some(close) = memchr(b']', &bytes[after_first..]) {
                    let close = after_first + close;
                    return Some(InlineMatch::new(open..close + 1, start..close));
                }
            }
        }
        search = open + 1;
    }
    None
}

/// Find the leftmost `[[http(s)://...]]` link at or after `from`.
pub fn find_link(text: &str, from: usize) -> Option<InlineMatch> {
    find_double_bracket(text, from, true)
}

/// Find the leftmost `[[src]]` or `[[src][alt]]` image at or after `from`.
pub fn find_image(text: &str, from: usize) -> Option<InlineMatch> {
    find_double_bracket(text, from, false)
}

fn find_double_bracket(text: &str, from: usize, needs_scheme: bool) -> Option<InlineMatch> {
    let bytes = text.as_bytes();
    let mut search = from;

    while search < bytes.len() {
        let open = search + memchr(b'[', &bytes[search..])?;
        if bytes.get(open + 1) == Some(&b'[') {
            if let Some(m) = match_double_bracket_at(text, open, needs_scheme) {
                return Some(m);
            }
        }
        search = open + 1;
    }
    None
}

fn match_double_bracket_at(text: &str, open: usize, needs_scheme: bool) -> Option<InlineMatch> {
    let bytes = text.as_bytes();
    let target_start = open + 2;

    let min_target_end = if needs_scheme {
        let rest = &text[target_start..];
        let scheme = SCHEMES.iter().find(|scheme| rest.starts_with(**scheme))?;
        after_first_char(text, target_start + scheme.len())?
    } else {
        after_first_char(text, target_start)?
    };

    for target_end in memchr_iter(b']', &bytes[min_target_end..]).map(|i| i + min_target_end) {
        let target = Range::from_usize(target_start, target_end);

        if bytes.get(target_end + 1) == Some(&b'[') {
            if let Some((label, end)) = match_label(text, target_end + 2) {
                return Some(InlineMatch {
                    outer: Range::from_usize(open, end),
                    content: target,
                    label: Some(label),
                });
            }
        }

        if bytes.get(target_end + 1) == Some(&b']') {
            return Some(InlineMatch {
                outer: Range::from_usize(open, target_end + 2),
                content: target,
                label: None,
            });
        }
    }
    None
}

/// Match `label]]` starting at `start`; returns the label and the end offset.
fn match_label(text: &str, start: usize) -> Option<(Range, usize)> {
    let bytes = text.as_bytes();
    let min_end = after_first_char(text, start)?;
    memchr_iter(b']', &bytes[min_end..])
        .map(|i| i + min_end)
        .find(|&end| bytes.get(end + 1) == Some(&b']'))
        .map(|end| (Range::from_usize(start, end), end + 2))
}

/// Offset just past the char at `pos`, if there is one.
#[inline]
fn after_first_char(text: &str, pos: usize) -> Option<usize> {
    let c = text.get(pos..)?.chars().next()?;
    Some(pos + c.len_utf8())
}
