//! Delimited emphasis spans: `**i**`, `*b*`, ` _u_`, `=c=`, `+s+`, `~v~`.
//!
//! Content is one or more non-whitespace chars matched lazily: the span
//! ends at the first closing delimiter after the first content char, and a
//! whitespace char before that point rejects the opener.

use memchr::memchr;

use super::InlineMatch;

/// Opening and closing delimiter of one emphasis class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    pub open: &'static str,
    pub close: &'static str,
}

impl Delimiters {
    const fn symmetric(delim: &'static str) -> Self {
        Self {
            open: delim,
            close: delim,
        }
    }
}

pub const ITALIC: Delimiters = Delimiters::symmetric("**");
pub const BOLD: Delimiters = Delimiters::symmetric("*");
/// The leading space is part of the opener.
pub const UNDERLINE: Delimiters = Delimiters {
    open: " _",
    close: "_",
};
pub const CODE: Delimiters = Delimiters::symmetric("=");
pub const STRIKETHROUGH: Delimiters = Delimiters::symmetric("+");
pub const VERBATIM: Delimiters = Delimiters::symmetric("~");

/// Find the leftmost span delimited by `delims` starting at or after `from`.
pub fn find_delimited(text: &str, from: usize, delims: Delimiters) -> Option<InlineMatch> {
    let bytes = text.as_bytes();
    let first = delims.open.as_bytes()[0];
    let mut search = from;

    while search < bytes.len() {
        let open = search + memchr(first, &bytes[search..])?;
        if text[open..].starts_with(delims.open) {
            let content_start = open + delims.open.len();
            if let Some(close) = scan_content(text, content_start, delims.close) {
                return Some(InlineMatch::new(
                    open..close + delims.close.len(),
                    content_start..close,
                ));
            }
        }
        search = open + 1;
    }
    None
}

/// Returns the byte offset of the closing delimiter.
fn scan_content(text: &str, start: usize, close: &str) -> Option<usize> {
    let mut chars = text.get(start..)?.char_indices();
    let (_, first) = chars.next()?;
    if first.is_whitespace() {
        return None;
    }
    for (offset, c) in chars {
        let pos = start + offset;
        if text[pos..].starts_with(close) {
            return Some(pos);
        }
        if c.is_whitespace() {
            return None;
        }
    }
    None
}
