//! Line-level pattern catalog.
//!
//! Every function here is a pure matcher over one right-trimmed line. None of
//! them know about priority: the block parser decides which matcher wins.

use memchr::memchr_iter;
use smallvec::SmallVec;

use crate::cursor::Cursor;
use crate::limits::{MAX_LIST_MARKER_DIGITS, MAX_TABLE_COLUMNS};

/// Kind of list marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// `-` or `+` bullets.
    Unordered,
    /// `1.` or `1)` markers.
    Ordered,
}

/// A heading line: `*** Title`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingMatch<'a> {
    /// Number of leading `*` markers.
    pub level: usize,
    pub title: &'a str,
}

/// A list item line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListItemMatch<'a> {
    pub kind: ListKind,
    /// Leading whitespace, counted in chars.
    pub indent: usize,
    /// Text after the marker and its whitespace.
    pub title: &'a str,
}

/// Opening delimiter of a multi-line block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockBegin<'a> {
    Quote,
    Example,
    /// `#+BEGIN_SRC lang [switches...]`; only the first word is kept.
    Source { language: &'a str },
}

/// Closing delimiter of a multi-line block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockEnd {
    Quote,
    Example,
    Source,
}

/// Table cells of one row.
pub type Cells<'a> = SmallVec<[&'a str; 8]>;

/// Count leading whitespace chars.
#[inline]
pub fn indent_of(line: &str) -> usize {
    Cursor::new(line).skip_whitespace()
}

/// A line that is empty after trimming.
#[inline]
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Match `^(\*+)\s+(.+)$`.
pub fn heading(line: &str) -> Option<HeadingMatch<'_>> {
    let mut cursor = Cursor::new(line);
    let level = cursor.skip_while(|b| b == b'*');
    if level == 0 || !cursor.at_whitespace() {
        return None;
    }
    cursor.skip_whitespace();
    let title = cursor.rest();
    if title.is_empty() {
        return None;
    }
    Some(HeadingMatch { level, title })
}

/// Match an unordered (`- x`, `+ x`) or ordered (`1. x`, `1) x`) list item.
pub fn list_item(line: &str) -> Option<ListItemMatch<'_>> {
    let mut cursor = Cursor::new(line);
    let indent = cursor.skip_whitespace();

    let kind = match cursor.peek()? {
        b'-' | b'+' => {
            cursor.bump();
            ListKind::Unordered
        }
        b'0'..=b'9' => {
            let digits = cursor.skip_while(|b| b.is_ascii_digit());
            if digits > MAX_LIST_MARKER_DIGITS {
                return None;
            }
            if !cursor.eat(b'.') && !cursor.eat(b')') {
                return None;
            }
            ListKind::Ordered
        }
        _ => return None,
    };

    if !cursor.at_whitespace() {
        return None;
    }
    cursor.skip_whitespace();
    let title = cursor.rest();
    if title.is_empty() {
        return None;
    }
    Some(ListItemMatch {
        kind,
        indent,
        title,
    })
}

/// Match a table row `|cell|cell|` and split it into trimmed cells.
///
/// The row must start (after indentation) and end with `|` and hold at
/// least one character between them.
pub fn table_row(line: &str) -> Option<Cells<'_>> {
    let row = line.trim_start();
    let bytes = row.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'|' || bytes[bytes.len() - 1] != b'|' {
        return None;
    }

    let mut cells = Cells::new();
    let mut start = 1;
    for pipe in memchr_iter(b'|', &bytes[1..]).map(|i| i + 1) {
        if cells.len() == MAX_TABLE_COLUMNS {
            break;
        }
        cells.push(row[start..pipe].trim());
        start = pipe + 1;
    }
    Some(cells)
}

/// Match a separator row such as `|---+---|`: only `|`, `-`, `+` and
/// whitespace, with at least one `-`.
pub fn is_table_separator(line: &str) -> bool {
    let row = line.trim_start();
    if !row.starts_with('|') {
        return false;
    }
    let mut dashes = false;
    for c in row.chars() {
        match c {
            '-' => dashes = true,
            '|' | '+' => {}
            c if c.is_whitespace() => {}
            _ => return false,
        }
    }
    dashes
}

/// Match `#+BEGIN_QUOTE`, `#+BEGIN_EXAMPLE` or `#+BEGIN_SRC lang`.
pub fn block_begin(line: &str) -> Option<BlockBegin<'_>> {
    let mut cursor = Cursor::new(line);
    cursor.skip_whitespace();

    if cursor.eat_keyword("#+BEGIN_QUOTE") {
        return cursor.is_eof().then_some(BlockBegin::Quote);
    }
    if cursor.eat_keyword("#+BEGIN_EXAMPLE") {
        return cursor.is_eof().then_some(BlockBegin::Example);
    }
    if cursor.eat_keyword("#+BEGIN_SRC") {
        if cursor.is_eof() {
            return Some(BlockBegin::Source { language: "" });
        }
        if cursor.skip_whitespace() == 0 {
            return None;
        }
        let language = cursor.rest().split_whitespace().next().unwrap_or("");
        return Some(BlockBegin::Source { language });
    }
    None
}

/// Match `#+END_QUOTE`, `#+END_EXAMPLE` or `#+END_SRC` alone on the line.
pub fn block_end(line: &str) -> Option<BlockEnd> {
    let mut cursor = Cursor::new(line);
    cursor.skip_whitespace();

    let end = if cursor.eat_keyword("#+END_QUOTE") {
        BlockEnd::Quote
    } else if cursor.eat_keyword("#+END_EXAMPLE") {
        BlockEnd::Example
    } else if cursor.eat_keyword("#+END_SRC") {
        BlockEnd::Source
    } else {
        return None;
    };
    cursor.is_eof().then_some(end)
}

/// Match a directive or attribute line (`#+TITLE: ...`, `#+ATTR_HTML: ...`).
pub fn is_directive(line: &str) -> bool {
    line.trim_start().starts_with("#+")
}

/// Match a comment line (`# ...`). Comment text is never inline-resolved.
pub fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}
