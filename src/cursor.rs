//! Forward-only cursor over a single line.
//!
//! Markers in the outline grammar are all ASCII, so the cursor compares raw
//! bytes, but every move lands on a char boundary so the remaining text can
//! always be handed out as `&str`.

/// A cursor for scanning one line left to right.
///
/// # Example
/// ```
/// use orgmark::cursor::Cursor;
///
/// let mut cursor = Cursor::new("  - item");
/// assert_eq!(cursor.skip_whitespace(), 2);
/// assert!(cursor.eat(b'-'));
/// cursor.skip_whitespace();
/// assert_eq!(cursor.rest(), "item");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    line: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of `line`.
    #[inline]
    pub fn new(line: &'a str) -> Self {
        Self { line, pos: 0 }
    }

    /// Current byte offset from the start of the line.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.line.len()
    }

    /// Peek at the current byte.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.line.as_bytes().get(self.pos).copied()
    }

    /// Check if the current byte is `b`.
    #[inline]
    pub fn at(&self, b: u8) -> bool {
        self.peek() == Some(b)
    }

    /// Check if the current char is whitespace (Unicode-aware).
    #[inline]
    pub fn at_whitespace(&self) -> bool {
        self.rest().chars().next().is_some_and(char::is_whitespace)
    }

    /// Advance by one char.
    #[inline]
    pub fn bump(&mut self) {
        if let Some(c) = self.rest().chars().next() {
            self.pos += c.len_utf8();
        }
    }

    /// Consume `b` if it is the current byte.
    #[inline]
    pub fn eat(&mut self, b: u8) -> bool {
        if self.at(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume an ASCII keyword, ignoring ASCII case.
    pub fn eat_keyword(&mut self, keyword: &str) -> bool {
        let end = self.pos + keyword.len();
        match self.line.as_bytes().get(self.pos..end) {
            Some(bytes) if bytes.eq_ignore_ascii_case(keyword.as_bytes()) => {
                self.pos = end;
                true
            }
            _ => false,
        }
    }

    /// Skip ASCII bytes while `predicate` holds. Returns the count skipped.
    #[inline]
    pub fn skip_while<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(u8) -> bool,
    {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if !b.is_ascii() || !predicate(b) {
                break;
            }
            self.pos += 1;
        }
        self.pos - start
    }

    /// Skip whitespace chars. Returns the number of chars skipped.
    #[inline]
    pub fn skip_whitespace(&mut self) -> usize {
        let mut count = 0;
        while let Some(c) = self.rest().chars().next() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
            count += 1;
        }
        count
    }

    /// The unconsumed remainder of the line.
    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.line[self.pos..]
    }
}
