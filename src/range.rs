//! Compact byte ranges into a single line of text.
//!
//! Inline matchers report spans as `u32` offsets to keep match records
//! small; convert with `From` at the slicing boundary.

/// Byte range into a line.
///
/// # Example
/// ```
/// use orgmark::Range;
///
/// let line = "see *this*";
/// let range = Range::new(5, 9);
/// assert_eq!(range.slice(line), "this");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Range {
    pub start: u32,
    pub end: u32,
}

const _: () = assert!(std::mem::size_of::<Range>() == 8);

impl Range {
    /// Create a new range.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Create a range from usize offsets.
    ///
    /// # Panics
    /// Panics in debug mode if values exceed u32::MAX.
    #[inline]
    pub fn from_usize(start: usize, end: usize) -> Self {
        debug_assert!(start <= u32::MAX as usize);
        debug_assert!(end <= u32::MAX as usize);
        Self {
            start: start as u32,
            end: end as u32,
        }
    }

    /// The text this range covers. Both ends must sit on char boundaries.
    #[inline]
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start_usize()..self.end_usize()]
    }

    /// Length in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Check if the range is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub const fn start_usize(&self) -> usize {
        self.start as usize
    }

    #[inline]
    pub const fn end_usize(&self) -> usize {
        self.end as usize
    }
}

impl From<std::ops::Range<usize>> for Range {
    #[inline]
    fn from(r: std::ops::Range<usize>) -> Self {
        Self::from_usize(r.start, r.end)
    }
}

impl From<Range> for std::ops::Range<usize> {
    #[inline]
    fn from(r: Range) -> Self {
        r.start_usize()..r.end_usize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_new() {
        let r = Range::new(10, 20);
        assert_eq!(r.len(), 10);
        assert!(!r.is_empty());
    }

    #[test]
    fn test_range_slice_multibyte() {
        let text = "héllo *wörld*";
        let start = text.find('w').unwrap();
        let r = Range::from_usize(start, start + "wörld".len());
        assert_eq!(r.slice(text), "wörld");
    }

    #[test]
    fn test_range_from_std_range() {
        let r: Range = (10usize..20usize).into();
        assert_eq!(r, Range::new(10, 20));
        let back: std::ops::Range<usize> = r.into();
        assert_eq!(back, 10..20);
    }
}
