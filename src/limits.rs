//! DoS prevention constants.
//!
//! These limits keep pathological inputs from producing unbounded
//! nesting or quadratic rescans.

/// Maximum nesting depth for documents (list-item and quote bodies).
/// Deeper lines are kept as paragraph text instead of opening containers.
pub const MAX_BLOCK_NESTING: usize = 32;

/// Maximum digits in an ordered list marker (prevents big-integer markers)
pub const MAX_LIST_MARKER_DIGITS: usize = 9;

/// Maximum cells kept per table row
pub const MAX_TABLE_COLUMNS: usize = 128;

/// Maximum replacements a single inline rule performs on one line.
/// Occurrences past the limit are left as literal text.
pub const MAX_INLINE_SPANS: usize = 4096;
