//! orgmark: outline markup to HTML converter
//!
//! Converts org-style outline text (starred headings, indented lists, pipe
//! tables, quote/example/source blocks and inline emphasis) into an HTML
//! fragment.
//!
//! # Design Principles
//! - Line-driven: each line is classified once by the block parser
//! - Arena tree: blocks live in a flat `Vec` addressed by [`NodeId`]
//! - No regex: byte-level scanning with `memchr`
//! - Malformed markup is never an error; it falls back to paragraph text
//!
//! # Example
//! ```
//! let html = orgmark::to_html("* Notes\n- *first*\n- second").unwrap();
//! assert!(html.starts_with("<h1>Notes</h1>\n<ul>"));
//! assert!(html.contains("<li><p><b>first</b></p></li>"));
//! ```

/// Emit a `log::trace!` record when the `trace` feature is on.
macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "trace")]
        log::trace!($($arg)*);
    }};
}

pub mod block;
pub mod cursor;
pub mod error;
pub mod inline;
pub mod limits;
pub mod pattern;
pub mod range;
pub mod render;

// Re-export primary types
pub use block::{Block, BlockKind, BlockParser, ListKind, Node, NodeId, Tree};
pub use error::ParseError;
pub use range::Range;
pub use render::{render, HtmlWriter};

/// Parsing/rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Added to every heading level. Levels are never clamped.
    pub heading_offset: usize,
    /// Pass raw HTML in the input through. When false, text is escaped
    /// before inline rules run.
    pub allow_html: bool,
    /// Emit `id` attributes on headings, deduplicated with `-1`, `-2`, ...
    pub heading_ids: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            heading_offset: 0,
            allow_html: true,
            heading_ids: false,
        }
    }
}

/// Convert outline markup to HTML.
///
/// This is the primary API for simple use cases.
///
/// # Example
/// ```
/// let html = orgmark::to_html("* Hello\nWorld").unwrap();
/// assert_eq!(html, "<h1>Hello</h1>\n<p>World</p>");
/// ```
pub fn to_html(input: &str) -> error::Result<String> {
    to_html_with_options(input, &Options::default())
}

/// Convert outline markup to HTML with options.
pub fn to_html_with_options(input: &str, options: &Options) -> error::Result<String> {
    let tree = parse(input, options)?;
    Ok(render(&tree, options))
}

/// Convert outline markup to HTML into a provided buffer with options.
///
/// The buffer is cleared first; on error it is left empty.
pub fn to_html_into_with_options(
    input: &str,
    out: &mut String,
    options: &Options,
) -> error::Result<()> {
    out.clear();
    let tree = parse(input, options)?;
    let mut writer = HtmlWriter::default();
    std::mem::swap(writer.buffer_mut(), out);
    writer.buffer_mut().reserve(input.len() + input.len() / 4);
    render::HtmlRenderer::new(&tree, options).render_into(&mut writer);
    std::mem::swap(writer.buffer_mut(), out);
    Ok(())
}

/// Parse input into a block tree without rendering it.
pub fn parse(input: &str, options: &Options) -> error::Result<Tree> {
    BlockParser::new(options.heading_offset).parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(to_html("").unwrap(), "");
    }

    #[test]
    fn test_heading_offset() {
        assert_eq!(to_html("* Title").unwrap(), "<h1>Title</h1>");
        let options = Options {
            heading_offset: 2,
            ..Options::default()
        };
        assert_eq!(
            to_html_with_options("** Title", &options).unwrap(),
            "<h4>Title</h4>"
        );
    }

    #[test]
    fn test_crlf_input() {
        assert_eq!(to_html("a\r\nb\r\n").unwrap(), "<p>a\nb</p>");
    }

    #[test]
    fn test_into_buffer_reuses_allocation() {
        let mut out = String::from("stale");
        to_html_into_with_options("*b*", &mut out, &Options::default()).unwrap();
        assert_eq!(out, "<p><b>b</b></p>");
    }

    #[test]
    fn test_parse_then_render() {
        let options = Options::default();
        let tree = parse("- a\n  - b", &options).unwrap();
        let html = render(&tree, &options);
        assert_eq!(
            html,
            "<ul>\n<li><p>a</p>\n<ul>\n<li><p>b</p></li>\n</ul></li>\n</ul>"
        );
    }

    #[test]
    fn test_options_default() {
        let options = Options::default();
        assert_eq!(options.heading_offset, 0);
        assert!(options.allow_html);
        assert!(!options.heading_ids);
    }
}
