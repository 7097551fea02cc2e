//! HTML output: a reusable writer plus the tree renderer.
//!
//! Rendering is a pure walk over a finished [`Tree`]; the same tree always
//! renders to the same string.

use std::collections::HashMap;
use std::fmt::Write as _;

use rustc_hash::FxBuildHasher as FastHashBuilder;

use crate::block::{Block, ListKind, NodeId, Tree};
use crate::inline;
use crate::Options;

/// HTML output writer with a pre-allocated, reusable buffer.
///
/// # Example
/// ```
/// use orgmark::HtmlWriter;
///
/// let mut writer = HtmlWriter::with_capacity_for(1000);
/// writer.write_str("<p>");
/// writer.write_escaped_attr("a \"quoted\" <word>");
/// writer.write_str("</p>");
///
/// let html = writer.into_string();
/// assert_eq!(html, "<p>a &quot;quoted&quot; &lt;word&gt;</p>");
/// ```
#[derive(Debug, Default)]
pub struct HtmlWriter {
    out: String,
}

impl HtmlWriter {
    /// Create a new writer with default capacity.
    #[inline]
    pub fn new() -> Self {
        Self {
            out: String::with_capacity(1024),
        }
    }

    /// Create with pre-allocated capacity based on expected input size.
    ///
    /// Typical HTML is ~1.25x input size.
    #[inline]
    pub fn with_capacity_for(input_len: usize) -> Self {
        Self {
            out: String::with_capacity(input_len + input_len / 4),
        }
    }

    /// Write a static string (compile-time known).
    #[inline]
    pub fn write_str(&mut self, s: &'static str) {
        self.out.push_str(s);
    }

    /// Write a dynamic string without escaping.
    #[inline]
    pub fn write_string(&mut self, s: &str) {
        self.out.push_str(s);
    }

    /// Write a number in decimal.
    #[inline]
    pub fn write_usize(&mut self, n: usize) {
        // Writing into a String cannot fail.
        let _ = write!(self.out, "{n}");
    }

    /// Write text with attribute escaping (`&`, `<`, `>`, `"`).
    #[inline]
    pub fn write_escaped_attr(&mut self, text: &str) {
        html_escape::encode_double_quoted_attribute_to_string(text, &mut self.out);
    }

    /// Write a newline character.
    #[inline]
    pub fn newline(&mut self) {
        self.out.push('\n');
    }

    /// Current output length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.out.len()
    }

    /// Check if output is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.out.clear();
    }

    /// Get output as str.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Take ownership of the output.
    #[inline]
    pub fn into_string(self) -> String {
        self.out
    }

    /// Get mutable reference to internal buffer.
    ///
    /// Use with caution - allows bypassing escaping.
    #[inline]
    pub fn buffer_mut(&mut self) -> &mut String {
        &mut self.out
    }

    /// Write opening tag: `<tagname>`
    #[inline]
    pub fn open_tag(&mut self, tag: &'static str) {
        self.out.push('<');
        self.out.push_str(tag);
        self.out.push('>');
    }

    /// Write closing tag: `</tagname>`
    #[inline]
    pub fn close_tag(&mut self, tag: &'static str) {
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push('>');
    }

    /// Write opening tag with newline: `<tagname>\n`
    #[inline]
    pub fn open_tag_nl(&mut self, tag: &'static str) {
        self.open_tag(tag);
        self.newline();
    }

    /// Write closing tag after a newline: `\n</tagname>`
    #[inline]
    pub fn nl_close_tag(&mut self, tag: &'static str) {
        self.newline();
        self.close_tag(tag);
    }

    /// Write heading start: `<hN>` or `<hN id="...">`. Levels are not clamped.
    #[inline]
    pub fn heading_start(&mut self, level: usize, id: Option<&str>) {
        self.write_str("<h");
        self.write_usize(level);
        if let Some(id) = id {
            self.write_str(" id=\"");
            self.write_escaped_attr(id);
            self.out.push('"');
        }
        self.out.push('>');
    }

    /// Write heading end: `</hN>`
    #[inline]
    pub fn heading_end(&mut self, level: usize) {
        self.write_str("</h");
        self.write_usize(level);
        self.out.push('>');
    }

    /// Write preformatted block start with an optional class, then a newline.
    #[inline]
    pub fn pre_start(&mut self, class: &str) {
        if class.is_empty() {
            self.write_str("<pre><code>\n");
        } else {
            self.write_str("<pre class=\"");
            self.write_escaped_attr(class);
            self.write_str("\"><code>\n");
        }
    }

    /// Write preformatted block end after a newline.
    #[inline]
    pub fn pre_end(&mut self) {
        self.write_str("\n</code></pre>");
    }
}

/// Render a finished tree to HTML.
pub fn render(tree: &Tree, options: &Options) -> String {
    let mut writer = HtmlWriter::with_capacity_for(tree.len() * 32);
    HtmlRenderer::new(tree, options).render_into(&mut writer);
    writer.into_string()
}

/// Tree walker holding per-render state.
pub struct HtmlRenderer<'t> {
    tree: &'t Tree,
    options: &'t Options,
    /// Heading slug -> times seen.
    slugs: HashMap<String, usize, FastHashBuilder>,
}

impl<'t> HtmlRenderer<'t> {
    pub fn new(tree: &'t Tree, options: &'t Options) -> Self {
        Self {
            tree,
            options,
            slugs: HashMap::default(),
        }
    }

    /// Render the whole tree from its root.
    pub fn render_into(&mut self, writer: &mut HtmlWriter) {
        self.slugs.clear();
        let root = self.tree.root();
        self.node(root, writer);
    }

    fn node(&mut self, id: NodeId, w: &mut HtmlWriter) {
        let tree = self.tree;
        match tree.block(id) {
            Block::Document { children, .. } => {
                for (i, &child) in children.iter().enumerate() {
                    if i > 0 {
                        w.newline();
                    }
                    self.node(child, w);
                }
            }
            Block::Heading { level, title } => {
                let slug = self.options.heading_ids.then(|| self.unique_id(title));
                w.heading_start(*level, slug.as_deref());
                self.raw_text(title, w);
                w.heading_end(*level);
            }
            Block::Paragraph { lines } => {
                w.open_tag("p");
                for (i, line) in lines.iter().enumerate() {
                    if i > 0 {
                        w.newline();
                    }
                    self.leaf_text(line, w);
                }
                w.close_tag("p");
            }
            Block::List { kind, items, .. } => {
                let tag = match kind {
                    ListKind::Unordered => "ul",
                    ListKind::Ordered => "ol",
                };
                w.open_tag_nl(tag);
                for (i, &item) in items.iter().enumerate() {
                    if i > 0 {
                        w.newline();
                    }
                    self.node(item, w);
                }
                w.nl_close_tag(tag);
            }
            Block::ListItem { body, .. } => {
                w.open_tag("li");
                self.node(*body, w);
                w.close_tag("li");
            }
            Block::Table { rows, header_rows } => {
                w.open_tag_nl("table");
                for (i, &row) in rows.iter().enumerate() {
                    if i > 0 {
                        w.newline();
                    }
                    self.table_row(row, i < *header_rows, w);
                }
                w.nl_close_tag("table");
            }
            Block::TableRow { .. } => self.table_row(id, false, w),
            Block::BlockQuote { body } => {
                w.open_tag_nl("blockquote");
                self.node(*body, w);
                w.nl_close_tag("blockquote");
            }
            Block::Example { lines } => self.preformatted("example", lines, w),
            Block::Source { language, lines } => self.preformatted(language, lines, w),
            Block::Blank => {}
        }
    }

    fn table_row(&mut self, row: NodeId, header: bool, w: &mut HtmlWriter) {
        let Block::TableRow { cells } = self.tree.block(row) else {
            return;
        };
        let tag = if header { "th" } else { "td" };

        w.open_tag_nl("tr");
        for cell in cells {
            w.open_tag(tag);
            self.leaf_text(cell, w);
            w.close_tag(tag);
        }
        w.nl_close_tag("tr");
    }

    fn preformatted(&self, class: &str, lines: &[String], w: &mut HtmlWriter) {
        w.pre_start(class);
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                w.newline();
            }
            self.raw_text(line, w);
        }
        w.pre_end();
    }

    /// Text that goes through the inline resolver.
    fn leaf_text(&self, text: &str, w: &mut HtmlWriter) {
        if self.options.allow_html {
            inline::resolve_into(text, w.buffer_mut());
        } else {
            let escaped = html_escape::encode_double_quoted_attribute(text);
            inline::resolve_into(&escaped, w.buffer_mut());
        }
    }

    /// Text that is written as-is.
    fn raw_text(&self, text: &str, w: &mut HtmlWriter) {
        if self.options.allow_html {
            w.write_string(text);
        } else {
            w.write_escaped_attr(text);
        }
    }

    /// Slug for a heading title, suffixed `-1`, `-2`, ... on repeats.
    fn unique_id(&mut self, title: &str) -> String {
        let base = slugify(title);
        match self.slugs.get_mut(&base) {
            Some(seen) => {
                *seen += 1;
                let id = format!("{base}-{seen}");
                self.slugs.insert(id.clone(), 0);
                id
            }
            None => {
                self.slugs.insert(base.clone(), 0);
                base
            }
        }
    }
}

/// Lowercased title with whitespace runs turned into `-`, keeping
/// alphanumerics, `_` and `-`. Falls back to `heading` when nothing is left.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_whitespace() {
            pending_dash = !slug.is_empty();
        } else if c.is_alphanumeric() || c == '_' || c == '-' {
            if pending_dash {
                slug.push('-');
                pending_dash = false;
            }
            slug.extend(c.to_lowercase());
        }
    }

    if slug.is_empty() {
        slug.push_str("heading");
    }
    slug
}
