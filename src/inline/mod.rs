//! Inline resolver for leaf text.
//!
//! Rules run one after another in a fixed priority order. The span rules
//! (emphasis, code, footnotes) scan only the raw text that earlier rules
//! left untouched and turn every match into an opaque HTML segment, so when
//! two spans overlap only the higher-priority rule applies, while disjoint
//! spans of different classes all resolve.
//!
//! Links and images run last over the joined output of the span rules, so a
//! description or alt text may carry rendered spans. Link output is still
//! opaque to the image rule.

mod emphasis;
mod links;

use smallvec::{smallvec, SmallVec};

use crate::limits::MAX_INLINE_SPANS;
use crate::pattern;
use crate::Range;

pub use emphasis::Delimiters;

/// A matched inline span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineMatch {
    /// The whole span, delimiters included.
    pub outer: Range,
    /// Emphasis content, footnote label, or link/image target.
    pub content: Range,
    /// Link description or image alt text.
    pub label: Option<Range>,
}

impl InlineMatch {
    pub(crate) fn new(outer: std::ops::Range<usize>, content: std::ops::Range<usize>) -> Self {
        Self {
            outer: outer.into(),
            content: content.into(),
            label: None,
        }
    }
}

/// One inline rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineClass {
    Italic,
    Bold,
    Underline,
    Code,
    Strikethrough,
    Verbatim,
    Footnote,
    Link,
    Image,
}

impl InlineClass {
    /// Application order. Earlier rules win overlaps.
    pub const PRIORITY: [InlineClass; 9] = [
        Self::Italic,
        Self::Bold,
        Self::Underline,
        Self::Code,
        Self::Strikethrough,
        Self::Verbatim,
        Self::Footnote,
        Self::Link,
        Self::Image,
    ];

    /// Whether this rule reads the rendered output of the span rules.
    #[inline]
    pub fn wraps_rendered(self) -> bool {
        matches!(self, Self::Link | Self::Image)
    }

    /// Leftmost match of this rule in `text` at or after `from`.
    pub fn find(self, text: &str, from: usize) -> Option<InlineMatch> {
        match self.delimiters() {
            Some(delims) => emphasis::find_delimited(text, from, delims),
            None => match self {
                Self::Footnote => links::find_footnote(text, from),
                Self::Link => links::find_link(text, from),
                _ => links::find_image(text, from),
            },
        }
    }

    fn delimiters(self) -> Option<Delimiters> {
        match self {
            Self::Italic => Some(emphasis::ITALIC),
            Self::Bold => Some(emphasis::BOLD),
            Self::Underline => Some(emphasis::UNDERLINE),
            Self::Code => Some(emphasis::CODE),
            Self::Strikethrough => Some(emphasis::STRIKETHROUGH),
            Self::Verbatim => Some(emphasis::VERBATIM),
            Self::Footnote | Self::Link | Self::Image => None,
        }
    }

    /// Append the HTML for `m`, a match of this rule in `text`.
    pub fn render(self, text: &str, m: &InlineMatch, out: &mut String) {
        let content = m.content.slice(text);
        let label = m.label.map(|label| label.slice(text));

        match self {
            Self::Italic => wrap(out, "<i>", content, "</i>"),
            Self::Bold => wrap(out, "<b>", content, "</b>"),
            Self::Underline => wrap(
                out,
                "<span style=\"text-decoration:underline\">",
                content,
                "</span>",
            ),
            Self::Code | Self::Verbatim => wrap(out, "<code>", content, "</code>"),
            Self::Strikethrough => wrap(out, "<del>", content, "</del>"),
            Self::Footnote => {
                out.push_str("<sup><a id=\"fnr:");
                out.push_str(content);
                out.push_str("\" class=\"footref\" href=\"#fn.");
                out.push_str(content);
                out.push_str("\">");
                out.push_str(content);
                out.push_str("</a></sup>");
            }
            Self::Link => {
                out.push_str("<a href=\"");
                out.push_str(content);
                out.push_str("\">");
                out.push_str(label.unwrap_or(content));
                out.push_str("</a>");
            }
            Self::Image => {
                out.push_str("<img ");
                if let Some(alt) = label {
                    out.push_str("alt=\"");
                    out.push_str(alt);
                    out.push_str("\" ");
                }
                out.push_str("src=\"");
                out.push_str(content);
                out.push_str("\"/>");
            }
        }
    }
}

#[inline]
fn wrap(out: &mut String, open: &str, content: &str, close: &str) {
    out.push_str(open);
    out.push_str(content);
    out.push_str(close);
}

enum Segment<'a> {
    /// Text no rule has claimed yet.
    Raw(&'a str),
    /// Output of a rule; opaque to later rules.
    Html(String),
}

type Segments<'a> = SmallVec<[Segment<'a>; 8]>;

/// Resolve inline markup in one line of leaf text, appending to `out`.
///
/// Comment lines (leading `#`) pass through untouched.
pub fn resolve_into(text: &str, out: &mut String) {
    if pattern::is_comment(text) || !has_trigger(text) {
        out.push_str(text);
        return;
    }

    let mut segments: Segments<'_> = smallvec![Segment::Raw(text)];
    for class in InlineClass::PRIORITY.into_iter().filter(|c| !c.wraps_rendered()) {
        segments = apply(class, segments);
    }

    if memchr::memmem::find(text.as_bytes(), b"[[").is_none() {
        flush(&segments, out);
        return;
    }

    let mut spans = String::with_capacity(out_len(&segments));
    flush(&segments, &mut spans);

    let mut segments: Segments<'_> = smallvec![Segment::Raw(spans.as_str())];
    for class in InlineClass::PRIORITY.into_iter().filter(|c| c.wraps_rendered()) {
        segments = apply(class, segments);
    }
    flush(&segments, out);
}

fn flush(segments: &[Segment<'_>], out: &mut String) {
    for segment in segments {
        match segment {
            Segment::Raw(raw) => out.push_str(raw),
            Segment::Html(html) => out.push_str(html),
        }
    }
}

fn out_len(segments: &[Segment<'_>]) -> usize {
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Raw(raw) => raw.len(),
            Segment::Html(html) => html.len(),
        })
        .sum()
}

/// Resolve inline markup in one line of leaf text.
///
/// # Example
/// ```
/// assert_eq!(orgmark::inline::resolve("*b* =c="), "<b>b</b> <code>c</code>");
/// ```
pub fn resolve(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    resolve_into(text, &mut out);
    out
}

/// Whether any rule could match somewhere in `text`.
#[inline]
fn has_trigger(text: &str) -> bool {
    text.bytes()
        .any(|b| matches!(b, b'*' | b'_' | b'=' | b'+' | b'~' | b'['))
}

fn apply<'a>(class: InlineClass, segments: Segments<'a>) -> Segments<'a> {
    let mut out = Segments::new();
    let mut budget = MAX_INLINE_SPANS;

    for segment in segments {
        match segment {
            Segment::Raw(raw) if budget > 0 => split_raw(class, raw, &mut budget, &mut out),
            other => out.push(other),
        }
    }
    out
}

/// Replace every match of `class` in `raw`, up to `budget` matches.
fn split_raw<'a>(class: InlineClass, raw: &'a str, budget: &mut usize, out: &mut Segments<'a>) {
    let mut last = 0;

    while *budget > 0 {
        let Some(m) = class.find(raw, last) else {
            break;
        };
        let start = m.outer.start_usize();
        if start > last {
            out.push(Segment::Raw(&raw[last..start]));
        }

        let mut html = String::with_capacity(m.outer.len() as usize + 16);
        class.render(raw, &m, &mut html);
        out.push(Segment::Html(html));

        last = m.outer.end_usize();
        *budget -= 1;
    }

    if last < raw.len() {
        out.push(Segment::Raw(&raw[last..]));
    }
}
