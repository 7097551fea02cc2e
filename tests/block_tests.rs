//! Delimited blocks, paragraphs, directives and whole-document layout.

use orgmark::{to_html, to_html_with_options, Options};

fn html(input: &str) -> String {
    to_html(input).unwrap()
}

fn html_escaped(input: &str) -> String {
    let options = Options {
        allow_html: false,
        ..Options::default()
    };
    to_html_with_options(input, &options).unwrap()
}

#[test]
fn test_quote_body_is_parsed() {
    assert_eq!(
        html("#+BEGIN_QUOTE\nsaid *x*\n#+END_QUOTE"),
        "<blockquote>\n<p>said <b>x</b></p>\n</blockquote>"
    );
}

#[test]
fn test_nested_quotes() {
    assert_eq!(
        html("#+BEGIN_QUOTE\nouter\n#+BEGIN_QUOTE\ninner\n#+END_QUOTE\n#+END_QUOTE"),
        "<blockquote>\n<p>outer</p>\n<blockquote>\n<p>inner</p>\n</blockquote>\n</blockquote>"
    );
}

#[test]
fn test_quote_holds_list() {
    assert_eq!(
        html("#+BEGIN_QUOTE\n- a\n#+END_QUOTE\nafter"),
        "<blockquote>\n<ul>\n<li><p>a</p></li>\n</ul>\n</blockquote>\n<p>after</p>"
    );
}

#[test]
fn test_example_is_literal() {
    assert_eq!(
        html("#+BEGIN_EXAMPLE\n*markup*\n#+END_EXAMPLE"),
        "<pre class=\"example\"><code>\n*markup*\n</code></pre>"
    );
}

#[test]
fn test_source_language_class() {
    assert_eq!(
        html("#+BEGIN_SRC rust\nlet x = *y*;\n#+END_SRC"),
        "<pre class=\"rust\"><code>\nlet x = *y*;\n</code></pre>"
    );
}

#[test]
fn test_keywords_are_case_insensitive() {
    assert_eq!(
        html("#+begin_src python\nx = 1\n#+end_src"),
        "<pre class=\"python\"><code>\nx = 1\n</code></pre>"
    );
}

#[test]
fn test_source_switches_are_dropped() {
    let out = html("#+BEGIN_SRC sh -n :exports code\necho\n#+END_SRC");
    assert!(out.starts_with("<pre class=\"sh\"><code>"), "{out}");
}

#[test]
fn test_source_without_language() {
    assert_eq!(
        html("#+BEGIN_SRC\na\n\nb\n#+END_SRC"),
        "<pre><code>\na\n\nb\n</code></pre>"
    );
}

#[test]
fn test_source_keeps_indentation() {
    let out = html("#+BEGIN_SRC py\ndef f():\n    return 1\n#+END_SRC");
    assert!(out.contains("\n    return 1\n"), "{out}");
}

#[test]
fn test_unterminated_block_closes_at_end() {
    assert_eq!(
        html("#+BEGIN_SRC c\nint x;"),
        "<pre class=\"c\"><code>\nint x;\n</code></pre>"
    );
}

#[test]
fn test_empty_example() {
    assert_eq!(
        html("#+BEGIN_EXAMPLE\n#+END_EXAMPLE"),
        "<pre class=\"example\"><code>\n\n</code></pre>"
    );
}

#[test]
fn test_directives_are_dropped() {
    assert_eq!(html("#+TITLE: Doc\ntext"), "<p>text</p>");
    assert_eq!(html("#+END_QUOTE\ntext"), "<p>text</p>");
}

#[test]
fn test_comment_line_is_not_resolved() {
    assert_eq!(html("# a *comment*"), "<p># a *comment*</p>");
}

#[test]
fn test_paragraph_lines_are_trimmed() {
    assert_eq!(html("  one  \n    two"), "<p>one\ntwo</p>");
}

#[test]
fn test_blank_lines_render_empty() {
    assert_eq!(html("a\n\n\nb"), "<p>a</p>\n\n\n<p>b</p>");
}

#[test]
fn test_full_document() {
    let input = "* Title\n\nSome *bold* text.\n\n| a | b |\n|---|---|\n| 1 | 2 |";
    let expected = "<h1>Title</h1>\n\n<p>Some <b>bold</b> text.</p>\n\n<table>\n<tr>\n<th>a</th><th>b</th>\n</tr>\n<tr>\n<td>1</td><td>2</td>\n</tr>\n</table>";
    assert_eq!(html(input), expected);
}

#[test]
fn test_raw_html_passes_by_default() {
    assert_eq!(html("<em>x</em>"), "<p><em>x</em></p>");
}

#[test]
fn test_raw_html_escaped_on_request() {
    assert_eq!(html_escaped("<em>x</em>"), "<p>&lt;em&gt;x&lt;/em&gt;</p>");
    assert_eq!(
        html_escaped("#+BEGIN_EXAMPLE\n\"<b>\"\n#+END_EXAMPLE"),
        "<pre class=\"example\"><code>\n&quot;&lt;b&gt;&quot;\n</code></pre>"
    );
}
