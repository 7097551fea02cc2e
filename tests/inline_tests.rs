//! Inline markup inside paragraphs.

use orgmark::{to_html, to_html_with_options, Options};

fn html(input: &str) -> String {
    to_html(input).unwrap()
}

fn para(inner: &str) -> String {
    format!("<p>{inner}</p>")
}

#[test]
fn test_bold_and_code_both_resolve() {
    assert_eq!(html("*b* =c="), para("<b>b</b> <code>c</code>"));
}

#[test]
fn test_overlap_uses_higher_priority() {
    assert_eq!(html("*a=b*c="), para("<b>a=b</b>c="));
}

#[test]
fn test_double_star_is_italic() {
    assert_eq!(html("**x** and *y*"), para("<i>x</i> and <b>y</b>"));
}

#[test]
fn test_every_span_of_a_class() {
    assert_eq!(html("*a* and *b*"), para("<b>a</b> and <b>b</b>"));
}

#[test]
fn test_underline_consumes_leading_space() {
    assert_eq!(
        html("see _this_"),
        para("see<span style=\"text-decoration:underline\">this</span>")
    );
    assert_eq!(
        html("an _u_ x"),
        para("an<span style=\"text-decoration:underline\">u</span> x")
    );
    assert_eq!(html("_start_"), para("_start_"));
}

#[test]
fn test_strikethrough_and_verbatim() {
    assert_eq!(html("+old+ ~v~"), para("<del>old</del> <code>v</code>"));
}

#[test]
fn test_span_content_rejects_spaces() {
    assert_eq!(html("*not bold here*"), para("*not bold here*"));
}

#[test]
fn test_footnote_reference() {
    assert_eq!(
        html("claim[fn:note]"),
        para("claim<sup><a id=\"fnr:note\" class=\"footref\" href=\"#fn.note\">note</a></sup>")
    );
}

#[test]
fn test_link_forms() {
    assert_eq!(
        html("[[https://example.com][Example]]"),
        para("<a href=\"https://example.com\">Example</a>")
    );
    assert_eq!(
        html("[[http://example.com]]"),
        para("<a href=\"http://example.com\">http://example.com</a>")
    );
}

#[test]
fn test_image_forms() {
    assert_eq!(
        html("[[img/cat.png][A cat]]"),
        para("<img alt=\"A cat\" src=\"img/cat.png\"/>")
    );
    assert_eq!(html("[[img/cat.png]]"), para("<img src=\"img/cat.png\"/>"));
}

#[test]
fn test_link_description_with_bold() {
    assert_eq!(
        html("[[https://example.com][*Docs*]]"),
        para("<a href=\"https://example.com\"><b>Docs</b></a>")
    );
}

#[test]
fn test_image_alt_with_code() {
    assert_eq!(
        html("see [[chart.png][=fig=]]"),
        para("see <img alt=\"<code>fig</code>\" src=\"chart.png\"/>")
    );
}

#[test]
fn test_link_and_image_in_one_line() {
    assert_eq!(
        html("[[https://a.io][a]] then [[b.png]]"),
        para("<a href=\"https://a.io\">a</a> then <img src=\"b.png\"/>")
    );
}

#[test]
fn test_each_line_resolved_separately() {
    assert_eq!(html("*a\nb*"), para("*a\nb*"));
}

#[test]
fn test_escaped_text_still_resolves() {
    let options = Options {
        allow_html: false,
        ..Options::default()
    };
    assert_eq!(
        to_html_with_options("[[https://a.io][a < b]]", &options).unwrap(),
        para("<a href=\"https://a.io\">a &lt; b</a>")
    );
}

#[test]
fn test_multibyte_text() {
    assert_eq!(html("*héllo* wörld"), para("<b>héllo</b> wörld"));
}
