//! Inline markdown: bold, italic, code spans, images and links.
//!
//! Parsing is a fixed pipeline of passes over a flat list of [`Span`]s. Each
//! pass only rewrites spans that are still [`SpanKind::Normal`], so earlier
//! passes take precedence over later ones.

use std::sync::LazyLock;

use regex::Regex;

use crate::block::{Span, SpanKind};
use crate::error::{Error, Result};
use crate::html::HtmlNode;

static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").unwrap());

// Images are excluded by checking the preceding byte, the regex crate has no lookbehind.
// Like the image pattern, a link never spans a line break.
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]\n]*)\]\(([^\(\)\n]*)\)").unwrap());

/// Parse inline markdown into a flat list of spans.
pub fn parse_inline(text: &str) -> Result<Vec<Span>> {
    let spans = vec![Span::normal(text)];
    let spans = split_delimiter(spans, "**", SpanKind::Bold)?;
    let spans = split_delimiter(spans, "*", SpanKind::Italic)?;
    let spans = split_delimiter(spans, "`", SpanKind::Code)?;
    let spans = split_images(spans)?;
    split_links(spans)
}

/// Parse inline markdown straight into HTML leaves.
pub fn inline_to_html(text: &str) -> Result<Vec<HtmlNode>> {
    Ok(parse_inline(text)?.iter().map(span_to_html).collect())
}

/// Split every normal span on `delimiter`, styling the enclosed parts as `kind`.
///
/// Parts alternate normal/styled, so an even part count means a delimiter was
/// left open. Empty parts are dropped.
pub fn split_delimiter(spans: Vec<Span>, delimiter: &str, kind: SpanKind) -> Result<Vec<Span>> {
    if delimiter.is_empty() {
        return Ok(spans);
    }

    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if span.kind != SpanKind::Normal {
            out.push(span);
            continue;
        }

        let parts: Vec<&str> = span.text.split(delimiter).collect();
        if parts.len() % 2 == 0 {
            return Err(Error::MalformedDelimiter {
                delimiter: delimiter.to_string(),
                text: span.text.clone(),
            });
        }

        for (i, part) in parts.into_iter().enumerate() {
            if part.is_empty() {
                continue;
            }
            let part_kind = if i % 2 == 0 { SpanKind::Normal } else { kind };
            out.push(Span::new(part_kind, part));
        }
    }
    Ok(out)
}

/// Find `![alt](url)` images, returning `(alt, url)` pairs in order.
pub fn extract_images(text: &str) -> Vec<(String, String)> {
    IMAGE_RE
        .captures_iter(text)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// Find `[text](url)` links not preceded by `!`, returning `(text, url)` pairs in order.
pub fn extract_links(text: &str) -> Vec<(String, String)> {
    let mut links = Vec::new();
    let mut pos = 0;
    while let Some(caps) = LINK_RE.captures_at(text, pos) {
        let Some(whole) = caps.get(0) else { break };
        if text[..whole.start()].ends_with('!') {
            pos = whole.start() + 1;
            continue;
        }
        links.push((caps[1].to_string(), caps[2].to_string()));
        pos = whole.end();
    }
    links
}

pub fn split_images(spans: Vec<Span>) -> Result<Vec<Span>> {
    split_pattern(spans, SpanKind::Image, extract_images, |alt, url| {
        format!("![{alt}]({url})")
    })
}

pub fn split_links(spans: Vec<Span>) -> Result<Vec<Span>> {
    split_pattern(spans, SpanKind::Link, extract_links, |text, url| {
        format!("[{text}]({url})")
    })
}

fn split_pattern(
    spans: Vec<Span>,
    kind: SpanKind,
    extract: fn(&str) -> Vec<(String, String)>,
    markdown: fn(&str, &str) -> String,
) -> Result<Vec<Span>> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if span.kind != SpanKind::Normal {
            out.push(span);
            continue;
        }

        let matches = extract(&span.text);
        if matches.is_empty() {
            out.push(span);
            continue;
        }

        let mut rest = span.text.as_str();
        for (label, url) in matches {
            let source = markdown(&label, &url);
            // Extractors return pairs rebuilt from `rest`, so this only fires on a broken extractor.
            let Some((before, after)) = rest.split_once(source.as_str()) else {
                return Err(Error::MalformedLinkOrImage {
                    kind: if kind == SpanKind::Image { "image" } else { "link" },
                    markdown: source,
                });
            };
            if !before.is_empty() {
                out.push(Span::normal(before));
            }
            out.push(Span {
                kind,
                text: label,
                target: Some(url),
            });
            rest = after;
        }
        if !rest.is_empty() {
            out.push(Span::normal(rest));
        }
    }
    Ok(out)
}

/// Convert a span into the HTML leaf that displays it.
pub fn span_to_html(span: &Span) -> HtmlNode {
    let target = span.target.clone().unwrap_or_default();
    match span.kind {
        SpanKind::Normal => HtmlNode::text(span.text.as_str()),
        SpanKind::Bold => HtmlNode::leaf("b", span.text.as_str()),
        SpanKind::Italic => HtmlNode::leaf("i", span.text.as_str()),
        SpanKind::Code => HtmlNode::leaf("code", span.text.as_str()),
        SpanKind::Link => HtmlNode::leaf("a", span.text.as_str()).with_attr("href", target),
        SpanKind::Image => HtmlNode::leaf("img", "")
            .with_attr("src", target)
            .with_attr("alt", span.text.as_str()),
    }
}
