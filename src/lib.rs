mod block;
mod config;
mod error;
mod html;
mod inline;
mod parser;
mod site;

pub use block::{BlockType, Span, SpanKind};
pub use config::{Config, PathsConfig, SiteConfig};
pub use error::{Error, Result};
pub use html::{Attributes, HtmlNode};
pub use inline::{parse_inline, span_to_html};
pub use parser::{classify, extract_title, parse_document, render_block, split_blocks};
pub use site::{
    SiteError, build_site, copy_static, generate_page, generate_pages_recursive, render_page,
};

/// Serialize an HTML tree to markup.
pub fn serialize(node: &HtmlNode) -> Result<String> {
    node.to_html()
}

/// Convert markdown to an HTML string wrapped in a `div`.
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    serialize(&parse_document(markdown)?)
}
