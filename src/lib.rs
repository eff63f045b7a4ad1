mod block;
pub mod code;
pub mod config;
pub mod content;
pub mod favorites;
mod html;
mod inline;
mod parser;

pub use block::{Block, ListItem, Span, StatusColor, plain_text};
pub use config::{Config, RenderConfig};
pub use html::blocks_to_html;

/// Parse a content body (frontmatter already removed) into blocks.
pub fn parse(document: &str) -> Vec<Block> {
    parser::parse(document)
}

/// Split a single line into inline spans.
pub fn parse_inline(line: &str) -> Vec<Span> {
    inline::parse_inline(line)
}

/// Convert a content body to an HTML fragment.
pub fn markdown_to_html(document: &str, config: &RenderConfig) -> String {
    let blocks = parse(document);
    blocks_to_html(&blocks, config)
}
