use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::block::{Block, ListItem, Span};
use crate::config::RenderConfig;

/// Convert blocks to an HTML fragment, one element per block
pub fn blocks_to_html(blocks: &[Block], config: &RenderConfig) -> String {
    let mut out = String::new();
    for block in blocks {
        emit_block(block, config, &mut out);
    }
    out
}

fn emit_block(block: &Block, config: &RenderConfig, out: &mut String) {
    match block {
        Block::Heading { level, text } => {
            out.push_str(&format!("<h{level}>"));
            out.push_str(&encode_text(text));
            out.push_str(&format!("</h{level}>\n"));
        }
        Block::Paragraph { content } => {
            out.push_str("<p>");
            spans_to_html(content, config, out);
            out.push_str("</p>\n");
        }
        Block::List { items } => list_to_html(items, config, out),
        Block::Table { headers, rows } => table_to_html(headers, rows, config, out),
        Block::Blockquote { content } => {
            out.push_str("<blockquote><p>");
            spans_to_html(content, config, out);
            out.push_str("</p></blockquote>\n");
        }
        Block::CodeBlock { language, content } => {
            let language = encode_double_quoted_attribute(language.trim());
            out.push_str(&format!(
                "<figure class=\"code-block\" data-language=\"{language}\">\n"
            ));
            out.push_str(&format!("<figcaption>{language}</figcaption>\n"));
            out.push_str("<button type=\"button\" class=\"copy\" data-copy>Copier le code</button>\n");
            out.push_str(&format!("<pre><code class=\"language-{language}\">"));
            out.push_str(&encode_text(content));
            out.push_str("</code></pre>\n</figure>\n");
        }
        Block::NoContent => {
            out.push_str("<p class=\"no-content\">");
            out.push_str(&encode_text(&config.placeholder));
            out.push_str("</p>\n");
        }
    }
}

fn spans_to_html(spans: &[Span], config: &RenderConfig, out: &mut String) {
    for span in spans {
        span_to_html(span, config, out);
    }
}

fn span_to_html(span: &Span, config: &RenderConfig, out: &mut String) {
    match span {
        Span::Text { text } => out.push_str(&encode_text(text)),
        Span::Bold { text } => {
            out.push_str("<strong>");
            out.push_str(&encode_text(text));
            out.push_str("</strong>");
        }
        Span::Link {
            label,
            url,
            external,
        } => {
            out.push_str("<a href=\"");
            out.push_str(&encode_double_quoted_attribute(url));
            out.push('"');
            if *external {
                out.push_str(" target=\"_blank\" rel=\"noopener noreferrer\" class=\"external\"");
            }
            out.push('>');
            out.push_str(&encode_text(label));
            if *external && config.external_link_icon {
                out.push_str("<span class=\"external-icon\" aria-hidden=\"true\">↗</span>");
            }
            out.push_str("</a>");
        }
        Span::Status { color, label } => {
            out.push_str("<span class=\"status\"><span>");
            out.push(color.symbol());
            out.push_str(&format!("</span><span class=\"status-{}\">", color.name()));
            out.push_str(&encode_text(label));
            out.push_str("</span></span>");
        }
    }
}

fn list_to_html(items: &[ListItem], config: &RenderConfig, out: &mut String) {
    out.push_str("<ul>\n");
    for item in items {
        out.push_str("<li>");
        spans_to_html(&item.content, config, out);
        out.push_str("</li>\n");
    }
    out.push_str("</ul>\n");
}

fn table_to_html(
    headers: &[Vec<Span>],
    rows: &[Vec<Vec<Span>>],
    config: &RenderConfig,
    out: &mut String,
) {
    out.push_str("<table>\n<thead>\n<tr>");
    for cell in headers {
        out.push_str("<th>");
        spans_to_html(cell, config, out);
        out.push_str("</th>");
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str("<td>");
            spans_to_html(cell, config, out);
            out.push_str("</td>");
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</tbody>\n</table>\n");
}
