use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::block::{Span, StatusColor};

/// Bold, link and status markers, tried in that order at each position.
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*(?<bold>.*?)\*\*|\[(?<label>.*?)\]\((?<url>.*?)\)|(?<status>[🟢🟡🔴]) ")
        .unwrap()
});

struct Token<'a> {
    range: Range<usize>,
    caps: Captures<'a>,
}

/// Split a single line into inline spans.
///
/// Text between recognised markers becomes [`Span::Text`]. A status label
/// runs until the next marker or the end of the line, so the markdown of
/// the returned spans concatenates back to `line` exactly.
pub fn parse_inline(line: &str) -> Vec<Span> {
    let tokens: Vec<Token> = TOKEN
        .captures_iter(line)
        .filter_map(|caps| {
            let range = caps.get(0)?.range();
            Some(Token { range, caps })
        })
        .collect();

    let mut spans = Vec::with_capacity(tokens.len() * 2 + 1);
    let mut cursor = 0;

    for (i, token) in tokens.iter().enumerate() {
        if token.range.start > cursor {
            spans.push(Span::text(&line[cursor..token.range.start]));
        }

        let caps = &token.caps;
        if let Some(bold) = caps.name("bold") {
            spans.push(Span::bold(bold.as_str()));
            cursor = token.range.end;
        } else if let (Some(label), Some(url)) = (caps.name("label"), caps.name("url")) {
            spans.push(Span::link(label.as_str(), url.as_str()));
            cursor = token.range.end;
        } else if let Some(color) = caps
            .name("status")
            .and_then(|symbol| symbol.as_str().chars().next())
            .and_then(StatusColor::from_symbol)
        {
            let label_end = tokens
                .get(i + 1)
                .map_or(line.len(), |next| next.range.start);
            spans.push(Span::status(color, &line[token.range.end..label_end]));
            cursor = label_end;
        }
    }

    if cursor < line.len() {
        spans.push(Span::text(&line[cursor..]));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::plain_text;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    fn source(spans: &[Span]) -> String {
        spans.iter().map(Span::source).collect()
    }

    #[test]
    fn empty_line() {
        assert_eq!(parse_inline(""), vec![]);
    }

    #[test]
    fn plain_line() {
        assert_eq!(
            parse_inline("  just   some text "),
            vec![Span::text("  just   some text ")]
        );
    }

    #[test]
    fn bold_then_link() {
        assert_eq!(
            parse_inline("**Important**: see [docs](https://example.com)"),
            vec![
                Span::bold("Important"),
                Span::text(": see "),
                Span::Link {
                    label: "docs".to_string(),
                    url: "https://example.com".to_string(),
                    external: true,
                },
            ]
        );
    }

    #[test]
    fn status_indicator() {
        assert_eq!(
            parse_inline("🟢 Expert"),
            vec![Span::status(StatusColor::Green, "Expert")]
        );
    }

    #[rstest]
    #[case("🟡 Intermédiaire", StatusColor::Yellow, "Intermédiaire")]
    #[case("🔴 Notions", StatusColor::Red, "Notions")]
    #[case("🟢 ", StatusColor::Green, "")]
    fn status_colors(#[case] line: &str, #[case] color: StatusColor, #[case] label: &str) {
        assert_eq!(parse_inline(line), vec![Span::status(color, label)]);
    }

    #[test]
    fn status_label_stops_at_next_marker() {
        assert_eq!(
            parse_inline("Python 🟢 Expert **10 ans**"),
            vec![
                Span::text("Python "),
                Span::status(StatusColor::Green, "Expert "),
                Span::bold("10 ans"),
            ]
        );
    }

    #[test]
    fn consecutive_statuses() {
        assert_eq!(
            parse_inline("🟢 go 🔴 stop"),
            vec![
                Span::status(StatusColor::Green, "go "),
                Span::status(StatusColor::Red, "stop"),
            ]
        );
    }

    #[test]
    fn emoji_without_space_is_text() {
        assert_eq!(parse_inline("🟢Expert"), vec![Span::text("🟢Expert")]);
    }

    #[test]
    fn internal_link() {
        assert_eq!(
            parse_inline("voir [le blog](/blog)"),
            vec![
                Span::text("voir "),
                Span::Link {
                    label: "le blog".to_string(),
                    url: "/blog".to_string(),
                    external: false,
                },
            ]
        );
    }

    #[rstest]
    #[case("**unterminated")]
    #[case("[label](no close")]
    #[case("[no paren]")]
    #[case("* single *")]
    fn malformed_tokens_are_text(#[case] line: &str) {
        assert_eq!(parse_inline(line), vec![Span::text(line)]);
    }

    #[test]
    fn bold_is_lazy() {
        assert_eq!(
            parse_inline("**a** and **b**"),
            vec![Span::bold("a"), Span::text(" and "), Span::bold("b")]
        );
    }

    #[test]
    fn empty_bold() {
        assert_eq!(parse_inline("****"), vec![Span::bold("")]);
    }

    #[test]
    fn leftmost_marker_wins() {
        // The link starts first, so the bold markers stay inside its label.
        assert_eq!(
            parse_inline("[**x**](y)"),
            vec![Span::Link {
                label: "**x**".to_string(),
                url: "y".to_string(),
                external: false,
            }]
        );
    }

    #[test]
    fn plain_text_strips_markers_and_keeps_emoji() {
        let spans = parse_inline("**Rust** 🟢 Expert, see [site](http://a.b)");
        assert_eq!(plain_text(&spans), "Rust 🟢 Expert, see site");
    }

    proptest! {
        #[test]
        fn source_reconstructs_line(line in "[a-z *\\[\\]()🟢🟡🔴]{0,40}") {
            let spans = parse_inline(&line);
            prop_assert_eq!(source(&spans), line);
        }

        #[test]
        fn never_panics(line in "\\PC*") {
            let spans = parse_inline(&line);
            prop_assert_eq!(source(&spans), line);
        }

        #[test]
        fn no_empty_text_spans(line in "[a-z *\\[\\]()🟢]{0,40}") {
            for span in parse_inline(&line) {
                if let Span::Text { text } = span {
                    prop_assert!(!text.is_empty());
                }
            }
        }
    }
}
