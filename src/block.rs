use serde::Serialize;

/// Semantic color of a status indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Green,
    Yellow,
    Red,
}

impl StatusColor {
    /// Map a traffic-light emoji to its color.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '🟢' => Some(Self::Green),
            '🟡' => Some(Self::Yellow),
            '🔴' => Some(Self::Red),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Green => '🟢',
            Self::Yellow => '🟡',
            Self::Red => '🔴',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }
}

/// Inline text spans with formatting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Span {
    Text { text: String },
    Bold { text: String },
    Link {
        label: String,
        url: String,
        external: bool,
    },
    Status { color: StatusColor, label: String },
}

impl Span {
    pub fn text(text: impl Into<String>) -> Self {
        Span::Text { text: text.into() }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Span::Bold { text: text.into() }
    }

    /// Build a link; anything starting with `http` is treated as external.
    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        Span::Link {
            label: label.into(),
            external: url.starts_with("http"),
            url,
        }
    }

    pub fn status(color: StatusColor, label: impl Into<String>) -> Self {
        Span::Status {
            color,
            label: label.into(),
        }
    }

    /// Visible text of the span: markers removed, status emoji kept.
    pub fn plain_text(&self) -> String {
        match self {
            Span::Text { text } | Span::Bold { text } => text.clone(),
            Span::Link { label, .. } => label.clone(),
            Span::Status { color, label } => format!("{} {}", color.symbol(), label),
        }
    }

    /// The markdown this span was parsed from.
    pub fn source(&self) -> String {
        match self {
            Span::Text { text } => text.clone(),
            Span::Bold { text } => format!("**{text}**"),
            Span::Link { label, url, .. } => format!("[{label}]({url})"),
            Span::Status { color, label } => format!("{} {}", color.symbol(), label),
        }
    }
}

/// Concatenated visible text of a span sequence.
pub fn plain_text(spans: &[Span]) -> String {
    spans.iter().map(Span::plain_text).collect()
}

/// A single bulleted list item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub content: Vec<Span>,
}

/// Block-level elements parsed from a content document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Heading text is kept raw, inline markup is not resolved.
    Heading {
        level: u8,
        text: String,
    },
    Paragraph {
        content: Vec<Span>,
    },
    List {
        items: Vec<ListItem>,
    },
    Table {
        headers: Vec<Vec<Span>>,
        rows: Vec<Vec<Vec<Span>>>,
    },
    Blockquote {
        content: Vec<Span>,
    },
    CodeBlock {
        language: String,
        content: String,
    },
    /// Placeholder for a document with no content at all.
    NoContent,
}
