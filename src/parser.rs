use crate::block::{Block, ListItem, Span};
use crate::inline::parse_inline;

const FENCE: &str = "```";
/// Language of a fence opened without an info string.
pub(crate) const DEFAULT_LANGUAGE: &str = "text";

/// Parse a content document into a list of blocks
pub fn parse(document: &str) -> Vec<Block> {
    if document.is_empty() {
        return vec![Block::NoContent];
    }

    let document = document.strip_prefix('\u{feff}').unwrap_or(document);
    let mut state = ParseState::default();
    for line in document.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        state.process_line(line);
    }
    let blocks = state.finish();

    log::debug!("parsed {} blocks", blocks.len());
    blocks
}

/// Accumulator for multi-line constructs. At most one is pending at a time.
#[derive(Debug, Default)]
enum Mode {
    #[default]
    Idle,
    InList(Vec<ListItem>),
    InTable {
        headers: Vec<Vec<Span>>,
        rows: Vec<Vec<Vec<Span>>>,
    },
    InCode {
        language: String,
        lines: Vec<String>,
    },
}

#[derive(Debug, Default)]
struct ParseState {
    mode: Mode,
    blocks: Vec<Block>,
}

impl ParseState {
    /// Switch to `next`, emitting whatever the previous mode accumulated.
    fn transition(&mut self, next: Mode) {
        match std::mem::replace(&mut self.mode, next) {
            Mode::Idle => {}
            Mode::InList(items) => {
                if !items.is_empty() {
                    self.blocks.push(Block::List { items });
                }
            }
            Mode::InTable { headers, rows } => {
                self.blocks.push(Block::Table { headers, rows });
            }
            Mode::InCode { language, lines } => {
                self.blocks.push(Block::CodeBlock {
                    language,
                    content: lines.join("\n"),
                });
            }
        }
    }

    fn process_line(&mut self, line: &str) {
        let trimmed = line.trim();

        // Fences toggle code mode; inside it nothing else is recognised.
        if let Some(info) = trimmed.strip_prefix(FENCE) {
            let next = if matches!(self.mode, Mode::InCode { .. }) {
                Mode::Idle
            } else {
                let language = if info.is_empty() { DEFAULT_LANGUAGE } else { info };
                Mode::InCode {
                    language: language.to_string(),
                    lines: Vec::new(),
                }
            };
            self.transition(next);
            return;
        }
        if let Mode::InCode { lines, .. } = &mut self.mode {
            lines.push(line.to_string());
            return;
        }

        if is_table_row(trimmed) {
            if matches!(self.mode, Mode::InList(_)) {
                self.transition(Mode::Idle);
            }
            if trimmed.contains("---") {
                // Header separator
                return;
            }
            let cells = split_cells(trimmed);
            match &mut self.mode {
                Mode::InTable { rows, .. } => rows.push(cells),
                _ => self.transition(Mode::InTable {
                    headers: cells,
                    rows: Vec::new(),
                }),
            }
            return;
        }

        if let Some(item) = trimmed.strip_prefix("- ") {
            let item = ListItem {
                content: parse_inline(item),
            };
            match &mut self.mode {
                Mode::InList(items) => items.push(item),
                _ => self.transition(Mode::InList(vec![item])),
            }
            return;
        }

        self.transition(Mode::Idle);

        if let Some(text) = trimmed.strip_prefix("### ") {
            self.push_heading(3, text);
        } else if let Some(text) = trimmed.strip_prefix("## ") {
            self.push_heading(2, text);
        } else if let Some(text) = trimmed.strip_prefix("# ") {
            self.push_heading(1, text);
        } else if let Some(quote) = trimmed.strip_prefix("> ") {
            self.blocks.push(Block::Blockquote {
                content: parse_inline(quote),
            });
        } else if !trimmed.is_empty() {
            self.blocks.push(Block::Paragraph {
                content: parse_inline(line),
            });
        }
    }

    fn push_heading(&mut self, level: u8, text: &str) {
        self.blocks.push(Block::Heading {
            level,
            text: text.to_string(),
        });
    }

    /// Flush pending state. An unterminated fence keeps its lines, if any.
    fn finish(mut self) -> Vec<Block> {
        if matches!(&self.mode, Mode::InCode { lines, .. } if lines.is_empty()) {
            self.mode = Mode::Idle;
        }
        self.transition(Mode::Idle);
        self.blocks
    }
}

fn is_table_row(trimmed: &str) -> bool {
    trimmed.starts_with('|') && trimmed.ends_with('|')
}

/// Split a `| a | b |` row into inline-parsed cells.
fn split_cells(trimmed: &str) -> Vec<Vec<Span>> {
    let fields: Vec<&str> = trimmed.split('|').map(str::trim).collect();
    let last = fields.len().saturating_sub(1);
    fields
        .iter()
        .enumerate()
        .filter(|(i, _)| *i > 0 && *i < last)
        .map(|(_, cell)| parse_inline(cell))
        .collect()
}
