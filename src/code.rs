use std::io::Write;

use thiserror::Error;

use crate::block::Block;
use crate::parser::DEFAULT_LANGUAGE;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Failed to write to clipboard: {0}")]
    Write(#[from] std::io::Error),
}

/// Destination for the copy action of a code block.
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard that keeps the last copied text in memory.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ClipboardWriter for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Clipboard backed by any writer, e.g. stdout piped into `pbcopy`.
pub struct WriterClipboard<W: Write> {
    writer: W,
}

impl<W: Write> WriterClipboard<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ClipboardWriter for WriterClipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

/// A fenced code block as presented to the reader, with a copy action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlockView {
    content: String,
    language: String,
    copied: bool,
}

impl CodeBlockView {
    pub fn new(content: impl Into<String>, language: impl Into<String>) -> Self {
        let language = language.into();
        Self {
            content: content.into(),
            language: if language.is_empty() {
                DEFAULT_LANGUAGE.to_string()
            } else {
                language
            },
            copied: false,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Whether the content has been copied at least once.
    pub fn copied(&self) -> bool {
        self.copied
    }

    /// Copy the exact content of the block to `clipboard`.
    pub fn copy(&mut self, clipboard: &mut dyn ClipboardWriter) -> Result<(), ClipboardError> {
        clipboard.write_text(&self.content)?;
        self.copied = true;
        log::debug!(
            "copied {} bytes of {} code",
            self.content.len(),
            self.language
        );
        Ok(())
    }
}

/// Views over every code block, in document order.
pub fn code_blocks(blocks: &[Block]) -> Vec<CodeBlockView> {
    blocks
        .iter()
        .filter_map(|block| match block {
            Block::CodeBlock { language, content } => {
                Some(CodeBlockView::new(content.as_str(), language.as_str()))
            }
            _ => None,
        })
        .collect()
}
