//! Context types for rule execution.

use std::path::Path;

use crate::syntax::Stylesheet;

/// Context provided to rules while checking one stylesheet.
#[derive(Debug, Clone, Copy)]
pub struct FileContext<'a> {
    /// Path of the file, when the source came from disk.
    pub path: Option<&'a Path>,
    /// Raw source text.
    pub content: &'a str,
    /// Parsed stylesheet.
    pub sheet: &'a Stylesheet,
}

impl<'a> FileContext<'a> {
    /// Creates a context for in-memory source.
    #[must_use]
    pub fn new(content: &'a str, sheet: &'a Stylesheet) -> Self {
        Self {
            path: None,
            content,
            sheet,
        }
    }

    /// Sets the file path.
    #[must_use]
    pub fn with_path(mut self, path: &'a Path) -> Self {
        self.path = Some(path);
        self
    }

    /// Returns the trimmed text of a 1-indexed line.
    #[must_use]
    pub fn line_text(&self, line: usize) -> Option<&'a str> {
        line.checked_sub(1)
            .and_then(|index| self.content.lines().nth(index))
            .map(str::trim)
    }

    /// Calculates the byte offset for a 1-indexed line and column.
    #[must_use]
    pub fn offset_for(&self, line: usize, column: usize) -> usize {
        offset_for(self.content, line, column)
    }
}

/// Byte offset of a 1-indexed line and UTF-16 column.
///
/// Positions past the end of a line clamp to its end; lines past the end of
/// the content clamp to the content length.
pub(crate) fn offset_for(content: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }

    let mut start = 0;
    for (index, text) in content.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            return start + byte_in_line(text, column.saturating_sub(1));
        }
        start += text.len();
    }
    content.len()
}

fn byte_in_line(text: &str, units: usize) -> usize {
    let mut seen = 0;
    for (byte, ch) in text.char_indices() {
        if seen >= units {
            return byte;
        }
        seen += ch.len_utf16();
    }
    text.len()
}
