//! Source text positions.

use std::fmt;
use std::sync::Arc;

use text_size::TextSize;

/// A line and column position in source text.
///
/// Both line and column are 0-indexed internally, but displayed as 1-indexed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, PartialOrd, Ord)]
pub struct LineCol {
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column, in characters
    pub col: u32,
}

impl LineCol {
    /// Create a new LineCol position.
    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }

    /// Get 1-indexed line number (for display).
    #[inline]
    pub const fn line_one_indexed(self) -> u32 {
        self.line + 1
    }

    /// Get 1-indexed column number (for display).
    #[inline]
    pub const fn col_one_indexed(self) -> u32 {
        self.col + 1
    }
}

impl fmt::Debug for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line_one_indexed(), self.col_one_indexed())
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line_one_indexed(), self.col_one_indexed())
    }
}

/// A position inside a named file.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    /// Path of the file, as it was handed to the loader.
    pub file: Arc<str>,
    pub pos: LineCol,
}

impl Location {
    pub fn new(file: impl Into<Arc<str>>, pos: LineCol) -> Self {
        Self {
            file: file.into(),
            pos,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.pos)
    }
}

/// Index for converting byte offsets to line/column positions.
///
/// Columns count characters, so a multi-byte character before a position
/// shifts it by one, not by its byte length.
#[derive(Clone, Debug)]
pub struct LineIndex {
    /// Byte offset of the start of each line
    line_starts: Vec<TextSize>,
    /// Start of each multi-byte character, with the extra bytes seen up to
    /// and including it.
    multibyte: Vec<(TextSize, u32)>,
}

impl LineIndex {
    /// Build a line index from source text.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        let mut multibyte = Vec::new();
        let mut extra = 0u32;

        for (offset, c) in text.char_indices() {
            if c == '\n' {
                line_starts.push(TextSize::from((offset + 1) as u32));
            }
            let len = c.len_utf8() as u32;
            if len > 1 {
                extra += len - 1;
                multibyte.push((TextSize::from(offset as u32), extra));
            }
        }

        Self {
            line_starts,
            multibyte,
        }
    }

    /// Convert a byte offset to a line/column position.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);

        let line_start = self.line_starts[line];
        let bytes: u32 = (offset - line_start).into();
        let col = bytes - (self.extra_before(offset) - self.extra_before(line_start));

        LineCol {
            line: line as u32,
            col,
        }
    }

    /// Shorthand for lexers, which hand out `usize` byte offsets.
    #[inline]
    pub fn line_col_at(&self, offset: usize) -> LineCol {
        self.line_col(TextSize::from(offset as u32))
    }

    /// Extra bytes of the multi-byte characters starting before `offset`.
    fn extra_before(&self, offset: TextSize) -> u32 {
        match self.multibyte.partition_point(|&(start, _)| start < offset) {
            0 => 0,
            n => self.multibyte[n - 1].1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_display() {
        let pos = LineCol::new(0, 0);
        assert_eq!(format!("{}", pos), "1:1");

        let pos = LineCol::new(5, 10);
        assert_eq!(format!("{}", pos), "6:11");
    }

    #[test]
    fn test_line_index_multi_line() {
        let index = LineIndex::new("msgid \"a\"\nmsgstr \"b\"\n");

        assert_eq!(index.line_col_at(0), LineCol::new(0, 0));
        assert_eq!(index.line_col_at(6), LineCol::new(0, 6));
        assert_eq!(index.line_col_at(10), LineCol::new(1, 0));
        assert_eq!(index.line_col_at(17), LineCol::new(1, 7));
    }

    #[test]
    fn test_columns_count_characters() {
        // `é` is two bytes, `カ` three.
        let text = "$x = 'é'; __d\nカート __d";
        let index = LineIndex::new(text);

        let first = text.find("__d").unwrap();
        assert_eq!(index.line_col_at(first), LineCol::new(0, 10));
        let second = text.rfind("__d").unwrap();
        assert_eq!(index.line_col_at(second), LineCol::new(1, 4));
    }

    #[test]
    fn test_location_display() {
        let loc = Location::new("locales/ja_JP/app.po", LineCol::new(3, 0));
        assert_eq!(loc.to_string(), "locales/ja_JP/app.po:4:1");
    }
}
