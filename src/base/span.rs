//! Source text positions and ranges.

use std::fmt;

/// A 0-indexed position: line number and UTF-8 byte column within it.
///
/// Formats as `line:col` counted from 1, the way editors show positions.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineCol {
    pub line: u32,
    /// Byte offset from the start of the line.
    pub col: u32,
}

impl LineCol {
    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

impl fmt::Debug for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

/// A range between two positions.
///
/// For a token, `end` is the column just past its last byte. Multi-line
/// spans (function bodies) end just past the closing line's last
/// non-space character.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: LineCol,
    pub end: LineCol,
}

impl Span {
    /// Create a span from two positions.
    #[inline]
    pub const fn new(start: LineCol, end: LineCol) -> Self {
        Self { start, end }
    }

    /// Create a span covering `start_col..end_col` on a single line.
    #[inline]
    pub const fn on_line(line: u32, start_col: u32, end_col: u32) -> Self {
        Self {
            start: LineCol::new(line, start_col),
            end: LineCol::new(line, end_col),
        }
    }

    /// Whether the span starts and ends on the same line.
    #[inline]
    pub const fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }

    /// Whether `pos` lies inside the span.
    ///
    /// The end is inclusive so a cursor placed just after an identifier
    /// still counts as being on it.
    pub fn contains(&self, pos: LineCol) -> bool {
        pos >= self.start && pos <= self.end
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}-{:?}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
