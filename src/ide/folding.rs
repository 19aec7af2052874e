//! Folding ranges: collapsible code regions.
//!
//! Function bodies come from the index; comment blocks come from the text,
//! since comments never reach the index.

use crate::hir::{SymbolIndex, SymbolKind};
use crate::syntax::is_blank_or_comment;

/// A folding range with position information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldingRange {
    /// Start line (0-indexed)
    pub start_line: u32,
    /// Start column (0-indexed)
    pub start_col: u32,
    /// End line (0-indexed)
    pub end_line: u32,
    /// End column (0-indexed)
    pub end_col: u32,
    /// Whether this is a comment region
    pub is_comment: bool,
}

/// Get folding ranges for a document.
///
/// Returns every multi-line function body and every run of two or more
/// consecutive full-line comments, sorted by start line.
pub fn folding_ranges(index: &SymbolIndex, text: &str) -> Vec<FoldingRange> {
    let mut ranges: Vec<FoldingRange> = index
        .definitions()
        .filter(|(key, _)| key.kind == SymbolKind::Function)
        .map(|(_, def)| def.range)
        .filter(|range| !range.is_single_line())
        .map(|range| FoldingRange {
            start_line: range.start.line,
            start_col: range.start.col,
            end_line: range.end.line,
            end_col: range.end.col,
            is_comment: false,
        })
        .collect();

    ranges.extend(comment_blocks(text));
    ranges.sort_by_key(|r| (r.start_line, r.end_line));
    ranges
}

fn comment_blocks(text: &str) -> Vec<FoldingRange> {
    let mut blocks = Vec::new();
    // (first line, last line, last line's length)
    let mut run: Option<(u32, u32, u32)> = None;

    for (i, line) in text.lines().enumerate() {
        let i = i as u32;
        let is_comment = is_blank_or_comment(line) && !line.trim().is_empty();
        match (&mut run, is_comment) {
            (Some((_, end, end_col)), true) => {
                *end = i;
                *end_col = line.trim_end().len() as u32;
            }
            (None, true) => run = Some((i, i, line.trim_end().len() as u32)),
            (_, false) => {
                blocks.extend(run.take().and_then(comment_range));
            }
        }
    }
    blocks.extend(run.and_then(comment_range));
    blocks
}

fn comment_range((start_line, end_line, end_col): (u32, u32, u32)) -> Option<FoldingRange> {
    (end_line > start_line).then_some(FoldingRange {
        start_line,
        start_col: 0,
        end_line,
        end_col,
        is_comment: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::build_index;

    #[test]
    fn test_function_bodies_and_comment_blocks() {
        let text = "\
; ModuleID = 'demo.c'
; source_filename = \"demo.c\"
declare void @ext()
define void @f() {
  ret void
}
define void @g() { ret void }
; trailing
";
        let index = build_index(text, 0);
        let ranges = folding_ranges(&index, text);

        assert_eq!(
            ranges,
            vec![
                FoldingRange {
                    start_line: 0,
                    start_col: 0,
                    end_line: 1,
                    end_col: 28,
                    is_comment: true,
                },
                FoldingRange {
                    start_line: 3,
                    start_col: 0,
                    end_line: 5,
                    end_col: 1,
                    is_comment: false,
                },
            ]
        );
    }
}
