//! Cursor position to symbol occurrence.

use crate::base::{LineCol, Span};
use crate::hir::{Occurrence, SymbolIndex, SymbolKind};
use crate::syntax::{IrLine, Token, TokenKind, is_blank_or_comment};

/// Token families tried at a position, first match wins.
#[derive(Clone, Copy, Debug)]
enum Family {
    Global,
    Local,
    LabelAtLineStart,
    Metadata,
    AttributeGroup,
    Comdat,
}

const FAMILY_ORDER: [Family; 6] = [
    Family::Global,
    Family::Local,
    Family::LabelAtLineStart,
    Family::Metadata,
    Family::AttributeGroup,
    Family::Comdat,
];

/// Find the symbol occurrence covering `pos` in `text`.
///
/// `index` must have been built from `text`; it supplies the function
/// scopes that tag local and label occurrences. Positions inside comments,
/// whitespace or non-symbol tokens yield `None`.
pub fn occurrence_at(index: &SymbolIndex, text: &str, pos: LineCol) -> Option<Occurrence> {
    let raw = text.lines().nth(pos.line as usize)?;
    if is_blank_or_comment(raw) {
        return None;
    }
    let line = IrLine::new(pos.line, raw);
    if pos.col as usize > line.code.len() {
        return None;
    }

    let function = || {
        index
            .enclosing_function(pos.line)
            .map(|scope| scope.name.clone())
    };

    FAMILY_ORDER.into_iter().find_map(|family| {
        let (token, kind) = match family {
            Family::Global => (covering(&line, TokenKind::GlobalIdent, pos.col)?, SymbolKind::GlobalValue),
            Family::Local => (covering(&line, TokenKind::LocalIdent, pos.col)?, SymbolKind::LocalValue),
            Family::LabelAtLineStart => {
                let name = line.label_name().filter(|t| t.covers(pos.col))?;
                (name, SymbolKind::Label)
            }
            Family::Metadata => (covering(&line, TokenKind::MetadataIdent, pos.col)?, SymbolKind::Metadata),
            Family::AttributeGroup => {
                (covering(&line, TokenKind::AttrGroupIdent, pos.col)?, SymbolKind::AttributeGroup)
            }
            Family::Comdat => (covering(&line, TokenKind::ComdatIdent, pos.col)?, SymbolKind::Comdat),
        };

        let function_name = if kind.is_function_scoped() { function() } else { None };
        Some(Occurrence {
            name: line.text(token).into(),
            kind,
            range: Span::on_line(pos.line, token.start, token.end),
            function_name,
        })
    })
}

fn covering<'l>(line: &'l IrLine<'_>, kind: TokenKind, col: u32) -> Option<&'l Token> {
    line.tokens.iter().find(|t| t.kind == kind && t.covers(col))
}
