//! Token definitions shared by every line scanner.
//!
//! The sigiled identifier grammar is written down exactly once, in the
//! `#[regex]` attributes below:
//!
//! ```text
//! ident := [-a-zA-Z$._][-a-zA-Z$._0-9]*  |  "..."  |  [0-9]+
//! ```
//!
//! `logos` compiles these into a DFA, so a pathological line (very long,
//! or an unterminated quoted name) is still scanned in linear time.

use std::ops::Range;

use logos::Logos;

/// Kinds of token the line lexer recognizes.
///
/// Characters outside these patterns are skipped; the indexer never
/// needs them.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    /// `%name`, `%"quoted name"`, `%0`
    #[regex(r#"%([-a-zA-Z$._][-a-zA-Z$._0-9]*|"[^"]*"|[0-9]+)"#)]
    LocalIdent,

    /// `@name`, `@"quoted name"`, `@0`
    #[regex(r#"@([-a-zA-Z$._][-a-zA-Z$._0-9]*|"[^"]*"|[0-9]+)"#)]
    GlobalIdent,

    /// `!name`, `!0` (`!"..."` is an MDString literal, not a name)
    #[regex(r"!([-a-zA-Z$._][-a-zA-Z$._0-9]*|[0-9]+)")]
    MetadataIdent,

    /// `#0`
    #[regex(r"#[0-9]+")]
    AttrGroupIdent,

    /// `$name`, `$"quoted name"`
    ///
    /// `$` is also a legal first character of a bare word, hence the
    /// explicit priority.
    #[regex(r#"\$([-a-zA-Z$._][-a-zA-Z$._0-9]*|"[^"]*"|[0-9]+)"#, priority = 10)]
    ComdatIdent,

    /// Keywords, types, opcodes and bare label names.
    #[regex(r"[-a-zA-Z$._][-a-zA-Z$._0-9]*")]
    Word,

    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r#""[^"]*""#)]
    String,

    #[token("=")]
    Eq,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("*")]
    Star,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("<")]
    LAngle,
    #[token(">")]
    RAngle,
}

impl TokenKind {
    /// Whether this token opens a nesting level.
    pub fn is_open_delim(self) -> bool {
        matches!(
            self,
            TokenKind::LParen | TokenKind::LBrace | TokenKind::LBracket | TokenKind::LAngle
        )
    }

    /// Whether this token closes a nesting level.
    pub fn is_close_delim(self) -> bool {
        matches!(
            self,
            TokenKind::RParen | TokenKind::RBrace | TokenKind::RBracket | TokenKind::RAngle
        )
    }
}

/// A token with its byte columns in the scanned line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// First byte of the token.
    pub start: u32,
    /// One past the last byte of the token.
    pub end: u32,
}

impl Token {
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start as usize..self.end as usize
    }

    /// Whether `col` falls on this token, counting the position just past
    /// its last byte.
    #[inline]
    pub fn covers(&self, col: u32) -> bool {
        self.start <= col && col <= self.end
    }
}

/// Tokenize one line (or any fragment) of IR.
pub fn tokenize(text: &str) -> Vec<Token> {
    TokenKind::lexer(text)
        .spanned()
        .filter_map(|(result, span)| {
            result.ok().map(|kind| Token {
                kind,
                start: span.start as u32,
                end: span.end as u32,
            })
        })
        .collect()
}
