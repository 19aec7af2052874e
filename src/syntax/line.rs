//! Comment stripping and a tokenized view of one source line.

use super::lexer::{Token, TokenKind, tokenize};

/// Return the part of `line` before its comment.
///
/// A `;` inside a double-quoted string (a string constant or a quoted
/// identifier) does not start a comment. IR strings escape with `\XX`
/// hex pairs, never `\"`, so a plain quote toggle is enough.
pub fn strip_comment(line: &str) -> &str {
    let mut in_quotes = false;
    for (i, b) in line.bytes().enumerate() {
        match b {
            b'"' => in_quotes = !in_quotes,
            b';' if !in_quotes => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Whether a line is empty, whitespace, or a full-line `;` comment.
pub fn is_blank_or_comment(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with(';')
}

/// One line of IR with its comment removed and its tokens scanned.
#[derive(Clone, Debug)]
pub struct IrLine<'a> {
    /// 0-indexed line number.
    pub number: u32,
    /// The original line, comment included.
    pub raw: &'a str,
    /// The line up to its comment.
    pub code: &'a str,
    pub tokens: Vec<Token>,
}

impl<'a> IrLine<'a> {
    pub fn new(number: u32, raw: &'a str) -> Self {
        let code = strip_comment(raw);
        Self {
            number,
            raw,
            code,
            tokens: tokenize(code),
        }
    }

    /// Source text of a token on this line.
    #[inline]
    pub fn text(&self, token: &Token) -> &'a str {
        &self.code[token.range()]
    }

    /// Kind of the `i`th token, if there is one.
    #[inline]
    pub fn kind_at(&self, i: usize) -> Option<TokenKind> {
        self.tokens.get(i).map(|t| t.kind)
    }

    /// Whether the `i`th token is the bare word `word`.
    pub fn is_word_at(&self, i: usize, word: &str) -> bool {
        self.tokens
            .get(i)
            .is_some_and(|t| t.kind == TokenKind::Word && self.text(t) == word)
    }

    /// Whether the line's tokens start with exactly `kinds`.
    pub fn starts_with(&self, kinds: &[TokenKind]) -> bool {
        self.tokens.len() >= kinds.len()
            && self.tokens.iter().zip(kinds).all(|(t, k)| t.kind == *k)
    }

    /// The name token of a `name:` basic-block line, if this is one.
    ///
    /// The line must hold nothing but the name and the colon (a trailing
    /// comment is already gone).
    pub fn label_name(&self) -> Option<&Token> {
        match self.tokens.as_slice() {
            [name, colon]
                if colon.kind == TokenKind::Colon
                    && name.end == colon.start
                    && matches!(
                        name.kind,
                        TokenKind::Word | TokenKind::Integer | TokenKind::String
                    ) =>
            {
                Some(name)
            }
            _ => None,
        }
    }

    /// Index of the first `@name` immediately followed by `(`.
    pub fn callee_position(&self) -> Option<usize> {
        self.tokens.windows(2).position(|pair| {
            pair[0].kind == TokenKind::GlobalIdent && pair[1].kind == TokenKind::LParen
        })
    }

    /// Column of the first non-space character of the code.
    pub fn code_start_col(&self) -> u32 {
        (self.code.len() - self.code.trim_start().len()) as u32
    }

    /// Column just past the last non-space character of the code.
    pub fn code_end_col(&self) -> u32 {
        self.code.trim_end().len() as u32
    }
}
