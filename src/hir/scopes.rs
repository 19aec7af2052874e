//! Function scope detection by brace counting.

use smol_str::SmolStr;
use tracing::debug;

use super::options::ScopePolicy;
use super::symbols::FunctionScope;
use crate::syntax::{IrLine, is_blank_or_comment};

/// A `define` header whose body has not closed yet.
struct OpenScope {
    name: SmolStr,
    start_line: u32,
    depth: i64,
    seen_brace: bool,
}

/// Find the `@name` of a `define ... @name(` header line.
pub(crate) fn define_header_name(line: &IrLine<'_>) -> Option<SmolStr> {
    if !line.is_word_at(0, "define") {
        return None;
    }
    let idx = line.callee_position()?;
    Some(SmolStr::new(line.text(&line.tokens[idx])))
}

/// Detect function bodies in `lines`.
///
/// A scope opens on a `define ... @name(` header seen while no scope is
/// open, then counts every `{` and `}` character from the header line on.
/// It closes on the line where the depth comes back to zero after the
/// first brace. Headers met while a scope is open are ignored.
pub fn detect_function_scopes(lines: &[&str], policy: ScopePolicy) -> Vec<FunctionScope> {
    let mut scopes = Vec::new();
    let mut open: Option<OpenScope> = None;

    for (i, raw) in lines.iter().enumerate() {
        let line_no = i as u32;

        if open.is_none() && !is_blank_or_comment(raw) {
            if let Some(name) = define_header_name(&IrLine::new(line_no, raw)) {
                open = Some(OpenScope {
                    name,
                    start_line: line_no,
                    depth: 0,
                    seen_brace: false,
                });
            }
        }

        let Some(scope) = open.as_mut() else {
            continue;
        };

        for b in raw.bytes() {
            match b {
                b'{' => {
                    scope.depth += 1;
                    scope.seen_brace = true;
                }
                b'}' => scope.depth -= 1,
                _ => {}
            }
        }

        if scope.seen_brace && scope.depth <= 0 {
            scopes.push(FunctionScope {
                name: scope.name.clone(),
                start_line: scope.start_line,
                end_line: line_no,
                closed: true,
            });
            open = None;
        }
    }

    if let Some(scope) = open {
        match policy {
            ScopePolicy::CloseAtEof => {
                let end_line = lines.len().saturating_sub(1) as u32;
                debug!(
                    "function {} opened on line {} never closed; closing at line {}",
                    scope.name, scope.start_line, end_line
                );
                scopes.push(FunctionScope {
                    name: scope.name,
                    start_line: scope.start_line,
                    end_line,
                    closed: false,
                });
            }
            ScopePolicy::Discard => {
                debug!(
                    "function {} opened on line {} never closed; discarding scope",
                    scope.name, scope.start_line
                );
            }
        }
    }

    scopes
}

/// The scope containing `line`, if any.
///
/// `scopes` must be in document order and non-overlapping, as
/// [`detect_function_scopes`] produces them.
pub fn enclosing_scope(scopes: &[FunctionScope], line: u32) -> Option<&FunctionScope> {
    let idx = scopes
        .partition_point(|scope| scope.start_line <= line)
        .checked_sub(1)?;
    scopes.get(idx).filter(|scope| scope.contains_line(line))
}
