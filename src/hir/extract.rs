//! Definition and reference extraction: pure functions over lines.
//!
//! Both extractors walk the same [`IrLine`] token streams, so a name the
//! definition side registers is always spelled exactly as the reference
//! side sees it.

use smol_str::SmolStr;

use super::scopes::{define_header_name, enclosing_scope};
use super::symbols::{FunctionScope, SymbolDefinition, SymbolKind, SymbolReference};
use crate::base::{LineCol, Span};
use crate::syntax::{IrLine, Token, TokenKind};

/// Tokenize every line that can hold symbols.
///
/// Blank and comment-only lines are dropped.
pub(crate) fn scan_lines<'a>(lines: &[&'a str]) -> Vec<IrLine<'a>> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, raw)| !crate::syntax::is_blank_or_comment(raw))
        .map(|(i, raw)| IrLine::new(i as u32, raw))
        .collect()
}

fn token_span(line: &IrLine<'_>, token: &Token) -> Span {
    Span::on_line(line.number, token.start, token.end)
}

fn code_span(line: &IrLine<'_>) -> Span {
    Span::on_line(line.number, line.code_start_col(), line.code_end_col())
}

// ============================================================================
// DEFINITIONS
// ============================================================================

/// Extract every definition in the document, in source order.
///
/// `lines` is the full document, used to find where function bodies end.
pub fn extract_definitions(
    lines: &[&str],
    scanned: &[IrLine<'_>],
    scopes: &[FunctionScope],
) -> Vec<SymbolDefinition> {
    let mut defs = Vec::new();
    for line in scanned {
        let function = enclosing_scope(scopes, line.number);
        extract_line_definitions(line, function, lines, scopes, &mut defs);
    }
    defs
}

fn extract_line_definitions(
    line: &IrLine<'_>,
    function: Option<&FunctionScope>,
    lines: &[&str],
    scopes: &[FunctionScope],
    out: &mut Vec<SymbolDefinition>,
) {
    let detail = line.raw.trim();

    // %T = type { ... }
    let is_named_type = line.starts_with(&[TokenKind::LocalIdent, TokenKind::Eq])
        && line.is_word_at(2, "type");
    if is_named_type {
        let name = &line.tokens[0];
        out.push(
            SymbolDefinition::new(
                line.text(name),
                SymbolKind::NamedType,
                code_span(line),
                token_span(line, name),
            )
            .with_detail(detail),
        );
    }

    // @g = global ..., @a = alias ..., @r = ifunc ...
    if line.starts_with(&[TokenKind::GlobalIdent, TokenKind::Eq]) {
        let name = &line.tokens[0];
        out.push(
            SymbolDefinition::new(
                line.text(name),
                SymbolKind::GlobalValue,
                code_span(line),
                token_span(line, name),
            )
            .with_detail(detail),
        );
    }

    if let Some(name) = define_header_name(line) {
        extract_function_definition(line, &name, lines, scopes, out);
    }

    if line.is_word_at(0, "declare") {
        if let Some(idx) = line.callee_position() {
            let name = &line.tokens[idx];
            let range = code_span(line);
            out.push(
                SymbolDefinition::new(line.text(name), SymbolKind::Function, range, token_span(line, name))
                    .with_detail(detail)
                    .with_function_range(range),
            );
        }
    }

    if let Some(function) = function {
        // %x = ...
        if !is_named_type && line.starts_with(&[TokenKind::LocalIdent, TokenKind::Eq]) {
            let name = &line.tokens[0];
            out.push(
                SymbolDefinition::new(
                    line.text(name),
                    SymbolKind::LocalValue,
                    code_span(line),
                    token_span(line, name),
                )
                .with_detail(detail)
                .in_function(function.name.clone()),
            );
        }

        // name:
        if let Some(name) = line.label_name() {
            out.push(
                SymbolDefinition::new(
                    line.text(name),
                    SymbolKind::Label,
                    code_span(line),
                    token_span(line, name),
                )
                .with_detail(format!("label in {}", function.name))
                .in_function(function.name.clone()),
            );
        }
    }

    // !0 = ..., !llvm.module.flags = ...
    if line.starts_with(&[TokenKind::MetadataIdent, TokenKind::Eq]) {
        let name = &line.tokens[0];
        out.push(
            SymbolDefinition::new(line.text(name), SymbolKind::Metadata, code_span(line), token_span(line, name))
                .with_detail(detail),
        );
    }

    // attributes #0 = { ... }
    if line.is_word_at(0, "attributes")
        && line.kind_at(1) == Some(TokenKind::AttrGroupIdent)
        && line.kind_at(2) == Some(TokenKind::Eq)
    {
        let name = &line.tokens[1];
        out.push(
            SymbolDefinition::new(
                line.text(name),
                SymbolKind::AttributeGroup,
                code_span(line),
                token_span(line, name),
            )
            .with_detail(detail),
        );
    }

    // $c = comdat any
    if line.starts_with(&[TokenKind::ComdatIdent, TokenKind::Eq]) && line.is_word_at(2, "comdat") {
        let name = &line.tokens[0];
        out.push(
            SymbolDefinition::new(line.text(name), SymbolKind::Comdat, code_span(line), token_span(line, name))
                .with_detail(detail),
        );
    }
}

/// Register a `define` header and its named parameters.
fn extract_function_definition(
    line: &IrLine<'_>,
    name: &SmolStr,
    lines: &[&str],
    scopes: &[FunctionScope],
    out: &mut Vec<SymbolDefinition>,
) {
    let Some(callee) = line.callee_position() else {
        return;
    };
    let name_token = &line.tokens[callee];

    let start = LineCol::new(line.number, line.code_start_col());
    let range = scopes
        .iter()
        .find(|scope| scope.start_line == line.number && scope.name == *name)
        .map(|scope| {
            let end_len = lines
                .get(scope.end_line as usize)
                .map_or(0, |l| l.trim_end().len() as u32);
            Span::new(start, LineCol::new(scope.end_line, end_len))
        })
        .unwrap_or_else(|| code_span(line));

    let header = line.code.trim();
    let header = header.strip_suffix('{').unwrap_or(header).trim_end();

    out.push(
        SymbolDefinition::new(name.clone(), SymbolKind::Function, range, token_span(line, name_token))
            .with_detail(header)
            .with_function_range(range),
    );

    for (param, group) in parameter_names(line, callee + 1) {
        out.push(
            SymbolDefinition::new(
                line.text(param),
                SymbolKind::LocalValue,
                token_span(line, param),
                token_span(line, param),
            )
            .with_detail(group)
            .in_function(name.clone()),
        );
    }
}

/// Named parameters in the list opening at token `open`.
///
/// A parameter is named when its comma-separated group ends in a `%`
/// token: `ptr noundef %p` does, while `%struct.S*` (a type) and a bare
/// `i32` do not. Returns each name token with its trimmed group text.
fn parameter_names<'l, 'a>(line: &'l IrLine<'a>, open: usize) -> Vec<(&'l Token, &'a str)> {
    let mut params = Vec::new();
    let mut depth = 0usize;
    let mut group_start = line.tokens[open].end as usize;
    let mut last: Option<&Token> = None;

    for token in &line.tokens[open..] {
        let closes_group = match token.kind {
            TokenKind::Comma if depth == 1 => true,
            kind if kind.is_close_delim() => {
                depth = depth.saturating_sub(1);
                depth == 0
            }
            kind if kind.is_open_delim() => {
                depth += 1;
                false
            }
            _ => false,
        };

        if closes_group {
            if let Some(name) = last.filter(|t| t.kind == TokenKind::LocalIdent) {
                let group = line.code[group_start..token.start as usize].trim();
                params.push((name, group));
            }
            if depth == 0 {
                break;
            }
            group_start = token.end as usize;
            last = None;
        } else if depth >= 1 && !(depth == 1 && token.kind == TokenKind::LParen) {
            last = Some(token);
        }
    }

    params
}

// ============================================================================
// REFERENCES
// ============================================================================

/// Extract every sigiled occurrence in the document, in source order.
pub fn extract_references(scanned: &[IrLine<'_>], scopes: &[FunctionScope]) -> Vec<SymbolReference> {
    let mut refs = Vec::new();
    for line in scanned {
        let function = enclosing_scope(scopes, line.number).map(|scope| scope.name.clone());
        extract_line_references(line, function.as_ref(), &mut refs);
    }
    refs
}

fn extract_line_references(line: &IrLine<'_>, function: Option<&SmolStr>, out: &mut Vec<SymbolReference>) {
    for (i, token) in line.tokens.iter().enumerate() {
        match token.kind {
            TokenKind::GlobalIdent => out.push(SymbolReference {
                name: line.text(token).into(),
                kind: SymbolKind::GlobalValue,
                range: token_span(line, token),
                function_name: None,
            }),
            TokenKind::LocalIdent => {
                out.push(SymbolReference {
                    name: line.text(token).into(),
                    kind: SymbolKind::LocalValue,
                    range: token_span(line, token),
                    function_name: function.cloned(),
                });

                // `label %name` names a block; record the bare name too.
                let after_label = i > 0
                    && line.is_word_at(i - 1, "label")
                    && line.tokens[i - 1].end < token.start;
                if after_label {
                    out.push(SymbolReference {
                        name: line.text(token)[1..].into(),
                        kind: SymbolKind::Label,
                        range: Span::on_line(line.number, token.start + 1, token.end),
                        function_name: function.cloned(),
                    });
                }
            }
            TokenKind::MetadataIdent => {
                // `!0 = ...` is the definition site.
                if line.kind_at(i + 1) != Some(TokenKind::Eq) {
                    out.push(SymbolReference {
                        name: line.text(token).into(),
                        kind: SymbolKind::Metadata,
                        range: token_span(line, token),
                        function_name: None,
                    });
                }
            }
            TokenKind::AttrGroupIdent => out.push(SymbolReference {
                name: line.text(token).into(),
                kind: SymbolKind::AttributeGroup,
                range: token_span(line, token),
                function_name: None,
            }),
            TokenKind::ComdatIdent => {
                let in_comdat_call = i >= 2
                    && line.kind_at(i - 1) == Some(TokenKind::LParen)
                    && line.is_word_at(i - 2, "comdat")
                    && line.kind_at(i + 1) == Some(TokenKind::RParen);
                if in_comdat_call {
                    out.push(SymbolReference {
                        name: line.text(token).into(),
                        kind: SymbolKind::Comdat,
                        range: token_span(line, token),
                        function_name: None,
                    });
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::options::ScopePolicy;
    use crate::hir::scopes::detect_function_scopes;

    fn defs_of(source: &str) -> Vec<SymbolDefinition> {
        let lines: Vec<&str> = source.lines().collect();
        let scopes = detect_function_scopes(&lines, ScopePolicy::CloseAtEof);
        extract_definitions(&lines, &scan_lines(&lines), &scopes)
    }

    fn refs_of(source: &str) -> Vec<SymbolReference> {
        let lines: Vec<&str> = source.lines().collect();
        let scopes = detect_function_scopes(&lines, ScopePolicy::CloseAtEof);
        extract_references(&scan_lines(&lines), &scopes)
    }

    fn summary(defs: &[SymbolDefinition]) -> Vec<(SymbolKind, &str)> {
        defs.iter().map(|d| (d.kind, d.name.as_str())).collect()
    }

    #[test]
    fn test_module_level_definitions() {
        let defs = defs_of(
            "%struct.Point = type { i32, i32 }\n\
             $cd = comdat any\n\
             @counter = global i32 0, comdat($cd)\n\
             @alias = alias i32, ptr @counter\n\
             declare i32 @puts(ptr)\n\
             attributes #0 = { nounwind }\n\
             !llvm.module.flags = !{!0}\n\
             !0 = !{i32 1, !\"wchar_size\", i32 4}\n",
        );

        assert_eq!(
            summary(&defs),
            vec![
                (SymbolKind::NamedType, "%struct.Point"),
                (SymbolKind::Comdat, "$cd"),
                (SymbolKind::GlobalValue, "@counter"),
                (SymbolKind::GlobalValue, "@alias"),
                (SymbolKind::Function, "@puts"),
                (SymbolKind::AttributeGroup, "#0"),
                (SymbolKind::Metadata, "!llvm.module.flags"),
                (SymbolKind::Metadata, "!0"),
            ]
        );
    }

    #[test]
    fn test_named_type_is_not_a_local() {
        let defs = defs_of("define void @f() {\n%T = type { i8 }\nret void\n}\n");
        assert!(defs.iter().all(|d| d.kind != SymbolKind::LocalValue));
    }

    #[test]
    fn test_function_with_params_and_body() {
        let defs = defs_of(
            "define i32 @add(i32 noundef %a, ptr %struct.S, %struct.S* %s) {\n\
             entry:\n\
             \x20 %sum = add i32 %a, 1\n\
             \x20 ret i32 %sum\n\
             }\n",
        );

        assert_eq!(
            summary(&defs),
            vec![
                (SymbolKind::Function, "@add"),
                (SymbolKind::LocalValue, "%a"),
                (SymbolKind::LocalValue, "%struct.S"),
                (SymbolKind::LocalValue, "%s"),
                (SymbolKind::Label, "entry"),
                (SymbolKind::LocalValue, "%sum"),
            ]
        );

        let function = &defs[0];
        assert_eq!(function.range.start, LineCol::new(0, 0));
        assert_eq!(function.range.end, LineCol::new(4, 1));
        assert_eq!(function.function_range, Some(function.range));
        assert_eq!(function.selection_range, Span::on_line(0, 11, 15));
        assert_eq!(
            function.detail.as_deref(),
            Some("define i32 @add(i32 noundef %a, ptr %struct.S, %struct.S* %s)")
        );

        let param = &defs[1];
        assert_eq!(param.function_name.as_deref(), Some("@add"));
        assert_eq!(param.detail.as_deref(), Some("i32 noundef %a"));

        let label = &defs[4];
        assert_eq!(label.selection_range, Span::on_line(1, 0, 5));
        assert_eq!(label.detail.as_deref(), Some("label in @add"));
    }

    #[test]
    fn test_unnamed_and_type_only_params_are_skipped() {
        let defs = defs_of("define void @f(i32, %struct.S*, { i32, i32 } %pair) {\n  ret void\n}\n");
        let params: Vec<_> = defs
            .iter()
            .filter(|d| d.kind == SymbolKind::LocalValue)
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(params, vec!["%pair"]);
    }

    #[test]
    fn test_param_with_nested_parens() {
        let defs = defs_of("define void @f(ptr byval(%struct.S) align 8 %p) {\n  ret void\n}\n");
        let params: Vec<_> = defs
            .iter()
            .filter(|d| d.kind == SymbolKind::LocalValue)
            .map(|d| (d.name.as_str(), d.detail.as_deref()))
            .collect();
        assert_eq!(params, vec![("%p", Some("ptr byval(%struct.S) align 8 %p"))]);
    }

    #[test]
    fn test_locals_and_labels_outside_functions_are_ignored() {
        let defs = defs_of("%x = add i32 1, 2\nstray:\n");
        assert!(defs.is_empty());
    }

    #[test]
    fn test_declare_range_is_single_line() {
        let defs = defs_of("declare void @llvm.dbg.value(metadata, metadata, metadata) ; intrinsic\n");
        assert_eq!(defs[0].range, Span::on_line(0, 0, 58));
    }

    #[test]
    fn test_reference_families() {
        let refs = refs_of(
            "define void @f(ptr %p) #0 comdat($f) {\n\
             entry:\n\
             \x20 call void @g(ptr %p), !dbg !12\n\
             \x20 br label %exit\n\
             exit:\n\
             \x20 ret void\n\
             }\n",
        );
        let found: Vec<_> = refs.iter().map(|r| (r.kind, r.name.as_str())).collect();

        assert_eq!(
            found,
            vec![
                (SymbolKind::GlobalValue, "@f"),
                (SymbolKind::LocalValue, "%p"),
                (SymbolKind::AttributeGroup, "#0"),
                (SymbolKind::Comdat, "$f"),
                (SymbolKind::GlobalValue, "@g"),
                (SymbolKind::LocalValue, "%p"),
                (SymbolKind::Metadata, "!dbg"),
                (SymbolKind::Metadata, "!12"),
                (SymbolKind::LocalValue, "%exit"),
                (SymbolKind::Label, "exit"),
            ]
        );
        assert_eq!(refs[1].function_name.as_deref(), Some("@f"));
        assert_eq!(refs[0].function_name, None);
    }

    #[test]
    fn test_label_reference_span_excludes_sigil() {
        let refs = refs_of("define void @f() {\n  br label %next\nnext:\n  ret void\n}\n");
        let label = refs.iter().find(|r| r.kind == SymbolKind::Label).unwrap();
        let local = refs.iter().find(|r| r.kind == SymbolKind::LocalValue).unwrap();

        assert_eq!(label.range, Span::on_line(1, 12, 16));
        assert_eq!(local.range, Span::on_line(1, 11, 16));
        assert_eq!(label.function_name.as_deref(), Some("@f"));
    }

    #[test]
    fn test_metadata_definition_site_is_not_a_reference() {
        let refs = refs_of("!0 = !{!1, !2}\n");
        let names: Vec<_> = refs.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["!1", "!2"]);
    }

    #[test]
    fn test_references_skip_comments() {
        let refs = refs_of("@g = global i32 0 ; uses @other and %x\n");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "@g");
    }

    #[test]
    fn test_bare_comdat_is_not_a_reference() {
        let refs = refs_of("$c = comdat any\n");
        assert!(refs.is_empty());
    }
}
