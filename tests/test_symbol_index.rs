//! Whole-document index behavior: scopes, registration, collisions, outline.

use llir::base::{LineCol, Span};
use llir::hir::{
    IndexOptions, Occurrence, ScopePolicy, SymbolKey, SymbolKind, build_index, build_index_with,
};
use llir::ide::{document_symbols, occurrence_at};
use rstest::rstest;
use smol_str::SmolStr;

const LOOP: &str = include_str!("fixtures/loop.ll");

fn global(name: &str) -> Occurrence {
    Occurrence {
        name: SmolStr::new(name),
        kind: SymbolKind::GlobalValue,
        range: Span::default(),
        function_name: None,
    }
}

// ============================================================================
// SCOPES
// ============================================================================

#[rstest]
#[case::one_line("define void @f() { ret void }\n", 0)]
#[case::brace_on_next_line("define void @f()\n{\n  ret void\n}\n", 3)]
#[case::struct_literal("define void @f() {\n  %v = insertvalue { i8 } undef, i8 1, 0\n  ret void\n}\n", 3)]
#[case::blank_lines("define void @f() {\n\nentry:\n\n  ret void\n}\n\n", 5)]
fn test_one_scope_per_balanced_define(#[case] text: &str, #[case] end_line: u32) {
    let index = build_index(text, 0);
    let scopes = index.function_scopes();

    assert_eq!(scopes.len(), 1);
    assert_eq!(scopes[0].name, "@f");
    assert_eq!(scopes[0].end_line, end_line);
    assert!(scopes[0].closed);
}

#[test]
fn test_fixture_scopes() {
    let index = build_index(LOOP, 0);
    let names: Vec<_> = index
        .function_scopes()
        .iter()
        .map(|s| (s.name.as_str(), s.end_line - s.start_line))
        .collect();
    assert_eq!(names, vec![("@main", 24), ("@other", 6)]);
}

#[rstest]
#[case::close_at_eof(ScopePolicy::CloseAtEof, Some("@f"))]
#[case::discard(ScopePolicy::Discard, None)]
fn test_unclosed_function_policy(#[case] policy: ScopePolicy, #[case] owner: Option<&str>) {
    let text = "define void @f(i32 %n) {\nentry:\n  %x = add i32 %n, 1\n";
    let index = build_index_with(text, 0, &IndexOptions::new().with_scope_policy(policy));

    let local = SymbolKey::new(SymbolKind::LocalValue, "%x", Some("@f"));
    assert_eq!(index.definition(&local).is_some(), owner.is_some());
    assert_eq!(index.enclosing_function(2).map(|s| s.name.as_str()), owner);

    // The header still defines the function either way.
    assert!(
        index
            .definition(&SymbolKey::unscoped(SymbolKind::Function, "@f"))
            .is_some()
    );
}

#[test]
fn test_scope_isolation() {
    let text = "\
define i32 @f() {
  %x = add i32 1, 2
  ret i32 %x
}
define i32 @g() {
  ret i32 %x
}
";
    let index = build_index(text, 0);

    let in_f = occurrence_at(&index, text, LineCol::new(2, 10)).unwrap();
    let in_g = occurrence_at(&index, text, LineCol::new(5, 10)).unwrap();
    assert_eq!(in_g.function_name.as_deref(), Some("@g"));

    assert!(index.find_definition(&in_f).is_some());
    assert!(index.find_definition(&in_g).is_none());

    let def = index.find_definition(&in_f).unwrap();
    assert_eq!(index.references_to(def, false), vec![Span::on_line(2, 10, 12)]);
}

// ============================================================================
// REGISTRATION
// ============================================================================

#[test]
fn test_idempotent_build() {
    assert_eq!(build_index(LOOP, 3), build_index(LOOP, 3));
}

#[test]
fn test_function_dual_registration() {
    let text = "define i32 @main(i32 %argc, ptr %argv) {\nentry:\n  ret i32 0\n}\n";
    let index = build_index(text, 0);

    let via_global = index.find_definition(&global("@main")).unwrap();
    let direct = index
        .definition(&SymbolKey::unscoped(SymbolKind::Function, "@main"))
        .unwrap();

    assert_eq!(via_global, direct);
    assert_eq!(via_global.kind, SymbolKind::Function);
    assert_eq!(via_global.function_range, Some(direct.range));
}

#[test]
fn test_declared_function_resolves_from_call() {
    let text = "declare i32 @puts(ptr)\ndefine void @f() {\n  call i32 @puts(ptr null)\n  ret void\n}\n";
    let index = build_index(text, 0);

    let call = occurrence_at(&index, text, LineCol::new(2, 12)).unwrap();
    let def = index.find_definition(&call).unwrap();
    assert_eq!(def.kind, SymbolKind::Function);
    assert_eq!(def.range, Span::on_line(0, 0, 22));
}

#[test]
fn test_duplicate_global_last_write_wins() {
    let text = "@g = global i32 1\n@g = global i32 2\n";
    let index = build_index(text, 0);

    let def = index.find_definition(&global("@g")).unwrap();
    assert_eq!(def.selection_range, Span::on_line(1, 0, 2));
    assert_eq!(def.detail.as_deref(), Some("@g = global i32 2"));
}

#[test]
fn test_alias_overwrites_global() {
    let text = "@x = global i32 0\n@x = alias i32, ptr @y\n";
    let index = build_index(text, 0);

    let def = index.find_definition(&global("@x")).unwrap();
    assert_eq!(def.detail.as_deref(), Some("@x = alias i32, ptr @y"));
}

#[test]
fn test_ifunc_overwrites_global() {
    let text = "@r = global ptr null\n@r = ifunc void (), ptr @resolver\n";
    let index = build_index(text, 0);

    let def = index.find_definition(&global("@r")).unwrap();
    assert_eq!(def.kind, SymbolKind::GlobalValue);
    assert_eq!(def.selection_range, Span::on_line(1, 0, 2));
    assert_eq!(def.detail.as_deref(), Some("@r = ifunc void (), ptr @resolver"));
}

#[test]
fn test_crlf_line_endings() {
    let text = "@g = global i32 0\r\ndefine void @f() {\r\n  %x = load i32, ptr @g\r\n  ret void\r\n}\r\n";
    let index = build_index(text, 0);

    let scope = &index.function_scopes()[0];
    assert_eq!((scope.start_line, scope.end_line, scope.closed), (1, 4, true));

    let def = index.find_definition(&global("@g")).unwrap();
    assert_eq!(def.selection_range, Span::on_line(0, 0, 2));
    assert_eq!(def.detail.as_deref(), Some("@g = global i32 0"));
    assert_eq!(index.references_to(def, false), vec![Span::on_line(2, 21, 23)]);

    let local = occurrence_at(&index, text, LineCol::new(2, 3)).unwrap();
    assert_eq!(local.range, Span::on_line(2, 2, 4));
    assert_eq!(local.function_name.as_deref(), Some("@f"));
}

#[test]
fn test_redefined_local_last_write_wins() {
    let text = "define void @f() {\n  %t = add i32 1, 1\n  %t = add i32 2, 2\n  ret void\n}\n";
    let index = build_index(text, 0);

    let def = index
        .definition(&SymbolKey::new(SymbolKind::LocalValue, "%t", Some("@f")))
        .unwrap();
    assert_eq!(def.selection_range.start, LineCol::new(2, 2));
}

#[test]
fn test_metadata_definition_is_not_its_own_reference() {
    let text = "!0 = !{!0, !1}\n!1 = !{}\n";
    let index = build_index(text, 0);

    let metadata: Vec<_> = index
        .references()
        .iter()
        .filter(|r| r.kind == SymbolKind::Metadata)
        .map(|r| (r.name.as_str(), r.range))
        .collect();
    assert_eq!(
        metadata,
        vec![("!0", Span::on_line(0, 7, 9)), ("!1", Span::on_line(0, 11, 13))]
    );

    let zero = index
        .definition(&SymbolKey::unscoped(SymbolKind::Metadata, "!0"))
        .unwrap();
    assert_eq!(index.references_to(zero, false), vec![Span::on_line(0, 7, 9)]);
}

#[test]
fn test_malformed_lines_are_skipped() {
    let text = "this is not IR\n@ = global\n%%% = type\n\"unterminated\n}\n}\n";
    let index = build_index(text, 0);
    assert!(index.is_empty());
    assert!(index.function_scopes().is_empty());
}

// ============================================================================
// OUTLINE
// ============================================================================

#[test]
fn test_outline_scenario() {
    let text = "\
%struct.S = type { i32 }
@g = global i32 0
define i32 @main() {
entry:
  %x = alloca %struct.S
  ret i32 0
}
!llvm.module.flags = !{!0}
!0 = !{i32 1, !\"wchar_size\", i32 4}
";
    let index = build_index(text, 0);
    let outline: Vec<_> = document_symbols(&index)
        .into_iter()
        .map(|s| (s.kind, s.name.to_string()))
        .collect();

    assert_eq!(
        outline,
        vec![
            (SymbolKind::NamedType, "%struct.S".to_string()),
            (SymbolKind::GlobalValue, "@g".to_string()),
            (SymbolKind::Function, "@main".to_string()),
            (SymbolKind::Metadata, "!llvm.module.flags".to_string()),
        ]
    );
}

#[test]
fn test_fixture_outline_has_no_locals_or_labels() {
    let index = build_index(LOOP, 0);
    let symbols = document_symbols(&index);

    assert!(symbols.iter().all(|s| !s.kind.is_function_scoped()));
    assert_eq!(
        symbols.iter().filter(|s| s.kind == SymbolKind::Function).count(),
        2
    );
}
