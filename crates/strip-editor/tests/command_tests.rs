//! End-to-end command sessions against an in-memory document.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use strip_core::{BuildMode, FamilyKind, strip_active};
use strip_editor::{Command, CommandOutcome, ConfigureAction, Document, Settings, execute};

const SOURCE: &str = "function f() {\n  debug();\n  run();\n}\n";

fn document_with_line(line: usize) -> Document {
    let mut doc = Document::new(SOURCE);
    doc.select_lines(line, line).unwrap();
    doc
}

#[test]
fn test_wrap_block_then_erase_restores_source() {
    let mut settings = Settings::new();
    let mut doc = document_with_line(2);

    let outcome = execute(Some(&mut doc), Command::WrapBlock, &mut settings).unwrap();
    assert!(outcome.edit().is_some());
    assert_eq!(
        doc.text(),
        "function f() {\n  /* BUILD_REMOVE_START */\n  debug();\n  /* BUILD_REMOVE_END */\n  run();\n}\n"
    );

    let len = doc.text().len();
    doc.select(0..len).unwrap();
    execute(Some(&mut doc), Command::EraseMarkers, &mut settings).unwrap();
    assert_eq!(doc.text(), SOURCE);
    assert_eq!(doc.version(), 2);
}

#[test]
fn test_each_command_is_one_undo_step() {
    let mut settings = Settings::new();
    let mut doc = document_with_line(2);

    execute(Some(&mut doc), Command::WrapLine, &mut settings).unwrap();
    assert_eq!(doc.version(), 1);
    assert_eq!(
        doc.text(),
        "function f() {\n  // BUILD_REMOVE_START\n  debug();\n  // BUILD_REMOVE_END\n  run();\n}\n"
    );

    assert!(doc.undo().unwrap());
    assert_eq!(doc.text(), SOURCE);
}

#[test]
fn test_wrap_then_convert_to_inline() {
    let mut settings = Settings::new();
    let mut doc = document_with_line(2);
    execute(Some(&mut doc), Command::WrapBlock, &mut settings).unwrap();

    doc.select_lines(2, 4).unwrap();
    execute(Some(&mut doc), Command::ConvertToInline, &mut settings).unwrap();
    assert_eq!(
        doc.text(),
        "function f() {\n  /* BUILD_REMOVE_START */ debug(); /* BUILD_REMOVE_END */\n  run();\n}\n"
    );
}

#[test]
fn test_convert_rejects_plain_code() {
    let mut doc = document_with_line(3);
    let outcome = execute(Some(&mut doc), Command::ConvertToInline, &mut Settings::new()).unwrap();
    assert_eq!(
        outcome,
        CommandOutcome::Warning("Selected text is not a removal block".to_string())
    );
    assert_eq!(doc.version(), 0);
}

#[test]
fn test_erase_without_markers_is_informational() {
    let mut doc = document_with_line(2);
    let outcome = execute(Some(&mut doc), Command::EraseMarkers, &mut Settings::new()).unwrap();
    assert!(matches!(outcome, CommandOutcome::Info(_)));
    assert!(!doc.is_modified());
}

#[rstest]
#[case(FamilyKind::Production, "PRODUCTION_REMOVE")]
#[case(FamilyKind::Development, "DEVELOPMENT_REMOVE")]
#[case(FamilyKind::Test, "TEST_REMOVE")]
#[case(FamilyKind::Debug, "DEBUG_REMOVE")]
fn test_wrap_family_uses_family_tokens(#[case] kind: FamilyKind, #[case] prefix: &str) {
    let mut doc = document_with_line(2);
    execute(Some(&mut doc), Command::WrapFamily(kind), &mut Settings::new()).unwrap();
    assert!(doc.text().contains(&format!("/* {prefix}_START */")));
    assert!(doc.text().contains(&format!("/* {prefix}_END */")));
}

#[test]
fn test_wrapped_debug_code_leaves_production_build() {
    let mut settings = Settings::new();
    let mut doc = document_with_line(2);
    execute(
        Some(&mut doc),
        Command::WrapFamily(FamilyKind::Debug),
        &mut settings,
    )
    .unwrap();

    let production = strip_active(
        doc.text(),
        settings.config(),
        None,
        &BuildMode::new("production"),
    )
    .unwrap();
    assert_eq!(production.text, "function f() {\n  run();\n}\n");

    let development = strip_active(
        doc.text(),
        settings.config(),
        None,
        &BuildMode::new("development"),
    )
    .unwrap();
    assert_eq!(development.text, doc.text());
}

#[test]
fn test_settings_change_affects_later_commands() {
    let mut settings = Settings::new();
    for (key, value) in [("startMarker", "TRIM_START"), ("endMarker", "TRIM_END")] {
        execute(
            None,
            Command::Configure(ConfigureAction::Set {
                key: key.to_string(),
                value: value.to_string(),
            }),
            &mut settings,
        )
        .unwrap();
    }
    settings.set("useSpacing", "off").unwrap();

    let mut doc = Document::new("let a = 1 + debug();\n");
    doc.select(12..19).unwrap();
    execute(Some(&mut doc), Command::WrapInline, &mut settings).unwrap();
    assert_eq!(doc.text(), "let a = 1 + /*TRIM_START*/ debug() /*TRIM_END*/;\n");
}

#[test]
fn test_invalid_setting_is_an_error() {
    let mut settings = Settings::new();
    let result = execute(
        None,
        Command::Configure(ConfigureAction::Set {
            key: "lineMarker".to_string(),
            value: "BUILD_REMOVE_START".to_string(),
        }),
        &mut settings,
    );
    assert!(result.is_err());
    assert_eq!(settings, Settings::new());
}

#[test]
fn test_catalogue_listing() {
    let listing = Command::catalogue()
        .iter()
        .map(|command| format!("{} | {}", command.id(), command.title()))
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(listing, @r"
    buildstrip.wrapBlock | Wrap Selection in Block Markers
    buildstrip.wrapLine | Wrap Selection in Line Markers
    buildstrip.wrapInline | Wrap Selection in Inline Markers
    buildstrip.wrapProduction | Wrap Selection in Production Markers
    buildstrip.wrapDevelopment | Wrap Selection in Development Markers
    buildstrip.wrapTest | Wrap Selection in Test Markers
    buildstrip.wrapDebug | Wrap Selection in Debug Markers
    buildstrip.markLine | Mark Lines for Removal
    buildstrip.eraseMarkers | Remove Markers from Selection
    buildstrip.convertToInline | Convert Block to Inline
    buildstrip.configure | Configure Markers
    ");
}

proptest! {
    #[test]
    fn test_any_command_is_at_most_one_undoable_edit(
        a in 0..=SOURCE.len(),
        b in 0..=SOURCE.len(),
        index in 0..10usize,
    ) {
        let command = Command::catalogue().swap_remove(index);
        let mut settings = Settings::new();
        let mut doc = Document::new(SOURCE);
        doc.select(a.min(b)..a.max(b)).unwrap();

        let outcome = execute(Some(&mut doc), command, &mut settings).unwrap();
        prop_assert_eq!(doc.version(), u64::from(outcome.edit().is_some()));

        doc.undo().unwrap();
        prop_assert_eq!(doc.text(), SOURCE);
    }
}
