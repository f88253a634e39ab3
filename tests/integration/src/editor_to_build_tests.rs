//! Code marked with the editor commands is removed by the batch build
//!
//! Flow: open document -> run commands -> save -> build -> compare.

use pretty_assertions::assert_eq;
use rstest::rstest;
use strip_batch::{ConfigStore, FsHost, MemoryHost, ProjectConfig, TransformOptions, run};
use strip_core::{BuildMode, FamilyKind};
use strip_editor::{Command, Document, Settings, execute};
use strip_test_utils::project::TestProject;

const SOURCE: &str = "\
export function handler(req) {
  audit(req);
  return respond(req);
}
";

const PRODUCTION: &str = "\
export function handler(req) {
  return respond(req);
}
";

/// Run `command` over line 2 of [`SOURCE`] and return the edited text
fn mark_audit_line(command: Command, settings: &mut Settings) -> String {
    let mut document = Document::new(SOURCE);
    document.select_lines(2, 2).unwrap();
    let outcome = execute(Some(&mut document), command, settings).unwrap();
    assert!(outcome.edit().is_some(), "{outcome:?}");
    assert_eq!(document.version(), 1);
    document.text().to_string()
}

fn build(source: &str, options: &TransformOptions, mode: &BuildMode) -> String {
    let host = MemoryHost::new().with_file("src/handler.js", source);
    let report = run(&host, options, mode).unwrap();
    assert!(report.is_success(), "{:?}", report.failures);
    host.get("src/handler.js").unwrap()
}

#[rstest]
#[case(Command::WrapBlock)]
#[case(Command::WrapLine)]
#[case(Command::MarkLine)]
fn test_marked_code_leaves_production_build(#[case] command: Command) {
    let marked = mark_audit_line(command, &mut Settings::new());
    assert_ne!(marked, SOURCE);

    let production = build(&marked, &TransformOptions::default(), &BuildMode::default());
    assert_eq!(production, PRODUCTION);

    let development = build(
        &marked,
        &TransformOptions::default(),
        &BuildMode::new("development"),
    );
    assert_eq!(development, marked);
}

#[rstest]
#[case(FamilyKind::Production, "production", true)]
#[case(FamilyKind::Development, "development", true)]
#[case(FamilyKind::Development, "production", false)]
#[case(FamilyKind::Debug, "production", true)]
#[case(FamilyKind::Test, "production", false)]
fn test_family_wraps_follow_family_environments(
    #[case] family: FamilyKind,
    #[case] mode: &str,
    #[case] stripped: bool,
) {
    let marked = mark_audit_line(Command::WrapFamily(family), &mut Settings::new());
    let output = build(&marked, &TransformOptions::default(), &BuildMode::new(mode));
    assert_eq!(output == PRODUCTION, stripped);
}

#[test]
fn test_inline_wrap_inside_a_line_strips_the_whole_line() {
    let mut document = Document::new(SOURCE);
    let start = SOURCE.find("audit").unwrap();
    document.select(start..start + "audit(req);".len()).unwrap();
    execute(Some(&mut document), Command::WrapInline, &mut Settings::new()).unwrap();
    assert_eq!(
        document.text(),
        "export function handler(req) {\n  /* BUILD_REMOVE_START */ audit(req); /* BUILD_REMOVE_END */\n  return respond(req);\n}\n"
    );

    let production = build(
        document.text(),
        &TransformOptions::default(),
        &BuildMode::default(),
    );
    assert_eq!(production, PRODUCTION);
}

#[test]
fn test_converted_inline_region_strips_the_same() {
    let mut settings = Settings::new();
    let mut document = Document::new(SOURCE);
    document.select_lines(2, 2).unwrap();
    execute(Some(&mut document), Command::WrapBlock, &mut settings).unwrap();

    document.select_lines(2, 4).unwrap();
    execute(Some(&mut document), Command::ConvertToInline, &mut settings).unwrap();
    assert_eq!(
        document.text(),
        "export function handler(req) {\n  /* BUILD_REMOVE_START */ audit(req); /* BUILD_REMOVE_END */\n  return respond(req);\n}\n"
    );

    let production = build(
        document.text(),
        &TransformOptions::default(),
        &BuildMode::default(),
    );
    assert_eq!(production, PRODUCTION);
}

#[test]
fn test_erased_markers_survive_the_build() {
    let mut settings = Settings::new();
    let mut document = Document::new(SOURCE);
    document.select_lines(2, 2).unwrap();
    execute(Some(&mut document), Command::WrapBlock, &mut settings).unwrap();

    let len = document.text().len();
    document.select(0..len).unwrap();
    execute(Some(&mut document), Command::EraseMarkers, &mut settings).unwrap();
    assert_eq!(document.text(), SOURCE);

    let production = build(
        document.text(),
        &TransformOptions::default(),
        &BuildMode::default(),
    );
    assert_eq!(production, SOURCE);
}

#[test]
fn test_editor_settings_saved_as_project_config_drive_the_build() {
    let mut settings = Settings::new();
    settings.set("startMarker", "STRIP_BEGIN").unwrap();
    settings.set("endMarker", "STRIP_FINISH").unwrap();
    settings.set("lineMarker", "STRIP").unwrap();
    let marked = mark_audit_line(Command::WrapBlock, &mut settings);
    assert!(marked.contains("/* STRIP_BEGIN */"));

    let project = TestProject::new().with_file("src/handler.js", &marked);
    let config = ProjectConfig {
        markers: settings.to_config(),
        ..ProjectConfig::default()
    };
    let store = ConfigStore::new();
    store.save(&project.path("buildstrip.json"), &config).unwrap();

    let path = store.find_in(project.root()).unwrap();
    let loaded = store.load_project(&path).unwrap();
    let host = FsHost::new(project.root()).unwrap();
    let report = run(&host, &loaded.into(), &BuildMode::default()).unwrap();

    assert_eq!(report.rewritten.len(), 1);
    project.assert_file_eq("src/handler.js", PRODUCTION);
}
