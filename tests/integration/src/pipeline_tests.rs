//! End-to-end batch builds over the `webapp` fixture project
//!
//! Flow: config discovery -> filters -> per-family gates -> stripping -> output tree.

use pretty_assertions::assert_eq;
use rstest::rstest;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use strip_batch::{ConfigStore, FsHost, ProjectConfig, TransformOptions, run};
use strip_core::BuildMode;
use strip_test_utils::project::{TestProject, fixtures_dir};
use tempfile::TempDir;
use walkdir::WalkDir;

fn load_options(project: &TestProject) -> TransformOptions {
    let store = ConfigStore::new();
    let path = store
        .find_in(project.root())
        .expect("fixture has a buildstrip.toml");
    let config: ProjectConfig = store.load_project(&path).unwrap();
    config.into()
}

/// Assert that `actual` holds exactly the files of `expected`, byte for byte
fn assert_same_tree(expected: &Path, actual: &Path) {
    let files = |root: &Path| -> Vec<String> {
        WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                e.path()
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    };

    let expected_files = files(expected);
    assert_eq!(expected_files, files(actual));
    for file in expected_files {
        assert_eq!(
            fs::read_to_string(expected.join(&file)).unwrap(),
            fs::read_to_string(actual.join(&file)).unwrap(),
            "{file} differs"
        );
    }
}

#[test]
fn test_production_build_matches_expected_tree() {
    let project = TestProject::from_fixture("projects/webapp");
    let out = TempDir::new().unwrap();

    let host = FsHost::new(project.root()).unwrap().with_output(out.path());
    let report = run(&host, &load_options(&project), &BuildMode::new("production")).unwrap();

    assert!(report.is_success(), "{:?}", report.failures);
    assert_eq!(report.processed, 3);
    assert_eq!(report.rewritten.len(), 2);
    assert_eq!(report.unchanged, 1);
    assert_eq!(report.skipped, 3);
    assert_same_tree(&fixtures_dir().join("expected/webapp-production"), out.path());
}

#[rstest]
#[case("production", true)]
#[case("staging", true)]
#[case("development", false)]
#[case("preview", false)]
fn test_mode_decides_whether_anything_is_stripped(#[case] mode: &str, #[case] strips: bool) {
    let project = TestProject::from_fixture("projects/webapp");
    let original = project.read("src/main.ts");

    let host = FsHost::new(project.root()).unwrap();
    let report = run(&host, &load_options(&project), &BuildMode::new(mode)).unwrap();

    assert_eq!(!report.rewritten.is_empty(), strips);
    assert_eq!(project.read("src/main.ts") != original, strips);
}

#[test]
fn test_in_place_build_is_idempotent() {
    let project = TestProject::from_fixture("projects/webapp");
    let host = FsHost::new(project.root()).unwrap();
    let options = load_options(&project);
    let mode = BuildMode::new("production");

    let first = run(&host, &options, &mode).unwrap();
    assert_eq!(first.regions_removed(), 5);

    let second = run(&host, &options, &mode).unwrap();
    assert!(second.rewritten.is_empty());
    assert_eq!(second.unchanged, 3);
}

#[test]
fn test_predicate_overrides_configured_environments() {
    let project = TestProject::from_fixture("projects/webapp");
    let mut options = load_options(&project);
    options.is_target_environment = Some(Arc::new(|| false));

    let host = FsHost::new(project.root()).unwrap();
    let report = run(&host, &options, &BuildMode::new("production")).unwrap();

    assert!(report.rewritten.is_empty());
    project.assert_file_contains("src/main.ts", "BUILD_REMOVE_START");
}

#[test]
fn test_crlf_sources_keep_their_line_endings() {
    let project = TestProject::new().with_file(
        "src/app.js",
        "a();\r\n/* BUILD_REMOVE_START */\r\nb();\r\n/* BUILD_REMOVE_END */\r\nc(); // BUILD_REMOVE\r\nd();\r\n",
    );

    let host = FsHost::new(project.root()).unwrap();
    run(&host, &TransformOptions::default(), &BuildMode::default()).unwrap();

    project.assert_file_eq("src/app.js", "a();\r\nd();\r\n");
}

#[test]
fn test_test_harness_build_strips_test_family_only() {
    let project = TestProject::new().with_file(
        "src/app.js",
        "a();\n/* TEST_REMOVE_START */\nfixture();\n/* TEST_REMOVE_END */\nb(); // BUILD_REMOVE\n",
    );

    let host = FsHost::new(project.root()).unwrap();
    run(
        &host,
        &TransformOptions::default(),
        &BuildMode::testing("development"),
    )
    .unwrap();

    project.assert_file_eq("src/app.js", "a();\nb(); // BUILD_REMOVE\n");
}
