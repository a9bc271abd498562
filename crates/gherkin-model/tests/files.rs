//! Behavioural tests for reading feature files and directories from disk.

#![expect(clippy::expect_used, reason = "behavioural tests use explicit panics for clarity")]

use std::fs;
use std::path::Path;

use gherkin_model::{Cursor, Dialect, Directory, FeatureFile, ModelError, NodeKind};
use rstest::{fixture, rstest};
use tempfile::TempDir;

fn write(dir: &Path, relative: &str, contents: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directories");
    }
    fs::write(path, contents).expect("write feature file");
}

#[fixture]
fn tree() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "b.feature", "Feature: b\n  Scenario: s\n    Given x\n");
    write(dir.path(), "a.feature", "# just a comment\n");
    write(dir.path(), "nested/c.feature", "Feature: c\n");
    write(dir.path(), "notes.txt", "Feature: ignored\n");
    dir
}

#[rstest]
fn directories_collect_feature_files_in_order(tree: TempDir) {
    let directory = Directory::from_path(tree.path()).expect("directory parses");
    let names: Vec<_> = directory
        .feature_files
        .iter()
        .filter_map(FeatureFile::name)
        .collect();
    assert_eq!(names, vec!["a.feature", "b.feature", "c.feature"]);
    let expected = tree
        .path()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());
    assert_eq!(directory.name(), expected);

    let first = directory.feature_files.first().expect("first file");
    assert!(first.feature.is_none());
    assert_eq!(first.comments.len(), 1);
}

#[rstest]
fn files_are_reachable_from_their_directory(tree: TempDir) {
    let directory = Directory::from_path(tree.path()).expect("directory parses");
    let root = Cursor::root(&directory);
    let step = root.find(NodeKind::Step).expect("a step somewhere");
    let file = step
        .get_ancestor(NodeKind::FeatureFile)
        .expect("file ancestor");
    assert_eq!(file.to_string(), tree.path().join("b.feature").display().to_string());
    assert_eq!(step.depth(), 4);
    assert!(step
        .get_ancestor(NodeKind::Directory)
        .is_some_and(|found| found.same_node((&directory).into())));
}

#[rstest]
fn missing_paths_are_argument_errors(tree: TempDir) {
    let missing = tree.path().join("missing.feature");
    assert!(matches!(
        FeatureFile::from_path(&missing),
        Err(ModelError::Argument(_))
    ));
    assert!(matches!(
        Directory::from_path(tree.path().join("b.feature")),
        Err(ModelError::Argument(_))
    ));
    assert!(matches!(
        Directory::from_path(tree.path().join("absent")),
        Err(ModelError::Argument(_))
    ));
}

#[rstest]
fn invalid_files_name_their_path(tree: TempDir) {
    write(tree.path(), "broken.feature", "Scenario without a feature\n");
    let error = FeatureFile::from_path(tree.path().join("broken.feature"))
        .expect_err("invalid gherkin is rejected");
    let ModelError::Grammar { file, .. } = &error else {
        panic!("expected a grammar error, got {error:?}");
    };
    assert!(file.ends_with("broken.feature"));
}

#[rstest]
fn files_carry_their_path_and_lines(tree: TempDir) {
    let path = tree.path().join("b.feature");
    let file = FeatureFile::from_path_with(&path, &Dialect::default()).expect("file parses");
    assert_eq!(file.path.as_deref(), Some(path.as_path()));
    let feature = file.feature.as_ref().expect("feature present");
    assert_eq!(feature.source_line, Some(1));
    assert_eq!(feature.test_case_count(), 1);
    let scenario = feature.scenarios().next().expect("scenario");
    assert_eq!(scenario.source_line, Some(2));
    assert_eq!(scenario.steps.first().and_then(|s| s.source_line), Some(3));
}

#[test]
fn dialects_apply_to_every_file() {
    let dir = TempDir::new().expect("temp dir");
    write(
        dir.path(),
        "de.feature",
        "Funktionalität: deutsch\n  Szenario: eins\n    Angenommen ein Schritt\n",
    );
    let directory =
        Directory::from_path_with(dir.path(), &Dialect::new("de")).expect("german parses");
    let feature = directory
        .feature_files
        .first()
        .and_then(|file| file.feature.as_ref())
        .expect("german feature");
    assert_eq!(feature.keyword, "Funktionalität");
    assert_eq!(feature.name, "deutsch");
}
