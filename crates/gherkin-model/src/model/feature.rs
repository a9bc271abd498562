//! Directories, feature files, and features.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::config::Dialect;
use crate::error::{ModelError, Result};
use crate::parsing::{self, Snippet};
use crate::record::RawElement;

use super::{Background, Comment, Outline, Scenario, Tag, Test};

/// A directory tree of feature files.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    /// Directory path.
    pub path: Option<PathBuf>,
    /// Feature files found beneath the directory, sorted by path.
    pub feature_files: Vec<FeatureFile>,
}

impl Directory {
    /// Parse every `.feature` file beneath `path` with the default dialect.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Argument`] if `path` is not a directory, and
    /// propagates the first failure met while reading or parsing a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_path_with(path, &Dialect::default())
    }

    /// Parse every `.feature` file beneath `path` with `dialect`.
    ///
    /// # Errors
    ///
    /// See [`Directory::from_path`].
    pub fn from_path_with(path: impl AsRef<Path>, dialect: &Dialect) -> Result<Self> {
        let root = path.as_ref();
        if !root.is_dir() {
            return Err(ModelError::Argument(format!(
                "'{}' is not a directory",
                root.display()
            )));
        }

        let mut feature_files = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|err| {
                let failed = err.path().unwrap_or(root).to_path_buf();
                ModelError::Io {
                    path: failed,
                    source: err.into(),
                }
            })?;
            if entry.file_type().is_file() && is_feature_file(entry.path()) {
                feature_files.push(FeatureFile::from_path_with(entry.path(), dialect)?);
            }
        }

        debug!(
            directory = %root.display(),
            count = feature_files.len(),
            "discovered feature files"
        );
        Ok(Self {
            path: Some(root.to_path_buf()),
            feature_files,
        })
    }

    /// The final component of the directory path.
    #[must_use]
    pub fn name(&self) -> Option<String> {
        file_name(self.path.as_deref())
    }
}

fn is_feature_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "feature")
}

fn file_name(path: Option<&Path>) -> Option<String> {
    path?
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

/// A single feature file.
#[derive(Debug, Clone, Default)]
pub struct FeatureFile {
    /// Path the file was read from.
    pub path: Option<PathBuf>,
    /// The file's feature; absent for blank or comment-only files.
    pub feature: Option<Feature>,
    /// Every comment in the file, in source order.
    pub comments: Vec<Comment>,
    pub(crate) raw: Option<RawElement>,
}

impl FeatureFile {
    /// A file without a path holding `feature`.
    #[must_use]
    pub fn new(feature: Feature) -> Self {
        Self {
            feature: Some(feature),
            ..Self::default()
        }
    }

    /// Read and parse the file at `path` with the default dialect.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Argument`] if the path does not name a file,
    /// [`ModelError::Io`] if it cannot be read, and [`ModelError::Grammar`]
    /// if its contents are not valid Gherkin.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_path_with(path, &Dialect::default())
    }

    /// Read and parse the file at `path` with `dialect`.
    ///
    /// A `# language:` header in the file overrides `dialect`.
    ///
    /// # Errors
    ///
    /// See [`FeatureFile::from_path`].
    pub fn from_path_with(path: impl AsRef<Path>, dialect: &Dialect) -> Result<Self> {
        let path = path.as_ref();
        let source = parsing::read_source(path)?;
        let record = parsing::parse_document(&source, &path.display().to_string(), dialect)?;
        let mut file = Self::from(record);
        file.path = Some(path.to_path_buf());
        Ok(file)
    }

    /// The file name component of the path.
    #[must_use]
    pub fn name(&self) -> Option<String> {
        file_name(self.path.as_deref())
    }
}

/// A feature: the root of a feature file's test content.
#[derive(Debug, Clone, Default)]
pub struct Feature {
    /// Localised keyword; rendered as `Feature` when empty.
    pub keyword: String,
    /// Feature name.
    pub name: String,
    /// Description text below the keyword line.
    pub description: String,
    /// Tags applied to the feature.
    pub tags: Vec<Tag>,
    /// Optional background shared by every test.
    pub background: Option<Background>,
    /// Scenarios and outlines in source order.
    pub tests: Vec<Test>,
    /// 1-based line of the keyword.
    pub source_line: Option<usize>,
    pub(crate) raw: Option<RawElement>,
}

impl Feature {
    /// Create an empty feature with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the background.
    #[must_use]
    pub fn with_background(mut self, background: Background) -> Self {
        self.background = Some(background);
        self
    }

    /// Append a scenario or outline.
    #[must_use]
    pub fn with_test(mut self, test: impl Into<Test>) -> Self {
        self.tests.push(test.into());
        self
    }

    /// Parse a complete feature from text with the default dialect.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Grammar`] naming `stand_alone_feature.feature`
    /// if the text does not contain a valid feature.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_text_with(text, &Dialect::default())
    }

    /// Parse a complete feature from text with `dialect`.
    ///
    /// # Errors
    ///
    /// See [`Feature::from_text`].
    pub fn from_text_with(text: &str, dialect: &Dialect) -> Result<Self> {
        parsing::parse_snippet(Snippet::Feature, text, dialect)?
            .into_feature()
            .map(Self::from)
    }

    /// Scenarios among the feature's tests.
    pub fn scenarios(&self) -> impl Iterator<Item = &Scenario> {
        self.tests.iter().filter_map(Test::as_scenario)
    }

    /// Outlines among the feature's tests.
    pub fn outlines(&self) -> impl Iterator<Item = &Outline> {
        self.tests.iter().filter_map(Test::as_outline)
    }

    /// Number of concrete test cases the feature would execute.
    ///
    /// Each scenario counts once and each outline counts once per argument
    /// row across its examples.
    #[must_use]
    pub fn test_case_count(&self) -> usize {
        let outline_rows: usize = self
            .outlines()
            .flat_map(|outline| &outline.examples)
            .map(|example| example.argument_rows().len())
            .sum();
        self.scenarios().count() + outline_rows
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests fail loudly on parse errors")]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const COUNTED: &str = "\
Feature: counting
  Scenario: one
    Given a step

  Scenario Outline: many
    Given <n>

    Examples:
      | n |
      | 1 |
      | 2 |

    Examples:
      | n |
      | 3 |
";

    #[test]
    fn test_case_count_expands_outline_rows() {
        let feature = Feature::from_text(COUNTED).expect("parse feature");
        assert_eq!(feature.scenarios().count(), 1);
        assert_eq!(feature.outlines().count(), 1);
        assert_eq!(feature.test_case_count(), 4);
    }

    #[test]
    fn feature_file_is_read_from_disk() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("counting.feature");
        fs::write(&path, COUNTED).expect("write feature");

        let file = FeatureFile::from_path(&path).expect("parse feature file");
        assert_eq!(file.name().as_deref(), Some("counting.feature"));
        assert_eq!(file.path.as_deref(), Some(path.as_path()));
        let feature = file.feature.expect("feature present");
        assert_eq!(feature.name, "counting");
    }

    #[test]
    fn missing_feature_file_is_an_argument_error() {
        let dir = TempDir::new().expect("create temp dir");
        let result = FeatureFile::from_path(dir.path().join("absent.feature"));
        assert!(matches!(result, Err(ModelError::Argument(_))));
    }

    #[test]
    fn directory_collects_feature_files_in_order() {
        let dir = TempDir::new().expect("create temp dir");
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).expect("create nested dir");
        fs::write(dir.path().join("b.feature"), "Feature: b\n").expect("write b");
        fs::write(nested.join("a.feature"), "Feature: a\n").expect("write a");
        fs::write(dir.path().join("notes.txt"), "not gherkin").expect("write notes");

        let directory = Directory::from_path(dir.path()).expect("parse directory");
        let names: Vec<String> = directory
            .feature_files
            .iter()
            .filter_map(FeatureFile::name)
            .collect();
        assert_eq!(names, vec!["b.feature", "a.feature"]);
        assert_eq!(directory.name(), file_name(Some(dir.path())));
    }

    #[test]
    fn directory_rejects_plain_files() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("x.feature");
        fs::write(&path, "Feature: x\n").expect("write feature");
        assert!(matches!(
            Directory::from_path(&path),
            Err(ModelError::Argument(_))
        ));
    }
}
