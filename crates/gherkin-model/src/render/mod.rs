//! Gherkin text rendering.
//!
//! Every node implements [`std::fmt::Display`]; the output of a feature
//! re-parses to a structurally equal feature. Each node renders itself as a
//! list of unindented lines and parents indent the lines of their children,
//! so nesting is decided in exactly one place per parent.

mod format;

use std::fmt;

use crate::model::{
    Background, Block, Comment, Directory, DocString, Example, Feature, FeatureFile, NodeRef,
    Outline, Scenario, Step, Table, TableCell, TableRow, Tag, Test,
};

use format::{doc_string_lines, escape_cell, header, indent, table_lines};

trait Lines {
    fn lines(&self) -> Vec<String>;
}

fn step_lines(steps: &[Step]) -> Vec<String> {
    steps.iter().flat_map(Lines::lines).collect()
}

/// Append a body below a header, separating it from a description.
fn append_body(lines: &mut Vec<String>, description: &str, body: Vec<String>) {
    if body.is_empty() {
        return;
    }
    if !description.is_empty() {
        lines.push(String::new());
    }
    lines.extend(indent(body, 1));
}

impl Lines for Directory {
    fn lines(&self) -> Vec<String> {
        vec![
            self.path
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
        ]
    }
}

impl Lines for FeatureFile {
    fn lines(&self) -> Vec<String> {
        vec![
            self.path
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
        ]
    }
}

impl Lines for Feature {
    fn lines(&self) -> Vec<String> {
        let mut lines = header(
            &self.tags,
            &self.keyword,
            "Feature",
            &self.name,
            &self.description,
        );
        let children = self
            .background
            .iter()
            .map(Lines::lines)
            .chain(self.tests.iter().map(Lines::lines));
        for child in children {
            lines.push(String::new());
            lines.extend(indent(child, 1));
        }
        lines
    }
}

impl Lines for Background {
    fn lines(&self) -> Vec<String> {
        let mut lines = header(
            &[],
            &self.keyword,
            "Background",
            &self.name,
            &self.description,
        );
        append_body(&mut lines, &self.description, step_lines(&self.steps));
        lines
    }
}

impl Lines for Scenario {
    fn lines(&self) -> Vec<String> {
        let mut lines = header(
            &self.tags,
            &self.keyword,
            "Scenario",
            &self.name,
            &self.description,
        );
        append_body(&mut lines, &self.description, step_lines(&self.steps));
        lines
    }
}

impl Lines for Outline {
    fn lines(&self) -> Vec<String> {
        let mut lines = header(
            &self.tags,
            &self.keyword,
            "Scenario Outline",
            &self.name,
            &self.description,
        );
        append_body(&mut lines, &self.description, step_lines(&self.steps));
        for example in &self.examples {
            lines.push(String::new());
            lines.extend(example.lines());
        }
        lines
    }
}

impl Lines for Test {
    fn lines(&self) -> Vec<String> {
        match self {
            Self::Scenario(scenario) => scenario.lines(),
            Self::Outline(outline) => outline.lines(),
        }
    }
}

impl Lines for Example {
    fn lines(&self) -> Vec<String> {
        let mut lines = header(
            &self.tags,
            &self.keyword,
            "Examples",
            &self.name,
            &self.description,
        );
        append_body(&mut lines, &self.description, table_lines(&self.rows));
        lines
    }
}

impl Lines for Step {
    fn lines(&self) -> Vec<String> {
        let keyword = if self.keyword.is_empty() {
            "*"
        } else {
            self.keyword.as_str()
        };
        let mut lines = vec![format!("{keyword} {}", self.text).trim_end().to_string()];
        if let Some(block) = &self.block {
            lines.extend(indent(block.lines(), 1));
        }
        lines
    }
}

impl Lines for Block {
    fn lines(&self) -> Vec<String> {
        match self {
            Self::Table(table) => table.lines(),
            Self::DocString(doc) => doc.lines(),
        }
    }
}

impl Lines for Table {
    fn lines(&self) -> Vec<String> {
        table_lines(&self.rows)
    }
}

impl Lines for TableRow {
    fn lines(&self) -> Vec<String> {
        table_lines(std::slice::from_ref(self))
    }
}

impl Lines for TableCell {
    fn lines(&self) -> Vec<String> {
        vec![escape_cell(&self.value)]
    }
}

impl Lines for DocString {
    fn lines(&self) -> Vec<String> {
        doc_string_lines(self)
    }
}

impl Lines for Tag {
    fn lines(&self) -> Vec<String> {
        vec![self.name.clone()]
    }
}

impl Lines for Comment {
    fn lines(&self) -> Vec<String> {
        vec![self.text.clone()]
    }
}

impl Lines for NodeRef<'_> {
    fn lines(&self) -> Vec<String> {
        match *self {
            Self::Directory(node) => node.lines(),
            Self::FeatureFile(node) => node.lines(),
            Self::Feature(node) => node.lines(),
            Self::Background(node) => node.lines(),
            Self::Scenario(node) => node.lines(),
            Self::Outline(node) => node.lines(),
            Self::Example(node) => node.lines(),
            Self::Step(node) => node.lines(),
            Self::Table(node) => node.lines(),
            Self::Row(node) => node.lines(),
            Self::Cell(node) => node.lines(),
            Self::DocString(node) => node.lines(),
            Self::Tag(node) => node.lines(),
            Self::Comment(node) => node.lines(),
        }
    }
}

macro_rules! display_via_lines {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&Lines::lines(self).join("\n"))
                }
            }
        )+
    };
}

display_via_lines!(
    Directory,
    FeatureFile,
    Feature,
    Background,
    Scenario,
    Outline,
    Test,
    Example,
    Step,
    Block,
    Table,
    TableRow,
    TableCell,
    DocString,
    Tag,
    Comment,
    NodeRef<'_>,
);
