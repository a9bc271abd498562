//! Backgrounds, scenarios, and outlines.

use crate::config::Dialect;
use crate::error::Result;
use crate::parsing::{self, Snippet};
use crate::record::RawElement;

use super::{Example, NodeKind, Step, Tag};

/// Steps run before every test of a feature.
#[derive(Debug, Clone, Default)]
pub struct Background {
    /// Localised keyword; rendered as `Background` when empty.
    pub keyword: String,
    /// Background name.
    pub name: String,
    /// Description text below the keyword line.
    pub description: String,
    /// Steps in source order.
    pub steps: Vec<Step>,
    /// 1-based line of the keyword.
    pub source_line: Option<usize>,
    pub(crate) raw: Option<RawElement>,
}

impl Background {
    /// Create an empty background with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Replace the background's steps.
    #[must_use]
    pub fn with_steps(mut self, steps: impl IntoIterator<Item = Step>) -> Self {
        self.steps = steps.into_iter().collect();
        self
    }

    /// Parse a stand-alone background.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ModelError::Grammar`] naming
    /// `stand_alone_background.feature` if the text is not a background.
    pub fn from_text(text: &str) -> Result<Self> {
        parsing::parse_snippet(Snippet::Background, text, &Dialect::default())?
            .into_background()
            .map(Self::from)
    }
}

/// A concrete scenario.
#[derive(Debug, Clone, Default)]
pub struct Scenario {
    /// Localised keyword; rendered as `Scenario` when empty.
    pub keyword: String,
    /// Scenario name.
    pub name: String,
    /// Description text below the keyword line.
    pub description: String,
    /// Tags applied to the scenario.
    pub tags: Vec<Tag>,
    /// Steps in source order.
    pub steps: Vec<Step>,
    /// 1-based line of the keyword.
    pub source_line: Option<usize>,
    pub(crate) raw: Option<RawElement>,
}

impl Scenario {
    /// Create a scenario with the given name and no steps.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Replace the scenario's steps.
    #[must_use]
    pub fn with_steps(mut self, steps: impl IntoIterator<Item = Step>) -> Self {
        self.steps = steps.into_iter().collect();
        self
    }

    /// Replace the scenario's tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Parse a stand-alone scenario.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ModelError::Grammar`] naming
    /// `stand_alone_scenario.feature` if the text is not a scenario.
    pub fn from_text(text: &str) -> Result<Self> {
        parsing::parse_snippet(Snippet::Scenario, text, &Dialect::default())?
            .into_scenario()
            .map(Self::from)
    }
}

/// A scenario outline: templated steps plus example tables.
#[derive(Debug, Clone, Default)]
pub struct Outline {
    /// Localised keyword; rendered as `Scenario Outline` when empty.
    pub keyword: String,
    /// Outline name.
    pub name: String,
    /// Description text below the keyword line.
    pub description: String,
    /// Tags applied to the outline.
    pub tags: Vec<Tag>,
    /// Templated steps in source order.
    pub steps: Vec<Step>,
    /// Example blocks in source order.
    pub examples: Vec<Example>,
    /// 1-based line of the keyword.
    pub source_line: Option<usize>,
    pub(crate) raw: Option<RawElement>,
}

impl Outline {
    /// Create an outline with the given name, no steps and no examples.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Replace the templated steps.
    #[must_use]
    pub fn with_steps(mut self, steps: impl IntoIterator<Item = Step>) -> Self {
        self.steps = steps.into_iter().collect();
        self
    }

    /// Append an example block.
    #[must_use]
    pub fn with_example(mut self, example: Example) -> Self {
        self.examples.push(example);
        self
    }

    /// Parse a stand-alone outline.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ModelError::Grammar`] naming
    /// `stand_alone_outline.feature` if the text is not an outline.
    pub fn from_text(text: &str) -> Result<Self> {
        parsing::parse_snippet(Snippet::Outline, text, &Dialect::default())?
            .into_outline()
            .map(Self::from)
    }
}

/// A test case of a feature.
#[derive(Debug, Clone)]
pub enum Test {
    /// A concrete scenario.
    Scenario(Scenario),
    /// A templated outline.
    Outline(Outline),
}

impl Test {
    /// The concrete kind of the test.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Scenario(_) => NodeKind::Scenario,
            Self::Outline(_) => NodeKind::Outline,
        }
    }

    /// Test name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Scenario(scenario) => &scenario.name,
            Self::Outline(outline) => &outline.name,
        }
    }

    /// Tags applied to the test.
    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        match self {
            Self::Scenario(scenario) => &scenario.tags,
            Self::Outline(outline) => &outline.tags,
        }
    }

    /// Steps of the test.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        match self {
            Self::Scenario(scenario) => &scenario.steps,
            Self::Outline(outline) => &outline.steps,
        }
    }

    /// The scenario, if this test is one.
    #[must_use]
    pub fn as_scenario(&self) -> Option<&Scenario> {
        match self {
            Self::Scenario(scenario) => Some(scenario),
            Self::Outline(_) => None,
        }
    }

    /// The outline, if this test is one.
    #[must_use]
    pub fn as_outline(&self) -> Option<&Outline> {
        match self {
            Self::Outline(outline) => Some(outline),
            Self::Scenario(_) => None,
        }
    }

    /// Mutable access to the outline, if this test is one.
    pub fn as_outline_mut(&mut self) -> Option<&mut Outline> {
        match self {
            Self::Outline(outline) => Some(outline),
            Self::Scenario(_) => None,
        }
    }
}

impl From<Scenario> for Test {
    fn from(scenario: Scenario) -> Self {
        Self::Scenario(scenario)
    }
}

impl From<Outline> for Test {
    fn from(outline: Outline) -> Self {
        Self::Outline(outline)
    }
}
