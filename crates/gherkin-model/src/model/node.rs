//! Node kinds, categories, and the borrowed node view.

use std::ptr;

use crate::record::RawElement;

use super::{
    Background, Block, Comment, Directory, DocString, Example, Feature, FeatureFile, Outline,
    Scenario, Step, Table, TableCell, TableRow, Tag, Test,
};

/// The concrete type of a node in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A directory of feature files.
    Directory,
    /// A single feature file.
    FeatureFile,
    /// A feature.
    Feature,
    /// A background.
    Background,
    /// A concrete scenario.
    Scenario,
    /// A scenario outline.
    Outline,
    /// An examples block of an outline.
    Example,
    /// A step.
    Step,
    /// A data table.
    Table,
    /// A row of a data table or examples block.
    Row,
    /// A table cell.
    Cell,
    /// A doc string.
    DocString,
    /// A tag.
    Tag,
    /// A comment.
    Comment,
}

/// Abstract groupings of node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Scenarios and outlines.
    Test,
    /// Anything that owns steps: backgrounds, scenarios, and outlines.
    StepContainer,
}

/// Which categories each kind belongs to. Kinds absent from the table belong
/// to none.
const CATEGORY_MEMBERSHIP: &[(NodeKind, &[Category])] = &[
    (NodeKind::Background, &[Category::StepContainer]),
    (
        NodeKind::Scenario,
        &[Category::Test, Category::StepContainer],
    ),
    (
        NodeKind::Outline,
        &[Category::Test, Category::StepContainer],
    ),
];

impl NodeKind {
    /// The categories this kind belongs to.
    #[must_use]
    pub fn categories(self) -> &'static [Category] {
        CATEGORY_MEMBERSHIP
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, categories)| *categories)
            .unwrap_or_default()
    }

    /// Whether this kind is a member of `category`.
    #[must_use]
    pub fn belongs_to(self, category: Category) -> bool {
        self.categories().contains(&category)
    }
}

/// A kind or category to search for.
///
/// Search helpers accept anything convertible into a query, so both
/// `NodeKind::Feature` and `Category::Test` can be passed directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindQuery {
    /// Match exactly one concrete kind.
    Kind(NodeKind),
    /// Match every kind in a category.
    Category(Category),
}

impl KindQuery {
    /// Whether `kind` satisfies this query.
    #[must_use]
    pub fn matches(self, kind: NodeKind) -> bool {
        match self {
            Self::Kind(wanted) => wanted == kind,
            Self::Category(category) => kind.belongs_to(category),
        }
    }
}

impl From<NodeKind> for KindQuery {
    fn from(kind: NodeKind) -> Self {
        Self::Kind(kind)
    }
}

impl From<Category> for KindQuery {
    fn from(category: Category) -> Self {
        Self::Category(category)
    }
}

/// A borrowed view of any node in the tree.
///
/// `NodeRef` is the uniform handle used for traversal, equality, and
/// rendering. It is `Copy`; cloning a view never clones the node.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    /// A directory.
    Directory(&'a Directory),
    /// A feature file.
    FeatureFile(&'a FeatureFile),
    /// A feature.
    Feature(&'a Feature),
    /// A background.
    Background(&'a Background),
    /// A scenario.
    Scenario(&'a Scenario),
    /// An outline.
    Outline(&'a Outline),
    /// An examples block.
    Example(&'a Example),
    /// A step.
    Step(&'a Step),
    /// A table.
    Table(&'a Table),
    /// A table row.
    Row(&'a TableRow),
    /// A table cell.
    Cell(&'a TableCell),
    /// A doc string.
    DocString(&'a DocString),
    /// A tag.
    Tag(&'a Tag),
    /// A comment.
    Comment(&'a Comment),
}

impl<'a> NodeRef<'a> {
    /// The concrete kind of the viewed node.
    #[must_use]
    pub fn kind(self) -> NodeKind {
        match self {
            Self::Directory(_) => NodeKind::Directory,
            Self::FeatureFile(_) => NodeKind::FeatureFile,
            Self::Feature(_) => NodeKind::Feature,
            Self::Background(_) => NodeKind::Background,
            Self::Scenario(_) => NodeKind::Scenario,
            Self::Outline(_) => NodeKind::Outline,
            Self::Example(_) => NodeKind::Example,
            Self::Step(_) => NodeKind::Step,
            Self::Table(_) => NodeKind::Table,
            Self::Row(_) => NodeKind::Row,
            Self::Cell(_) => NodeKind::Cell,
            Self::DocString(_) => NodeKind::DocString,
            Self::Tag(_) => NodeKind::Tag,
            Self::Comment(_) => NodeKind::Comment,
        }
    }

    /// Whether the viewed node satisfies `query`.
    #[must_use]
    pub fn is(self, query: impl Into<KindQuery>) -> bool {
        query.into().matches(self.kind())
    }

    /// Ordered child nodes.
    ///
    /// Features list their tags, then the background, then tests. Tagged
    /// tests and examples list their tags before their own content.
    #[must_use]
    pub fn children(self) -> Vec<Self> {
        match self {
            Self::Directory(directory) => directory.feature_files.iter().map(Self::from).collect(),
            Self::FeatureFile(file) => file.feature.iter().map(Self::from).collect(),
            Self::Feature(feature) => feature
                .tags
                .iter()
                .map(Self::from)
                .chain(feature.background.iter().map(Self::from))
                .chain(feature.tests.iter().map(Self::from))
                .collect(),
            Self::Background(background) => background.steps.iter().map(Self::from).collect(),
            Self::Scenario(scenario) => scenario
                .tags
                .iter()
                .map(Self::from)
                .chain(scenario.steps.iter().map(Self::from))
                .collect(),
            Self::Outline(outline) => outline
                .tags
                .iter()
                .map(Self::from)
                .chain(outline.steps.iter().map(Self::from))
                .chain(outline.examples.iter().map(Self::from))
                .collect(),
            Self::Example(example) => example
                .tags
                .iter()
                .map(Self::from)
                .chain(example.rows.iter().map(Self::from))
                .collect(),
            Self::Step(step) => step.block.iter().map(Self::from).collect(),
            Self::Table(table) => table.rows.iter().map(Self::from).collect(),
            Self::Row(row) => row.cells.iter().map(Self::from).collect(),
            Self::Cell(_) | Self::DocString(_) | Self::Tag(_) | Self::Comment(_) => Vec::new(),
        }
    }

    /// The 1-based source line of the viewed node, if it has one.
    #[must_use]
    pub fn source_line(self) -> Option<usize> {
        match self {
            Self::Directory(_) | Self::FeatureFile(_) => None,
            Self::Feature(node) => node.source_line,
            Self::Background(node) => node.source_line,
            Self::Scenario(node) => node.source_line,
            Self::Outline(node) => node.source_line,
            Self::Example(node) => node.source_line,
            Self::Step(node) => node.source_line,
            Self::Table(node) => node.source_line,
            Self::Row(node) => node.source_line,
            Self::Cell(node) => node.source_line,
            Self::DocString(node) => node.source_line,
            Self::Tag(node) => node.source_line,
            Self::Comment(node) => node.source_line,
        }
    }

    /// The raw parser element of the viewed node, if it has one.
    #[must_use]
    pub fn raw_element(self) -> Option<&'a RawElement> {
        match self {
            Self::Directory(_) => None,
            Self::FeatureFile(node) => node.raw_element(),
            Self::Feature(node) => node.raw_element(),
            Self::Background(node) => node.raw_element(),
            Self::Scenario(node) => node.raw_element(),
            Self::Outline(node) => node.raw_element(),
            Self::Example(node) => node.raw_element(),
            Self::Step(node) => node.raw_element(),
            Self::Table(node) => node.raw_element(),
            Self::Row(node) => node.raw_element(),
            Self::Cell(node) => node.raw_element(),
            Self::DocString(node) => node.raw_element(),
            Self::Tag(node) => node.raw_element(),
            Self::Comment(node) => node.raw_element(),
        }
    }

    /// Steps owned by the viewed node when it is a step container.
    #[must_use]
    pub fn steps(self) -> Option<&'a [Step]> {
        match self {
            Self::Background(node) => Some(&node.steps),
            Self::Scenario(node) => Some(&node.steps),
            Self::Outline(node) => Some(&node.steps),
            _ => None,
        }
    }

    /// Whether both views point at the very same node in memory.
    ///
    /// This is identity, not structural equality; see the `PartialEq` impl
    /// for the latter.
    #[must_use]
    pub fn same_node(self, other: NodeRef<'_>) -> bool {
        self.kind() == other.kind() && ptr::eq(self.address(), other.address())
    }

    fn address(self) -> *const () {
        match self {
            Self::Directory(node) => ptr::from_ref(node).cast(),
            Self::FeatureFile(node) => ptr::from_ref(node).cast(),
            Self::Feature(node) => ptr::from_ref(node).cast(),
            Self::Background(node) => ptr::from_ref(node).cast(),
            Self::Scenario(node) => ptr::from_ref(node).cast(),
            Self::Outline(node) => ptr::from_ref(node).cast(),
            Self::Example(node) => ptr::from_ref(node).cast(),
            Self::Step(node) => ptr::from_ref(node).cast(),
            Self::Table(node) => ptr::from_ref(node).cast(),
            Self::Row(node) => ptr::from_ref(node).cast(),
            Self::Cell(node) => ptr::from_ref(node).cast(),
            Self::DocString(node) => ptr::from_ref(node).cast(),
            Self::Tag(node) => ptr::from_ref(node).cast(),
            Self::Comment(node) => ptr::from_ref(node).cast(),
        }
    }
}

macro_rules! node_ref_from {
    ($($ty:ident => $variant:ident),+ $(,)?) => {
        $(
            impl<'a> From<&'a $ty> for NodeRef<'a> {
                fn from(node: &'a $ty) -> Self {
                    Self::$variant(node)
                }
            }
        )+
    };
}

node_ref_from!(
    Directory => Directory,
    FeatureFile => FeatureFile,
    Feature => Feature,
    Background => Background,
    Scenario => Scenario,
    Outline => Outline,
    Example => Example,
    Step => Step,
    Table => Table,
    TableRow => Row,
    TableCell => Cell,
    DocString => DocString,
    Tag => Tag,
    Comment => Comment,
);

impl<'a> From<&'a Test> for NodeRef<'a> {
    fn from(test: &'a Test) -> Self {
        match test {
            Test::Scenario(scenario) => Self::Scenario(scenario),
            Test::Outline(outline) => Self::Outline(outline),
        }
    }
}

impl<'a> From<&'a Block> for NodeRef<'a> {
    fn from(block: &'a Block) -> Self {
        match block {
            Block::Table(table) => Self::Table(table),
            Block::DocString(doc) => Self::DocString(doc),
        }
    }
}
