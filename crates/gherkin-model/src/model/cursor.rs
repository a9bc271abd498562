//! Upward navigation over a borrowed tree.

use std::rc::Rc;

use super::{KindQuery, NodeKind, NodeRef};

/// A position in the tree together with the path that led to it.
///
/// Cursors are created at a root with [`Cursor::root`] and moved downward
/// with [`Cursor::children`] or [`Cursor::descendants`]. Each cursor keeps a
/// shared link to its parent cursor, which gives constant-time access to the
/// parent and a walk over every ancestor.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    node: NodeRef<'a>,
    parent: Option<Rc<Self>>,
}

impl<'a> Cursor<'a> {
    /// Start at `node` with no parent.
    pub fn root(node: impl Into<NodeRef<'a>>) -> Self {
        Self {
            node: node.into(),
            parent: None,
        }
    }

    /// The node under the cursor.
    #[must_use]
    pub fn node(&self) -> NodeRef<'a> {
        self.node
    }

    /// Kind of the node under the cursor.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.node.kind()
    }

    /// The parent cursor; `None` at the root.
    #[must_use]
    pub fn parent(&self) -> Option<&Self> {
        self.parent.as_deref()
    }

    /// Cursors for each child of the current node.
    #[must_use]
    pub fn children(&self) -> Vec<Self> {
        let parent = Rc::new(self.clone());
        self.node
            .children()
            .into_iter()
            .map(|node| Self {
                node,
                parent: Some(Rc::clone(&parent)),
            })
            .collect()
    }

    /// Every node below the current one, depth first in child order.
    #[must_use]
    pub fn descendants(&self) -> Vec<Self> {
        let mut found = Vec::new();
        let mut pending = self.children();
        pending.reverse();
        while let Some(cursor) = pending.pop() {
            let mut children = cursor.children();
            children.reverse();
            found.push(cursor);
            pending.extend(children);
        }
        found
    }

    /// The first descendant matching `query`.
    #[must_use]
    pub fn find(&self, query: impl Into<KindQuery>) -> Option<Self> {
        let query = query.into();
        self.descendants()
            .into_iter()
            .find(|cursor| query.matches(cursor.kind()))
    }

    /// Ancestors from the parent up to the root.
    #[must_use]
    pub fn ancestors(&self) -> Ancestors<'_, 'a> {
        Ancestors {
            next: self.parent(),
        }
    }

    /// The nearest ancestor matching `query`, or `None` when no ancestor
    /// matches before the root is passed.
    ///
    /// The current node itself is never a candidate.
    #[must_use]
    pub fn get_ancestor(&self, query: impl Into<KindQuery>) -> Option<NodeRef<'a>> {
        let query = query.into();
        self.ancestors()
            .find(|ancestor| query.matches(ancestor.kind()))
            .map(Cursor::node)
    }

    /// Number of ancestors above the current node.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }
}

/// Iterator over a cursor's ancestors, nearest first.
#[derive(Debug, Clone)]
pub struct Ancestors<'c, 'a> {
    next: Option<&'c Cursor<'a>>,
}

impl<'c, 'a> Iterator for Ancestors<'c, 'a> {
    type Item = &'c Cursor<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests fail loudly on missing nodes")]
mod tests {
    use super::*;
    use crate::model::{Category, Example, Feature, FeatureFile, Outline, Step, TableRow, Test};

    fn file() -> FeatureFile {
        let outline = Outline {
            name: "outline".into(),
            steps: vec![Step::new("Given", "<x>")],
            examples: vec![Example {
                rows: vec![TableRow::new(["x"]), TableRow::new(["1"])],
                ..Example::default()
            }],
            ..Outline::default()
        };
        FeatureFile {
            feature: Some(Feature {
                name: "nav".into(),
                tests: vec![Test::Outline(outline)],
                ..Feature::default()
            }),
            ..FeatureFile::default()
        }
    }

    #[test]
    fn ancestors_are_found_by_kind_and_category() {
        let file = file();
        let root = Cursor::root(&file);
        let cell = root.find(NodeKind::Cell).expect("cell present");

        let example = cell.get_ancestor(NodeKind::Example).expect("example ancestor");
        assert_eq!(example.kind(), NodeKind::Example);

        let test = cell.get_ancestor(Category::Test).expect("test ancestor");
        assert_eq!(test.kind(), NodeKind::Outline);

        let feature_file = cell.get_ancestor(NodeKind::FeatureFile).expect("file ancestor");
        assert!(feature_file.same_node(NodeRef::from(&file)));
    }

    #[test]
    fn missing_ancestor_is_none() {
        let file = file();
        let root = Cursor::root(&file);
        let step = root.find(NodeKind::Step).expect("step present");
        assert!(step.get_ancestor(NodeKind::Directory).is_none());
        assert!(step.get_ancestor(NodeKind::Step).is_none());
        assert!(root.get_ancestor(NodeKind::Feature).is_none());
    }

    #[test]
    fn descendants_are_depth_first() {
        let file = file();
        let kinds: Vec<NodeKind> = Cursor::root(&file)
            .descendants()
            .iter()
            .map(Cursor::kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Feature,
                NodeKind::Outline,
                NodeKind::Step,
                NodeKind::Example,
                NodeKind::Row,
                NodeKind::Cell,
                NodeKind::Row,
                NodeKind::Cell,
            ]
        );
    }

    #[test]
    fn depth_counts_the_path_from_the_root() {
        let file = file();
        let root = Cursor::root(&file);
        assert_eq!(root.depth(), 0);
        let cell = root.find(NodeKind::Cell).expect("cell present");
        assert_eq!(cell.depth(), 5);
        assert!(cell.parent().is_some_and(|row| row.kind() == NodeKind::Row));
    }
}
