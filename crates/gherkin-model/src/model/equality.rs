//! Structural equality.
//!
//! Step containers compare by their steps alone and are comparable across
//! types, so a background can equal a scenario. Steps compare text and
//! block, ignoring the keyword. Leaves compare their primitive value. Every
//! other node compares its ordered children pairwise and is only ever equal
//! to a node of the same kind.

use super::{
    Background, Block, Comment, Directory, DocString, Example, Feature, FeatureFile, NodeRef,
    Outline, Scenario, Step, Table, TableCell, TableRow, Tag, Test,
};

fn structurally_equal(left: NodeRef<'_>, right: NodeRef<'_>) -> bool {
    if let (Some(left_steps), Some(right_steps)) = (left.steps(), right.steps()) {
        return left_steps.len() == right_steps.len()
            && left_steps
                .iter()
                .zip(right_steps)
                .all(|(a, b)| structurally_equal(a.into(), b.into()));
    }

    match (left, right) {
        (NodeRef::Cell(a), NodeRef::Cell(b)) => a.value == b.value,
        (NodeRef::DocString(a), NodeRef::DocString(b)) => a.content == b.content,
        (NodeRef::Tag(a), NodeRef::Tag(b)) => a.name == b.name,
        (NodeRef::Comment(a), NodeRef::Comment(b)) => a.text == b.text,
        (NodeRef::Step(a), NodeRef::Step(b)) => a.text == b.text && children_equal(left, right),
        _ => left.kind() == right.kind() && children_equal(left, right),
    }
}

fn children_equal(left: NodeRef<'_>, right: NodeRef<'_>) -> bool {
    let left_children = left.children();
    let right_children = right.children();
    left_children.len() == right_children.len()
        && left_children
            .into_iter()
            .zip(right_children)
            .all(|(a, b)| structurally_equal(a, b))
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        structurally_equal(*self, *other)
    }
}

macro_rules! structural_eq {
    ($($left:ty => $right:ty),+ $(,)?) => {
        $(
            impl PartialEq<$right> for $left {
                fn eq(&self, other: &$right) -> bool {
                    structurally_equal(NodeRef::from(self), NodeRef::from(other))
                }
            }
        )+
    };
}

structural_eq!(
    Directory => Directory,
    FeatureFile => FeatureFile,
    Feature => Feature,
    Test => Test,
    Example => Example,
    Step => Step,
    Block => Block,
    Table => Table,
    TableRow => TableRow,
    TableCell => TableCell,
    DocString => DocString,
    Tag => Tag,
    Comment => Comment,
    Background => Background,
    Scenario => Scenario,
    Outline => Outline,
    Background => Scenario,
    Background => Outline,
    Scenario => Background,
    Scenario => Outline,
    Outline => Background,
    Outline => Scenario,
);

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(texts: &[&str]) -> Vec<Step> {
        texts.iter().map(|text| Step::new("Given", *text)).collect()
    }

    #[test]
    fn step_containers_compare_across_types() {
        let background = Background {
            name: "setup".into(),
            steps: steps(&["a", "b"]),
            ..Background::default()
        };
        let scenario = Scenario {
            name: "different name".into(),
            steps: steps(&["a", "b"]),
            ..Scenario::default()
        };
        let outline = Outline {
            steps: steps(&["a"]),
            ..Outline::default()
        };
        assert!(background == scenario);
        assert!(scenario == background);
        assert!(background != outline);
        assert!(outline != scenario);
    }

    #[test]
    fn step_equality_ignores_keywords() {
        assert_eq!(Step::new("Given", "x"), Step::new("Then", "x"));
        assert_ne!(Step::new("Given", "x"), Step::new("Given", "y"));
    }

    #[test]
    fn steps_compare_their_blocks() {
        let plain = Step::new("Given", "x");
        let with_doc = Step::new("Given", "x").with_block(DocString::new("body"));
        let with_other = Step::new("Given", "x").with_block(DocString::new("other"));
        let with_typed =
            Step::new("Given", "x").with_block(DocString::new("body").with_content_type("json"));
        assert_ne!(plain, with_doc);
        assert_ne!(with_doc, with_other);
        assert_eq!(with_doc, with_typed);
    }

    #[test]
    fn tables_compare_cell_values() {
        let table = Table::from_rows([["a", "b"], ["1", "2"]]);
        assert_eq!(table, Table::from_rows([["a", "b"], ["1", "2"]]));
        assert_ne!(table, Table::from_rows([["a", "b"], ["1", "3"]]));
        assert_ne!(table, Table::from_rows([["a", "b"]]));
    }

    #[test]
    fn different_kinds_are_never_equal() {
        let tag = Tag::new("@x");
        let comment = Comment::new("@x");
        assert!(NodeRef::from(&tag) != NodeRef::from(&comment));
    }

    #[test]
    fn leaves_ignore_source_lines() {
        let mut located = Tag::new("@x");
        located.source_line = Some(4);
        assert_eq!(located, Tag::new("@x"));
    }
}
