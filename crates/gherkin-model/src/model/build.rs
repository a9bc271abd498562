//! Construction of model nodes from canonical records.

use std::path::PathBuf;

use crate::record::{
    BackgroundRecord, BlockRecord, CellRecord, CommentRecord, DocStringRecord, ExampleRecord,
    FeatureFileRecord, FeatureRecord, OutlineRecord, RowRecord, ScenarioRecord, StepRecord,
    TableRecord, TagRecord, TestRecord,
};

use super::{
    Background, Block, Comment, DocString, Example, Feature, FeatureFile, Outline, Scenario, Step,
    Table, TableCell, TableRow, Tag, Test,
};

fn convert<R, T: From<R>>(records: Vec<R>) -> Vec<T> {
    records.into_iter().map(T::from).collect()
}

impl From<FeatureFileRecord> for FeatureFile {
    fn from(record: FeatureFileRecord) -> Self {
        let path = (!record.path.is_empty()).then(|| PathBuf::from(record.path));
        Self {
            path,
            feature: record.feature.map(Feature::from),
            comments: convert(record.comments),
            raw: record.raw,
        }
    }
}

impl From<FeatureRecord> for Feature {
    fn from(record: FeatureRecord) -> Self {
        Self {
            keyword: record.keyword,
            name: record.name,
            description: record.description,
            tags: convert(record.tags),
            background: record.background.map(Background::from),
            tests: convert(record.tests),
            source_line: record.source_line,
            raw: record.raw,
        }
    }
}

impl From<BackgroundRecord> for Background {
    fn from(record: BackgroundRecord) -> Self {
        Self {
            keyword: record.keyword,
            name: record.name,
            description: record.description,
            steps: convert(record.steps),
            source_line: record.source_line,
            raw: record.raw,
        }
    }
}

impl From<TestRecord> for Test {
    fn from(record: TestRecord) -> Self {
        match record {
            TestRecord::Scenario(scenario) => Self::Scenario(scenario.into()),
            TestRecord::Outline(outline) => Self::Outline(outline.into()),
        }
    }
}

impl From<ScenarioRecord> for Scenario {
    fn from(record: ScenarioRecord) -> Self {
        Self {
            keyword: record.keyword,
            name: record.name,
            description: record.description,
            tags: convert(record.tags),
            steps: convert(record.steps),
            source_line: record.source_line,
            raw: record.raw,
        }
    }
}

impl From<OutlineRecord> for Outline {
    fn from(record: OutlineRecord) -> Self {
        Self {
            keyword: record.keyword,
            name: record.name,
            description: record.description,
            tags: convert(record.tags),
            steps: convert(record.steps),
            examples: convert(record.examples),
            source_line: record.source_line,
            raw: record.raw,
        }
    }
}

impl From<ExampleRecord> for Example {
    fn from(record: ExampleRecord) -> Self {
        Self {
            keyword: record.keyword,
            name: record.name,
            description: record.description,
            tags: convert(record.tags),
            rows: convert(record.rows),
            source_line: record.source_line,
            raw: record.raw,
        }
    }
}

impl From<StepRecord> for Step {
    fn from(record: StepRecord) -> Self {
        Self {
            keyword: record.keyword,
            text: record.text,
            block: record.block.map(Block::from),
            source_line: record.source_line,
            raw: record.raw,
        }
    }
}

impl From<BlockRecord> for Block {
    fn from(record: BlockRecord) -> Self {
        match record {
            BlockRecord::Table(table) => Self::Table(table.into()),
            BlockRecord::DocString(doc) => Self::DocString(doc.into()),
        }
    }
}

impl From<TableRecord> for Table {
    fn from(record: TableRecord) -> Self {
        Self {
            rows: convert(record.rows),
            source_line: record.source_line,
            raw: record.raw,
        }
    }
}

impl From<RowRecord> for TableRow {
    fn from(record: RowRecord) -> Self {
        Self {
            cells: convert(record.cells),
            source_line: record.source_line,
            raw: record.raw,
        }
    }
}

impl From<CellRecord> for TableCell {
    fn from(record: CellRecord) -> Self {
        Self {
            value: record.value,
            source_line: record.source_line,
            raw: record.raw,
        }
    }
}

impl From<DocStringRecord> for DocString {
    fn from(record: DocStringRecord) -> Self {
        Self {
            content_type: record.content_type,
            content: record.content,
            source_line: record.source_line,
            raw: record.raw,
        }
    }
}

impl From<TagRecord> for Tag {
    fn from(record: TagRecord) -> Self {
        Self {
            name: record.name,
            source_line: record.source_line,
            raw: record.raw,
        }
    }
}

impl From<CommentRecord> for Comment {
    fn from(record: CommentRecord) -> Self {
        Self {
            text: record.text,
            source_line: record.source_line,
            raw: record.raw,
        }
    }
}
