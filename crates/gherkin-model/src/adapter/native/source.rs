//! Line lookup over the normalised feature text.

/// Feature text indexed by line.
///
/// Lines are numbered from 1. Spans reported by the parser are byte offsets
/// into the same text, so [`FeatureSource::line_of`] turns a span start into a
/// line number.
#[derive(Debug, Clone)]
pub(super) struct FeatureSource<'a> {
    text: &'a str,
    starts: Vec<usize>,
}

impl<'a> FeatureSource<'a> {
    pub(super) fn new(text: &'a str) -> Self {
        let starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(idx, _)| idx + 1))
            .filter(|start| *start < text.len())
            .collect();
        Self { text, starts }
    }

    /// The 1-based line containing byte `offset`.
    pub(super) fn line_of(&self, offset: usize) -> usize {
        self.starts.partition_point(|start| *start <= offset).max(1)
    }

    /// Text of line `number` without its line terminator.
    pub(super) fn line(&self, number: usize) -> Option<&'a str> {
        let start = *self.starts.get(number.checked_sub(1)?)?;
        let end = self
            .starts
            .get(number)
            .map_or(self.text.len(), |next| next.saturating_sub(1));
        let line = self.text.get(start..end)?;
        let line = line.strip_suffix('\n').unwrap_or(line);
        Some(line.strip_suffix('\r').unwrap_or(line))
    }

    /// Number of lines in the text.
    pub(super) fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Lines from `first` onward, paired with their numbers.
    pub(super) fn lines_from(&self, first: usize) -> impl Iterator<Item = (usize, &'a str)> + '_ {
        (first.max(1)..=self.line_count())
            .filter_map(|number| self.line(number).map(|line| (number, line)))
    }

    /// Skip tag, comment, and blank lines from `line` to reach the keyword
    /// line of an element whose span may start at its tags.
    pub(super) fn keyword_line(&self, line: usize) -> usize {
        self.lines_from(line)
            .find(|(_, text)| {
                let trimmed = text.trim_start();
                !(trimmed.is_empty() || trimmed.starts_with('@') || trimmed.starts_with('#'))
            })
            .map_or(line, |(number, _)| number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_map_to_one_based_lines() {
        let source = FeatureSource::new("Feature: a\n  Scenario: b\n    Given c\n");
        assert_eq!(source.line_count(), 3);
        assert_eq!(source.line_of(0), 1);
        assert_eq!(source.line_of(10), 1);
        assert_eq!(source.line_of(11), 2);
        assert_eq!(source.line(2), Some("  Scenario: b"));
        assert_eq!(source.line(3), Some("    Given c"));
        assert_eq!(source.line(4), None);
    }

    #[test]
    fn carriage_returns_are_dropped() {
        let source = FeatureSource::new("a\r\nb\r\n");
        assert_eq!(source.line(1), Some("a"));
        assert_eq!(source.line(2), Some("b"));
    }

    #[test]
    fn keyword_line_skips_tags_and_comments() {
        let source = FeatureSource::new("@a @b\n# note\n\nScenario: x\n");
        assert_eq!(source.keyword_line(1), 4);
        assert_eq!(source.keyword_line(4), 4);
    }
}
