use crate::bidi_class::BidiFlags;
use crate::direction::Direction;
use crate::level::Level;
use crate::BidiContext;
use std::borrow::Cow;
use std::ops::Range;

/// A `BidiRun` represents a run which is a contiguous sequence of codepoints
/// from the original text that have been resolved to the same embedding
/// level, and that thus all have the same direction.
///
/// The `range` field encapsulates the starting and ending codepoint indices
/// into the original text.  A run never spans more than one paragraph.
///
/// The explicit formatting characters and boundary neutrals that X9 would
/// remove are kept in the text and carry the level of their neighbors, so
/// they can appear in the middle of a run.  They are listed in
/// `removed_by_x9`; use the `indices` method to skip over them if your
/// shaper doesn't want them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidiRun {
    /// The direction for this run.  Derived from the level.
    pub direction: Direction,

    /// Embedding level of this run.
    pub level: Level,

    /// The starting and ending codepoint indices for this run
    pub range: Range<usize>,

    /// the list of control codepoint indices that would be removed from
    /// the text by the X9 portion of the bidi algorithm.
    // Expected to have low cardinality and be generally empty, so we're
    // using a simple vec for this.
    pub removed_by_x9: Vec<usize>,
}

impl BidiRun {
    pub fn indices<'a>(&'a self) -> impl Iterator<Item = usize> + 'a {
        self.range
            .clone()
            .filter(move |idx| !self.removed_by_x9.contains(idx))
    }
}

struct RunIter<'a> {
    context: &'a BidiContext,
    /// Position relative to the start of `levels`
    pos: usize,
    levels: Cow<'a, [Level]>,
    line_range: Range<usize>,
}

impl<'a> Iterator for RunIter<'a> {
    type Item = BidiRun;

    fn next(&mut self) -> Option<BidiRun> {
        if self.pos >= self.levels.len() {
            return None;
        }

        let offset = self.line_range.start;
        let start = self.pos;
        let level = self.levels[start];
        let paragraph_end = self
            .context
            .paragraph_end(offset + start)
            .unwrap_or(self.line_range.end)
            .min(self.line_range.end);

        let mut end = start + 1;
        while offset + end < paragraph_end && self.levels[end] == level {
            end += 1;
        }
        self.pos = end;

        let range = offset + start..offset + end;
        let removed_by_x9 = range
            .clone()
            .filter(|&idx| self.context.orig_char_types[idx].is_removed_by_x9())
            .collect();

        Some(BidiRun {
            direction: level.direction(),
            level,
            range,
            removed_by_x9,
        })
    }
}

impl BidiContext {
    /// Produces a sequence of `BidiRun` structs that represent runs of
    /// text and their direction (and level) across the entire text.
    pub fn runs<'a>(&'a self) -> impl Iterator<Item = BidiRun> + 'a {
        RunIter {
            context: self,
            pos: 0,
            levels: Cow::Borrowed(&self.levels),
            line_range: 0..self.levels.len(),
        }
    }

    /// Given a line_range (a subslice of the resolved text that represents
    /// a single wrapped line), this method resets whitespace levels for the line
    /// boundaries, and then returns the set of runs for that line.
    pub fn line_runs<'a>(&'a self, line_range: Range<usize>) -> impl Iterator<Item = BidiRun> + 'a {
        let levels = self.line_levels(line_range);
        let start = levels.range.start;
        RunIter {
            context: self,
            pos: 0,
            line_range: start..start + levels.levels.len(),
            levels: levels.levels.into(),
        }
    }

    /// Returns the levels for a single wrapped line, with the trailing
    /// whitespace portion of rule L1 applied to the end of the line.
    ///
    /// The range is clamped to the resolved text.
    pub fn line_levels(&self, line_range: Range<usize>) -> LineLevels {
        let end = line_range.end.min(self.levels.len());
        let start = line_range.start.min(end);
        let mut levels = self.levels[start..end].to_vec();

        if let Some(last) = end.checked_sub(1).filter(|&last| last >= start) {
            let (paragraph_start, base_level) = self
                .paragraphs
                .iter()
                .find(|p| p.range.contains(&last))
                .map(|p| (p.range.start, p.base_level))
                .unwrap_or((start, self.base_level()));

            for idx in (start.max(paragraph_start)..=last).rev() {
                if !self.orig_char_types[idx].in_group(BidiFlags::TRAILING_WHITESPACE) {
                    break;
                }
                levels[idx - start] = base_level;
            }
        }

        LineLevels {
            range: start..end,
            levels,
        }
    }

    fn paragraph_end(&self, idx: usize) -> Option<usize> {
        self.paragraphs
            .iter()
            .find(|p| p.range.contains(&idx))
            .map(|p| p.range.end)
    }
}

/// The levels of one line, as returned by `BidiContext::line_levels`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineLevels {
    /// The portion of the text covered by `levels`
    pub range: Range<usize>,
    pub levels: Vec<Level>,
}

#[cfg(test)]
mod tests {
    use crate::*;
    use k9::assert_equal as assert_eq;

    #[test]
    fn runs() {
        let text = vec!['\u{5d0}', '\u{5d1}', '\u{5d2}', 'a', 'b', 'c'];

        let mut context = BidiContext::new();
        context.resolve(&text, ParagraphDirectionHint::AutoLeftToRight);
        k9::snapshot!(
            context.runs().collect::<Vec<_>>(),
            "
[
    BidiRun {
        direction: RightToLeft,
        level: Level(
            1,
        ),
        range: 0..3,
        removed_by_x9: [],
    },
    BidiRun {
        direction: LeftToRight,
        level: Level(
            2,
        ),
        range: 3..6,
        removed_by_x9: [],
    },
]
"
        );
    }

    #[test]
    fn runs_stop_at_paragraphs() {
        let text: Vec<char> = "ab\ncd".chars().collect();
        let mut context = BidiContext::new();
        context.resolve(&text, ParagraphDirectionHint::LeftToRight);
        let ranges: Vec<_> = context.runs().map(|run| run.range).collect();
        assert_eq!(ranges, vec![0..3, 3..5]);
    }

    #[test]
    fn removed_characters_are_listed() {
        // a RLE b PDF c
        let text = vec!['a', '\u{202b}', 'b', '\u{202c}', 'c'];
        let mut context = BidiContext::new();
        context.resolve(&text, ParagraphDirectionHint::LeftToRight);
        let runs: Vec<_> = context.runs().collect();
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].range, 0..2);
        assert_eq!(runs[0].removed_by_x9, vec![1]);
        assert_eq!(runs[0].indices().collect::<Vec<_>>(), vec![0]);
        assert_eq!(runs[1].level, Level(2));
        assert_eq!(runs[1].range, 2..4);
        assert_eq!(runs[1].indices().collect::<Vec<_>>(), vec![2]);
        assert_eq!(runs[2].range, 4..5);
    }

    #[test]
    fn line_end_whitespace() {
        // Wrapped after the space: "אב |גד"
        let text = vec!['\u{5d0}', '\u{5d1}', ' ', '\u{5d2}', '\u{5d3}'];
        let mut context = BidiContext::new();
        context.resolve(&text, ParagraphDirectionHint::LeftToRight);
        assert_eq!(
            context.levels().to_vec(),
            [1, 1, 1, 1, 1].map(Level).to_vec()
        );

        let line = context.line_levels(0..3);
        assert_eq!(line.range, 0..3);
        assert_eq!(line.levels, [1, 1, 0].map(Level).to_vec());

        let runs: Vec<_> = context.line_runs(0..3).map(|run| run.range).collect();
        assert_eq!(runs, vec![0..2, 2..3]);

        let runs: Vec<_> = context.line_runs(3..5).map(|run| run.range).collect();
        assert_eq!(runs, vec![3..5]);
    }

    #[test]
    fn line_range_is_clamped() {
        let text = vec!['a', 'b'];
        let mut context = BidiContext::new();
        context.resolve(&text, ParagraphDirectionHint::LeftToRight);
        assert_eq!(context.line_levels(1..10).range, 1..2);
        assert_eq!(context.line_runs(5..10).count(), 0);
    }
}
