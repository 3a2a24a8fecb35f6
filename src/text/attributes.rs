//! Character attribute runs

use crate::layout::font::FontId;
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use std::ops::Range;

/// Resolved attributes for a run of characters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextAttributes {
    pub font: FontId,
    /// Extra leading added below every line, in points
    pub line_spacing: f32,
}

impl Default for TextAttributes {
    fn default() -> Self {
        Self {
            font: FontId(0),
            line_spacing: 0.0,
        }
    }
}

impl TextAttributes {
    pub fn with_font(font: FontId) -> Self {
        Self {
            font,
            ..Self::default()
        }
    }
}

/// A character range sharing one set of attributes
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeRun {
    pub range: Range<usize>,
    pub attributes: TextAttributes,
}

/// Runs stored inline before the list spills to the heap
const INLINE_RUNS: usize = 4;

type RunList = SmallVec<[AttributeRun; INLINE_RUNS]>;

/// Ordered, gap-free runs covering the whole text.
///
/// Empty text keeps a single empty run so the typing attributes survive.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AttributeRuns {
    runs: RunList,
}

impl AttributeRuns {
    pub fn new(len: usize, attributes: TextAttributes) -> Self {
        Self {
            runs: smallvec![AttributeRun {
                range: 0..len,
                attributes,
            }],
        }
    }

    pub fn as_slice(&self) -> &[AttributeRun] {
        &self.runs
    }

    /// Index of the run owning `offset`; the end of the text belongs to the last run
    fn run_index(&self, offset: usize) -> Option<usize> {
        let last = self.runs.last()?;
        if offset >= last.range.end {
            return (offset == last.range.end).then_some(self.runs.len() - 1);
        }
        Some(self.runs.partition_point(|run| run.range.end <= offset))
    }

    pub fn attributes_at(&self, offset: usize) -> Option<&TextAttributes> {
        self.run_index(offset).map(|idx| &self.runs[idx].attributes)
    }

    /// Runs overlapping `range`, clipped to it
    pub fn runs_in(&self, range: Range<usize>) -> impl Iterator<Item = AttributeRun> + '_ {
        let (start, end) = (range.start, range.end);
        let first = self.runs.partition_point(|run| run.range.end <= start);
        self.runs[first..]
            .iter()
            .take_while(move |run| run.range.start < end)
            .map(move |run| AttributeRun {
                range: run.range.start.max(start)..run.range.end.min(end),
                attributes: run.attributes,
            })
    }

    /// Grow the run before `offset` (or the first run) by `count` characters
    pub fn insert(&mut self, offset: usize, count: usize) {
        if count == 0 {
            return;
        }

        let owner = if offset == 0 {
            0
        } else {
            self.runs
                .partition_point(|run| run.range.end < offset)
                .min(self.runs.len() - 1)
        };

        self.runs[owner].range.end += count;
        for run in &mut self.runs[owner + 1..] {
            run.range.start += count;
            run.range.end += count;
        }
    }

    pub fn delete(&mut self, deleted: Range<usize>) {
        if deleted.is_empty() {
            return;
        }

        let removed = deleted.len();
        let shift = |pos: usize| {
            if pos <= deleted.start {
                pos
            } else if pos >= deleted.end {
                pos - removed
            } else {
                deleted.start
            }
        };

        let fallback = self.runs[0].attributes;
        for run in &mut self.runs {
            run.range = shift(run.range.start)..shift(run.range.end);
        }
        self.runs.retain(|run| !run.range.is_empty());

        if self.runs.is_empty() {
            self.runs.push(AttributeRun {
                range: 0..0,
                attributes: fallback,
            });
        }
        self.coalesce();
    }

    pub fn set(&mut self, range: Range<usize>, attributes: TextAttributes) {
        if range.is_empty() {
            return;
        }

        let mut runs = RunList::with_capacity(self.runs.len() + 2);
        for run in self.runs.drain(..) {
            // Keep the parts of the run outside `range`
            let pieces = [
                run.range.start..run.range.end.min(range.start),
                run.range.start.max(range.end)..run.range.end,
            ];
            runs.extend(
                pieces
                    .into_iter()
                    .filter(|piece| !piece.is_empty())
                    .map(|piece| AttributeRun {
                        range: piece,
                        attributes: run.attributes,
                    }),
            );
        }

        runs.push(AttributeRun { range, attributes });
        runs.sort_by_key(|run| run.range.start);
        self.runs = runs;
        self.coalesce();
    }

    /// Merge neighbours with equal attributes
    fn coalesce(&mut self) {
        let mut merged = RunList::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            match merged.last_mut() {
                Some(prev) if prev.attributes == run.attributes => prev.range.end = run.range.end,
                _ => merged.push(run),
            }
        }
        self.runs = merged;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold() -> TextAttributes {
        TextAttributes::with_font(FontId(1))
    }

    fn ranges(runs: &AttributeRuns) -> Vec<Range<usize>> {
        runs.as_slice().iter().map(|r| r.range.clone()).collect()
    }

    #[test]
    fn test_set_splits_and_merges() {
        let mut runs = AttributeRuns::new(10, TextAttributes::default());
        runs.set(3..6, bold());
        assert_eq!(ranges(&runs), vec![0..3, 3..6, 6..10]);
        assert_eq!(runs.attributes_at(4), Some(&bold()));
        assert_eq!(runs.attributes_at(6), Some(&TextAttributes::default()));

        runs.set(3..6, TextAttributes::default());
        assert_eq!(ranges(&runs), vec![0..10]);
    }

    #[test]
    fn test_insert_extends_previous_run() {
        let mut runs = AttributeRuns::new(10, TextAttributes::default());
        runs.set(0..5, bold());

        runs.insert(5, 2);
        assert_eq!(ranges(&runs), vec![0..7, 7..12]);

        runs.insert(0, 1);
        assert_eq!(ranges(&runs), vec![0..8, 8..13]);

        runs.insert(13, 3);
        assert_eq!(ranges(&runs), vec![0..8, 8..16]);
    }

    #[test]
    fn test_delete_removes_and_merges() {
        let mut runs = AttributeRuns::new(12, TextAttributes::default());
        runs.set(4..8, bold());

        runs.delete(2..10);
        assert_eq!(ranges(&runs), vec![0..4]);

        runs.delete(0..4);
        assert_eq!(ranges(&runs), vec![0..0]);
        assert_eq!(runs.attributes_at(0), Some(&TextAttributes::default()));
    }

    #[test]
    fn test_runs_in_clips() {
        let mut runs = AttributeRuns::new(10, TextAttributes::default());
        runs.set(3..6, bold());

        let clipped: Vec<_> = runs.runs_in(4..8).map(|r| r.range).collect();
        assert_eq!(clipped, vec![4..6, 6..8]);
    }

    #[test]
    fn test_runs_spill_past_inline_capacity() {
        let mut runs = AttributeRuns::new(20, TextAttributes::default());
        runs.set(5..10, bold());
        assert_eq!(runs.as_slice().len(), 3);
        assert!(!runs.runs.spilled());

        for start in (0..20).step_by(4) {
            runs.set(start..start + 2, bold());
        }
        assert!(runs.runs.spilled());
        assert_eq!(
            ranges(&runs),
            vec![0..2, 2..4, 4..10, 10..12, 12..14, 14..16, 16..18, 18..20]
        );
        assert_eq!(runs.attributes_at(9), Some(&bold()));
        assert_eq!(runs.attributes_at(11), Some(&TextAttributes::default()));
    }

    #[test]
    fn test_attributes_past_end() {
        let runs = AttributeRuns::new(5, TextAttributes::default());
        assert!(runs.attributes_at(5).is_some());
        assert!(runs.attributes_at(6).is_none());
    }
}
