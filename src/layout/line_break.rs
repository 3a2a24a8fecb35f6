//! Reference glyph layout provider
//!
//! Grapheme clusters are glyphs, UAX #14 break opportunities decide where
//! lines may wrap, and a [`FontLibrary`] supplies advances and line heights.

use crate::layout::font::FontLibrary;
use crate::layout::provider::{GlyphLayoutProvider, Measurement};
use crate::text::{AttributeRun, AttributedText};
use crate::Rect;
use std::ops::Range;
use unicode_linebreak::{linebreaks, BreakOpportunity};
use unicode_segmentation::UnicodeSegmentation;

/// Characters laid out by the first pass of a measurement
const INITIAL_WINDOW: usize = 256;

/// Upper bound the window grows to while lines keep fitting
pub const MEASURE_WINDOW: usize = 8192;

/// Tolerance for floating point fit checks
const FIT_EPSILON: f32 = 0.01;

/// Measured line produced by line breaking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    pub chars: usize,
    pub glyphs: usize,
    /// Advance of the line without trailing whitespace
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy)]
struct Cluster {
    chars: usize,
    width: f32,
    height: f32,
    whitespace: bool,
}

/// Greedy line breaker backed by per-font advance tables
#[derive(Debug, Clone, Default)]
pub struct LineBreakProvider {
    fonts: FontLibrary,
}

impl LineBreakProvider {
    pub fn new(fonts: FontLibrary) -> Self {
        Self { fonts }
    }

    pub fn fonts(&self) -> &FontLibrary {
        &self.fonts
    }

    pub fn fonts_mut(&mut self) -> &mut FontLibrary {
        &mut self.fonts
    }

    /// Break the characters in `range` into lines no wider than `max_width`.
    ///
    /// A cluster wider than `max_width` still gets a line of its own, and
    /// trailing whitespace hangs past the edge.
    pub fn break_lines(
        &self,
        text: &AttributedText,
        range: Range<usize>,
        max_width: f32,
    ) -> Vec<LineMetrics> {
        let mut lines = Vec::new();
        self.visit_lines(text, range, max_width, |line, _| {
            lines.push(line);
            true
        });
        lines
    }

    /// Feed lines of `range` to `visit` in order until it returns false.
    ///
    /// The second argument is true for the line ending at `range.end`.
    fn visit_lines(
        &self,
        text: &AttributedText,
        range: Range<usize>,
        max_width: f32,
        mut visit: impl FnMut(LineMetrics, bool) -> bool,
    ) {
        let slice = text.slice(range.clone());
        let runs: Vec<AttributeRun> = text.runs_in(range.clone()).collect();
        let mut opportunities = linebreaks(&slice).peekable();

        let mut line: Vec<Cluster> = Vec::new();
        let mut break_before: Option<usize> = None;
        let mut run_idx = 0;
        let mut char_pos = range.start;

        for (byte_idx, grapheme) in slice.grapheme_indices(true) {
            while let Some(&(pos, kind)) = opportunities.peek() {
                if pos > byte_idx {
                    break;
                }
                opportunities.next();
                // Opportunities inside a cluster or before any content are ignored
                if pos < byte_idx || line.is_empty() {
                    continue;
                }
                match kind {
                    BreakOpportunity::Mandatory => {
                        if !visit(finish_line(&line), false) {
                            return;
                        }
                        line.clear();
                        break_before = None;
                    }
                    BreakOpportunity::Allowed => break_before = Some(line.len()),
                }
            }

            while run_idx + 1 < runs.len() && runs[run_idx].range.end <= char_pos {
                run_idx += 1;
            }
            let attributes = runs
                .get(run_idx)
                .map(|run| run.attributes)
                .unwrap_or_default();
            let metrics = self.fonts.resolve(attributes.font);

            let cluster = Cluster {
                chars: grapheme.chars().count(),
                width: metrics.grapheme_width(grapheme),
                height: metrics.line_height + attributes.line_spacing.max(0.0),
                whitespace: grapheme.chars().all(char::is_whitespace),
            };
            char_pos += cluster.chars;

            if !cluster.whitespace && overflows(&line, cluster.width, max_width) {
                if let Some(split) = break_before.take() {
                    let rest = line.split_off(split);
                    if !visit(finish_line(&line), false) {
                        return;
                    }
                    line = rest;
                }
                // Emergency break at the cluster boundary
                if overflows(&line, cluster.width, max_width) {
                    if !visit(finish_line(&line), false) {
                        return;
                    }
                    line.clear();
                }
            }

            line.push(cluster);
        }

        if !line.is_empty() {
            visit(finish_line(&line), true);
        }
    }
}

fn overflows(line: &[Cluster], width: f32, max_width: f32) -> bool {
    !line.is_empty() && line.iter().map(|c| c.width).sum::<f32>() + width > max_width + FIT_EPSILON
}

fn finish_line(line: &[Cluster]) -> LineMetrics {
    let trailing = line
        .iter()
        .rev()
        .take_while(|c| c.whitespace)
        .map(|c| c.width)
        .sum::<f32>();

    LineMetrics {
        chars: line.iter().map(|c| c.chars).sum(),
        glyphs: line.len(),
        width: (line.iter().map(|c| c.width).sum::<f32>() - trailing).max(0.0),
        height: line.iter().map(|c| c.height).fold(0.0, f32::max),
    }
}

impl GlyphLayoutProvider for LineBreakProvider {
    fn measure(
        &self,
        text: &AttributedText,
        start: usize,
        max_width: f32,
        max_height: f32,
    ) -> Measurement {
        let len = text.len();
        let mut pos = start;
        let mut window = INITIAL_WINDOW;
        let mut measurement = Measurement::default();
        let mut used_width: f32 = 0.0;
        let mut used_height: f32 = 0.0;

        while pos < len {
            let paragraph_end = text.paragraph_end(pos);
            let window_end = paragraph_end.min(pos.saturating_add(window));
            let truncated = window_end < paragraph_end;

            let mut consumed = 0;
            let mut full = false;
            self.visit_lines(text, pos..window_end, max_width, |line, at_end| {
                // The last line of a truncated window may continue past it
                if truncated && at_end {
                    return false;
                }
                if used_height + line.height > max_height + FIT_EPSILON {
                    full = true;
                    return false;
                }
                used_height += line.height;
                used_width = used_width.max(line.width);
                measurement.characters += line.chars;
                measurement.glyphs += line.glyphs;
                consumed += line.chars;
                true
            });

            if full {
                break;
            }
            pos += consumed;

            if truncated {
                window = if consumed == 0 {
                    // One line spans the whole window
                    window.saturating_mul(2)
                } else {
                    window.saturating_mul(2).min(MEASURE_WINDOW).max(window)
                };
            }
        }

        measurement.used_rect = Rect::new(0.0, 0.0, used_width.min(max_width.max(0.0)), used_height);
        measurement
    }
}
