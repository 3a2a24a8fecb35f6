//! Attributed text buffer
//!
//! Rope-backed character storage with attribute runs. All offsets are
//! character indices, and every mutation bumps the version counter. The
//! buffer does not know about layout: whoever owns it must invalidate the
//! text flow engine after mutating it.

mod attributes;
mod rope;

pub use attributes::{AttributeRun, TextAttributes};
pub use rope::Rope;

use crate::error::{PageflowError, Result};
use attributes::AttributeRuns;
use std::ops::Range;

#[derive(Debug, Clone)]
pub struct AttributedText {
    content: Rope,
    runs: AttributeRuns,
    version: u64,
}

impl Default for AttributedText {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributedText {
    pub fn new() -> Self {
        Self::with_attributes("", TextAttributes::default())
    }

    pub fn from_text(text: &str) -> Self {
        Self::with_attributes(text, TextAttributes::default())
    }

    pub fn with_attributes(text: &str, attributes: TextAttributes) -> Self {
        let content = Rope::from_str(text);
        let runs = AttributeRuns::new(content.len(), attributes);
        Self {
            content,
            runs,
            version: 0,
        }
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn text(&self) -> String {
        self.content.to_string()
    }

    /// Text of a character range, clamped to the end of the buffer
    pub fn slice(&self, range: Range<usize>) -> String {
        self.content.slice(range.start, range.end)
    }

    pub fn insert(&mut self, offset: usize, text: &str) -> Result<()> {
        self.check_offset(offset)?;
        if text.is_empty() {
            return Ok(());
        }

        self.content.insert(offset, text);
        self.runs.insert(offset, text.chars().count());
        self.version += 1;
        Ok(())
    }

    pub fn delete(&mut self, range: Range<usize>) -> Result<()> {
        self.check_range(&range)?;
        if range.is_empty() {
            return Ok(());
        }

        self.content.delete(range.start, range.end);
        self.runs.delete(range);
        self.version += 1;
        Ok(())
    }

    /// Replace the whole buffer, keeping the attributes at offset 0
    pub fn replace_all(&mut self, text: &str) {
        let attributes = self.runs.attributes_at(0).copied().unwrap_or_default();
        self.content = Rope::from_str(text);
        self.runs = AttributeRuns::new(self.content.len(), attributes);
        self.version += 1;
    }

    pub fn set_attributes(&mut self, range: Range<usize>, attributes: TextAttributes) -> Result<()> {
        self.check_range(&range)?;
        if range.is_empty() {
            return Ok(());
        }

        self.runs.set(range, attributes);
        self.version += 1;
        Ok(())
    }

    /// Attributes of the character at `offset`; the end offset reports the
    /// typing attributes of the last run
    pub fn attributes_at(&self, offset: usize) -> Option<&TextAttributes> {
        self.runs.attributes_at(offset)
    }

    pub fn runs(&self) -> &[AttributeRun] {
        self.runs.as_slice()
    }

    /// Runs overlapping `range`, clipped to it
    pub fn runs_in(&self, range: Range<usize>) -> impl Iterator<Item = AttributeRun> + '_ {
        self.runs.runs_in(range)
    }

    /// End of the paragraph containing `offset`, including its newline
    pub fn paragraph_end(&self, offset: usize) -> usize {
        self.content
            .next_line_break(offset)
            .map_or(self.len(), |newline| newline + 1)
    }

    fn check_offset(&self, offset: usize) -> Result<()> {
        if offset > self.len() {
            return Err(PageflowError::OffsetOutOfBounds {
                offset,
                len: self.len(),
            });
        }
        Ok(())
    }

    fn check_range(&self, range: &Range<usize>) -> Result<()> {
        if range.start > range.end || range.end > self.len() {
            return Err(PageflowError::InvalidRange {
                start: range.start,
                end: range.end,
                len: self.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font::FontId;

    #[test]
    fn test_new_text() {
        let text = AttributedText::new();
        assert_eq!(text.len(), 0);
        assert!(text.is_empty());
        assert_eq!(text.runs().len(), 1);
    }

    #[test]
    fn test_insert_and_delete() {
        let mut text = AttributedText::from_text("Hello World");
        text.insert(5, ",").unwrap();
        assert_eq!(text.text(), "Hello, World");
        assert_eq!(text.version(), 1);

        text.delete(5..6).unwrap();
        assert_eq!(text.text(), "Hello World");
        assert_eq!(text.version(), 2);
        assert_eq!(text.runs()[0].range, 0..11);
    }

    #[test]
    fn test_out_of_bounds_edits() {
        let mut text = AttributedText::from_text("abc");
        assert!(matches!(
            text.insert(4, "x"),
            Err(PageflowError::OffsetOutOfBounds { offset: 4, len: 3 })
        ));
        assert!(matches!(
            text.delete(2..5),
            Err(PageflowError::InvalidRange { .. })
        ));
        #[allow(clippy::reversed_empty_ranges)]
        let reversed = 2..1;
        assert!(text.set_attributes(reversed, TextAttributes::default()).is_err());
        assert_eq!(text.version(), 0);
    }

    #[test]
    fn test_set_attributes() {
        let mut text = AttributedText::from_text("plain bold plain");
        let bold = TextAttributes::with_font(FontId(1));
        text.set_attributes(6..10, bold).unwrap();

        assert_eq!(text.runs().len(), 3);
        assert_eq!(text.attributes_at(7), Some(&bold));
        assert_eq!(text.attributes_at(2).map(|a| a.font), Some(FontId(0)));
        assert_eq!(text.version(), 1);
    }

    #[test]
    fn test_paragraph_end() {
        let text = AttributedText::from_text("one\ntwo\nthree");
        assert_eq!(text.paragraph_end(0), 4);
        assert_eq!(text.paragraph_end(3), 4);
        assert_eq!(text.paragraph_end(4), 8);
        assert_eq!(text.paragraph_end(9), 13);
    }

    #[test]
    fn test_replace_all_keeps_attributes() {
        let bold = TextAttributes::with_font(FontId(2));
        let mut text = AttributedText::with_attributes("abc", bold);
        text.replace_all("a longer text");

        assert_eq!(text.len(), 13);
        assert_eq!(text.runs().len(), 1);
        assert_eq!(text.attributes_at(0), Some(&bold));
    }
}
