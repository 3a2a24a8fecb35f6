//! Pagination output types

use crate::{Rect, Size};
use serde::Serialize;
use std::ops::Range;
use std::time::Duration;

/// Layout information for a page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Page index (0-based)
    pub page_index: usize,
    /// Characters on this page, half-open
    pub character_range: Range<usize>,
    /// Glyphs on this page in the provider's numbering
    pub glyph_range: Range<usize>,
    /// Area covered by the page's lines, in page coordinates
    pub used_rect: Rect,
}

impl PageInfo {
    /// Check if this page owns a character offset
    pub fn contains_character(&self, offset: usize) -> bool {
        self.character_range.contains(&offset)
    }
}

/// Output of one pagination pass
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    pub pages: Vec<PageInfo>,
    pub page_count: usize,
    /// Size of all pages stacked vertically with spacing
    pub content_size: Size,
    /// Wall-clock time of the pass, for diagnostics
    pub calculation_time: Duration,
}

impl LayoutResult {
    pub(crate) fn new(pages: Vec<PageInfo>, content_size: Size, calculation_time: Duration) -> Self {
        Self {
            page_count: pages.len(),
            pages,
            content_size,
            calculation_time,
        }
    }

    /// Page owning `offset`; the text length maps to the last page
    pub fn page_index_for_character(&self, offset: usize) -> Option<usize> {
        let last = self.pages.last()?;
        if offset > last.character_range.end {
            return None;
        }
        if offset == last.character_range.end {
            return Some(last.page_index);
        }

        // Ranges are sorted and contiguous
        let idx = self
            .pages
            .partition_point(|page| page.character_range.end <= offset);
        self.pages.get(idx).map(|page| page.page_index)
    }

    pub fn page(&self, index: usize) -> Option<&PageInfo> {
        self.pages.get(index)
    }

    /// Total characters covered by all pages
    pub fn character_count(&self) -> usize {
        self.pages.last().map_or(0, |page| page.character_range.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(index: usize, chars: Range<usize>) -> PageInfo {
        PageInfo {
            page_index: index,
            glyph_range: chars.clone(),
            character_range: chars,
            used_rect: Rect::default(),
        }
    }

    #[test]
    fn test_page_index_for_character() {
        let result = LayoutResult::new(
            vec![page(0, 0..10), page(1, 10..25), page(2, 25..30)],
            Size::default(),
            Duration::ZERO,
        );

        assert_eq!(result.page_count, 3);
        assert_eq!(result.page_index_for_character(0), Some(0));
        assert_eq!(result.page_index_for_character(9), Some(0));
        assert_eq!(result.page_index_for_character(10), Some(1));
        assert_eq!(result.page_index_for_character(29), Some(2));
        assert_eq!(result.page_index_for_character(30), Some(2));
        assert_eq!(result.page_index_for_character(31), None);
        assert_eq!(result.character_count(), 30);
    }

    #[test]
    fn test_empty_page_owns_offset_zero() {
        let result = LayoutResult::new(vec![page(0, 0..0)], Size::default(), Duration::ZERO);
        assert_eq!(result.page_index_for_character(0), Some(0));
        assert_eq!(result.page_index_for_character(1), None);
        assert!(!result.pages[0].contains_character(0));
    }
}
