//! Text flow engine: splits attributed text into fixed-size pages

use crate::geometry::{self, PageGeometry, PageGeometryConfig};
use crate::layout::pagination::{LayoutResult, PageInfo};
use crate::layout::provider::GlyphLayoutProvider;
use crate::text::AttributedText;
use crate::{Rect, Size};
use instant::Instant;
use std::ops::Range;

/// Default vertical gap between pages in continuous scroll, in points
pub const DEFAULT_PAGE_SPACING: f32 = 20.0;

/// Paginates text through a [`GlyphLayoutProvider`] and caches the result.
///
/// Only [`calculate_layout`](Self::calculate_layout) does layout work. Query
/// methods read the cached result and report an empty state once the layout
/// has been invalidated; callers must recalculate explicitly.
pub struct TextFlowEngine<P> {
    provider: P,
    config: PageGeometryConfig,
    page_spacing: f32,
    /// Cached result; `None` means the layout is invalid
    result: Option<LayoutResult>,
}

impl<P: GlyphLayoutProvider> TextFlowEngine<P> {
    pub fn new(config: PageGeometryConfig, provider: P) -> Self {
        Self {
            provider,
            config: config.normalized(),
            page_spacing: DEFAULT_PAGE_SPACING,
            result: None,
        }
    }

    pub fn with_page_spacing(mut self, spacing: f32) -> Self {
        self.set_page_spacing(spacing);
        self
    }

    pub fn config(&self) -> &PageGeometryConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn page_spacing(&self) -> f32 {
        self.page_spacing
    }

    /// Rectangles shared by every page
    pub fn page_geometry(&self) -> PageGeometry {
        geometry::layout(&self.config)
    }

    pub fn is_valid(&self) -> bool {
        self.result.is_some()
    }

    /// The cached result, if the layout is valid
    pub fn layout_result(&self) -> Option<&LayoutResult> {
        self.result.as_ref()
    }

    /// Drop the cached layout. The text owner calls this after every mutation.
    pub fn invalidate_layout(&mut self) {
        if self.result.take().is_some() {
            log::trace!("Layout invalidated");
        }
    }

    /// Replace the page geometry and invalidate the layout
    pub fn update_page_geometry(&mut self, config: PageGeometryConfig) {
        self.config = config.normalized();
        self.invalidate_layout();
    }

    /// Change the gap between pages and invalidate the layout
    pub fn set_page_spacing(&mut self, spacing: f32) {
        self.page_spacing = if spacing.is_finite() { spacing.max(0.0) } else { 0.0 };
        self.invalidate_layout();
    }

    /// Paginate `text`, or return the cached result if still valid
    pub fn calculate_layout(&mut self, text: &AttributedText) -> &LayoutResult {
        let result = match self.result.take() {
            Some(cached) => cached,
            None => self.paginate(text),
        };
        self.result.insert(result)
    }

    fn paginate(&self, text: &AttributedText) -> LayoutResult {
        let started = Instant::now();
        let geometry = self.page_geometry();
        let content = geometry.content_rect;
        let text_len = text.len();

        let mut pages = Vec::new();

        if text_len == 0 {
            pages.push(PageInfo {
                page_index: 0,
                character_range: 0..0,
                glyph_range: 0..0,
                used_rect: Rect::new(content.x, content.y, 0.0, 0.0),
            });
        }

        let mut offset = 0;
        let mut glyph_offset = 0;

        while offset < text_len {
            let page_index = pages.len();
            let remaining = text_len - offset;
            let measurement = self
                .provider
                .measure(text, offset, content.width, content.height);

            let mut characters = measurement.characters.min(remaining);
            let mut glyphs = measurement.glyphs;
            if characters == 0 {
                // Nothing fits; take one character so pagination always advances
                log::warn!(
                    "Page {}: line at offset {} does not fit in {:.2}pt of content height, forcing progress",
                    page_index,
                    offset,
                    content.height
                );
                characters = 1;
                glyphs = glyphs.max(1);
            }

            let used = measurement.used_rect;
            pages.push(PageInfo {
                page_index,
                character_range: offset..offset + characters,
                glyph_range: glyph_offset..glyph_offset + glyphs,
                used_rect: Rect::new(
                    content.x + used.x,
                    content.y + used.y,
                    used.width,
                    used.height,
                ),
            });
            log::trace!(
                "Page {}: characters {}..{}, glyphs {}..{}",
                page_index,
                offset,
                offset + characters,
                glyph_offset,
                glyph_offset + glyphs
            );

            offset += characters;
            glyph_offset += glyphs;
        }

        let page_height = geometry.page_rect.height;
        let page_count = pages.len();
        let content_size = Size::new(
            content.width,
            (page_count - 1) as f32 * (page_height + self.page_spacing) + page_height,
        );
        let elapsed = started.elapsed();

        log::debug!(
            "Paginated {} characters into {} pages in {:?}",
            text_len,
            page_count,
            elapsed
        );

        LayoutResult::new(pages, content_size, elapsed)
    }

    /// Number of pages, 0 when the layout is invalid
    pub fn page_count(&self) -> usize {
        self.result.as_ref().map_or(0, |result| result.page_count)
    }

    /// Size of the stacked pages, zero when the layout is invalid
    pub fn content_size(&self) -> Size {
        self.result
            .as_ref()
            .map_or(Size::default(), |result| result.content_size)
    }

    /// Page owning a character offset. The text length maps to the last page;
    /// anything past it is `None`.
    pub fn page_index_for_character(&self, offset: usize) -> Option<usize> {
        self.result.as_ref()?.page_index_for_character(offset)
    }

    pub fn page_info(&self, page: usize) -> Option<&PageInfo> {
        self.result.as_ref()?.page(page)
    }

    pub fn character_range(&self, page: usize) -> Option<Range<usize>> {
        self.page_info(page).map(|info| info.character_range.clone())
    }

    pub fn glyph_range(&self, page: usize) -> Option<Range<usize>> {
        self.page_info(page).map(|info| info.glyph_range.clone())
    }

    fn page_stride(&self) -> f32 {
        self.page_geometry().page_rect.height + self.page_spacing
    }

    /// Top of a page in the continuous scroll view
    pub fn y_position(&self, page: usize) -> f32 {
        page as f32 * self.page_stride()
    }

    /// Page at a vertical scroll position, clamped to the valid pages
    pub fn page_index_at(&self, y: f32) -> usize {
        let stride = self.page_stride();
        if !y.is_finite() || y <= 0.0 || stride <= 0.0 {
            return 0;
        }

        let index = (y / stride).floor() as usize;
        match self.page_count() {
            0 => index,
            count => index.min(count - 1),
        }
    }

    /// Pages intersecting the viewport `scroll_y..scroll_y + viewport_height`
    pub fn visible_pages(&self, scroll_y: f32, viewport_height: f32) -> Range<usize> {
        let count = self.page_count();
        if count == 0 {
            return 0..0;
        }

        let start = self.page_index_at(scroll_y);
        let bottom = scroll_y.max(0.0) + viewport_height.max(0.0);
        let end = (self.page_index_at(bottom) + 1).min(count);
        start.min(end)..end
    }
}
