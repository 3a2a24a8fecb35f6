//! Pageflow: document pagination for fixed-size pages
//!
//! This crate provides:
//! - Page geometry (paper, orientation, margins, header and footer strips)
//! - A text flow engine that splits attributed text into pages
//! - A pluggable glyph layout provider with a UAX #14 reference implementation
//! - Page lookup and scroll queries over the cached layout

pub mod error;
pub mod geometry;
pub mod layout;
pub mod text;
pub mod wasm;

// Re-export WASM types for direct use
pub use wasm::WasmPaginator;

// Re-export primary types
pub use error::{PageflowError, Result};
pub use geometry::{
    Margins, MeasurementUnit, Orientation, PageGeometry, PageGeometryConfig, PaperSize,
};
pub use layout::{
    FontId, FontLibrary, FontMetrics, GlyphLayoutProvider, LayoutResult, LineBreakProvider,
    Measurement, PageInfo, TextFlowEngine, DEFAULT_PAGE_SPACING,
};
pub use text::{AttributeRun, AttributedText, TextAttributes};

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Page coordinates in points
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width and height in points
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

/// Axis-aligned rectangle, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.max_x()
            && point.y >= self.y
            && point.y <= self.max_y()
    }

    /// Edges may touch
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.max_x() <= self.max_x()
            && other.max_y() <= self.max_y()
    }

    /// Rects sharing only an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.max_x()
            && self.max_x() > other.x
            && self.y < other.max_y()
            && self.max_y() > other.y
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// Text buffer paired with the engine that paginates it.
///
/// Every mutation invalidates the engine, so a stale layout is never
/// observable after an edit; call [`calculate_layout`](Self::calculate_layout)
/// to rebuild it.
pub struct PaginatedDocument<P> {
    text: AttributedText,
    engine: TextFlowEngine<P>,
}

impl<P: GlyphLayoutProvider> PaginatedDocument<P> {
    pub fn new(engine: TextFlowEngine<P>) -> Self {
        Self {
            text: AttributedText::new(),
            engine,
        }
    }

    /// Create a document with initial text content
    pub fn with_text(text: &str, engine: TextFlowEngine<P>) -> Self {
        Self {
            text: AttributedText::from_text(text),
            engine,
        }
    }

    pub fn text(&self) -> &AttributedText {
        &self.text
    }

    pub fn engine(&self) -> &TextFlowEngine<P> {
        &self.engine
    }

    /// Insert text at a character offset
    pub fn insert_text(&mut self, offset: usize, text: &str) -> Result<()> {
        self.text.insert(offset, text)?;
        self.engine.invalidate_layout();
        Ok(())
    }

    /// Delete a character range
    pub fn delete(&mut self, range: Range<usize>) -> Result<()> {
        self.text.delete(range)?;
        self.engine.invalidate_layout();
        Ok(())
    }

    pub fn set_attributes(&mut self, range: Range<usize>, attributes: TextAttributes) -> Result<()> {
        self.text.set_attributes(range, attributes)?;
        self.engine.invalidate_layout();
        Ok(())
    }

    /// Replace the whole text, keeping the attributes of its first run
    pub fn replace_text(&mut self, text: &str) {
        self.text.replace_all(text);
        self.engine.invalidate_layout();
    }

    pub fn update_page_geometry(&mut self, config: PageGeometryConfig) {
        self.engine.update_page_geometry(config);
    }

    pub fn set_page_spacing(&mut self, spacing: f32) {
        self.engine.set_page_spacing(spacing);
    }

    pub fn invalidate_layout(&mut self) {
        self.engine.invalidate_layout();
    }

    /// Paginate the current text, reusing the cached layout when valid
    pub fn calculate_layout(&mut self) -> &LayoutResult {
        self.engine.calculate_layout(&self.text)
    }

    /// Get total page count, 0 until the layout is calculated
    pub fn page_count(&self) -> usize {
        self.engine.page_count()
    }
}

impl PaginatedDocument<LineBreakProvider> {
    /// Document laid out by the reference line breaker with default fonts
    pub fn with_config(config: PageGeometryConfig) -> Self {
        Self::new(TextFlowEngine::new(config, LineBreakProvider::default()))
    }
}
