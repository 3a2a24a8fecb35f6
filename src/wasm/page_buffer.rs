//! Flat page table for the WASM bridge
//!
//! ## u32 Buffer Layout:
//! ```text
//! Header:
//! [0]     MAGIC (0x5047464C = "PGFL" for validation)
//! [1]     SCHEMA_VERSION (protocol version, currently 1)
//! [2]     page_count
//! [3..]   page data...
//!
//! Per-page: [page_index, char_start, char_len, glyph_start, glyph_len]
//! ```
//!
//! ## f32 Buffer Layout:
//! ```text
//! Per-page: [y_offset, used_x, used_y, used_width, used_height]
//! ```
//!
//! An invalidated layout is written as a bare header with a page count of 0.

use crate::layout::PageInfo;

/// Magic number for format validation: "PGFL" (PaGeFLow)
pub const MAGIC: u32 = 0x5047464C;

/// Schema version for protocol compatibility checking
pub const SCHEMA_VERSION: u32 = 1;

/// Header size in u32 elements
pub const HEADER_SIZE: usize = 3;

/// Number of u32 values per page
/// [page_index, char_start, char_len, glyph_start, glyph_len]
pub const U32_PER_PAGE: usize = 5;

/// Number of f32 values per page
/// [y_offset, used_x, used_y, used_width, used_height]
pub const F32_PER_PAGE: usize = 5;

/// Page table buffers handed to JS
#[derive(Debug, Clone)]
pub struct PageBuffer {
    /// Integer data (header, indices, ranges)
    pub u32_data: Vec<u32>,
    /// Float data (positions, dimensions)
    pub f32_data: Vec<f32>,
}

impl Default for PageBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageBuffer {
    pub fn new() -> Self {
        let mut buffer = Self {
            u32_data: Vec::with_capacity(HEADER_SIZE + 16 * U32_PER_PAGE),
            f32_data: Vec::with_capacity(16 * F32_PER_PAGE),
        };
        buffer.write_header(0);
        buffer
    }

    /// Reset to a header for `page_count` pages, reusing capacity
    pub fn prepare(&mut self, page_count: usize) {
        self.u32_data.clear();
        self.f32_data.clear();
        self.u32_data.reserve(HEADER_SIZE + page_count * U32_PER_PAGE);
        self.f32_data.reserve(page_count * F32_PER_PAGE);
        self.write_header(page_count as u32);
    }

    fn write_header(&mut self, page_count: u32) {
        self.u32_data.push(MAGIC); // [0] magic number
        self.u32_data.push(SCHEMA_VERSION); // [1] schema version
        self.u32_data.push(page_count); // [2] page_count
    }

    /// Append one page; `y_offset` is the page top in the scroll view
    pub fn write_page(&mut self, page: &PageInfo, y_offset: f32) {
        self.u32_data.push(page.page_index as u32);
        self.u32_data.push(page.character_range.start as u32);
        self.u32_data.push(page.character_range.len() as u32);
        self.u32_data.push(page.glyph_range.start as u32);
        self.u32_data.push(page.glyph_range.len() as u32);

        let used = page.used_rect;
        self.f32_data.push(y_offset);
        self.f32_data.push(used.x);
        self.f32_data.push(used.y);
        self.f32_data.push(used.width);
        self.f32_data.push(used.height);
    }

    /// Pages recorded in the header
    pub fn page_count(&self) -> usize {
        self.u32_data.get(2).map_or(0, |count| *count as usize)
    }

    /// u32 slice for page `index`, if written
    pub fn page_u32(&self, index: usize) -> Option<&[u32]> {
        let start = HEADER_SIZE + index * U32_PER_PAGE;
        self.u32_data.get(start..start + U32_PER_PAGE)
    }

    /// f32 slice for page `index`, if written
    pub fn page_f32(&self, index: usize) -> Option<&[f32]> {
        let start = index * F32_PER_PAGE;
        self.f32_data.get(start..start + F32_PER_PAGE)
    }
}
