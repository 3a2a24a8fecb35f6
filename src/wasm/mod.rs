//! WASM bindings for the paginator

pub mod page_buffer;

use crate::layout::LineBreakProvider;
use crate::{PageGeometryConfig, PaginatedDocument, TextFlowEngine};
use page_buffer::PageBuffer;
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn to_js_error(err: crate::PageflowError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// WASM-exposed paginated document
#[wasm_bindgen]
pub struct WasmPaginator {
    document: PaginatedDocument<LineBreakProvider>,
    buffer: PageBuffer,
}

#[wasm_bindgen]
impl WasmPaginator {
    /// Create an empty document on US Letter with one-inch margins
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::with_config(PageGeometryConfig::default())
    }

    /// Create a document from a JSON page geometry configuration
    #[wasm_bindgen(js_name = withGeometryJson)]
    pub fn with_geometry_json(json: &str) -> Result<WasmPaginator, JsValue> {
        let config = PageGeometryConfig::from_json(json).map_err(to_js_error)?;
        Ok(Self::with_config(config))
    }

    /// Replace the whole text
    #[wasm_bindgen(js_name = setText)]
    pub fn set_text(&mut self, text: &str) {
        self.document.replace_text(text);
        self.buffer.prepare(0);
    }

    /// Insert text at a character offset
    #[wasm_bindgen(js_name = insertText)]
    pub fn insert_text(&mut self, offset: usize, text: &str) -> Result<(), JsValue> {
        self.document.insert_text(offset, text).map_err(to_js_error)?;
        self.buffer.prepare(0);
        Ok(())
    }

    /// Delete the characters in `start..end`
    #[wasm_bindgen(js_name = deleteRange)]
    pub fn delete_range(&mut self, start: usize, end: usize) -> Result<(), JsValue> {
        self.document.delete(start..end).map_err(to_js_error)?;
        self.buffer.prepare(0);
        Ok(())
    }

    #[wasm_bindgen(js_name = setPageGeometryJson)]
    pub fn set_page_geometry_json(&mut self, json: &str) -> Result<(), JsValue> {
        let config = PageGeometryConfig::from_json(json).map_err(to_js_error)?;
        self.document.update_page_geometry(config);
        self.buffer.prepare(0);
        Ok(())
    }

    #[wasm_bindgen(js_name = setPageSpacing)]
    pub fn set_page_spacing(&mut self, spacing: f32) {
        self.document.set_page_spacing(spacing);
        self.buffer.prepare(0);
    }

    /// Paginate and refresh the page buffers; returns the page count
    #[wasm_bindgen(js_name = calculateLayout)]
    pub fn calculate_layout(&mut self) -> usize {
        let page_count = self.document.calculate_layout().page_count;
        self.write_buffer();
        page_count
    }

    #[wasm_bindgen(js_name = invalidateLayout)]
    pub fn invalidate_layout(&mut self) {
        self.document.invalidate_layout();
        self.buffer.prepare(0);
    }

    /// Get page count, 0 while the layout is invalid
    #[wasm_bindgen(js_name = getPageCount)]
    pub fn get_page_count(&self) -> usize {
        self.document.page_count()
    }

    /// Page owning a character offset, or -1
    #[wasm_bindgen(js_name = pageIndexForCharacter)]
    pub fn page_index_for_character(&self, offset: usize) -> i32 {
        self.document
            .engine()
            .page_index_for_character(offset)
            .map_or(-1, |page| page as i32)
    }

    #[wasm_bindgen(js_name = yPositionForPage)]
    pub fn y_position_for_page(&self, page: usize) -> f32 {
        self.document.engine().y_position(page)
    }

    #[wasm_bindgen(js_name = pageIndexAt)]
    pub fn page_index_at(&self, y: f32) -> usize {
        self.document.engine().page_index_at(y)
    }

    /// Cached layout as JSON, or "null" while the layout is invalid
    #[wasm_bindgen(js_name = getLayoutJson)]
    pub fn get_layout_json(&self) -> String {
        match self.document.engine().layout_result() {
            Some(result) => serde_json::to_string(result).unwrap_or_else(|_| "null".to_string()),
            None => "null".to_string(),
        }
    }

    #[wasm_bindgen(js_name = getContentHeight)]
    pub fn get_content_height(&self) -> f32 {
        self.document.engine().content_size().height
    }

    /// Integer page table (see [`page_buffer`])
    #[wasm_bindgen(js_name = getPageBufferU32)]
    pub fn get_page_buffer_u32(&self) -> js_sys::Uint32Array {
        js_sys::Uint32Array::from(self.buffer.u32_data.as_slice())
    }

    /// Float page table (see [`page_buffer`])
    #[wasm_bindgen(js_name = getPageBufferF32)]
    pub fn get_page_buffer_f32(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(self.buffer.f32_data.as_slice())
    }
}

impl WasmPaginator {
    fn with_config(config: PageGeometryConfig) -> Self {
        let engine = TextFlowEngine::new(config, LineBreakProvider::default());
        Self {
            document: PaginatedDocument::new(engine),
            buffer: PageBuffer::new(),
        }
    }

    fn write_buffer(&mut self) {
        let engine = self.document.engine();
        let Some(result) = engine.layout_result() else {
            self.buffer.prepare(0);
            return;
        };

        self.buffer.prepare(result.page_count);
        for page in &result.pages {
            self.buffer.write_page(page, engine.y_position(page.page_index));
        }
    }

    /// Page table as last written by `calculateLayout`
    pub fn page_buffer(&self) -> &PageBuffer {
        &self.buffer
    }
}

impl Default for WasmPaginator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use page_buffer::{HEADER_SIZE, MAGIC, U32_PER_PAGE};

    #[test]
    fn test_paginator_round_trip() {
        let mut paginator = WasmPaginator::new();
        paginator.set_text(&"line\n".repeat(100));
        assert_eq!(paginator.get_page_count(), 0);
        assert_eq!(paginator.get_layout_json(), "null");

        assert_eq!(paginator.calculate_layout(), 3);
        assert_eq!(paginator.page_index_for_character(0), 0);
        assert_eq!(paginator.page_index_for_character(500), 2);
        assert_eq!(paginator.page_index_for_character(501), -1);
        assert_eq!(paginator.y_position_for_page(1), 812.0);
        assert_eq!(paginator.page_index_at(900.0), 1);
        assert_eq!(paginator.get_content_height(), 2.0 * 812.0 + 792.0);

        let json = paginator.get_layout_json();
        assert!(json.contains("\"pageCount\":3"));
        assert!(json.contains("\"characterRange\""));
    }

    #[test]
    fn test_buffer_tracks_layout() {
        let mut paginator = WasmPaginator::new();
        paginator.set_text(&"line\n".repeat(100));
        paginator.calculate_layout();

        let buffer = paginator.page_buffer();
        assert_eq!(buffer.u32_data[0], MAGIC);
        assert_eq!(buffer.page_count(), 3);
        assert_eq!(buffer.u32_data.len(), HEADER_SIZE + 3 * U32_PER_PAGE);
        assert_eq!(buffer.page_u32(1), Some(&[1, 225, 225, 225, 225][..]));
        assert_eq!(buffer.page_f32(2).map(|page| page[0]), Some(1624.0));

        paginator.insert_text(0, "x").unwrap();
        assert_eq!(paginator.page_buffer().page_count(), 0);
        assert_eq!(paginator.get_page_count(), 0);
    }

    #[test]
    fn test_geometry_json() {
        let mut paginator = WasmPaginator::with_geometry_json(
            r#"{"paper":"a4","margins":{"top":36,"bottom":36,"left":36,"right":36}}"#,
        )
        .unwrap();
        paginator.set_text("hello");
        assert_eq!(paginator.calculate_layout(), 1);

        paginator.set_page_spacing(0.0);
        assert_eq!(paginator.get_page_count(), 0);
        paginator.calculate_layout();
        assert_eq!(paginator.page_index_at(1000.0), 0);
    }
}
