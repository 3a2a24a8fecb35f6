#![cfg(target_arch = "wasm32")]

use pageflow::wasm::page_buffer::{HEADER_SIZE, MAGIC, SCHEMA_VERSION, U32_PER_PAGE};
use pageflow::WasmPaginator;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_page_buffers() {
    let mut paginator = WasmPaginator::new();
    paginator.set_text(&"line\n".repeat(100));
    assert_eq!(paginator.calculate_layout(), 3);

    let u32_data = paginator.get_page_buffer_u32().to_vec();
    assert_eq!(u32_data[0], MAGIC);
    assert_eq!(u32_data[1], SCHEMA_VERSION);
    assert_eq!(u32_data[2], 3);
    assert_eq!(u32_data.len(), HEADER_SIZE + 3 * U32_PER_PAGE);

    let f32_data = paginator.get_page_buffer_f32().to_vec();
    assert_eq!(f32_data[5], 812.0);
}

#[wasm_bindgen_test]
fn test_invalid_edits_report_errors() {
    let mut paginator = WasmPaginator::new();
    paginator.set_text("abc");

    assert!(paginator.insert_text(10, "x").is_err());
    assert!(paginator.delete_range(2, 9).is_err());
    assert!(paginator.set_page_geometry_json("{").is_err());
    assert!(WasmPaginator::with_geometry_json("{\"paper\":\"folio\"}").is_err());
}

#[wasm_bindgen_test]
fn test_invalidate_clears_buffer() {
    let mut paginator = WasmPaginator::new();
    paginator.set_text("hello");
    paginator.calculate_layout();
    paginator.invalidate_layout();

    assert_eq!(paginator.get_page_count(), 0);
    assert_eq!(paginator.page_index_for_character(0), -1);
    assert_eq!(paginator.get_page_buffer_u32().to_vec(), vec![MAGIC, SCHEMA_VERSION, 0]);
    assert!(paginator.get_page_buffer_f32().to_vec().is_empty());
}
