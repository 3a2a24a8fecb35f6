//! Text flow: measurement through a provider and page-by-page pagination

mod engine;
pub mod font;
mod line_break;
mod pagination;
mod provider;

pub use engine::{TextFlowEngine, DEFAULT_PAGE_SPACING};
pub use font::{FontId, FontLibrary, FontMetrics};
pub use line_break::{LineBreakProvider, LineMetrics, MEASURE_WINDOW};
pub use pagination::{LayoutResult, PageInfo};
pub use provider::{GlyphLayoutProvider, Measurement};
