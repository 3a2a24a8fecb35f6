//! Page geometry calculator
//!
//! Stateless arithmetic turning a [`PageGeometryConfig`] into the rectangles
//! of a single page:
//!
//! ```text
//! page rect
//! └── text rect        (page rect inset by margins)
//!     ├── header rect  (top strip, when enabled)
//!     ├── content rect (body text area)
//!     └── footer rect  (bottom strip, when enabled)
//! ```
//!
//! Degenerate inputs never fail. Any dimension that would go negative is
//! clamped to zero.

mod config;
mod paper;

pub use config::{Margins, MeasurementUnit, Orientation, PageGeometryConfig, DEFAULT_MARGIN};
pub use paper::PaperSize;

use crate::{Rect, Size};
use config::non_negative;
use serde::Serialize;

/// All rectangles of one page plus the inputs they came from
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageGeometry {
    pub paper: PaperSize,
    pub orientation: Orientation,
    pub page_rect: Rect,
    pub text_rect: Rect,
    pub content_rect: Rect,
    pub header_rect: Option<Rect>,
    pub footer_rect: Option<Rect>,
}

/// Page rect at the origin, swapped for landscape
pub fn page_rect(paper: PaperSize, orientation: Orientation) -> Rect {
    let size = paper.dimensions();
    match orientation {
        Orientation::Portrait => Rect::new(0.0, 0.0, size.width, size.height),
        Orientation::Landscape => Rect::new(0.0, 0.0, size.height, size.width),
    }
}

/// Page rect inset by the margins.
///
/// When opposing margins overlap, the dimension collapses to zero and the
/// origin stays at the near margin, pinned inside the page.
pub fn text_rect(page_rect: Rect, margins: Margins) -> Rect {
    let margins = margins.clamped();
    let x = (page_rect.x + margins.left).min(page_rect.max_x());
    let y = (page_rect.y + margins.top).min(page_rect.max_y());
    let width = (page_rect.width - margins.left - margins.right).max(0.0);
    let height = (page_rect.height - margins.top - margins.bottom).max(0.0);

    Rect::new(x, y, width, height)
}

/// Header and footer depths that fit inside the text rect.
///
/// The header is clamped to the text height and the footer to what the
/// header leaves, so the strips never overlap.
fn reserved_depths(
    text_rect: Rect,
    header_enabled: bool,
    header_depth: f32,
    footer_enabled: bool,
    footer_depth: f32,
) -> (f32, f32) {
    let header = if header_enabled {
        non_negative(header_depth).min(text_rect.height)
    } else {
        0.0
    };
    let footer = if footer_enabled {
        non_negative(footer_depth).min(text_rect.height - header)
    } else {
        0.0
    };
    (header, footer)
}

/// Text rect minus the header and footer reservations.
///
/// The header pushes the top edge down; the footer only shrinks the height.
pub fn content_rect(
    text_rect: Rect,
    header_enabled: bool,
    header_depth: f32,
    footer_enabled: bool,
    footer_depth: f32,
) -> Rect {
    let (header, footer) = reserved_depths(
        text_rect,
        header_enabled,
        header_depth,
        footer_enabled,
        footer_depth,
    );

    Rect::new(
        text_rect.x,
        text_rect.y + header,
        text_rect.width,
        (text_rect.height - header - footer).max(0.0),
    )
}

/// Full-width strip at the top of the text rect
pub fn header_rect(text_rect: Rect, header_depth: f32) -> Rect {
    let height = non_negative(header_depth).min(text_rect.height);
    Rect::new(text_rect.x, text_rect.y, text_rect.width, height)
}

/// Full-width strip at the bottom of the text rect
pub fn footer_rect(text_rect: Rect, footer_depth: f32) -> Rect {
    let height = non_negative(footer_depth).min(text_rect.height);
    Rect::new(
        text_rect.x,
        text_rect.max_y() - height,
        text_rect.width,
        height,
    )
}

/// Compute every rect of a page
pub fn layout(config: &PageGeometryConfig) -> PageGeometry {
    let page = page_rect(config.paper, config.orientation);
    let text = text_rect(page, config.margins);
    let content = content_rect(
        text,
        config.header_enabled,
        config.header_depth,
        config.footer_enabled,
        config.footer_depth,
    );
    let (header_depth, footer_depth) = reserved_depths(
        text,
        config.header_enabled,
        config.header_depth,
        config.footer_enabled,
        config.footer_depth,
    );

    PageGeometry {
        paper: config.paper,
        orientation: config.orientation,
        page_rect: page,
        text_rect: text,
        content_rect: content,
        header_rect: config
            .header_enabled
            .then(|| header_rect(text, header_depth)),
        footer_rect: config
            .footer_enabled
            .then(|| footer_rect(text, footer_depth)),
    }
}

fn content_rect_for(config: &PageGeometryConfig) -> Rect {
    let page = page_rect(config.paper, config.orientation);
    content_rect(
        text_rect(page, config.margins),
        config.header_enabled,
        config.header_depth,
        config.footer_enabled,
        config.footer_depth,
    )
}

pub fn content_width(config: &PageGeometryConfig) -> f32 {
    content_rect_for(config).width
}

pub fn content_height(config: &PageGeometryConfig) -> f32 {
    content_rect_for(config).height
}

pub fn content_size(config: &PageGeometryConfig) -> Size {
    content_rect_for(config).size()
}

/// Cheap upper-bound page estimate from a total text height.
///
/// The text flow engine's measured page count is authoritative.
pub fn estimate_page_count(text_height: f32, config: &PageGeometryConfig) -> usize {
    let height = content_height(config);
    if height <= 0.0 || !text_height.is_finite() || text_height <= 0.0 {
        return 1;
    }

    ((text_height / height).ceil() as usize).max(1)
}
