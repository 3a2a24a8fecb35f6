//! Glyph layout provider interface

use crate::text::AttributedText;
use crate::Rect;

/// Result of measuring one page worth of text
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Measurement {
    /// Characters whose lines fit in the container
    pub characters: usize,
    /// Glyphs produced for those characters
    pub glyphs: usize,
    /// Bounding box of the consumed lines, relative to the container origin
    pub used_rect: Rect,
}

/// Text measurement oracle used by the text flow engine.
///
/// Implementations own line breaking, font metrics and shaping. The engine
/// calls `measure` once per page and keeps no state between calls.
pub trait GlyphLayoutProvider {
    /// Lay out `text` starting at character `start` in a container
    /// `max_width` wide and report how much fits within `max_height`.
    ///
    /// Only whole lines count. Returning zero characters is allowed when the
    /// first line is taller than `max_height`.
    fn measure(
        &self,
        text: &AttributedText,
        start: usize,
        max_width: f32,
        max_height: f32,
    ) -> Measurement;
}

impl<P: GlyphLayoutProvider + ?Sized> GlyphLayoutProvider for &P {
    fn measure(
        &self,
        text: &AttributedText,
        start: usize,
        max_width: f32,
        max_height: f32,
    ) -> Measurement {
        (**self).measure(text, start, max_width, max_height)
    }
}

impl<P: GlyphLayoutProvider + ?Sized> GlyphLayoutProvider for Box<P> {
    fn measure(
        &self,
        text: &AttributedText,
        start: usize,
        max_width: f32,
        max_height: f32,
    ) -> Measurement {
        (**self).measure(text, start, max_width, max_height)
    }
}
