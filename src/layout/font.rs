//! Font metrics for the reference glyph layout provider

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Width of a tab stop in default advances
const TAB_ADVANCES: f32 = 4.0;

/// Metrics needed for text layout
#[derive(Debug, Clone, PartialEq)]
pub struct FontMetrics {
    /// Line height in points
    pub line_height: f32,
    /// Advance of ASCII characters (0-127)
    pub char_widths: Vec<f32>,
    /// Advance for non-ASCII characters
    pub default_width: f32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        // 12pt text at 1.2 leading with a 7.2pt average advance
        Self::monospace(7.2, 14.4)
    }
}

impl FontMetrics {
    pub fn new(line_height: f32, char_widths: Vec<f32>, default_width: f32) -> Self {
        Self {
            line_height,
            char_widths,
            default_width,
        }
    }

    /// Every character has the same advance
    pub fn monospace(advance: f32, line_height: f32) -> Self {
        Self::new(line_height, vec![advance; 128], advance)
    }

    /// Get width of a character
    pub fn width(&self, c: char) -> f32 {
        if c.is_ascii() {
            if let Some(w) = self.char_widths.get(c as usize) {
                return *w;
            }
        }
        self.default_width
    }

    /// Advance of one grapheme cluster
    pub fn grapheme_width(&self, grapheme: &str) -> f32 {
        if grapheme == "\t" {
            return self.default_width * TAB_ADVANCES;
        }
        if grapheme.chars().all(char::is_control) {
            return 0.0;
        }

        // Combining marks after the base character do not advance
        grapheme
            .chars()
            .next()
            .map_or(0.0, |base| self.width(base))
    }
}

/// Unique identifier for a loaded font
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FontId(pub u32);

/// Library of loaded fonts; `FontId(0)` is always present
#[derive(Debug, Clone)]
pub struct FontLibrary {
    fonts: FxHashMap<FontId, FontMetrics>,
    next_id: u32,
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::with_default(FontMetrics::default())
    }
}

impl FontLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Library whose default font uses the given metrics
    pub fn with_default(metrics: FontMetrics) -> Self {
        let mut fonts = FxHashMap::default();
        fonts.insert(FontId(0), metrics);

        Self { fonts, next_id: 1 }
    }

    /// Add a new font and return its ID
    pub fn add(&mut self, metrics: FontMetrics) -> FontId {
        let id = FontId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.fonts.insert(id, metrics);
        id
    }

    /// Set font metrics for a specific ID
    pub fn set(&mut self, id: FontId, metrics: FontMetrics) {
        self.next_id = self.next_id.max(id.0.saturating_add(1));
        self.fonts.insert(id, metrics);
    }

    pub fn get(&self, id: FontId) -> Option<&FontMetrics> {
        self.fonts.get(&id)
    }

    /// Metrics for `id`, falling back to the default font
    pub fn resolve(&self, id: FontId) -> &FontMetrics {
        self.fonts
            .get(&id)
            .or_else(|| self.fonts.get(&FontId(0)))
            .unwrap_or(&FALLBACK_METRICS)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

static FALLBACK_METRICS: FontMetrics = FontMetrics {
    line_height: 14.4,
    char_widths: Vec::new(),
    default_width: 7.2,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grapheme_width() {
        let metrics = FontMetrics::monospace(8.0, 10.0);
        assert_eq!(metrics.grapheme_width("a"), 8.0);
        assert_eq!(metrics.grapheme_width("e\u{301}"), 8.0);
        assert_eq!(metrics.grapheme_width("\t"), 32.0);
        assert_eq!(metrics.grapheme_width("\n"), 0.0);
        assert_eq!(metrics.grapheme_width("\r\n"), 0.0);
    }

    #[test]
    fn test_library_resolve_falls_back() {
        let mut library = FontLibrary::with_default(FontMetrics::monospace(5.0, 10.0));
        let big = library.add(FontMetrics::monospace(10.0, 20.0));

        assert_eq!(big, FontId(1));
        assert_eq!(library.resolve(big).line_height, 20.0);
        assert_eq!(library.resolve(FontId(42)).line_height, 10.0);
        assert_eq!(library.len(), 2);
    }

    #[test]
    fn test_set_advances_next_id() {
        let mut library = FontLibrary::new();
        library.set(FontId(5), FontMetrics::default());
        assert_eq!(library.add(FontMetrics::default()), FontId(6));
    }

    #[test]
    fn test_set_max_id() {
        let mut library = FontLibrary::new();
        library.set(FontId(u32::MAX), FontMetrics::monospace(3.0, 9.0));
        assert_eq!(library.resolve(FontId(u32::MAX)).line_height, 9.0);
    }
}
