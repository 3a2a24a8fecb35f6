//! Named paper sizes in points

use crate::error::{PageflowError, Result};
use crate::Size;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A paper size, either a well-known name or explicit dimensions
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaperSize {
    #[default]
    Letter,
    Legal,
    Tabloid,
    Executive,
    A3,
    A4,
    A5,
    B5,
    Custom { width: f32, height: f32 },
}

/// Regions that default to US paper sizes
const LETTER_REGIONS: &[&str] = &["US", "CA", "MX", "PH", "CL", "CO", "VE", "PR"];

impl PaperSize {
    /// Portrait dimensions in points
    pub fn dimensions(&self) -> Size {
        let (width, height) = match *self {
            PaperSize::Letter => (612.0, 792.0),
            PaperSize::Legal => (612.0, 1008.0),
            PaperSize::Tabloid => (792.0, 1224.0),
            PaperSize::Executive => (522.0, 756.0),
            PaperSize::A3 => (841.89, 1190.55),
            PaperSize::A4 => (595.28, 841.89),
            PaperSize::A5 => (419.53, 595.28),
            PaperSize::B5 => (498.9, 708.66),
            PaperSize::Custom { width, height } => (width, height),
        };

        Size::new(width.max(0.0), height.max(0.0))
    }

    /// Look up a named paper size, case-insensitively
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "letter" | "us letter" => Ok(PaperSize::Letter),
            "legal" | "us legal" => Ok(PaperSize::Legal),
            "tabloid" | "ledger" => Ok(PaperSize::Tabloid),
            "executive" => Ok(PaperSize::Executive),
            "a3" => Ok(PaperSize::A3),
            "a4" => Ok(PaperSize::A4),
            "a5" => Ok(PaperSize::A5),
            "b5" => Ok(PaperSize::B5),
            _ => Err(PageflowError::UnknownPaper(name.to_string())),
        }
    }

    /// Region-appropriate default for a locale such as `en_US` or `de-DE`
    pub fn region_default(locale: &str) -> Self {
        let region = locale
            .rsplit(|c| c == '_' || c == '-')
            .next()
            .unwrap_or_default()
            .to_ascii_uppercase();

        if LETTER_REGIONS.contains(&region.as_str()) {
            PaperSize::Letter
        } else {
            PaperSize::A4
        }
    }

    /// Display name, `None` for custom sizes
    pub fn name(&self) -> Option<&'static str> {
        match self {
            PaperSize::Letter => Some("Letter"),
            PaperSize::Legal => Some("Legal"),
            PaperSize::Tabloid => Some("Tabloid"),
            PaperSize::Executive => Some("Executive"),
            PaperSize::A3 => Some("A3"),
            PaperSize::A4 => Some("A4"),
            PaperSize::A5 => Some("A5"),
            PaperSize::B5 => Some("B5"),
            PaperSize::Custom { .. } => None,
        }
    }
}

impl FromStr for PaperSize {
    type Err = PageflowError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_dimensions() {
        let size = PaperSize::Letter.dimensions();
        assert_eq!(size.width, 612.0);
        assert_eq!(size.height, 792.0);
    }

    #[test]
    fn test_default_is_letter() {
        assert_eq!(PaperSize::default(), PaperSize::Letter);
    }

    #[test]
    fn test_custom_clamps_negative() {
        let size = PaperSize::Custom {
            width: -10.0,
            height: 300.0,
        }
        .dimensions();
        assert_eq!(size.width, 0.0);
        assert_eq!(size.height, 300.0);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(PaperSize::from_name("a4").unwrap(), PaperSize::A4);
        assert_eq!(PaperSize::from_name(" Letter ").unwrap(), PaperSize::Letter);
        assert_eq!("ledger".parse::<PaperSize>().unwrap(), PaperSize::Tabloid);
        assert!(matches!(
            PaperSize::from_name("folio"),
            Err(PageflowError::UnknownPaper(_))
        ));
    }

    #[test]
    fn test_region_default() {
        assert_eq!(PaperSize::region_default("en_US"), PaperSize::Letter);
        assert_eq!(PaperSize::region_default("fr-CA"), PaperSize::Letter);
        assert_eq!(PaperSize::region_default("de_DE"), PaperSize::A4);
        assert_eq!(PaperSize::region_default(""), PaperSize::A4);
    }
}
