//! Page geometry configuration

use crate::error::{PageflowError, Result};
use crate::geometry::paper::PaperSize;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default margin: one inch
pub const DEFAULT_MARGIN: f32 = 72.0;

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Page margins in points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Margins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(DEFAULT_MARGIN)
    }
}

impl Margins {
    pub fn new(top: f32, bottom: f32, left: f32, right: f32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn zero() -> Self {
        Self::uniform(0.0)
    }

    /// Margins with negative (or NaN) values replaced by zero
    pub fn clamped(&self) -> Self {
        Self {
            top: non_negative(self.top),
            bottom: non_negative(self.bottom),
            left: non_negative(self.left),
            right: non_negative(self.right),
        }
    }
}

/// User-facing measurement unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MeasurementUnit {
    #[default]
    Points,
    Inches,
    Centimeters,
    Millimeters,
}

impl MeasurementUnit {
    /// Number of points in one unit
    pub fn points_per_unit(&self) -> f32 {
        match self {
            MeasurementUnit::Points => 1.0,
            MeasurementUnit::Inches => 72.0,
            MeasurementUnit::Centimeters => 72.0 / 2.54,
            MeasurementUnit::Millimeters => 72.0 / 25.4,
        }
    }
}

impl FromStr for MeasurementUnit {
    type Err = PageflowError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pt" | "points" => Ok(MeasurementUnit::Points),
            "in" | "inches" => Ok(MeasurementUnit::Inches),
            "cm" | "centimeters" => Ok(MeasurementUnit::Centimeters),
            "mm" | "millimeters" => Ok(MeasurementUnit::Millimeters),
            _ => Err(PageflowError::UnknownUnit(s.to_string())),
        }
    }
}

/// Full set of page parameters for one pagination pass.
///
/// All lengths are in points. `unit_scale` is the number of points per
/// user-facing unit and is only used to convert values for display; the
/// geometry math never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageGeometryConfig {
    pub paper: PaperSize,
    pub orientation: Orientation,
    pub margins: Margins,
    pub header_enabled: bool,
    pub header_depth: f32,
    pub footer_enabled: bool,
    pub footer_depth: f32,
    pub facing_pages: bool,
    pub unit_scale: f32,
}

impl Default for PageGeometryConfig {
    fn default() -> Self {
        Self::new(PaperSize::Letter, Orientation::Portrait)
    }
}

impl PageGeometryConfig {
    pub fn new(paper: PaperSize, orientation: Orientation) -> Self {
        Self {
            paper,
            orientation,
            margins: Margins::default(),
            header_enabled: false,
            header_depth: 0.0,
            footer_enabled: false,
            footer_depth: 0.0,
            facing_pages: false,
            unit_scale: MeasurementUnit::Points.points_per_unit(),
        }
    }

    /// US Letter, portrait, one-inch margins
    pub fn letter() -> Self {
        Self::new(PaperSize::Letter, Orientation::Portrait)
    }

    /// ISO A4, portrait, one-inch margins
    pub fn a4() -> Self {
        Self::new(PaperSize::A4, Orientation::Portrait)
    }

    /// Load a configuration from JSON, clamping negative lengths
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.normalized())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_uniform_margins(self, value: f32) -> Self {
        self.with_margins(Margins::uniform(value))
    }

    pub fn with_header(mut self, depth: f32) -> Self {
        self.header_enabled = true;
        self.header_depth = depth;
        self
    }

    pub fn with_footer(mut self, depth: f32) -> Self {
        self.footer_enabled = true;
        self.footer_depth = depth;
        self
    }

    pub fn with_facing_pages(mut self, facing_pages: bool) -> Self {
        self.facing_pages = facing_pages;
        self
    }

    pub fn with_unit(mut self, unit: MeasurementUnit) -> Self {
        self.unit_scale = unit.points_per_unit();
        self
    }

    /// Copy with negative lengths clamped to zero and a usable unit scale
    pub fn normalized(&self) -> Self {
        let unit_scale = if self.unit_scale.is_finite() && self.unit_scale > 0.0 {
            self.unit_scale
        } else {
            MeasurementUnit::Points.points_per_unit()
        };

        Self {
            margins: self.margins.clamped(),
            header_depth: non_negative(self.header_depth),
            footer_depth: non_negative(self.footer_depth),
            unit_scale,
            ..*self
        }
    }

    /// Convert a length in points to user units
    pub fn to_user_units(&self, points: f32) -> f32 {
        points / self.normalized().unit_scale
    }

    /// Convert a length in user units to points
    pub fn from_user_units(&self, value: f32) -> f32 {
        value * self.normalized().unit_scale
    }
}

pub(crate) fn non_negative(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PageGeometryConfig::default();
        assert_eq!(config.paper, PaperSize::Letter);
        assert_eq!(config.orientation, Orientation::Portrait);
        assert_eq!(config.margins, Margins::uniform(72.0));
        assert!(!config.header_enabled);
        assert!(!config.footer_enabled);
        assert_eq!(config.unit_scale, 1.0);
    }

    #[test]
    fn test_normalized_clamps_negative_lengths() {
        let config = PageGeometryConfig::letter()
            .with_margins(Margins::new(-5.0, 10.0, f32::NAN, 3.0))
            .with_header(-12.0);

        let normalized = config.normalized();
        assert_eq!(normalized.margins, Margins::new(0.0, 10.0, 0.0, 3.0));
        assert_eq!(normalized.header_depth, 0.0);
        assert!(normalized.header_enabled);
    }

    #[test]
    fn test_user_unit_round_trip() {
        let config = PageGeometryConfig::letter().with_unit(MeasurementUnit::Inches);
        assert_eq!(config.to_user_units(612.0), 8.5);
        assert_eq!(config.from_user_units(11.0), 792.0);
    }

    #[test]
    fn test_unit_parse() {
        assert_eq!("cm".parse::<MeasurementUnit>().unwrap(), MeasurementUnit::Centimeters);
        assert_eq!("Inches".parse::<MeasurementUnit>().unwrap(), MeasurementUnit::Inches);
        assert!("furlong".parse::<MeasurementUnit>().is_err());
    }

    #[test]
    fn test_from_json_partial() {
        let config = PageGeometryConfig::from_json(
            r#"{"paper":"a4","orientation":"landscape","headerEnabled":true,"headerDepth":-4}"#,
        )
        .unwrap();

        assert_eq!(config.paper, PaperSize::A4);
        assert_eq!(config.orientation, Orientation::Landscape);
        assert_eq!(config.margins, Margins::default());
        assert_eq!(config.header_depth, 0.0);
    }

    #[test]
    fn test_from_json_custom_paper() {
        let config = PageGeometryConfig::from_json(
            r#"{"paper":{"custom":{"width":300,"height":400}},"margins":{"top":0,"bottom":0,"left":0,"right":0}}"#,
        )
        .unwrap();

        assert_eq!(
            config.paper,
            PaperSize::Custom {
                width: 300.0,
                height: 400.0
            }
        );
        assert_eq!(config.margins, Margins::zero());
    }

    #[test]
    fn test_json_round_trip() {
        let config = PageGeometryConfig::a4().with_footer(18.0).with_facing_pages(true);
        let json = config.to_json().unwrap();
        assert_eq!(PageGeometryConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            PageGeometryConfig::from_json("{"),
            Err(PageflowError::InvalidConfig(_))
        ));
    }
}
