//! Linear gradient backgrounds.

use serde::{Deserialize, Serialize};
use std::fmt::Write as FmtWrite;

use super::error::{AssetError, Result};
use super::svg::{SvgBuilder, write_num};
use crate::common::xml::escape_xml;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientDirection {
    /// Top-left to bottom-right
    #[default]
    Diagonal,
    /// Top to bottom
    Vertical,
    /// Left to right
    Horizontal,
}

impl GradientDirection {
    /// `(x1, y1, x2, y2)` in percent of the bounding box.
    fn vector(&self) -> (u8, u8, u8, u8) {
        match self {
            Self::Diagonal => (0, 0, 100, 100),
            Self::Vertical => (0, 0, 0, 100),
            Self::Horizontal => (0, 0, 100, 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient vector, 0.0 to 1.0.
    pub offset: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientSpec {
    pub stops: Vec<GradientStop>,
    #[serde(default)]
    pub direction: GradientDirection,
}

impl GradientSpec {
    /// Two-stop gradient from `from` to `to`.
    pub fn linear(from: &str, to: &str, direction: GradientDirection) -> Self {
        Self {
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: from.to_string(),
                },
                GradientStop {
                    offset: 1.0,
                    color: to.to_string(),
                },
            ],
            direction,
        }
    }

    /// Purple title-slide background.
    pub fn cover() -> Self {
        Self::linear("#667eea", "#764ba2", GradientDirection::Diagonal)
    }

    /// Vertical band for the left edge of content slides.
    pub fn sidebar() -> Self {
        Self::linear("#764ba2", "#667eea", GradientDirection::Vertical)
    }

    pub fn validate(&self) -> Result<()> {
        if self.stops.len() < 2 {
            return Err(AssetError::InvalidSpec(format!(
                "gradient needs at least two stops, got {}",
                self.stops.len()
            )));
        }
        let ordered = self.stops.windows(2).all(|w| w[0].offset <= w[1].offset);
        if !ordered || self.stops.iter().any(|s| !(0.0..=1.0).contains(&s.offset)) {
            return Err(AssetError::InvalidSpec(
                "gradient stop offsets must be ascending within 0..=1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn svg(&self, width: f64, height: f64) -> String {
        let (x1, y1, x2, y2) = self.direction.vector();
        let mut defs = String::with_capacity(256);
        let _ = write!(
            defs,
            r#"<defs><linearGradient id="g" x1="{x1}%" y1="{y1}%" x2="{x2}%" y2="{y2}%">"#
        );
        for stop in &self.stops {
            defs.push_str(r#"<stop offset=""#);
            write_num(&mut defs, stop.offset * 100.0);
            let _ = write!(defs, r#"%" stop-color="{}"/>"#, escape_xml(&stop.color));
        }
        defs.push_str("</linearGradient></defs>");

        let mut svg = SvgBuilder::new(width, height);
        svg.raw(&defs).background("url(#g)");
        svg.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_svg() {
        let svg = GradientSpec::cover().svg(1000.0, 562.5);
        assert!(svg.contains(r#"width="1000" height="562.5""#));
        assert!(svg.contains(r#"x1="0%" y1="0%" x2="100%" y2="100%""#));
        assert!(svg.contains(r##"<stop offset="0%" stop-color="#667eea"/>"##));
        assert!(svg.contains(r##"<stop offset="100%" stop-color="#764ba2"/>"##));
        assert!(svg.contains(r##"fill="url(#g)""##));
    }

    #[test]
    fn test_sidebar_is_vertical() {
        let svg = GradientSpec::sidebar().svg(200.0, 562.5);
        assert!(svg.contains(r#"x1="0%" y1="0%" x2="0%" y2="100%""#));
    }

    #[test]
    fn test_validate() {
        assert!(GradientSpec::cover().validate().is_ok());
        let single = GradientSpec {
            stops: vec![GradientStop {
                offset: 0.0,
                color: "#000000".to_string(),
            }],
            direction: GradientDirection::Horizontal,
        };
        assert!(matches!(single.validate(), Err(AssetError::InvalidSpec(_))));
    }
}
