use serde::{Deserialize, Serialize};

use crate::core::{DataPoint, Extent};
use crate::error::{PlotError, PlotResult};
use crate::render::{CanvasLayer, RgbaImage};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    /// Rendered for undefined values (NaN tags, empty overlay bins).
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Parses `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> PlotResult<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 && digits.len() != 8 {
            return Err(PlotError::InvalidData(format!(
                "color `{hex}` must be #rrggbb or #rrggbbaa"
            )));
        }
        let channel = |offset: usize| -> PlotResult<f64> {
            digits
                .get(offset..offset + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .map(|value| f64::from(value) / 255.0)
                .ok_or_else(|| PlotError::InvalidData(format!("color `{hex}` is not valid hex")))
        };
        let alpha = if digits.len() == 8 { channel(6)? } else { 1.0 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
    }

    /// Linear interpolation towards `other`, `t` in `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let mix = |from: f64, to: f64| from + (to - from) * t;
        Self::rgba(
            mix(self.red, other.red),
            mix(self.green, other.green),
            mix(self.blue, other.blue),
            mix(self.alpha, other.alpha),
        )
    }

    #[must_use]
    pub fn is_transparent(self) -> bool {
        self.alpha == 0.0
    }

    pub fn validate(self) -> PlotResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(PlotError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Opaque identifier of an item drawn on a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CanvasHandle(pub u64);

/// Draw command for a set of round markers in data space.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSetPrimitive {
    pub points: Vec<DataPoint>,
    pub colors: Vec<Color>,
    /// Marker areas in squared points, one per point.
    pub sizes: Vec<f64>,
    pub visible: bool,
}

impl PointSetPrimitive {
    pub fn validate(&self) -> PlotResult<()> {
        let expected = self.points.len();
        for actual in [self.colors.len(), self.sizes.len()] {
            if actual != expected {
                return Err(PlotError::ShapeMismatch { expected, actual });
            }
        }
        if self
            .sizes
            .iter()
            .any(|size| !size.is_finite() || *size < 0.0)
        {
            return Err(PlotError::InvalidData(
                "marker sizes must be finite and >= 0".to_owned(),
            ));
        }
        for color in &self.colors {
            color.validate()?;
        }
        Ok(())
    }
}

/// Draw command for an RGBA raster stretched over a data-space extent.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePrimitive {
    pub image: RgbaImage,
    pub extent: Extent,
    pub layer: CanvasLayer,
    /// Resampling hint passed through to the backend (for example `nearest`).
    pub interpolation: String,
    pub alpha: f64,
    pub visible: bool,
}

impl ImagePrimitive {
    pub fn validate(&self) -> PlotResult<()> {
        self.extent.validate()?;
        if !self.alpha.is_finite() || !(0.0..=1.0).contains(&self.alpha) {
            return Err(PlotError::InvalidData(
                "image alpha must be finite and in [0, 1]".to_owned(),
            ));
        }
        self.image.validate()
    }
}
