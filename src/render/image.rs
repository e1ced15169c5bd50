use crate::error::{PlotError, PlotResult};
use crate::render::Color;

/// Row-major RGBA raster. Row 0 is the bottom row (lowest y), matching a
/// lower-left image origin; column 0 is the lowest x.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbaImage {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl RgbaImage {
    #[must_use]
    pub fn transparent(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; width * height],
        }
    }

    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Color>) -> PlotResult<Self> {
        if pixels.len() != width * height {
            return Err(PlotError::ShapeMismatch {
                expected: width * height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(rows, columns, channels)`, the shape of the equivalent RGBA array.
    #[must_use]
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height, self.width, 4)
    }

    #[must_use]
    pub fn pixel(&self, row: usize, column: usize) -> Option<Color> {
        if row >= self.height || column >= self.width {
            return None;
        }
        self.pixels.get(row * self.width + column).copied()
    }

    #[must_use]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn validate(&self) -> PlotResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PlotError::InvalidData(
                "image must have at least one pixel".to_owned(),
            ));
        }
        for pixel in &self.pixels {
            pixel.validate()?;
        }
        Ok(())
    }
}
