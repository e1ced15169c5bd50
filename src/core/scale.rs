use crate::core::types::{DataPoint, Extent, Viewport};
use crate::error::{PlotError, PlotResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> PlotResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(PlotError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    /// Builds a scale over `[start, end]`, widening a degenerate span by one
    /// unit on each side.
    pub fn covering(start: f64, end: f64) -> PlotResult<Self> {
        if start == end {
            return Self::new(start - 1.0, end + 1.0);
        }
        Self::new(start, end)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn domain_to_pixel(self, value: f64, length_px: f64) -> PlotResult<f64> {
        if !value.is_finite() {
            return Err(PlotError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        Ok(normalized * length_px)
    }

    pub fn pixel_to_domain(self, pixel: f64, length_px: f64) -> PlotResult<f64> {
        if !pixel.is_finite() {
            return Err(PlotError::InvalidData("pixel must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = pixel / length_px;
        Ok(self.domain_start + normalized * span)
    }
}

/// Data-space to pixel-space mapping for one plot area.
///
/// Pixel rows grow downwards, so the y axis is flipped: `y_max` lands on row 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotTransform {
    x_scale: LinearScale,
    y_scale: LinearScale,
    viewport: Viewport,
}

impl PlotTransform {
    pub fn new(extent: Extent, viewport: Viewport) -> PlotResult<Self> {
        if !viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        extent.validate()?;

        Ok(Self {
            x_scale: LinearScale::covering(extent.x_min, extent.x_max)?,
            y_scale: LinearScale::covering(extent.y_min, extent.y_max)?,
            viewport,
        })
    }

    #[must_use]
    pub fn viewport(self) -> Viewport {
        self.viewport
    }

    pub fn data_to_pixel(self, point: DataPoint) -> PlotResult<(f64, f64)> {
        let width = f64::from(self.viewport.width);
        let height = f64::from(self.viewport.height);
        let px = self.x_scale.domain_to_pixel(point.x, width)?;
        let py = height - self.y_scale.domain_to_pixel(point.y, height)?;
        Ok((px, py))
    }

    pub fn pixel_to_data(self, px: f64, py: f64) -> PlotResult<DataPoint> {
        let width = f64::from(self.viewport.width);
        let height = f64::from(self.viewport.height);
        let x = self.x_scale.pixel_to_domain(px, width)?;
        let y = self.y_scale.pixel_to_domain(height - py, height)?;
        Ok(DataPoint::new(x, y))
    }
}
