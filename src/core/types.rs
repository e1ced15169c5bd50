use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

/// Pixel size of the surface a scene is painted onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// One 2D sample of the plotted feature space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for DataPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for DataPoint {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// Collects coordinate pairs into the point representation used by artists.
#[must_use]
pub fn points_from_pairs<P: Into<DataPoint>>(pairs: impl IntoIterator<Item = P>) -> Vec<DataPoint> {
    pairs.into_iter().map(Into::into).collect()
}

/// Axis-aligned data-space rectangle, `[x_min, x_max] x [y_min, y_max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Extent {
    #[must_use]
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Bounding box of all finite points, or `None` when there are none.
    #[must_use]
    pub fn from_points(points: &[DataPoint]) -> Option<Self> {
        let mut finite = points.iter().copied().filter(|point| point.is_finite());
        let first = finite.next()?;
        let mut extent = Self::new(first.x, first.x, first.y, first.y);
        for point in finite {
            extent.x_min = extent.x_min.min(point.x);
            extent.x_max = extent.x_max.max(point.x);
            extent.y_min = extent.y_min.min(point.y);
            extent.y_max = extent.y_max.max(point.y);
        }
        Some(extent)
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            x_min: self.x_min.min(other.x_min),
            x_max: self.x_max.max(other.x_max),
            y_min: self.y_min.min(other.y_min),
            y_max: self.y_max.max(other.y_max),
        }
    }

    pub fn validate(self) -> PlotResult<()> {
        for value in [self.x_min, self.x_max, self.y_min, self.y_max] {
            if !value.is_finite() {
                return Err(PlotError::InvalidData(
                    "extent bounds must be finite".to_owned(),
                ));
            }
        }
        if self.x_min > self.x_max || self.y_min > self.y_max {
            return Err(PlotError::InvalidData(
                "extent minimum must not exceed maximum".to_owned(),
            ));
        }
        Ok(())
    }
}
