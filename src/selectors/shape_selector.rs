use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::DataPoint;
use crate::error::{PlotError, PlotResult};
use crate::selectors::{Selector, SelectorType};

/// Region drawn by the user, in data coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionShape {
    /// Axis-aligned box; corners may be given in any order.
    Rectangle { corner_a: DataPoint, corner_b: DataPoint },
    /// Axis-aligned ellipse.
    Ellipse {
        center: DataPoint,
        radius_x: f64,
        radius_y: f64,
    },
    /// Closed polygon through `vertices`.
    Lasso { vertices: Vec<DataPoint> },
}

impl SelectionShape {
    #[must_use]
    pub fn selector_type(&self) -> SelectorType {
        match self {
            Self::Rectangle { .. } => SelectorType::Rectangle,
            Self::Ellipse { .. } => SelectorType::Ellipse,
            Self::Lasso { .. } => SelectorType::Lasso,
        }
    }

    pub fn validate(&self) -> PlotResult<()> {
        match self {
            Self::Rectangle { corner_a, corner_b } => {
                if !corner_a.is_finite() || !corner_b.is_finite() {
                    return Err(PlotError::InvalidData(
                        "rectangle corners must be finite".to_owned(),
                    ));
                }
            }
            Self::Ellipse {
                center,
                radius_x,
                radius_y,
            } => {
                let radius_ok = |radius: f64| radius.is_finite() && radius > 0.0;
                if !center.is_finite() || !radius_ok(*radius_x) || !radius_ok(*radius_y) {
                    return Err(PlotError::InvalidData(
                        "ellipse needs a finite center and radii > 0".to_owned(),
                    ));
                }
            }
            Self::Lasso { vertices } => {
                if vertices.len() < 3 || vertices.iter().any(|vertex| !vertex.is_finite()) {
                    return Err(PlotError::InvalidData(
                        "lasso needs at least three finite vertices".to_owned(),
                    ));
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, point: DataPoint) -> bool {
        if !point.is_finite() {
            return false;
        }
        match self {
            Self::Rectangle { corner_a, corner_b } => {
                let (x_min, x_max) = ordered(corner_a.x, corner_b.x);
                let (y_min, y_max) = ordered(corner_a.y, corner_b.y);
                (x_min..=x_max).contains(&point.x) && (y_min..=y_max).contains(&point.y)
            }
            Self::Ellipse {
                center,
                radius_x,
                radius_y,
            } => {
                let dx = (point.x - center.x) / radius_x;
                let dy = (point.y - center.y) / radius_y;
                dx * dx + dy * dy <= 1.0
            }
            Self::Lasso { vertices } => polygon_contains(vertices, point),
        }
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Even-odd rule: count crossings of a ray cast towards +x.
fn polygon_contains(vertices: &[DataPoint], point: DataPoint) -> bool {
    let mut inside = false;
    let mut previous = vertices[vertices.len() - 1];
    for &current in vertices {
        if (current.y > point.y) != (previous.y > point.y) {
            let crossing_x = current.x
                + (point.y - current.y) * (previous.x - current.x) / (previous.y - current.y);
            if point.x < crossing_x {
                inside = !inside;
            }
        }
        previous = current;
    }
    inside
}

/// Selector driven by a single shape kind.
#[derive(Debug, Clone)]
pub struct ShapeSelector {
    kind: SelectorType,
    enabled: bool,
    points: Vec<DataPoint>,
    shape: Option<SelectionShape>,
    selected: Vec<usize>,
}

impl ShapeSelector {
    #[must_use]
    pub fn new(kind: SelectorType) -> Self {
        Self {
            kind,
            enabled: false,
            points: Vec::new(),
            shape: None,
            selected: Vec::new(),
        }
    }

    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    #[must_use]
    pub fn shape(&self) -> Option<&SelectionShape> {
        self.shape.as_ref()
    }

    fn reselect(&mut self) {
        self.selected = match &self.shape {
            Some(shape) => self
                .points
                .iter()
                .enumerate()
                .filter(|(_, point)| shape.contains(**point))
                .map(|(index, _)| index)
                .collect(),
            None => Vec::new(),
        };
        trace!(selector = %self.kind, selected = self.selected.len(), "selection updated");
    }
}

impl Selector for ShapeSelector {
    fn kind(&self) -> SelectorType {
        self.kind
    }

    fn update_data(&mut self, points: &[DataPoint]) {
        self.points = points.to_vec();
        self.reselect();
    }

    /// Fails when the selector is disabled or the shape kind differs from the
    /// selector kind.
    fn select(&mut self, shape: SelectionShape) -> PlotResult<&[usize]> {
        if !self.enabled {
            return Err(PlotError::InvalidData(format!(
                "{} selector is not enabled",
                self.kind
            )));
        }
        if shape.selector_type() != self.kind {
            return Err(PlotError::InvalidData(format!(
                "{} shape given to {} selector",
                shape.selector_type(),
                self.kind
            )));
        }
        shape.validate()?;
        self.shape = Some(shape);
        self.reselect();
        Ok(&self.selected)
    }

    fn selected_indices(&self) -> &[usize] {
        &self.selected
    }

    fn clear_selection(&mut self) {
        self.shape = None;
        self.selected.clear();
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.clear_selection();
        }
    }
}
