//! Selection tools that keep their own copy of the plotted points and report
//! which of them fall inside a user-drawn shape.

mod shape_selector;

pub use shape_selector::{SelectionShape, ShapeSelector};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::DataPoint;
use crate::error::PlotResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorType {
    Lasso,
    Ellipse,
    Rectangle,
}

impl SelectorType {
    pub const ALL: [Self; 3] = [Self::Lasso, Self::Ellipse, Self::Rectangle];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lasso => "lasso",
            Self::Ellipse => "ellipse",
            Self::Rectangle => "rectangle",
        }
    }
}

impl fmt::Display for SelectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Narrow interface the orchestration layer needs from a selection tool.
pub trait Selector {
    fn kind(&self) -> SelectorType;

    /// Replaces the synchronized point copy and re-evaluates the current shape.
    fn update_data(&mut self, points: &[DataPoint]);

    /// Applies a finished shape and returns the selected indices.
    fn select(&mut self, shape: SelectionShape) -> PlotResult<&[usize]>;

    /// Ascending indices of the points inside the current shape.
    fn selected_indices(&self) -> &[usize];

    fn clear_selection(&mut self);

    fn is_enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);
}
