use serde::{Deserialize, Serialize};

/// Stacking slot of a canvas item; higher slots paint above lower ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanvasLayer {
    HistogramCounts,
    HistogramOverlay,
    Points,
}

impl CanvasLayer {
    /// Layers in paint order, bottom first.
    pub const ORDERED: [Self; 3] = [Self::HistogramCounts, Self::HistogramOverlay, Self::Points];

    #[must_use]
    pub fn z_order(self) -> i32 {
        match self {
            Self::HistogramCounts => 1,
            Self::HistogramOverlay => 2,
            Self::Points => 3,
        }
    }
}
