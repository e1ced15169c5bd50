//! Pure data and math: points, palettes, normalization, binning and
//! per-bin aggregation. Nothing in here touches a canvas.

pub mod color_indices;
pub mod coloring;
pub mod colormap;
pub mod histogram;
pub mod normalization;
pub mod scale;
pub mod statistic;
pub mod types;

pub use color_indices::{ColorIndexUpdate, ColorIndices, ColorValue};
pub use coloring::{ColorWarning, ColoringOutcome, ColormapTarget, map_values_to_colors};
pub use colormap::{ColorMapping, ColormapSpec, DEFAULT_LUT_SIZE};
pub use histogram::{BinIndex, Grid, HistogramGrid};
pub use normalization::{
    LOG_MIN_VALUE, LogFloor, NormalizationMethod, Normalizer, SYMLOG_LINEAR_THRESHOLD,
    apply_log_floor,
};
pub use scale::{LinearScale, PlotTransform};
pub use statistic::{Statistic, statistic_grid};
pub use types::{DataPoint, Extent, Viewport, points_from_pairs};
