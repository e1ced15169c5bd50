use serde::{Deserialize, Serialize};

use crate::core::{ColorMapping, ColormapSpec, NormalizationMethod, Statistic};
use crate::error::{PlotError, PlotResult};

pub(crate) const DEFAULT_MARKER_SIZE: f64 = 50.0;

/// Marker area, either shared by every point or given per point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarkerSize {
    Uniform(f64),
    PerPoint(Vec<f64>),
}

impl Default for MarkerSize {
    fn default() -> Self {
        Self::Uniform(default_marker_size())
    }
}

impl MarkerSize {
    pub fn validate(&self) -> PlotResult<()> {
        let valid = |size: &f64| size.is_finite() && *size >= 0.0;
        let ok = match self {
            Self::Uniform(size) => valid(size),
            Self::PerPoint(sizes) => sizes.iter().all(valid),
        };
        if !ok {
            return Err(PlotError::InvalidData(
                "marker sizes must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expands to one size per point.
    pub fn resolve(&self, len: usize) -> PlotResult<Vec<f64>> {
        match self {
            Self::Uniform(size) => Ok(vec![*size; len]),
            Self::PerPoint(sizes) => {
                if sizes.len() != len {
                    return Err(PlotError::ShapeMismatch {
                        expected: len,
                        actual: sizes.len(),
                    });
                }
                Ok(sizes.clone())
            }
        }
    }
}

impl From<f64> for MarkerSize {
    fn from(size: f64) -> Self {
        Self::Uniform(size)
    }
}

impl From<Vec<f64>> for MarkerSize {
    fn from(sizes: Vec<f64>) -> Self {
        Self::PerPoint(sizes)
    }
}

/// Construction-time settings of a `Scatter`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterConfig {
    #[serde(default = "default_scatter_colormap")]
    pub overlay_colormap: ColormapSpec,
    #[serde(default)]
    pub color_normalization_method: NormalizationMethod,
    #[serde(default)]
    pub marker_size: MarkerSize,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            overlay_colormap: default_scatter_colormap(),
            color_normalization_method: NormalizationMethod::default(),
            marker_size: MarkerSize::default(),
        }
    }
}

impl ScatterConfig {
    #[must_use]
    pub fn with_overlay_colormap(mut self, colormap: ColormapSpec) -> Self {
        self.overlay_colormap = colormap;
        self
    }

    #[must_use]
    pub fn with_color_normalization_method(mut self, method: NormalizationMethod) -> Self {
        self.color_normalization_method = method;
        self
    }

    #[must_use]
    pub fn with_marker_size(mut self, size: impl Into<MarkerSize>) -> Self {
        self.marker_size = size.into();
        self
    }

    /// Checks the settings without touching any canvas.
    pub fn validate(&self) -> PlotResult<()> {
        ColorMapping::try_from(&self.overlay_colormap)?;
        self.marker_size.validate()
    }
}

/// Construction-time settings of a `Histogram2D`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram2DConfig {
    #[serde(default = "default_bins")]
    pub bins: usize,
    #[serde(default = "default_histogram_colormap")]
    pub histogram_colormap: ColormapSpec,
    #[serde(default = "default_histogram_overlay_colormap")]
    pub overlay_colormap: ColormapSpec,
    #[serde(default)]
    pub histogram_normalization_method: NormalizationMethod,
    #[serde(default)]
    pub overlay_normalization_method: NormalizationMethod,
    #[serde(default = "default_overlay_opacity")]
    pub overlay_opacity: f64,
    #[serde(default = "default_overlay_visible")]
    pub overlay_visible: bool,
    #[serde(default = "default_interpolation")]
    pub histogram_interpolation: String,
    #[serde(default = "default_interpolation")]
    pub overlay_interpolation: String,
    #[serde(default)]
    pub overlay_statistic: Statistic,
}

impl Default for Histogram2DConfig {
    fn default() -> Self {
        Self {
            bins: default_bins(),
            histogram_colormap: default_histogram_colormap(),
            overlay_colormap: default_histogram_overlay_colormap(),
            histogram_normalization_method: NormalizationMethod::default(),
            overlay_normalization_method: NormalizationMethod::default(),
            overlay_opacity: default_overlay_opacity(),
            overlay_visible: default_overlay_visible(),
            histogram_interpolation: default_interpolation(),
            overlay_interpolation: default_interpolation(),
            overlay_statistic: Statistic::default(),
        }
    }
}

impl Histogram2DConfig {
    #[must_use]
    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }

    #[must_use]
    pub fn with_histogram_colormap(mut self, colormap: ColormapSpec) -> Self {
        self.histogram_colormap = colormap;
        self
    }

    #[must_use]
    pub fn with_overlay_colormap(mut self, colormap: ColormapSpec) -> Self {
        self.overlay_colormap = colormap;
        self
    }

    #[must_use]
    pub fn with_histogram_normalization_method(mut self, method: NormalizationMethod) -> Self {
        self.histogram_normalization_method = method;
        self
    }

    #[must_use]
    pub fn with_overlay_normalization_method(mut self, method: NormalizationMethod) -> Self {
        self.overlay_normalization_method = method;
        self
    }

    #[must_use]
    pub fn with_overlay_opacity(mut self, opacity: f64) -> Self {
        self.overlay_opacity = opacity;
        self
    }

    #[must_use]
    pub fn with_overlay_visible(mut self, visible: bool) -> Self {
        self.overlay_visible = visible;
        self
    }

    #[must_use]
    pub fn with_interpolation(
        mut self,
        histogram: impl Into<String>,
        overlay: impl Into<String>,
    ) -> Self {
        self.histogram_interpolation = histogram.into();
        self.overlay_interpolation = overlay.into();
        self
    }

    #[must_use]
    pub fn with_overlay_statistic(mut self, statistic: Statistic) -> Self {
        self.overlay_statistic = statistic;
        self
    }

    pub fn validate(&self) -> PlotResult<()> {
        validate_bins(self.bins)?;
        validate_opacity(self.overlay_opacity)?;
        ColorMapping::try_from(&self.histogram_colormap)?;
        ColorMapping::try_from(&self.overlay_colormap)?;
        Ok(())
    }
}

pub(crate) fn validate_bins(bins: usize) -> PlotResult<()> {
    if bins == 0 {
        return Err(PlotError::InvalidData(
            "histogram bin count must be > 0".to_owned(),
        ));
    }
    Ok(())
}

pub(crate) fn validate_opacity(opacity: f64) -> PlotResult<()> {
    if !opacity.is_finite() || !(0.0..=1.0).contains(&opacity) {
        return Err(PlotError::InvalidData(
            "overlay opacity must be finite and in [0, 1]".to_owned(),
        ));
    }
    Ok(())
}

fn default_marker_size() -> f64 {
    DEFAULT_MARKER_SIZE
}

fn default_scatter_colormap() -> ColormapSpec {
    ColormapSpec::named("cat10_mod")
}

fn default_bins() -> usize {
    20
}

fn default_histogram_colormap() -> ColormapSpec {
    ColormapSpec::named("magma")
}

fn default_histogram_overlay_colormap() -> ColormapSpec {
    ColormapSpec::named("cat10_mod_first_transparent")
}

fn default_overlay_opacity() -> f64 {
    1.0
}

fn default_overlay_visible() -> bool {
    true
}

fn default_interpolation() -> String {
    "nearest".to_owned()
}
