use serde::{Deserialize, Serialize};

use crate::artists::{Histogram2DConfig, ScatterConfig};
use crate::core::{ColorMapping, ColormapSpec};
use crate::error::{PlotError, PlotResult};

/// Bootstrap configuration of a `CanvasWidget`.
///
/// Palettes are passed explicitly here instead of living in a shared global
/// default, so two widgets never influence each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasWidgetConfig {
    #[serde(default = "default_scatter_config")]
    pub scatter: ScatterConfig,
    #[serde(default)]
    pub histogram: Histogram2DConfig,
    /// Palette of the class tags assigned by selections.
    #[serde(default = "default_class_colormap")]
    pub class_colormap: ColormapSpec,
    #[serde(default = "default_initial_class")]
    pub initial_class: i64,
}

impl Default for CanvasWidgetConfig {
    fn default() -> Self {
        Self {
            scatter: default_scatter_config(),
            histogram: Histogram2DConfig::default(),
            class_colormap: default_class_colormap(),
            initial_class: default_initial_class(),
        }
    }
}

impl CanvasWidgetConfig {
    #[must_use]
    pub fn with_scatter(mut self, scatter: ScatterConfig) -> Self {
        self.scatter = scatter;
        self
    }

    #[must_use]
    pub fn with_histogram(mut self, histogram: Histogram2DConfig) -> Self {
        self.histogram = histogram;
        self
    }

    #[must_use]
    pub fn with_class_colormap(mut self, colormap: ColormapSpec) -> Self {
        self.class_colormap = colormap;
        self
    }

    #[must_use]
    pub fn with_initial_class(mut self, class: i64) -> Self {
        self.initial_class = class;
        self
    }

    pub fn validate(&self) -> PlotResult<()> {
        self.scatter.validate()?;
        self.histogram.validate()?;
        let class_colormap = ColorMapping::try_from(&self.class_colormap)?;
        validate_class(self.initial_class, &class_colormap)
    }

    /// Serializes config to pretty JSON for settings files.
    pub fn to_json_pretty(&self) -> PlotResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PlotError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> PlotResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| PlotError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

pub(crate) fn validate_class(class: i64, colormap: &ColorMapping) -> PlotResult<()> {
    if class < 0 || class as usize >= colormap.size() {
        return Err(PlotError::InvalidData(format!(
            "class {class} is outside [0, {}) of colormap `{}`",
            colormap.size(),
            colormap.name()
        )));
    }
    Ok(())
}

fn default_scatter_config() -> ScatterConfig {
    ScatterConfig::default().with_overlay_colormap(default_class_colormap())
}

fn default_class_colormap() -> ColormapSpec {
    ColormapSpec::named("cat10_mod_first_transparent")
}

fn default_initial_class() -> i64 {
    1
}
