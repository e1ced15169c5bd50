use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::normalization::{apply_log_floor, nan_min_max};
use crate::core::{ColorMapping, NormalizationMethod, Normalizer};
use crate::render::Color;

/// Which palette of an artist a coloring pass used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColormapTarget {
    Overlay,
    Histogram,
}

impl ColormapTarget {
    #[must_use]
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Overlay => "overlay_colormap",
            Self::Histogram => "histogram_colormap",
        }
    }
}

impl fmt::Display for ColormapTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Recoverable problem detected while coloring; the pass still completes with
/// the documented fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColorWarning {
    /// Categorical palette fed float tags; colors are likely wrong.
    NonIntegerCategoricalIndices { target: ColormapTarget },
    /// Categorical palette requested with a non-linear normalization.
    CategoricalForcesLinear {
        target: ColormapTarget,
        requested: NormalizationMethod,
    },
    /// Tags outside `[0, palette_size)`; they saturate to the end colors.
    CategoricalIndexOutOfRange {
        target: ColormapTarget,
        min: f64,
        max: f64,
        palette_size: usize,
    },
    /// Log normalization raised non-positive values to the floor.
    LogFloorApplied {
        target: ColormapTarget,
        min_value: f64,
    },
}

impl fmt::Display for ColorWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonIntegerCategoricalIndices { target } => write!(
                f,
                "color indices must be integers for categorical colormap; change `{target}` to a \
                 continuous colormap or set `color_indices` to integers"
            ),
            Self::CategoricalForcesLinear { target, requested } => write!(
                f,
                "categorical colormap detected in `{target}`; replacing `{requested}` \
                 normalization with linear"
            ),
            Self::CategoricalIndexOutOfRange {
                target,
                min,
                max,
                palette_size,
            } => write!(
                f,
                "color indices span [{min}, {max}] but `{target}` only has {palette_size} classes"
            ),
            Self::LogFloorApplied { target, min_value } => write!(
                f,
                "log normalization for `{target}` applied with min value {min_value}; \
                 non-positive values were set to {min_value}"
            ),
        }
    }
}

/// Colors produced by one pass plus what the pass decided along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ColoringOutcome {
    pub colors: Vec<Color>,
    /// Normalization actually applied; `Linear` whenever the palette is categorical.
    pub method: NormalizationMethod,
    pub normalizer: Normalizer,
    /// Floor that replaced non-positive values under log normalization.
    /// Artists write it back into the values they store.
    pub log_floor: Option<f64>,
    pub warnings: Vec<ColorWarning>,
}

/// Maps raw values through `colormap` using `method`.
///
/// `integer_tags` tells whether the values originate from integer class tags.
/// NaN values render as `Color::TRANSPARENT`. Every warning is logged and
/// returned in the outcome. `values` is left as is; a log floor is reported
/// through `ColoringOutcome::log_floor`.
#[must_use]
pub fn map_values_to_colors(
    values: &[f64],
    integer_tags: bool,
    colormap: &ColorMapping,
    method: NormalizationMethod,
    target: ColormapTarget,
) -> ColoringOutcome {
    let mut warnings = Vec::new();
    let mut log_floor = None;

    let (method, normalizer, normalized_source) = if colormap.is_categorical() {
        if !integer_tags {
            warnings.push(ColorWarning::NonIntegerCategoricalIndices { target });
        }
        if method != NormalizationMethod::Linear {
            warnings.push(ColorWarning::CategoricalForcesLinear {
                target,
                requested: method,
            });
        }
        let palette_size = colormap.size();
        if let Some((min, max)) = nan_min_max(values) {
            if min < 0.0 || max >= palette_size as f64 {
                warnings.push(ColorWarning::CategoricalIndexOutOfRange {
                    target,
                    min,
                    max,
                    palette_size,
                });
            }
        }
        (
            NormalizationMethod::Linear,
            Normalizer::categorical(palette_size),
            None,
        )
    } else if method == NormalizationMethod::Log {
        let mut floored = values.to_vec();
        let floor = apply_log_floor(&mut floored);
        if floor.clamped {
            log_floor = Some(floor.min_value);
            warnings.push(ColorWarning::LogFloorApplied {
                target,
                min_value: floor.min_value,
            });
        }
        let normalizer = Normalizer::fit(method, &floored);
        (method, normalizer, Some(floored))
    } else {
        (method, Normalizer::fit(method, values), None)
    };

    let source = normalized_source.as_deref().unwrap_or(values);
    let colors = source
        .iter()
        .map(|&value| colormap.lookup(normalizer.normalize(value)))
        .collect();

    for warning in &warnings {
        warn!(colormap = %target, palette = colormap.name(), "{warning}");
    }

    ColoringOutcome {
        colors,
        method,
        normalizer,
        log_floor,
        warnings,
    }
}
