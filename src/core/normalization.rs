use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

/// Floor substituted for non-positive values under log normalization.
pub const LOG_MIN_VALUE: f64 = 0.01;
/// Width of the linear region around zero for symlog normalization.
pub const SYMLOG_LINEAR_THRESHOLD: f64 = 0.03;

const SYMLOG_LINEAR_SCALE: f64 = 1.0;
const SYMLOG_BASE: f64 = 10.0;

/// How raw values are mapped to `[0, 1]` before palette lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NormalizationMethod {
    #[default]
    Linear,
    Log,
    Symlog,
    Centered,
}

impl NormalizationMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Log => "log",
            Self::Symlog => "symlog",
            Self::Centered => "centered",
        }
    }
}

impl fmt::Display for NormalizationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NormalizationMethod {
    type Err = PlotError;

    fn from_str(value: &str) -> PlotResult<Self> {
        match value {
            "linear" => Ok(Self::Linear),
            "log" => Ok(Self::Log),
            "symlog" => Ok(Self::Symlog),
            "centered" => Ok(Self::Centered),
            other => Err(PlotError::InvalidData(format!(
                "unknown normalization method `{other}`"
            ))),
        }
    }
}

/// A normalization with its bounds resolved against concrete data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Normalizer {
    Linear { vmin: f64, vmax: f64 },
    Log { vmin: f64, vmax: f64 },
    Symlog { vmin: f64, vmax: f64, linthresh: f64 },
    Centered { vcenter: f64, halfrange: f64 },
    /// No finite data to derive bounds from; everything maps to NaN.
    Undefined,
}

impl Normalizer {
    /// Linear mapping of `[0, palette_size]` for categorical palettes.
    #[must_use]
    pub fn categorical(palette_size: usize) -> Self {
        Self::Linear {
            vmin: 0.0,
            vmax: palette_size as f64,
        }
    }

    /// Derives bounds from `values`, ignoring NaN entries.
    ///
    /// For `Log` the caller is expected to have applied the log floor first
    /// (see `apply_log_floor`).
    #[must_use]
    pub fn fit(method: NormalizationMethod, values: &[f64]) -> Self {
        let Some((min, max)) = nan_min_max(values) else {
            return Self::Undefined;
        };
        match method {
            NormalizationMethod::Linear => Self::Linear {
                vmin: min,
                vmax: max,
            },
            NormalizationMethod::Log => Self::Log {
                vmin: min,
                vmax: max,
            },
            NormalizationMethod::Symlog => Self::Symlog {
                vmin: min,
                vmax: max,
                linthresh: SYMLOG_LINEAR_THRESHOLD,
            },
            NormalizationMethod::Centered => {
                let vcenter = nan_mean(values).unwrap_or(0.0);
                let halfrange = (max - vcenter).abs().max((min - vcenter).abs());
                Self::Centered { vcenter, halfrange }
            }
        }
    }

    /// Maps one value to the normalized range. NaN stays NaN; values outside
    /// the bounds fall outside `[0, 1]`.
    #[must_use]
    pub fn normalize(self, value: f64) -> f64 {
        if value.is_nan() {
            return f64::NAN;
        }
        match self {
            Self::Linear { vmin, vmax } => linear(value, vmin, vmax),
            Self::Log { vmin, vmax } => {
                if value <= 0.0 || vmin <= 0.0 {
                    return f64::NAN;
                }
                linear(value.ln(), vmin.ln(), vmax.ln())
            }
            Self::Symlog {
                vmin,
                vmax,
                linthresh,
            } => linear(
                symlog_transform(value, linthresh),
                symlog_transform(vmin, linthresh),
                symlog_transform(vmax, linthresh),
            ),
            Self::Centered { vcenter, halfrange } => {
                linear(value, vcenter - halfrange, vcenter + halfrange)
            }
            Self::Undefined => f64::NAN,
        }
    }
}

/// Result of clamping values for log normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogFloor {
    /// Lower bound handed to the log normalizer.
    pub min_value: f64,
    /// Whether any value had to be raised to the floor.
    pub clamped: bool,
}

/// Raises non-positive values to `LOG_MIN_VALUE` when the data minimum is not
/// positive. NaN entries are left untouched.
pub fn apply_log_floor(values: &mut [f64]) -> LogFloor {
    let Some((min, _)) = nan_min_max(values) else {
        return LogFloor {
            min_value: LOG_MIN_VALUE,
            clamped: false,
        };
    };
    if min > 0.0 {
        return LogFloor {
            min_value: min,
            clamped: false,
        };
    }
    for value in values.iter_mut() {
        if *value <= 0.0 {
            *value = LOG_MIN_VALUE;
        }
    }
    LogFloor {
        min_value: LOG_MIN_VALUE,
        clamped: true,
    }
}

fn linear(value: f64, vmin: f64, vmax: f64) -> f64 {
    if vmin == vmax {
        return 0.0;
    }
    (value - vmin) / (vmax - vmin)
}

fn symlog_transform(value: f64, linthresh: f64) -> f64 {
    let linscale_adj = SYMLOG_LINEAR_SCALE / (1.0 - SYMLOG_BASE.recip());
    let magnitude = value.abs();
    if magnitude <= linthresh {
        return value * linscale_adj;
    }
    value.signum() * linthresh * (linscale_adj + (magnitude / linthresh).log(SYMLOG_BASE))
}

pub(crate) fn nan_min_max(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|value| !value.is_nan())
        .fold(None, |bounds, value| match bounds {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}

fn nan_mean(values: &[f64]) -> Option<f64> {
    let (sum, count) = values
        .iter()
        .filter(|value| !value.is_nan())
        .fold((0.0, 0_usize), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / count as f64)
}
