use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

/// One color tag value, either a class label or a continuous feature value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    Integer(i64),
    Float(f64),
}

impl ColorValue {
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Integer(value) => value as f64,
            Self::Float(value) => value,
        }
    }
}

impl From<i64> for ColorValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ColorValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Per-point color tags, one entry per plotted point.
///
/// The integer/float distinction is kept so categorical colormaps can warn when
/// they are fed non-integer tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum ColorIndices {
    Integer(Vec<i64>),
    Float(Vec<f64>),
}

impl Default for ColorIndices {
    fn default() -> Self {
        Self::Integer(Vec::new())
    }
}

impl ColorIndices {
    #[must_use]
    pub fn broadcast(value: ColorValue, len: usize) -> Self {
        match value {
            ColorValue::Integer(value) => Self::Integer(vec![value; len]),
            ColorValue::Float(value) => Self::Float(vec![value; len]),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Integer(values) => values.len(),
            Self::Float(values) => values.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(_))
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<ColorValue> {
        match self {
            Self::Integer(values) => values.get(index).copied().map(ColorValue::Integer),
            Self::Float(values) => values.get(index).copied().map(ColorValue::Float),
        }
    }

    #[must_use]
    pub fn to_f64_vec(&self) -> Vec<f64> {
        match self {
            Self::Integer(values) => values.iter().map(|&value| value as f64).collect(),
            Self::Float(values) => values.clone(),
        }
    }

    /// Returns a copy sized to `len`: truncated when shorter, zero-filled past
    /// the current end when longer.
    #[must_use]
    pub fn resized(&self, len: usize) -> Self {
        match self {
            Self::Integer(values) => {
                let mut values = values.clone();
                values.resize(len, 0);
                Self::Integer(values)
            }
            Self::Float(values) => {
                let mut values = values.clone();
                values.resize(len, 0.0);
                Self::Float(values)
            }
        }
    }

    /// Returns a copy where every listed point carries `value`.
    ///
    /// Assigning a float to integer tags promotes the whole array to floats.
    pub fn with_value_at(&self, indices: &[usize], value: ColorValue) -> PlotResult<Self> {
        let len = self.len();
        if let Some(&out_of_range) = indices.iter().find(|&&index| index >= len) {
            return Err(PlotError::InvalidData(format!(
                "point index {out_of_range} is out of range for {len} color indices"
            )));
        }

        let updated = match (self, value) {
            (Self::Integer(values), ColorValue::Integer(value)) => {
                let mut values = values.clone();
                for &index in indices {
                    values[index] = value;
                }
                Self::Integer(values)
            }
            (_, value) => {
                let mut values = self.to_f64_vec();
                for &index in indices {
                    values[index] = value.as_f64();
                }
                Self::Float(values)
            }
        };
        Ok(updated)
    }

    /// Replaces every non-positive tag with `floor`, as log normalization
    /// does. Integer tags store the floor truncated toward zero.
    pub fn apply_log_floor(&mut self, floor: f64) {
        match self {
            Self::Integer(values) => {
                let floor = floor.trunc() as i64;
                for value in values.iter_mut().filter(|value| **value <= 0) {
                    *value = floor;
                }
            }
            Self::Float(values) => {
                for value in values.iter_mut().filter(|value| **value <= 0.0) {
                    *value = floor;
                }
            }
        }
    }
}

impl From<Vec<i64>> for ColorIndices {
    fn from(values: Vec<i64>) -> Self {
        Self::Integer(values)
    }
}

impl From<Vec<f64>> for ColorIndices {
    fn from(values: Vec<f64>) -> Self {
        Self::Float(values)
    }
}

/// Argument accepted by `Artist::set_color_indices`: a scalar broadcast to all
/// points, or a full per-point array.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorIndexUpdate {
    Broadcast(ColorValue),
    PerPoint(ColorIndices),
}

impl ColorIndexUpdate {
    /// Materializes the update for a point set of `len` points.
    pub fn resolve(self, len: usize) -> PlotResult<ColorIndices> {
        match self {
            Self::Broadcast(value) => Ok(ColorIndices::broadcast(value, len)),
            Self::PerPoint(indices) => {
                if indices.len() != len {
                    return Err(PlotError::ShapeMismatch {
                        expected: len,
                        actual: indices.len(),
                    });
                }
                Ok(indices)
            }
        }
    }
}

impl From<ColorValue> for ColorIndexUpdate {
    fn from(value: ColorValue) -> Self {
        Self::Broadcast(value)
    }
}

impl From<i64> for ColorIndexUpdate {
    fn from(value: i64) -> Self {
        Self::Broadcast(ColorValue::Integer(value))
    }
}

impl From<f64> for ColorIndexUpdate {
    fn from(value: f64) -> Self {
        Self::Broadcast(ColorValue::Float(value))
    }
}

impl From<ColorIndices> for ColorIndexUpdate {
    fn from(indices: ColorIndices) -> Self {
        Self::PerPoint(indices)
    }
}

impl From<Vec<i64>> for ColorIndexUpdate {
    fn from(values: Vec<i64>) -> Self {
        Self::PerPoint(ColorIndices::Integer(values))
    }
}

impl From<Vec<f64>> for ColorIndexUpdate {
    fn from(values: Vec<f64>) -> Self {
        Self::PerPoint(ColorIndices::Float(values))
    }
}
