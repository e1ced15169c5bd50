use std::fmt;
use std::str::FromStr;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{BinIndex, Grid};
use crate::error::{PlotError, PlotResult};

/// Aggregate drawn per bin by the histogram overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Statistic {
    Mean,
    #[default]
    Median,
    Sum,
}

impl Statistic {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Sum => "sum",
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Statistic {
    type Err = PlotError;

    fn from_str(value: &str) -> PlotResult<Self> {
        match value {
            "mean" => Ok(Self::Mean),
            "median" => Ok(Self::Median),
            "sum" => Ok(Self::Sum),
            other => Err(PlotError::InvalidData(format!("unknown statistic `{other}`"))),
        }
    }
}

/// Aggregates `values` per bin into a grid of `shape`.
///
/// Bins that received no point hold NaN. For `Sum` a bin is defined as soon as
/// one point lands in it, so a zero sum stays distinguishable from "no data".
pub fn statistic_grid(
    bins: &[BinIndex],
    values: &[f64],
    statistic: Statistic,
    shape: (usize, usize),
) -> PlotResult<Grid> {
    if bins.len() != values.len() {
        return Err(PlotError::ShapeMismatch {
            expected: bins.len(),
            actual: values.len(),
        });
    }
    let (nx, ny) = shape;
    if let Some(bin) = bins.iter().find(|bin| bin.x >= nx || bin.y >= ny) {
        return Err(PlotError::InvalidData(format!(
            "bin ({}, {}) lies outside a {nx}x{ny} grid",
            bin.x, bin.y
        )));
    }

    let mut grid = Grid::filled(nx, ny, f64::NAN);
    match statistic {
        Statistic::Mean => {
            let mut sums = Grid::filled(nx, ny, 0.0);
            let mut counts = Grid::filled(nx, ny, 0.0);
            for (bin, &value) in bins.iter().zip(values) {
                *sums.cell_mut(bin.x, bin.y) += value;
                *counts.cell_mut(bin.x, bin.y) += 1.0;
            }
            for (flat, (&sum, &count)) in sums.values().iter().zip(counts.values()).enumerate() {
                if count > 0.0 {
                    *grid.cell_mut(flat / ny, flat % ny) = sum / count;
                }
            }
        }
        Statistic::Median => {
            let mut members: Vec<SmallVec<[f64; 8]>> = vec![SmallVec::new(); nx * ny];
            for (bin, &value) in bins.iter().zip(values) {
                members[bin.x * ny + bin.y].push(value);
            }
            for (flat, bucket) in members.iter_mut().enumerate() {
                if !bucket.is_empty() {
                    *grid.cell_mut(flat / ny, flat % ny) = median(bucket);
                }
            }
        }
        Statistic::Sum => {
            let mut touched = vec![false; nx * ny];
            let mut sums = Grid::filled(nx, ny, 0.0);
            for (bin, &value) in bins.iter().zip(values) {
                *sums.cell_mut(bin.x, bin.y) += value;
                touched[bin.x * ny + bin.y] = true;
            }
            for (x, y, sum) in sums.cells() {
                if touched[x * ny + y] {
                    *grid.cell_mut(x, y) = sum;
                }
            }
        }
    }
    Ok(grid)
}

/// Median of a non-empty bucket; any NaN member makes the result NaN.
fn median(bucket: &mut [f64]) -> f64 {
    if bucket.iter().any(|value| value.is_nan()) {
        return f64::NAN;
    }
    bucket.sort_unstable_by_key(|&value| OrderedFloat(value));
    let mid = bucket.len() / 2;
    if bucket.len() % 2 == 0 {
        (bucket[mid - 1] + bucket[mid]) * 0.5
    } else {
        bucket[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::median;

    #[test]
    fn median_averages_even_buckets() {
        assert_eq!(median(&mut [4.0, 1.0, 3.0, 2.0]), 2.5);
        assert_eq!(median(&mut [7.0, -1.0, 3.0]), 3.0);
        assert!(median(&mut [1.0, f64::NAN]).is_nan());
    }
}
