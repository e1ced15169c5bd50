use crate::core::{DataPoint, Extent};
use crate::error::{PlotError, PlotResult};

/// Dense 2D grid of `f64` cells indexed as `[x][y]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    nx: usize,
    ny: usize,
    values: Vec<f64>,
}

impl Grid {
    #[must_use]
    pub fn filled(nx: usize, ny: usize, value: f64) -> Self {
        Self {
            nx,
            ny,
            values: vec![value; nx * ny],
        }
    }

    /// `(x cells, y cells)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.nx || y >= self.ny {
            return None;
        }
        self.values.get(x * self.ny + y).copied()
    }

    /// Replaces defined non-positive cells with `floor`; NaN cells stay NaN.
    pub(crate) fn apply_log_floor(&mut self, floor: f64) {
        for value in self.values.iter_mut().filter(|value| **value <= 0.0) {
            *value = floor;
        }
    }

    pub(crate) fn cell_mut(&mut self, x: usize, y: usize) -> &mut f64 {
        &mut self.values[x * self.ny + y]
    }

    /// Cell values in `[x][y]` order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn all_nan(&self) -> bool {
        self.values.iter().all(|value| value.is_nan())
    }

    /// Iterates `(x, y, value)` with `y` varying fastest.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(flat, &value)| (flat / self.ny, flat % self.ny, value))
    }
}

/// Grid cell a point was assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BinIndex {
    pub x: usize,
    pub y: usize,
}

/// Point counts over a uniform square grid spanning the data bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramGrid {
    counts: Grid,
    x_edges: Vec<f64>,
    y_edges: Vec<f64>,
}

impl HistogramGrid {
    /// Bins `points` into `bins x bins` uniform cells.
    ///
    /// Cells are half-open `[edge_i, edge_i+1)` except the last one per axis,
    /// which also holds points sitting exactly on the upper edge.
    pub fn compute(points: &[DataPoint], bins: usize) -> PlotResult<Self> {
        if bins == 0 {
            return Err(PlotError::InvalidData(
                "histogram bin count must be > 0".to_owned(),
            ));
        }
        if points.iter().any(|point| !point.is_finite()) {
            return Err(PlotError::InvalidData(
                "histogram coordinates must be finite".to_owned(),
            ));
        }
        let extent = Extent::from_points(points).ok_or_else(|| {
            PlotError::InvalidData("histogram needs at least one point".to_owned())
        })?;

        let x_edges = uniform_edges(extent.x_min, extent.x_max, bins);
        let y_edges = uniform_edges(extent.y_min, extent.y_max, bins);
        let mut histogram = Self {
            counts: Grid::filled(bins, bins, 0.0),
            x_edges,
            y_edges,
        };
        for bin in histogram.assign_bins(points) {
            *histogram.counts.cell_mut(bin.x, bin.y) += 1.0;
        }
        Ok(histogram)
    }

    #[must_use]
    pub fn bins(&self) -> usize {
        self.x_edges.len() - 1
    }

    #[must_use]
    pub fn counts(&self) -> &Grid {
        &self.counts
    }

    #[must_use]
    pub fn x_edges(&self) -> &[f64] {
        &self.x_edges
    }

    #[must_use]
    pub fn y_edges(&self) -> &[f64] {
        &self.y_edges
    }

    /// Data-space rectangle covered by the grid.
    #[must_use]
    pub fn extent(&self) -> Extent {
        Extent::new(
            self.x_edges[0],
            self.x_edges[self.x_edges.len() - 1],
            self.y_edges[0],
            self.y_edges[self.y_edges.len() - 1],
        )
    }

    /// Digitizes every point against the edges, clamping to the outer cells.
    #[must_use]
    pub fn assign_bins(&self, points: &[DataPoint]) -> Vec<BinIndex> {
        let assign = |point: &DataPoint| BinIndex {
            x: digitize_clamped(point.x, &self.x_edges),
            y: digitize_clamped(point.y, &self.y_edges),
        };

        #[cfg(feature = "parallel-binning")]
        {
            use rayon::prelude::*;
            points.par_iter().map(assign).collect()
        }

        #[cfg(not(feature = "parallel-binning"))]
        {
            points.iter().map(assign).collect()
        }
    }

    /// Whether `point` lies inside cell `(x, y)` by interval test.
    #[must_use]
    pub fn bin_contains(&self, x: usize, y: usize, point: DataPoint) -> bool {
        within_bin(point.x, &self.x_edges, x) && within_bin(point.y, &self.y_edges, y)
    }

    /// Indices of `points` falling in any cell whose count exceeds `threshold`.
    ///
    /// Cells are visited in `[x][y]` order and membership is re-derived with
    /// interval tests against the edges, so it agrees with `assign_bins` at
    /// every boundary.
    #[must_use]
    pub fn indices_above_threshold(&self, points: &[DataPoint], threshold: f64) -> Vec<usize> {
        let mut indices = Vec::new();
        for (x, y, count) in self.counts.cells() {
            if count <= threshold {
                continue;
            }
            indices.extend(
                points
                    .iter()
                    .enumerate()
                    .filter(|(_, point)| self.bin_contains(x, y, **point))
                    .map(|(index, _)| index),
            );
        }
        indices
    }
}

/// `bins + 1` evenly spaced edges; a zero-width range is widened by 0.5 on
/// both sides.
fn uniform_edges(min: f64, max: f64, bins: usize) -> Vec<f64> {
    let (start, end) = if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };
    let span = end - start;
    let mut edges: Vec<f64> = (0..=bins)
        .map(|i| start + span * (i as f64 / bins as f64))
        .collect();
    edges[bins] = end;
    edges
}

fn digitize_clamped(value: f64, edges: &[f64]) -> usize {
    let last_bin = edges.len() - 2;
    edges
        .partition_point(|&edge| edge <= value)
        .saturating_sub(1)
        .min(last_bin)
}

fn within_bin(value: f64, edges: &[f64], bin: usize) -> bool {
    let lower = edges[bin];
    let upper = edges[bin + 1];
    if bin + 2 == edges.len() {
        return lower <= value && value <= upper;
    }
    lower <= value && value < upper
}

#[cfg(test)]
mod tests {
    use super::{digitize_clamped, uniform_edges};

    #[test]
    fn degenerate_range_is_widened() {
        assert_eq!(uniform_edges(3.0, 3.0, 2), vec![2.5, 3.0, 3.5]);
    }

    #[test]
    fn digitize_is_left_inclusive_and_clamps_the_top_edge() {
        let edges = [0.0, 1.0, 2.0];
        assert_eq!(digitize_clamped(0.0, &edges), 0);
        assert_eq!(digitize_clamped(1.0, &edges), 1);
        assert_eq!(digitize_clamped(2.0, &edges), 1);
        assert_eq!(digitize_clamped(-4.0, &edges), 0);
    }
}
