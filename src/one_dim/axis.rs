//! One-dimensional interpolation along a single axis of an N-D array.
//!
//! Each 1D lane of the values along the interpolation axis is treated as
//! an independent curve over the same grid. The result replaces that axis
//! with the shape of the query array.

use ndarray::{ArrayD, Axis, IxDyn};

use super::{Interp1D, Linear1D, Nearest1D, RectilinearGrid1D};
use crate::config::Method;
use crate::error::{InterpError, Result};
use crate::grid::OutOfBounds;

/// 1D interpolator applied along one axis of an N-D values array.
#[derive(Debug, Clone)]
pub struct AxisInterpolator {
    /// Strictly ascending grid
    grid: Vec<f64>,

    /// Values, sorted along `axis` to match `grid`
    values: ArrayD<f64>,

    axis: usize,

    bounds: OutOfBounds,
}

impl AxisInterpolator {
    /// Unsorted grids are sorted, together with the values along `axis`.
    ///
    /// # Errors
    /// * If `axis` is not an axis of `values`
    /// * If the grid length does not match the size of `values` along `axis`
    /// * If the grid has fewer than two entries, repeated entries, or NaN
    pub fn new(grid: &[f64], values: ArrayD<f64>, axis: usize, bounds: OutOfBounds) -> Result<Self> {
        if axis >= values.ndim() {
            return Err(InterpError::DimensionMismatch(format!(
                "Axis {axis} is out of range for values with {} dimensions",
                values.ndim()
            )));
        }
        if grid.len() != values.len_of(Axis(axis)) {
            return Err(InterpError::DimensionMismatch(format!(
                "There are {} points but {} values along axis {axis}",
                grid.len(),
                values.len_of(Axis(axis))
            )));
        }
        if grid.len() < 2 {
            return Err(InterpError::InvalidGrid(
                "At least 2 points are needed along the interpolation axis".to_string(),
            ));
        }

        let mut order: Vec<usize> = (0..grid.len()).collect();
        order.sort_by(|&a, &b| grid[a].total_cmp(&grid[b]));
        let sorted: Vec<f64> = order.iter().map(|&i| grid[i]).collect();
        if sorted.windows(2).any(|w| !(w[1] > w[0])) {
            return Err(InterpError::InvalidGrid(
                "The points along the interpolation axis must be distinct and not NaN".to_string(),
            ));
        }

        let in_order = order.iter().enumerate().all(|(i, &j)| i == j);
        let values = match in_order {
            true => values,
            false => values.select(Axis(axis), &order),
        };

        Ok(Self {
            grid: sorted,
            values,
            axis,
            bounds,
        })
    }

    pub fn axis(&self) -> usize {
        self.axis
    }

    pub fn grid(&self) -> &[f64] {
        &self.grid
    }

    /// Evaluate every lane at the query locations.
    ///
    /// The output shape is `values.shape[..axis] ++ x.shape ++ values.shape[axis + 1..]`.
    ///
    /// # Errors
    /// * If a location is outside the grid and out-of-bounds queries are an error
    pub fn interp(&self, x: &ArrayD<f64>, method: Method) -> Result<ArrayD<f64>> {
        let locs: Vec<f64> = x.iter().copied().collect();
        let (lo, hi) = (self.grid[0], self.grid[self.grid.len() - 1]);
        let outside = |v: f64| v < lo || v > hi;

        if self.bounds == OutOfBounds::Error {
            if let Some(&value) = locs.iter().find(|&&v| outside(v)) {
                return Err(InterpError::OutOfBounds {
                    dim: self.axis,
                    value,
                });
            }
        }

        let m = locs.len();
        let nlanes = self.values.len() / self.grid.len();
        let mut data = Vec::with_capacity(nlanes * m);
        let mut lane_vals = vec![0.0; self.grid.len()];
        let mut out = vec![0.0; m];

        for lane in self.values.lanes(Axis(self.axis)) {
            lane_vals
                .iter_mut()
                .zip(lane.iter())
                .for_each(|(dst, &src)| *dst = src);
            let grid = RectilinearGrid1D::new(&self.grid, &lane_vals)?;

            match method {
                Method::Linear => Linear1D::new(grid).eval(&locs, &mut out)?,
                Method::Nearest => Nearest1D::new(grid).eval(&locs, &mut out)?,
            }

            if let OutOfBounds::Fill(fill) = self.bounds {
                for (o, &v) in out.iter_mut().zip(locs.iter()) {
                    if outside(v) {
                        *o = fill;
                    }
                }
            }

            data.extend_from_slice(&out);
        }

        // `data` is laid out as (pre, post, query); move the query block into
        // the position of the interpolation axis.
        let shape = self.values.shape();
        let (pre, post) = (&shape[..self.axis], &shape[self.axis + 1..]);
        let npre: usize = pre.iter().product();
        let npost: usize = post.iter().product();

        let blocks = ArrayD::from_shape_vec(IxDyn(&[npre, npost, m]), data)?;
        let moved = blocks.permuted_axes(IxDyn(&[0, 2, 1]));

        let mut out_shape = pre.to_vec();
        out_shape.extend_from_slice(x.shape());
        out_shape.extend_from_slice(post);

        Ok(ArrayD::from_shape_vec(
            IxDyn(&out_shape),
            moved.iter().copied().collect(),
        )?)
    }
}
