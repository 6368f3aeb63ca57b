//! Interpolation on a rectilinear grid of arbitrary dimension, with
//! configurable handling of points outside the grid.
//!
//! The grid may have uneven spacing on each axis. Axes given in descending
//! order are reversed, together with the values, at construction.
//!
//! ```rust
//! use ndarray::array;
//! use scaled_interp::config::Method;
//! use scaled_interp::grid::{GridInterpolator, OutOfBounds};
//!
//! let x = vec![0.0, 1.0, 2.0];
//! let y = vec![0.0, 10.0];
//! let z = array![[0.0, 1.0], [2.0, 3.0], [4.0, 5.0]].into_dyn();
//!
//! let interpolator = GridInterpolator::new(vec![x, y], z, OutOfBounds::Extrapolate).unwrap();
//! let out = interpolator.interp(&[&[0.5, 3.0][..], &[5.0, 0.0][..]], Method::Linear).unwrap();
//! assert_eq!(out, vec![1.5, 6.0]);
//! ```
use ndarray::{ArrayD, Axis};

use crate::config::Method;
use crate::error::{InterpError, Result};
use crate::multilinear::{rectilinear, MultilinearRectilinear};
use crate::nearest::NearestRectilinear;

/// Handling of query points outside of the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutOfBounds {
    /// Reject the query
    Error,
    /// Return a constant for the offending points
    Fill(f64),
    /// Extrapolate from the edge cells
    Extrapolate,
}

/// Owned rectilinear grid with values, validated once at construction.
#[derive(Debug, Clone)]
pub struct GridInterpolator {
    /// Strictly ascending coordinates for each dimension
    grids: Vec<Vec<f64>>,

    /// Values in C order, size prod(dims)
    values: Vec<f64>,

    bounds: OutOfBounds,
}

impl GridInterpolator {
    /// # Errors
    /// * If the number of grids does not match the dimensionality of `values`
    /// * If any grid length does not match the size of `values` on that axis
    /// * If any grid has fewer than two entries or is not strictly monotonic
    pub fn new(
        mut grids: Vec<Vec<f64>>,
        mut values: ArrayD<f64>,
        bounds: OutOfBounds,
    ) -> Result<Self> {
        if grids.is_empty() || values.ndim() != grids.len() {
            return Err(InterpError::DimensionMismatch(format!(
                "There are {} point arrays, but values has {} dimensions",
                grids.len(),
                values.ndim()
            )));
        }

        for (i, grid) in grids.iter_mut().enumerate() {
            if grid.len() != values.len_of(Axis(i)) {
                return Err(InterpError::DimensionMismatch(format!(
                    "There are {} points and {} values in dimension {i}",
                    grid.len(),
                    values.len_of(Axis(i))
                )));
            }
            if grid.len() < 2 {
                return Err(InterpError::InvalidGrid(format!(
                    "Dimension {i} must have at least 2 points"
                )));
            }

            let ascending = grid.windows(2).all(|w| w[1] > w[0]);
            let descending = grid.windows(2).all(|w| w[1] < w[0]);
            if descending {
                grid.reverse();
                values.invert_axis(Axis(i));
            } else if !ascending {
                return Err(InterpError::InvalidGrid(format!(
                    "The points in dimension {i} must be strictly ascending or descending"
                )));
            }
        }

        // Logical iteration order is C order regardless of inverted strides
        let values = values.iter().copied().collect();

        Ok(Self {
            grids,
            values,
            bounds,
        })
    }

    pub fn ndim(&self) -> usize {
        self.grids.len()
    }

    pub fn grids(&self) -> &[Vec<f64>] {
        &self.grids
    }

    pub fn bounds(&self) -> OutOfBounds {
        self.bounds
    }

    /// Per-dimension flags marking whether any observation point lies
    /// outside the grid by more than `atol`.
    ///
    /// # Errors
    /// * If the number of coordinate arrays does not match the grid
    pub fn check_bounds(&self, xi: &[&[f64]], atol: f64) -> Result<Vec<bool>> {
        let grids = self.grid_slices();
        let mut out = vec![false; self.ndim()];
        rectilinear::check_bounds(&grids, xi, atol, &mut out)?;
        Ok(out)
    }

    /// Evaluate at observation points given as one coordinate array per dimension.
    ///
    /// # Errors
    /// * If the number or lengths of coordinate arrays do not match
    /// * If a point is outside the grid and out-of-bounds queries are an error
    pub fn interp(&self, xi: &[&[f64]], method: Method) -> Result<Vec<f64>> {
        if xi.len() != self.ndim() {
            return Err(InterpError::DimensionMismatch(format!(
                "The requested sample points have dimension {}, but this grid has dimension {}",
                xi.len(),
                self.ndim()
            )));
        }
        let n = xi[0].len();
        if xi.iter().any(|x| x.len() != n) {
            return Err(InterpError::DimensionMismatch(
                "All coordinate arrays must have the same length".to_string(),
            ));
        }

        if self.bounds == OutOfBounds::Error {
            for (dim, x) in xi.iter().enumerate() {
                if let Some(&value) = x.iter().find(|&&v| self.is_outside(dim, v)) {
                    return Err(InterpError::OutOfBounds { dim, value });
                }
            }
        }

        let grids = self.grid_slices();
        let mut out = vec![0.0; n];
        match method {
            Method::Linear => {
                MultilinearRectilinear::new(&grids, &self.values)?.interp(xi, &mut out)?
            }
            Method::Nearest => {
                NearestRectilinear::new(&grids, &self.values)?.interp(xi, &mut out)?
            }
        }

        if let OutOfBounds::Fill(fill) = self.bounds {
            for (i, v) in out.iter_mut().enumerate() {
                if (0..self.ndim()).any(|dim| self.is_outside(dim, xi[dim][i])) {
                    *v = fill;
                }
            }
        }

        Ok(out)
    }

    #[inline]
    fn is_outside(&self, dim: usize, v: f64) -> bool {
        let grid = &self.grids[dim];
        v < grid[0] || v > grid[grid.len() - 1]
    }

    fn grid_slices(&self) -> Vec<&[f64]> {
        self.grids.iter().map(|g| &g[..]).collect()
    }
}
