//! Nearest-neighbor interpolation/extrapolation on a rectilinear grid.
//!
//! ```rust
//! use scaled_interp::nearest::rectilinear;
//!
//! // Define a grid
//! let x = [1.0_f64, 2.0, 4.0];
//! let y = [1.0_f64, 1.5];
//! let grids = &[&x[..], &y[..]];
//!
//! // Values at grid points
//! let z = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
//!
//! // Observation points to interpolate/extrapolate
//! let xobs = [0.0_f64, 3.5];
//! let yobs = [-1.0, 1.4];
//! let obs = [&xobs[..], &yobs[..]];
//!
//! // Do interpolation, allocating for the output for convenience
//! let out = rectilinear::interpn_alloc(grids, &z, &obs).unwrap();
//! assert_eq!(out, vec![0.0, 5.0]);
//! ```
use num_traits::Float;

/// Evaluate nearest-neighbor interpolation on a rectilinear grid.
/// Assumes C-style ordering of vals (z(x0, y0), z(x0, y1), ..., z(x0, yn), z(x1, y0), ...).
pub fn interpn<T: Float>(
    grids: &[&[T]],
    vals: &[T],
    obs: &[&[T]],
    out: &mut [T],
) -> Result<(), &'static str> {
    NearestRectilinear::new(grids, vals)?.interp(obs, out)
}

/// Evaluate interpolant, allocating a new Vec for the output.
///
/// For best results, use the `interpn` function with preallocated output;
/// allocation has a significant performance cost, and should be used sparingly.
pub fn interpn_alloc<T: Float>(
    grids: &[&[T]],
    vals: &[T],
    obs: &[&[T]],
) -> Result<Vec<T>, &'static str> {
    let n = obs.first().map(|x| x.len()).unwrap_or(0);
    let mut out = vec![T::zero(); n];
    interpn(grids, vals, obs, &mut out)?;
    Ok(out)
}

pub use crate::multilinear::rectilinear::check_bounds;

/// An arbitrary-dimensional nearest-neighbor interpolator / extrapolator on a rectilinear grid.
///
/// Assumes C-style ordering of vals (z(x0, y0), z(x0, y1), ..., z(x0, yn), z(x1, y0), ...).
/// Assumes grids are monotonically _increasing_.
///
/// A point exactly halfway between two grid entries takes the lower one.
/// Outside the grid, the value at the nearest edge is held.
///
/// Operation Complexity
/// * O(ndims) plus a bisection search on each dimension.
pub struct NearestRectilinear<'a, T: Float> {
    /// x, y, ... coordinate grids, each entry of size dims[i]
    grids: &'a [&'a [T]],

    /// Cumulative products of higher dimensions, used for indexing
    dimprod: Vec<usize>,

    /// Values at each point, size prod(dims)
    vals: &'a [T],
}

impl<'a, T: Float> NearestRectilinear<'a, T> {
    /// Build a new interpolator.
    ///
    /// # Errors
    /// * If any input dimensions do not match
    /// * If any dimensions have size < 2
    /// * If the first step on any dimension is not positive
    pub fn new(grids: &'a [&'a [T]], vals: &'a [T]) -> Result<Self, &'static str> {
        let ndims = grids.len();
        if ndims == 0 {
            return Err("Dimension mismatch");
        }
        let nvals: usize = grids.iter().map(|g| g.len()).product();
        if vals.len() != nvals {
            return Err("Dimension mismatch");
        }
        // Make sure all dimensions have at least two entries
        let degenerate = grids.iter().any(|g| g.len() < 2);
        if degenerate {
            return Err("All grids must have at least two entries");
        }
        let monotonic_maybe = grids.iter().all(|&g| g[1] > g[0]);
        if !monotonic_maybe {
            return Err("All grids must be monotonically increasing");
        }

        let mut dimprod = vec![1_usize; ndims];
        let mut acc = 1;
        for i in 0..ndims {
            dimprod[ndims - i - 1] = acc;
            acc *= grids[ndims - i - 1].len();
        }

        Ok(Self {
            grids,
            dimprod,
            vals,
        })
    }

    /// Interpolate on a contiguous list of observation points.
    ///
    /// # Errors
    ///   * If the dimensionality of the point does not match the data
    ///   * If the dimensionality of point or data does not match the grid
    pub fn interp(&self, x: &[&[T]], out: &mut [T]) -> Result<(), &'static str> {
        let n = out.len();
        let ndims = self.grids.len();
        if x.len() != ndims {
            return Err("Dimension mismatch");
        }
        let size_matches = x.iter().all(|&xx| xx.len() == n);
        if !size_matches {
            return Err("Dimension mismatch");
        }

        let mut tmp = vec![T::zero(); ndims];
        for i in 0..n {
            (0..ndims).for_each(|j| tmp[j] = x[j][i]);
            out[i] = self.interp_one(&tmp)?;
        }

        Ok(())
    }

    /// Interpolate the value at a point.
    ///
    /// # Errors
    ///   * If the dimensionality of the point does not match the data
    #[inline]
    pub fn interp_one(&self, x: &[T]) -> Result<T, &'static str> {
        if x.len() != self.grids.len() {
            return Err("Dimension mismatch");
        }

        let mut k = 0;
        for (j, &v) in x.iter().enumerate() {
            if v.is_nan() {
                return Ok(T::nan());
            }
            let grid = self.grids[j];
            let dimmax = grid.len() as isize - 2;
            let i = (grid.partition_point(|g| *g < v) as isize - 1)
                .max(0)
                .min(dimmax) as usize;

            // Ties go to the lower node
            let (x0, x1) = (grid[i], grid[i + 1]);
            let loc = match (v - x0).abs() <= (x1 - v).abs() {
                true => i,
                false => i + 1,
            };
            k += loc * self.dimprod[j];
        }

        Ok(self.vals[k])
    }
}
