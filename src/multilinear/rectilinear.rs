//! Multilinear interpolation/extrapolation on a rectilinear grid.
//!
//! ```rust
//! use scaled_interp::multilinear::rectilinear;
//!
//! // Define a grid
//! let x = [1.0_f64, 1.2, 2.0];
//! let y = [1.0_f64, 1.3, 1.5];
//!
//! // Grid input for rectilinear method
//! let grids = &[&x[..], &y[..]];
//!
//! // Values at grid points
//! let z = [2.0; 9];
//!
//! // Points to interpolate/extrapolate
//! let xobs = [0.0_f64, 5.0];
//! let yobs = [-1.0, 3.0];
//! let obs = [&xobs[..], &yobs[..]];
//!
//! // Do interpolation, allocating for the output for convenience
//! let out = rectilinear::interpn_alloc(grids, &z, &obs).unwrap();
//! assert_eq!(out, vec![2.0, 2.0]);
//! ```
//!
//! References
//! * https://en.wikipedia.org/wiki/Bilinear_interpolation#Weighted_mean
use num_traits::Float;

/// Evaluate multilinear interpolation on a rectilinear grid.
/// Assumes C-style ordering of vals (z(x0, y0), z(x0, y1), ..., z(x0, yn), z(x1, y0), ...).
///
/// While this method initializes the interpolator struct on every call, the overhead of doing this
/// is minimal even when using it to evaluate one observation point at a time.
pub fn interpn<T: Float>(
    grids: &[&[T]],
    vals: &[T],
    obs: &[&[T]],
    out: &mut [T],
) -> Result<(), &'static str> {
    MultilinearRectilinear::new(grids, vals)?.interp(obs, out)
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

/// Check whether a list of observation points are inside the grid within some absolute tolerance.
/// Assumes the grid is valid for the rectilinear interpolator (monotonically increasing).
///
/// Output slice entry `i` is set to `false` if no points on that dimension are out of bounds,
/// and set to `true` if there is a bounds violation on that axis.
///
/// # Errors
/// * If the dimensionality of the grid does not match the dimensionality of the observation points
/// * If the output slice length does not match the dimensionality of the grid
pub fn check_bounds<T: Float>(
    grids: &[&[T]],
    obs: &[&[T]],
    atol: T,
    out: &mut [bool],
) -> Result<(), &'static str> {
    let ndims = grids.len();
    if !(obs.len() == ndims && out.len() == ndims && (0..ndims).all(|i| !grids[i].is_empty())) {
        return Err("Dimension mismatch");
    }
    for i in 0..ndims {
        let lo = grids[i][0];
        let hi = grids[i].last();
        match hi {
            Some(&hi) => {
                let bad = obs[i]
                    .iter()
                    .any(|&x| (x - lo) <= -atol || (x - hi) >= atol);

                out[i] = bad;
            }
            None => return Err("Dimension mismatch"),
        }
    }
    Ok(())
}

/// An arbitrary-dimensional multilinear interpolator / extrapolator on a rectilinear grid.
///
/// Assumes C-style ordering of vals (z(x0, y0), z(x0, y1), ..., z(x0, yn), z(x1, y0), ...).
/// Assumes grids are monotonically _increasing_. Checking this is expensive, and is
/// left to the user.
///
/// Outside the grid, the edge cell on each saturated dimension is extended,
/// which continues the multilinear interpolant linearly along that dimension.
///
/// Operation Complexity
/// * O(2^ndims) for interpolation and extrapolation in all regions.
///
/// Memory Complexity
/// * O(2^ndims) scratch storage per evaluation batch.
///
/// Timing
/// * Timing determinism is very tight, but not guaranteed due to the use of a bisection search.
pub struct MultilinearRectilinear<'a, T: Float> {
    /// x, y, ... coordinate grids, each entry of size dims[i]
    grids: &'a [&'a [T]],

    /// Size of each dimension
    dims: Vec<usize>,

    /// Cumulative products of higher dimensions, used for indexing
    dimprod: Vec<usize>,

    /// Values at each point, size prod(dims)
    vals: &'a [T],
}

/// Per-evaluation scratch storage
struct Scratch<T> {
    origin: Vec<usize>,
    t: Vec<T>,
    store: Vec<T>,
}

impl<T: Float> Scratch<T> {
    fn new(ndims: usize) -> Self {
        Self {
            origin: vec![0; ndims],
            t: vec![T::zero(); ndims],
            store: vec![T::zero(); 1 << ndims],
        }
    }
}

impl<'a, T: Float> MultilinearRectilinear<'a, T> {
    /// Build a new interpolator, using O(ndims) calculations and storage.
    ///
    /// This method does not handle degenerate dimensions; all grids must have at least 2 entries.
    ///
    /// Assumes C-style ordering of vals (z(x0, y0), z(x0, y1), ..., z(x0, yn), z(x1, y0), ...).
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
        let dims: Vec<usize> = grids.iter().map(|g| g.len()).collect();
        let nvals: usize = dims.iter().product();
        if vals.len() != nvals {
            return Err("Dimension mismatch");
        };
        // Check if any grids are degenerate
        let degenerate = dims.iter().any(|&x| x < 2);
        if degenerate {
            return Err("All grids must have at least 2 entries");
        };
        // Check that at least the first two entries in each grid are monotonic
        let monotonic_maybe = grids.iter().all(|&g| g[1] > g[0]);
        if !monotonic_maybe {
            return Err("All grids must be monotonically increasing");
        };

        // Populate cumulative product of higher dimensions for indexing.
        //
        // Each entry is the cumulative product of the size of dimensions
        // higher than this one, which is the stride between blocks
        // relating to a given index along each dimension.
        let mut dimprod = vec![1_usize; ndims];
        let mut acc = 1;
        for i in 0..ndims {
            dimprod[ndims - i - 1] = acc;
            acc *= dims[ndims - i - 1];
        }

        Ok(Self {
            grids,
            dims,
            dimprod,
            vals,
        })
    }

    pub fn ndims(&self) -> usize {
        self.dims.len()
    }

    /// Interpolate on a contiguous list of observation points.
    ///
    /// # Errors
    ///   * If the dimensionality of the point does not match the data
    ///   * If the dimensionality of point or data does not match the grid
    pub fn interp(&self, x: &[&[T]], out: &mut [T]) -> Result<(), &'static str> {
        let n = out.len();
        let ndims = self.ndims();

        // Make sure there are enough coordinate inputs for each dimension
        if x.len() != ndims {
            return Err("Dimension mismatch");
        }

        // Make sure the size of inputs and output match
        let size_matches = x.iter().all(|&xx| xx.len() == n);
        if !size_matches {
            return Err("Dimension mismatch");
        }

        let mut scratch = Scratch::new(ndims);
        let mut tmp = vec![T::zero(); ndims];
        for i in 0..n {
            (0..ndims).for_each(|j| tmp[j] = x[j][i]);
            out[i] = self.interp_with(&tmp, &mut scratch);
        }

        Ok(())
    }

    /// Interpolate the value at a point.
    ///
    /// # Errors
    ///   * If the dimensionality of the point does not match the data
    pub fn interp_one(&self, x: &[T]) -> Result<T, &'static str> {
        if x.len() != self.ndims() {
            return Err("Dimension mismatch");
        }
        Ok(self.interp_with(x, &mut Scratch::new(self.ndims())))
    }

    fn interp_with(&self, x: &[T], scratch: &mut Scratch<T>) -> T {
        let ndims = self.ndims();
        let Scratch { origin, t, store } = scratch;

        // Lower corner of the containing cell and the fractional position in it.
        // `t` falls outside [0, 1] for points outside the grid.
        for j in 0..ndims {
            origin[j] = self.get_loc(x[j], j);
            let x0 = self.grids[j][origin[j]];
            let x1 = self.grids[j][origin[j] + 1];
            t[j] = (x[j] - x0) / (x1 - x0);
        }

        // Gather the 2^ndims vertex values. The bit pattern of the vertex index
        // matches C-ordered array indexing, with dimension 0 most significant.
        let nverts = store.len();
        for (i, v) in store.iter_mut().enumerate() {
            let mut k = 0;
            for j in 0..ndims {
                let offset = (i >> (ndims - j - 1)) & 1;
                k += (origin[j] + offset) * self.dimprod[j];
            }
            *v = self.vals[k];
        }

        // Collapse one dimension at a time, starting from the last
        let mut width = nverts;
        for j in (0..ndims).rev() {
            width /= 2;
            for p in 0..width {
                let y0 = store[2 * p];
                let dy = store[2 * p + 1] - y0;
                store[p] = y0 + t[j] * dy;
            }
        }

        store[0]
    }

    /// Get the lower-corner index along this dimension where `x` is found,
    /// saturating to the bounds at the edges if necessary.
    ///
    /// At the high bound of a given dimension, saturates to the interior.
    #[inline]
    fn get_loc(&self, v: T, dim: usize) -> usize {
        let grid = self.grids[dim];

        // Bisection search to find location on the grid.
        //
        // The search will return `0` if the point is outside-low,
        // and will return `self.dims[dim]` if outside-high.
        let iloc: isize = grid.partition_point(|x| *x < v) as isize - 1;

        let dimmax = self.dims[dim] as isize - 2; // maximum index for lower corner
        iloc.max(0).min(dimmax) as usize
    }
}
