//! Special-cases for one-dimensional interpolation, which can use
//! a more lightweight evaluation pattern than the multidimensional methods.
//!
//! [`AxisInterpolator`] applies these along one axis of an N-dimensional
//! array, one lane at a time.

pub mod axis;
pub mod hold;
pub mod linear;

pub use axis::AxisInterpolator;
pub use hold::Nearest1D;
pub use linear::Linear1D;

use num_traits::Float;

/// Extrapolation flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extrap {
    Inside,
    OutsideLow,
    OutsideHigh,
}

/// The bracketing cell of a point in a grid
pub struct GridSample<T> {
    pub x0: T,
    pub y0: T,
    pub x1: T,
    pub y1: T,
    pub extrap: Extrap,
}

/// A 1D grid
pub trait Grid1D<'a, T: Float> {
    /// Get the left and right values and their locations
    /// for an observation point at a given location.
    ///
    /// For observation points outside the grid, the returned
    /// locations may not bracket the observation point.
    fn at(&self, loc: T) -> Result<GridSample<T>, &'static str>;
}

/// A one-dimensional interpolator.
pub trait Interp1D<'a, T: Float, G: Grid1D<'a, T>> {
    /// Evaluate the interpolant at an observation point.
    fn eval_one(&self, loc: T) -> Result<T, &'static str>;

    /// Evaluate the interpolant at a set of observation points.
    #[inline]
    fn eval(&self, locs: &[T], out: &mut [T]) -> Result<(), &'static str> {
        if locs.len() != out.len() {
            return Err("Length mismatch");
        }

        for i in 0..locs.len() {
            out[i] = self.eval_one(locs[i])?;
        }

        Ok(())
    }

    /// Evaluate the interpolant at a set of observation points, allocating
    /// for the output values for convenience.
    #[inline]
    fn eval_alloc(&self, locs: &[T]) -> Result<Vec<T>, &'static str> {
        let mut out = vec![T::zero(); locs.len()];
        self.eval(locs, &mut out)?;
        Ok(out)
    }
}

/// A rectilinear grid, which may have uneven spacing.
///
/// Assumes the grid is monotonically _increasing_.
#[derive(Clone, Copy)]
pub struct RectilinearGrid1D<'a, T: Float> {
    grid: &'a [T],
    vals: &'a [T],
}

impl<'a, T: Float> RectilinearGrid1D<'a, T> {
    /// # Errors
    /// * If the grid and values have different lengths
    /// * If there are fewer than two grid points
    pub fn new(grid: &'a [T], vals: &'a [T]) -> Result<Self, &'static str> {
        if grid.len() != vals.len() || grid.len() < 2 {
            return Err("Length mismatch");
        }

        Ok(Self { grid, vals })
    }

    /// Get the index of the lower corner of the containing grid cell,
    /// clipped to the interior cells.
    #[inline]
    pub fn index(&self, loc: T) -> (usize, Extrap) {
        let i = ((self.grid.partition_point(|v| v < &loc) as isize - 1).max(0) as usize)
            .min(self.grid.len() - 2);

        let extrap = match loc {
            x if x < self.grid[0] => Extrap::OutsideLow,
            x if x > self.grid[self.grid.len() - 1] => Extrap::OutsideHigh,
            _ => Extrap::Inside,
        };

        (i, extrap)
    }
}

impl<'a, T: Float> Grid1D<'a, T> for RectilinearGrid1D<'a, T> {
    #[inline]
    fn at(&self, loc: T) -> Result<GridSample<T>, &'static str> {
        let (i, extrap) = self.index(loc);

        let (x0, x1) = (self.grid[i], self.grid[i + 1]);
        let (y0, y1) = (self.vals[i], self.vals[i + 1]);

        Ok(GridSample {
            x0,
            y0,
            x1,
            y1,
            extrap,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_index_clips_to_interior() {
        let x = [0.0, 1.0, 3.0, 7.0];
        let y = [0.0; 4];
        let g = RectilinearGrid1D::new(&x, &y).unwrap();

        assert_eq!(g.index(-1.0), (0, Extrap::OutsideLow));
        assert_eq!(g.index(0.0), (0, Extrap::Inside));
        assert_eq!(g.index(2.0), (1, Extrap::Inside));
        assert_eq!(g.index(3.0), (1, Extrap::Inside));
        assert_eq!(g.index(7.0), (2, Extrap::Inside));
        assert_eq!(g.index(9.0), (2, Extrap::OutsideHigh));
    }

    #[test]
    fn test_degenerate_grid() {
        assert!(RectilinearGrid1D::new(&[1.0], &[1.0]).is_err());
        assert!(RectilinearGrid1D::new(&[1.0, 2.0], &[1.0]).is_err());
    }
}
