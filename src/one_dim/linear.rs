//! Special case of 1D linear interpolation, which can be
//! significantly faster than more general N-D interpolation.

use num_traits::Float;

use super::{Grid1D, GridSample, Interp1D};

/// Simple linear interpolation / extrapolation.
///
/// Outside the grid, the slope of the nearest edge cell is continued.
pub struct Linear1D<G> {
    grid: G,
}

impl<G> Linear1D<G> {
    pub fn new(grid: G) -> Self {
        Self { grid }
    }
}

impl<'a, T, G> Interp1D<'a, T, G> for Linear1D<G>
where
    T: Float,
    G: Grid1D<'a, T>,
{
    #[inline]
    fn eval_one(&self, loc: T) -> Result<T, &'static str> {
        let GridSample { x0, y0, x1, y1, .. } = self.grid.at(loc)?;

        let slope = (y1 - y0) / (x1 - x0);
        let dx = loc - x0;
        let v = y0 + slope * dx;

        Ok(v)
    }
}

#[cfg(test)]
mod test {
    use crate::one_dim::{Interp1D, RectilinearGrid1D};
    use crate::testing::{randn, rng_fixed_seed};
    use crate::utils::linspace;

    use super::Linear1D;

    #[test]
    fn test_linear_1d() {
        let rng = &mut rng_fixed_seed();

        let n = 33;
        let vals = &randn::<f64>(rng, n)[..];

        // Uneven but increasing grid
        let mut x = linspace(-2.0, 40.0, n);
        let dx = randn::<f64>(rng, n);
        (0..n).for_each(|i| x[i] += dx[i] * 0.5);
        (0..n - 1).for_each(|i| assert!(x[i + 1] > x[i]));

        let interpolator = Linear1D::new(RectilinearGrid1D::new(&x, vals).unwrap());

        // Exact at the nodes
        let y_nodes = interpolator.eval_alloc(&x).unwrap();
        (0..n).for_each(|i| assert!((y_nodes[i] - vals[i]).abs() < 1e-12));

        // Midpoints are the average of their neighbors
        let mids: Vec<f64> = (0..n - 1).map(|i| 0.5 * (x[i] + x[i + 1])).collect();
        let y_mids = interpolator.eval_alloc(&mids).unwrap();
        (0..n - 1).for_each(|i| {
            assert!((y_mids[i] - 0.5 * (vals[i] + vals[i + 1])).abs() < 1e-12);
        });
    }

    #[test]
    fn test_extrapolates_edge_slope() {
        let x = [0.0, 1.0, 2.0];
        let y = [0.0, 2.0, 3.0];
        let interpolator = Linear1D::new(RectilinearGrid1D::new(&x, &y).unwrap());

        assert_eq!(interpolator.eval_one(-1.0).unwrap(), -2.0);
        assert_eq!(interpolator.eval_one(4.0).unwrap(), 5.0);
    }
}
