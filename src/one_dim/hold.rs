//! Piecewise-constant 1D interpolators

use num_traits::Float;

use super::{Grid1D, GridSample, Interp1D};

/// Nearest-value piecewise-constant interpolation.
/// In the event of a tie, the left value is taken.
pub struct Nearest1D<G> {
    grid: G,
}

impl<G> Nearest1D<G> {
    pub fn new(grid: G) -> Self {
        Self { grid }
    }
}

impl<'a, T, G> Interp1D<'a, T, G> for Nearest1D<G>
where
    T: Float,
    G: Grid1D<'a, T>,
{
    #[inline]
    fn eval_one(&self, loc: T) -> Result<T, &'static str> {
        if loc.is_nan() {
            return Ok(T::nan());
        }
        let GridSample { x0, y0, x1, y1, .. } = self.grid.at(loc)?;

        let dx0 = (loc - x0).abs();
        let dx1 = (loc - x1).abs();

        let v = match dx1 >= dx0 {
            true => y0,
            false => y1,
        };

        Ok(v)
    }
}

#[cfg(test)]
mod test {
    use crate::one_dim::{Interp1D, RectilinearGrid1D};
    use crate::testing::{randn, rng_fixed_seed};
    use crate::utils::linspace;

    use super::Nearest1D;

    #[test]
    fn test_nearest_1d() {
        let rng = &mut rng_fixed_seed();

        let n = 77;

        let vals = &randn::<f64>(rng, n)[..];

        let (start, stop) = (-3.0, 314.0);
        let x = linspace(start, stop, n);
        let grid = RectilinearGrid1D::new(&x, vals).unwrap();
        let nearest = Nearest1D::new(grid);

        // Observations under both interpolation and extrapolation
        let mut locs = randn::<f64>(rng, 3 * n);
        locs.iter_mut()
            .for_each(|x| *x = (*x * 2.0 * (stop - start)) + 2.0 * start);

        let y = nearest.eval_alloc(&locs).unwrap();

        for i in 0..locs.len() {
            let loc = locs[i];
            let j: usize = ((x.partition_point(|v| v < &loc) as isize - 1).max(0) as usize)
                .min(x.len() - 2);

            let (xleft, xright) = (x[j], x[j + 1]);
            let (yleft, yright) = (vals[j], vals[j + 1]);

            let expected = match (loc - xleft).abs() <= (xright - loc).abs() {
                true => yleft,
                false => yright,
            };
            assert_eq!(y[i], expected);
        }
    }

    #[test]
    fn test_tie_takes_left() {
        let x = [0.0, 2.0];
        let y = [10.0, 20.0];
        let nearest = Nearest1D::new(RectilinearGrid1D::new(&x, &y).unwrap());
        assert_eq!(nearest.eval_one(1.0).unwrap(), 10.0);
        assert_eq!(nearest.eval_one(1.5).unwrap(), 20.0);
    }

    #[test]
    fn test_nan_propagates() {
        let x = [0.0, 1.0, 2.0];
        let y = [10.0, 20.0, 30.0];
        let nearest = Nearest1D::new(RectilinearGrid1D::new(&x, &y).unwrap());
        assert!(nearest.eval_one(f64::NAN).unwrap().is_nan());
    }
}
