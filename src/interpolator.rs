//! Grid interpolation in a rescaled space.
//!
//! Coordinates and values are mapped through their [`Scale`]s before the
//! grid engine is built, query points are mapped the same way, and results
//! are mapped back through the inverse of the value scale.
//!
//! ```rust
//! use scaled_interp::{Quantity, ScaledInterpolatorConfig, ScaledRegularGridInterpolator};
//!
//! let energy = vec![1.0, 10.0, 100.0, 1000.0];
//! let flux = vec![1e-10, 1e-12, 1e-14, 1e-16];
//! let config = ScaledInterpolatorConfig::default()
//!     .with_points_scale(&["log"])
//!     .with_values_scale("log");
//!
//! let interp = ScaledRegularGridInterpolator::new(vec![energy.into()], flux, &config).unwrap();
//! let out = interp.interp(&[Quantity::from(31.622776601683793)]).unwrap();
//! assert!((out.value[[]] / 1e-13 - 1.0).abs() < 1e-9);
//! ```
use ndarray::{ArrayD, IxDyn};
use tracing::debug;

use crate::config::{QueryOptions, ScaledInterpolatorConfig};
use crate::error::{InterpError, Result};
use crate::grid::GridInterpolator;
use crate::one_dim::AxisInterpolator;
use crate::scale::{interpolation_scale, Scale};
use crate::units::Quantity;
use crate::utils::broadcast_shape;

/// The engine built over the transformed grid.
#[derive(Debug, Clone)]
enum Engine {
    Grid(GridInterpolator),
    Axis(AxisInterpolator),
}

/// Interpolator on a rectilinear grid that interpolates linearly in a
/// rescaled space of coordinates and values.
///
/// If the values vary over many orders of magnitude, a `log` value scale is
/// usually much more accurate than interpolating the raw numbers.
#[derive(Debug, Clone)]
pub struct ScaledRegularGridInterpolator {
    scale_points: Vec<Scale>,
    scale: Scale,
    axis: Option<usize>,
    engine: Engine,
}

impl ScaledRegularGridInterpolator {
    /// Build an interpolator from one coordinate array per dimension and the
    /// values on the grid they span.
    ///
    /// With `config.axis` set, `points` holds the single coordinate array of
    /// that axis and the other axes of `values` are carried through unchanged.
    ///
    /// # Errors
    /// * If a scale name is not valid
    /// * If the number of scales does not match the number of coordinate arrays
    /// * If the coordinate arrays do not match the shape of `values`
    /// * If any coordinate array is not 1-D, too short, or not monotonic
    /// * If a unit cannot be converted to the one already recorded
    pub fn new(
        points: Vec<Quantity>,
        values: impl Into<Quantity>,
        config: &ScaledInterpolatorConfig,
    ) -> Result<Self> {
        let scale_points = match &config.points_scale {
            Some(names) => names
                .iter()
                .map(|name| interpolation_scale(name))
                .collect::<Result<Vec<_>>>()?,
            None => (0..points.len())
                .map(|_| interpolation_scale("lin"))
                .collect::<Result<Vec<_>>>()?,
        };
        let scale = interpolation_scale(&config.values_scale)?;

        if scale_points.len() != points.len() {
            return Err(InterpError::DimensionMismatch(format!(
                "{} point scales given for {} coordinate arrays",
                scale_points.len(),
                points.len()
            )));
        }

        let mut points_scaled = Vec::with_capacity(points.len());
        for (dim, (p, s)) in points.into_iter().zip(&scale_points).enumerate() {
            let p = s.forward(p)?;
            if p.ndim() != 1 {
                return Err(InterpError::DimensionMismatch(format!(
                    "The points in dimension {dim} must be 1-dimensional"
                )));
            }
            points_scaled.push(p.iter().copied().collect::<Vec<f64>>());
        }
        let values_scaled = scale.forward(values)?;

        let engine = match config.axis {
            None => {
                let options = match config.extrapolate {
                    true => config.grid.extrapolating(),
                    false => config.grid,
                };
                let bounds = options.out_of_bounds();
                debug!(
                    ndim = points_scaled.len(),
                    values_scale = %scale.kind(),
                    ?bounds,
                    "Building scaled grid interpolator"
                );
                Engine::Grid(GridInterpolator::new(points_scaled, values_scaled, bounds)?)
            }
            Some(axis) => {
                if points_scaled.len() != 1 {
                    return Err(InterpError::DimensionMismatch(format!(
                        "Interpolation along axis {axis} takes 1 coordinate array, got {}",
                        points_scaled.len()
                    )));
                }
                let bounds = config.grid.out_of_bounds();
                debug!(
                    axis,
                    values_scale = %scale.kind(),
                    ?bounds,
                    "Building scaled axis interpolator"
                );
                Engine::Axis(AxisInterpolator::new(
                    &points_scaled[0],
                    values_scaled,
                    axis,
                    bounds,
                )?)
            }
        };

        Ok(Self {
            scale_points,
            scale,
            axis: config.axis,
            engine,
        })
    }

    /// Scales applied to the coordinate arrays, in order.
    pub fn scale_points(&self) -> &[Scale] {
        &self.scale_points
    }

    /// Scale applied to the values.
    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    pub fn axis(&self) -> Option<usize> {
        self.axis
    }

    /// Interpolate with linear interpolation and results clipped at zero.
    ///
    /// # Errors
    /// * See [`ScaledRegularGridInterpolator::call`]
    pub fn interp(&self, points: &[Quantity]) -> Result<Quantity> {
        self.call(points, &QueryOptions::default())
    }

    /// Interpolate at the given coordinates, one array per dimension.
    ///
    /// The coordinate arrays are broadcast against each other, and the
    /// result has the broadcast shape. In axis mode, the result has the
    /// shape of the values with the interpolation axis replaced by the
    /// shape of the single coordinate array.
    ///
    /// # Errors
    /// * If the number of coordinate arrays does not match the grid
    /// * If the coordinate arrays cannot be broadcast together
    /// * If a point is outside the grid and extrapolation is disabled
    /// * If a unit cannot be converted to the one recorded at construction
    pub fn call(&self, points: &[Quantity], options: &QueryOptions) -> Result<Quantity> {
        if points.len() != self.scale_points.len() {
            return Err(InterpError::DimensionMismatch(format!(
                "Expected {} coordinate arrays, got {}",
                self.scale_points.len(),
                points.len()
            )));
        }

        let scaled = points
            .iter()
            .zip(&self.scale_points)
            .map(|(p, s)| s.forward(p.clone()))
            .collect::<Result<Vec<_>>>()?;

        let values = match &self.engine {
            Engine::Grid(grid) => {
                let shapes: Vec<&[usize]> = scaled.iter().map(|a| a.shape()).collect();
                let shape = broadcast_shape(&shapes).ok_or_else(|| {
                    InterpError::DimensionMismatch(
                        "Coordinate arrays cannot be broadcast to a single shape".to_string(),
                    )
                })?;

                let mut columns = Vec::with_capacity(scaled.len());
                for a in &scaled {
                    let b = a.broadcast(IxDyn(&shape)).ok_or_else(|| {
                        InterpError::DimensionMismatch(
                            "Coordinate arrays cannot be broadcast to a single shape".to_string(),
                        )
                    })?;
                    columns.push(b.iter().copied().collect::<Vec<f64>>());
                }
                let xi: Vec<&[f64]> = columns.iter().map(|c| &c[..]).collect();

                let flat = grid.interp(&xi, options.method)?;
                ArrayD::from_shape_vec(IxDyn(&shape), flat)?
            }
            Engine::Axis(axis) => axis.interp(&scaled[0], options.method)?,
        };

        let mut out = self.scale.backward(values);
        if options.clip {
            out.value.mapv_inplace(|v| if v < 0.0 { 0.0 } else { v });
        }
        Ok(out)
    }
}
