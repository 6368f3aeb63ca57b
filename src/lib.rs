//! Scaled N-dimensional interpolation on rectilinear grids.
//!
//! Coordinates and values are mapped through a `lin`, `log`, or `sqrt`
//! scale, interpolated linearly (or by nearest neighbor) in that space,
//! and mapped back. For quantities spanning many decades, such as spectra,
//! effective areas, or background rates, interpolating in `log` space is
//! much more accurate than interpolating the raw numbers.
//!
//! # Performance Scalings
//! For multilinear interpolation, 2^ndims grid values contribute to each
//! observation point. Rectilinear grids also need a bisection search on each
//! axis to find the containing cell, which takes log2(axis size) iterations.
//!
//! | Method                        | RAM       | Interp. / Extrap. Cost       |
//! |-------------------------------|-----------|------------------------------|
//! | multilinear::rectilinear      | O(2^ndims)| O(2^ndims) + log2(gridsize)  |
//! | nearest::rectilinear          | O(ndims)  | O(ndims) + log2(gridsize)    |
//! | one_dim (along an axis)       | O(n)      | O(lanes) + log2(gridsize)    |
//!
//! # Example: Log-log Interpolation of a Power Law
//! ```rust
//! use scaled_interp::{Quantity, ScaledInterpolatorConfig, ScaledRegularGridInterpolator, Unit};
//!
//! let energy = Quantity::new(vec![0.1, 1.0, 10.0, 100.0], Unit::tev());
//! let flux = vec![1e-9, 1e-11, 1e-13, 1e-15];
//!
//! let config = ScaledInterpolatorConfig::default()
//!     .with_points_scale(&["log"])
//!     .with_values_scale("log");
//! let interp = ScaledRegularGridInterpolator::new(vec![energy], flux, &config).unwrap();
//!
//! // Query in a different, compatible unit
//! let out = interp
//!     .interp(&[Quantity::new(vec![3162.2776601683795], Unit::gev())])
//!     .unwrap();
//! assert!((out.value[[0]] / 1e-12 - 1.0).abs() < 1e-9);
//! ```
//!
//! # Example: Likelihood Profile
//! ```rust
//! use scaled_interp::{interpolate_likelihood_profile, likelihood::DEFAULT_PROFILE_SCALE};
//!
//! let amplitude = vec![1.0, 2.0, 3.0, 4.0, 5.0];
//! let dloglike = [4.0, 1.0, 0.0, 1.0, 4.0];
//! let profile =
//!     interpolate_likelihood_profile(amplitude, &dloglike, DEFAULT_PROFILE_SCALE).unwrap();
//!
//! let out = profile.interp(&[3.5.into()]).unwrap();
//! assert!((out.value[[]] - 0.25).abs() < 1e-12);
//! ```
// These "needless" range loops are a significant speedup
#![allow(clippy::needless_range_loop)]

pub mod config;
pub mod error;
pub mod grid;
pub mod interpolator;
pub mod likelihood;
pub mod multilinear;
pub mod nearest;
pub mod one_dim;
pub mod scale;
pub mod units;
pub mod utils;

pub use config::{FillValue, GridOptions, Method, QueryOptions, ScaledInterpolatorConfig};
pub use error::{InterpError, Result};
pub use grid::{GridInterpolator, OutOfBounds};
pub use interpolator::ScaledRegularGridInterpolator;
pub use likelihood::interpolate_likelihood_profile;
pub use multilinear::MultilinearRectilinear;
pub use nearest::NearestRectilinear;
pub use one_dim::{AxisInterpolator, Linear1D, Nearest1D, RectilinearGrid1D};
pub use scale::{interpolation_scale, Scale, ScaleKind};
pub use units::{Quantity, Unit};

#[cfg(test)]
pub(crate) mod testing;
