//! Nearest-neighbor interpolation and extrapolation.
//! See individual modules for more detailed documentation.

pub mod rectilinear;

pub use rectilinear::NearestRectilinear;
