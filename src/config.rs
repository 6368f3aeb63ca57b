//! Configuration options for building and querying scaled interpolators.
//!
//! All options have defaults matching the common use case (linear scales,
//! extrapolation enabled, linear interpolation, results clipped at zero)
//! and can be embedded in larger serialized analysis settings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{InterpError, Result};
use crate::grid::OutOfBounds;

/// Interpolation method used by the grid engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Multilinear interpolation between the surrounding grid nodes
    #[default]
    Linear,
    /// Value at the nearest grid node; ties go to the lower node
    Nearest,
}

impl FromStr for Method {
    type Err = InterpError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "linear" => Ok(Method::Linear),
            "nearest" => Ok(Method::Nearest),
            other => Err(InterpError::InvalidMethod(other.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Linear => write!(f, "linear"),
            Method::Nearest => write!(f, "nearest"),
        }
    }
}

/// Value used for query points outside of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillValue {
    /// Extrapolate from the edge cells
    Extrapolate,
    /// Constant value
    Constant(f64),
}

/// Options passed through to the underlying grid engine.
///
/// Unset options fall back to the engine defaults: out-of-bounds queries
/// are an error, and when that is turned off they are filled with NaN.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GridOptions {
    /// Whether out-of-bounds queries are an error. Default: true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds_error: Option<bool>,

    /// Fill for out-of-bounds queries when they are not an error. Default: NaN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_value: Option<FillValue>,
}

impl GridOptions {
    pub fn with_bounds_error(mut self, bounds_error: bool) -> Self {
        self.bounds_error = Some(bounds_error);
        self
    }

    pub fn with_fill_value(mut self, fill_value: FillValue) -> Self {
        self.fill_value = Some(fill_value);
        self
    }

    /// Turn on extrapolation for every option the caller left unset.
    pub fn extrapolating(self) -> Self {
        Self {
            bounds_error: Some(self.bounds_error.unwrap_or(false)),
            fill_value: Some(self.fill_value.unwrap_or(FillValue::Extrapolate)),
        }
    }

    /// Resolve to the engine's out-of-bounds behavior.
    pub fn out_of_bounds(&self) -> OutOfBounds {
        if self.bounds_error.unwrap_or(true) {
            return OutOfBounds::Error;
        }
        match self.fill_value.unwrap_or(FillValue::Constant(f64::NAN)) {
            FillValue::Extrapolate => OutOfBounds::Extrapolate,
            FillValue::Constant(v) => OutOfBounds::Fill(v),
        }
    }
}

/// Configuration for [`ScaledRegularGridInterpolator`](crate::ScaledRegularGridInterpolator).
///
/// Scales are given by name and only parsed when the interpolator is built,
/// so a bad name is reported at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaledInterpolatorConfig {
    /// Scale name for each coordinate axis. Default: "lin" for every axis
    pub points_scale: Option<Vec<String>>,

    /// Scale name for the values. Default: "lin"
    pub values_scale: String,

    /// Extrapolate outside of the grid unless `grid` says otherwise. Default: true
    pub extrapolate: bool,

    /// Interpolate in 1D along this axis of the values. Default: None
    pub axis: Option<usize>,

    /// Options passed through to the grid engine
    pub grid: GridOptions,
}

impl Default for ScaledInterpolatorConfig {
    fn default() -> Self {
        Self {
            points_scale: None,
            values_scale: "lin".to_string(),
            extrapolate: true,
            axis: None,
            grid: GridOptions::default(),
        }
    }
}

impl ScaledInterpolatorConfig {
    pub fn with_points_scale<S: AsRef<str>>(mut self, scales: &[S]) -> Self {
        self.points_scale = Some(scales.iter().map(|s| s.as_ref().to_string()).collect());
        self
    }

    pub fn with_values_scale(mut self, scale: &str) -> Self {
        self.values_scale = scale.to_string();
        self
    }

    pub fn with_extrapolate(mut self, extrapolate: bool) -> Self {
        self.extrapolate = extrapolate;
        self
    }

    pub fn with_axis(mut self, axis: usize) -> Self {
        self.axis = Some(axis);
        self
    }

    pub fn with_grid_options(mut self, grid: GridOptions) -> Self {
        self.grid = grid;
        self
    }
}

/// Options for a single interpolator query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    /// Interpolation method. Default: Linear
    pub method: Method,

    /// Floor results at zero. Default: true
    pub clip: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            method: Method::Linear,
            clip: true,
        }
    }
}

impl QueryOptions {
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_clip(mut self, clip: bool) -> Self {
        self.clip = clip;
        self
    }
}
