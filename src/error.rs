use thiserror::Error;

/// Error types for scaled grid interpolation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpError {
    /// A scale name outside of `lin`, `linear`, `log`, `sqrt`.
    #[error("Not a valid value scaling mode: '{0}'")]
    InvalidScale(String),

    /// An interpolation method name the engine does not provide.
    #[error("Method '{0}' is not defined")]
    InvalidMethod(String),

    /// Mismatch between the number or shape of inputs.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Coordinate grid that cannot be interpolated on.
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// Query point outside of the grid while extrapolation is disabled.
    #[error("One of the requested xi is out of bounds in dimension {dim}: {value}")]
    OutOfBounds { dim: usize, value: f64 },

    /// Conversion between units of different physical dimension.
    #[error("Unit '{from}' cannot be converted to '{to}'")]
    UnitMismatch { from: String, to: String },

    /// Unknown unit symbol.
    #[error("Unknown unit: '{0}'")]
    UnknownUnit(String),

    /// Error surfaced by the low-level interpolation kernels.
    #[error("Interpolation engine error: {0}")]
    Engine(&'static str),
}

/// Result type alias for interpolation operations.
pub type Result<T> = std::result::Result<T, InterpError>;

impl From<&'static str> for InterpError {
    fn from(msg: &'static str) -> Self {
        InterpError::Engine(msg)
    }
}

impl From<ndarray::ShapeError> for InterpError {
    fn from(err: ndarray::ShapeError) -> Self {
        InterpError::DimensionMismatch(err.to_string())
    }
}
