//! Interpolation scales applied to coordinates and values before
//! interpolation, and undone afterward.
//!
//! Interpolating in a transformed space is often much more accurate than
//! interpolating the raw numbers; for example, a power-law spectrum spanning
//! many decades is nearly linear after a `log` transform.
//!
//! ```rust
//! use scaled_interp::scale::interpolation_scale;
//!
//! let scale = interpolation_scale("log").unwrap();
//! let y = scale.forward(vec![1.0, 10.0, 100.0]).unwrap();
//! let x = scale.backward(y).into_value();
//! assert!((x[[2]] - 100.0).abs() < 1e-9);
//! ```
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use ndarray::ArrayD;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{InterpError, Result};
use crate::units::{Quantity, Unit};

/// Smallest positive normal single-precision float; the floor of the log scale.
pub const TINY: f64 = f32::MIN_POSITIVE as f64;

/// The transform applied by a [`Scale`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    /// Identity
    #[default]
    #[serde(alias = "linear")]
    Lin,
    /// Natural log, floored at [`TINY`]
    Log,
    /// Sign-preserving square root
    Sqrt,
}

impl ScaleKind {
    /// Transform a single value.
    #[inline]
    pub fn scale(&self, x: f64) -> f64 {
        match self {
            ScaleKind::Lin => x,
            ScaleKind::Log => x.clamp(TINY, f64::INFINITY).ln(),
            ScaleKind::Sqrt => signum(x) * x.abs().sqrt(),
        }
    }

    /// Undo [`ScaleKind::scale`] for a single value.
    ///
    /// The log inverse is not floored here; see [`ScaleKind::inverse`].
    #[inline]
    pub fn inverse_one(&self, y: f64) -> f64 {
        match self {
            ScaleKind::Lin => y,
            ScaleKind::Log => y.exp(),
            ScaleKind::Sqrt => y * y.abs(),
        }
    }

    /// Undo the transform on an array in place.
    ///
    /// Returns `true` if any log-scale output fell within [`TINY`] of zero
    /// and was forced to exactly zero.
    pub fn inverse(&self, values: &mut ArrayD<f64>) -> bool {
        let mut floored = false;
        values.mapv_inplace(|y| {
            let x = self.inverse_one(y);
            if *self == ScaleKind::Log && x.abs() - TINY <= TINY {
                floored = true;
                0.0
            } else {
                x
            }
        });
        floored
    }
}

/// `sign` with `sign(0) == 0`, and NaN passed through.
#[inline]
pub(crate) fn signum(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        x
    }
}

impl FromStr for ScaleKind {
    type Err = InterpError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "lin" | "linear" => Ok(ScaleKind::Lin),
            "log" => Ok(ScaleKind::Log),
            "sqrt" => Ok(ScaleKind::Sqrt),
            other => Err(InterpError::InvalidScale(other.to_string())),
        }
    }
}

impl fmt::Display for ScaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScaleKind::Lin => "lin",
            ScaleKind::Log => "log",
            ScaleKind::Sqrt => "sqrt",
        };
        write!(f, "{name}")
    }
}

/// A transform with its inverse, remembering the unit of the first
/// unit-bearing input it sees.
///
/// The unit is recorded at most once; later inputs are converted to it
/// and results of [`Scale::backward`] carry it.
#[derive(Debug, Default)]
pub struct Scale {
    kind: ScaleKind,
    unit: OnceLock<Unit>,
    precision_warnings: AtomicUsize,
}

/// Build a fresh [`Scale`] from its name (`lin`, `linear`, `log`, `sqrt`).
///
/// # Errors
/// * If the name is not one of the above
pub fn interpolation_scale(name: &str) -> Result<Scale> {
    Ok(Scale::new(name.parse()?))
}

impl Scale {
    pub fn new(kind: ScaleKind) -> Self {
        Self {
            kind,
            unit: OnceLock::new(),
            precision_warnings: AtomicUsize::new(0),
        }
    }

    pub fn kind(&self) -> ScaleKind {
        self.kind
    }

    /// The recorded unit, if a unit-bearing input has been seen.
    pub fn unit(&self) -> Option<&Unit> {
        self.unit.get()
    }

    /// Number of times [`Scale::backward`] hit the log-scale precision floor.
    pub fn precision_warnings(&self) -> usize {
        self.precision_warnings.load(Ordering::Relaxed)
    }

    /// Map raw values into the transformed space.
    ///
    /// # Errors
    /// * If the input carries a unit incompatible with the recorded one
    pub fn forward(&self, values: impl Into<Quantity>) -> Result<ArrayD<f64>> {
        let values = values.into();
        let mut raw = match (self.unit.get(), values.unit.as_ref()) {
            (Some(recorded), _) => values.to_value(recorded)?,
            (None, Some(unit)) => {
                // If another caller recorded first, convert to theirs
                let recorded = self.unit.get_or_init(|| unit.clone());
                values.to_value(recorded)?
            }
            (None, None) => values.into_value(),
        };
        let kind = self.kind;
        raw.mapv_inplace(|x| kind.scale(x));
        Ok(raw)
    }

    /// Map transformed values back, reattaching the recorded unit.
    pub fn backward(&self, mut values: ArrayD<f64>) -> Quantity {
        if self.kind.inverse(&mut values) {
            self.precision_warnings.fetch_add(1, Ordering::Relaxed);
            warn!("Interpolated values reached float32 precision limit");
        }
        Quantity {
            value: values,
            unit: self.unit.get().cloned(),
        }
    }
}

impl Clone for Scale {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            unit: self.unit.clone(),
            precision_warnings: AtomicUsize::new(self.precision_warnings()),
        }
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use approx::assert_relative_eq;
    use ndarray::{arr1, ArrayD};

    use super::*;
    use crate::testing::{randn, rng_fixed_seed};

    #[test]
    fn test_names() {
        assert_eq!("lin".parse::<ScaleKind>().unwrap(), ScaleKind::Lin);
        assert_eq!("linear".parse::<ScaleKind>().unwrap(), ScaleKind::Lin);
        assert_eq!("log".parse::<ScaleKind>().unwrap(), ScaleKind::Log);
        assert_eq!("sqrt".parse::<ScaleKind>().unwrap(), ScaleKind::Sqrt);

        let err = interpolation_scale("cubic").unwrap_err();
        assert_eq!(err, InterpError::InvalidScale("cubic".to_string()));
    }

    #[test]
    fn test_round_trip() {
        let mut rng = rng_fixed_seed();
        let positive: Vec<f64> = randn::<f64>(&mut rng, 50)
            .iter()
            .map(|x| 1e-3 + x * 1e4)
            .collect();
        let signed: Vec<f64> = randn::<f64>(&mut rng, 50)
            .iter()
            .map(|x| (x - 0.5) * 200.0)
            .collect();

        let cases = [
            (ScaleKind::Lin, &positive),
            (ScaleKind::Lin, &signed),
            (ScaleKind::Log, &positive),
            (ScaleKind::Sqrt, &positive),
            (ScaleKind::Sqrt, &signed),
        ];
        for (kind, x) in cases {
            let scale = Scale::new(kind);
            let y = scale.forward(x.clone()).unwrap();
            let back = scale.backward(y).into_value();
            for (a, b) in x.iter().zip(back.iter()) {
                assert_relative_eq!(*a, *b, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_log_near_zero_round_trip() {
        // Small, but comfortably above the float32 floor
        let x = vec![1e-30, 1e-20, 1e-10];
        let scale = Scale::new(ScaleKind::Log);
        let y = scale.forward(x.clone()).unwrap();
        let back = scale.backward(y).into_value();
        for (a, b) in x.iter().zip(back.iter()) {
            assert_relative_eq!(*a, *b, max_relative = 1e-12);
        }
        assert_eq!(scale.precision_warnings(), 0);
    }

    #[test]
    fn test_log_clips_nonpositive_input() {
        let scale = Scale::new(ScaleKind::Log);
        let y = scale.forward(vec![0.0, -5.0]).unwrap();
        assert_relative_eq!(y[[0]], TINY.ln());
        assert_relative_eq!(y[[1]], TINY.ln());
    }

    #[test]
    fn test_log_floor_snaps_to_zero() {
        let scale = Scale::new(ScaleKind::Log);
        let y = arr1(&[TINY.ln(), (0.5 * TINY).ln(), 0.0]).into_dyn();
        let out = scale.backward(y).into_value();

        assert_eq!(out[[0]], 0.0);
        assert_eq!(out[[1]], 0.0);
        assert_relative_eq!(out[[2]], 1.0);
        assert_eq!(scale.precision_warnings(), 1);
    }

    #[test]
    fn test_log_propagates_nan() {
        let scale = Scale::new(ScaleKind::Log);
        let y = scale.forward(vec![f64::NAN, 0.0, f64::INFINITY]).unwrap();
        assert!(y[[0]].is_nan());
        assert_relative_eq!(y[[1]], TINY.ln());
        assert_eq!(y[[2]], f64::INFINITY);

        let x = scale.backward(y).into_value();
        assert!(x[[0]].is_nan());
        assert_eq!(x[[2]], f64::INFINITY);
    }

    #[test]
    fn test_clone_keeps_recorded_unit() {
        let scale = Scale::new(ScaleKind::Lin);
        scale
            .forward(Quantity::new(vec![1.0], Unit::tev()))
            .unwrap();
        let copy = scale.clone();
        assert_eq!(copy.kind(), ScaleKind::Lin);
        assert_eq!(copy.unit(), Some(&Unit::tev()));

        let fresh = Scale::new(ScaleKind::Log).clone();
        assert_eq!(fresh.unit(), None);
    }

    #[test]
    fn test_sqrt_preserves_sign() {
        let scale = Scale::new(ScaleKind::Sqrt);
        let y = scale.forward(vec![-4.0, 0.0, 9.0]).unwrap();
        assert_eq!(y.as_slice().unwrap(), &[-2.0, 0.0, 3.0]);
        let x = scale.backward(y).into_value();
        assert_eq!(x.as_slice().unwrap(), &[-4.0, 0.0, 9.0]);
    }

    #[test]
    fn test_unit_is_recorded_once() {
        let scale = Scale::new(ScaleKind::Log);
        let y = scale
            .forward(Quantity::new(vec![1.0, 10.0], Unit::tev()))
            .unwrap();
        assert_eq!(scale.unit(), Some(&Unit::tev()));

        // Later inputs are converted to the recorded unit
        let y_gev = scale
            .forward(Quantity::new(vec![1000.0, 10000.0], Unit::gev()))
            .unwrap();
        for (a, b) in y.iter().zip(y_gev.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
        assert_eq!(scale.unit(), Some(&Unit::tev()));

        let back = scale.backward(y);
        assert_eq!(back.unit, Some(Unit::tev()));
        assert_relative_eq!(back.value[[1]], 10.0, max_relative = 1e-12);
    }

    #[test]
    fn test_incompatible_unit_is_rejected() {
        let scale = Scale::new(ScaleKind::Lin);
        scale
            .forward(Quantity::new(vec![1.0], Unit::tev()))
            .unwrap();
        let err = scale
            .forward(Quantity::new(vec![1.0], Unit::dimensionless()))
            .unwrap_err();
        assert!(matches!(err, InterpError::UnitMismatch { .. }));
    }

    #[test]
    fn test_plain_numbers_have_no_unit() {
        let scale = Scale::new(ScaleKind::Sqrt);
        let y = scale.forward(vec![4.0]).unwrap();
        assert!(scale.backward(y).unit.is_none());
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_log_floor_warns() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let scale = Scale::new(ScaleKind::Log);
            let y = ArrayD::from_elem(ndarray::IxDyn(&[2]), -1000.0);
            let out = scale.backward(y).into_value();
            assert!(out.iter().all(|&v| v == 0.0));
        });

        let logged = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("float32 precision limit"));
        assert!(logged.contains("WARN"));
    }
}
