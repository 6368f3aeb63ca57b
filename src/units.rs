//! Minimal physical units for unit-bearing arrays.
//!
//! A [`Unit`] is a symbol, a physical dimension label, and a multiplier
//! relative to the reference unit of that dimension. Conversion is only
//! defined between units sharing a dimension.
//!
//! ```rust
//! use scaled_interp::units::{Quantity, Unit};
//!
//! let energy = Quantity::new(vec![1.0, 10.0], Unit::tev());
//! let gev = energy.to_value(&Unit::gev()).unwrap();
//! assert_eq!(gev[[1]], 10_000.0);
//! ```
use std::fmt;
use std::str::FromStr;

use ndarray::{arr0, Array1, ArrayD};
use serde::{Deserialize, Serialize};

use crate::error::{InterpError, Result};

/// A physical unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    symbol: String,
    dimension: String,
    multiplier: f64,
}

impl Unit {
    /// Define a unit from its symbol, dimension label, and multiplier
    /// relative to the reference unit of that dimension.
    pub fn new(symbol: &str, dimension: &str, multiplier: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            dimension: dimension.to_string(),
            multiplier,
        }
    }

    pub fn dimensionless() -> Self {
        Self::new("", "dimensionless", 1.0)
    }

    pub fn ev() -> Self {
        Self::new("eV", "energy", 1.0)
    }

    pub fn kev() -> Self {
        Self::new("keV", "energy", 1e3)
    }

    pub fn mev() -> Self {
        Self::new("MeV", "energy", 1e6)
    }

    pub fn gev() -> Self {
        Self::new("GeV", "energy", 1e9)
    }

    pub fn tev() -> Self {
        Self::new("TeV", "energy", 1e12)
    }

    /// 1 erg = 6.241509074e11 eV
    pub fn erg() -> Self {
        Self::new("erg", "energy", 6.241_509_074e11)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn dimension(&self) -> &str {
        &self.dimension
    }

    /// Multiplicative factor taking values in `self` to values in `other`.
    ///
    /// # Errors
    /// * If the units describe different physical dimensions
    pub fn conversion_factor(&self, other: &Unit) -> Result<f64> {
        if self.dimension != other.dimension {
            return Err(InterpError::UnitMismatch {
                from: self.symbol.clone(),
                to: other.symbol.clone(),
            });
        }
        Ok(self.multiplier / other.multiplier)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

impl FromStr for Unit {
    type Err = InterpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "" => Ok(Self::dimensionless()),
            "eV" => Ok(Self::ev()),
            "keV" => Ok(Self::kev()),
            "MeV" => Ok(Self::mev()),
            "GeV" => Ok(Self::gev()),
            "TeV" => Ok(Self::tev()),
            "erg" => Ok(Self::erg()),
            other => Err(InterpError::UnknownUnit(other.to_string())),
        }
    }
}

/// A numeric array that optionally carries a physical unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    pub value: ArrayD<f64>,
    pub unit: Option<Unit>,
}

impl Quantity {
    /// Unit-bearing array.
    pub fn new(value: impl Into<Quantity>, unit: Unit) -> Self {
        Self {
            value: value.into().value,
            unit: Some(unit),
        }
    }

    /// Plain numbers without a unit.
    pub fn plain(value: ArrayD<f64>) -> Self {
        Self { value, unit: None }
    }

    pub fn shape(&self) -> &[usize] {
        self.value.shape()
    }

    pub fn has_unit(&self) -> bool {
        self.unit.is_some()
    }

    /// Numeric values expressed in `unit`.
    ///
    /// Plain numbers are taken to already be expressed in `unit`.
    ///
    /// # Errors
    /// * If the carried unit cannot be converted to `unit`
    pub fn to_value(&self, unit: &Unit) -> Result<ArrayD<f64>> {
        match &self.unit {
            Some(own) => {
                let factor = own.conversion_factor(unit)?;
                if factor == 1.0 {
                    Ok(self.value.clone())
                } else {
                    Ok(self.value.mapv(|v| v * factor))
                }
            }
            None => Ok(self.value.clone()),
        }
    }

    /// Drop the unit, keeping the raw numbers.
    pub fn into_value(self) -> ArrayD<f64> {
        self.value
    }
}

impl From<ArrayD<f64>> for Quantity {
    fn from(value: ArrayD<f64>) -> Self {
        Self::plain(value)
    }
}

impl From<Array1<f64>> for Quantity {
    fn from(value: Array1<f64>) -> Self {
        Self::plain(value.into_dyn())
    }
}

impl From<Vec<f64>> for Quantity {
    fn from(value: Vec<f64>) -> Self {
        Self::plain(Array1::from(value).into_dyn())
    }
}

impl From<&[f64]> for Quantity {
    fn from(value: &[f64]) -> Self {
        Self::from(value.to_vec())
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Self::plain(arr0(value).into_dyn())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_convert_energy() {
        let factor = Unit::tev().conversion_factor(&Unit::gev()).unwrap();
        assert_relative_eq!(factor, 1e3);

        let q = Quantity::new(vec![1.0, 2.0], Unit::mev());
        let kev = q.to_value(&Unit::kev()).unwrap();
        assert_relative_eq!(kev[[0]], 1e3);
        assert_relative_eq!(kev[[1]], 2e3);
    }

    #[test]
    fn test_incompatible_dimensions() {
        let q = Quantity::new(vec![1.0], Unit::tev());
        let err = q.to_value(&Unit::dimensionless()).unwrap_err();
        assert!(matches!(err, InterpError::UnitMismatch { .. }));
    }

    #[test]
    fn test_parse_symbols() {
        assert_eq!("TeV".parse::<Unit>().unwrap(), Unit::tev());
        assert_eq!("".parse::<Unit>().unwrap(), Unit::dimensionless());
        assert!(matches!(
            "furlong".parse::<Unit>(),
            Err(InterpError::UnknownUnit(_))
        ));
    }

    #[test]
    fn test_scalar_and_vec_shapes() {
        assert_eq!(Quantity::from(2.5).shape(), &[] as &[usize]);
        assert_eq!(Quantity::from(vec![1.0, 2.0, 3.0]).shape(), &[3]);
        assert!(!Quantity::from(2.5).has_unit());
    }
}
