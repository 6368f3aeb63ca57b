//! Interpolation of one-dimensional likelihood profiles.
//!
//! A profile scan gives the change in log-likelihood `dll` at a set of
//! parameter values. Near the best fit `dll` is close to a parabola, which
//! becomes a straight line under a `sqrt` scale once the branch left of the
//! minimum is given a negative sign. Interpolating that signed curve is
//! much more accurate than interpolating `dll` directly.
use crate::config::ScaledInterpolatorConfig;
use crate::error::{InterpError, Result};
use crate::interpolator::ScaledRegularGridInterpolator;
use crate::scale::signum;
use crate::units::Quantity;

/// Value scale used for likelihood profiles unless another is requested.
pub const DEFAULT_PROFILE_SCALE: &str = "sqrt";

/// Finite-difference derivative on unit spacing.
///
/// Central differences in the interior and one-sided differences at the ends.
///
/// # Errors
/// * If there are fewer than two samples
pub fn gradient(values: &[f64]) -> Result<Vec<f64>> {
    let n = values.len();
    if n < 2 {
        return Err(InterpError::DimensionMismatch(format!(
            "At least 2 samples are needed for a gradient, got {n}"
        )));
    }

    let mut out = Vec::with_capacity(n);
    out.push(values[1] - values[0]);
    for i in 1..n - 1 {
        out.push((values[i + 1] - values[i - 1]) / 2.0);
    }
    out.push(values[n - 1] - values[n - 2]);

    Ok(out)
}

/// Build an interpolator for a likelihood profile.
///
/// The values interpolated are `sign(gradient(dll)) * dll` in the given
/// scale, so the descending branch is negative and the minimum is a zero
/// crossing.
///
/// With the default query options (`clip = true`), every point left of the
/// minimum evaluates to exactly `0.0`, and only the ascending branch returns
/// `dll`. Query with `QueryOptions::default().with_clip(false)` to get the
/// signed profile, `-dll` on the descending branch and `dll` on the
/// ascending one; its absolute value is the profile itself.
///
/// # Errors
/// * If the scan has fewer than two samples or the lengths do not match
/// * If the scan values are not strictly monotonic
/// * If `interp_scale` is not a valid scale name
pub fn interpolate_likelihood_profile(
    value_scan: impl Into<Quantity>,
    dloglike_scan: &[f64],
    interp_scale: &str,
) -> Result<ScaledRegularGridInterpolator> {
    let sign: Vec<f64> = gradient(dloglike_scan)?
        .into_iter()
        .map(signum)
        .collect();
    let values: Vec<f64> = sign
        .iter()
        .zip(dloglike_scan)
        .map(|(s, dll)| s * dll)
        .collect();

    let config = ScaledInterpolatorConfig::default().with_values_scale(interp_scale);
    ScaledRegularGridInterpolator::new(vec![value_scan.into()], values, &config)
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::*;
    use crate::config::QueryOptions;
    use crate::units::Unit;

    #[test]
    fn test_gradient() {
        let g = gradient(&[4.0, 1.0, 0.0, 1.0, 4.0]).unwrap();
        assert_eq!(g, vec![-3.0, -2.0, 0.0, 2.0, 3.0]);

        assert_eq!(gradient(&[1.0, 3.0]).unwrap(), vec![2.0, 2.0]);
        assert!(matches!(
            gradient(&[1.0]),
            Err(InterpError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn test_parabola_profile() {
        let scan = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let dll = [4.0, 1.0, 0.0, 1.0, 4.0];
        let interp = interpolate_likelihood_profile(scan, &dll, DEFAULT_PROFILE_SCALE).unwrap();

        let at_min = interp.interp(&[3.0.into()]).unwrap();
        assert_relative_eq!(at_min.value[[]], 0.0, epsilon = 1e-12);

        // Nodes are reproduced on both branches, signed before clipping
        let nodes = interp
            .call(
                &[vec![1.0, 2.0, 4.0, 5.0].into()],
                &QueryOptions::default().with_clip(false),
            )
            .unwrap();
        for (a, b) in nodes.value.iter().zip([-4.0, -1.0, 1.0, 4.0]) {
            assert_relative_eq!(*a, b, epsilon = 1e-12);
        }

        // A parabola is a straight line in the signed sqrt space
        let right = interp.interp(&[4.5.into()]).unwrap();
        assert_relative_eq!(right.value[[]], 2.25, epsilon = 1e-12);

        // Without clipping, the descending branch comes back negative
        let left = interp
            .call(&[2.5.into()], &QueryOptions::default().with_clip(false))
            .unwrap();
        assert_relative_eq!(left.value[[]], -0.25, epsilon = 1e-12);
        let clipped = interp.interp(&[2.5.into()]).unwrap();
        assert_eq!(clipped.value[[]], 0.0);
    }

    #[test]
    fn test_default_query_folds_descending_branch() {
        let scan = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let dll = [4.0, 1.0, 0.0, 1.0, 4.0];
        let interp = interpolate_likelihood_profile(scan, &dll, DEFAULT_PROFILE_SCALE).unwrap();
        let q = [Quantity::from(vec![1.0, 1.5, 5.0])];

        let clipped = interp.interp(&q).unwrap();
        assert_eq!(clipped.value[[0]], 0.0);
        assert_eq!(clipped.value[[1]], 0.0);
        assert_relative_eq!(clipped.value[[2]], 4.0, epsilon = 1e-12);

        // The magnitude of the signed profile is the profile
        let signed = interp
            .call(&q, &QueryOptions::default().with_clip(false))
            .unwrap();
        for (a, b) in signed.value.iter().zip([4.0, 2.25, 4.0]) {
            assert_relative_eq!(a.abs(), b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_profile_with_units() {
        let scan = Quantity::new(vec![1.0, 2.0, 3.0], Unit::tev());
        let interp = interpolate_likelihood_profile(scan, &[1.0, 0.0, 1.0], "lin").unwrap();

        let out = interp
            .interp(&[Quantity::new(vec![2500.0], Unit::gev())])
            .unwrap();
        assert_relative_eq!(out.value[[0]], 0.5, epsilon = 1e-12);
        assert_eq!(out.unit, None);
    }

    #[test]
    fn test_invalid_profile() {
        assert!(matches!(
            interpolate_likelihood_profile(vec![1.0, 2.0], &[1.0, 0.0, 1.0], "sqrt"),
            Err(InterpError::DimensionMismatch(_))
        ));
        assert!(matches!(
            interpolate_likelihood_profile(vec![1.0], &[1.0], "sqrt"),
            Err(InterpError::DimensionMismatch(_))
        ));
        assert_eq!(
            interpolate_likelihood_profile(vec![1.0, 2.0], &[1.0, 0.0], "cube").unwrap_err(),
            InterpError::InvalidScale("cube".to_string())
        );
    }
}
