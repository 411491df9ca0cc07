//! Common helpers for conformal projection math: the parallel scale factor
//! (`msfn`), the isometric latitude parameter (`tsfn`) and its inverse
//! (`phi2`).
//!
//! These follow the PROJ functions of the same names (Snyder 1987, eqs. 14-15,
//! 15-9 and 7-9). Each is generic over the float width so single and double
//! precision callers share one body.

use num_traits::{Float, FloatConst, ToPrimitive};

use crate::error::ProjError;

/// Default iteration budget for [`phi2`].
pub const PHI2_MAX_ITERATIONS: usize = 15;

/// Default convergence tolerance for [`phi2`], in radians.
pub const PHI2_TOLERANCE: f64 = 1.0e-8;

#[inline]
fn constant<T: Float>(x: f64) -> T {
    T::from(x).unwrap_or_else(T::nan)
}

#[inline]
fn as_f64<T: Float>(x: T) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}

/// Parallel (meridional) scale factor m(φ) = cos φ / √(1 − e² sin² φ).
///
/// Callers guarantee `sinphi² + cosphi² ≈ 1` and `0 ≤ es < 1`; both are only
/// checked in debug builds.
#[inline]
pub fn msfn<T: Float>(sinphi: T, cosphi: T, es: T) -> T {
    debug_assert!(
        es >= T::zero() && es < T::one(),
        "eccentricity squared must lie in [0, 1), got {}",
        as_f64(es)
    );
    debug_assert!(
        (sinphi * sinphi + cosphi * cosphi - T::one()).abs() <= T::epsilon().sqrt(),
        "inconsistent sin/cos pair ({}, {})",
        as_f64(sinphi),
        as_f64(cosphi)
    );
    cosphi / (T::one() - es * sinphi * sinphi).sqrt()
}

/// Isometric latitude parameter ts(φ) = exp(−ψ).
///
/// ```text
/// ts = tan(π/4 − φ/2) / ((1 − e sin φ) / (1 + e sin φ))^(e/2)
/// ```
///
/// Tends to 0 at the north pole and diverges at the south pole. Callers
/// working near the south pole branch before calling.
#[inline]
pub fn tsfn<T: Float + FloatConst>(phi: T, sinphi: T, e: T) -> T {
    let half = constant::<T>(0.5);
    let con = sinphi * e;
    (half * (T::FRAC_PI_2() - phi)).tan() / ((T::one() - con) / (T::one() + con)).powf(half * e)
}

/// Iteration controls for [`phi2_with`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Phi2Params<T> {
    /// Upper bound on fixed-point iterations.
    pub max_iterations: usize,
    /// Stop once |Δφ| is at or below this value.
    pub tolerance: T,
}

impl<T: Float> Phi2Params<T> {
    pub fn new(max_iterations: usize, tolerance: T) -> Result<Self, ProjError> {
        if max_iterations == 0 {
            return Err(ProjError::InvalidParameter(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if !(tolerance.is_finite() && tolerance > T::zero()) {
            return Err(ProjError::InvalidParameter(format!(
                "tolerance must be positive and finite, got {}",
                as_f64(tolerance)
            )));
        }
        Ok(Self {
            max_iterations,
            tolerance,
        })
    }
}

impl<T: Float> Default for Phi2Params<T> {
    /// 15 iterations, 1e-8 rad. The tolerance is floored at 16 ulps of 1.0
    /// since 1e-8 is below single precision resolution.
    fn default() -> Self {
        let floor = T::epsilon() * constant(16.0);
        Self {
            max_iterations: PHI2_MAX_ITERATIONS,
            tolerance: constant::<T>(PHI2_TOLERANCE).max(floor),
        }
    }
}

/// Outcome of [`phi2`]: the latitude plus whether the iteration converged.
///
/// `phi` is the last iterate even when `converged` is false.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Phi2<T> {
    pub phi: T,
    pub iterations: usize,
    pub converged: bool,
}

impl<T> Phi2<T> {
    /// Accept the latitude only if the iteration converged.
    pub fn into_result(self) -> Result<T, ProjError> {
        if self.converged {
            Ok(self.phi)
        } else {
            Err(ProjError::NonConvergence {
                iterations: self.iterations,
            })
        }
    }
}

/// Geographic latitude from the isometric parameter `ts`, using the default
/// [`Phi2Params`].
#[inline]
pub fn phi2<T: Float + FloatConst>(ts: T, e: T) -> Phi2<T> {
    phi2_with(ts, e, &Phi2Params::default())
}

/// Geographic latitude from `ts` by fixed-point iteration, seeded with the
/// spherical inverse φ₀ = π/2 − 2 atan(ts).
///
/// `e sin φ` is clamped to ±(1 − ε) so a malformed eccentricity cannot make the
/// power term singular. A non-finite step ends the iteration as non-converged.
pub fn phi2_with<T: Float + FloatConst>(ts: T, e: T, params: &Phi2Params<T>) -> Phi2<T> {
    let two = T::one() + T::one();
    let half_e = constant::<T>(0.5) * e;
    let limit = T::one() - T::epsilon();

    let mut phi = T::FRAC_PI_2() - two * ts.atan();
    for iteration in 1..=params.max_iterations {
        let con = (e * phi.sin()).max(-limit).min(limit);
        let dphi = T::FRAC_PI_2()
            - two * (ts * ((T::one() - con) / (T::one() + con)).powf(half_e)).atan()
            - phi;

        if !dphi.is_finite() {
            tracing::debug!(
                ts = as_f64(ts),
                e = as_f64(e),
                iteration,
                "phi2 produced a non-finite step"
            );
            return Phi2 {
                phi,
                iterations: iteration,
                converged: false,
            };
        }

        phi = phi + dphi;
        if dphi.abs() <= params.tolerance {
            return Phi2 {
                phi,
                iterations: iteration,
                converged: true,
            };
        }
    }

    tracing::debug!(
        ts = as_f64(ts),
        e = as_f64(e),
        phi = as_f64(phi),
        max_iterations = params.max_iterations,
        "phi2 did not converge"
    );
    Phi2 {
        phi,
        iterations: params.max_iterations,
        converged: false,
    }
}
