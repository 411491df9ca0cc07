//! PyO3 bindings for the conformal latitude helpers (double precision).

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::proj::common::{self, Phi2Params};

/// Register all Python-visible functions.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(msfn, m)?)?;
    m.add_function(wrap_pyfunction!(tsfn, m)?)?;
    m.add_function(wrap_pyfunction!(phi2, m)?)?;
    Ok(())
}

fn check_unit_interval(name: &str, value: f64) -> PyResult<()> {
    if (0.0..1.0).contains(&value) {
        Ok(())
    } else {
        Err(PyValueError::new_err(format!(
            "{name} must lie in [0, 1), got {value}"
        )))
    }
}

/// Parallel scale factor m = cos(phi) / sqrt(1 - es * sin(phi)^2).
///
/// Args:
///     sinphi: Sine of the latitude.
///     cosphi: Cosine of the latitude.
///     es: Eccentricity squared, in [0, 1).
#[pyfunction]
fn msfn(sinphi: f64, cosphi: f64, es: f64) -> PyResult<f64> {
    check_unit_interval("es", es)?;
    Ok(common::msfn(sinphi, cosphi, es))
}

/// Isometric latitude parameter ts = exp(-psi).
///
/// Args:
///     phi: Latitude in radians.
///     sinphi: Sine of `phi`.
///     e: Eccentricity, in [0, 1).
#[pyfunction]
fn tsfn(phi: f64, sinphi: f64, e: f64) -> PyResult<f64> {
    check_unit_interval("e", e)?;
    Ok(common::tsfn(phi, sinphi, e))
}

/// Latitude from the isometric parameter `ts` by fixed-point iteration.
///
/// Returns:
///     Tuple of (phi, converged). `phi` is the last iterate even when the
///     iteration did not converge.
#[pyfunction]
#[pyo3(signature = (ts, e, max_iterations=15, tolerance=1e-8))]
fn phi2(ts: f64, e: f64, max_iterations: usize, tolerance: f64) -> PyResult<(f64, bool)> {
    check_unit_interval("e", e)?;
    let params = Phi2Params::new(max_iterations, tolerance)
        .map_err(|err| PyValueError::new_err(err.to_string()))?;
    let result = common::phi2_with(ts, e, &params);
    Ok((result.phi, result.converged))
}
