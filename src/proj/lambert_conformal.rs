//! Lambert Conformal Conic projection — 1SP and 2SP variants.
//!
//! Uses `msfn`, `tsfn` and `phi2` from common.rs.

use std::f64::consts::FRAC_PI_2;

use crate::error::ProjError;
use crate::proj::common::{msfn, phi2, tsfn};
use crate::proj::ellipsoid::Ellipsoid;
use crate::proj::{Projection, EPS10};

pub struct LambertConformalConic {
    ellipsoid: Ellipsoid,
    e: f64,
    lon0: f64,
    n: f64,     // cone constant
    f_val: f64, // F = k₀·m₁/(n·t₁ⁿ)
    rho0: f64,  // ρ₀ = a·F·t₀ⁿ
    false_easting: f64,
    false_northing: f64,
}

/// tsfn at a latitude, 0 at the poles where the cone closes.
fn ts_at(lat: f64, e: f64) -> f64 {
    if (lat.abs() - FRAC_PI_2).abs() < EPS10 {
        0.0
    } else {
        tsfn(lat, lat.sin(), e)
    }
}

impl LambertConformalConic {
    /// Create a Lambert Conformal Conic with two standard parallels (2SP).
    pub fn new_2sp(
        ellipsoid: Ellipsoid,
        lon0: f64,
        lat0: f64,
        lat1: f64,
        lat2: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Result<Self, ProjError> {
        if (lat1 + lat2).abs() < EPS10 {
            return Err(ProjError::InvalidParameter(
                "standard parallels must not be symmetric about the equator".to_string(),
            ));
        }
        for (name, lat) in [("lat1", lat1), ("lat2", lat2)] {
            if lat.abs() >= FRAC_PI_2 - EPS10 {
                return Err(ProjError::InvalidParameter(format!(
                    "{name} must be strictly between the poles, got {:.6}°",
                    lat.to_degrees()
                )));
            }
        }

        let e = ellipsoid.e();
        let es = ellipsoid.es;

        let m1 = msfn(lat1.sin(), lat1.cos(), es);
        let t1 = tsfn(lat1, lat1.sin(), e);

        let n = if (lat1 - lat2).abs() > EPS10 {
            let m2 = msfn(lat2.sin(), lat2.cos(), es);
            let t2 = tsfn(lat2, lat2.sin(), e);
            (m1.ln() - m2.ln()) / (t1.ln() - t2.ln())
        } else {
            lat1.sin()
        };

        Ok(Self::from_cone(
            ellipsoid,
            lon0,
            lat0,
            n,
            m1 / (n * t1.powf(n)),
            false_easting,
            false_northing,
        ))
    }

    /// Create a Lambert Conformal Conic with one standard parallel (1SP).
    pub fn new_1sp(
        ellipsoid: Ellipsoid,
        lon0: f64,
        lat0: f64,
        k0: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Result<Self, ProjError> {
        if lat0.abs() < EPS10 || lat0.abs() >= FRAC_PI_2 - EPS10 {
            return Err(ProjError::InvalidParameter(format!(
                "1SP latitude of origin must be off the equator and the poles, got {:.6}°",
                lat0.to_degrees()
            )));
        }

        let e = ellipsoid.e();
        let n = lat0.sin();
        let m0 = msfn(lat0.sin(), lat0.cos(), ellipsoid.es);
        let t0 = tsfn(lat0, lat0.sin(), e);

        Ok(Self::from_cone(
            ellipsoid,
            lon0,
            lat0,
            n,
            m0 / (n * t0.powf(n)) * k0,
            false_easting,
            false_northing,
        ))
    }

    fn from_cone(
        ellipsoid: Ellipsoid,
        lon0: f64,
        lat0: f64,
        n: f64,
        f_val: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Self {
        let e = ellipsoid.e();
        let rho0 = ellipsoid.a * f_val * ts_at(lat0, e).powf(n);
        tracing::debug!(n, f_val, rho0, "lambert conformal conic constants");
        Self {
            ellipsoid,
            e,
            lon0,
            n,
            f_val,
            rho0,
            false_easting,
            false_northing,
        }
    }
}

impl Projection for LambertConformalConic {
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        let rho = if (lat.abs() - FRAC_PI_2).abs() < EPS10 {
            if lat * self.n <= 0.0 {
                return Err(ProjError::TransformFailed(
                    "point at the pole opposite the cone apex".to_string(),
                ));
            }
            0.0
        } else {
            self.ellipsoid.a * self.f_val * tsfn(lat, lat.sin(), self.e).powf(self.n)
        };
        let theta = self.n * (lon - self.lon0);

        let x = rho * theta.sin() + self.false_easting;
        let y = self.rho0 - rho * theta.cos() + self.false_northing;
        Ok((x, y))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let x_ = x - self.false_easting;
        let y_ = self.rho0 - (y - self.false_northing);

        let rho = x_.hypot(y_);
        if rho == 0.0 {
            return Ok((self.lon0, FRAC_PI_2.copysign(self.n)));
        }

        // For n < 0, flip signs before computing angle and radius
        let (xn, yn, rho) = if self.n < 0.0 {
            (-x_, -y_, -rho)
        } else {
            (x_, y_, rho)
        };
        let theta = xn.atan2(yn); // atan2(x', y') — note order!

        let ts = (rho / (self.ellipsoid.a * self.f_val)).powf(1.0 / self.n);
        let lat = phi2(ts, self.e).into_result().inspect_err(|err| {
            tracing::warn!(x, y, %err, "lambert conformal conic inverse failed");
        })?;
        let lon = self.lon0 + theta / self.n;

        Ok((lon, lat))
    }

    fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }
}
