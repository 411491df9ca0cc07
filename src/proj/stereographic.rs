//! Polar Stereographic projection.
//!
//! EPSG:3031 (Antarctic), EPSG:3413 (Arctic), and the UPS-style variant A
//! with a scale factor at the pole.

use std::f64::consts::FRAC_PI_2;

use crate::error::ProjError;
use crate::proj::common::{msfn, phi2, tsfn};
use crate::proj::ellipsoid::{Ellipsoid, WGS84};
use crate::proj::{Projection, EPS10};

pub struct PolarStereographic {
    ellipsoid: Ellipsoid,
    e: f64,
    lon0: f64,
    is_north: bool,
    false_easting: f64,
    false_northing: f64,
    // Precomputed
    akm: f64, // a·m_c/t_c for variant B, 2·a·k0/√((1+e)^(1+e)·(1-e)^(1-e)) for variant A
}

impl PolarStereographic {
    /// EPSG variant B: true scale along `lat_ts`; its sign selects the pole.
    ///
    /// A `lat_ts` at the pole falls back to variant A with k0 = 1.
    pub fn new(
        ellipsoid: Ellipsoid,
        lon0: f64,
        lat_ts: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Result<Self, ProjError> {
        if lat_ts.abs() < EPS10 || lat_ts.abs() > FRAC_PI_2 + EPS10 {
            return Err(ProjError::InvalidParameter(format!(
                "latitude of true scale must be in a polar hemisphere, got {:.6}°",
                lat_ts.to_degrees()
            )));
        }
        let is_north = lat_ts > 0.0;
        if (lat_ts.abs() - FRAC_PI_2).abs() < EPS10 {
            return Self::from_pole_scale(
                ellipsoid,
                lon0,
                is_north,
                1.0,
                false_easting,
                false_northing,
            );
        }

        Ok(Self::with_akm(
            ellipsoid,
            lon0,
            is_north,
            Self::standard_parallel_akm(&ellipsoid, lat_ts.abs()),
            false_easting,
            false_northing,
        ))
    }

    /// EPSG variant A: scale factor `k0` at the pole (UPS uses 0.994).
    pub fn from_pole_scale(
        ellipsoid: Ellipsoid,
        lon0: f64,
        is_north: bool,
        k0: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Result<Self, ProjError> {
        if !(k0.is_finite() && k0 > 0.0) {
            return Err(ProjError::InvalidParameter(format!(
                "scale factor must be positive, got {k0}"
            )));
        }
        let e = ellipsoid.e();
        let ep = (1.0 + e).powf(1.0 + e) * (1.0 - e).powf(1.0 - e);
        Ok(Self::with_akm(
            ellipsoid,
            lon0,
            is_north,
            ellipsoid.a * 2.0 * k0 / ep.sqrt(),
            false_easting,
            false_northing,
        ))
    }

    fn with_akm(
        ellipsoid: Ellipsoid,
        lon0: f64,
        is_north: bool,
        akm: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Self {
        tracing::debug!(lon0, is_north, akm, "polar stereographic constants");
        Self {
            ellipsoid,
            e: ellipsoid.e(),
            lon0,
            is_north,
            false_easting,
            false_northing,
            akm,
        }
    }

    /// EPSG:3031 — Antarctic Polar Stereographic
    pub fn antarctic() -> Self {
        Self::with_akm(
            WGS84,
            0.0,
            false,
            Self::standard_parallel_akm(&WGS84, 71.0_f64.to_radians()),
            0.0,
            0.0,
        )
    }

    /// EPSG:3413 — Arctic NSIDC Polar Stereographic North
    pub fn arctic() -> Self {
        Self::with_akm(
            WGS84,
            (-45.0_f64).to_radians(),
            true,
            Self::standard_parallel_akm(&WGS84, 70.0_f64.to_radians()),
            0.0,
            0.0,
        )
    }

    fn standard_parallel_akm(ellipsoid: &Ellipsoid, phi_c: f64) -> f64 {
        let m_c = msfn(phi_c.sin(), phi_c.cos(), ellipsoid.es);
        ellipsoid.a * m_c / tsfn(phi_c, phi_c.sin(), ellipsoid.e())
    }
}

impl Projection for PolarStereographic {
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        let (lat_adj, sign) = if self.is_north {
            (lat, 1.0)
        } else {
            (-lat, -1.0)
        };
        if lat_adj <= -FRAC_PI_2 + EPS10 {
            return Err(ProjError::TransformFailed(
                "point at the pole opposite the projection centre".to_string(),
            ));
        }

        let rho = self.akm * tsfn(lat_adj, lat_adj.sin(), self.e);
        let dlam = lon - self.lon0;

        let x = rho * dlam.sin() + self.false_easting;
        let y = -sign * rho * dlam.cos() + self.false_northing;
        Ok((x, y))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let x_ = x - self.false_easting;
        let y_ = y - self.false_northing;
        let y_adj = if self.is_north { -y_ } else { y_ };

        let rho = x_.hypot(y_adj);
        let t = rho / self.akm;
        let lat_adj = phi2(t, self.e).into_result().inspect_err(|err| {
            tracing::warn!(x, y, %err, "polar stereographic inverse failed");
        })?;

        let lon = if rho == 0.0 {
            self.lon0
        } else {
            self.lon0 + x_.atan2(y_adj)
        };
        let lat = if self.is_north { lat_adj } else { -lat_adj };

        Ok((lon, lat))
    }

    fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }
}
