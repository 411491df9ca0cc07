//! Mercator projection — ellipsoidal, with a latitude of true scale.
//!
//!   k = k₀·msfn(φ_ts)
//!   forward: x = a·k·(λ - λ₀), y = -a·k·ln(tsfn(φ))
//!   inverse: λ = λ₀ + x/(a·k), φ = phi2(exp(-y/(a·k)))
//!
//! With a sphere (e = 0) the same formulas reduce to the spherical Mercator.

use std::f64::consts::FRAC_PI_2;

use crate::error::ProjError;
use crate::proj::common::{msfn, phi2, tsfn};
use crate::proj::ellipsoid::{Ellipsoid, WGS84};
use crate::proj::{Projection, EPS10};

pub struct Mercator {
    ellipsoid: Ellipsoid,
    e: f64,
    lon0: f64,
    ak: f64, // a·k, the scaled radius along the standard parallel
    false_easting: f64,
    false_northing: f64,
}

impl Mercator {
    /// Mercator true to scale along `lat_ts`.
    pub fn new(
        ellipsoid: Ellipsoid,
        lon0: f64,
        lat_ts: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Result<Self, ProjError> {
        if lat_ts.abs() >= FRAC_PI_2 {
            return Err(ProjError::InvalidParameter(format!(
                "latitude of true scale must be within (-90°, 90°), got {:.6}°",
                lat_ts.to_degrees()
            )));
        }
        let k0 = msfn(lat_ts.sin(), lat_ts.cos(), ellipsoid.es);
        Self::with_scale(ellipsoid, lon0, k0, false_easting, false_northing)
    }

    /// Mercator with an explicit scale factor at the equator.
    pub fn with_scale(
        ellipsoid: Ellipsoid,
        lon0: f64,
        k0: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Result<Self, ProjError> {
        if !(k0.is_finite() && k0 > 0.0) {
            return Err(ProjError::InvalidParameter(format!(
                "scale factor must be positive, got {k0}"
            )));
        }
        let ak = ellipsoid.a * k0;
        tracing::debug!(lon0, k0, ak, "mercator constants");
        Ok(Self {
            ellipsoid,
            e: ellipsoid.e(),
            lon0,
            ak,
            false_easting,
            false_northing,
        })
    }

    /// EPSG:3395 — WGS 84 / World Mercator.
    pub fn world() -> Self {
        Self {
            ellipsoid: WGS84,
            e: WGS84.e(),
            lon0: 0.0,
            ak: WGS84.a,
            false_easting: 0.0,
            false_northing: 0.0,
        }
    }
}

impl Projection for Mercator {
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        if (lat.abs() - FRAC_PI_2).abs() <= EPS10 {
            return Err(ProjError::TransformFailed(
                "Mercator is undefined at the poles".to_string(),
            ));
        }
        let x = self.ak * (lon - self.lon0) + self.false_easting;
        let y = -self.ak * tsfn(lat, lat.sin(), self.e).ln() + self.false_northing;
        Ok((x, y))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let lon = self.lon0 + (x - self.false_easting) / self.ak;
        let ts = (-(y - self.false_northing) / self.ak).exp();
        let lat = phi2(ts, self.e).into_result().inspect_err(|err| {
            tracing::warn!(x, y, %err, "mercator inverse failed");
        })?;
        Ok((lon, lat))
    }

    fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proj::proj4rs_forward;
    use approx::assert_relative_eq;

    #[test]
    fn test_world_mercator_origin() {
        let proj = Mercator::world();
        let (x, y) = proj.forward(0.0, 0.0).unwrap();
        assert_relative_eq!(x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_world_mercator_epsg3395_reference() {
        // EPSG:3395 northing at 45°N
        let proj = Mercator::world();
        let (_, y) = proj.forward(0.0, 45.0_f64.to_radians()).unwrap();
        assert_relative_eq!(y, 5_591_295.918_553, epsilon = 1e-3);

        let (x, _) = proj.forward(std::f64::consts::PI, 0.0).unwrap();
        assert_relative_eq!(x, 20_037_508.342_789_244, epsilon = 1e-3);
    }

    #[test]
    fn test_ellipsoidal_mercator_roundtrip() {
        let proj = Mercator::new(WGS84, 0.0, 0.0, 0.0, 0.0).unwrap();
        let cases: &[(f64, f64)] = &[
            (0.0, 0.0),
            (10.0, 45.0),
            (-73.9857, 40.7484), // NYC
            (139.6917, 35.6895), // Tokyo
            (-58.38, -34.6),     // Buenos Aires
            (0.0, 89.9),
            (0.0, -89.9),
        ];
        for &(lon_deg, lat_deg) in cases {
            let lon = lon_deg.to_radians();
            let lat = lat_deg.to_radians();
            let (x, y) = proj.forward(lon, lat).unwrap();
            let (lon2, lat2) = proj.inverse(x, y).unwrap();
            assert_relative_eq!(lon2, lon, epsilon = 1e-10);
            assert_relative_eq!(lat2, lat, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_true_scale_latitude() {
        let lat_ts = 41.0_f64.to_radians();
        let proj = Mercator::new(WGS84, 0.0, lat_ts, 0.0, 0.0).unwrap();
        let base = Mercator::world();
        let k = msfn(lat_ts.sin(), lat_ts.cos(), WGS84.es);
        let (x1, y1) = proj.forward(0.3, 0.6).unwrap();
        let (x0, y0) = base.forward(0.3, 0.6).unwrap();
        assert_relative_eq!(x1, k * x0, epsilon = 1e-6);
        assert_relative_eq!(y1, k * y0, epsilon = 1e-6);
    }

    #[test]
    fn test_false_origin_and_central_meridian() {
        let proj =
            Mercator::new(WGS84, 110.0_f64.to_radians(), 0.0, 3_900_000.0, 900_000.0).unwrap();
        let (x, y) = proj.forward(110.0_f64.to_radians(), 0.0).unwrap();
        assert_relative_eq!(x, 3_900_000.0, epsilon = 1e-6);
        assert_relative_eq!(y, 900_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_spherical_mercator() {
        let proj = Mercator::new(Ellipsoid::sphere(6_378_137.0), 0.0, 0.0, 0.0, 0.0).unwrap();
        let lat = 30.0_f64.to_radians();
        let (_, y) = proj.forward(0.0, lat).unwrap();
        let expected = 6_378_137.0 * (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln();
        assert_relative_eq!(y, expected, epsilon = 1e-6);
        let (_, lat2) = proj.inverse(0.0, y).unwrap();
        assert_relative_eq!(lat2, lat, epsilon = 1e-12);
    }

    #[test]
    fn test_pole_is_rejected() {
        let proj = Mercator::world();
        assert!(matches!(
            proj.forward(0.0, FRAC_PI_2),
            Err(ProjError::TransformFailed(_))
        ));
        assert!(proj.forward(0.0, -FRAC_PI_2).is_err());
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(Mercator::new(WGS84, 0.0, FRAC_PI_2, 0.0, 0.0).is_err());
        assert!(Mercator::with_scale(WGS84, 0.0, 0.0, 0.0, 0.0).is_err());
        assert!(Mercator::with_scale(WGS84, 0.0, f64::NAN, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_matches_proj4rs() {
        let proj = Mercator::new(WGS84, 0.0, 20.0_f64.to_radians(), 0.0, 0.0).unwrap();
        for &(lon_deg, lat_deg) in &[(5.0, 10.0), (-120.0, 60.0), (170.0, -70.0)] {
            let lon = f64::to_radians(lon_deg);
            let lat = f64::to_radians(lat_deg);
            let (x, y) = proj.forward(lon, lat).unwrap();
            let (xr, yr) =
                proj4rs_forward("+proj=merc +lat_ts=20 +ellps=WGS84 +units=m", lon, lat);
            assert_relative_eq!(x, xr, epsilon = 1e-3);
            assert_relative_eq!(y, yr, epsilon = 1e-3);
        }
    }
}
