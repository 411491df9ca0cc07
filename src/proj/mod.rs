pub mod common;
pub mod ellipsoid;
pub mod lambert_conformal;
pub mod mercator;
pub mod stereographic;

use crate::error::ProjError;

/// Trait for map projections supporting forward and inverse transforms.
pub trait Projection: Send + Sync {
    /// Forward: (lon_rad, lat_rad) -> (easting, northing)
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError>;

    /// Inverse: (easting, northing) -> (lon_rad, lat_rad)
    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError>;

    fn ellipsoid(&self) -> &ellipsoid::Ellipsoid;
}

/// Tolerance used to detect latitudes at a pole or coincident parallels.
pub(crate) const EPS10: f64 = 1e-10;

/// Reference forward transform through proj4rs, for cross-checking the
/// native projections. Input in radians.
#[cfg(test)]
pub(crate) fn proj4rs_forward(def: &str, lon: f64, lat: f64) -> (f64, f64) {
    let src = proj4rs::Proj::from_proj_string("+proj=longlat +ellps=WGS84").unwrap();
    let dst = proj4rs::Proj::from_proj_string(def).unwrap();
    let mut point = (lon, lat);
    proj4rs::transform::transform(&src, &dst, &mut point).unwrap();
    point
}
