/// Reference ellipsoid parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis (metres)
    pub a: f64,
    /// Flattening (dimensionless)
    pub f: f64,
    /// First eccentricity squared: 2f - f^2
    pub es: f64,
}

impl Ellipsoid {
    pub const fn new(a: f64, f: f64) -> Self {
        Self {
            a,
            f,
            es: 2.0 * f - f * f,
        }
    }

    /// A sphere of radius `r` (e = 0).
    pub const fn sphere(r: f64) -> Self {
        Self::new(r, 0.0)
    }

    /// First eccentricity. `sqrt` is not const, so it is derived on demand.
    pub fn e(&self) -> f64 {
        self.es.sqrt()
    }

    pub fn is_sphere(&self) -> bool {
        self.es == 0.0
    }
}

pub const WGS84: Ellipsoid = Ellipsoid::new(6_378_137.0, 1.0 / 298.257_223_563);
pub const GRS80: Ellipsoid = Ellipsoid::new(6_378_137.0, 1.0 / 298.257_222_101);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wgs84_constants() {
        assert_relative_eq!(WGS84.a, 6_378_137.0);
        assert_relative_eq!(WGS84.es, 0.006_694_379_990_141_316, epsilon = 1e-15);
        assert_relative_eq!(WGS84.e(), 0.081_819_190_842_622, epsilon = 1e-12);
    }

    #[test]
    fn test_grs80_close_to_wgs84() {
        assert_relative_eq!(WGS84.a, GRS80.a);
        assert!((WGS84.f - GRS80.f).abs() < 1e-8);
        assert!((WGS84.es - GRS80.es).abs() < 1e-9);
    }

    #[test]
    fn test_sphere() {
        let s = Ellipsoid::sphere(6_371_000.0);
        assert!(s.is_sphere());
        assert_eq!(s.e(), 0.0);
        assert!(!WGS84.is_sphere());
    }
}
