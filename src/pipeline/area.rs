//! Planar reprojection and area measurement
//!
//! Areas are never taken in the geographic (degree) frame. Geometries are
//! projected into a state-plane Lambert conformal conic frame in US survey
//! feet first, then converted to square miles.

use geo::{Area, Coord, MapCoords, MultiPolygon};

use super::model::OrgUnit;

/// Square feet per square mile (5280 ft squared)
pub const SQ_FT_PER_SQ_MILE: f64 = 27_878_400.0;

/// GRS80 semi-major axis, in US survey feet (6378137 m at 3937/1200 ft/m)
const GRS80_A_FT: f64 = 6_378_137.0 * 3937.0 / 1200.0;

/// GRS80 first eccentricity squared
const GRS80_E_SQ: f64 = 0.006_694_380_022_903_416;

/// Lambert conformal conic (two standard parallels) state-plane projection,
/// map units in US survey feet.
#[derive(Debug, Clone)]
pub struct StatePlane {
    e: f64,
    n: f64,
    /// `a * F`, premultiplied
    af: f64,
    rho0: f64,
    lon0: f64,
    false_easting: f64,
    false_northing: f64,
}

impl StatePlane {
    /// Build a projection from Lambert parameters, all angles in degrees and
    /// false offsets in US survey feet.
    pub fn from_lambert_parameters(
        std_parallel_1: f64,
        std_parallel_2: f64,
        origin_lat: f64,
        central_meridian: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Self {
        let e = GRS80_E_SQ.sqrt();
        let lat1 = std_parallel_1.to_radians();
        let lat2 = std_parallel_2.to_radians();
        let lat0 = origin_lat.to_radians();

        let m1 = grid_m(e, lat1);
        let m2 = grid_m(e, lat2);
        let t0 = iso_t(e, lat0);
        let t1 = iso_t(e, lat1);
        let t2 = iso_t(e, lat2);

        let n = (m1 / m2).ln() / (t1 / t2).ln();
        let af = GRS80_A_FT * m1 / (n * t1.powf(n));
        let rho0 = af * t0.powf(n);

        StatePlane {
            e,
            n,
            af,
            rho0,
            lon0: central_meridian.to_radians(),
            false_easting,
            false_northing,
        }
    }

    /// North Carolina state plane (NAD83, US survey feet): standard parallels
    /// 34°20' and 36°10', origin 33°45'N 79°W, false easting 2,000,000 ftUS.
    pub fn north_carolina() -> Self {
        StatePlane::from_lambert_parameters(
            34.0 + 20.0 / 60.0,
            36.0 + 10.0 / 60.0,
            33.75,
            -79.0,
            609_601.22 * 3937.0 / 1200.0,
            0.0,
        )
    }

    /// Project one geographic coordinate (degrees) to grid feet
    pub fn project(&self, coord: Coord<f64>) -> Coord<f64> {
        let lon = coord.x.to_radians();
        let lat = coord.y.to_radians();
        let rho = self.af * iso_t(self.e, lat).powf(self.n);
        let theta = self.n * (lon - self.lon0);
        Coord {
            x: self.false_easting + rho * theta.sin(),
            y: self.false_northing + self.rho0 - rho * theta.cos(),
        }
    }

    /// Project a whole geometry into the planar frame
    pub fn project_geometry(&self, geometry: &MultiPolygon<f64>) -> MultiPolygon<f64> {
        geometry.map_coords(|coord| self.project(coord))
    }
}

/// `cos(lat) / sqrt(1 - e^2 sin^2 lat)`
fn grid_m(e: f64, lat: f64) -> f64 {
    let s = lat.sin();
    lat.cos() / (1.0 - e * e * s * s).sqrt()
}

/// Isometric latitude function `t` of the Lambert projection
fn iso_t(e: f64, lat: f64) -> f64 {
    let es = e * lat.sin();
    (std::f64::consts::FRAC_PI_4 - lat / 2.0).tan() / ((1.0 - es) / (1.0 + es)).powf(e / 2.0)
}

/// Area of an already-planar geometry (feet), in square miles
pub fn planar_square_miles(planar: &MultiPolygon<f64>) -> f64 {
    planar.unsigned_area() / SQ_FT_PER_SQ_MILE
}

/// Project each unit's geometry and fill in its `square_miles` field
pub fn compute_areas(units: &mut [OrgUnit], plane: &StatePlane) {
    for unit in units {
        let planar = plane.project_geometry(&unit.geometry);
        unit.square_miles = planar_square_miles(&planar);
    }
}
