//! Great-circle geometry on a spherical Earth.

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometres between two points given in degrees.
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // rounding can push `a` marginally above 1 for antipodal points
    2.0 * EARTH_RADIUS_KM * a.clamp(0.0, 1.0).sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HKG: (f64, f64) = (22.308919, 113.914603);
    const LHR: (f64, f64) = (51.4706, -0.461941);

    #[test]
    fn identical_points_are_zero() {
        assert_eq!(distance(HKG.0, HKG.1, HKG.0, HKG.1), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let there = distance(HKG.0, HKG.1, LHR.0, LHR.1);
        let back = distance(LHR.0, LHR.1, HKG.0, HKG.1);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn hong_kong_to_london() {
        let d = distance(HKG.0, HKG.1, LHR.0, LHR.1);
        assert!((d - 9630.8).abs() < 1.0, "distance was {d}");
    }

    #[test]
    fn quarter_of_the_equator() {
        let d = distance(0.0, 0.0, 0.0, 90.0);
        let expected = EARTH_RADIUS_KM * std::f64::consts::FRAC_PI_2;
        assert!((d - expected).abs() < 1e-6);
    }

    #[test]
    fn antipodes_do_not_produce_nan() {
        let d = distance(0.0, 0.0, 0.0, 180.0);
        assert!((d - EARTH_RADIUS_KM * std::f64::consts::PI).abs() < 1e-6);
    }
}
