use crate::model::attendance::Location;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle (haversine) distance between two coordinates, in meters.
pub fn distance_meters(a: Location, b: Location) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_long = (b.long - a.long).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_long / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    const OFFICE: Location = Location {
        lat: -6.175,
        long: 106.8286,
    };

    #[test]
    fn zero_distance_for_identical_points() {
        assert!(distance_meters(OFFICE, OFFICE) < f64::EPSILON);
    }

    #[test]
    fn nearby_point_within_geofence() {
        // ~0.0005 deg latitude is roughly 55 m
        let nearby = Location {
            lat: -6.1755,
            long: 106.8286,
        };
        let d = distance_meters(OFFICE, nearby);
        assert!(d > 40.0 && d < 70.0, "distance was {d}");
    }

    #[test]
    fn distant_point_outside_geofence() {
        // Monas to Kota Tua is a few kilometers
        let kota_tua = Location {
            lat: -6.1352,
            long: 106.8133,
        };
        let d = distance_meters(OFFICE, kota_tua);
        assert!(d > 4_000.0 && d < 6_000.0, "distance was {d}");
    }
}
