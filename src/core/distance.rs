/// Earth's radius in miles
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Calculate the Haversine distance between two points in miles
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Great-circle distance in miles
///
/// Coordinates are expected to be finite; the snapshot loader drops any
/// record that would violate this before it reaches the matcher.
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_MILES * a.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_distance() {
        // Sacramento to San Francisco (approximately 75 miles)
        let sac_lat = 38.5816;
        let sac_lon = -121.4944;
        let sf_lat = 37.7749;
        let sf_lon = -122.4194;

        let distance = haversine_distance(sac_lat, sac_lon, sf_lat, sf_lon);
        assert!((distance - 75.0).abs() < 5.0, "Distance should be ~75mi, got {}", distance);
    }

    #[test]
    fn test_same_point_is_zero() {
        assert_eq!(haversine_distance(36.9741, -122.0308, 36.9741, -122.0308), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let there = haversine_distance(34.4208, -119.6982, 35.2828, -120.6596);
        let back = haversine_distance(35.2828, -120.6596, 34.4208, -119.6982);
        assert!((there - back).abs() <= 1e-9 * there.max(1.0));
    }

    #[test]
    fn test_one_degree_of_latitude() {
        // 2 * pi * R / 360
        let distance = haversine_distance(0.0, 0.0, 1.0, 0.0);
        assert!((distance - 69.09).abs() < 0.01, "got {}", distance);
    }
}
