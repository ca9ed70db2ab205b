//! Great-circle distance, shared by segment-length computation, near-miss
//! refinement, and place-radius containment tests.

/// Earth radius in miles, matching the original tool's constant exactly
/// (not the more common 3959; changing it would shift every mileage
/// total in the stats output).
pub const EARTH_RADIUS_MILES: f64 = 3963.1;

/// Great-circle distance between two lat/lng points, in miles.
pub fn great_circle_distance_miles(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let (lat1, lng1, lat2, lng2) = (
        lat1.to_radians(),
        lng1.to_radians(),
        lat2.to_radians(),
        lng2.to_radians(),
    );
    let cos_angle = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * (lng2 - lng1).cos();
    // Guard against values a hair outside [-1, 1] from floating-point
    // rounding when the two points coincide or are antipodal.
    EARTH_RADIUS_MILES * cos_angle.clamp(-1.0, 1.0).acos()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_for_identical_points() {
        assert_eq!(great_circle_distance_miles(40.0, -80.0, 40.0, -80.0), 0.0);
    }

    #[test]
    fn known_distance_is_reasonable() {
        // Roughly New York to Los Angeles; should land near 2450 miles.
        let d = great_circle_distance_miles(40.7128, -74.0060, 34.0522, -118.2437);
        assert!((2400.0..2600.0).contains(&d), "distance was {d}");
    }
}
