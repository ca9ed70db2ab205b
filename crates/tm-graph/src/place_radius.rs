use tm_common::great_circle_distance_miles;

/// A named circular area used to restrict a subgraph to, e.g., "within 50
/// miles of Chicago".
#[derive(Debug, Clone)]
pub struct PlaceRadius {
    pub descr: String,
    pub title: String,
    pub lat: f64,
    pub lng: f64,
    pub radius_miles: f64,
}

impl PlaceRadius {
    pub fn new(descr: impl Into<String>, title: impl Into<String>, lat: f64, lng: f64, radius_miles: f64) -> Self {
        Self { descr: descr.into(), title: title.into(), lat, lng, radius_miles }
    }

    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        great_circle_distance_miles(self.lat, self.lng, lat, lng) <= self.radius_miles
    }
}
