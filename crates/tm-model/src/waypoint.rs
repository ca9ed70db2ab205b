use crate::ids::{ColocationRingIdx, RouteIdx};

/// A single point along a route, exclusively owned by that route.
///
/// `lat`/`lng` are compared for colocation by exact equality, matching the
/// original tool's behavior: two waypoints are "at the same point" only
/// when their coordinates match bit-for-bit after parsing, never within an
/// epsilon. Near-miss detection (a looser, box-based test) is a separate
/// concept handled by `tm-quadtree`.
#[derive(Debug, Clone)]
pub struct Waypoint {
    pub label: String,
    pub lat: f64,
    pub lng: f64,
    pub route: RouteIdx,
    /// Position of this waypoint within its route's waypoint list at the
    /// time it was created. Stable for the waypoint's lifetime even if the
    /// route is later reversed (reversal swaps list order, not this field
    /// is recomputed by the caller when it does).
    pub index_in_route: u32,
    /// Ring this waypoint shares coordinates with, if any waypoint anywhere
    /// in the dataset sits at the same point.
    pub colocated: Option<ColocationRingIdx>,
    /// True when the label carries a leading `+`: a hidden waypoint that
    /// exists for mile-marking purposes but never becomes a graph vertex.
    pub hidden: bool,
    /// True when the label carries a trailing `*`: waypoint is visible but
    /// its canonical name must not be used as another route's label.
    pub no_photos: bool,
}

impl Waypoint {
    pub fn same_coordinates(&self, other: &Waypoint) -> bool {
        self.lat == other.lat && self.lng == other.lng
    }

    /// The label with any leading hidden marker and trailing decorations
    /// stripped, as used for canonical-name matching.
    pub fn bare_label(&self) -> &str {
        self.label.trim_start_matches('+').trim_end_matches('*')
    }

    pub fn is_area(&self) -> bool {
        self.label.starts_with("+X") || self.label.starts_with("X(")
    }
}
