use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::ids::{RegionIdx, SystemIdx};
use crate::segment::HighwaySegment;
use crate::waypoint::Waypoint;

#[derive(Debug, Clone)]
pub struct LastUpdate {
    pub date: String,
    pub time: String,
    pub user: String,
}

/// One highway's worth of waypoints and segments, exclusively owned by its
/// `HighwaySystem`. Waypoints and segments live inline here rather than in
/// a global arena: nothing outside this route ever needs to outlive it or
/// be moved independently of it.
#[derive(Debug, Clone)]
pub struct Route {
    pub system: SystemIdx,
    pub region: RegionIdx,
    pub root: String,
    pub banner: String,
    pub abbrev: String,
    pub city: String,
    pub alt_route_names: Vec<String>,
    pub waypoints: Vec<Waypoint>,
    pub segments: Vec<HighwaySegment>,
    /// label -> index in `waypoints`, for O(1) label resolution while
    /// parsing `.list` files and building concurrencies.
    pub label_index: FxHashMap<String, usize>,
    pub last_update: Option<LastUpdate>,
    /// Set once connectivity verification (`tm-concurrency`) determines the
    /// route's waypoint order runs opposite to its `ConnectedRoute`'s
    /// canonical direction.
    pub reversed: bool,
    /// Set when connectivity verification cannot stitch this route into
    /// its `ConnectedRoute` at all; raises `DISCONNECTED_ROUTE`.
    pub disconnected: bool,
    /// Per-route lock guarding concurrent insertion into the clinched-by
    /// sets below. One mutex per route is enough: two travelers' worker
    /// threads only ever contend when they both clinch a segment on the
    /// same route at the same moment.
    pub clinch_lock: Mutex<()>,
    /// Parallel to `segments`: the set of traveler indices that have
    /// clinched each segment.
    pub clinched_by: Mutex<Vec<FxHashSet<u32>>>,
}

impl Route {
    pub fn new(
        system: SystemIdx,
        region: RegionIdx,
        root: String,
        banner: String,
        abbrev: String,
        city: String,
    ) -> Self {
        Self {
            system,
            region,
            root,
            banner,
            abbrev,
            city,
            alt_route_names: Vec::new(),
            waypoints: Vec::new(),
            segments: Vec::new(),
            label_index: FxHashMap::default(),
            last_update: None,
            reversed: false,
            disconnected: false,
            clinch_lock: Mutex::new(()),
            clinched_by: Mutex::new(Vec::new()),
        }
    }

    /// The list file root used in traveler `.list` files: `banner` and
    /// `abbrev` decorate `root` the same way they do in the master list's
    /// "simple name".
    pub fn list_name(&self) -> String {
        let mut name = self.root.clone();
        if !self.banner.is_empty() {
            name.push_str(&self.banner);
        }
        if !self.abbrev.is_empty() {
            name.push_str(&self.abbrev);
        }
        name
    }

    pub fn init_clinch_state(&mut self) {
        let mut guard = self.clinched_by.lock();
        guard.clear();
        guard.resize_with(self.segments.len(), FxHashSet::default);
    }

    pub fn total_miles(&self) -> f64 {
        self.segments.iter().map(|s| s.length_miles).sum()
    }
}
