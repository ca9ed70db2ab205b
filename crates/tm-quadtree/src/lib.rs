//! A recursive quadtree over `(-90, -180)`–`(90, 180)`, subdivided at
//! midpoints, used to find waypoints that share a point exactly
//! (colocation) and waypoints that sit suspiciously close to one another
//! (near-misses, surfaced by `tm-datacheck`).
//!
//! The tree never touches `HighwayData` directly: `insert` only reports
//! whether the inserted waypoint landed on an existing point, and the
//! caller (which holds `&mut HighwayData`) is responsible for building or
//! extending the colocation ring. This keeps the tree's own mutation
//! (behind one lock, so concurrent inserts during the parallel wpt-parse
//! stage serialize cleanly) separate from model mutation.

use parking_lot::Mutex;
use tm_model::{HighwayData, WaypointRef};

pub mod nmp;

const REFINE_THRESHOLD: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InsertOutcome {
    /// Landed on a brand new point; no other waypoint occupies it yet.
    NewLocation,
    /// Landed on a point already occupied by `existing`.
    Colocated(WaypointRef),
}

struct Node {
    min_lat: f64,
    min_lng: f64,
    max_lat: f64,
    max_lng: f64,
    mid_lat: f64,
    mid_lng: f64,
    unique_locations: usize,
    children: Option<Box<[Node; 4]>>,
    bag: Vec<WaypointRef>,
}

impl Node {
    fn new(min_lat: f64, min_lng: f64, max_lat: f64, max_lng: f64) -> Self {
        Self {
            min_lat,
            min_lng,
            max_lat,
            max_lng,
            mid_lat: (min_lat + max_lat) / 2.0,
            mid_lng: (min_lng + max_lng) / 2.0,
            unique_locations: 0,
            children: None,
            bag: Vec::new(),
        }
    }

    fn child_index(&self, lat: f64, lng: f64) -> usize {
        let lat_ge = (lat >= self.mid_lat) as usize;
        let lng_ge = (lng >= self.mid_lng) as usize;
        lat_ge * 2 + lng_ge
    }

    fn make_children(&mut self) {
        let (min_lat, mid_lat, max_lat) = (self.min_lat, self.mid_lat, self.max_lat);
        let (min_lng, mid_lng, max_lng) = (self.min_lng, self.mid_lng, self.max_lng);
        self.children = Some(Box::new([
            Node::new(min_lat, min_lng, mid_lat, mid_lng),
            Node::new(min_lat, mid_lng, mid_lat, max_lng),
            Node::new(mid_lat, min_lng, max_lat, mid_lng),
            Node::new(mid_lat, mid_lng, max_lat, max_lng),
        ]));
    }

    fn insert(&mut self, data: &HighwayData, wp: WaypointRef) -> InsertOutcome {
        if let Some(children) = &mut self.children {
            let w = data.waypoint(wp);
            let idx = self.child_index(w.lat, w.lng);
            return children[idx].insert(data, wp);
        }

        let w = data.waypoint(wp);
        if let Some(existing) = self
            .bag
            .iter()
            .find(|&&p| data.waypoint(p).same_coordinates(w))
            .copied()
        {
            self.bag.push(wp);
            return InsertOutcome::Colocated(existing);
        }

        self.bag.push(wp);
        self.unique_locations += 1;

        if self.unique_locations > REFINE_THRESHOLD {
            self.refine(data);
        }
        InsertOutcome::NewLocation
    }

    fn refine(&mut self, data: &HighwayData) {
        self.make_children();
        let held = std::mem::take(&mut self.bag);
        self.unique_locations = 0;
        let children = self.children.as_mut().unwrap();
        for wp in held {
            let w = data.waypoint(wp);
            let idx_root = (w.lat >= self.mid_lat) as usize * 2 + (w.lng >= self.mid_lng) as usize;
            // Re-inserting through the child never re-triggers colocation
            // bookkeeping in the caller: the point already has whatever
            // ring membership it had before refinement, we're only moving
            // bag entries down a level.
            children[idx_root].reinsert(data, wp);
        }
    }

    /// Used only while redistributing an already-accounted-for waypoint
    /// during a refine; does not return an `InsertOutcome` since the
    /// caller already decided that at the original insertion time.
    fn reinsert(&mut self, data: &HighwayData, wp: WaypointRef) {
        if let Some(children) = &mut self.children {
            let w = data.waypoint(wp);
            let idx = self.child_index(w.lat, w.lng);
            children[idx].reinsert(data, wp);
            return;
        }
        let w = data.waypoint(wp);
        let is_new = !self.bag.iter().any(|&p| data.waypoint(p).same_coordinates(w));
        self.bag.push(wp);
        if is_new {
            self.unique_locations += 1;
            if self.unique_locations > REFINE_THRESHOLD {
                self.refine(data);
            }
        }
    }

    fn point_list(&self, out: &mut Vec<WaypointRef>) {
        if let Some(children) = &self.children {
            for c in children.iter() {
                c.point_list(out);
            }
        } else {
            out.extend_from_slice(&self.bag);
        }
    }

    fn near_miss(&self, data: &HighwayData, wp: WaypointRef, tol: f64, out: &mut Vec<WaypointRef>) {
        let w = data.waypoint(wp);
        if self.max_lat + tol < w.lat
            || self.min_lat - tol > w.lat
            || self.max_lng + tol < w.lng
            || self.min_lng - tol > w.lng
        {
            return;
        }
        if let Some(children) = &self.children {
            for c in children.iter() {
                c.near_miss(data, wp, tol, out);
            }
            return;
        }
        let w_ring = w.colocated;
        for &p in &self.bag {
            if p == wp {
                continue;
            }
            let pw = data.waypoint(p);
            if w_ring.is_some() && pw.colocated == w_ring {
                continue;
            }
            if (pw.lat - w.lat).abs() <= tol && (pw.lng - w.lng).abs() <= tol {
                out.push(p);
            }
        }
    }

    fn sort(&mut self, data: &HighwayData) {
        if let Some(children) = &mut self.children {
            for c in children.iter_mut() {
                c.sort(data);
            }
            return;
        }
        self.bag.sort_by(|&a, &b| {
            let ra = &data.route(a.route).root;
            let rb = &data.route(b.route).root;
            ra.cmp(rb).then_with(|| data.waypoint(a).label.cmp(&data.waypoint(b).label))
        });
    }

    fn is_valid(&self) -> bool {
        match &self.children {
            Some(children) => self.bag.is_empty() && children.iter().all(|c| c.is_valid()),
            None => self.unique_locations <= REFINE_THRESHOLD,
        }
    }

    /// Emit `label lat lng` lines for every leaf bag member, for debug
    /// visualization of the tree's current shape (not a routable graph).
    fn tmg_lines(&self, data: &HighwayData, out: &mut Vec<String>) {
        if let Some(children) = &self.children {
            for c in children.iter() {
                c.tmg_lines(data, out);
            }
            return;
        }
        for &wp in &self.bag {
            let w = data.waypoint(wp);
            out.push(format!("{} {:.15} {:.15}", w.label, w.lat, w.lng));
        }
    }
}

pub struct Quadtree {
    root: Mutex<Node>,
}

impl Quadtree {
    pub fn new() -> Self {
        Self { root: Mutex::new(Node::new(-90.0, -180.0, 90.0, 180.0)) }
    }

    /// Insert `wp`, serialized against every other concurrent insert on
    /// this tree by the single lock covering the whole node chain. This is
    /// the "single global write lock" option the tree is allowed to use in
    /// place of per-node locks.
    pub fn insert(&self, data: &HighwayData, wp: WaypointRef) -> InsertOutcome {
        self.root.lock().insert(data, wp)
    }

    pub fn point_list(&self) -> Vec<WaypointRef> {
        let mut out = Vec::new();
        self.root.lock().point_list(&mut out);
        out
    }

    pub fn near_miss(&self, data: &HighwayData, wp: WaypointRef, tol: f64) -> Vec<WaypointRef> {
        let mut out = Vec::new();
        self.root.lock().near_miss(data, wp, tol, &mut out);
        out
    }

    pub fn sort(&self, data: &HighwayData) {
        self.root.lock().sort(data);
    }

    pub fn is_valid(&self) -> bool {
        self.root.lock().is_valid()
    }

    pub fn tmg_lines(&self, data: &HighwayData) -> Vec<String> {
        let mut out = Vec::new();
        self.root.lock().tmg_lines(data, &mut out);
        out
    }
}

impl Default for Quadtree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tm_model::{CountryIdx, ContinentIdx, HighwaySegment, HighwaySystem, Region, RegionIdx, Route, RouteIdx, SystemIdx, Tier, Waypoint};

    fn make_data_with_points(points: &[(f64, f64)]) -> (HighwayData, Vec<WaypointRef>) {
        let mut data = HighwayData::new();
        let region = data.push_region(Region {
            code: "tst".into(),
            name: "Test".into(),
            country: CountryIdx(0),
            continent: ContinentIdx(0),
            is_multi_region: false,
        });
        let sys = data.push_system(HighwaySystem {
            name: "tst".into(),
            full_name: "Test".into(),
            country: CountryIdx(0),
            continent: ContinentIdx(0),
            tier: Tier::Active,
            routes: Vec::new(),
            connected_routes: Vec::new(),
        });
        let mut route = Route::new(sys, region, "CA1".into(), String::new(), String::new(), String::new());
        for (i, &(lat, lng)) in points.iter().enumerate() {
            route.waypoints.push(Waypoint {
                label: format!("W{i}"),
                lat,
                lng,
                route: RouteIdx(0),
                index_in_route: i as u32,
                colocated: None,
                hidden: false,
                no_photos: false,
            });
        }
        for i in 0..points.len().saturating_sub(1) {
            route.segments.push(HighwaySegment::new(i as u32, i as u32 + 1, 1.0));
        }
        let route_idx = data.push_route(route);
        let refs: Vec<_> = (0..points.len()).map(|i| WaypointRef::new(route_idx, i)).collect();
        (data, refs)
    }

    #[test]
    fn detects_exact_colocation() {
        let (data, refs) = make_data_with_points(&[(10.0, 20.0), (10.0, 20.0), (30.0, 40.0)]);
        let qt = Quadtree::new();
        assert_eq!(qt.insert(&data, refs[0]), InsertOutcome::NewLocation);
        assert_eq!(qt.insert(&data, refs[1]), InsertOutcome::Colocated(refs[0]));
        assert_eq!(qt.insert(&data, refs[2]), InsertOutcome::NewLocation);
    }

    #[test]
    fn refines_past_threshold() {
        let points: Vec<(f64, f64)> = (0..60).map(|i| (i as f64 * 0.001, 0.0)).collect();
        let (data, refs) = make_data_with_points(&points);
        let qt = Quadtree::new();
        for &r in &refs {
            qt.insert(&data, r);
        }
        assert!(qt.is_valid());
        assert_eq!(qt.point_list().len(), refs.len());
    }

    #[test]
    fn near_miss_respects_tolerance_box() {
        let (data, refs) = make_data_with_points(&[(10.0, 20.0), (10.0001, 20.0001), (50.0, 50.0)]);
        let qt = Quadtree::new();
        for &r in &refs {
            qt.insert(&data, r);
        }
        let close = qt.near_miss(&data, refs[0], 0.001);
        assert_eq!(close, vec![refs[1]]);
        let none = qt.near_miss(&data, refs[0], 0.00001);
        assert!(none.is_empty());
    }
}
