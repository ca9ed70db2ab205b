use crate::ids::{
    ColocationRingIdx, ConcurrencyRingIdx, ContinentIdx, CountryIdx, RegionIdx, RouteIdx,
    SegmentRef, SystemIdx, WaypointRef,
};
use crate::region::{Continent, Country, Region};
use crate::route::Route;
use crate::segment::HighwaySegment;
use crate::system::HighwaySystem;
use crate::waypoint::Waypoint;

/// The whole in-memory model: every continent, country, region, system, and
/// route loaded from the manifests, plus the two cross-cutting ring arenas
/// (colocation, concurrency) that tie waypoints and segments together
/// without requiring them to know about each other directly.
///
/// Routes live in one flat arena here rather than nested inside their
/// owning `HighwaySystem`, so that later stages can hold a `RouteIdx`
/// without borrowing through a chain of `Vec<Vec<_>>`. `HighwaySystem`
/// still records which `RouteIdx`s are "its" routes, and nothing else
/// references a given index once that system is done with it, so ownership
/// stays effectively tree-shaped even though storage is flat.
#[derive(Debug, Default)]
pub struct HighwayData {
    pub continents: Vec<Continent>,
    pub countries: Vec<Country>,
    pub regions: Vec<Region>,
    pub systems: Vec<HighwaySystem>,
    pub routes: Vec<Route>,
    pub colocation_rings: Vec<Vec<WaypointRef>>,
    pub concurrency_rings: Vec<Vec<SegmentRef>>,
}

impl HighwayData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_continent(&mut self, c: Continent) -> ContinentIdx {
        self.continents.push(c);
        ContinentIdx::from(self.continents.len() - 1)
    }

    pub fn push_country(&mut self, c: Country) -> CountryIdx {
        self.countries.push(c);
        CountryIdx::from(self.countries.len() - 1)
    }

    pub fn push_region(&mut self, r: Region) -> RegionIdx {
        self.regions.push(r);
        RegionIdx::from(self.regions.len() - 1)
    }

    pub fn push_system(&mut self, s: HighwaySystem) -> SystemIdx {
        self.systems.push(s);
        SystemIdx::from(self.systems.len() - 1)
    }

    pub fn push_route(&mut self, r: Route) -> RouteIdx {
        self.routes.push(r);
        RouteIdx::from(self.routes.len() - 1)
    }

    pub fn region(&self, idx: RegionIdx) -> &Region {
        &self.regions[idx.index()]
    }

    pub fn system(&self, idx: SystemIdx) -> &HighwaySystem {
        &self.systems[idx.index()]
    }

    pub fn system_mut(&mut self, idx: SystemIdx) -> &mut HighwaySystem {
        &mut self.systems[idx.index()]
    }

    pub fn route(&self, idx: RouteIdx) -> &Route {
        &self.routes[idx.index()]
    }

    pub fn route_mut(&mut self, idx: RouteIdx) -> &mut Route {
        &mut self.routes[idx.index()]
    }

    pub fn waypoint(&self, wp: WaypointRef) -> &Waypoint {
        &self.routes[wp.route.index()].waypoints[wp.index as usize]
    }

    pub fn waypoint_mut(&mut self, wp: WaypointRef) -> &mut Waypoint {
        &mut self.routes[wp.route.index()].waypoints[wp.index as usize]
    }

    pub fn segment(&self, seg: SegmentRef) -> &HighwaySegment {
        &self.routes[seg.route.index()].segments[seg.index as usize]
    }

    pub fn segment_mut(&mut self, seg: SegmentRef) -> &mut HighwaySegment {
        &mut self.routes[seg.route.index()].segments[seg.index as usize]
    }

    /// Segment endpoints as `WaypointRef`s, in `(wp1, wp2)` order.
    pub fn segment_endpoints(&self, seg: SegmentRef) -> (WaypointRef, WaypointRef) {
        let s = self.segment(seg);
        (
            WaypointRef::new(seg.route, s.wp1 as usize),
            WaypointRef::new(seg.route, s.wp2 as usize),
        )
    }

    /// Create a new colocation ring containing exactly the given waypoints,
    /// and stamp each waypoint with the new ring's index.
    pub fn new_colocation_ring(&mut self, members: Vec<WaypointRef>) -> ColocationRingIdx {
        let idx = ColocationRingIdx::from(self.colocation_rings.len());
        for &wp in &members {
            self.waypoint_mut(wp).colocated = Some(idx);
        }
        self.colocation_rings.push(members);
        idx
    }

    pub fn colocation_ring(&self, idx: ColocationRingIdx) -> &[WaypointRef] {
        &self.colocation_rings[idx.index()]
    }

    /// Create a new concurrency ring containing exactly the given segments,
    /// and stamp each segment with the new ring's index.
    pub fn new_concurrency_ring(&mut self, members: Vec<SegmentRef>) -> ConcurrencyRingIdx {
        let idx = ConcurrencyRingIdx::from(self.concurrency_rings.len());
        for &seg in &members {
            self.segment_mut(seg).concurrent = Some(idx);
        }
        self.concurrency_rings.push(members);
        idx
    }

    pub fn concurrency_ring(&self, idx: ConcurrencyRingIdx) -> &[SegmentRef] {
        &self.concurrency_rings[idx.index()]
    }

    /// All waypoints colocated with `wp`, including `wp` itself if it sits
    /// in a ring, or just `wp` alone if it doesn't.
    pub fn colocated_with(&self, wp: WaypointRef) -> Vec<WaypointRef> {
        match self.waypoint(wp).colocated {
            Some(ring) => self.colocation_ring(ring).to_vec(),
            None => vec![wp],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Route;

    fn sample_route(data: &mut HighwayData, sys: SystemIdx, region: RegionIdx) -> RouteIdx {
        let mut r = Route::new(sys, region, "CA1".into(), String::new(), String::new(), "".into());
        r.waypoints.push(Waypoint {
            label: "A".into(),
            lat: 1.0,
            lng: 2.0,
            route: RouteIdx(0),
            index_in_route: 0,
            colocated: None,
            hidden: false,
            no_photos: false,
        });
        r.waypoints.push(Waypoint {
            label: "B".into(),
            lat: 3.0,
            lng: 4.0,
            route: RouteIdx(0),
            index_in_route: 1,
            colocated: None,
            hidden: false,
            no_photos: false,
        });
        r.segments.push(HighwaySegment::new(0, 1, 5.0));
        data.push_route(r)
    }

    #[test]
    fn colocation_ring_stamps_members() {
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
            full_name: "Test System".into(),
            country: CountryIdx(0),
            continent: ContinentIdx(0),
            tier: crate::system::Tier::Active,
            routes: Vec::new(),
            connected_routes: Vec::new(),
        });
        let route = sample_route(&mut data, sys, region);
        let wp0 = WaypointRef::new(route, 0);
        let wp1 = WaypointRef::new(route, 1);

        let ring = data.new_colocation_ring(vec![wp0, wp1]);
        assert_eq!(data.waypoint(wp0).colocated, Some(ring));
        assert_eq!(data.colocated_with(wp1).len(), 2);
    }

    #[test]
    fn uncolocated_waypoint_returns_itself() {
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
            full_name: "Test System".into(),
            country: CountryIdx(0),
            continent: ContinentIdx(0),
            tier: crate::system::Tier::Active,
            routes: Vec::new(),
            connected_routes: Vec::new(),
        });
        let route = sample_route(&mut data, sys, region);
        let wp0 = WaypointRef::new(route, 0);
        assert_eq!(data.colocated_with(wp0), vec![wp0]);
    }
}
