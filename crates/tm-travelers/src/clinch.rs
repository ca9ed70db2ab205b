use parking_lot::Mutex;
use rayon::prelude::*;
use tm_model::{HighwayData, SegmentRef};

use crate::traveler::TravelerList;

/// Reset every route's clinched-by bookkeeping to one empty set per segment.
/// Must run once, serially, before `run` — the mutation itself (`Vec::resize_with`)
/// isn't safe to race against concurrent inserts.
pub fn reset_clinch_state(data: &mut HighwayData) {
    for route in &mut data.routes {
        route.init_clinch_state();
    }
}

/// Mark `seg` clinched by `traveler_idx`. Returns `true` if this is a new
/// addition (the traveler hadn't already clinched it), matching the
/// at-most-once semantics the per-route mutex exists to guarantee.
fn mark_clinched(data: &HighwayData, traveler_idx: u32, seg: SegmentRef) -> bool {
    let route = data.route(seg.route);
    let _guard = route.clinch_lock.lock();
    let mut clinched_by = route.clinched_by.lock();
    clinched_by[seg.index as usize].insert(traveler_idx)
}

/// For every segment a traveler clinches directly, propagate that clinch to
/// every other segment sharing its concurrency ring (fellow-traveler routes
/// running the same pavement). The segment's own direct clinch is marked
/// too, but only the *siblings* get a log line: the direct clinch is already
/// implied by the traveler's `.list` file and isn't "new" information.
///
/// Idempotent: re-running over the same travelers finds every set entry
/// already present and does nothing further.
pub fn run(data: &HighwayData, travelers: &mut [TravelerList]) -> Vec<String> {
    let log: Mutex<Vec<String>> = Mutex::new(Vec::new());

    travelers.par_iter_mut().enumerate().for_each(|(traveler_idx, traveler)| {
        let traveler_idx = traveler_idx as u32;
        // `clinched_segments` is only read below; clone the direct list up
        // front so the loop can still mutate `traveler`'s mileage-key maps.
        let direct = traveler.clinched_segments.clone();
        for seg in direct {
            mark_clinched(data, traveler_idx, seg);

            let Some(ring_idx) = data.segment(seg).concurrent else { continue };
            for &sibling in data.concurrency_ring(ring_idx) {
                if sibling == seg {
                    continue;
                }
                let sibling_route = data.route(sibling.route);
                if !data.system(sibling_route.system).active_or_preview() {
                    continue;
                }
                if mark_clinched(data, traveler_idx, sibling) {
                    traveler.seed_region_keys(sibling_route.region, sibling_route.system);
                    log.lock().push(format!(
                        "{} also clinches {} via concurrency with {}",
                        traveler.name,
                        sibling_route.list_name(),
                        data.route(seg.route).list_name()
                    ));
                }
            }
        }
    });

    log.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tm_model::{
        ContinentIdx, CountryIdx, HighwaySegment, HighwaySystem, Region, Route, RouteIdx, Tier, Waypoint,
    };

    fn two_concurrent_routes() -> (HighwayData, SegmentRef, SegmentRef) {
        let mut data = HighwayData::new();
        let region = data.push_region(Region {
            code: "ca".into(),
            name: "California".into(),
            country: CountryIdx(0),
            continent: ContinentIdx(0),
            is_multi_region: false,
        });
        let sys = data.push_system(HighwaySystem {
            name: "usai".into(),
            full_name: "US Interstates".into(),
            country: CountryIdx(0),
            continent: ContinentIdx(0),
            tier: Tier::Active,
            routes: Vec::new(),
            connected_routes: Vec::new(),
        });

        let mut r1 = Route::new(sys, region, "I-90".into(), String::new(), String::new(), String::new());
        r1.waypoints.push(wp("A", 0.0));
        r1.waypoints.push(wp("B", 1.0));
        r1.segments.push(HighwaySegment::new(0, 1, 1.0));
        let idx1 = data.push_route(r1);

        let mut r2 = Route::new(sys, region, "I-94".into(), String::new(), String::new(), String::new());
        r2.waypoints.push(wp("X", 0.0));
        r2.waypoints.push(wp("Y", 1.0));
        r2.segments.push(HighwaySegment::new(0, 1, 1.0));
        let idx2 = data.push_route(r2);

        data.system_mut(sys).routes.push(idx1);
        data.system_mut(sys).routes.push(idx2);

        let seg1 = SegmentRef::new(idx1, 0);
        let seg2 = SegmentRef::new(idx2, 0);
        data.new_concurrency_ring(vec![seg1, seg2]);
        reset_clinch_state(&mut data);
        (data, seg1, seg2)
    }

    fn wp(label: &str, lat: f64) -> Waypoint {
        Waypoint {
            label: label.into(),
            lat,
            lng: 0.0,
            route: RouteIdx(0),
            index_in_route: 0,
            colocated: None,
            hidden: false,
            no_photos: false,
        }
    }

    #[test]
    fn propagates_clinch_across_concurrency_ring() {
        let (data, seg1, seg2) = two_concurrent_routes();
        let traveler = TravelerList {
            name: "alice".into(),
            clinched_segments: vec![seg1],
            raw_lines: Vec::new(),
            active_only_mileage_by_region: Default::default(),
            active_preview_mileage_by_region: Default::default(),
            system_region_mileages: Default::default(),
            updated_routes: Default::default(),
            log_lines: Vec::new(),
        };

        let mut travelers = [traveler];
        let log = run(&data, &mut travelers);
        assert_eq!(log.len(), 1);
        assert!(data.route(seg1.route).clinched_by.lock()[0].contains(&0));
        assert!(data.route(seg2.route).clinched_by.lock()[0].contains(&0));
    }

    #[test]
    fn rerun_is_idempotent() {
        let (data, seg1, _seg2) = two_concurrent_routes();
        let traveler = TravelerList {
            name: "alice".into(),
            clinched_segments: vec![seg1],
            raw_lines: Vec::new(),
            active_only_mileage_by_region: Default::default(),
            active_preview_mileage_by_region: Default::default(),
            system_region_mileages: Default::default(),
            updated_routes: Default::default(),
            log_lines: Vec::new(),
        };
        let mut travelers = [traveler];
        let _ = run(&data, &mut travelers);
        let second = run(&data, &mut travelers);
        assert!(second.is_empty());
    }
}
