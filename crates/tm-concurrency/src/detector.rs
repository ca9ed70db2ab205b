use tm_model::{HighwayData, RouteIdx, SegmentRef, WaypointRef};

/// Build concurrency rings over every segment in the model.
///
/// For each not-yet-ringed segment `s = (a, b)` on some route, look at
/// every waypoint colocated with `a` (including waypoints on other
/// routes). For each such point, scan the segments incident to it on its
/// own route; a segment whose other endpoint colocates with `b`, and that
/// isn't already in a ring, joins `s`'s ring. All matches found in this
/// one pass join the same ring, so three-or-more-way concurrencies are
/// captured without a second pass: their shared point's colocation ring
/// already lists every sibling route's waypoint at that location.
///
/// The canonical segment of a ring is always its first member, which is
/// whichever segment was reached first in arena order — stable, since
/// segments never move once created.
pub fn detect_concurrencies(data: &mut HighwayData) {
    let mut all_segments = Vec::new();
    for (ri, route) in data.routes.iter().enumerate() {
        for si in 0..route.segments.len() {
            all_segments.push(SegmentRef::new(RouteIdx::from(ri), si));
        }
    }

    for s in all_segments {
        if data.segment(s).concurrent.is_some() {
            continue;
        }
        let (wa, wb) = data.segment_endpoints(s);
        let mut ring_members = vec![s];

        for a_prime in data.colocated_with(wa) {
            let route_a = a_prime.route;
            let seg_count = data.route(route_a).segments.len();
            for si in 0..seg_count {
                let cand = SegmentRef::new(route_a, si);
                if cand == s || ring_members.contains(&cand) {
                    continue;
                }
                if data.segment(cand).concurrent.is_some() {
                    continue;
                }
                let seg = data.segment(cand);
                if seg.wp1 != a_prime.index && seg.wp2 != a_prime.index {
                    continue;
                }
                let other_idx = seg.other_end(a_prime.index);
                let other_ref = WaypointRef::new(route_a, other_idx as usize);
                if other_ref == wb || data.colocated_with(other_ref).contains(&wb) {
                    ring_members.push(cand);
                }
            }
        }

        if ring_members.len() > 1 {
            data.new_concurrency_ring(ring_members);
        }
    }
}
