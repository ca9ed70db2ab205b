use tm_datacheck::{Datacheck, DatacheckEntry};
use tm_model::{ConnectedRoute, HighwayData, RouteIdx, Waypoint};

fn con_end<'a>(data: &'a HighwayData, route: RouteIdx) -> &'a Waypoint {
    let r = data.route(route);
    if r.reversed {
        r.waypoints.first().expect("route has waypoints")
    } else {
        r.waypoints.last().expect("route has waypoints")
    }
}

fn con_beg<'a>(data: &'a HighwayData, route: RouteIdx) -> &'a Waypoint {
    let r = data.route(route);
    if r.reversed {
        r.waypoints.last().expect("route has waypoints")
    } else {
        r.waypoints.first().expect("route has waypoints")
    }
}

fn root_at_label(data: &HighwayData, route: RouteIdx, wp: &Waypoint) -> String {
    format!("{} {}", data.route(route).root, wp.label)
}

/// Verify that each pair of adjacent roots in a connected route share an
/// endpoint, applying the same endpoint-reversal rescues (and exactly the
/// same precedence among them) as the original tool: a route's direction
/// is only ever flipped while it's still "open" — either it's the first
/// root, or an earlier mismatch already marked it disconnected and thus
/// undecided.
pub fn verify_connectivity(data: &mut HighwayData, cr: &mut ConnectedRoute, datacheck: &Datacheck) {
    for i in 1..cr.roots.len() {
        let q = cr.roots[i - 1];
        let r = cr.roots[i];

        if data.route(q).waypoints.len() <= 1 || data.route(r).waypoints.len() <= 1 {
            continue;
        }

        let r_begin = data.route(r).waypoints.first().unwrap().clone();
        let r_end = data.route(r).waypoints.last().unwrap().clone();
        let q_con_end = con_end(data, q).clone();
        let q_con_beg = con_beg(data, q).clone();

        if r_begin.same_coordinates(&q_con_end) {
            continue;
        }

        let q_open = q == cr.roots[0] || data.route(q).disconnected;

        if q_con_end.same_coordinates(&r_end) {
            // R can be reversed in place. Prefer reversing Q instead only
            // when Q's direction is still open AND doing so keeps R's
            // *current* (unreversed) orientation consistent with whatever
            // comes after it in the chain.
            let q_beg_matches_r_begin = q_con_beg.same_coordinates(&r_begin);
            let next_links_to_r_as_is = i + 1 < cr.roots.len() && {
                let next = cr.roots[i + 1];
                let next_begin = data.route(next).waypoints.first().unwrap();
                let next_end = data.route(next).waypoints.last().unwrap();
                r_end.same_coordinates(next_begin) || r_end.same_coordinates(next_end)
            };
            if q_beg_matches_r_begin && q_open && next_links_to_r_as_is {
                data.route_mut(q).reversed = true;
            } else {
                data.route_mut(r).reversed = true;
            }
        } else if q_con_beg.same_coordinates(&r_end) {
            if q_open {
                data.route_mut(q).reversed = true;
                data.route_mut(r).reversed = true;
            } else {
                flag_disconnected(data, q, r, &q_con_end, &r_begin, datacheck);
            }
        } else if q_con_beg.same_coordinates(&r_begin) && q_open {
            data.route_mut(q).reversed = true;
        } else {
            flag_disconnected(data, q, r, &q_con_end, &r_begin, datacheck);
        }
    }
}

fn flag_disconnected(
    data: &mut HighwayData,
    q: RouteIdx,
    r: RouteIdx,
    q_con_end: &Waypoint,
    r_begin: &Waypoint,
    datacheck: &Datacheck,
) {
    datacheck.add(DatacheckEntry::new(
        q,
        data.route(q).root.clone(),
        q_con_end.label.clone(),
        "",
        "",
        "DISCONNECTED_ROUTE",
        root_at_label(data, r, r_begin),
    ));
    datacheck.add(DatacheckEntry::new(
        r,
        data.route(r).root.clone(),
        r_begin.label.clone(),
        "",
        "",
        "DISCONNECTED_ROUTE",
        root_at_label(data, q, q_con_end),
    ));
    data.route_mut(q).disconnected = true;
    data.route_mut(r).disconnected = true;
}
