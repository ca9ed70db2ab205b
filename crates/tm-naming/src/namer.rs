use rustc_hash::{FxHashMap, FxHashSet};
use tm_model::{HighwayData, WaypointRef};

use crate::exit_number::try_compress;
use crate::log::NamingLog;

fn active_or_preview(data: &HighwayData, wp: WaypointRef) -> bool {
    let route = data.route(wp.route);
    data.system(route.system).active_or_preview()
}

fn is_or_colocated_with_active_or_preview(data: &HighwayData, wp: WaypointRef) -> bool {
    match data.waypoint(wp).colocated {
        Some(ring) => data.colocation_ring(ring).iter().any(|&m| active_or_preview(data, m)),
        None => active_or_preview(data, wp),
    }
}

fn canonical_name(data: &HighwayData, ring: &[WaypointRef]) -> String {
    if let Some(compressed) = try_compress(data, ring) {
        return compressed;
    }
    ring.iter()
        .map(|&r| {
            let wp = data.waypoint(r);
            let route = data.route(r.route);
            format!("{}@{}", route.list_name(), wp.label)
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn simple_name(data: &HighwayData, lead: WaypointRef) -> String {
    let wp = data.waypoint(lead);
    let route = data.route(lead.route);
    format!("{}@{}", route.list_name(), wp.label)
}

/// Assign a unique vertex name to every lead waypoint (colocation ring
/// head, or a standalone point) that belongs to, or is colocated with, an
/// active-or-preview system. `order` should be the quadtree's in-order
/// point list, so naming collisions resolve in the same order the
/// original tool produces them in.
///
/// The returned map has an entry for every member of a named ring, not
/// just its lead, so callers can resolve any waypoint straight to its
/// vertex name.
pub fn name_vertices(
    data: &HighwayData,
    order: &[WaypointRef],
    log: &NamingLog,
) -> FxHashMap<WaypointRef, String> {
    let mut used: FxHashSet<String> = FxHashSet::default();
    let mut names = FxHashMap::default();

    for &w in order {
        if !is_or_colocated_with_active_or_preview(data, w) {
            continue;
        }
        if let Some(ring) = data.waypoint(w).colocated {
            if data.colocation_ring(ring)[0] != w {
                continue;
            }
        }

        let ring_members = data.colocated_with(w);
        let mut name = canonical_name(data, &ring_members);
        let mut good = !used.contains(&name);

        if !good {
            let region_code = data.region(data.route(w.route).region).code.clone();
            name = format!("{name}|{region_code}");
            log.push(format!("Appended region: {name}"));
            good = !used.contains(&name);
        }

        if !good {
            let simple = simple_name(data, w);
            if !used.contains(&simple) {
                log.push(format!("Revert to simple: {simple} from (taken) {name}"));
                name = simple;
                good = true;
            }
        }

        if !good {
            while used.contains(&name) {
                name.push('!');
                log.push(format!("Appended !: {name}"));
            }
        }

        used.insert(name.clone());
        for &member in &ring_members {
            names.insert(member, name.clone());
        }
    }

    names
}
