use tm_model::{HighwayData, WaypointRef};

/// Extract the digits-and-beyond tail of a route's unabbreviated name,
/// e.g. `I-90` -> `90`.
fn numeric_tail(name_no_abbrev: &str) -> String {
    match name_no_abbrev.find(|c: char| c.is_ascii_digit()) {
        Some(i) => name_no_abbrev[i..].to_string(),
        None => name_no_abbrev.to_string(),
    }
}

/// Try compressing a colocation ring into the `rte1(exit)/rte2/rte3`
/// exit-number form: one member's label is an exit number, and every
/// other member's label is explainable as a reference to that same exit
/// (its bare route name, its list-entry name, the exit label itself, or
/// the exit label decorated with the route's numeric tail in parens).
pub fn try_compress(data: &HighwayData, ring: &[WaypointRef]) -> Option<String> {
    for &exit_ref in ring {
        let exit = data.waypoint(exit_ref);
        if !exit.label.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            continue;
        }
        let exit_route = data.route(exit_ref.route);
        let no_abbrev = format!("{}{}", exit_route.root, exit_route.banner);
        let tail = numeric_tail(&no_abbrev);

        let all_match = ring.iter().all(|&m| {
            if m == exit_ref {
                return true;
            }
            let wp = data.waypoint(m);
            let route = data.route(m.route);
            let list_name = route.list_name();
            wp.label == list_name
                || wp.label == format!("{list_name}({})", exit.label)
                || wp.label == exit.label
                || wp.label == format!("{}({tail})", exit.label)
        });

        if all_match {
            let parts: Vec<String> = ring
                .iter()
                .map(|&r| {
                    let route = data.route(r.route);
                    if r == exit_ref {
                        format!("{}({})", route.list_name(), exit.label)
                    } else {
                        route.list_name()
                    }
                })
                .collect();
            return Some(parts.join("/"));
        }
    }
    None
}
