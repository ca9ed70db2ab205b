use tm_model::HighwayData;

use crate::list_parser::ListLine;
use crate::route_index::RouteIndex;

/// Re-render one traveler's `.list` lines for `-p/--splitregion`: every
/// line comes back out in its original order, comments and blank lines
/// untouched, but each `Chopped`/`Connected` line gains a trailing comment
/// naming the segments it actually resolved to (or why it didn't), the
/// same per-line resolution `TravelerList::build` runs, replayed here
/// purely for rendering.
pub fn render_splitregion(raw_lines: &[ListLine], data: &HighwayData, routes: &RouteIndex) -> String {
    let mut out = String::new();
    for line in raw_lines {
        match line {
            ListLine::PassThrough(raw) => {
                out.push_str(raw);
                out.push('\n');
            }
            ListLine::Chopped { raw, region, route, label1, label2 } => {
                out.push_str(raw);
                match routes.resolve_unique(region, route) {
                    Some(idx) => annotate_range(&mut out, data, idx, label1, label2),
                    None => out.push_str(" # unresolved route"),
                }
                out.push('\n');
            }
            ListLine::Connected { raw, region, route, banner, city, label1, label2 } => {
                out.push_str(raw);
                match routes.resolve_with_banner(data, region, route, banner, city) {
                    Some(idx) => annotate_range(&mut out, data, idx, label1, label2),
                    None => out.push_str(" # unresolved route"),
                }
                out.push('\n');
            }
        }
    }
    out
}

/// Append `# clinched: a-b, b-c` (one segment per comma) for the resolved
/// route's `label1..label2` range, or `# labels not found` when either
/// label is absent from the route.
fn annotate_range(out: &mut String, data: &HighwayData, route_idx: tm_model::RouteIdx, label1: &str, label2: &str) {
    let route = data.route(route_idx);
    let (Some(&i1), Some(&i2)) = (route.label_index.get(label1), route.label_index.get(label2)) else {
        out.push_str(" # labels not found");
        return;
    };
    let (lo, hi) = if i1 <= i2 { (i1, i2) } else { (i2, i1) };
    if lo == hi {
        out.push_str(" # zero-length clinch");
        return;
    }
    let segs: Vec<String> = (lo..hi)
        .map(|i| format!("{}-{}", route.waypoints[i].label, route.waypoints[i + 1].label))
        .collect();
    out.push_str(" # clinched: ");
    out.push_str(&segs.join(", "));
}
