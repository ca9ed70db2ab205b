use std::path::Path;

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tm_datacheck::{Datacheck, DatacheckEntry};
use tm_graph::{GraphFormat, GraphListEntry, HighwayGraph};
use tm_model::{HighwayData, RouteIdx, WaypointRef};
use tm_naming::NamingLog;
use tm_quadtree::{InsertOutcome, Quadtree};
use tm_travelers::{RouteIndex, TravelerList};

use crate::inputs::{PipelineInputs, RouteWpt, TravelerSource};

/// Stage 1: parse every `.wpt` file's text into its route, one worker per
/// route. Runs inside the caller's thread pool so `StageThreads::read_wpt`
/// can override the worker count without a global side effect.
pub fn stage1_read_wpts(data: &mut HighwayData, wpts: &[RouteWpt], datacheck: &Datacheck) {
    let mut by_route: FxHashMap<RouteIdx, &str> = FxHashMap::default();
    for w in wpts {
        by_route.insert(w.route, w.text.as_str());
    }
    data.routes.par_iter_mut().enumerate().for_each(|(i, route)| {
        let route_idx = RouteIdx::from(i);
        if let Some(&text) = by_route.get(&route_idx) {
            tm_ingest::load_wpt_into_route(text, route_idx, route, datacheck);
        }
    });
}

/// Stage 2: insert every waypoint into the quadtree (parallel; the tree's
/// single lock serializes the actual writes), then replay the colocation
/// outcomes serially against `HighwayData` (ring bookkeeping needs
/// exclusive `&mut` access), then scan for near-misses in parallel.
///
/// Returns the quadtree (retained for stage 10's vertex ordering) and the
/// deduplicated near-miss record lines (`"<label1> <label2>"`, one per
/// unordered pair).
pub fn stage2_quadtree_and_near_miss(data: &mut HighwayData, tolerance: f64) -> (Quadtree, Vec<String>) {
    let all_wps: Vec<WaypointRef> = data
        .routes
        .iter()
        .enumerate()
        .flat_map(|(ri, route)| {
            let route_idx = RouteIdx::from(ri);
            (0..route.waypoints.len()).map(move |i| WaypointRef::new(route_idx, i))
        })
        .collect();

    let quadtree = Quadtree::new();
    let outcomes: Vec<(WaypointRef, InsertOutcome)> = {
        let data_ref: &HighwayData = data;
        all_wps.par_iter().map(|&wp| (wp, quadtree.insert(data_ref, wp))).collect()
    };

    for (wp, outcome) in outcomes {
        if let InsertOutcome::Colocated(existing) = outcome {
            match data.waypoint(existing).colocated {
                Some(ring) => {
                    data.waypoint_mut(wp).colocated = Some(ring);
                    data.colocation_rings[ring.index()].push(wp);
                }
                None => {
                    data.new_colocation_ring(vec![existing, wp]);
                }
            }
        }
    }
    quadtree.sort(data);

    let mut pair_seen: std::collections::HashSet<(WaypointRef, WaypointRef)> = std::collections::HashSet::new();
    let raw_pairs: Vec<(WaypointRef, WaypointRef)> = {
        let data_ref: &HighwayData = data;
        all_wps
            .par_iter()
            .flat_map(|&wp| {
                quadtree
                    .near_miss(data_ref, wp, tolerance)
                    .into_par_iter()
                    .map(move |other| if wp < other { (wp, other) } else { (other, wp) })
            })
            .collect()
    };
    let mut lines = Vec::new();
    for pair in raw_pairs {
        if pair_seen.insert(pair) {
            let (a, b) = pair;
            let ra = data.route(a.route).list_name();
            let rb = data.route(b.route).list_name();
            lines.push(format!(
                "{}@{} {}@{}",
                ra,
                data.waypoint(a).label,
                rb,
                data.waypoint(b).label
            ));
        }
    }
    lines.sort();
    (quadtree, lines)
}

/// Stage 5: connected-route verification, one `ConnectedRoute` chain at a
/// time (each verification mutates `route.reversed`/`route.disconnected`
/// on routes that may belong to other systems, so this isn't split across
/// systems in parallel).
pub fn stage5_route_integrity(data: &mut HighwayData, datacheck: &Datacheck) {
    for si in 0..data.systems.len() {
        let count = data.systems[si].connected_routes.len();
        for ci in 0..count {
            let mut cr = data.systems[si].connected_routes[ci].clone();
            tm_concurrency::verify_connectivity(data, &mut cr, datacheck);
            data.systems[si].connected_routes[ci] = cr;
        }
    }
}

/// Stage 6+7: parse every traveler's `.list` file (parallel; read-only
/// against `HighwayData`) then sort by name so each traveler's position in
/// the returned `Vec` is its stable index for the rest of the run.
pub fn stage6_7_read_and_sort_travelers(data: &HighwayData, travelers: &[TravelerSource]) -> Vec<TravelerList> {
    let routes = RouteIndex::build(data);
    let mut list: Vec<TravelerList> = travelers
        .par_iter()
        .map(|src| {
            let mut t = TravelerList::build(&src.name, &src.list_text, data, &routes);
            if let Some(line) = &src.last_update_line {
                t.log_lines.insert(0, format!("last updated: {line}"));
            }
            t
        })
        .collect();
    list.sort_by(|a, b| a.name.cmp(&b.name));
    list
}

/// `-p/--splitregion`: re-render every traveler's `.list` file with
/// per-segment clinch annotations, one `(traveler name, rendered text)`
/// pair per traveler, in parallel.
pub fn stage_splitregion(data: &HighwayData, routes: &RouteIndex, travelers: &[TravelerList]) -> Vec<(String, String)> {
    travelers
        .par_iter()
        .map(|t| (t.name.clone(), tm_travelers::render_splitregion(&t.raw_lines, data, routes)))
        .collect()
}

/// Stage 9 (datacheck half): flag any route whose `.wpt` file repeats a
/// label on two distinct waypoints (the label index only ever records the
/// first occurrence, so duplicates are invisible to label lookups without
/// a dedicated scan).
pub fn stage9_route_datacheck(data: &HighwayData, datacheck: &Datacheck) {
    data.routes.par_iter().enumerate().for_each(|(i, route)| {
        let route_idx = RouteIdx::from(i);
        let mut seen: FxHashMap<&str, usize> = FxHashMap::default();
        for (wi, wp) in route.waypoints.iter().enumerate() {
            if let Some(&first) = seen.get(wp.label.as_str()) {
                datacheck.add(DatacheckEntry::new(
                    route_idx,
                    route.root.clone(),
                    wp.label.clone(),
                    "",
                    "",
                    "DUPLICATE_LABEL",
                    format!("also at waypoint {first}, this is waypoint {wi}"),
                ));
            } else {
                seen.insert(wp.label.as_str(), wi);
            }
        }
    });
}

/// Stage 10: name vertices then build the highway graph. Both steps read
/// the whole model but only ever hand out one `&mut self` at a time, so
/// this stays serial.
pub fn stage10_build_graph(data: &HighwayData, order: &[WaypointRef], datacheck: &Datacheck) -> HighwayGraph {
    let naming_log = NamingLog::new();
    let names = tm_naming::name_vertices(data, order, &naming_log);
    HighwayGraph::build(data, order, &names, datacheck)
}

/// Stage 11: render one `.tmg` file per requested entry (master graphs plus
/// whatever subgraphs `inputs.graph_list` names), in parallel. Returns
/// `(filename, contents)` pairs; the caller decides where to write them.
pub fn stage11_emit_graphs(
    graph: &HighwayGraph,
    data: &HighwayData,
    inputs: &PipelineInputs,
) -> Vec<(String, String)> {
    let mut entries = vec![GraphListEntry::master(GraphFormat::Simple), GraphListEntry::master(GraphFormat::Collapsed)];
    entries.extend(inputs.graph_list.iter().cloned());

    entries
        .par_iter()
        .map(|entry| {
            let mv = graph.matching_vertices(data, entry);
            let contents = match entry.format {
                GraphFormat::Simple => {
                    let edges = graph.matching_edges(&mv, entry);
                    let mut vertices: Vec<_> = mv.into_iter().collect();
                    vertices.sort_by_key(|v| v.index());
                    graph.render_simple_tmg(data, &vertices, &edges)
                }
                GraphFormat::Collapsed => {
                    let edges = graph.matching_collapsed_edges(&mv, entry);
                    let mut vertices: Vec<_> = mv.into_iter().collect();
                    vertices.sort_by_key(|v| v.index());
                    graph.render_collapsed_tmg(data, &vertices, &edges)
                }
            };
            (entry.filename(), contents)
        })
        .collect()
}

/// Stage 12: reconcile `Datacheck` entries and near-miss records against
/// their respective false-positive allow-lists, writing every diagnostic
/// log file under `logfile_dir`.
pub fn stage12_reconcile_and_log(
    datacheck: &Datacheck,
    fps: Vec<tm_datacheck::FpRow>,
    near_miss_lines: &[String],
    nmpfps_text: Option<&str>,
    logfile_dir: &Path,
) -> std::io::Result<(usize, usize, usize, usize)> {
    let (outcome, remaining) = datacheck.mark_fps(fps, logfile_dir)?;
    tm_datacheck::Datacheck::unmatchedfps_log(&logfile_dir.join("unmatchedfps.log"), &remaining)?;
    datacheck.datacheck_log(&logfile_dir.join("datacheck.log"))?;

    let (unmatched, nmp_matched) = tm_quadtree::nmp::reconcile(near_miss_lines, nmpfps_text.unwrap_or(""));
    write_lines(&logfile_dir.join("nearmisspoints.log"), near_miss_lines)?;
    write_lines(&logfile_dir.join("nmpfpsunmatched.log"), &unmatched)?;

    Ok((outcome.matched, outcome.total, nmp_matched, unmatched.len()))
}

/// Every remaining per-run log that isn't already produced by
/// `tm-datacheck`/`tm-quadtree`: the master NMP point list, the
/// lines that failed wpt parsing, every label currently in use, every
/// traveler name with a list on file, alt names/labels that no traveler
/// list currently resolves through, and any route connectivity reversed.
pub struct ExtraLogs {
    pub master_nmp: String,
    pub unprocessed_wpts: String,
    pub points_in_use: String,
    pub list_names_in_use: String,
    pub unused_alt_route_names: String,
    pub unused_alt_labels: String,
    pub flipped_routes: String,
}

pub fn build_extra_logs(
    data: &HighwayData,
    quadtree: &Quadtree,
    datacheck: &Datacheck,
    traveler_names: &[String],
) -> ExtraLogs {
    let master_nmp = quadtree.tmg_lines(data).join("\n");

    let unprocessed_wpts = datacheck.render_matching("MALFORMED_URL").join("\n");

    let mut points_in_use = Vec::new();
    for route in &data.routes {
        for wp in &route.waypoints {
            points_in_use.push(format!("{} {}", route.list_name(), wp.label));
        }
    }
    points_in_use.sort();

    let mut list_names_in_use: Vec<String> = traveler_names.to_vec();
    list_names_in_use.sort();

    // Neither `tm-ingest` nor `tm-travelers` records which alternate route
    // name or label a `.list` file resolved through, so every alternate on
    // file is reported here as a candidate for removal.
    let mut unused_alt_route_names = Vec::new();
    let mut unused_alt_labels = Vec::new();
    for route in &data.routes {
        for alt in &route.alt_route_names {
            unused_alt_route_names.push(format!("{} {}", route.list_name(), alt));
        }
        for (label, &idx) in &route.label_index {
            if *label != route.waypoints[idx].label {
                unused_alt_labels.push(format!("{} {}", route.list_name(), label));
            }
        }
    }
    unused_alt_route_names.sort();
    unused_alt_labels.sort();

    let mut flipped_routes = Vec::new();
    for route in &data.routes {
        if route.reversed {
            flipped_routes.push(route.list_name());
        }
    }
    flipped_routes.sort();

    ExtraLogs {
        master_nmp,
        unprocessed_wpts,
        points_in_use: points_in_use.join("\n"),
        list_names_in_use: list_names_in_use.join("\n"),
        unused_alt_route_names: unused_alt_route_names.join("\n"),
        unused_alt_labels: unused_alt_labels.join("\n"),
        flipped_routes: flipped_routes.join("\n"),
    }
}

fn write_lines(path: &Path, lines: &[String]) -> std::io::Result<()> {
    use std::io::Write;
    let mut f = std::io::BufWriter::new(std::fs::File::create(path)?);
    for line in lines {
        writeln!(f, "{line}")?;
    }
    Ok(())
}
