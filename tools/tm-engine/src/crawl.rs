use std::fs;
use std::path::Path;

use tm_common::ErrorList;
use tm_model::{HighwayData, RouteIdx};
use tm_pipeline::{PipelineInputs, RouteWpt, TravelerSource};

/// Read every route's `.wpt` file from `hwy_data/<region>/<system>/<root>.wpt`.
/// A missing file is an `ErrorList` entry (a missing input file is a
/// structural problem) rather than a reason to stop.
pub fn read_wpts(data_dir: &Path, data: &HighwayData, el: &ErrorList) -> Vec<RouteWpt> {
    let mut out = Vec::new();
    for (i, route) in data.routes.iter().enumerate() {
        let region_code = data.region(route.region).code.clone();
        let system_name = data.system(route.system).name.clone();
        let path = data_dir.join("hwy_data").join(&region_code).join(&system_name).join(format!("{}.wpt", route.root));
        match fs::read_to_string(&path) {
            Ok(text) => out.push(RouteWpt { route: RouteIdx::from(i), text }),
            Err(e) => el.add_error(format!("could not read {}: {e}", path.display())),
        }
    }
    out
}

/// Read every traveler's `.list` file under `UserData/list_files/`,
/// restricted to `only` when non-empty (the `-U/--userlist` flag). Each
/// traveler's companion `.time` file, if present, supplies the single
/// "last updated" line threaded through to their per-user log.
pub fn read_travelers(data_dir: &Path, only: &[String], el: &ErrorList) -> Vec<TravelerSource> {
    let list_dir = data_dir.join("UserData").join("list_files");
    let entries = match fs::read_dir(&list_dir) {
        Ok(e) => e,
        Err(e) => {
            el.add_error(format!("could not read {}: {e}", list_dir.display()));
            return Vec::new();
        }
    };

    let mut out = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("list") {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else { continue };
        if !only.is_empty() && !only.iter().any(|n| n == name) {
            continue;
        }
        let list_text = match fs::read_to_string(&path) {
            Ok(t) => t,
            Err(e) => {
                el.add_error(format!("could not read {}: {e}", path.display()));
                continue;
            }
        };
        let last_update_line = fs::read_to_string(data_dir.join("UserData").join("time_files").join(format!("{name}.time")))
            .ok()
            .and_then(|t| t.lines().next().map(str::to_string));
        out.push(TravelerSource { name: name.to_string(), list_text, last_update_line });
    }
    out
}

pub fn read_datacheck_fps(data_dir: &Path, el: &ErrorList) -> Vec<tm_datacheck::FpRow> {
    tm_datacheck::Datacheck::read_fps(&data_dir.join("datacheckfps.csv"), el)
}

pub fn read_nmpfps(data_dir: &Path) -> Option<String> {
    fs::read_to_string(data_dir.join("nmpfps.log")).ok()
}

/// `graphs.csv`, if present: one subgraph request per row, `;`-delimited
/// `category;root;descr;format;regions;systems` with `regions`/`systems`
/// themselves `|`-joined lists of codes/names (empty for "all").
pub fn read_graph_list(data_dir: &Path, data: &HighwayData, el: &ErrorList) -> Vec<tm_graph::GraphListEntry> {
    let path = data_dir.join("graphs.csv");
    let Ok(text) = fs::read_to_string(&path) else { return Vec::new() };

    let mut out = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        if lineno == 0 || line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(';').collect();
        if fields.len() < 6 {
            el.add_error(format!("malformed row in {}: {line}", path.display()));
            continue;
        }
        let category = match fields[0] {
            "region" => tm_graph::GraphCategory::Region,
            "system" => tm_graph::GraphCategory::System,
            "multisystem" => tm_graph::GraphCategory::Multisystem,
            "country" => tm_graph::GraphCategory::Country,
            "continent" => tm_graph::GraphCategory::Continent,
            "place" => tm_graph::GraphCategory::Place,
            _ => tm_graph::GraphCategory::Master,
        };
        let format = if fields[3] == "collapsed" { tm_graph::GraphFormat::Collapsed } else { tm_graph::GraphFormat::Simple };
        let regions = fields[4]
            .split('|')
            .filter(|s| !s.is_empty())
            .filter_map(|code| data.regions.iter().position(|r| r.code == code).map(tm_model::RegionIdx::from))
            .collect();
        let systems = fields[5]
            .split('|')
            .filter(|s| !s.is_empty())
            .filter_map(|name| data.systems.iter().position(|s| s.name == name).map(tm_model::SystemIdx::from))
            .collect();
        out.push(tm_graph::GraphListEntry {
            root: fields[1].to_string(),
            descr: fields[2].to_string(),
            format,
            category,
            regions,
            systems,
            placeradius: None,
        });
    }
    out
}

pub fn build_inputs(data_dir: &Path, data: &HighwayData, only_travelers: &[String], el: &ErrorList) -> PipelineInputs {
    PipelineInputs {
        wpts: read_wpts(data_dir, data, el),
        travelers: read_travelers(data_dir, only_travelers, el),
        graph_list: read_graph_list(data_dir, data, el),
        datacheck_fps: read_datacheck_fps(data_dir, el),
        nmpfps_text: read_nmpfps(data_dir),
    }
}
