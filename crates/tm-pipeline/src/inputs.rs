use tm_datacheck::FpRow;
use tm_graph::GraphListEntry;
use tm_model::RouteIdx;

/// A `.wpt` file's text, already read from disk, paired with the route it
/// belongs to. The driver never touches a filesystem itself; something
/// upstream (`tools/tm-engine`) walks `hwy_data/` and hands these in.
pub struct RouteWpt {
    pub route: RouteIdx,
    pub text: String,
}

/// A `.list` file's text, paired with the traveler name it was read for,
/// plus an optional single line from that traveler's `.time` file.
pub struct TravelerSource {
    pub name: String,
    pub list_text: String,
    pub last_update_line: Option<String>,
}

/// Everything the driver needs beyond the already-loaded manifest model:
/// per-route wpt text, per-traveler list text, the subgraph request list,
/// and any known false-positive rows for datacheck/near-miss reconciliation.
pub struct PipelineInputs {
    pub wpts: Vec<RouteWpt>,
    pub travelers: Vec<TravelerSource>,
    pub graph_list: Vec<GraphListEntry>,
    pub datacheck_fps: Vec<FpRow>,
    /// Raw `nmpfps.log` text, if that file is present, for near-miss
    /// false-positive reconciliation in stage 12.
    pub nmpfps_text: Option<String>,
}
