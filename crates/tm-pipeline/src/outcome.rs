use std::path::PathBuf;

use tm_stats::HighwayStats;

/// What a run produced: whether it's fatal (non-empty `ErrorList` at the
/// end), plus enough summary data and output paths for a caller
/// (`tools/tm-engine`) to report to the user without re-deriving anything
/// from the model.
#[derive(Debug, Default)]
pub struct PipelineOutcome {
    pub errors: Vec<String>,
    pub fatal: bool,
    pub datacheck_total: usize,
    pub datacheck_fp_matched: usize,
    pub near_miss_total: usize,
    pub near_miss_unmatched: usize,
    pub concurrency_ring_count: usize,
    pub route_stats: Option<HighwayStats>,
    pub graph_files_written: Vec<PathBuf>,
    pub sql_path: Option<PathBuf>,
    pub traveler_logs_written: usize,
}
