use std::path::PathBuf;

/// Per-stage thread-count overrides, one field per worker-pool stage that
/// can be tuned independently of the global `--numthreads` default
/// (`--ReadWptThreads` etc.). `None` means "use the global default".
#[derive(Debug, Clone, Default)]
pub struct StageThreads {
    pub read_wpt: Option<usize>,
    pub near_miss: Option<usize>,
    pub read_lists: Option<usize>,
    pub clinch: Option<usize>,
    pub datacheck_stats: Option<usize>,
    pub graphs: Option<usize>,
}

impl StageThreads {
    pub fn resolve(&self, stage: Option<usize>, default: usize) -> usize {
        stage.unwrap_or(default).max(1)
    }
}

/// Everything the driver needs besides the in-memory model and the
/// pre-read file contents: thread budgets, output locations, and the
/// run-mode flags surfaced on the command line.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub num_threads: usize,
    pub stage_threads: StageThreads,
    /// `-k/--skipgraphs`: skip stage 11 (graph emission) entirely.
    pub skip_graphs: bool,
    /// `-e/--errorcheck`: skip SQL emission and non-essential stats, for a
    /// fast structural-validity-only pass.
    pub error_check_only: bool,
    /// `-p/--splitregion`: re-emit each traveler's `.list` file annotated
    /// with per-segment clinch status.
    pub splitregion: bool,
    /// Near-miss detection tolerance, in degrees of lat/lng.
    pub nmp_tolerance: f64,
    pub database_name: String,
    pub output_dir: PathBuf,
    pub logfile_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            num_threads: 4,
            stage_threads: StageThreads::default(),
            skip_graphs: false,
            error_check_only: false,
            splitregion: false,
            nmp_tolerance: 0.0005,
            database_name: "tm".into(),
            output_dir: PathBuf::from("."),
            logfile_dir: PathBuf::from("."),
        }
    }
}
