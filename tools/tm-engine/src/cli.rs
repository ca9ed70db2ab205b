use std::path::PathBuf;

use clap::Parser;

/// Run the Travel Mapping site-update pipeline over a data directory.
#[derive(Parser, Debug)]
#[command(name = "tm-engine", version, about)]
pub struct Cli {
    /// Root of the data directory (contains continents.csv, hwy_data/, UserData/, ...).
    #[arg(long, default_value = ".")]
    pub data_dir: PathBuf,

    /// Directory to write graphs, SQL dump, and CSV stats into.
    #[arg(long, default_value = "out")]
    pub output_dir: PathBuf,

    /// Directory to write datacheck/near-miss/stats logs into.
    #[arg(long, default_value = "out/logs")]
    pub logfile_dir: PathBuf,

    /// Name of the systems manifest file, relative to --data-dir.
    #[arg(long, default_value = "systems.csv")]
    pub systems_file: String,

    /// Base name for the emitted SQL dump (`<name>.sql`).
    #[arg(long, default_value = "tm")]
    pub database_name: String,

    /// Default worker-pool size for every stage without its own override.
    #[arg(short = 't', long = "numthreads", default_value_t = 4)]
    pub num_threads: usize,

    #[arg(long = "ReadWptThreads")]
    pub read_wpt_threads: Option<usize>,
    #[arg(long = "NearMissThreads")]
    pub near_miss_threads: Option<usize>,
    #[arg(long = "ReadListThreads")]
    pub read_list_threads: Option<usize>,
    #[arg(long = "ClinchThreads")]
    pub clinch_threads: Option<usize>,
    #[arg(long = "DataCheckThreads")]
    pub datacheck_threads: Option<usize>,
    #[arg(long = "GraphThreads")]
    pub graph_threads: Option<usize>,

    /// Skip stage 11 (graph file emission).
    #[arg(short = 'k', long = "skipgraphs")]
    pub skip_graphs: bool,

    /// Stop after structural validation; skip SQL and non-essential stats.
    #[arg(short = 'e', long = "errorcheck")]
    pub error_check: bool,

    /// Re-emit each traveler's list annotated with per-segment clinch status.
    #[arg(short = 'p', long = "splitregion")]
    pub splitregion: bool,

    /// Restrict traveler processing to these names (repeatable). Empty means all.
    #[arg(short = 'U', long = "userlist")]
    pub userlist: Vec<String>,

    /// Near-miss point tolerance, in degrees of latitude/longitude.
    #[arg(long, default_value_t = 0.0005)]
    pub nmp_tolerance: f64,

    /// Emit log output as JSON lines instead of the default human-readable format.
    #[arg(long)]
    pub json_logs: bool,
}
