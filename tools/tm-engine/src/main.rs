use anyhow::Result;
use clap::Parser;
use tm_common::ErrorList;
use tm_engine::{cli, crawl, manifest_load};
use tm_pipeline::{PipelineConfig, StageThreads};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    tm_common::init_tracing(cli.json_logs);

    let errors = ErrorList::new();
    let data = manifest_load::load_manifest(&cli.data_dir, &cli.systems_file, &errors);
    let inputs = crawl::build_inputs(&cli.data_dir, &data, &cli.userlist, &errors);

    let config = PipelineConfig {
        num_threads: cli.num_threads,
        stage_threads: StageThreads {
            read_wpt: cli.read_wpt_threads,
            near_miss: cli.near_miss_threads,
            read_lists: cli.read_list_threads,
            clinch: cli.clinch_threads,
            datacheck_stats: cli.datacheck_threads,
            graphs: cli.graph_threads,
        },
        skip_graphs: cli.skip_graphs,
        error_check_only: cli.error_check,
        splitregion: cli.splitregion,
        nmp_tolerance: cli.nmp_tolerance,
        database_name: cli.database_name,
        output_dir: cli.output_dir,
        logfile_dir: cli.logfile_dir,
    };

    std::fs::create_dir_all(&config.output_dir)?;
    std::fs::create_dir_all(&config.logfile_dir)?;

    let outcome = tm_pipeline::run(data, inputs, &config, &errors);

    tracing::info!(
        datacheck_total = outcome.datacheck_total,
        datacheck_fp_matched = outcome.datacheck_fp_matched,
        near_miss_total = outcome.near_miss_total,
        near_miss_unmatched = outcome.near_miss_unmatched,
        concurrency_rings = outcome.concurrency_ring_count,
        traveler_logs_written = outcome.traveler_logs_written,
        graph_files_written = outcome.graph_files_written.len(),
        "run finished"
    );

    if outcome.fatal {
        for error in &outcome.errors {
            tracing::error!("{error}");
        }
        std::process::exit(1);
    }

    Ok(())
}
