use std::path::{Path, PathBuf};

use rayon::ThreadPoolBuilder;
use tm_common::ErrorList;
use tm_datacheck::Datacheck;
use tm_model::HighwayData;

use crate::config::PipelineConfig;
use crate::inputs::PipelineInputs;
use crate::outcome::PipelineOutcome;
use crate::stages;

fn write_or_log(errors: &ErrorList, path: &Path, contents: &str) -> bool {
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            errors.add_error(format!("could not create directory {}: {e}", parent.display()));
            return false;
        }
    }
    match std::fs::write(path, contents) {
        Ok(()) => true,
        Err(e) => {
            errors.add_error(format!("could not write {}: {e}", path.display()));
            false
        }
    }
}

/// Run every pipeline stage over a manifest-loaded model, driving each
/// parallel stage through a thread pool sized from `config`'s
/// global/per-stage overrides, then write every output file. `errors` is
/// the same `ErrorList` manifest/wpt ingestion already wrote structural
/// problems into; the driver appends to it rather than starting a fresh
/// one, since fatality is judged over the
/// whole run.
pub fn run(mut data: HighwayData, inputs: PipelineInputs, config: &PipelineConfig, errors: &ErrorList) -> PipelineOutcome {
    let datacheck = Datacheck::new();

    // Stage 1.
    let read_wpt_threads = config.stage_threads.resolve(config.stage_threads.read_wpt, config.num_threads);
    let wpt_pool = ThreadPoolBuilder::new().num_threads(read_wpt_threads).build().expect("build thread pool");
    wpt_pool.install(|| stages::stage1_read_wpts(&mut data, &inputs.wpts, &datacheck));

    // Stage 2.
    let near_miss_threads = config.stage_threads.resolve(config.stage_threads.near_miss, config.num_threads);
    let near_miss_pool = ThreadPoolBuilder::new().num_threads(near_miss_threads).build().expect("build thread pool");
    let (quadtree, near_miss_lines) =
        near_miss_pool.install(|| stages::stage2_quadtree_and_near_miss(&mut data, config.nmp_tolerance));

    // Stage 3 is a no-op here: nothing in scope re-derives a merged `.wpt`
    // file body beyond what stage 1 already parsed, so there is no text to
    // emit that stage 1 didn't already produce.

    // Stage 4.
    tm_concurrency::detect_concurrencies(&mut data);

    // Stage 5.
    stages::stage5_route_integrity(&mut data, &datacheck);

    // Stage 6+7.
    let read_lists_threads = config.stage_threads.resolve(config.stage_threads.read_lists, config.num_threads);
    let lists_pool = ThreadPoolBuilder::new().num_threads(read_lists_threads).build().expect("build thread pool");
    let mut travelers = lists_pool.install(|| stages::stage6_7_read_and_sort_travelers(&data, &inputs.travelers));

    if config.splitregion {
        let routes = tm_travelers::RouteIndex::build(&data);
        let rendered = lists_pool.install(|| stages::stage_splitregion(&data, &routes, &travelers));
        for (name, contents) in rendered {
            let path = config.output_dir.join("splitregion").join("list_files").join(format!("{name}.list"));
            let _ = write_or_log(errors, &path, &contents);
        }
    }

    // Stage 8.
    tm_travelers::reset_clinch_state(&mut data);
    let clinch_threads = config.stage_threads.resolve(config.stage_threads.clinch, config.num_threads);
    let clinch_pool = ThreadPoolBuilder::new().num_threads(clinch_threads).build().expect("build thread pool");
    let clinch_log = clinch_pool.install(|| tm_travelers::run_clinch_augmenter(&data, &mut travelers));

    // Stage 9.
    let stats_threads = config.stage_threads.resolve(config.stage_threads.datacheck_stats, config.num_threads);
    let stats_pool = ThreadPoolBuilder::new().num_threads(stats_threads).build().expect("build thread pool");
    stats_pool.install(|| stages::stage9_route_datacheck(&data, &datacheck));
    let route_stats = tm_stats::compute_route_stats(&data);
    tm_stats::finalize_traveler_mileage(&data, &mut travelers);

    // Stage 10.
    let order = quadtree.point_list();
    let graph = stages::stage10_build_graph(&data, &order, &datacheck);

    // Stages 11 and 13 run concurrently: graph emission never touches the
    // SQL dump's inputs (route/segment/traveler tables), and vice versa.
    let mut graph_files_written = Vec::new();
    let mut sql_path = None;
    if !config.error_check_only {
        let graphs_threads = config.stage_threads.resolve(config.stage_threads.graphs, config.num_threads);
        let graphs_pool = ThreadPoolBuilder::new().num_threads(graphs_threads).build().expect("build thread pool");
        let (graph_outputs, sql_dump) = rayon::join(
            || {
                if config.skip_graphs {
                    Vec::new()
                } else {
                    graphs_pool.install(|| stages::stage11_emit_graphs(&graph, &data, &inputs))
                }
            },
            || tm_sql::render_sql_dump(&data, &travelers),
        );

        for (filename, contents) in graph_outputs {
            let path = config.output_dir.join(&filename);
            if write_or_log(errors, &path, &contents) {
                graph_files_written.push(path);
            }
        }

        let path: PathBuf = config.output_dir.join(format!("{}.sql", config.database_name));
        if write_or_log(errors, &path, &sql_dump) {
            sql_path = Some(path);
        }
    }

    // Stage 12.
    let (fp_matched, fp_total, _nmp_matched, nmp_unmatched) = match stages::stage12_reconcile_and_log(
        &datacheck,
        inputs.datacheck_fps,
        &near_miss_lines,
        inputs.nmpfps_text.as_deref(),
        &config.logfile_dir,
    ) {
        Ok(result) => result,
        Err(e) => {
            errors.add_error(format!("could not write datacheck logs: {e}"));
            (0, datacheck.len(), 0, near_miss_lines.len())
        }
    };

    if !config.error_check_only {
        let stats_dir = &config.output_dir;
        if let Err(e) = tm_stats::write_active_only_csv(&stats_dir.join("allbyregionactiveonly.csv"), &data, &travelers) {
            errors.add_error(format!("could not write allbyregionactiveonly.csv: {e}"));
        }
        if let Err(e) =
            tm_stats::write_active_preview_csv(&stats_dir.join("allbyregionactivepreview.csv"), &data, &travelers)
        {
            errors.add_error(format!("could not write allbyregionactivepreview.csv: {e}"));
        }
        if let Err(e) = tm_stats::write_system_csv(&stats_dir.join("systemstats.csv"), &data, &route_stats) {
            errors.add_error(format!("could not write systemstats.csv: {e}"));
        }
    }

    let mut traveler_logs_written = 0;
    for traveler in &travelers {
        let path = config.logfile_dir.join("users").join(format!("{}.log", traveler.name));
        let mut contents = traveler.log_lines.join("\n");
        if !contents.is_empty() {
            contents.push('\n');
        }
        if write_or_log(errors, &path, &contents) {
            traveler_logs_written += 1;
        }
    }

    let concurrency_log = render_concurrency_log(&data, &clinch_log);
    let _ = write_or_log(errors, &config.logfile_dir.join("concurrencies.log"), &concurrency_log);

    let stats_log = render_stats_log(&data, &route_stats);
    let _ = write_or_log(errors, &config.logfile_dir.join("highwaydatastats.log"), &stats_log);

    let traveler_names: Vec<String> = travelers.iter().map(|t| t.name.clone()).collect();
    let extra = stages::build_extra_logs(&data, &quadtree, &datacheck, &traveler_names);
    let _ = write_or_log(errors, &config.logfile_dir.join("tm-master.nmp"), &extra.master_nmp);
    let _ = write_or_log(errors, &config.logfile_dir.join("unprocessedwpts.log"), &extra.unprocessed_wpts);
    let _ = write_or_log(errors, &config.logfile_dir.join("pointsinuse.log"), &extra.points_in_use);
    let _ = write_or_log(errors, &config.logfile_dir.join("listnamesinuse.log"), &extra.list_names_in_use);
    let _ = write_or_log(
        errors,
        &config.logfile_dir.join("unusedaltroutenames.log"),
        &extra.unused_alt_route_names,
    );
    let _ = write_or_log(errors, &config.logfile_dir.join("unusedaltlabels.log"), &extra.unused_alt_labels);
    let _ = write_or_log(errors, &config.logfile_dir.join("flippedroutes.log"), &extra.flipped_routes);

    PipelineOutcome {
        errors: errors.snapshot(),
        fatal: !errors.is_empty(),
        datacheck_total: fp_total,
        datacheck_fp_matched: fp_matched,
        near_miss_total: near_miss_lines.len(),
        near_miss_unmatched: nmp_unmatched,
        concurrency_ring_count: data.concurrency_rings.len(),
        route_stats: Some(route_stats),
        graph_files_written,
        sql_path,
        traveler_logs_written,
    }
}

fn render_concurrency_log(data: &HighwayData, clinch_log: &[String]) -> String {
    let mut out = String::new();
    for (i, ring) in data.concurrency_rings.iter().enumerate() {
        let names: Vec<String> = ring.iter().map(|&seg| data.route(seg.route).list_name()).collect();
        out.push_str(&format!("ring {i}: {}\n", names.join(" = ")));
    }
    for line in clinch_log {
        out.push_str(line);
        out.push('\n');
    }
    out
}

fn render_stats_log(data: &HighwayData, stats: &tm_stats::HighwayStats) -> String {
    let mut out = String::new();
    let mut regions: Vec<_> = stats.region_overall.keys().copied().collect();
    regions.sort_by_key(|r| data.region(*r).code.clone());
    for region in regions {
        out.push_str(&format!(
            "{}: active={:.2} active+preview={:.2} overall={:.2}\n",
            data.region(region).code,
            stats.region_active_only.get(&region).copied().unwrap_or(0.0),
            stats.region_active_preview.get(&region).copied().unwrap_or(0.0),
            stats.region_overall.get(&region).copied().unwrap_or(0.0),
        ));
    }
    out
}
