//! Orders the ingest-through-output stages behind one driver function,
//! scheduling each parallel stage against a worker pool sized from the
//! caller's configuration.

mod config;
mod inputs;
mod outcome;
mod run;
mod stages;

pub use config::{PipelineConfig, StageThreads};
pub use inputs::{PipelineInputs, RouteWpt, TravelerSource};
pub use outcome::PipelineOutcome;
pub use run::run;
pub use stages::{
    build_extra_logs, stage10_build_graph, stage11_emit_graphs, stage12_reconcile_and_log, stage1_read_wpts,
    stage2_quadtree_and_near_miss, stage5_route_integrity, stage6_7_read_and_sort_travelers, stage9_route_datacheck,
    ExtraLogs,
};

#[cfg(test)]
mod tests {
    use tm_common::ErrorList;
    use tm_model::{ContinentIdx, CountryIdx, HighwaySystem, Region, Route, RouteIdx, Tier};

    use super::*;

    fn two_route_model() -> tm_model::HighwayData {
        let mut data = tm_model::HighwayData::new();
        let region = data.push_region(Region {
            code: "ca".into(),
            name: "California".into(),
            country: CountryIdx(0),
            continent: ContinentIdx(0),
            is_multi_region: false,
        });
        let sys = data.push_system(HighwaySystem {
            name: "usai".into(),
            full_name: "US Interstates".into(),
            country: CountryIdx(0),
            continent: ContinentIdx(0),
            tier: Tier::Active,
            routes: Vec::new(),
            connected_routes: Vec::new(),
        });
        let r1 = data.push_route(Route::new(sys, region, "I-5".into(), String::new(), String::new(), String::new()));
        let r2 = data.push_route(Route::new(sys, region, "I-10".into(), String::new(), String::new(), String::new()));
        data.system_mut(sys).routes.push(r1);
        data.system_mut(sys).routes.push(r2);
        data
    }

    #[test]
    fn full_run_on_two_routes_is_not_fatal_and_writes_outputs() {
        let mut data = two_route_model();
        let r1 = RouteIdx(0);
        let r2 = RouteIdx(1);

        let wpts = vec![
            RouteWpt {
                route: r1,
                text: "A http://www.example.com/@1,2\nB http://www.example.com/@3,4\n".to_string(),
            },
            RouteWpt {
                route: r2,
                text: "C http://www.example.com/@5,6\nD http://www.example.com/@7,8\n".to_string(),
            },
        ];

        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig {
            output_dir: dir.path().to_path_buf(),
            logfile_dir: dir.path().to_path_buf(),
            ..PipelineConfig::default()
        };
        let inputs = PipelineInputs {
            wpts,
            travelers: Vec::new(),
            graph_list: Vec::new(),
            datacheck_fps: Vec::new(),
            nmpfps_text: None,
        };
        let errors = ErrorList::new();

        let outcome = run(data, inputs, &config, &errors);
        assert!(!outcome.fatal, "unexpected errors: {:?}", outcome.errors);
        assert!(outcome.sql_path.is_some());
        assert!(!outcome.graph_files_written.is_empty());
        assert!(dir.path().join("datacheck.log").exists());
        assert!(dir.path().join("nearmisspoints.log").exists());
    }
}
