use std::fs;

use tm_common::ErrorList;
use tm_engine::{crawl, manifest_load};
use tm_pipeline::PipelineConfig;

/// Builds a minimal but complete on-disk data directory (one region, one
/// system, two routes) and runs the full manifest-load -> crawl -> pipeline
/// chain over it, the same sequence `main.rs` drives.
#[test]
fn loads_and_runs_against_a_synthetic_data_directory() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("continents.csv"), "code;name\nNA;North America\n").unwrap();
    fs::write(root.join("countries.csv"), "code;name\nUSA;United States\n").unwrap();
    fs::write(root.join("regions.csv"), "code;name;country;continent\nca;California;USA;NA\n").unwrap();
    fs::write(root.join("systems.csv"), "system;full_name;country;continent;tier\nusai;US Interstates;USA;NA;active\n")
        .unwrap();
    fs::write(
        root.join("usai.csv"),
        "root;region;banner;abbrev;city\nI-5;ca;;;\nI-10;ca;;;\n",
    )
    .unwrap();

    let wpt_dir = root.join("hwy_data").join("ca").join("usai");
    fs::create_dir_all(&wpt_dir).unwrap();
    fs::write(wpt_dir.join("I-5.wpt"), "A http://www.example.com/@1,2\nB http://www.example.com/@3,4\n").unwrap();
    fs::write(wpt_dir.join("I-10.wpt"), "C http://www.example.com/@5,6\nD http://www.example.com/@7,8\n").unwrap();

    fs::create_dir_all(root.join("UserData").join("list_files")).unwrap();

    let errors = ErrorList::new();
    let data = manifest_load::load_manifest(root, "systems.csv", &errors);
    assert_eq!(data.regions.len(), 1);
    assert_eq!(data.routes.len(), 2);

    let inputs = crawl::build_inputs(root, &data, &[], &errors);
    assert_eq!(inputs.wpts.len(), 2);

    let out_dir = dir.path().join("out");
    let log_dir = dir.path().join("logs");
    let config = PipelineConfig { output_dir: out_dir.clone(), logfile_dir: log_dir.clone(), ..PipelineConfig::default() };

    let outcome = tm_pipeline::run(data, inputs, &config, &errors);
    assert!(!outcome.fatal, "unexpected errors: {:?}", outcome.errors);
    assert!(outcome.sql_path.is_some());
    assert!(log_dir.join("datacheck.log").exists());
    assert!(log_dir.join("tm-master.nmp").exists());
}

#[test]
fn missing_traveler_list_file_is_not_fatal_by_itself() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    // No UserData/list_files directory at all.
    let errors = ErrorList::new();
    let travelers = crawl::read_travelers(root, &[], &errors);
    assert!(travelers.is_empty());
    assert_eq!(errors.len(), 1);
}
