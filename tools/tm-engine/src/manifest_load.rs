use std::path::Path;

use tm_common::ErrorList;
use tm_model::HighwayData;

/// Load `continents.csv`, `countries.csv`, `regions.csv`, the systems file,
/// then each system's `<system>.csv` route list and `<system>_con.csv`
/// connected-route groupings, in the dependency order each loader needs
/// (regions need countries/continents, routes need regions, connected
/// routes need routes).
pub fn load_manifest(data_dir: &Path, systems_file: &str, el: &ErrorList) -> HighwayData {
    let mut data = HighwayData::new();

    tm_ingest::load_continents(&data_dir.join("continents.csv"), &mut data, el);
    tm_ingest::load_countries(&data_dir.join("countries.csv"), &mut data, el);
    tm_ingest::load_regions(&data_dir.join("regions.csv"), &mut data, el);
    tm_ingest::load_systems(&data_dir.join(systems_file), &mut data, el);

    for i in 0..data.systems.len() {
        let system_idx = tm_model::SystemIdx::from(i);
        let name = data.system(system_idx).name.clone();
        tm_ingest::load_system_routes(&data_dir.join(format!("{name}.csv")), &mut data, system_idx, el);
        let con_path = data_dir.join(format!("{name}_con.csv"));
        if con_path.exists() {
            tm_ingest::load_connected_routes(&con_path, &mut data, system_idx, el);
        }
    }

    data
}
