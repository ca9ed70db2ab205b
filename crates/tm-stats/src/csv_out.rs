use std::io;
use std::path::Path;

use tm_model::HighwayData;
use tm_travelers::TravelerList;

use crate::route_stats::HighwayStats;

/// One row per region per traveler: region code, traveler name, miles
/// clinched. Mirrors the master site's `allbyregionactiveonly.csv` /
/// `allbyregionactivepreview.csv` exports.
fn write_region_csv<F>(path: &Path, data: &HighwayData, travelers: &[TravelerList], pick: F) -> io::Result<()>
where
    F: Fn(&TravelerList) -> &rustc_hash::FxHashMap<tm_model::RegionIdx, f64>,
{
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["region", "traveler", "miles"])?;
    for traveler in travelers {
        let mut regions: Vec<_> = pick(traveler).iter().collect();
        regions.sort_by(|a, b| data.region(*a.0).code.cmp(&data.region(*b.0).code));
        for (region, miles) in regions {
            writer.write_record(&[data.region(*region).code.clone(), traveler.name.clone(), format!("{miles:.2}")])?;
        }
    }
    writer.flush()
}

pub fn write_active_only_csv(path: &Path, data: &HighwayData, travelers: &[TravelerList]) -> io::Result<()> {
    write_region_csv(path, data, travelers, |t| &t.active_only_mileage_by_region)
}

pub fn write_active_preview_csv(path: &Path, data: &HighwayData, travelers: &[TravelerList]) -> io::Result<()> {
    write_region_csv(path, data, travelers, |t| &t.active_preview_mileage_by_region)
}

/// One CSV per system: system name, region code, total clinchable mileage
/// in that region.
pub fn write_system_csv(path: &Path, data: &HighwayData, stats: &HighwayStats) -> io::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["system", "region", "miles"])?;
    let mut systems: Vec<_> = stats.system_by_region.iter().collect();
    systems.sort_by(|a, b| data.system(*a.0).name.cmp(&data.system(*b.0).name));
    for (system, by_region) in systems {
        let mut regions: Vec<_> = by_region.iter().collect();
        regions.sort_by(|a, b| data.region(*a.0).code.cmp(&data.region(*b.0).code));
        for (region, miles) in regions {
            writer.write_record([&data.system(*system).name, &data.region(*region).code, &format!("{miles:.2}")])?;
        }
    }
    writer.flush()
}
