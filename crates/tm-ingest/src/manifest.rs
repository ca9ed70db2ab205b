use std::path::Path;

use tm_common::{DbFieldLength, ErrorList};
use tm_model::{
    Continent, ConnectedRoute, Country, HighwayData, HighwaySystem, Region, Route, RouteIdx, Tier,
};

fn check_len(el: &ErrorList, what: &str, value: &str, max: usize) {
    if value.len() > max {
        el.add_error(format!("{what} '{value}' exceeds max length {max}"));
    }
}

/// Load `continents.csv` (`code;name`) into the model, recording oversized
/// or malformed rows to `el` without aborting the rest of the file.
pub fn load_continents(path: &Path, data: &mut HighwayData, el: &ErrorList) {
    let mut reader = match csv::ReaderBuilder::new().delimiter(b';').from_path(path) {
        Ok(r) => r,
        Err(e) => {
            el.add_error(format!("could not open {}: {e}", path.display()));
            return;
        }
    };
    for result in reader.records() {
        let Ok(record) = result else {
            el.add_error(format!("malformed row in {}", path.display()));
            continue;
        };
        let (Some(code), Some(name)) = (record.get(0), record.get(1)) else {
            el.add_error(format!("malformed row in {}: {record:?}", path.display()));
            continue;
        };
        check_len(el, "continent code", code, DbFieldLength::CONTINENT_CODE);
        check_len(el, "continent name", name, DbFieldLength::CONTINENT_NAME);
        data.push_continent(Continent { code: code.to_string(), name: name.to_string() });
    }
}

/// Load `countries.csv` (`code;name`).
pub fn load_countries(path: &Path, data: &mut HighwayData, el: &ErrorList) {
    let mut reader = match csv::ReaderBuilder::new().delimiter(b';').from_path(path) {
        Ok(r) => r,
        Err(e) => {
            el.add_error(format!("could not open {}: {e}", path.display()));
            return;
        }
    };
    for result in reader.records() {
        let Ok(record) = result else {
            el.add_error(format!("malformed row in {}", path.display()));
            continue;
        };
        let (Some(code), Some(name)) = (record.get(0), record.get(1)) else {
            el.add_error(format!("malformed row in {}: {record:?}", path.display()));
            continue;
        };
        check_len(el, "country code", code, DbFieldLength::COUNTRY_CODE);
        check_len(el, "country name", name, DbFieldLength::COUNTRY_NAME);
        data.push_country(Country { code: code.to_string(), name: name.to_string() });
    }
}

/// Load `regions.csv` (`code;name;country;continent`), resolving the
/// country/continent codes against rows already loaded by
/// [`load_countries`] / [`load_continents`]. Unknown codes are fatal rows,
/// not fatal files: the region is skipped, ingest continues.
pub fn load_regions(path: &Path, data: &mut HighwayData, el: &ErrorList) {
    let mut reader = match csv::ReaderBuilder::new().delimiter(b';').from_path(path) {
        Ok(r) => r,
        Err(e) => {
            el.add_error(format!("could not open {}: {e}", path.display()));
            return;
        }
    };
    for result in reader.records() {
        let Ok(record) = result else {
            el.add_error(format!("malformed row in {}", path.display()));
            continue;
        };
        let (Some(code), Some(name), Some(country_code), Some(continent_code)) =
            (record.get(0), record.get(1), record.get(2), record.get(3))
        else {
            el.add_error(format!("malformed row in {}: {record:?}", path.display()));
            continue;
        };
        let Some(country) = data.countries.iter().position(|c| c.code == country_code) else {
            el.add_error(format!("unknown country code '{country_code}' in {}", path.display()));
            continue;
        };
        let Some(continent) = data.continents.iter().position(|c| c.code == continent_code) else {
            el.add_error(format!("unknown continent code '{continent_code}' in {}", path.display()));
            continue;
        };
        check_len(el, "region code", code, DbFieldLength::REGION_CODE);
        check_len(el, "region name", name, DbFieldLength::REGION_NAME);
        data.push_region(Region {
            code: code.to_string(),
            name: name.to_string(),
            country: country.into(),
            continent: continent.into(),
            is_multi_region: false,
        });
    }
}

/// Load the top-level systems file (`systems.csv`: `system;full_name;
/// country;continent;tier`), creating one empty `HighwaySystem` per row.
pub fn load_systems(path: &Path, data: &mut HighwayData, el: &ErrorList) {
    let mut reader = match csv::ReaderBuilder::new().delimiter(b';').from_path(path) {
        Ok(r) => r,
        Err(e) => {
            el.add_error(format!("could not open {}: {e}", path.display()));
            return;
        }
    };
    for result in reader.records() {
        let Ok(record) = result else {
            el.add_error(format!("malformed row in {}", path.display()));
            continue;
        };
        let (Some(name), Some(full_name), Some(country_code), Some(continent_code), Some(tier)) =
            (record.get(0), record.get(1), record.get(2), record.get(3), record.get(4))
        else {
            el.add_error(format!("malformed row in {}: {record:?}", path.display()));
            continue;
        };
        let Some(country) = data.countries.iter().position(|c| c.code == country_code) else {
            el.add_error(format!("unknown country code '{country_code}' in {}", path.display()));
            continue;
        };
        let Some(continent) = data.continents.iter().position(|c| c.code == continent_code) else {
            el.add_error(format!("unknown continent code '{continent_code}' in {}", path.display()));
            continue;
        };
        check_len(el, "system name", name, DbFieldLength::SYSTEM_NAME);
        check_len(el, "system full name", full_name, DbFieldLength::SYSTEM_FULL_NAME);
        data.push_system(HighwaySystem {
            name: name.to_string(),
            full_name: full_name.to_string(),
            country: country.into(),
            continent: continent.into(),
            tier: Tier::from_code(tier),
            routes: Vec::new(),
            connected_routes: Vec::new(),
        });
    }
}

/// Load one system's route list (`<system>.csv`: `root;region;banner;
/// abbrev;city`), appending each `Route` to `system_idx`'s route list.
pub fn load_system_routes(
    path: &Path,
    data: &mut HighwayData,
    system_idx: tm_model::SystemIdx,
    el: &ErrorList,
) {
    let mut reader = match csv::ReaderBuilder::new().delimiter(b';').from_path(path) {
        Ok(r) => r,
        Err(e) => {
            el.add_error(format!("could not open {}: {e}", path.display()));
            return;
        }
    };
    for result in reader.records() {
        let Ok(record) = result else {
            el.add_error(format!("malformed row in {}", path.display()));
            continue;
        };
        let Some(root) = record.get(0) else {
            el.add_error(format!("malformed row in {}: {record:?}", path.display()));
            continue;
        };
        let region_code = record.get(1).unwrap_or("");
        let banner = record.get(2).unwrap_or("");
        let abbrev = record.get(3).unwrap_or("");
        let city = record.get(4).unwrap_or("");
        let Some(region) = data.regions.iter().position(|r| r.code == region_code) else {
            el.add_error(format!("unknown region code '{region_code}' in {}", path.display()));
            continue;
        };
        check_len(el, "route root", root, DbFieldLength::ROOT);
        check_len(el, "route banner", banner, DbFieldLength::BANNER);
        check_len(el, "route abbrev", abbrev, DbFieldLength::ABBREV);
        check_len(el, "route city", city, DbFieldLength::CITY);
        let route = Route::new(
            system_idx,
            region.into(),
            root.to_string(),
            banner.to_string(),
            abbrev.to_string(),
            city.to_string(),
        );
        let idx = data.push_route(route);
        data.system_mut(system_idx).routes.push(idx);
    }
}

/// Load one system's connected-route groupings (`<system>_con.csv`:
/// `route,banner,groupname,roots` where `roots` is a `;`-separated list of
/// route roots in travel order).
pub fn load_connected_routes(
    path: &Path,
    data: &mut HighwayData,
    system_idx: tm_model::SystemIdx,
    el: &ErrorList,
) {
    let mut reader = match csv::ReaderBuilder::new().delimiter(b';').from_path(path) {
        Ok(r) => r,
        Err(e) => {
            el.add_error(format!("could not open {}: {e}", path.display()));
            return;
        }
    };
    for result in reader.records() {
        let Ok(record) = result else {
            el.add_error(format!("malformed row in {}", path.display()));
            continue;
        };
        let (Some(route_name), Some(banner), Some(groupname), Some(roots_field)) =
            (record.get(0), record.get(1), record.get(2), record.get(3))
        else {
            el.add_error(format!("malformed row in {}: {record:?}", path.display()));
            continue;
        };

        let roots: Vec<RouteIdx> = roots_field
            .split(';')
            .filter(|s| !s.is_empty())
            .filter_map(|root| {
                data.system(system_idx)
                    .routes
                    .iter()
                    .copied()
                    .find(|&r| data.route(r).root == root)
                    .or_else(|| {
                        el.add_error(format!(
                            "connected route '{route_name}' in {} references unknown root '{root}'",
                            path.display()
                        ));
                        None
                    })
            })
            .collect();

        data.system_mut(system_idx).connected_routes.push(ConnectedRoute {
            route_name: route_name.to_string(),
            banner: banner.to_string(),
            groupname: groupname.to_string(),
            roots,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_continents_and_flags_oversized_code() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("continents.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "code;name").unwrap();
        writeln!(f, "NA;North America").unwrap();
        writeln!(f, "TOOLONG;Bad").unwrap();
        drop(f);

        let mut data = HighwayData::new();
        let el = ErrorList::new();
        load_continents(&path, &mut data, &el);
        assert_eq!(data.continents.len(), 2);
        assert_eq!(el.len(), 1);
    }

    #[test]
    fn region_with_unknown_country_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let regions_path = dir.path().join("regions.csv");
        let mut f = std::fs::File::create(&regions_path).unwrap();
        writeln!(f, "code;name;country;continent").unwrap();
        writeln!(f, "ca;California;zz;NA").unwrap();
        drop(f);

        let mut data = HighwayData::new();
        data.push_continent(Continent { code: "NA".into(), name: "North America".into() });
        let el = ErrorList::new();
        load_regions(&regions_path, &mut data, &el);
        assert_eq!(data.regions.len(), 0);
        assert_eq!(el.len(), 1);
    }
}
