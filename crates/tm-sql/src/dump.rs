use std::fmt::Write as _;

use tm_model::HighwayData;
use tm_travelers::TravelerList;

use crate::escape::sql_quote;

const CREATE_STATEMENTS: &[&str] = &[
    "DROP TABLE IF EXISTS continents",
    "CREATE TABLE continents (code VARCHAR(3) PRIMARY KEY, name VARCHAR(15))",
    "DROP TABLE IF EXISTS countries",
    "CREATE TABLE countries (code VARCHAR(3) PRIMARY KEY, name VARCHAR(32))",
    "DROP TABLE IF EXISTS regions",
    "CREATE TABLE regions (code VARCHAR(8) PRIMARY KEY, name VARCHAR(48), country VARCHAR(3), continent VARCHAR(3))",
    "DROP TABLE IF EXISTS systems",
    "CREATE TABLE systems (name VARCHAR(10) PRIMARY KEY, full_name VARCHAR(60), country VARCHAR(3), \
     continent VARCHAR(3), tier VARCHAR(8))",
    "DROP TABLE IF EXISTS routes",
    "CREATE TABLE routes (id INT PRIMARY KEY, system VARCHAR(10), region VARCHAR(8), root VARCHAR(35), \
     banner VARCHAR(6), abbrev VARCHAR(3), city VARCHAR(40), list_name VARCHAR(50), miles DOUBLE)",
    "DROP TABLE IF EXISTS segments",
    "CREATE TABLE segments (id INT PRIMARY KEY, route INT, waypoint1 INT, waypoint2 INT, length DOUBLE)",
    "DROP TABLE IF EXISTS travelers",
    "CREATE TABLE travelers (id INT PRIMARY KEY, name VARCHAR(48))",
    "DROP TABLE IF EXISTS clinched",
    "CREATE TABLE clinched (traveler INT, segment INT)",
];

/// Render the whole `<databasename>.sql` dump: schema, then data, in
/// dependency order (continents/countries before regions, regions/systems
/// before routes, routes before segments).
pub fn render_sql_dump(data: &HighwayData, travelers: &[TravelerList]) -> String {
    let mut out = String::new();
    for stmt in CREATE_STATEMENTS {
        writeln!(out, "{stmt};").unwrap();
    }

    for c in &data.continents {
        writeln!(out, "INSERT INTO continents VALUES ({}, {});", sql_quote(&c.code), sql_quote(&c.name)).unwrap();
    }
    for c in &data.countries {
        writeln!(out, "INSERT INTO countries VALUES ({}, {});", sql_quote(&c.code), sql_quote(&c.name)).unwrap();
    }
    for r in &data.regions {
        let country = &data.countries[r.country.index()].code;
        let continent = &data.continents[r.continent.index()].code;
        writeln!(
            out,
            "INSERT INTO regions VALUES ({}, {}, {}, {});",
            sql_quote(&r.code),
            sql_quote(&r.name),
            sql_quote(country),
            sql_quote(continent)
        )
        .unwrap();
    }
    for s in &data.systems {
        let country = &data.countries[s.country.index()].code;
        let continent = &data.continents[s.continent.index()].code;
        let tier = match s.tier {
            tm_model::Tier::Active => "active",
            tm_model::Tier::Preview => "preview",
            tm_model::Tier::Devel => "devel",
        };
        writeln!(
            out,
            "INSERT INTO systems VALUES ({}, {}, {}, {}, {});",
            sql_quote(&s.name),
            sql_quote(&s.full_name),
            sql_quote(country),
            sql_quote(continent),
            sql_quote(tier)
        )
        .unwrap();
    }

    let mut segment_id = 0usize;
    for (route_id, route) in data.routes.iter().enumerate() {
        let system = &data.system(route.system).name;
        let region = &data.region(route.region).code;
        writeln!(
            out,
            "INSERT INTO routes VALUES ({route_id}, {}, {}, {}, {}, {}, {}, {}, {});",
            sql_quote(system),
            sql_quote(region),
            sql_quote(&route.root),
            sql_quote(&route.banner),
            sql_quote(&route.abbrev),
            sql_quote(&route.city),
            sql_quote(&route.list_name()),
            route.total_miles()
        )
        .unwrap();

        for (i, seg) in route.segments.iter().enumerate() {
            writeln!(
                out,
                "INSERT INTO segments VALUES ({segment_id}, {route_id}, {}, {}, {});",
                seg.wp1, seg.wp2, seg.length_miles
            )
            .unwrap();
            segment_id += 1;
        }
    }

    for (traveler_id, traveler) in travelers.iter().enumerate() {
        writeln!(out, "INSERT INTO travelers VALUES ({traveler_id}, {});", sql_quote(&traveler.name)).unwrap();
    }

    // Recompute global segment ids from (route, local index) to join
    // `clinched_by` membership against the `segments` table above.
    let mut base_segment_id = 0usize;
    for route in &data.routes {
        let clinched_by = route.clinched_by.lock();
        for (local_index, clinchers) in clinched_by.iter().enumerate() {
            let global_id = base_segment_id + local_index;
            let mut traveler_ids: Vec<u32> = clinchers.iter().copied().collect();
            traveler_ids.sort_unstable();
            for traveler_id in traveler_ids {
                writeln!(out, "INSERT INTO clinched VALUES ({traveler_id}, {global_id});").unwrap();
            }
        }
        base_segment_id += route.segments.len();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tm_model::{ContinentIdx, CountryIdx, HighwaySegment, HighwaySystem, Region, Route, RouteIdx, Tier, Waypoint};

    #[test]
    fn renders_schema_and_one_route() {
        let mut data = HighwayData::new();
        data.push_continent(tm_model::Continent { code: "NA".into(), name: "North America".into() });
        data.push_country(tm_model::Country { code: "USA".into(), name: "United States".into() });
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
        let mut route = Route::new(sys, region, "I-90".into(), String::new(), String::new(), String::new());
        route.waypoints.push(Waypoint {
            label: "A".into(),
            lat: 0.0,
            lng: 0.0,
            route: RouteIdx(0),
            index_in_route: 0,
            colocated: None,
            hidden: false,
            no_photos: false,
        });
        route.waypoints.push(Waypoint {
            label: "B".into(),
            lat: 1.0,
            lng: 0.0,
            route: RouteIdx(0),
            index_in_route: 1,
            colocated: None,
            hidden: false,
            no_photos: false,
        });
        route.segments.push(HighwaySegment::new(0, 1, 10.0));
        route.init_clinch_state();
        let idx = data.push_route(route);
        data.system_mut(sys).routes.push(idx);

        let sql = render_sql_dump(&data, &[]);
        assert!(sql.contains("CREATE TABLE regions"));
        assert!(sql.contains("INSERT INTO routes VALUES (0"));
        assert!(sql.contains("INSERT INTO segments VALUES (0, 0, 0, 1, 10"));
    }
}
