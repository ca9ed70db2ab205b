use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tm_model::{HighwayData, RegionIdx, SystemIdx, Tier};

/// Region- and system-level mileage totals, independent of any traveler.
/// Computed once per run from the route/segment data alone.
#[derive(Debug, Default)]
pub struct HighwayStats {
    pub region_active_only: FxHashMap<RegionIdx, f64>,
    pub region_active_preview: FxHashMap<RegionIdx, f64>,
    pub region_overall: FxHashMap<RegionIdx, f64>,
    pub system_total: FxHashMap<SystemIdx, f64>,
    pub system_by_region: FxHashMap<SystemIdx, FxHashMap<RegionIdx, f64>>,
}

/// Sum every segment's length into the region/system totals its route's
/// system tier qualifies for: active routes count toward all three region
/// totals, preview routes toward active_preview and overall, devel routes
/// toward overall only.
pub fn compute_route_stats(data: &HighwayData) -> HighwayStats {
    let per_route: Vec<(RegionIdx, SystemIdx, Tier, f64)> = data
        .routes
        .par_iter()
        .map(|route| {
            let tier = data.system(route.system).tier;
            (route.region, route.system, tier, route.total_miles())
        })
        .collect();

    let mut stats = HighwayStats::default();
    for (region, system, tier, miles) in per_route {
        *stats.region_overall.entry(region).or_insert(0.0) += miles;
        if tier.counts_toward_preview() {
            *stats.region_active_preview.entry(region).or_insert(0.0) += miles;
        }
        if tier.counts_toward_active() {
            *stats.region_active_only.entry(region).or_insert(0.0) += miles;
        }
        *stats.system_total.entry(system).or_insert(0.0) += miles;
        *stats.system_by_region.entry(system).or_default().entry(region).or_insert(0.0) += miles;
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use tm_model::{ContinentIdx, CountryIdx, HighwaySegment, HighwaySystem, Region, Route, RouteIdx, Waypoint};

    #[test]
    fn active_route_counts_toward_all_three_totals() {
        let mut data = HighwayData::new();
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
        route.segments.push(HighwaySegment::new(0, 1, 12.5));
        let idx = data.push_route(route);
        data.system_mut(sys).routes.push(idx);

        let stats = compute_route_stats(&data);
        assert_eq!(stats.region_active_only[&region], 12.5);
        assert_eq!(stats.region_active_preview[&region], 12.5);
        assert_eq!(stats.region_overall[&region], 12.5);
        assert_eq!(stats.system_total[&sys], 12.5);
    }
}
