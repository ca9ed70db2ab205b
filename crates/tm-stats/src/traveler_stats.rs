use tm_model::HighwayData;
use tm_travelers::TravelerList;

/// Sum each traveler's actual clinched mileage into the region/system keys
/// the clinch-augmentation stage already seeded at `0.0`. Runs serially
/// after clinching settles: every `clinched_by` set is final by then, so
/// there is nothing left to race on.
pub fn finalize_traveler_mileage(data: &HighwayData, travelers: &mut [TravelerList]) {
    for region_map in travelers.iter_mut().flat_map(|t| {
        t.active_only_mileage_by_region.values_mut().chain(t.active_preview_mileage_by_region.values_mut())
    }) {
        *region_map = 0.0;
    }
    for traveler in travelers.iter_mut() {
        for region_map in traveler.system_region_mileages.values_mut() {
            for miles in region_map.values_mut() {
                *miles = 0.0;
            }
        }
    }

    for route in &data.routes {
        let tier = data.system(route.system).tier;
        let clinched_by = route.clinched_by.lock();
        for (seg_index, clinchers) in clinched_by.iter().enumerate() {
            let miles = route.segments[seg_index].length_miles;
            for &traveler_idx in clinchers {
                let Some(traveler) = travelers.get_mut(traveler_idx as usize) else { continue };
                if tier.counts_toward_active() {
                    if let Some(m) = traveler.active_only_mileage_by_region.get_mut(&route.region) {
                        *m += miles;
                    }
                }
                if tier.counts_toward_preview() {
                    if let Some(m) = traveler.active_preview_mileage_by_region.get_mut(&route.region) {
                        *m += miles;
                    }
                }
                if let Some(region_map) = traveler.system_region_mileages.get_mut(&route.system) {
                    if let Some(m) = region_map.get_mut(&route.region) {
                        *m += miles;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;
    use tm_model::{
        ContinentIdx, CountryIdx, HighwaySegment, HighwaySystem, Region, Route, RouteIdx, Tier, Waypoint,
    };

    #[test]
    fn sums_only_segments_this_traveler_clinched() {
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
        for (i, label) in ["A", "B", "C"].iter().enumerate() {
            route.waypoints.push(Waypoint {
                label: label.to_string(),
                lat: i as f64,
                lng: 0.0,
                route: RouteIdx(0),
                index_in_route: i as u32,
                colocated: None,
                hidden: false,
                no_photos: false,
            });
        }
        route.segments.push(HighwaySegment::new(0, 1, 4.0));
        route.segments.push(HighwaySegment::new(1, 2, 6.0));
        route.init_clinch_state();
        {
            let mut clinched = route.clinched_by.lock();
            clinched[0] = FxHashSet::from_iter([0u32]);
        }
        let idx = data.push_route(route);
        data.system_mut(sys).routes.push(idx);

        let mut traveler = TravelerList {
            name: "alice".into(),
            clinched_segments: Vec::new(),
            raw_lines: Vec::new(),
            active_only_mileage_by_region: [(region, 0.0)].into_iter().collect(),
            active_preview_mileage_by_region: [(region, 0.0)].into_iter().collect(),
            system_region_mileages: Default::default(),
            updated_routes: Default::default(),
            log_lines: Vec::new(),
        };
        finalize_traveler_mileage(&data, std::slice::from_mut(&mut traveler));
        assert_eq!(traveler.active_only_mileage_by_region[&region], 4.0);
        assert_eq!(traveler.active_preview_mileage_by_region[&region], 4.0);
    }
}
