use rustc_hash::{FxHashMap, FxHashSet};
use tm_model::{HighwayData, RegionIdx, SegmentRef, SystemIdx};

use crate::list_parser::{parse_list, ListLine};
use crate::route_index::RouteIndex;

/// One user's travel history: every segment they've clinched, plus the
/// mileage tables `tm-stats` fills in once all clinching (including
/// concurrency-ring augmentation) has settled.
pub struct TravelerList {
    pub name: String,
    /// Segments this user's `.list` file names directly (before
    /// concurrency-ring augmentation pulls in the rest of each ring).
    pub clinched_segments: Vec<SegmentRef>,
    /// Raw lines, in file order, for `-p/--splitregion` re-emission.
    pub raw_lines: Vec<ListLine>,
    /// Region keys get created here (value `0.0`, filled in by `tm-stats`)
    /// as soon as any segment in that region is clinched, mirroring the
    /// original's "create the key now, compute the value later" split so
    /// that parallel clinching only ever needs a per-route lock.
    pub active_only_mileage_by_region: FxHashMap<RegionIdx, f64>,
    pub active_preview_mileage_by_region: FxHashMap<RegionIdx, f64>,
    pub system_region_mileages: FxHashMap<SystemIdx, FxHashMap<RegionIdx, f64>>,
    pub updated_routes: FxHashSet<String>,
    pub log_lines: Vec<String>,
}

impl TravelerList {
    /// Build a traveler from the text of a `.list` file. Unresolvable route
    /// references and out-of-range labels are recorded as log lines rather
    /// than failing the whole user, matching the original's per-user
    /// error tolerance: one bad line shouldn't cost an otherwise-valid list.
    pub fn build(name: &str, list_text: &str, data: &HighwayData, routes: &RouteIndex) -> Self {
        let parsed = parse_list(list_text);
        let mut traveler = TravelerList {
            name: name.to_string(),
            clinched_segments: Vec::new(),
            raw_lines: Vec::new(),
            active_only_mileage_by_region: FxHashMap::default(),
            active_preview_mileage_by_region: FxHashMap::default(),
            system_region_mileages: FxHashMap::default(),
            updated_routes: FxHashSet::default(),
            log_lines: Vec::new(),
        };

        for line in parsed.lines {
            match &line {
                ListLine::PassThrough(raw) => {
                    if !raw.trim().is_empty() && !raw.trim().starts_with('#') {
                        traveler.log_lines.push(format!("Unrecognized line in {name}.list: {raw}"));
                    }
                }
                ListLine::Chopped { region, route, label1, label2, raw } => {
                    match routes.resolve_unique(region, route) {
                        Some(idx) => traveler.mark_range(data, idx, label1, label2, raw),
                        None => traveler
                            .log_lines
                            .push(format!("Could not resolve route {region} {route} in {name}.list: {raw}")),
                    }
                }
                ListLine::Connected { region, route, banner, city, label1, label2, raw } => {
                    match routes.resolve_with_banner(data, region, route, banner, city) {
                        Some(idx) => traveler.mark_range(data, idx, label1, label2, raw),
                        None => traveler.log_lines.push(format!(
                            "Could not resolve route {region} {route} {banner} {city} in {name}.list: {raw}"
                        )),
                    }
                }
            }
            traveler.raw_lines.push(line);
        }

        traveler
    }

    /// Resolve `label1`/`label2` against the route's waypoint labels and
    /// mark every segment between them (inclusive, either direction) as
    /// clinched by this traveler, seeding the region/system mileage keys
    /// and appending to the route's own clinched-by sets.
    fn mark_range(&mut self, data: &HighwayData, route_idx: tm_model::RouteIdx, label1: &str, label2: &str, raw: &str) {
        let route = data.route(route_idx);
        let (Some(&i1), Some(&i2)) = (route.label_index.get(label1), route.label_index.get(label2)) else {
            self.log_lines.push(format!(
                "Labels {label1}/{label2} not found on {} in {}.list: {raw}",
                route.list_name(),
                self.name
            ));
            return;
        };
        let (lo, hi) = if i1 <= i2 { (i1, i2) } else { (i2, i1) };
        if lo == hi {
            self.log_lines.push(format!(
                "Zero-length clinch ({label1}={label2}) on {} in {}.list: {raw}",
                route.list_name(),
                self.name
            ));
            return;
        }

        if let Some(update) = &route.last_update {
            if self.updated_routes.insert(route.list_name()) {
                self.log_lines.push(format!(
                    "{} was updated {} {} by {}",
                    route.list_name(),
                    update.date,
                    update.time,
                    update.user
                ));
            }
        }

        for seg_index in lo..hi {
            let seg = SegmentRef::new(route_idx, seg_index);
            self.clinched_segments.push(seg);
            self.seed_region_keys(route.region, route.system);
        }
    }

    pub(crate) fn seed_region_keys(&mut self, region: RegionIdx, system: SystemIdx) {
        self.active_only_mileage_by_region.entry(region).or_insert(0.0);
        self.active_preview_mileage_by_region.entry(region).or_insert(0.0);
        self.system_region_mileages
            .entry(system)
            .or_default()
            .entry(region)
            .or_insert(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tm_model::{ContinentIdx, CountryIdx, HighwaySystem, Region, Route, Tier, Waypoint};

    fn setup() -> (HighwayData, tm_model::RouteIdx) {
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
            route.label_index.insert(label.to_string(), i);
            route.waypoints.push(Waypoint {
                label: label.to_string(),
                lat: i as f64,
                lng: 0.0,
                route: tm_model::RouteIdx(0),
                index_in_route: i as u32,
                colocated: None,
                hidden: false,
                no_photos: false,
            });
        }
        route.segments.push(tm_model::HighwaySegment::new(0, 1, 1.0));
        route.segments.push(tm_model::HighwaySegment::new(1, 2, 1.0));
        let idx = data.push_route(route);
        data.system_mut(sys).routes.push(idx);
        (data, idx)
    }

    #[test]
    fn marks_segments_between_labels() {
        let (data, _route) = setup();
        let routes = RouteIndex::build(&data);
        let traveler = TravelerList::build("alice", "ca I-90 A C\n", &data, &routes);
        assert_eq!(traveler.clinched_segments.len(), 2);
        assert!(traveler.log_lines.is_empty());
    }

    #[test]
    fn logs_unresolvable_route() {
        let (data, _route) = setup();
        let routes = RouteIndex::build(&data);
        let traveler = TravelerList::build("alice", "ca I-94 A C\n", &data, &routes);
        assert!(traveler.clinched_segments.is_empty());
        assert_eq!(traveler.log_lines.len(), 1);
    }
}
