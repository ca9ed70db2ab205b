use rustc_hash::FxHashMap;
use tm_model::{HighwayData, RouteIdx};

/// Resolves the `region route [banner city]` references found in `.list`
/// files to a concrete route. Built once per run, read-only afterward.
pub struct RouteIndex {
    by_region_route: FxHashMap<(String, String), Vec<RouteIdx>>,
}

impl RouteIndex {
    pub fn build(data: &HighwayData) -> Self {
        let mut by_region_route: FxHashMap<(String, String), Vec<RouteIdx>> = FxHashMap::default();
        for (i, route) in data.routes.iter().enumerate() {
            let region_code = data.region(route.region).code.clone();
            by_region_route
                .entry((region_code, route.root.clone()))
                .or_default()
                .push(RouteIdx::from(i));
        }
        Self { by_region_route }
    }

    /// Unambiguous 4-field lookup: succeeds only when exactly one route in
    /// that region carries that root.
    pub fn resolve_unique(&self, region: &str, route_root: &str) -> Option<RouteIdx> {
        let candidates = self.by_region_route.get(&(region.to_string(), route_root.to_string()))?;
        if candidates.len() == 1 {
            Some(candidates[0])
        } else {
            None
        }
    }

    /// 6-field lookup disambiguated by banner and city.
    pub fn resolve_with_banner(
        &self,
        data: &HighwayData,
        region: &str,
        route_root: &str,
        banner: &str,
        city: &str,
    ) -> Option<RouteIdx> {
        let candidates = self.by_region_route.get(&(region.to_string(), route_root.to_string()))?;
        candidates
            .iter()
            .copied()
            .find(|&r| {
                let route = data.route(r);
                route.banner == banner && route.city == city
            })
            .or_else(|| candidates.iter().copied().find(|&r| data.route(r).banner == banner))
    }
}
