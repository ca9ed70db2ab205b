use rustc_hash::FxHashSet;
use tm_model::HighwayData;

use crate::build::HighwayGraph;
use crate::graph_list_entry::GraphListEntry;
use crate::ids::{CollapsedEdgeIdx, EdgeIdx, VertexIdx};
use crate::vertex::Vertex;

impl HighwayGraph {
    fn vertex_matches_region(&self, data: &HighwayData, v: &Vertex, g: &GraphListEntry) -> bool {
        v.colocated.iter().any(|&wp| g.regions.contains(&data.route(wp.route).region))
    }

    fn vertex_matches_system(&self, data: &HighwayData, v: &Vertex, g: &GraphListEntry) -> bool {
        v.colocated.iter().any(|&wp| g.systems.contains(&data.route(wp.route).system))
    }

    /// Vertices selected by a subgraph request: region/system filters
    /// intersect when both given, whichever one was given when only one
    /// is, and fall back to everything (optionally place-radius
    /// restricted) when neither is given.
    pub fn matching_vertices(&self, data: &HighwayData, g: &GraphListEntry) -> FxHashSet<VertexIdx> {
        let has_regions = !g.regions.is_empty();
        let has_systems = !g.systems.is_empty();

        let base: FxHashSet<VertexIdx> = (0..self.vertices.len())
            .map(VertexIdx::from)
            .filter(|&vi| {
                let v = &self.vertices[vi.index()];
                match (has_regions, has_systems) {
                    (true, true) => self.vertex_matches_region(data, v, g) && self.vertex_matches_system(data, v, g),
                    (true, false) => self.vertex_matches_region(data, v, g),
                    (false, true) => self.vertex_matches_system(data, v, g),
                    (false, false) => true,
                }
            })
            .collect();

        match &g.placeradius {
            Some(pr) => base.into_iter().filter(|&vi| {
                let v = &self.vertices[vi.index()];
                pr.contains(v.lat, v.lng)
            }).collect(),
            None => base,
        }
    }

    pub fn matching_edges(&self, mv: &FxHashSet<VertexIdx>, g: &GraphListEntry) -> FxHashSet<EdgeIdx> {
        let has_regions = !g.regions.is_empty();
        let has_systems = !g.systems.is_empty();

        let mut out = FxHashSet::default();
        for &vi in mv {
            for &ei in &self.vertices[vi.index()].incident_simple {
                let e = &self.edges[ei.index()];
                if has_regions && !g.regions.contains(&e.region) {
                    continue;
                }
                if has_systems && !g.systems.contains(&e.system) {
                    continue;
                }
                if let Some(pr) = &g.placeradius {
                    let v1 = &self.vertices[e.v1.index()];
                    let v2 = &self.vertices[e.v2.index()];
                    if !pr.contains(v1.lat, v1.lng) && !pr.contains(v2.lat, v2.lng) {
                        continue;
                    }
                }
                out.insert(ei);
            }
        }
        out
    }

    /// For each visible vertex in `mv`, scan its collapsed incidents and
    /// include an edge matching the same region/system/place-radius rules
    /// as `matching_edges`.
    pub fn matching_collapsed_edges(&self, mv: &FxHashSet<VertexIdx>, g: &GraphListEntry) -> FxHashSet<CollapsedEdgeIdx> {
        let has_regions = !g.regions.is_empty();
        let has_systems = !g.systems.is_empty();

        let mut out = FxHashSet::default();
        for &vi in mv {
            let v = &self.vertices[vi.index()];
            if v.is_hidden {
                continue;
            }
            for &ei in &v.incident_collapsed {
                let e = &self.collapsed_edges[ei.index()];
                if has_regions && !g.regions.contains(&e.region) {
                    continue;
                }
                if has_systems && !e.route_systems.iter().any(|(_, sys)| g.systems.contains(sys)) {
                    continue;
                }
                if let Some(pr) = &g.placeradius {
                    let v1 = &self.vertices[e.v1.index()];
                    let v2 = &self.vertices[e.v2.index()];
                    if !pr.contains(v1.lat, v1.lng) && !pr.contains(v2.lat, v2.lng) {
                        continue;
                    }
                }
                out.insert(ei);
            }
        }
        out
    }
}
