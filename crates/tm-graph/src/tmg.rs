use rustc_hash::{FxHashMap, FxHashSet};
use tm_model::HighwayData;

use crate::build::HighwayGraph;
use crate::ids::{CollapsedEdgeIdx, EdgeIdx, VertexIdx};

impl HighwayGraph {
    /// Render a `.tmg` simple-format file body for the given vertex/edge
    /// selection. Vertex and edge order in the selections determines the
    /// local 0-based indices edges reference.
    pub fn render_simple_tmg(
        &self,
        data: &HighwayData,
        vertices: &[VertexIdx],
        edges: &FxHashSet<EdgeIdx>,
    ) -> String {
        let local_index: FxHashMap<VertexIdx, usize> =
            vertices.iter().enumerate().map(|(i, &v)| (v, i)).collect();
        let mut edge_list: Vec<EdgeIdx> = edges.iter().copied().collect();
        edge_list.sort_by_key(|e| e.0);

        let mut out = String::new();
        out.push_str("TMG 1.0 simple\n");
        out.push_str(&format!("{} {}\n", vertices.len(), edge_list.len()));
        for &vi in vertices {
            let v = &self.vertices[vi.index()];
            out.push_str(&format!("{} {:.15} {:.15}\n", v.name, v.lat, v.lng));
        }
        for ei in edge_list {
            let e = &self.edges[ei.index()];
            let Some(&i1) = local_index.get(&e.v1) else { continue };
            let Some(&i2) = local_index.get(&e.v2) else { continue };
            let label = data.route(e.route).list_name();
            out.push_str(&format!("{i1} {i2} {label}\n"));
        }
        out
    }

    pub fn render_collapsed_tmg(
        &self,
        data: &HighwayData,
        vertices: &[VertexIdx],
        edges: &FxHashSet<CollapsedEdgeIdx>,
    ) -> String {
        let local_index: FxHashMap<VertexIdx, usize> =
            vertices.iter().enumerate().map(|(i, &v)| (v, i)).collect();
        let mut edge_list: Vec<CollapsedEdgeIdx> = edges.iter().copied().collect();
        edge_list.sort_by_key(|e| e.0);

        let mut out = String::new();
        out.push_str("TMG 1.0 collapsed\n");
        out.push_str(&format!("{} {}\n", vertices.len(), edge_list.len()));
        for &vi in vertices {
            let v = &self.vertices[vi.index()];
            out.push_str(&format!("{} {:.15} {:.15}\n", v.name, v.lat, v.lng));
        }
        for ei in edge_list {
            let e = &self.collapsed_edges[ei.index()];
            let Some(&i1) = local_index.get(&e.v1) else { continue };
            let Some(&i2) = local_index.get(&e.v2) else { continue };
            let label = e
                .route_systems
                .iter()
                .map(|(route, _)| data.route(*route).list_name())
                .collect::<Vec<_>>()
                .join(",");
            let mut line = format!("{i1} {i2} {label}");
            for (lat, lng) in &e.shaping_points {
                line.push_str(&format!(" {lat:.15} {lng:.15}"));
            }
            line.push('\n');
            out.push_str(&line);
        }
        out
    }
}
