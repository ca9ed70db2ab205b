use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use tm_datacheck::{Datacheck, DatacheckEntry};
use tm_model::{HighwayData, RouteIdx, SegmentRef, WaypointRef};

use crate::edge::{CollapsedEdge, SimpleEdge};
use crate::ids::{CollapsedEdgeIdx, EdgeIdx, VertexIdx};
use crate::vertex::Vertex;

#[derive(Debug, Default)]
pub struct HighwayGraph {
    pub vertices: Vec<Vertex>,
    pub edges: Vec<SimpleEdge>,
    pub collapsed_edges: Vec<CollapsedEdge>,
    pub waypoint_to_vertex: FxHashMap<WaypointRef, VertexIdx>,
}

impl HighwayGraph {
    /// `order` is the quadtree's in-order point list; `names` is the
    /// vertex-name assignment produced for that same order by
    /// `tm_naming::name_vertices`.
    pub fn build(
        data: &HighwayData,
        order: &[WaypointRef],
        names: &FxHashMap<WaypointRef, String>,
        datacheck: &Datacheck,
    ) -> Self {
        let mut g = Self::default();
        g.build_vertices(data, order, names);
        g.build_edges(data);
        g.collapse(data, datacheck);
        g
    }

    fn build_vertices(&mut self, data: &HighwayData, order: &[WaypointRef], names: &FxHashMap<WaypointRef, String>) {
        for &w in order {
            let Some(name) = names.get(&w) else { continue };
            if let Some(ring) = data.waypoint(w).colocated {
                if data.colocation_ring(ring)[0] != w {
                    continue;
                }
            }
            let members = data.colocated_with(w);
            let is_hidden = members.iter().all(|&m| data.waypoint(m).hidden);
            let lead = data.waypoint(w);
            let vidx = VertexIdx::from(self.vertices.len());
            self.vertices.push(Vertex {
                name: name.clone(),
                lat: lead.lat,
                lng: lead.lng,
                colocated: members.clone(),
                is_hidden,
                incident_simple: Vec::new(),
                incident_collapsed: Vec::new(),
            });
            for &m in &members {
                self.waypoint_to_vertex.insert(m, vidx);
            }
        }
    }

    fn build_edges(&mut self, data: &HighwayData) {
        for (si, system) in data.systems.iter().enumerate() {
            if !system.active_or_preview() {
                continue;
            }
            for &route_idx in &system.routes {
                let route = data.route(route_idx);
                for (segi, seg) in route.segments.iter().enumerate() {
                    let seg_ref = SegmentRef::new(route_idx, segi);
                    let is_canonical = match seg.concurrent {
                        None => true,
                        Some(ring) => data.concurrency_ring(ring)[0] == seg_ref,
                    };
                    if !is_canonical {
                        continue;
                    }
                    let wp1 = WaypointRef::new(route_idx, seg.wp1 as usize);
                    let wp2 = WaypointRef::new(route_idx, seg.wp2 as usize);
                    let (Some(&v1), Some(&v2)) =
                        (self.waypoint_to_vertex.get(&wp1), self.waypoint_to_vertex.get(&wp2))
                    else {
                        continue;
                    };

                    let eidx = EdgeIdx::from(self.edges.len());
                    self.edges.push(SimpleEdge {
                        v1,
                        v2,
                        segment: seg_ref,
                        route: route_idx,
                        region: route.region,
                        system: tm_model::SystemIdx::from(si),
                    });
                    self.vertices[v1.index()].incident_simple.push(eidx);
                    self.vertices[v2.index()].incident_simple.push(eidx);

                    let ceidx = CollapsedEdgeIdx::from(self.collapsed_edges.len());
                    self.collapsed_edges.push(CollapsedEdge {
                        v1,
                        v2,
                        route_systems: vec![(route_idx, tm_model::SystemIdx::from(si))],
                        region: route.region,
                        shaping_points: Vec::new(),
                    });
                    self.vertices[v1.index()].incident_collapsed.push(ceidx);
                    self.vertices[v2.index()].incident_collapsed.push(ceidx);
                }
            }
        }
    }

    fn oriented_shaping(&self, e: CollapsedEdgeIdx, from: VertexIdx) -> Vec<(f64, f64)> {
        let edge = &self.collapsed_edges[e.index()];
        if edge.v1 == from {
            edge.shaping_points.clone()
        } else {
            edge.shaping_points.iter().rev().copied().collect()
        }
    }

    fn other_end(&self, e: CollapsedEdgeIdx, from: VertexIdx) -> VertexIdx {
        let edge = &self.collapsed_edges[e.index()];
        if edge.v1 == from {
            edge.v2
        } else {
            edge.v1
        }
    }

    /// Un-hide and splice hidden vertices. A vertex with fewer than two
    /// incident collapsed edges was never really an interior point
    /// (`HIDDEN_TERMINUS`); with more than two it's a real junction
    /// (`HIDDEN_JUNCTION`); with exactly two it collapses away, folding
    /// its coordinates into the new edge's shaping points.
    fn collapse(&mut self, data: &HighwayData, datacheck: &Datacheck) {
        let mut queue: VecDeque<VertexIdx> = (0..self.vertices.len())
            .map(VertexIdx::from)
            .filter(|&v| self.vertices[v.index()].is_hidden)
            .collect();
        let mut handled = vec![false; self.vertices.len()];

        while let Some(v) = queue.pop_front() {
            if handled[v.index()] || !self.vertices[v.index()].is_hidden {
                continue;
            }
            let incident = self.vertices[v.index()].incident_collapsed.clone();
            let lead = self.vertices[v.index()].colocated[0];
            let route_root = data.route(lead.route).root.clone();
            let label = data.waypoint(lead).label.clone();

            if incident.len() < 2 {
                self.vertices[v.index()].is_hidden = false;
                datacheck.add(DatacheckEntry::new(
                    lead.route,
                    route_root,
                    label,
                    "",
                    "",
                    "HIDDEN_TERMINUS",
                    "",
                ));
                handled[v.index()] = true;
                continue;
            }
            if incident.len() > 2 {
                self.vertices[v.index()].is_hidden = false;
                datacheck.add(DatacheckEntry::new(
                    lead.route,
                    route_root,
                    label,
                    "",
                    "",
                    "HIDDEN_JUNCTION",
                    incident.len().to_string(),
                ));
                handled[v.index()] = true;
                continue;
            }

            let e1 = incident[0];
            let e2 = incident[1];
            let other1 = self.other_end(e1, v);
            let other2 = self.other_end(e2, v);

            let mut shaping = self.oriented_shaping(e1, other1);
            shaping.push((self.vertices[v.index()].lat, self.vertices[v.index()].lng));
            shaping.extend(self.oriented_shaping(e2, v));

            let template = self.collapsed_edges[e1.index()].clone();
            let other_edge = self.collapsed_edges[e2.index()].clone();
            let route_systems = template
                .route_systems
                .into_iter()
                .chain(other_edge.route_systems)
                .collect();
            let new_idx = CollapsedEdgeIdx::from(self.collapsed_edges.len());
            self.collapsed_edges.push(CollapsedEdge {
                v1: other1,
                v2: other2,
                route_systems,
                region: template.region,
                shaping_points: shaping,
            });

            replace_incident(&mut self.vertices[other1.index()].incident_collapsed, e1, new_idx);
            replace_incident(&mut self.vertices[other2.index()].incident_collapsed, e2, new_idx);

            handled[v.index()] = true;
            if self.vertices[other1.index()].is_hidden && !handled[other1.index()] {
                queue.push_back(other1);
            }
            if self.vertices[other2.index()].is_hidden && !handled[other2.index()] {
                queue.push_back(other2);
            }
        }
    }
}

fn replace_incident(list: &mut Vec<CollapsedEdgeIdx>, old: CollapsedEdgeIdx, new: CollapsedEdgeIdx) {
    if let Some(pos) = list.iter().position(|&e| e == old) {
        list[pos] = new;
    } else {
        list.push(new);
    }
}
