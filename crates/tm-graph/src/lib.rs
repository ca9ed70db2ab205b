//! Builds the highway graph (simple and collapsed forms) from the named
//! vertex set and segment/concurrency data, and renders TMG files for the
//! master graph and arbitrary filtered subgraphs.

mod build;
mod edge;
mod graph_list_entry;
mod ids;
mod place_radius;
mod query;
mod tmg;
mod vertex;

pub use build::HighwayGraph;
pub use edge::{CollapsedEdge, SimpleEdge};
pub use graph_list_entry::{GraphCategory, GraphFormat, GraphListEntry};
pub use ids::{CollapsedEdgeIdx, EdgeIdx, VertexIdx};
pub use place_radius::PlaceRadius;
pub use vertex::Vertex;

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;
    use tm_datacheck::Datacheck;
    use tm_model::{
        ContinentIdx, CountryIdx, HighwayData, HighwaySegment, HighwaySystem, Region, Route, RouteIdx,
        SystemIdx, Tier, Waypoint, WaypointRef,
    };

    fn setup() -> (HighwayData, SystemIdx, tm_model::RegionIdx) {
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
        (data, sys, region)
    }

    fn add_route(
        data: &mut HighwayData,
        sys: SystemIdx,
        region: tm_model::RegionIdx,
        root: &str,
        points: &[(&str, f64, f64, bool)],
    ) -> RouteIdx {
        let mut r = Route::new(sys, region, root.into(), String::new(), String::new(), String::new());
        for (i, &(label, lat, lng, hidden)) in points.iter().enumerate() {
            r.waypoints.push(Waypoint {
                label: label.into(),
                lat,
                lng,
                route: RouteIdx(0),
                index_in_route: i as u32,
                colocated: None,
                hidden,
                no_photos: false,
            });
        }
        for i in 0..points.len().saturating_sub(1) {
            r.segments.push(HighwaySegment::new(i as u32, i as u32 + 1, 1.0));
        }
        let idx = data.push_route(r);
        data.system_mut(sys).routes.push(idx);
        idx
    }

    #[test]
    fn hidden_vertex_chain_collapses_to_one_edge() {
        let (mut data, sys, region) = setup();
        let route = add_route(
            &mut data,
            sys,
            region,
            "CA1",
            &[("A", 0.0, 0.0, false), ("+X", 1.0, 0.0, true), ("B", 2.0, 0.0, false)],
        );

        let order = vec![
            WaypointRef::new(route, 0),
            WaypointRef::new(route, 1),
            WaypointRef::new(route, 2),
        ];
        let mut names = FxHashMap::default();
        names.insert(order[0], "CA1@A".to_string());
        names.insert(order[1], "CA1@+X".to_string());
        names.insert(order[2], "CA1@B".to_string());

        let datacheck = Datacheck::new();
        let graph = HighwayGraph::build(&data, &order, &names, &datacheck);

        assert_eq!(graph.vertices.len(), 3);
        assert_eq!(graph.edges.len(), 2);

        let visible: Vec<_> = graph.vertices.iter().filter(|v| !v.is_hidden).collect();
        assert_eq!(visible.len(), 2);
        let live_collapsed: usize = graph
            .vertices
            .iter()
            .filter(|v| !v.is_hidden)
            .flat_map(|v| v.incident_collapsed.iter())
            .collect::<std::collections::HashSet<_>>()
            .len();
        assert_eq!(live_collapsed, 1);
    }

    #[test]
    fn collapsed_edge_across_two_routes_keeps_both_route_systems() {
        let (mut data, sys1, region) = setup();
        let sys2 = data.push_system(HighwaySystem {
            name: "usaus".into(),
            full_name: "US Highways".into(),
            country: CountryIdx(0),
            continent: ContinentIdx(0),
            tier: Tier::Active,
            routes: Vec::new(),
            connected_routes: Vec::new(),
        });

        let route1 = add_route(&mut data, sys1, region, "CA1", &[("A", 0.0, 0.0, false), ("X", 1.0, 0.0, true)]);
        let route2 = add_route(&mut data, sys2, region, "CA2", &[("X", 1.0, 0.0, true), ("B", 2.0, 0.0, false)]);

        let x1 = WaypointRef::new(route1, 1);
        let x2 = WaypointRef::new(route2, 0);
        data.new_colocation_ring(vec![x1, x2]);

        let a = WaypointRef::new(route1, 0);
        let b = WaypointRef::new(route2, 1);
        let order = vec![a, x1, x2, b];
        let mut names = FxHashMap::default();
        names.insert(a, "CA1@A".to_string());
        names.insert(x1, "CA1&CA2@X".to_string());
        names.insert(b, "CA2@B".to_string());

        let datacheck = Datacheck::new();
        let graph = HighwayGraph::build(&data, &order, &names, &datacheck);

        assert_eq!(graph.vertices.len(), 3);
        let spliced = graph
            .collapsed_edges
            .iter()
            .find(|e| e.route_systems.len() == 2)
            .expect("splicing across the shared hidden vertex should keep both routes");
        let systems: std::collections::HashSet<_> = spliced.route_systems.iter().map(|(_, sys)| *sys).collect();
        assert!(systems.contains(&sys1));
        assert!(systems.contains(&sys2));
        let mut labels: Vec<_> = spliced.route_systems.iter().map(|(r, _)| data.route(*r).list_name()).collect();
        labels.sort();
        assert_eq!(labels, vec!["CA1".to_string(), "CA2".to_string()]);
    }

    #[test]
    fn hidden_terminus_is_unhidden_and_flagged() {
        let (mut data, sys, region) = setup();
        let route = add_route(&mut data, sys, region, "CA1", &[("+X", 0.0, 0.0, true), ("A", 1.0, 0.0, false)]);
        let order = vec![WaypointRef::new(route, 0), WaypointRef::new(route, 1)];
        let mut names = FxHashMap::default();
        names.insert(order[0], "CA1@+X".to_string());
        names.insert(order[1], "CA1@A".to_string());

        let datacheck = Datacheck::new();
        let graph = HighwayGraph::build(&data, &order, &names, &datacheck);
        assert!(!graph.vertices[0].is_hidden);
        assert_eq!(datacheck.len(), 1);
    }
}
