use tm_model::WaypointRef;

use crate::ids::{CollapsedEdgeIdx, EdgeIdx};

#[derive(Debug, Clone)]
pub struct Vertex {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// Every waypoint colocated at this vertex's point, across all routes.
    pub colocated: Vec<WaypointRef>,
    /// True while every colocated waypoint came in marked hidden. Cleared
    /// during the collapse pass for any vertex that can't actually be
    /// collapsed away (0, 1, or >2 incident collapsed edges).
    pub is_hidden: bool,
    pub incident_simple: Vec<EdgeIdx>,
    pub incident_collapsed: Vec<CollapsedEdgeIdx>,
}
