use tm_model::{RegionIdx, RouteIdx, SegmentRef, SystemIdx};

use crate::ids::VertexIdx;

/// One edge per concurrency ring (or per unconcurred segment): the
/// canonical segment's own route is the one whose name labels the edge.
#[derive(Debug, Clone)]
pub struct SimpleEdge {
    pub v1: VertexIdx,
    pub v2: VertexIdx,
    pub segment: SegmentRef,
    pub route: RouteIdx,
    pub region: RegionIdx,
    pub system: SystemIdx,
}

/// A simple edge, or several spliced together across un-hidden-able
/// hidden vertices. Shaping points are the coordinates of every hidden
/// vertex folded into this edge, in order from `v1` to `v2`. Splicing two
/// edges at a hidden vertex can join segments from different routes (and
/// different systems), so every `(route, system)` pair contributing to
/// this edge is kept rather than just the first one; region stays
/// singular since a hidden vertex never sits on a region boundary.
#[derive(Debug, Clone)]
pub struct CollapsedEdge {
    pub v1: VertexIdx,
    pub v2: VertexIdx,
    pub route_systems: Vec<(RouteIdx, SystemIdx)>,
    pub region: RegionIdx,
    pub shaping_points: Vec<(f64, f64)>,
}
