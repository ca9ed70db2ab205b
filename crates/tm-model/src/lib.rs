//! The core data model: continents, countries, regions, highway systems,
//! routes, waypoints, and segments, all addressed through arena indices
//! rather than owning pointers.

pub mod ids;
pub mod model;
pub mod region;
pub mod route;
pub mod segment;
pub mod system;
pub mod waypoint;

pub use ids::{
    ColocationRingIdx, ConcurrencyRingIdx, ContinentIdx, CountryIdx, RegionIdx, RouteIdx,
    SegmentRef, SystemIdx, WaypointRef,
};
pub use model::HighwayData;
pub use region::{Continent, Country, Region};
pub use route::{LastUpdate, Route};
pub use segment::HighwaySegment;
pub use system::{ConnectedRoute, HighwaySystem, Tier};
pub use waypoint::Waypoint;
