//! Parses the manifest CSVs (continents, countries, regions, systems, and
//! per-system route/connected-route files) and per-route `.wpt` files into
//! an in-memory [`tm_model::HighwayData`].

mod manifest;
mod wpt;

pub use manifest::{
    load_connected_routes, load_continents, load_countries, load_regions, load_system_routes, load_systems,
};
pub use wpt::{load_wpt, load_wpt_into_route};
