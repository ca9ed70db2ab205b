//! Parses traveler `.list` files into clinched-segment data and propagates
//! each clinch across concurrency rings so that a traveler who drove one
//! route of a concurrent pair is credited for all of them.

mod clinch;
mod list_parser;
mod route_index;
mod splitregion;
mod traveler;

pub use clinch::{reset_clinch_state, run as run_clinch_augmenter};
pub use list_parser::{parse_list, ListLine, ParsedList};
pub use route_index::RouteIndex;
pub use splitregion::render_splitregion;
pub use traveler::TravelerList;
