//! Shared primitives used across the Travel Mapping engine crates:
//! field-length limits, the fatal `ErrorList`, and logging bootstrap.

mod error_list;
mod fields;
mod geo;
mod logging;

pub use error_list::ErrorList;
pub use fields::DbFieldLength;
pub use geo::{great_circle_distance_miles, EARTH_RADIUS_MILES};
pub use logging::init_tracing;
