//! Computes region/system mileage totals from the highway model and
//! per-traveler clinched mileage once clinch augmentation has settled, and
//! writes both out as the master site's CSV stats exports.

mod csv_out;
mod route_stats;
mod traveler_stats;

pub use csv_out::{write_active_only_csv, write_active_preview_csv, write_system_csv};
pub use route_stats::{compute_route_stats, HighwayStats};
pub use traveler_stats::finalize_traveler_mileage;
