//! Turns colocation rings into unique, human-readable graph vertex names.

mod exit_number;
mod log;
mod namer;

pub use log::NamingLog;
pub use namer::name_vertices;
