//! Collects data-quality diagnostics raised during validation and graph
//! construction, and reconciles them against a false-positive list before
//! anything is written to the final `datacheck.log`.

mod always_error;
mod collector;
mod entry;

pub use always_error::{always_error_set, ALWAYS_ERROR};
pub use collector::{Datacheck, MarkFpsOutcome};
pub use entry::{DatacheckEntry, FpRow};
