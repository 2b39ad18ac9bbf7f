#![warn(missing_docs)]
//! Deterministic testing surfaces: golden snapshots, parameter sweeps and
//! generation metrics reports.

mod metrics;
mod snapshot;
mod sweep;

pub use metrics::*;
pub use snapshot::*;
pub use sweep::*;
