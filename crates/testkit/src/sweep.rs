//! Parameter-sweep snapshot harness.
//!
//! A sweep evaluates the same measurement for each value of one swept
//! parameter (iterations, seed, cube size...) and pins the whole series in a
//! single golden file. Series expose trends, such as volume shrinking as more
//! removal passes run, that one-off snapshots cannot.

use crate::snapshot::assert_json_snapshot;
use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;

/// Configuration for a sweep.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Name written into the report.
    pub name: String,
    /// Name of the swept parameter, written into the report.
    pub parameter: String,
    /// Golden JSON path.
    pub snapshot_path: PathBuf,
}

/// One measurement in a sweep.
#[derive(Debug, Clone, Serialize)]
pub struct SweepFrame<V, S> {
    /// Swept parameter value.
    pub value: V,
    /// Measurement at that value.
    pub snapshot: S,
}

#[derive(Debug, Clone, Serialize)]
struct SweepReport<V, S> {
    name: String,
    parameter: String,
    frames: Vec<SweepFrame<V, S>>,
}

/// Evaluate `measure` at every value and return the frames in order.
pub fn collect_sweep<V, S, I, F>(values: I, mut measure: F) -> Vec<SweepFrame<V, S>>
where
    V: Clone,
    I: IntoIterator<Item = V>,
    F: FnMut(&V) -> S,
{
    values
        .into_iter()
        .map(|value| {
            let snapshot = measure(&value);
            SweepFrame { value, snapshot }
        })
        .collect()
}

/// Run a sweep and assert (or update) the golden at `config.snapshot_path`.
pub fn run_sweep_snapshot<V, S, I, F>(config: SweepConfig, values: I, measure: F) -> Result<()>
where
    V: Clone + Serialize,
    S: Serialize,
    I: IntoIterator<Item = V>,
    F: FnMut(&V) -> S,
{
    let report = SweepReport {
        name: config.name,
        parameter: config.parameter,
        frames: collect_sweep(values, measure),
    };
    assert_json_snapshot(config.snapshot_path, &report)
}
