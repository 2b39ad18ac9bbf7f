//! Generation metrics reports exported as JSON.
//!
//! A report pins down one generation run: the parameters, what came out, the
//! fingerprint of the output, and how long it took. CI keeps reports around
//! to spot regressions in output shape or generation time.

use anyhow::{Context, Result};
use cubist_core::{Bounds, GenerationParameters};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level report for one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationMetrics {
    /// Run or test identifier.
    pub run_name: String,

    /// When the report was built (RFC 3339).
    pub timestamp: String,

    /// Parameters the run used.
    pub parameters: GenerationParameters,

    /// Output shape.
    pub structure: StructureMetrics,

    /// Mode-specific counters (attempts, abandoned iterations, cleared cells...).
    pub counters: BTreeMap<String, u64>,

    /// Wall-clock timing.
    pub timing: TimingMetrics,
}

/// Shape of the emitted cuboid list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructureMetrics {
    /// Cuboids emitted.
    pub cuboids: usize,

    /// Sum of cuboid volumes.
    pub volume: u64,

    /// Smallest edge length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_size: Option<u32>,

    /// Largest edge length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u32>,

    /// Axis-aligned bounds of the structure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,

    /// Cuboid count per edge length.
    #[serde(default)]
    pub size_histogram: BTreeMap<u32, usize>,

    /// Hex fingerprint of the ordered cuboid list.
    pub fingerprint: String,
}

/// Timing for a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimingMetrics {
    /// Time spent inside the generator (microseconds).
    pub generation_us: u128,

    /// Time spent writing outputs (microseconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_us: Option<u128>,
}

/// Builder for [`GenerationMetrics`].
pub struct GenerationMetricsBuilder {
    report: GenerationMetrics,
}

impl GenerationMetricsBuilder {
    /// Start a report for `parameters`.
    pub fn new(run_name: impl Into<String>, parameters: GenerationParameters) -> Self {
        Self {
            report: GenerationMetrics {
                run_name: run_name.into(),
                timestamp: chrono::Utc::now().to_rfc3339(),
                parameters,
                structure: StructureMetrics::default(),
                counters: BTreeMap::new(),
                timing: TimingMetrics::default(),
            },
        }
    }

    /// Set output shape.
    pub fn structure(mut self, structure: StructureMetrics) -> Self {
        self.report.structure = structure;
        self
    }

    /// Record a named counter.
    pub fn counter(mut self, name: impl Into<String>, value: u64) -> Self {
        self.report.counters.insert(name.into(), value);
        self
    }

    /// Set timing.
    pub fn timing(mut self, timing: TimingMetrics) -> Self {
        self.report.timing = timing;
        self
    }

    /// Finish the report.
    pub fn build(self) -> GenerationMetrics {
        self.report
    }
}

/// Writes metrics reports as pretty JSON.
pub struct MetricsSink {
    path: PathBuf,
}

impl MetricsSink {
    /// Sink targeting `path`; parent directories are created up front.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create metrics directory {}", parent.display())
                })?;
            }
        }
        Ok(Self { path })
    }

    /// Destination path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `report`, replacing any previous file.
    pub fn write(&self, report: &GenerationMetrics) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write metrics to {}", self.path.display()))
    }
}

/// Read a report back from disk.
pub fn load_metrics<P: AsRef<Path>>(path: P) -> Result<GenerationMetrics> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read metrics {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse metrics {}", path.display()))
}
