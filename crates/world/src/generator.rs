//! Generation entry point.
//!
//! Seeds one [`RandomStream`] per call and routes it through either the
//! carve-then-mesh pipeline or the additive grower. Nothing outlives a call
//! except the returned cuboid list.

use cubist_core::{stream_for, Cuboid, GenerationMode, GenerationParameters, RandomStream};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{AdditiveGrower, GreedyMesher, SubtractiveCarver, VoxelGrid};

/// Mode-specific counters gathered during a generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum GenerationCounters {
    /// Counters from the additive grower.
    Additive {
        /// Placement attempts, successful or not.
        attempts: u64,
        /// Iterations abandoned after repeated collisions.
        abandoned_iterations: u32,
    },
    /// Counters from carving.
    Subtractive {
        /// Removal passes applied.
        passes: u32,
        /// Distinct cells cleared.
        cells_cleared: usize,
        /// Solid cells left for the mesher.
        solid_cells: usize,
    },
}

/// Cuboids plus the counters that explain them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Emitted cuboids in emission order.
    pub cuboids: Vec<Cuboid>,
    /// Per-mode counters.
    pub counters: GenerationCounters,
}

/// Generate the cuboid list for `params`.
pub fn generate(params: &GenerationParameters) -> Vec<Cuboid> {
    generate_report(params).cuboids
}

/// Generate the cuboid list for `params` along with run counters.
pub fn generate_report(params: &GenerationParameters) -> GenerationReport {
    let mut stream = stream_for(params);
    let report = match params.mode {
        GenerationMode::Additive => grow(params, &mut stream),
        GenerationMode::Subtractive => carve_and_mesh(params, &mut stream),
    };
    debug!(
        mode = %params.mode,
        seed = params.seed,
        iterations = params.iterations,
        cuboids = report.cuboids.len(),
        "generation finished"
    );
    report
}

fn carve_and_mesh(params: &GenerationParameters, stream: &mut RandomStream) -> GenerationReport {
    let (width, depth, height) = params.pillar();
    let mut occupied = VoxelGrid::solid(width, depth, height);
    let carve = SubtractiveCarver::new(&mut occupied, params.size_sampler())
        .run(params.iterations, stream);
    let solid_cells = occupied.count_set();
    debug!(
        passes = carve.passes,
        cells_cleared = carve.cells_cleared,
        solid_cells,
        "pillar carved"
    );

    GenerationReport {
        cuboids: GreedyMesher::mesh(&occupied, params.color),
        counters: GenerationCounters::Subtractive {
            passes: carve.passes,
            cells_cleared: carve.cells_cleared,
            solid_cells,
        },
    }
}

fn grow(params: &GenerationParameters, stream: &mut RandomStream) -> GenerationReport {
    let mut grower = AdditiveGrower::seed(params.size_sampler(), params.color, stream);
    let summary = grower.run(params.iterations, stream);
    debug!(
        attempts = summary.attempts,
        abandoned = summary.abandoned_iterations,
        placed = grower.placed().len(),
        "additive growth finished"
    );

    GenerationReport {
        cuboids: grower.into_cuboids(),
        counters: GenerationCounters::Additive {
            attempts: summary.attempts,
            abandoned_iterations: summary.abandoned_iterations,
        },
    }
}
