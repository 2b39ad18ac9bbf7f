use cubist_core::{BiasedSizeSampler, RandomStream};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::VoxelGrid;

/// One cubic removal applied to the pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarveCut {
    /// Minimum corner before clipping (may be negative when the cube is
    /// larger than a pillar dimension).
    pub start: [i64; 3],
    /// Edge length of the removed cube.
    pub size: u32,
    /// Cells that flipped from solid to empty.
    pub cleared: usize,
}

/// Totals for a full carving run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarveSummary {
    /// Removal passes applied.
    pub passes: u32,
    /// Distinct cells cleared across all passes.
    pub cells_cleared: usize,
}

/// Clears randomly placed, randomly sized cubes out of a solid grid.
///
/// Draw order per pass is fixed: size (two draws), then X, Y and Z offsets.
pub struct SubtractiveCarver<'a> {
    grid: &'a mut VoxelGrid,
    sampler: BiasedSizeSampler,
}

impl<'a> SubtractiveCarver<'a> {
    /// Carve into `grid` using cube sizes from `sampler`.
    pub fn new(grid: &'a mut VoxelGrid, sampler: BiasedSizeSampler) -> Self {
        Self { grid, sampler }
    }

    /// Apply one removal pass.
    pub fn carve_once(&mut self, stream: &mut RandomStream) -> CarveCut {
        let size = self.sampler.sample(stream);
        let edge = i64::from(size);
        let (width, depth, height) = self.grid.dims();
        let start = [
            stream.next_scaled(width as i64 - edge + 1),
            stream.next_scaled(depth as i64 - edge + 1),
            stream.next_scaled(height as i64 - edge + 1),
        ];
        let cleared = self.grid.fill_cube_clipped(start, edge, false);
        trace!(?start, size, cleared, "carved cube");
        CarveCut {
            start,
            size,
            cleared,
        }
    }

    /// Apply `passes` removal passes.
    pub fn run(&mut self, passes: u32, stream: &mut RandomStream) -> CarveSummary {
        let mut summary = CarveSummary::default();
        for _ in 0..passes {
            let cut = self.carve_once(stream);
            summary.passes += 1;
            summary.cells_cleared += cut.cleared;
        }
        summary
    }
}
