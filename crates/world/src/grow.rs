use std::collections::HashSet;

use cubist_core::{BiasedSizeSampler, Cuboid, LatticePos, RandomStream, Rgb};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Failed placement attempts allowed per iteration before it is abandoned.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 50;

/// Lattice axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Width axis.
    X,
    /// Depth axis.
    Y,
    /// Vertical axis.
    Z,
}

/// Face of a cuboid a new cuboid can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    /// +X
    PosX,
    /// -X
    NegX,
    /// +Y
    PosY,
    /// -Y
    NegY,
    /// +Z
    PosZ,
    /// -Z
    NegZ,
}

impl Face {
    /// All faces in draw-index order.
    pub const ALL: [Face; 6] = [
        Face::PosX,
        Face::NegX,
        Face::PosY,
        Face::NegY,
        Face::PosZ,
        Face::NegZ,
    ];

    /// Face selected by a draw index in `0..6`.
    pub fn from_index(index: usize) -> Face {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    /// Growth axis.
    pub fn axis(self) -> Axis {
        match self {
            Face::PosX | Face::NegX => Axis::X,
            Face::PosY | Face::NegY => Axis::Y,
            Face::PosZ | Face::NegZ => Axis::Z,
        }
    }

    /// Whether growth goes toward +infinity on the axis.
    pub fn is_positive(self) -> bool {
        matches!(self, Face::PosX | Face::PosY | Face::PosZ)
    }

    /// Origin of a cube of edge `size` sitting flush against `base` on this
    /// face. The two non-growth coordinates copy the base origin exactly.
    pub fn attach(self, base: &Cuboid, size: u32) -> LatticePos {
        let offset = if self.is_positive() {
            base.extent()
        } else {
            -(size as i32)
        };
        let mut origin = base.origin;
        match self.axis() {
            Axis::X => origin.x += offset,
            Axis::Y => origin.y += offset,
            Axis::Z => origin.z += offset,
        }
        origin
    }
}

/// Set of lattice cells covered by placed cuboids.
#[derive(Debug, Clone, Default)]
pub struct OccupiedCells {
    cells: HashSet<u128>,
}

impl OccupiedCells {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn key(pos: LatticePos) -> u128 {
        (u128::from(pos.x as u32) << 64) | (u128::from(pos.y as u32) << 32) | u128::from(pos.z as u32)
    }

    /// Whether `pos` is covered.
    pub fn contains(&self, pos: LatticePos) -> bool {
        self.cells.contains(&Self::key(pos))
    }

    /// Whether any cell of `cuboid` is already covered.
    pub fn collides(&self, cuboid: &Cuboid) -> bool {
        cuboid.cells().any(|cell| self.contains(cell))
    }

    /// Mark every cell of `cuboid` as covered.
    pub fn insert(&mut self, cuboid: &Cuboid) {
        self.cells.extend(cuboid.cells().map(Self::key));
    }

    /// Number of covered cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether nothing is covered.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Totals for a growth run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthSummary {
    /// Placement attempts made, successful or not.
    pub attempts: u64,
    /// Iterations that gave up after [`MAX_PLACEMENT_ATTEMPTS`] failures.
    pub abandoned_iterations: u32,
}

/// Builds a structure by attaching cubes flush to faces of existing cubes.
///
/// Draw order per attempt is fixed: base pick (one draw), size (two draws),
/// face (one draw).
pub struct AdditiveGrower {
    sampler: BiasedSizeSampler,
    color: Rgb,
    placed: Vec<Cuboid>,
    occupied: OccupiedCells,
    summary: GrowthSummary,
}

impl AdditiveGrower {
    /// Place the seed cube at the origin, drawing its size from `stream`.
    pub fn seed(sampler: BiasedSizeSampler, color: Rgb, stream: &mut RandomStream) -> Self {
        let seed_cube = Cuboid::new(LatticePos::ORIGIN, sampler.sample(stream), color);
        let mut occupied = OccupiedCells::new();
        occupied.insert(&seed_cube);
        Self {
            sampler,
            color,
            placed: vec![seed_cube],
            occupied,
            summary: GrowthSummary::default(),
        }
    }

    /// Cuboids placed so far, in placement order.
    pub fn placed(&self) -> &[Cuboid] {
        &self.placed
    }

    /// Covered cells so far.
    pub fn occupied(&self) -> &OccupiedCells {
        &self.occupied
    }

    /// Counters so far.
    pub fn summary(&self) -> GrowthSummary {
        self.summary
    }

    /// Make one placement attempt. Returns the new cuboid on success.
    pub fn try_place(&mut self, stream: &mut RandomStream) -> Option<Cuboid> {
        self.summary.attempts += 1;
        let pick = stream.next_scaled(self.placed.len() as i64) as usize;
        let base = self.placed[pick.min(self.placed.len() - 1)];
        let size = self.sampler.sample(stream);
        let face = Face::from_index(stream.next_scaled(6) as usize);

        let candidate = Cuboid::new(face.attach(&base, size), size, self.color);
        if self.occupied.collides(&candidate) {
            trace!(base = %base, ?face, size, "placement collided");
            return None;
        }
        self.occupied.insert(&candidate);
        self.placed.push(candidate);
        Some(candidate)
    }

    /// Run one iteration: retry up to [`MAX_PLACEMENT_ATTEMPTS`] times, then
    /// give up silently. Returns whether a cuboid was placed.
    pub fn grow_once(&mut self, stream: &mut RandomStream) -> bool {
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            if self.try_place(stream).is_some() {
                return true;
            }
        }
        self.summary.abandoned_iterations += 1;
        false
    }

    /// Grow toward `target` cuboids in total (seed included). The result may
    /// hold fewer when iterations are abandoned.
    pub fn run(&mut self, target: u32, stream: &mut RandomStream) -> GrowthSummary {
        for _ in 1..target {
            self.grow_once(stream);
        }
        self.summary
    }

    /// Consume the grower and return the placed cuboids.
    pub fn into_cuboids(self) -> Vec<Cuboid> {
        self.placed
    }
}
