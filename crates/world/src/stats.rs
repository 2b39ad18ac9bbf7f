use std::collections::{BTreeMap, HashSet};
use std::fmt;

use blake3::Hasher;
use cubist_core::{Bounds, Cuboid, LatticePos};
use serde::{Deserialize, Serialize};

/// Summary numbers for a cuboid list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureStats {
    /// Number of cuboids.
    pub cuboids: usize,
    /// Sum of cuboid volumes.
    pub volume: u64,
    /// Smallest edge length, if any cuboid exists.
    pub min_size: Option<u32>,
    /// Largest edge length, if any cuboid exists.
    pub max_size: Option<u32>,
    /// Bounds, if any cuboid exists.
    pub bounds: Option<Bounds>,
    /// Cuboid count per edge length.
    pub size_histogram: BTreeMap<u32, usize>,
}

impl StructureStats {
    /// Compute stats over `cuboids`.
    pub fn from_cuboids(cuboids: &[Cuboid]) -> Self {
        let mut histogram = BTreeMap::new();
        let mut volume = 0;
        let mut bounds: Option<Bounds> = None;
        for cuboid in cuboids {
            *histogram.entry(cuboid.size).or_insert(0) += 1;
            volume += cuboid.volume();
            let (lo, hi) = (cuboid.origin, cuboid.max_corner());
            bounds = Some(match bounds {
                None => Bounds { min: lo, max: hi },
                Some(b) => Bounds {
                    min: LatticePos::new(b.min.x.min(lo.x), b.min.y.min(lo.y), b.min.z.min(lo.z)),
                    max: LatticePos::new(b.max.x.max(hi.x), b.max.y.max(hi.y), b.max.z.max(hi.z)),
                },
            });
        }
        Self {
            cuboids: cuboids.len(),
            volume,
            min_size: histogram.keys().next().copied(),
            max_size: histogram.keys().next_back().copied(),
            bounds,
            size_histogram: histogram,
        }
    }
}

/// blake3 digest of an ordered cuboid list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StructureHash(pub [u8; 32]);

impl StructureHash {
    /// Hash `cuboids` in order; any change to order or fields changes the hash.
    pub fn of(cuboids: &[Cuboid]) -> Self {
        let mut hasher = Hasher::new();
        for cuboid in cuboids {
            hasher.update(&cuboid.origin.x.to_le_bytes());
            hasher.update(&cuboid.origin.y.to_le_bytes());
            hasher.update(&cuboid.origin.z.to_le_bytes());
            hasher.update(&cuboid.size.to_le_bytes());
            hasher.update(&[cuboid.color.r, cuboid.color.g, cuboid.color.b]);
        }
        Self(*hasher.finalize().as_bytes())
    }

    /// Lowercase hex rendering.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|byte| format!("{byte:02x}")).collect()
    }
}

impl fmt::Display for StructureHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Union of the cells covered by a cuboid list, with a count of cells that
/// were covered more than once.
#[derive(Debug, Clone, Default)]
pub struct CellCoverage {
    cells: HashSet<LatticePos>,
    overlapping_cells: usize,
}

impl CellCoverage {
    /// Accumulate coverage for `cuboids`.
    pub fn from_cuboids(cuboids: &[Cuboid]) -> Self {
        let mut coverage = Self::default();
        for cuboid in cuboids {
            for cell in cuboid.cells() {
                if !coverage.cells.insert(cell) {
                    coverage.overlapping_cells += 1;
                }
            }
        }
        coverage
    }

    /// Whether `pos` is covered.
    pub fn contains(&self, pos: LatticePos) -> bool {
        self.cells.contains(&pos)
    }

    /// Distinct covered cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether nothing is covered.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells covered by two or more cuboids (counted once per extra cover).
    pub fn overlapping_cells(&self) -> usize {
        self.overlapping_cells
    }

    /// Whether no cell is covered twice.
    pub fn is_disjoint(&self) -> bool {
        self.overlapping_cells == 0
    }

    /// Iterate covered cells in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = LatticePos> + '_ {
        self.cells.iter().copied()
    }
}
