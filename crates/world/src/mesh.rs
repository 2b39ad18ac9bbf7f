use cubist_core::{Cuboid, LatticePos, Rgb};

use crate::VoxelGrid;

/// Re-expresses a boolean grid as a list of cubes whose union is exactly the
/// set cells, with no cell covered twice.
///
/// Scan order is z outer, y middle, x inner. At each unclaimed solid cell the
/// mesher grows the largest cube (equal extent on all three axes) whose cells
/// are all solid and unclaimed, emits it, and claims its cells. The scan
/// order decides which cells larger, earlier cubes swallow, so it must not
/// change.
pub struct GreedyMesher<'a> {
    occupied: &'a VoxelGrid,
    meshed: VoxelGrid,
    color: Rgb,
}

impl<'a> GreedyMesher<'a> {
    /// Prepare a mesher over `occupied`; every emitted cuboid gets `color`.
    pub fn new(occupied: &'a VoxelGrid, color: Rgb) -> Self {
        let (width, depth, height) = occupied.dims();
        Self {
            occupied,
            meshed: VoxelGrid::empty(width, depth, height),
            color,
        }
    }

    /// Mesh `occupied` in one call.
    pub fn mesh(occupied: &VoxelGrid, color: Rgb) -> Vec<Cuboid> {
        GreedyMesher::new(occupied, color).run()
    }

    /// Scan the whole grid and return the emitted cubes in scan order.
    pub fn run(mut self) -> Vec<Cuboid> {
        let (width, depth, height) = self.occupied.dims();
        let mut cuboids = Vec::new();
        for z in 0..height {
            for y in 0..depth {
                for x in 0..width {
                    if !self.is_free(x, y, z) {
                        continue;
                    }
                    let size = self.largest_cube_at(x, y, z);
                    if size > 0 {
                        self.claim(x, y, z, size);
                        cuboids.push(Cuboid::new(
                            LatticePos::new(x as i32, y as i32, z as i32),
                            size as u32,
                            self.color,
                        ));
                    }
                }
            }
        }
        cuboids
    }

    /// Grid of cells claimed so far.
    pub fn meshed(&self) -> &VoxelGrid {
        &self.meshed
    }

    #[inline]
    fn is_free(&self, x: usize, y: usize, z: usize) -> bool {
        self.occupied.get(x, y, z) && !self.meshed.get(x, y, z)
    }

    fn largest_cube_at(&self, x: usize, y: usize, z: usize) -> usize {
        let (width, depth, height) = self.occupied.dims();
        let mut size = 0;
        while x + size < width && y + size < depth && z + size < height {
            // Cube `size` is already verified; only the new outer shell of
            // cube `size + 1` needs checking.
            if !self.shell_is_free(x, y, z, size) {
                break;
            }
            size += 1;
        }
        size
    }

    /// Check every cell with at least one local coordinate equal to `far`
    /// inside the cube `[0, far]^3` anchored at `(x, y, z)`.
    fn shell_is_free(&self, x: usize, y: usize, z: usize, far: usize) -> bool {
        for dz in 0..=far {
            for dy in 0..=far {
                for dx in 0..=far {
                    if dx != far && dy != far && dz != far {
                        continue;
                    }
                    if !self.is_free(x + dx, y + dy, z + dz) {
                        return false;
                    }
                }
            }
        }
        true
    }

    fn claim(&mut self, x: usize, y: usize, z: usize, size: usize) {
        self.meshed.fill_cube_clipped(
            [x as i64, y as i64, z as i64],
            size as i64,
            true,
        );
    }
}
