/// Dense boolean occupancy lattice over `[0, width) × [0, depth) × [0, height)`.
///
/// Cells live in one contiguous buffer, z-major then y then x, which matches
/// the mesher's scan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxelGrid {
    width: usize,
    depth: usize,
    height: usize,
    cells: Vec<bool>,
}

impl VoxelGrid {
    /// Allocate a grid with every cell set to `fill`.
    pub fn new(width: usize, depth: usize, height: usize, fill: bool) -> Self {
        Self {
            width,
            depth,
            height,
            cells: vec![fill; width * depth * height],
        }
    }

    /// Fully solid grid.
    pub fn solid(width: usize, depth: usize, height: usize) -> Self {
        Self::new(width, depth, height, true)
    }

    /// Fully empty grid.
    pub fn empty(width: usize, depth: usize, height: usize) -> Self {
        Self::new(width, depth, height, false)
    }

    /// Extent along X.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Extent along Y.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Extent along Z.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, depth, height)`.
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.width, self.depth, self.height)
    }

    /// Total number of cells.
    pub fn volume(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    fn index(&self, x: usize, y: usize, z: usize) -> usize {
        debug_assert!(x < self.width);
        debug_assert!(y < self.depth);
        debug_assert!(z < self.height);
        (z * self.depth + y) * self.width + x
    }

    /// Whether a signed coordinate lies inside the grid.
    pub fn contains(&self, x: i64, y: i64, z: i64) -> bool {
        (0..self.width as i64).contains(&x)
            && (0..self.depth as i64).contains(&y)
            && (0..self.height as i64).contains(&z)
    }

    /// Read a cell.
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> bool {
        self.cells[self.index(x, y, z)]
    }

    /// Write a cell.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: bool) {
        let idx = self.index(x, y, z);
        self.cells[idx] = value;
    }

    /// Write `value` into the cube `[start, start + size)` on every axis,
    /// clipped to the grid. Returns how many cells changed.
    pub fn fill_cube_clipped(&mut self, start: [i64; 3], size: i64, value: bool) -> usize {
        let clip = |lo: i64, extent: usize| -> (usize, usize) {
            let begin = lo.clamp(0, extent as i64) as usize;
            let end = (lo + size).clamp(0, extent as i64) as usize;
            (begin, end.max(begin))
        };
        let (x0, x1) = clip(start[0], self.width);
        let (y0, y1) = clip(start[1], self.depth);
        let (z0, z1) = clip(start[2], self.height);

        let mut changed = 0;
        for z in z0..z1 {
            for y in y0..y1 {
                for x in x0..x1 {
                    let idx = self.index(x, y, z);
                    if self.cells[idx] != value {
                        self.cells[idx] = value;
                        changed += 1;
                    }
                }
            }
        }
        changed
    }

    /// Whether every cell of the cube at `(x, y, z)` with edge `size` is set.
    /// The cube must lie inside the grid.
    pub fn cube_is_set(&self, x: usize, y: usize, z: usize, size: usize) -> bool {
        (z..z + size).all(|cz| {
            (y..y + size).all(|cy| (x..x + size).all(|cx| self.get(cx, cy, cz)))
        })
    }

    /// Number of set cells.
    pub fn count_set(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Iterate set cells in scan order (z outer, then y, then x).
    pub fn iter_set(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        let (width, depth) = (self.width, self.depth);
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &cell)| cell)
            .map(move |(idx, _)| (idx % width, (idx / width) % depth, idx / (width * depth)))
    }
}
