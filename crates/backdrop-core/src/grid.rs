use glam::Vec2;

/// Uniform 2D spatial hash grid for neighbor queries in the connection pass.
///
/// Uses counting sort for O(N) construction: count particles per cell -> prefix sum -> scatter.
pub struct SpatialHashGrid {
    inv_cell_size: f32,
    table_size: usize,
    /// Count array (reused): cell_count[hash] = number of particles in cell
    cell_count: Vec<u32>,
    /// Prefix sum: cell_start[hash] = index where particles for this cell begin in sorted_indices
    cell_start: Vec<u32>,
    /// Particle indices sorted by cell hash
    sorted_indices: Vec<u32>,
    /// Cell hash per particle (used during build)
    particle_hashes: Vec<u32>,
}

impl SpatialHashGrid {
    /// Create a grid with the given cell size (the link distance) and table size.
    /// Particle buffers grow on demand in `build`.
    pub fn new(cell_size: f32, table_size: usize) -> Self {
        let table_size = table_size.max(1);
        Self {
            inv_cell_size: 1.0 / cell_size.max(f32::EPSILON),
            table_size,
            cell_count: vec![0u32; table_size],
            cell_start: vec![0u32; table_size],
            sorted_indices: Vec::new(),
            particle_hashes: Vec::new(),
        }
    }

    /// Build the grid from current positions. O(N) using counting sort.
    pub fn build<I>(&mut self, positions: I)
    where
        I: IntoIterator<Item = Vec2>,
    {
        self.cell_count.fill(0);
        self.particle_hashes.clear();

        for pos in positions {
            let (cx, cy) = self.cell_coords(pos);
            let h = self.hash_cell(cx, cy);
            self.particle_hashes.push(h as u32);
            self.cell_count[h] += 1;
        }

        self.cell_start[0] = 0;
        for k in 1..self.table_size {
            self.cell_start[k] = self.cell_start[k - 1] + self.cell_count[k - 1];
        }

        // Reuse cell_count as scatter offsets
        self.cell_count.fill(0);
        self.sorted_indices.clear();
        self.sorted_indices.resize(self.particle_hashes.len(), 0);

        for (i, &h) in self.particle_hashes.iter().enumerate() {
            let h = h as usize;
            let idx = self.cell_start[h] + self.cell_count[h];
            self.sorted_indices[idx as usize] = i as u32;
            self.cell_count[h] += 1;
        }
    }

    /// Visit every particle in the 3x3 block of cells around `pos`.
    ///
    /// Each particle is reported at most once even when neighboring cells
    /// collide in the hash table. The caller is responsible for distance checks.
    pub fn query_neighbors<F: FnMut(u32)>(&self, pos: Vec2, mut callback: F) {
        let (cx, cy) = self.cell_coords(pos);
        let mut hashes = [0usize; 9];
        let mut n = 0;
        for dx in -1..=1_i32 {
            for dy in -1..=1_i32 {
                hashes[n] = self.hash_cell(cx.wrapping_add(dx), cy.wrapping_add(dy));
                n += 1;
            }
        }
        hashes.sort_unstable();

        let mut last = None;
        for &h in &hashes {
            if last == Some(h) {
                continue;
            }
            last = Some(h);
            let start = self.cell_start[h] as usize;
            let end = start + self.cell_count[h] as usize;
            for &idx in &self.sorted_indices[start..end] {
                callback(idx);
            }
        }
    }

    /// Hash function: cell coords -> table index
    #[inline]
    fn hash_cell(&self, cx: i32, cy: i32) -> usize {
        let h = (cx as u32).wrapping_mul(73856093) ^ (cy as u32).wrapping_mul(19349663);
        (h as usize) % self.table_size
    }

    /// Convert surface position to cell coordinates
    #[inline]
    fn cell_coords(&self, pos: Vec2) -> (i32, i32) {
        (
            (pos.x * self.inv_cell_size).floor() as i32,
            (pos.y * self.inv_cell_size).floor() as i32,
        )
    }
}
