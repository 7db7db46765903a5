// src/terrain/heightmap.rs

/// Square grid of normalized heights for one chunk.
///
/// A chunk of size `n` stores `(n + 1) × (n + 1)` vertices so neighbouring
/// chunks share their edge row. Values are row-major: `index = z * side + x`.
/// Heights are in noise units; multiply by the mesh height multiplier for
/// world units.
#[derive(Debug, Clone, PartialEq)]
pub struct Heightmap {
    chunk_size: u32,
    values: Vec<f32>,
}

impl Heightmap {
    pub fn new(chunk_size: u32) -> Self {
        Self::filled(chunk_size, 0.0)
    }

    pub fn filled(chunk_size: u32, value: f32) -> Self {
        let side = chunk_size as usize + 1;
        Self { chunk_size, values: vec![value; side * side] }
    }

    /// Wrap existing row-major values. Returns `None` when the length does not match.
    pub fn from_values(chunk_size: u32, values: Vec<f32>) -> Option<Self> {
        let side = chunk_size as usize + 1;
        (values.len() == side * side).then_some(Self { chunk_size, values })
    }

    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    /// Vertices per edge.
    pub fn side(&self) -> usize {
        self.chunk_size as usize + 1
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [f32] {
        &mut self.values
    }

    fn index(&self, x: u32, z: u32) -> Option<usize> {
        if x > self.chunk_size || z > self.chunk_size {
            return None;
        }
        Some(z as usize * self.side() + x as usize)
    }

    pub fn get(&self, x: u32, z: u32) -> Option<f32> {
        self.index(x, z).map(|idx| self.values[idx])
    }

    pub fn set(&mut self, x: u32, z: u32, value: f32) -> bool {
        match self.index(x, z) {
            Some(idx) => {
                self.values[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Height at `(x, z)` with both indices clamped into the grid.
    pub fn get_clamped(&self, x: i32, z: i32) -> f32 {
        let max = self.chunk_size as i32;
        let x = x.clamp(0, max) as usize;
        let z = z.clamp(0, max) as usize;
        self.values[z * self.side() + x]
    }

    pub fn mean(&self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.values.iter().map(|&v| v as f64).sum();
        (sum / self.values.len() as f64) as f32
    }

    /// Cell whose height is closest to the mean height.
    ///
    /// Ties go to the cell nearest the chunk centre, then to the first in row-major order.
    pub fn closest_to_mean(&self) -> (u32, u32) {
        let mean = self.mean();
        let centre = self.chunk_size as i64 / 2;
        let off_centre = |x: u32, z: u32| (x as i64 - centre).pow(2) + (z as i64 - centre).pow(2);

        let mut best = (0, 0);
        let mut best_difference = f32::MAX;
        for z in 0..=self.chunk_size {
            for x in 0..=self.chunk_size {
                let difference = (self.get_clamped(x as i32, z as i32) - mean).abs();
                let tie = difference == best_difference;
                let closer = difference < best_difference
                    || (tie && off_centre(x, z) < off_centre(best.0, best.1));
                if closer {
                    best_difference = difference;
                    best = (x, z);
                }
            }
        }
        best
    }

    /// True when the cell lies on the outer ring of the grid.
    pub fn is_border(&self, x: u32, z: u32) -> bool {
        x == 0 || z == 0 || x == self.chunk_size || z == self.chunk_size
    }

    pub fn min_max(&self) -> (f32, f32) {
        self.values
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }
}
