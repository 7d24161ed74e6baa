//! N×N complex grid and the wave-vector lattice it is indexed by.

use std::f32::consts::PI;

use glam::Vec2;
use rustfft::num_complex::Complex32;

/// Wave-vector of lattice cell `(x, y)`: `(-N/2 + x, -N/2 + y) · 2π/L`.
pub fn wave_vector(n: usize, domain_size: f32, x: usize, y: usize) -> Vec2 {
    let half = n as f32 / 2.0;
    Vec2::new(-half + x as f32, -half + y as f32) * (2.0 * PI / domain_size)
}

/// Flat index of the cell holding `-k` for cell `(x, y)`.
///
/// Cell `((N - x) mod N, (N - y) mod N)`; the Nyquist row/column folds onto itself.
pub fn mirror_index(n: usize, x: usize, y: usize) -> usize {
    ((n - y) % n) * n + (n - x) % n
}

/// Row-major `N×N` grid of complex samples, `index = y*N + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexGrid {
    n: usize,
    cells: Vec<Complex32>,
}

impl ComplexGrid {
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            cells: vec![Complex32::new(0.0, 0.0); n * n],
        }
    }

    pub fn from_cells(n: usize, cells: Vec<Complex32>) -> Self {
        assert_eq!(cells.len(), n * n, "grid of side {n} needs {} cells", n * n);
        Self { n, cells }
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn cells(&self) -> &[Complex32] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Complex32] {
        &mut self.cells
    }

    pub fn get(&self, x: usize, y: usize) -> Complex32 {
        self.cells[y * self.n + x]
    }

    /// Value stored for `-k` of cell `(x, y)`
    pub fn mirrored(&self, x: usize, y: usize) -> Complex32 {
        self.cells[mirror_index(self.n, x, y)]
    }

    /// Interleaved `[re, im]` pairs, the layout of a WGSL `array<vec2<f32>>`
    pub fn interleaved(&self) -> Vec<[f32; 2]> {
        self.cells.iter().map(|c| [c.re, c.im]).collect()
    }

    /// Σ|h|² over all cells
    pub fn energy(&self) -> f32 {
        self.cells.iter().map(|c| c.norm_sqr()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wave_vector_centered() {
        let k = wave_vector(8, 20.0, 4, 4);
        assert_eq!(k, Vec2::ZERO);

        let corner = wave_vector(8, 2.0 * PI, 0, 0);
        assert!((corner - Vec2::new(-4.0, -4.0)).length() < 1e-6);
    }

    #[test]
    fn test_mirror_index_negates_wave_vector() {
        let n = 8;
        for y in 1..n {
            for x in 1..n {
                let m = mirror_index(n, x, y);
                let (mx, my) = (m % n, m / n);
                let k = wave_vector(n, 10.0, x, y);
                let mk = wave_vector(n, 10.0, mx, my);
                assert!((k + mk).length() < 1e-5, "({x},{y}) -> ({mx},{my})");
            }
        }
    }

    #[test]
    fn test_mirror_index_folds_nyquist() {
        assert_eq!(mirror_index(4, 0, 0), 0);
        assert_eq!(mirror_index(4, 0, 1), 3 * 4);
        assert_eq!(mirror_index(4, 2, 2), 2 * 4 + 2);
    }

    #[test]
    fn test_interleaved_layout() {
        let grid = ComplexGrid::from_cells(
            2,
            vec![
                Complex32::new(1.0, 2.0),
                Complex32::new(3.0, 4.0),
                Complex32::new(5.0, 6.0),
                Complex32::new(7.0, 8.0),
            ],
        );
        assert_eq!(
            grid.interleaved(),
            vec![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0], [7.0, 8.0]]
        );
        assert_eq!(grid.get(1, 0), Complex32::new(3.0, 4.0));
        assert_eq!(grid.mirrored(1, 0), Complex32::new(3.0, 4.0));
        assert!((grid.energy() - 204.0).abs() < 1e-4);
    }
}
