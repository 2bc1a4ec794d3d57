//! Structured-grid geometry.
//!
//! A [`Grid`] describes a logical Nx x Ny x Nz block of cells with
//! physical extents Lx x Ly x Lz and two ghost cells on each side of
//! every dimension. Cell data is stored row-major with the eight field
//! slots varying fastest; the stride table encodes that layout.

use crate::types::{Axis, NCOMP};

/// Logical and physical extent of the structured grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    /// Number of cells along x, including ghosts.
    pub nx: usize,
    /// Number of cells along y, including ghosts.
    pub ny: usize,
    /// Number of cells along z, including ghosts.
    pub nz: usize,
    /// Physical domain length along x.
    pub lx: f64,
    /// Physical domain length along y.
    pub ly: f64,
    /// Physical domain length along z.
    pub lz: f64,
}

impl Grid {
    /// Ghost-cell width on each side of every dimension.
    pub const NG: usize = 2;

    /// Create a grid with the given logical dimensions and extents.
    ///
    /// Axes unused by the chosen dimensionality may be degenerate
    /// (N <= 2 * NG); their spacing is never consulted by a sweep of
    /// lower dimensionality.
    pub fn new(nx: usize, ny: usize, nz: usize, lx: f64, ly: f64, lz: f64) -> Self {
        Self {
            nx,
            ny,
            nz,
            lx,
            ly,
            lz,
        }
    }

    /// 1D grid: Nx cells spanning length Lx.
    pub fn uniform_1d(nx: usize, lx: f64) -> Self {
        Self::new(nx, 1, 1, lx, 1.0, 1.0)
    }

    /// 2D grid: Nx x Ny cells spanning Lx x Ly.
    pub fn uniform_2d(nx: usize, ny: usize, lx: f64, ly: f64) -> Self {
        Self::new(nx, ny, 1, lx, ly, 1.0)
    }

    /// 3D grid: Nx x Ny x Nz cells spanning Lx x Ly x Lz.
    pub fn uniform_3d(nx: usize, ny: usize, nz: usize, lx: f64, ly: f64, lz: f64) -> Self {
        Self::new(nx, ny, nz, lx, ly, lz)
    }

    /// Total number of cells, ghosts included.
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// Total number of doubles in one cell-data buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_cells() * NCOMP
    }

    /// True if the grid holds no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_cells() == 0
    }

    /// Stride table for the flat row-major layout:
    /// `[Nx*Ny*Nz*8, Ny*Nz*8, Nz*8, 8]`.
    ///
    /// `strides()[0]` is the full buffer length; `strides()[1..]` are the
    /// per-axis cell strides in units of doubles.
    #[inline]
    pub fn strides(&self) -> [usize; 4] {
        [
            self.nx * self.ny * self.nz * NCOMP,
            self.ny * self.nz * NCOMP,
            self.nz * NCOMP,
            NCOMP,
        ]
    }

    /// Stride (in doubles) between neighboring cells along an axis.
    #[inline]
    pub fn stride(&self, axis: Axis) -> usize {
        self.strides()[axis.index() + 1]
    }

    /// Cell spacing along an axis: L / (N - 2 * NG).
    ///
    /// Only meaningful for axes with more than `2 * NG` cells.
    #[inline]
    pub fn spacing(&self, axis: Axis) -> f64 {
        let (n, l) = match axis {
            Axis::X => (self.nx, self.lx),
            Axis::Y => (self.ny, self.ly),
            Axis::Z => (self.nz, self.lz),
        };
        l / (n as f64 - 2.0 * Self::NG as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_table_row_major() {
        let grid = Grid::uniform_3d(8, 6, 4, 1.0, 1.0, 1.0);
        assert_eq!(grid.strides(), [8 * 6 * 4 * 8, 6 * 4 * 8, 4 * 8, 8]);
        assert_eq!(grid.stride(Axis::X), 6 * 4 * 8);
        assert_eq!(grid.stride(Axis::Y), 4 * 8);
        assert_eq!(grid.stride(Axis::Z), 8);
        assert_eq!(grid.len(), grid.strides()[0]);
    }

    #[test]
    fn spacing_excludes_ghosts() {
        let grid = Grid::uniform_1d(404, 1.0);
        assert!((grid.spacing(Axis::X) - 1.0 / 400.0).abs() < 1e-15);

        let grid = Grid::uniform_2d(20, 12, 2.0, 1.0);
        assert!((grid.spacing(Axis::X) - 2.0 / 16.0).abs() < 1e-15);
        assert!((grid.spacing(Axis::Y) - 1.0 / 8.0).abs() < 1e-15);
    }

    #[test]
    fn one_dimensional_layout() {
        let grid = Grid::uniform_1d(16, 1.0);
        // With Ny = Nz = 1 the x-stride equals one cell.
        assert_eq!(grid.stride(Axis::X), NCOMP);
        assert_eq!(grid.n_cells(), 16);
    }
}
