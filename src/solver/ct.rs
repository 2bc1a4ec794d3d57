//! Constraint transport for the magnetic field.
//!
//! Replaces the magnetic-field slots of the per-axis flux fields with
//! corner-averaged electromotive forces (flux-interpolated CT in the
//! manner of Balsara & Spicer 1999 / Toth 2000). Each EMF component is
//! the quarter-sum of the four adjacent face fluxes, and each face flux
//! becomes the half-sum of its two adjacent corner EMFs; the normal
//! flux components are zeroed. The resulting update leaves the
//! corner-centered divergence of B unchanged to machine precision.
//!
//! The eight-point weights below are that composition written out; they
//! carry the divergence-preserving property and must not be reweighted.

use crate::mesh::Grid;
use crate::types::{slot, Axis, NCOMP};

/// Apply constraint transport to the x/y flux fields of a 2D sweep.
pub fn constraint_transport_2d(grid: &Grid, fx: &mut [f64], fy: &mut [f64]) {
    let n = grid.len();
    debug_assert_eq!(fx.len(), n);
    debug_assert_eq!(fy.len(), n);

    let sx = grid.stride(Axis::X);
    let sy = grid.stride(Axis::Y);

    let mut fx_by = vec![0.0; n / NCOMP];
    let mut fy_bx = vec![0.0; n / NCOMP];

    let mut i = sx;
    while i < n - sx {
        let c = i / NCOMP;
        let f = i + slot::BY;
        let g = i + slot::BX;

        fx_by[c] = (2.0 * fx[f] + fx[f + sy] + fx[f - sy]
            - fy[g]
            - fy[g + sx]
            - fy[g - sy]
            - fy[g + sx - sy])
            * 0.125;
        fy_bx[c] = (2.0 * fy[g] + fy[g + sx] + fy[g - sx]
            - fx[f]
            - fx[f + sy]
            - fx[f - sx]
            - fx[f - sx + sy])
            * 0.125;

        i += NCOMP;
    }

    let mut i = 0;
    while i < n {
        let c = i / NCOMP;
        fx[i + slot::BX] = 0.0;
        fx[i + slot::BY] = fx_by[c];
        fy[i + slot::BX] = fy_bx[c];
        fy[i + slot::BY] = 0.0;
        i += NCOMP;
    }
}

/// Apply constraint transport to the x/y/z flux fields of a 3D sweep.
pub fn constraint_transport_3d(grid: &Grid, fx: &mut [f64], fy: &mut [f64], fz: &mut [f64]) {
    let n = grid.len();
    debug_assert_eq!(fx.len(), n);
    debug_assert_eq!(fy.len(), n);
    debug_assert_eq!(fz.len(), n);

    let sx = grid.stride(Axis::X);
    let sy = grid.stride(Axis::Y);
    let sz = grid.stride(Axis::Z);

    let n_cells = n / NCOMP;
    let mut fx_by = vec![0.0; n_cells];
    let mut fx_bz = vec![0.0; n_cells];
    let mut fy_bz = vec![0.0; n_cells];
    let mut fy_bx = vec![0.0; n_cells];
    let mut fz_bx = vec![0.0; n_cells];
    let mut fz_by = vec![0.0; n_cells];

    let mut i = sx;
    while i < n - sx {
        let c = i / NCOMP;

        // (x, y) plane: EMF along z.
        let f = i + slot::BY;
        let g = i + slot::BX;
        fx_by[c] = (2.0 * fx[f] + fx[f + sy] + fx[f - sy]
            - fy[g]
            - fy[g + sx]
            - fy[g - sy]
            - fy[g + sx - sy])
            * 0.125;
        fy_bx[c] = (2.0 * fy[g] + fy[g + sx] + fy[g - sx]
            - fx[f]
            - fx[f + sy]
            - fx[f - sx]
            - fx[f - sx + sy])
            * 0.125;

        // (y, z) plane: EMF along x.
        let g = i + slot::BZ;
        let h = i + slot::BY;
        fy_bz[c] = (2.0 * fy[g] + fy[g + sz] + fy[g - sz]
            - fz[h]
            - fz[h + sy]
            - fz[h - sz]
            - fz[h + sy - sz])
            * 0.125;
        fz_by[c] = (2.0 * fz[h] + fz[h + sy] + fz[h - sy]
            - fy[g]
            - fy[g + sz]
            - fy[g - sy]
            - fy[g - sy + sz])
            * 0.125;

        // (z, x) plane: EMF along y.
        let h = i + slot::BX;
        let f = i + slot::BZ;
        fz_bx[c] = (2.0 * fz[h] + fz[h + sx] + fz[h - sx]
            - fx[f]
            - fx[f + sz]
            - fx[f - sx]
            - fx[f + sz - sx])
            * 0.125;
        fx_bz[c] = (2.0 * fx[f] + fx[f + sz] + fx[f - sz]
            - fz[h]
            - fz[h + sx]
            - fz[h - sz]
            - fz[h - sz + sx])
            * 0.125;

        i += NCOMP;
    }

    let mut i = 0;
    while i < n {
        let c = i / NCOMP;
        fx[i + slot::BX] = 0.0;
        fx[i + slot::BY] = fx_by[c];
        fx[i + slot::BZ] = fx_bz[c];
        fy[i + slot::BX] = fy_bx[c];
        fy[i + slot::BY] = 0.0;
        fy[i + slot::BZ] = fy_bz[c];
        fz[i + slot::BX] = fz_bx[c];
        fz[i + slot::BY] = fz_by[c];
        fz[i + slot::BZ] = 0.0;
        i += NCOMP;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fill a flux buffer with a deterministic pattern.
    fn pattern(n: usize, seed: f64) -> Vec<f64> {
        (0..n)
            .map(|i| (seed + i as f64 * 0.7).sin())
            .collect()
    }

    #[test]
    fn normal_components_are_zeroed() {
        let grid = Grid::uniform_2d(6, 6, 1.0, 1.0);
        let n = grid.len();
        let mut fx = pattern(n, 0.3);
        let mut fy = pattern(n, 1.1);

        constraint_transport_2d(&grid, &mut fx, &mut fy);

        let mut i = 0;
        while i < n {
            assert_eq!(fx[i + slot::BX], 0.0);
            assert_eq!(fy[i + slot::BY], 0.0);
            i += NCOMP;
        }
    }

    #[test]
    fn stencil_weights_2d() {
        // Check the eight-point average against a direct evaluation at
        // one interior cell.
        let grid = Grid::uniform_2d(6, 6, 1.0, 1.0);
        let n = grid.len();
        let fx0 = pattern(n, 0.3);
        let fy0 = pattern(n, 1.1);
        let mut fx = fx0.clone();
        let mut fy = fy0.clone();

        constraint_transport_2d(&grid, &mut fx, &mut fy);

        let sx = grid.stride(Axis::X);
        let sy = grid.stride(Axis::Y);
        let i = 3 * sx + 3 * sy;
        let f = i + slot::BY;
        let g = i + slot::BX;

        let expect = (2.0 * fx0[f] + fx0[f + sy] + fx0[f - sy]
            - fy0[g]
            - fy0[g + sx]
            - fy0[g - sy]
            - fy0[g + sx - sy])
            * 0.125;
        assert!((fx[f] - expect).abs() < 1e-15);
    }

    #[test]
    fn uniform_flux_is_fixed_point() {
        // With spatially constant fluxes the eight-point averages reduce
        // to (2F + 2F - 4G) / 8; antisymmetric pairs F = -G reproduce F.
        let grid = Grid::uniform_3d(6, 6, 6, 1.0, 1.0, 1.0);
        let n = grid.len();
        let mut fx = vec![0.0; n];
        let mut fy = vec![0.0; n];
        let mut fz = vec![0.0; n];
        let mut i = 0;
        while i < n {
            // A uniform field advected by a uniform velocity gives
            // antisymmetric induction fluxes across each plane pair.
            fx[i + slot::BY] = 0.25;
            fy[i + slot::BX] = -0.25;
            fy[i + slot::BZ] = 0.5;
            fz[i + slot::BY] = -0.5;
            fz[i + slot::BX] = -0.125;
            fx[i + slot::BZ] = 0.125;
            i += NCOMP;
        }

        constraint_transport_3d(&grid, &mut fx, &mut fy, &mut fz);

        // Away from the sweep boundaries the fluxes are unchanged.
        let sx = grid.stride(Axis::X);
        let sy = grid.stride(Axis::Y);
        let sz = grid.stride(Axis::Z);
        let i = 3 * sx + 3 * sy + 3 * sz;
        assert!((fx[i + slot::BY] - 0.25).abs() < 1e-15);
        assert!((fy[i + slot::BX] + 0.25).abs() < 1e-15);
        assert!((fy[i + slot::BZ] - 0.5).abs() < 1e-15);
        assert!((fz[i + slot::BY] + 0.5).abs() < 1e-15);
        assert!((fz[i + slot::BX] + 0.125).abs() < 1e-15);
        assert!((fx[i + slot::BZ] - 0.125).abs() < 1e-15);
    }
}
