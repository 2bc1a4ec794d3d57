//! Interface reconstruction.
//!
//! Builds the left/right primitive edge states feeding the Riemann
//! solver at the face between cell `i` and cell `i + s`. `pl` is the
//! right edge of cell `i`, `pr` the left edge of cell `i + s`.
//!
//! The 4-velocity variant reconstructs (ux, uy, uz) = W v instead of
//! the 3-velocity and maps the edges back through W = sqrt(1 + u.u),
//! which keeps them subluminal no matter how steep the profile.

use crate::solver::limiters::SlopeLimiter;
use crate::types::{slot, NCOMP};

/// Per-cell 4-velocity scratch, written by the primitive recovery and
/// consumed by the 4-velocity reconstruction.
#[derive(Clone, Debug)]
pub struct FourVelocity {
    pub ux: Vec<f64>,
    pub uy: Vec<f64>,
    pub uz: Vec<f64>,
}

impl FourVelocity {
    /// Zero-initialized scratch for `n_cells` cells.
    pub fn zeros(n_cells: usize) -> Self {
        Self {
            ux: vec![0.0; n_cells],
            uy: vec![0.0; n_cells],
            uz: vec![0.0; n_cells],
        }
    }

    /// Store W v for one cell.
    #[inline]
    pub fn set(&mut self, cell: usize, w: f64, vx: f64, vy: f64, vz: f64) {
        self.ux[cell] = w * vx;
        self.uy[cell] = w * vy;
        self.uz[cell] = w * vz;
    }
}

/// First-order reconstruction: both edges copy their cell centers.
pub fn piecewise_constant(
    p: &[f64],
    i: usize,
    s: usize,
    pl: &mut [f64; NCOMP],
    pr: &mut [f64; NCOMP],
) {
    pl.copy_from_slice(&p[i..i + NCOMP]);
    pr.copy_from_slice(&p[i + s..i + s + NCOMP]);
}

/// PLM reconstruction of all eight slots in 3-velocity variables.
pub fn plm_3velocity(
    p: &[f64],
    i: usize,
    s: usize,
    limiter: SlopeLimiter,
    theta: f64,
    pl: &mut [f64; NCOMP],
    pr: &mut [f64; NCOMP],
) {
    for q in 0..NCOMP {
        pr[q] = p[i + s + q] - 0.5 * limiter.apply(theta, p[i + q], p[i + s + q], p[i + 2 * s + q]);
        pl[q] = p[i + q] + 0.5 * limiter.apply(theta, p[i - s + q], p[i + q], p[i + s + q]);
    }
}

/// PLM reconstruction with the velocity in 4-velocity variables.
///
/// Scalars and field components use the minmod limiter; the 4-velocity
/// components use the selected one. `c` is the cell index of cell `i`
/// and `cs` the cell stride along the active axis.
#[allow(clippy::too_many_arguments)]
pub fn plm_4velocity(
    p: &[f64],
    i: usize,
    s: usize,
    u4: &FourVelocity,
    c: usize,
    cs: usize,
    limiter: SlopeLimiter,
    theta: f64,
    pl: &mut [f64; NCOMP],
    pr: &mut [f64; NCOMP],
) {
    let minmod = SlopeLimiter::Minmod;
    for q in [slot::RHO, slot::PRE, slot::BX, slot::BY, slot::BZ] {
        pr[q] = p[i + s + q] - 0.5 * minmod.apply(theta, p[i + q], p[i + s + q], p[i + 2 * s + q]);
        pl[q] = p[i + q] + 0.5 * minmod.apply(theta, p[i - s + q], p[i + q], p[i + s + q]);
    }

    let edge = |u: &[f64]| {
        let r = u[c + cs] - 0.5 * limiter.apply(theta, u[c], u[c + cs], u[c + 2 * cs]);
        let l = u[c] + 0.5 * limiter.apply(theta, u[c - cs], u[c], u[c + cs]);
        (l, r)
    };
    let (ux_l, ux_r) = edge(&u4.ux);
    let (uy_l, uy_r) = edge(&u4.uy);
    let (uz_l, uz_r) = edge(&u4.uz);

    let w_r = (1.0 + ux_r * ux_r + uy_r * uy_r + uz_r * uz_r).sqrt();
    let w_l = (1.0 + ux_l * ux_l + uy_l * uy_l + uz_l * uz_l).sqrt();

    pr[slot::VX] = ux_r / w_r;
    pr[slot::VY] = uy_r / w_r;
    pr[slot::VZ] = uz_r / w_r;
    pl[slot::VX] = ux_l / w_l;
    pl[slot::VY] = uy_l / w_l;
    pl[slot::VZ] = uz_l / w_l;
}

#[cfg(test)]
mod tests {
    use super::*;

    const THETA: f64 = 2.0;

    /// Five cells with a linear profile in every slot.
    fn linear_cells() -> Vec<f64> {
        let mut p = vec![0.0; 5 * NCOMP];
        for c in 0..5 {
            for q in 0..NCOMP {
                p[c * NCOMP + q] = 1.0 + 0.25 * c as f64 + 0.01 * q as f64;
            }
        }
        p
    }

    #[test]
    fn piecewise_constant_copies_centers() {
        let p = linear_cells();
        let mut pl = [0.0; NCOMP];
        let mut pr = [0.0; NCOMP];
        piecewise_constant(&p, 2 * NCOMP, NCOMP, &mut pl, &mut pr);
        assert_eq!(&pl[..], &p[2 * NCOMP..3 * NCOMP]);
        assert_eq!(&pr[..], &p[3 * NCOMP..4 * NCOMP]);
    }

    #[test]
    fn plm_linear_profile_exact_edges() {
        // On linear data the limited slopes are exact and both edge
        // states land on the linear interpolant at the face.
        let p = linear_cells();
        let mut pl = [0.0; NCOMP];
        let mut pr = [0.0; NCOMP];
        plm_3velocity(&p, 2 * NCOMP, NCOMP, SlopeLimiter::Minmod, THETA, &mut pl, &mut pr);

        for q in 0..NCOMP {
            let face = 1.0 + 0.25 * 2.5 + 0.01 * q as f64;
            assert!(
                (pl[q] - face).abs() < 1e-12,
                "left edge slot {q}: {} vs {face}",
                pl[q]
            );
            assert!(
                (pr[q] - face).abs() < 1e-12,
                "right edge slot {q}: {} vs {face}",
                pr[q]
            );
        }
    }

    #[test]
    fn plm_flat_profile_keeps_centers() {
        let mut p = vec![0.0; 5 * NCOMP];
        for c in 0..5 {
            for q in 0..NCOMP {
                p[c * NCOMP + q] = 3.0;
            }
        }
        let mut pl = [0.0; NCOMP];
        let mut pr = [0.0; NCOMP];
        plm_3velocity(&p, 2 * NCOMP, NCOMP, SlopeLimiter::Minmod, THETA, &mut pl, &mut pr);
        for q in 0..NCOMP {
            assert!((pl[q] - 3.0).abs() < 1e-14);
            assert!((pr[q] - 3.0).abs() < 1e-14);
        }
    }

    #[test]
    fn four_velocity_edges_subluminal() {
        // A steep 4-velocity ramp cannot push the edge states past the
        // light cone.
        let mut p = vec![0.0; 5 * NCOMP];
        let mut u4 = FourVelocity::zeros(5);
        for c in 0..5 {
            p[c * NCOMP + slot::RHO] = 1.0;
            p[c * NCOMP + slot::PRE] = 1.0;
            let ux = 2.0 * c as f64;
            let w = (1.0 + ux * ux).sqrt();
            p[c * NCOMP + slot::VX] = ux / w;
            u4.set(c, w, ux / w, 0.0, 0.0);
        }

        let mut pl = [0.0; NCOMP];
        let mut pr = [0.0; NCOMP];
        plm_4velocity(
            &p,
            2 * NCOMP,
            NCOMP,
            &u4,
            2,
            1,
            SlopeLimiter::Minmod,
            THETA,
            &mut pl,
            &mut pr,
        );

        let v2_l = pl[slot::VX].powi(2) + pl[slot::VY].powi(2) + pl[slot::VZ].powi(2);
        let v2_r = pr[slot::VX].powi(2) + pr[slot::VY].powi(2) + pr[slot::VZ].powi(2);
        assert!(v2_l < 1.0);
        assert!(v2_r < 1.0);
        // The ramp is monotone, so the edges bracket the cell centers.
        assert!(pl[slot::VX] > p[2 * NCOMP + slot::VX]);
        assert!(pr[slot::VX] < p[3 * NCOMP + slot::VX]);
    }

    #[test]
    fn four_velocity_uniform_flow_unchanged() {
        let mut p = vec![0.0; 5 * NCOMP];
        let mut u4 = FourVelocity::zeros(5);
        let ux: f64 = 4.0;
        let w = (1.0 + ux * ux).sqrt();
        for c in 0..5 {
            p[c * NCOMP + slot::RHO] = 1.0;
            p[c * NCOMP + slot::PRE] = 1.0;
            p[c * NCOMP + slot::VX] = ux / w;
            u4.set(c, w, ux / w, 0.0, 0.0);
        }

        let mut pl = [0.0; NCOMP];
        let mut pr = [0.0; NCOMP];
        plm_4velocity(
            &p,
            2 * NCOMP,
            NCOMP,
            &u4,
            2,
            1,
            SlopeLimiter::Minmod,
            THETA,
            &mut pl,
            &mut pr,
        );
        assert!((pl[slot::VX] - ux / w).abs() < 1e-14);
        assert!((pr[slot::VX] - ux / w).abs() < 1e-14);
    }
}
