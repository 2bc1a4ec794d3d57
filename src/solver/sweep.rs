//! One-sided flux field along an axis.
//!
//! `fiph` fills `f` with the face flux stored at the cell on the left
//! of each interior face: `f[i..i+8]` is the flux through the face
//! between cell `i` and cell `i + s`. Faces before the first interior
//! one and past the last are zeroed; the caller's divergence loop never
//! reads them against live data.

use crate::flux::{hll_flux, hllc_flux};
use crate::mesh::Grid;
use crate::solver::reconstruct::{piecewise_constant, plm_3velocity, plm_4velocity, FourVelocity};
use crate::solver::{Reconstruction, RiemannSolver, SolverConfig};
use crate::types::{Axis, Primitive, NCOMP};

/// Sweep one axis, writing the face-flux field into `f`.
///
/// Returns the largest signal speed encountered by the Riemann solves,
/// so concurrent sweeps can each track their own maximum.
pub fn fiph(
    cfg: &SolverConfig,
    grid: &Grid,
    p: &[f64],
    u4: &FourVelocity,
    axis: Axis,
    f: &mut [f64],
) -> f64 {
    let n = grid.len();
    let s = grid.stride(axis);
    let cs = s / NCOMP;

    debug_assert_eq!(p.len(), n);
    debug_assert_eq!(f.len(), n);

    f[..s].fill(0.0);
    f[n - 2 * s..].fill(0.0);

    let mut max_signal: f64 = 0.0;
    let mut pl = [0.0; NCOMP];
    let mut pr = [0.0; NCOMP];

    let mut i = s;
    while i < n - 2 * s {
        match cfg.reconstruction {
            Reconstruction::PiecewiseConstant => piecewise_constant(p, i, s, &mut pl, &mut pr),
            Reconstruction::Plm3Velocity => {
                plm_3velocity(p, i, s, cfg.slope_limiter, cfg.plm_theta, &mut pl, &mut pr)
            }
            Reconstruction::Plm4Velocity => plm_4velocity(
                p,
                i,
                s,
                u4,
                i / NCOMP,
                cs,
                cfg.slope_limiter,
                cfg.plm_theta,
                &mut pl,
                &mut pr,
            ),
        }

        let left = Primitive::from_slice(&pl);
        let right = Primitive::from_slice(&pr);

        let sample = match cfg.riemann_solver {
            RiemannSolver::Hll => hll_flux(cfg, &left, &right, axis, 0.0),
            RiemannSolver::Hllc => hllc_flux(cfg, &left, &right, axis, 0.0),
        };

        f[i..i + NCOMP].copy_from_slice(&sample.f);
        max_signal = max_signal.max(sample.max_signal);

        i += NCOMP;
    }

    max_signal
}
