//! HLL (Harten-Lax-van Leer) approximate Riemann solver.
//!
//! The two-wave approximation replaces the full Riemann fan by a single
//! constant state between the fastest left- and right-going signals:
//!
//! F* = (a+ F_l - a- F_r + a+ a- (U_r - U_l)) / (a+ - a-)
//!
//! It is robust for strong shocks but diffuses contact discontinuities;
//! the HLLC solver in this crate restores those.
//!
//! Reference: Toro, "Riemann Solvers and Numerical Methods for Fluid
//! Dynamics".

use crate::solver::recovery::prim_to_cons_point;
use crate::solver::SolverConfig;
use crate::types::{Axis, Primitive, NCOMP};

use super::rmhd::flux_and_wavespeeds;

/// Conserved state and flux sampled from a Riemann fan at one speed,
/// plus the largest signal speed the solve encountered.
#[derive(Clone, Copy, Debug)]
pub struct RiemannSample {
    /// Sampled conserved state.
    pub u: [f64; NCOMP],
    /// Sampled flux.
    pub f: [f64; NCOMP],
    /// max(|a+|, |a-|) over the fan.
    pub max_signal: f64,
}

/// Everything both Riemann solvers need about the two edge states.
pub(super) struct FanEdges {
    pub ul: [f64; NCOMP],
    pub ur: [f64; NCOMP],
    pub fl: [f64; NCOMP],
    pub fr: [f64; NCOMP],
    pub am: f64,
    pub ap: f64,
}

impl FanEdges {
    pub fn evaluate(cfg: &SolverConfig, pl: &Primitive, pr: &Primitive, axis: Axis) -> Self {
        let ul = prim_to_cons_point(&cfg.eos, pl);
        let ur = prim_to_cons_point(&cfg.eos, pr);

        let (fl, sl) = flux_and_wavespeeds(&cfg.eos, cfg.quartic_solver, &ul, pl, axis);
        let (fr, sr) = flux_and_wavespeeds(&cfg.eos, cfg.quartic_solver, &ur, pr, axis);

        Self {
            ul: ul.to_array(),
            ur: ur.to_array(),
            fl,
            fr,
            am: sl.minus.min(sr.minus),
            ap: sl.plus.max(sr.plus),
        }
    }

    /// The constant state and flux spanning the fan.
    pub fn hll_average(&self) -> ([f64; NCOMP], [f64; NCOMP]) {
        let mut u = [0.0; NCOMP];
        let mut f = [0.0; NCOMP];
        let inv = 1.0 / (self.ap - self.am);
        for i in 0..NCOMP {
            u[i] = (self.ap * self.ur[i] - self.am * self.ul[i] + (self.fl[i] - self.fr[i])) * inv;
            f[i] = (self.ap * self.fl[i] - self.am * self.fr[i]
                + self.ap * self.am * (self.ur[i] - self.ul[i]))
                * inv;
        }
        (u, f)
    }

    #[inline]
    pub fn max_signal(&self) -> f64 {
        self.am.abs().max(self.ap.abs())
    }
}

/// HLL flux between two edge states, sampled at speed `s` (s = 0 gives
/// the face-centered flux).
pub fn hll_flux(
    cfg: &SolverConfig,
    pl: &Primitive,
    pr: &Primitive,
    axis: Axis,
    s: f64,
) -> RiemannSample {
    let edges = FanEdges::evaluate(cfg, pl, pr, axis);
    let max_signal = edges.max_signal();

    let (u, f) = if s <= edges.am {
        (edges.ul, edges.fl)
    } else if s <= edges.ap {
        edges.hll_average()
    } else {
        (edges.ur, edges.fr)
    };

    RiemannSample { u, f, max_signal }
}
