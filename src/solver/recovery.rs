//! Conversions between conserved and primitive variables.
//!
//! The forward map P -> U is closed form. The inverse is a
//! two-dimensional Newton iteration in (Z, W) = (rho h W^2, Lorentz
//! factor), following Noble et al. (2006): two residuals built from the
//! momentum and energy constraints, an analytic Jacobian inverted in
//! closed form, and a pressure floor that re-seeds the iteration when
//! the recovered pressure falls below it.

use thiserror::Error;

use crate::equations::IdealGas;
use crate::solver::SolverConfig;
use crate::types::{Conserved, Primitive, NCOMP};

/// Smallest pressure the recovery will report.
pub const PRESSURE_FLOOR: f64 = 1e-10;

const ERROR_TOL: f64 = 1e-6;
const NEWTON_MAX_ITER: u32 = 25;
const BIG_Z: f64 = 1e20;
const BIG_W: f64 = 1e12;

/// Outcome of one successful point recovery.
#[derive(Clone, Copy, Debug)]
pub struct PointRecovery {
    /// Converged Lorentz factor; feeds the 4-velocity reconstruction.
    pub w: f64,
    /// Newton iterations spent (after the last re-seed).
    pub iterations: u32,
    /// True if the pressure floor had to be engaged.
    pub floored: bool,
}

/// A cell whose Newton iteration failed even after the pressure-floor
/// retry.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("primitive recovery did not converge (Z = {z:.6e}, W = {w:.6e})")]
pub struct RecoveryFailure {
    /// Last iterate of Z = rho h W^2.
    pub z: f64,
    /// Last iterate of the Lorentz factor.
    pub w: f64,
}

/// Aggregate result of an array recovery.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecoveryReport {
    /// Number of cells that failed to converge.
    pub failures: usize,
    /// Cell index of the first failure, if any.
    pub first_failure: Option<usize>,
    /// Total Newton iterations spent over all cells.
    pub newton_iterations: u64,
}

impl RecoveryReport {
    /// True when every cell converged.
    pub fn all_converged(&self) -> bool {
        self.failures == 0
    }

    /// Fold another report into this one, offsetting cell indices.
    pub fn merge(&mut self, other: &RecoveryReport, cell_offset: usize) {
        self.failures += other.failures;
        if self.first_failure.is_none() {
            self.first_failure = other.first_failure.map(|i| i + cell_offset);
        }
        self.newton_iterations += other.newton_iterations;
    }
}

/// Closed-form map from primitive to conserved variables.
pub fn prim_to_cons_point(eos: &IdealGas, p: &Primitive) -> Conserved {
    let ff = p.fluid_field();
    let w = ff.w;
    let w2 = w * w;
    let b0 = ff.b0;
    let [bx, by, bz] = ff.b;

    let e = eos.specific_internal_energy(p.rho, p.pre);
    let e_star = e + 0.5 * ff.b2 / p.rho;
    let p_star = p.pre + 0.5 * ff.b2;
    let h_star = 1.0 + e_star + p_star / p.rho;

    let d = p.rho * w;
    let rhw2 = p.rho * h_star * w2;

    Conserved {
        d,
        tau: rhw2 - p_star - b0 * b0 - d,
        sx: rhw2 * p.vx - b0 * bx,
        sy: rhw2 * p.vy - b0 * by,
        sz: rhw2 * p.vz - b0 * bz,
        bx: p.bx,
        by: p.by,
        bz: p.bz,
    }
}

/// Apply [`prim_to_cons_point`] to every cell of a flat array.
pub fn prim_to_cons_array(eos: &IdealGas, p: &[f64], u: &mut [f64]) {
    assert_eq!(p.len(), u.len());
    assert_eq!(p.len() % NCOMP, 0);

    for (pc, uc) in p.chunks_exact(NCOMP).zip(u.chunks_exact_mut(NCOMP)) {
        prim_to_cons_point(eos, &Primitive::from_slice(pc)).write(uc);
    }
}

/// Invert the conserved-to-primitive map for one cell.
///
/// `p` supplies the initial guess (unless `use_estimate` is set in the
/// configuration) and receives the recovered primitives on success. On
/// failure `p` is left untouched.
pub fn cons_to_prim_point(
    cfg: &SolverConfig,
    u: &Conserved,
    p: &mut Primitive,
) -> Result<PointRecovery, RecoveryFailure> {
    let gamf = (cfg.eos.gamma - 1.0) / cfg.eos.gamma;
    let d = u.d;
    let tau = u.tau;
    let s2 = u.s2();
    let b2 = u.b2();
    let bs = u.sdotb();
    let bs2 = bs * bs;

    // Seeds: either estimated from the conserved state (h ~ 1) or taken
    // from the caller's primitive guess.
    let w_guess;
    let z_guess;
    if cfg.use_estimate {
        w_guess = (s2 / (d * d) + 1.0).sqrt();
        z_guess = d * w_guess;
    } else {
        let h = cfg.eos.specific_enthalpy(p.rho, p.pre);
        w_guess = p.lorentz_factor();
        z_guess = p.rho * h * w_guess * w_guess;
    }

    let mut w = w_guess;
    let mut z = z_guess;
    let mut use_floor = false;
    let mut n_iter: u32 = 0;

    loop {
        let z2 = z * z;
        let z3 = z * z2;
        let w2 = w * w;
        let w3 = w * w2;

        let pre = if use_floor {
            PRESSURE_FLOOR
        } else {
            (d / w) * (z / (d * w) - 1.0) * gamf
        };

        let f1 = -s2 + (z + b2) * (z + b2) * (w2 - 1.0) / w2 - (2.0 * z + b2) * bs2 / z2;
        let f2 = -tau + z + b2 - pre - 0.5 * b2 / w2 - 0.5 * bs2 / z2 - d;

        let df1_dz = 2.0 * (b2 + z) * (bs2 * w2 + (w2 - 1.0) * z3) / (w2 * z3);
        let df1_dw = 2.0 * (b2 + z) * (b2 + z) / w3;
        let df2_dz = 1.0 + bs2 / z3 - gamf / w2;
        let df2_dw = b2 / w3 + (2.0 * z - d * w) / w3 * gamf;

        // Closed-form inverse of the 2x2 Jacobian.
        let det = df1_dz * df2_dw - df1_dw * df2_dz;
        let dz = (df2_dw * f1 - df1_dw * f2) / det;
        let dw = (-df2_dz * f1 + df1_dz * f2) / det;

        let mut z_new = z - dz;
        let mut w_new = w - dw;

        z_new = if z_new > 0.0 { z_new } else { -z_new };
        z_new = if z_new < BIG_Z { z_new } else { z };
        w_new = w_new.clamp(1.0, BIG_W);

        z = z_new;
        w = w_new;

        if cfg.verbose {
            println!(
                "newton iteration {n_iter}: p = {pre:12.6e}, W = {w:12.6e}, Z = {z:12.6e}, \
                 f1 = {f1:12.6e}, f2 = {f2:12.6e}"
            );
        }

        if (dz / z).abs() + (dw / w).abs() < ERROR_TOL {
            if pre >= PRESSURE_FLOOR {
                break;
            }
            // Converged onto an unphysical pressure: engage the floor
            // and restart from a fresh seed.
            use_floor = true;
            n_iter = 0;
            w = w_guess;
            z = z_guess;
            continue;
        }

        n_iter += 1;
        if n_iter > NEWTON_MAX_ITER {
            if use_floor {
                return Err(RecoveryFailure { z, w });
            }
            use_floor = true;
            n_iter = 0;
            w = w_guess;
            z = z_guess;
        }
    }

    let b0 = bs * w / z;
    let inv_zb = 1.0 / (z + b2);

    p.rho = d / w;
    p.pre = if use_floor {
        PRESSURE_FLOOR
    } else {
        (d / w) * (z / (d * w) - 1.0) * gamf
    };
    p.vx = (u.sx + b0 * u.bx / w) * inv_zb;
    p.vy = (u.sy + b0 * u.by / w) * inv_zb;
    p.vz = (u.sz + b0 * u.bz / w) * inv_zb;
    p.bx = u.bx;
    p.by = u.by;
    p.bz = u.bz;

    Ok(PointRecovery {
        w,
        iterations: n_iter,
        floored: use_floor,
    })
}

/// Recover primitives for every cell of a flat array.
///
/// `p` carries the per-cell guesses in and the recovered primitives
/// out; failed cells keep their guess and are counted in the report.
pub fn cons_to_prim_array(cfg: &SolverConfig, u: &[f64], p: &mut [f64]) -> RecoveryReport {
    assert_eq!(p.len(), u.len());
    assert_eq!(p.len() % NCOMP, 0);

    let mut report = RecoveryReport::default();
    for (c, (uc, pc)) in u
        .chunks_exact(NCOMP)
        .zip(p.chunks_exact_mut(NCOMP))
        .enumerate()
    {
        let cons = Conserved::from_slice(uc);
        let mut prim = Primitive::from_slice(pc);
        match cons_to_prim_point(cfg, &cons, &mut prim) {
            Ok(rec) => {
                prim.write(pc);
                report.newton_iterations += u64::from(rec.iterations);
            }
            Err(_) => {
                report.failures += 1;
                if report.first_failure.is_none() {
                    report.first_failure = Some(c);
                }
            }
        }
    }
    report
}
