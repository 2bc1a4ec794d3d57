//! Physical RMHD flux and characteristic signal speeds.
//!
//! The flux of the eight conserved quantities along one axis follows
//! directly from the stress-energy tensor and the induction equation.
//! The fastest left- and right-going signal speeds are the outermost
//! roots of a quartic dispersion relation in the wave phase, built from
//! the fluid-frame field and the sound speed (Anile 1989).

use crate::equations::IdealGas;
use crate::solver::{Quartic, QuarticSolver};
use crate::types::{slot, Axis, Conserved, Primitive, NCOMP};

/// Fastest left-going (`minus`) and right-going (`plus`) signal speeds
/// at a point, in units of the speed of light.
#[derive(Clone, Copy, Debug)]
pub struct SignalSpeeds {
    pub minus: f64,
    pub plus: f64,
}

impl SignalSpeeds {
    /// The light cone, used whenever root finding is skipped or
    /// distrusted.
    pub const LIGHT_CONE: SignalSpeeds = SignalSpeeds {
        minus: -1.0,
        plus: 1.0,
    };

    /// Largest absolute signal speed.
    #[inline]
    pub fn max_abs(&self) -> f64 {
        self.minus.abs().max(self.plus.abs())
    }
}

/// Physical flux vector and signal speeds along `axis`.
///
/// `u` and `p` must describe the same state. Any root with |a| > 1 is
/// distrusted and the whole pair falls back to the light cone.
pub fn flux_and_wavespeeds(
    eos: &IdealGas,
    mode: QuarticSolver,
    u: &Conserved,
    p: &Primitive,
    axis: Axis,
) -> ([f64; NCOMP], SignalSpeeds) {
    let ff = p.fluid_field();
    let w = ff.w;
    let b0 = ff.b0;
    let p_star = ff.total_pressure(p.pre);

    let t1 = axis.next();
    let t2 = t1.next();

    let vn = p.velocity(axis);
    let bn_lab = p.field(axis);
    let bn = ff.b[axis.index()];

    let mut f = [0.0; NCOMP];
    f[slot::DDD] = u.d * vn;
    f[slot::TAU] = u.tau * vn - b0 * bn_lab / w + p_star * vn;
    f[axis.momentum_slot()] = u.momentum(axis) * vn - bn * bn_lab / w + p_star;
    f[t1.momentum_slot()] = u.momentum(t1) * vn - ff.b[t1.index()] * bn_lab / w;
    f[t2.momentum_slot()] = u.momentum(t2) * vn - ff.b[t2.index()] * bn_lab / w;
    f[axis.field_slot()] = 0.0;
    f[t1.field_slot()] = vn * p.field(t1) - p.velocity(t1) * bn_lab;
    f[t2.field_slot()] = vn * p.field(t2) - p.velocity(t2) * bn_lab;

    let speeds = wavespeeds(eos, mode, p, vn, bn, b0, ff.b2, w);
    (f, speeds)
}

/// Outermost roots of the dispersion quartic along the active axis.
#[allow(clippy::too_many_arguments)]
fn wavespeeds(
    eos: &IdealGas,
    mode: QuarticSolver,
    p: &Primitive,
    vn: f64,
    bn: f64,
    b0: f64,
    b2: f64,
    w: f64,
) -> SignalSpeeds {
    if mode == QuarticSolver::None {
        return SignalSpeeds::LIGHT_CONE;
    }

    let w2 = w * w;
    let w4 = w2 * w2;
    let cs2 = eos.sound_speed_squared(p.rho, p.pre);
    let rho_h = p.rho * eos.specific_enthalpy(p.rho, p.pre);

    let v2 = vn * vn;
    let v3 = vn * v2;
    let v4 = vn * v3;

    let k = rho_h * (1.0 / cs2 - 1.0) * w4;
    let l = -(rho_h + b2 / cs2) * w2;

    let a4 = k - l - b0 * b0;
    let a3 = -4.0 * k * vn + 2.0 * l * vn + 2.0 * b0 * bn;
    let a2 = 6.0 * k * v2 + l * (1.0 - v2) + b0 * b0 - bn * bn;
    let a1 = -4.0 * k * v3 - 2.0 * l * vn - 2.0 * b0 * bn;
    let a0 = k * v4 + l * v2 + bn * bn;

    let quartic = Quartic::new(a4, a3, a2, a1, a0);

    let speeds = match mode {
        QuarticSolver::Exact => match quartic.solve_exact().extrema() {
            Some((minus, plus)) => SignalSpeeds { minus, plus },
            None => return SignalSpeeds::LIGHT_CONE,
        },
        QuarticSolver::Approx1 => SignalSpeeds {
            minus: quartic.refine_fixed(-1.0),
            plus: quartic.refine_fixed(1.0),
        },
        QuarticSolver::Approx2 => SignalSpeeds {
            minus: quartic.refine_converged(-1.0),
            plus: quartic.refine_converged(1.0),
        },
        QuarticSolver::None => unreachable!(),
    };

    // The negated form also routes NaN from a degenerate quartic into
    // the light cone.
    if !(speeds.plus.abs() <= 1.0 && speeds.minus.abs() <= 1.0) {
        SignalSpeeds::LIGHT_CONE
    } else {
        speeds
    }
}
