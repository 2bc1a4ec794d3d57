//! Slope limiters for PLM reconstruction.
//!
//! Each limiter maps a three-cell stencil (u_l, u_0, u_r) to a limited
//! slope across the center cell. All of them return zero at a local
//! extremum, which is what keeps the reconstruction total-variation
//! stable near shocks.

/// Sign function with sign(0) = 0.
#[inline(always)]
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[inline(always)]
fn min3(a: f64, b: f64, c: f64) -> f64 {
    a.min(b).min(c)
}

/// Slope limiter selection.
///
/// Dispatch is a match per face; the cost is negligible against the
/// Newton loops in the primitive recovery.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SlopeLimiter {
    /// Generalized (theta-weighted) minmod.
    #[default]
    Minmod,
    /// Monotonized central difference.
    MonotonizedCentral,
    /// Harmonic mean of the one-sided differences (van Leer).
    HarmonicMean,
}

impl SlopeLimiter {
    /// Limited slope across the center of the stencil.
    ///
    /// `theta` steepens the minmod limiter (1 = most dissipative,
    /// 2 = least); the other limiters ignore it.
    #[inline(always)]
    pub fn apply(self, theta: f64, ul: f64, u0: f64, ur: f64) -> f64 {
        match self {
            SlopeLimiter::Minmod => {
                let a = theta * (u0 - ul);
                let b = 0.5 * (ur - ul);
                let c = theta * (ur - u0);
                0.25 * (sign(a) + sign(b)).abs()
                    * (sign(a) + sign(c))
                    * min3(a.abs(), b.abs(), c.abs())
            }
            SlopeLimiter::MonotonizedCentral => {
                let qp = ur - u0;
                let qm = u0 - ul;
                let s = 0.5 * (sign(qp) + sign(qm));
                s * min3(2.0 * qp.abs(), 2.0 * qm.abs(), 0.5 * (ur - ul).abs())
            }
            SlopeLimiter::HarmonicMean => {
                let qp = ur - u0;
                let qm = u0 - ul;
                let num = qp * qm;
                if num > 0.0 {
                    2.0 * num / (qp + qm)
                } else {
                    0.0
                }
            }
        }
    }

    /// Short name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            SlopeLimiter::Minmod => "minmod",
            SlopeLimiter::MonotonizedCentral => "mc",
            SlopeLimiter::HarmonicMean => "harmonic",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THETA: f64 = 2.0;
    const TOL: f64 = 1e-14;

    const ALL: [SlopeLimiter; 3] = [
        SlopeLimiter::Minmod,
        SlopeLimiter::MonotonizedCentral,
        SlopeLimiter::HarmonicMean,
    ];

    #[test]
    fn zero_on_uniform_data() {
        for lim in ALL {
            for &u in &[-3.0, 0.0, 1.7] {
                assert!(
                    lim.apply(THETA, u, u, u).abs() < TOL,
                    "{} not zero at uniform {u}",
                    lim.name()
                );
            }
        }
    }

    #[test]
    fn zero_at_extrema() {
        // Differences of opposite sign must kill the slope.
        for lim in ALL {
            assert!(lim.apply(THETA, 0.0, 1.0, 0.0).abs() < TOL, "{}", lim.name());
            assert!(lim.apply(THETA, 1.0, 0.0, 1.0).abs() < TOL, "{}", lim.name());
        }
    }

    #[test]
    fn linear_data_exact_slope() {
        // On linear data every limiter returns the exact slope.
        for lim in ALL {
            let s = lim.apply(THETA, 1.0, 2.0, 3.0);
            assert!((s - 1.0).abs() < TOL, "{} gave {s}", lim.name());
            let s = lim.apply(THETA, 3.0, 1.0, -1.0);
            assert!((s + 2.0).abs() < TOL, "{} gave {s}", lim.name());
        }
    }

    #[test]
    fn minmod_picks_smallest_difference() {
        // Steep jump on the right: the left difference bounds the slope.
        let s = SlopeLimiter::Minmod.apply(1.0, 0.0, 0.1, 10.0);
        assert!((s - 0.1).abs() < TOL);
    }

    #[test]
    fn harmonic_mean_swap_symmetry() {
        // Swapping u_l and u_r flips both one-sided differences, leaving
        // the magnitude unchanged up to the sign of the denominator.
        let (ul, u0, ur) = (1.0, 2.0, 4.0);
        let a = SlopeLimiter::HarmonicMean.apply(THETA, ul, u0, ur);
        let b = SlopeLimiter::HarmonicMean.apply(THETA, ur, u0, ul);
        assert!((a + b).abs() < TOL);
    }

    #[test]
    fn harmonic_mean_no_division_blowup() {
        // u_r = u_l makes the denominator vanish; the limited slope is 0.
        let s = SlopeLimiter::HarmonicMean.apply(THETA, 1.0, 2.0, 1.0);
        assert!(s.abs() < TOL);
        assert!(s.is_finite());
    }

    #[test]
    fn mc_central_difference_bound() {
        // Gentle monotone data: the 0.5 |ur - ul| bound is the active one
        // and equals the central difference.
        let s = SlopeLimiter::MonotonizedCentral.apply(THETA, 0.0, 1.0, 2.0);
        assert!((s - 1.0).abs() < TOL);
    }
}
