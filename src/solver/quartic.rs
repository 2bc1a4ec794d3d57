//! Real roots of a real quartic polynomial.
//!
//! The characteristic wavespeeds of the RMHD system are the roots of a
//! quartic in the wave phase. The exact path factors the quartic into
//! two quadratics through the resolvent cubic (Abramowitz & Stegun,
//! section 3.8); each quadratic contributes either zero or two real
//! roots, so the roots arrive in two pairs. The approximate paths
//! refine a light-speed seed with Newton's method on the normalized
//! polynomial.

/// A real quartic `a4 x^4 + a3 x^3 + a2 x^2 + a1 x + a0`.
#[derive(Clone, Copy, Debug)]
pub struct Quartic {
    a4: f64,
    a3: f64,
    a2: f64,
    a1: f64,
    a0: f64,
}

/// Real roots of a quartic, grouped by quadratic factor.
///
/// `nr12` and `nr34` count the real roots delivered by each factor
/// (0 or 2); slots of a complex pair hold zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct QuarticRoots {
    pub r1: f64,
    pub r2: f64,
    pub r3: f64,
    pub r4: f64,
    pub nr12: u8,
    pub nr34: u8,
}

impl QuarticRoots {
    /// Total number of real roots (0, 2 or 4).
    #[inline]
    pub fn count(&self) -> u8 {
        self.nr12 + self.nr34
    }

    /// Smallest and largest real root.
    ///
    /// With exactly one real pair, that pair alone supplies both
    /// extrema; with two pairs, the extrema range over all four roots.
    /// Returns `None` when every root is complex.
    pub fn extrema(&self) -> Option<(f64, f64)> {
        let max12 = self.r1.max(self.r2);
        let min12 = self.r1.min(self.r2);
        let max34 = self.r3.max(self.r4);
        let min34 = self.r3.min(self.r4);

        match (self.nr12, self.nr34) {
            (0, 0) => None,
            (2, 0) => Some((min12, max12)),
            (0, 2) => Some((min34, max34)),
            _ => Some((min12.min(min34), max12.max(max34))),
        }
    }
}

impl Quartic {
    /// Build a quartic from its coefficients, highest degree first.
    pub fn new(a4: f64, a3: f64, a2: f64, a1: f64, a0: f64) -> Self {
        Self { a4, a3, a2, a1, a0 }
    }

    /// Evaluate the normalized quartic (divided by the leading
    /// coefficient) at `x`.
    #[inline]
    fn eval_normalized(&self, x: f64) -> f64 {
        let (a, b, c, d) = self.normalized();
        (((x + a) * x + b) * x + c) * x + d
    }

    /// Derivative of the normalized quartic at `x`.
    #[inline]
    fn deriv_normalized(&self, x: f64) -> f64 {
        let (a, b, c, _) = self.normalized();
        ((4.0 * x + 3.0 * a) * x + 2.0 * b) * x + c
    }

    #[inline]
    fn normalized(&self) -> (f64, f64, f64, f64) {
        (
            self.a3 / self.a4,
            self.a2 / self.a4,
            self.a1 / self.a4,
            self.a0 / self.a4,
        )
    }

    /// All real roots via the resolvent-cubic factorization.
    pub fn solve_exact(&self) -> QuarticRoots {
        let (a, b, c, d) = self.normalized();

        // Resolvent cubic u^3 - b u^2 + (ac - 4d) u - (a^2 d - 4bd + c^2).
        let u1 = largest_real_cubic_root(-b, a * c - 4.0 * d, -(a * a * d - 4.0 * b * d + c * c));

        let mut roots = QuarticRoots::default();
        let r2 = 0.25 * a * a - b + u1;

        // Squared half-distances between the roots of each quadratic
        // factor; a negative value marks a complex pair.
        let (r, d2, e2) = if r2 > EPS {
            let r = r2.sqrt();
            let t = (4.0 * a * b - 8.0 * c - a * a * a) / (4.0 * r);
            let base = 0.75 * a * a - r2 - 2.0 * b;
            (r, base + t, base - t)
        } else if r2 > -EPS {
            let g = u1 * u1 - 4.0 * d;
            if g < 0.0 {
                return roots;
            }
            let base = 0.75 * a * a - 2.0 * b;
            (0.0, base + 2.0 * g.sqrt(), base - 2.0 * g.sqrt())
        } else {
            return roots;
        };

        let shift = -0.25 * a;
        if d2 >= 0.0 {
            let h = 0.5 * d2.sqrt();
            roots.r1 = shift + 0.5 * r + h;
            roots.r2 = shift + 0.5 * r - h;
            roots.nr12 = 2;
        }
        if e2 >= 0.0 {
            let h = 0.5 * e2.sqrt();
            roots.r3 = shift - 0.5 * r + h;
            roots.r4 = shift - 0.5 * r - h;
            roots.nr34 = 2;
        }
        roots
    }

    /// Two fixed Newton steps from the seed on the normalized quartic.
    pub fn refine_fixed(&self, x0: f64) -> f64 {
        let mut x = x0;
        for _ in 0..2 {
            let df = self.deriv_normalized(x);
            if df == 0.0 {
                break;
            }
            x -= self.eval_normalized(x) / df;
        }
        x
    }

    /// Newton iteration from the seed until the step falls below 1e-10,
    /// capped at ten steps.
    pub fn refine_converged(&self, x0: f64) -> f64 {
        let mut x = x0;
        for _ in 0..10 {
            let df = self.deriv_normalized(x);
            if df == 0.0 {
                break;
            }
            let dx = self.eval_normalized(x) / df;
            x -= dx;
            if dx.abs() < 1e-10 {
                break;
            }
        }
        x
    }
}

const EPS: f64 = 1e-12;

/// Largest real root of the monic cubic `x^3 + p x^2 + q x + r`.
fn largest_real_cubic_root(p: f64, q: f64, r: f64) -> f64 {
    // Depressed form t^3 + pt t + qt with x = t - p/3.
    let pt = q - p * p / 3.0;
    let qt = 2.0 * p * p * p / 27.0 - p * q / 3.0 + r;

    let half = 0.5 * qt;
    let third = pt / 3.0;
    let disc = half * half + third * third * third;

    if disc > 0.0 {
        let sq = disc.sqrt();
        (-half + sq).cbrt() + (-half - sq).cbrt() - p / 3.0
    } else {
        let t0 = (-third).max(0.0).sqrt();
        if t0 < EPS {
            // Triple root.
            -p / 3.0
        } else {
            let phi = (-half / (t0 * t0 * t0)).clamp(-1.0, 1.0).acos();
            2.0 * t0 * (phi / 3.0).cos() - p / 3.0
        }
    }
}
