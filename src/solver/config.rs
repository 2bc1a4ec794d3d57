//! Solver configuration.
//!
//! All strategy selections are tagged enums evaluated per call; there is
//! no global mode state. A [`SolverConfig`] is cheap to copy and is
//! passed by reference through the point-wise routines, so the same
//! configuration drives both grid sweeps and stand-alone unit tests.

use crate::equations::IdealGas;
use crate::solver::limiters::SlopeLimiter;

/// Riemann solver selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RiemannSolver {
    /// Two-wave HLL solver.
    #[default]
    Hll,
    /// Three-wave HLLC solver with a contact star state.
    Hllc,
}

/// Interface reconstruction selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Reconstruction {
    /// First order: copy cell centers to both edges.
    PiecewiseConstant,
    /// PLM on all eight slots in 3-velocity variables.
    #[default]
    Plm3Velocity,
    /// PLM with the velocity reconstructed in 4-velocity variables,
    /// which keeps edge states subluminal by construction.
    Plm4Velocity,
}

/// Strategy for the quartic wavespeed dispersion relation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QuarticSolver {
    /// Closed-form solution via the resolvent cubic.
    #[default]
    Exact,
    /// Two fixed Newton steps from light-speed seeds.
    Approx1,
    /// Newton iteration to tolerance from light-speed seeds.
    Approx2,
    /// Skip root finding; use the light cone (-1, 1).
    None,
}

/// Complete strategy and parameter set for the solver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverConfig {
    /// Equation of state (adiabatic index).
    pub eos: IdealGas,
    /// PLM steepening parameter theta in [1, 2].
    pub plm_theta: f64,
    /// Riemann solver used at cell faces.
    pub riemann_solver: RiemannSolver,
    /// Interface reconstruction scheme.
    pub reconstruction: Reconstruction,
    /// Slope limiter for PLM reconstruction.
    pub slope_limiter: SlopeLimiter,
    /// Wavespeed quartic strategy.
    pub quartic_solver: QuarticSolver,
    /// Seed the primitive recovery from the conserved state instead of
    /// the previous primitives.
    pub use_estimate: bool,
    /// Print per-iteration Newton diagnostics during recovery.
    pub verbose: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            eos: IdealGas::default(),
            plm_theta: 2.0,
            riemann_solver: RiemannSolver::default(),
            reconstruction: Reconstruction::default(),
            slope_limiter: SlopeLimiter::default(),
            quartic_solver: QuarticSolver::default(),
            use_estimate: false,
            verbose: false,
        }
    }
}

impl SolverConfig {
    /// Default configuration: HLL, PLM 3-velocity, minmod, exact quartic.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the adiabatic index.
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.eos = IdealGas::new(gamma);
        self
    }

    /// Set the PLM steepening parameter.
    pub fn with_plm_theta(mut self, theta: f64) -> Self {
        self.plm_theta = theta;
        self
    }

    /// Select the Riemann solver.
    pub fn with_riemann_solver(mut self, riemann: RiemannSolver) -> Self {
        self.riemann_solver = riemann;
        self
    }

    /// Select the reconstruction scheme.
    pub fn with_reconstruction(mut self, reconstruction: Reconstruction) -> Self {
        self.reconstruction = reconstruction;
        self
    }

    /// Select the slope limiter.
    pub fn with_slope_limiter(mut self, limiter: SlopeLimiter) -> Self {
        self.slope_limiter = limiter;
        self
    }

    /// Select the quartic wavespeed strategy.
    pub fn with_quartic_solver(mut self, quartic: QuarticSolver) -> Self {
        self.quartic_solver = quartic;
        self
    }

    /// Seed primitive recovery from the conserved state.
    pub fn with_estimate(mut self, use_estimate: bool) -> Self {
        self.use_estimate = use_estimate;
        self
    }

    /// Enable per-iteration Newton diagnostics.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
