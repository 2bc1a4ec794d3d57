//! # rmhd-rs
//!
//! A finite-volume backend for the equations of special-relativistic
//! magnetohydrodynamics (RMHD).
//!
//! This crate provides the building blocks for computing dU/dt of the
//! eight conserved RMHD variables on a structured 1D/2D/3D grid:
//! - Ideal-gas equation of state
//! - Primitive-variable recovery (2D Newton inversion with pressure floor)
//! - Characteristic wavespeeds from the quartic dispersion relation
//! - PLM reconstruction in 3-velocity or 4-velocity variables
//! - HLL and HLLC approximate Riemann solvers
//! - Constraint transport keeping the discrete div B fixed
//!
//! Time integration, ghost-zone boundary conditions and I/O belong to
//! the caller: the [`Rmhd`] context takes a conserved-variable array
//! and returns its time derivative plus a per-cell failure report.
//!
//! ```
//! use rmhd_rs::{Grid, Primitive, Rmhd, SolverConfig, NCOMP};
//!
//! let grid = Grid::uniform_1d(16, 1.0);
//! let mut p0 = vec![0.0; grid.len()];
//! for c in 0..grid.n_cells() {
//!     Primitive { rho: 1.0, pre: 1.0, ..Default::default() }
//!         .write(&mut p0[c * NCOMP..(c + 1) * NCOMP]);
//! }
//!
//! let mut solver = Rmhd::new(SolverConfig::new());
//! solver.initialize(&p0, grid, true).unwrap();
//!
//! let mut u = vec![0.0; grid.len()];
//! rmhd_rs::prim_to_cons_array(&solver.config().eos, &p0, &mut u);
//! let mut dudt = vec![0.0; grid.len()];
//! let report = solver.dudt_1d(&u, &mut dudt).unwrap();
//! assert!(report.all_converged());
//! ```

pub mod equations;
pub mod flux;
pub mod mesh;
pub mod solver;
pub mod types;

// Re-export the public surface flat for convenience.
pub use equations::IdealGas;
pub use flux::{flux_and_wavespeeds, hll_flux, hllc_flux, RiemannSample, SignalSpeeds};
pub use mesh::Grid;
pub use solver::{
    cons_to_prim_array, cons_to_prim_point, constraint_transport_2d, constraint_transport_3d,
    fiph, prim_to_cons_array, prim_to_cons_point, FourVelocity, PointRecovery, Quartic,
    QuarticRoots, QuarticSolver, Reconstruction, RecoveryFailure, RecoveryReport, RiemannSolver,
    Rmhd, SlopeLimiter, SolverConfig, SolverError, PRESSURE_FLOOR,
};
pub use types::{slot, Axis, Conserved, FluidField, Primitive, NCOMP};
