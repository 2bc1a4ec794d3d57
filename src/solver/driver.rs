//! The solver context: lifecycle, scratch buffers and the dU/dt
//! operators.
//!
//! An [`Rmhd`] value is the explicit home of everything the solver
//! tracks between calls; there is no process-wide state. It starts in
//! the Dead mode, where only the point-wise conversions and Riemann
//! machinery are usable (enough for unit testing), and becomes Alive
//! when [`Rmhd::initialize`] attaches a grid and allocates scratch: the
//! primitive cache seeding each recovery, three per-axis flux buffers,
//! and the per-cell 4-velocity arrays feeding the 4-velocity
//! reconstruction.

use crate::mesh::Grid;
use crate::solver::ct::{constraint_transport_2d, constraint_transport_3d};
use crate::solver::reconstruct::FourVelocity;
use crate::solver::recovery::{
    cons_to_prim_point, prim_to_cons_point, PointRecovery, RecoveryFailure, RecoveryReport,
};
use crate::solver::sweep::fiph;
use crate::solver::{Reconstruction, SolverConfig, SolverError};
use crate::types::{Axis, Conserved, Primitive, NCOMP};

/// Grid-bound state owned while the solver is Alive.
struct AliveState {
    grid: Grid,
    quiet: bool,
    /// Primitive cache; carries the recovery seeds between calls.
    primitives: Vec<f64>,
    flux_x: Vec<f64>,
    flux_y: Vec<f64>,
    flux_z: Vec<f64>,
    four_velocity: FourVelocity,
}

/// The RMHD solver context.
pub struct Rmhd {
    config: SolverConfig,
    max_lambda: f64,
    newton_iterations: u64,
    alive: Option<AliveState>,
}

impl Rmhd {
    /// Create a solver in the Dead mode.
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            max_lambda: 0.0,
            newton_iterations: 0,
            alive: None,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: SolverConfig) {
        self.config = config;
    }

    /// True once a grid is attached.
    pub fn is_alive(&self) -> bool {
        self.alive.is_some()
    }

    /// Largest signal speed seen since the last reset.
    pub fn max_lambda(&self) -> f64 {
        self.max_lambda
    }

    /// Reset the tracked signal speed (typically once per time step).
    pub fn reset_max_lambda(&mut self) {
        self.max_lambda = 0.0;
    }

    /// Cumulative Newton iterations spent in primitive recoveries.
    pub fn newton_iterations(&self) -> u64 {
        self.newton_iterations
    }

    /// Attach a grid and allocate scratch, copying the caller's
    /// primitive snapshot as the first recovery seed.
    pub fn initialize(&mut self, p0: &[f64], grid: Grid, quiet: bool) -> Result<(), SolverError> {
        if self.alive.is_some() {
            return Err(SolverError::AlreadyInitialized);
        }
        let n = grid.len();
        if p0.len() != n {
            return Err(SolverError::SizeMismatch {
                expected: n,
                actual: p0.len(),
            });
        }

        if !quiet {
            println!("rmhd backend initialized");
            println!(
                "  grid size   ............ ({}, {}, {})",
                grid.nx, grid.ny, grid.nz
            );
            println!(
                "  domain size ............ ({:.1}, {:.1}, {:.1})",
                grid.lx, grid.ly, grid.lz
            );
        }

        self.alive = Some(AliveState {
            grid,
            quiet,
            primitives: p0.to_vec(),
            flux_x: vec![0.0; n],
            flux_y: vec![0.0; n],
            flux_z: vec![0.0; n],
            four_velocity: FourVelocity::zeros(n / NCOMP),
        });
        Ok(())
    }

    /// Release the grid and scratch, returning to the Dead mode.
    pub fn finalize(&mut self) {
        if let Some(alive) = self.alive.take() {
            if !alive.quiet {
                println!("rmhd backend finalized");
            }
        }
    }

    /// Read-only view of the cached primitive array (Alive only).
    pub fn primitives(&self) -> Option<&[f64]> {
        self.alive.as_ref().map(|a| a.primitives.as_slice())
    }

    /// Point-wise primitive-to-conserved conversion.
    pub fn prim_to_cons_point(&self, p: &Primitive) -> Conserved {
        prim_to_cons_point(&self.config.eos, p)
    }

    /// Point-wise conserved-to-primitive recovery; accumulates the
    /// Newton iteration counter.
    pub fn cons_to_prim_point(
        &mut self,
        u: &Conserved,
        p: &mut Primitive,
    ) -> Result<PointRecovery, RecoveryFailure> {
        let rec = cons_to_prim_point(&self.config, u, p)?;
        self.newton_iterations += u64::from(rec.iterations);
        Ok(rec)
    }

    /// dU/dt for a 1D problem. `u` holds the conserved state, `l`
    /// receives the time derivative; slots below the first interior
    /// stride are left untouched for the caller's ghost handling.
    pub fn dudt_1d(&mut self, u: &[f64], l: &mut [f64]) -> Result<RecoveryReport, SolverError> {
        self.dudt(u, l, 1)
    }

    /// dU/dt for a 2D problem, with constraint transport.
    pub fn dudt_2d(&mut self, u: &[f64], l: &mut [f64]) -> Result<RecoveryReport, SolverError> {
        self.dudt(u, l, 2)
    }

    /// dU/dt for a 3D problem, with constraint transport.
    pub fn dudt_3d(&mut self, u: &[f64], l: &mut [f64]) -> Result<RecoveryReport, SolverError> {
        self.dudt(u, l, 3)
    }

    fn dudt(
        &mut self,
        u: &[f64],
        l: &mut [f64],
        dimension: usize,
    ) -> Result<RecoveryReport, SolverError> {
        let config = &self.config;
        let alive = self.alive.as_mut().ok_or(SolverError::NotInitialized)?;
        let n = alive.grid.len();
        if u.len() != n {
            return Err(SolverError::SizeMismatch {
                expected: n,
                actual: u.len(),
            });
        }
        if l.len() != n {
            return Err(SolverError::SizeMismatch {
                expected: n,
                actual: l.len(),
            });
        }

        let report = recover_into_cache(config, alive, u);
        self.newton_iterations += report.newton_iterations;

        let axes = &Axis::ALL[..dimension];
        self.max_lambda = self.max_lambda.max(sweep_axes(config, alive, axes));

        match dimension {
            2 => {
                let AliveState {
                    grid,
                    flux_x,
                    flux_y,
                    ..
                } = alive;
                constraint_transport_2d(grid, flux_x, flux_y);
            }
            3 => {
                let AliveState {
                    grid,
                    flux_x,
                    flux_y,
                    flux_z,
                    ..
                } = alive;
                constraint_transport_3d(grid, flux_x, flux_y, flux_z);
            }
            _ => {}
        }

        let sx = alive.grid.stride(Axis::X);
        let fluxes = [&alive.flux_x, &alive.flux_y, &alive.flux_z];
        let mut strides = [0usize; 3];
        let mut inv_spacing = [0.0f64; 3];
        for &axis in axes {
            strides[axis.index()] = alive.grid.stride(axis);
            inv_spacing[axis.index()] = 1.0 / alive.grid.spacing(axis);
        }
        for i in sx..n {
            let mut div = 0.0;
            for &axis in axes {
                let a = axis.index();
                let f = fluxes[a];
                div -= (f[i] - f[i - strides[a]]) * inv_spacing[a];
            }
            l[i] = div;
        }

        Ok(report)
    }
}

/// Recover primitives for every cell into the Alive cache, seeding from
/// the previous primitives and refreshing the 4-velocity arrays when
/// the 4-velocity reconstruction is selected.
fn recover_into_cache(cfg: &SolverConfig, alive: &mut AliveState, u: &[f64]) -> RecoveryReport {
    let want_u4 = cfg.reconstruction == Reconstruction::Plm4Velocity;
    let mut report = RecoveryReport::default();

    for (c, (uc, pc)) in u
        .chunks_exact(NCOMP)
        .zip(alive.primitives.chunks_exact_mut(NCOMP))
        .enumerate()
    {
        let cons = Conserved::from_slice(uc);
        let mut prim = Primitive::from_slice(pc);
        match cons_to_prim_point(cfg, &cons, &mut prim) {
            Ok(rec) => {
                prim.write(pc);
                report.newton_iterations += u64::from(rec.iterations);
                if want_u4 {
                    alive
                        .four_velocity
                        .set(c, rec.w, prim.vx, prim.vy, prim.vz);
                }
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

/// Run the per-axis flux sweeps, returning the largest signal speed.
#[cfg(not(feature = "parallel"))]
fn sweep_axes(cfg: &SolverConfig, alive: &mut AliveState, axes: &[Axis]) -> f64 {
    let AliveState {
        grid,
        primitives,
        flux_x,
        flux_y,
        flux_z,
        four_velocity,
        ..
    } = alive;

    let mut max_signal: f64 = 0.0;
    for &axis in axes {
        let f = match axis {
            Axis::X => &mut *flux_x,
            Axis::Y => &mut *flux_y,
            Axis::Z => &mut *flux_z,
        };
        max_signal = max_signal.max(fiph(cfg, grid, primitives, four_velocity, axis, f));
    }
    max_signal
}

/// Run the per-axis flux sweeps concurrently; each sweep owns its flux
/// buffer and reports its own maximum signal speed.
#[cfg(feature = "parallel")]
fn sweep_axes(cfg: &SolverConfig, alive: &mut AliveState, axes: &[Axis]) -> f64 {
    let AliveState {
        grid,
        primitives,
        flux_x,
        flux_y,
        flux_z,
        four_velocity,
        ..
    } = alive;
    let grid: &Grid = grid;
    let p: &[f64] = primitives;
    let u4: &FourVelocity = four_velocity;

    match axes.len() {
        1 => fiph(cfg, grid, p, u4, Axis::X, flux_x),
        2 => {
            let (mx, my) = rayon::join(
                || fiph(cfg, grid, p, u4, Axis::X, flux_x),
                || fiph(cfg, grid, p, u4, Axis::Y, flux_y),
            );
            mx.max(my)
        }
        _ => {
            let (mx, (my, mz)) = rayon::join(
                || fiph(cfg, grid, p, u4, Axis::X, flux_x),
                || {
                    rayon::join(
                        || fiph(cfg, grid, p, u4, Axis::Y, flux_y),
                        || fiph(cfg, grid, p, u4, Axis::Z, flux_z),
                    )
                },
            );
            mx.max(my).max(mz)
        }
    }
}
