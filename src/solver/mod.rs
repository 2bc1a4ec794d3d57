//! Solver components.
//!
//! # Submodules
//!
//! - [`config`]: strategy selection and physical parameters
//! - [`quartic`]: exact and approximate quartic root finding
//! - [`limiters`]: slope limiters for PLM reconstruction
//! - [`recovery`]: conserved <-> primitive conversions
//! - [`reconstruct`]: interface reconstruction (3-velocity, 4-velocity)
//! - [`sweep`]: one-sided flux field along an axis
//! - [`ct`]: constraint transport for the magnetic field
//! - [`driver`]: the [`Rmhd`] context, lifecycle and dU/dt operators

pub mod config;
pub mod ct;
pub mod driver;
pub mod error;
pub mod limiters;
pub mod quartic;
pub mod reconstruct;
pub mod recovery;
pub mod sweep;

pub use config::{QuarticSolver, Reconstruction, RiemannSolver, SolverConfig};
pub use ct::{constraint_transport_2d, constraint_transport_3d};
pub use driver::Rmhd;
pub use error::SolverError;
pub use limiters::SlopeLimiter;
pub use quartic::{Quartic, QuarticRoots};
pub use reconstruct::FourVelocity;
pub use recovery::{
    cons_to_prim_array, cons_to_prim_point, prim_to_cons_array, prim_to_cons_point,
    PointRecovery, RecoveryFailure, RecoveryReport, PRESSURE_FLOOR,
};
pub use sweep::fiph;
