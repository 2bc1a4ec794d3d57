//! Error types for the solver driver.

use thiserror::Error;

/// Errors raised by the grid-level entry points.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverError {
    /// A dU/dt operator was invoked without an attached grid.
    #[error("dU/dt requires an initialized grid; call initialize first")]
    NotInitialized,

    /// `initialize` was called while a grid is already attached.
    #[error("solver already owns a grid; call finalize first")]
    AlreadyInitialized,

    /// A caller buffer does not match the grid layout.
    #[error("buffer holds {actual} doubles but the grid requires {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}
