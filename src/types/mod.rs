//! Strongly-typed views over the flat cell data.
//!
//! The solver keeps all bulk data in flat `[f64]` buffers with eight
//! slots per cell (the external wire format); these types confine the
//! index arithmetic to a few well-tested places:
//!
//! - [`Conserved`] / [`Primitive`]: typed views of one cell
//! - [`Axis`]: explicit axis selector for flux, reconstruction and sweeps
//! - [`slot`]: the fixed slot order of the flat layout

mod axis;
mod state;

pub use axis::Axis;
pub use state::{slot, Conserved, FluidField, Primitive, NCOMP};
