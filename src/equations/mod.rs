//! Thermodynamic closure of the RMHD system.

mod eos;

pub use eos::IdealGas;
