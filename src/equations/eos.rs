//! Ideal-gas equation of state.
//!
//! Closes the RMHD system with the Gamma-law relations among rest
//! density, gas pressure and specific internal energy. All methods are
//! pure functions of the thermodynamic state.

/// Gamma-law (adiabatic) equation of state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IdealGas {
    /// Adiabatic index Gamma.
    pub gamma: f64,
}

impl Default for IdealGas {
    fn default() -> Self {
        Self { gamma: 1.4 }
    }
}

impl IdealGas {
    /// Create an equation of state with the given adiabatic index.
    pub fn new(gamma: f64) -> Self {
        Self { gamma }
    }

    /// Gas pressure from rest density and specific internal energy:
    /// p = rho e (Gamma - 1).
    #[inline(always)]
    pub fn pressure(&self, rho: f64, sie: f64) -> f64 {
        sie * rho * (self.gamma - 1.0)
    }

    /// Specific internal energy from rest density and pressure:
    /// e = p / (rho (Gamma - 1)).
    #[inline(always)]
    pub fn specific_internal_energy(&self, rho: f64, pre: f64) -> f64 {
        pre / (rho * (self.gamma - 1.0))
    }

    /// Sound speed squared: cs2 = Gamma p / (p + rho + rho e).
    #[inline(always)]
    pub fn sound_speed_squared(&self, rho: f64, pre: f64) -> f64 {
        let e = self.specific_internal_energy(rho, pre);
        self.gamma * pre / (pre + rho + rho * e)
    }

    /// Specific enthalpy h = 1 + e + p / rho.
    #[inline(always)]
    pub fn specific_enthalpy(&self, rho: f64, pre: f64) -> f64 {
        1.0 + self.specific_internal_energy(rho, pre) + pre / rho
    }
}
