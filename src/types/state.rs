//! Cell state vectors for the eight-component RMHD system.
//!
//! Every cell carries exactly eight doubles. The same three trailing slots
//! hold the magnetic field in both representations:
//!
//! - Conserved: (D, tau, Sx, Sy, Sz, Bx, By, Bz)
//! - Primitive: (rho, pre, vx, vy, vz, Bx, By, Bz)
//!
//! Flat arrays of `NCOMP` doubles per cell are the wire format shared with
//! external callers; [`Conserved`] and [`Primitive`] are the typed views
//! used by the point-wise routines.

use std::ops::{Add, Mul, Sub};

use super::Axis;

/// Number of doubles per cell.
pub const NCOMP: usize = 8;

/// Slot indices into the flat 8-double cell layout.
///
/// The first five slots are interpretation-dependent (conserved vs
/// primitive); the magnetic field always lives in the last three.
pub mod slot {
    /// Rest-mass density times Lorentz factor (conserved).
    pub const DDD: usize = 0;
    /// Total energy minus D (conserved).
    pub const TAU: usize = 1;
    /// Momentum components (conserved).
    pub const SX: usize = 2;
    pub const SY: usize = 3;
    pub const SZ: usize = 4;

    /// Rest density (primitive).
    pub const RHO: usize = 0;
    /// Gas pressure (primitive).
    pub const PRE: usize = 1;
    /// 3-velocity components (primitive).
    pub const VX: usize = 2;
    pub const VY: usize = 3;
    pub const VZ: usize = 4;

    /// Magnetic field components (shared).
    pub const BX: usize = 5;
    pub const BY: usize = 6;
    pub const BZ: usize = 7;
}

/// Conserved state of one cell: (D, tau, S, B).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Conserved {
    /// Rest-mass density times Lorentz factor.
    pub d: f64,
    /// Total energy minus D.
    pub tau: f64,
    /// Momentum density.
    pub sx: f64,
    pub sy: f64,
    pub sz: f64,
    /// Magnetic field.
    pub bx: f64,
    pub by: f64,
    pub bz: f64,
}

impl Conserved {
    /// Read a conserved state from the first `NCOMP` entries of a slice.
    #[inline(always)]
    pub fn from_slice(s: &[f64]) -> Self {
        Self {
            d: s[slot::DDD],
            tau: s[slot::TAU],
            sx: s[slot::SX],
            sy: s[slot::SY],
            sz: s[slot::SZ],
            bx: s[slot::BX],
            by: s[slot::BY],
            bz: s[slot::BZ],
        }
    }

    /// Convert to flat array representation.
    #[inline(always)]
    pub fn to_array(&self) -> [f64; NCOMP] {
        [
            self.d, self.tau, self.sx, self.sy, self.sz, self.bx, self.by, self.bz,
        ]
    }

    /// Write into the first `NCOMP` entries of a slice.
    #[inline(always)]
    pub fn write(&self, out: &mut [f64]) {
        out[..NCOMP].copy_from_slice(&self.to_array());
    }

    /// Momentum component along an axis.
    #[inline(always)]
    pub fn momentum(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.sx,
            Axis::Y => self.sy,
            Axis::Z => self.sz,
        }
    }

    /// Magnetic field component along an axis.
    #[inline(always)]
    pub fn field(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.bx,
            Axis::Y => self.by,
            Axis::Z => self.bz,
        }
    }

    /// Squared momentum S·S.
    #[inline(always)]
    pub fn s2(&self) -> f64 {
        self.sx * self.sx + self.sy * self.sy + self.sz * self.sz
    }

    /// Squared magnetic field B·B.
    #[inline(always)]
    pub fn b2(&self) -> f64 {
        self.bx * self.bx + self.by * self.by + self.bz * self.bz
    }

    /// Inner product B·S.
    #[inline(always)]
    pub fn sdotb(&self) -> f64 {
        self.bx * self.sx + self.by * self.sy + self.bz * self.sz
    }
}

impl Add for Conserved {
    type Output = Self;

    fn add(self, o: Self) -> Self {
        Self {
            d: self.d + o.d,
            tau: self.tau + o.tau,
            sx: self.sx + o.sx,
            sy: self.sy + o.sy,
            sz: self.sz + o.sz,
            bx: self.bx + o.bx,
            by: self.by + o.by,
            bz: self.bz + o.bz,
        }
    }
}

impl Sub for Conserved {
    type Output = Self;

    fn sub(self, o: Self) -> Self {
        Self {
            d: self.d - o.d,
            tau: self.tau - o.tau,
            sx: self.sx - o.sx,
            sy: self.sy - o.sy,
            sz: self.sz - o.sz,
            bx: self.bx - o.bx,
            by: self.by - o.by,
            bz: self.bz - o.bz,
        }
    }
}

impl Mul<f64> for Conserved {
    type Output = Self;

    fn mul(self, k: f64) -> Self {
        Self {
            d: self.d * k,
            tau: self.tau * k,
            sx: self.sx * k,
            sy: self.sy * k,
            sz: self.sz * k,
            bx: self.bx * k,
            by: self.by * k,
            bz: self.bz * k,
        }
    }
}

/// Primitive state of one cell: (rho, p, v, B).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Primitive {
    /// Rest density.
    pub rho: f64,
    /// Gas pressure.
    pub pre: f64,
    /// 3-velocity.
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
    /// Magnetic field.
    pub bx: f64,
    pub by: f64,
    pub bz: f64,
}

impl Primitive {
    /// Read a primitive state from the first `NCOMP` entries of a slice.
    #[inline(always)]
    pub fn from_slice(s: &[f64]) -> Self {
        Self {
            rho: s[slot::RHO],
            pre: s[slot::PRE],
            vx: s[slot::VX],
            vy: s[slot::VY],
            vz: s[slot::VZ],
            bx: s[slot::BX],
            by: s[slot::BY],
            bz: s[slot::BZ],
        }
    }

    /// Convert to flat array representation.
    #[inline(always)]
    pub fn to_array(&self) -> [f64; NCOMP] {
        [
            self.rho, self.pre, self.vx, self.vy, self.vz, self.bx, self.by, self.bz,
        ]
    }

    /// Write into the first `NCOMP` entries of a slice.
    #[inline(always)]
    pub fn write(&self, out: &mut [f64]) {
        out[..NCOMP].copy_from_slice(&self.to_array());
    }

    /// Velocity component along an axis.
    #[inline(always)]
    pub fn velocity(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.vx,
            Axis::Y => self.vy,
            Axis::Z => self.vz,
        }
    }

    /// Magnetic field component along an axis.
    #[inline(always)]
    pub fn field(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.bx,
            Axis::Y => self.by,
            Axis::Z => self.bz,
        }
    }

    /// Squared 3-velocity v·v. Must stay below 1 for a physical state.
    #[inline(always)]
    pub fn v2(&self) -> f64 {
        self.vx * self.vx + self.vy * self.vy + self.vz * self.vz
    }

    /// Squared magnetic field B·B.
    #[inline(always)]
    pub fn b2(&self) -> f64 {
        self.bx * self.bx + self.by * self.by + self.bz * self.bz
    }

    /// Inner product B·v.
    #[inline(always)]
    pub fn vdotb(&self) -> f64 {
        self.bx * self.vx + self.by * self.vy + self.bz * self.vz
    }

    /// Lorentz factor W = 1/sqrt(1 - v·v).
    #[inline(always)]
    pub fn lorentz_factor(&self) -> f64 {
        1.0 / (1.0 - self.v2()).sqrt()
    }

    /// Project the lab-frame field into the fluid frame.
    pub fn fluid_field(&self) -> FluidField {
        let w = self.lorentz_factor();
        let b0 = w * self.vdotb();
        let b2 = (self.b2() + b0 * b0) / (w * w);
        let b = [
            (self.bx + b0 * w * self.vx) / w,
            (self.by + b0 * w * self.vy) / w,
            (self.bz + b0 * w * self.vz) / w,
        ];
        FluidField { w, b0, b, b2 }
    }
}

/// Magnetic field seen in the fluid rest frame: the time component b0,
/// the spatial components b, and the invariant b·b, together with the
/// Lorentz factor they were computed at.
#[derive(Clone, Copy, Debug)]
pub struct FluidField {
    /// Lorentz factor of the fluid.
    pub w: f64,
    /// Time component b0 = W (B·v).
    pub b0: f64,
    /// Spatial components b^i = (B^i + b0 W v^i) / W.
    pub b: [f64; 3],
    /// Invariant b·b = (B·B + b0²) / W².
    pub b2: f64,
}

impl FluidField {
    /// Total (gas + magnetic) pressure p + b²/2.
    #[inline(always)]
    pub fn total_pressure(&self, pre: f64) -> f64 {
        pre + 0.5 * self.b2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-14;

    #[test]
    fn conserved_array_round_trip() {
        let u = Conserved {
            d: 1.0,
            tau: 2.0,
            sx: 3.0,
            sy: 4.0,
            sz: 5.0,
            bx: 6.0,
            by: 7.0,
            bz: 8.0,
        };
        let arr = u.to_array();
        assert_eq!(Conserved::from_slice(&arr), u);

        let mut out = [0.0; NCOMP];
        u.write(&mut out);
        assert_eq!(out, arr);
    }

    #[test]
    fn primitive_invariants() {
        let p = Primitive {
            rho: 1.0,
            pre: 1.0,
            vx: 0.3,
            vy: 0.0,
            vz: 0.0,
            bx: 0.0,
            by: 0.0,
            bz: 0.0,
        };
        assert!((p.v2() - 0.09).abs() < TOL);
        assert!((p.lorentz_factor() - 1.0 / 0.91f64.sqrt()).abs() < TOL);
    }

    #[test]
    fn fluid_field_stationary() {
        // At v = 0 the fluid frame coincides with the lab frame.
        let p = Primitive {
            rho: 1.0,
            pre: 1.0,
            bx: 1.0,
            by: 2.0,
            bz: -1.0,
            ..Default::default()
        };
        let f = p.fluid_field();
        assert!((f.w - 1.0).abs() < TOL);
        assert!(f.b0.abs() < TOL);
        assert!((f.b[0] - 1.0).abs() < TOL);
        assert!((f.b[1] - 2.0).abs() < TOL);
        assert!((f.b[2] + 1.0).abs() < TOL);
        assert!((f.b2 - 6.0).abs() < TOL);
        assert!((f.total_pressure(p.pre) - 4.0).abs() < TOL);
    }

    #[test]
    fn conserved_arithmetic() {
        let a = Conserved::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let b = Conserved::from_slice(&[8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0]);

        let sum = a + b;
        for &v in sum.to_array().iter() {
            assert!((v - 9.0).abs() < TOL);
        }

        let diff = (a - b) * 0.5;
        assert!((diff.d + 3.5).abs() < TOL);
        assert!((diff.bz - 3.5).abs() < TOL);
    }

    #[test]
    fn axis_accessors() {
        let u = Conserved::from_slice(&[0.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(u.momentum(Axis::Y), 2.0);
        assert_eq!(u.field(Axis::Z), 6.0);

        let p = Primitive::from_slice(&[0.0, 0.0, 0.1, 0.2, 0.3, 4.0, 5.0, 6.0]);
        assert_eq!(p.velocity(Axis::Z), 0.3);
        assert_eq!(p.field(Axis::X), 4.0);
    }
}
