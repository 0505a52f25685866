//! Energy bookkeeping for a hanging mass.
//!
//! Heights are measured from the spring's unloaded bottom, so gravitational
//! potential energy is `m·g·x` and goes negative as the spring stretches.
//! With that reference the mechanical sum
//!
//! ```text
//! ½·m·v² + ½·k·x² + m·g·x
//! ```
//!
//! is exactly conserved by the undamped equation of motion. Damping moves
//! energy out of that sum into [`Energy::thermal`].

/// Energy split of one spring/mass pair (J).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Energy {
    pub kinetic: f64,
    pub gravitational_potential: f64,
    pub elastic_potential: f64,
    /// Mechanical energy dissipated by damping so far.
    pub thermal: f64,
}

impl Energy {
    /// Mechanical energy of a mass `m` on a spring `k` under gravity `g`,
    /// at displacement `x` moving at `v`.
    #[inline]
    pub fn of_motion(k: f64, m: f64, g: f64, x: f64, v: f64) -> Self {
        Self {
            kinetic: 0.5 * m * v * v,
            gravitational_potential: m * g * x,
            elastic_potential: 0.5 * k * x * x,
            thermal: 0.0,
        }
    }

    /// Replaces the thermal share.
    #[inline]
    pub fn with_thermal(mut self, thermal: f64) -> Self {
        self.thermal = thermal;
        self
    }

    /// Kinetic plus both potentials.
    #[inline]
    pub fn mechanical(&self) -> f64 {
        self.kinetic + self.gravitational_potential + self.elastic_potential
    }

    /// Mechanical plus thermal.
    #[inline]
    pub fn total(&self) -> f64 {
        self.mechanical() + self.thermal
    }
}
