//! Physical state of one spring/mass pair.

use crate::energy::Energy;
use crate::error::IntegrationError;
use crate::math;
use crate::oscillator::{self, Oscillation, Regime};

/// Spring and mass parameters together with the current motion.
///
/// An `OscillatorState` exists while a mass hangs on a spring. Parameters
/// may change between steps (a slider moves, the planet changes) and the
/// damping regime is re-derived on every step.
///
/// # Example
///
/// ```rust
/// use hooke::OscillatorState;
///
/// # fn main() -> Result<(), hooke::IntegrationError> {
/// let mut state = OscillatorState::new(10.0, 0.0, 0.25, 9.8, 0.0, 0.0)?;
///
/// // Released from the natural length, the mass falls and bounces
/// for _ in 0..60 {
///     state.step(1.0 / 60.0);
/// }
/// assert!(state.displacement < 0.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OscillatorState {
    /// Spring constant (N/m).
    pub spring_constant: f64,
    /// Damping coefficient (N·s/m).
    pub damping_coefficient: f64,
    /// Attached mass (kg).
    pub mass: f64,
    /// Gravitational acceleration (m/s²).
    pub gravity: f64,
    /// Displacement from the natural resting length (m).
    pub displacement: f64,
    /// Vertical velocity (m/s).
    pub velocity: f64,
}

impl OscillatorState {
    /// Creates a validated state.
    ///
    /// # Errors
    ///
    /// Returns an [`IntegrationError`] if the mass or spring constant is not
    /// positive, the damping coefficient or gravity is negative, or any value
    /// is not finite.
    pub fn new(
        spring_constant: f64,
        damping_coefficient: f64,
        mass: f64,
        gravity: f64,
        displacement: f64,
        velocity: f64,
    ) -> Result<Self, IntegrationError> {
        let state = Self {
            spring_constant,
            damping_coefficient,
            mass,
            gravity,
            displacement,
            velocity,
        };
        state.validate()?;
        Ok(state)
    }

    /// Checks the invariants that must hold before integrating.
    ///
    /// # Errors
    ///
    /// Same conditions as [`OscillatorState::new`].
    pub fn validate(&self) -> Result<(), IntegrationError> {
        oscillator::check_state(
            self.spring_constant,
            self.mass,
            self.damping_coefficient,
            self.velocity,
            self.displacement,
            self.gravity,
        )
    }

    /// Advances the state by `dt` seconds.
    ///
    /// # Panics
    ///
    /// Panics on violated invariants or a non-positive `dt`, see
    /// [`integrate`](crate::integrate).
    #[track_caller]
    pub fn step(&mut self, dt: f64) {
        let next = oscillator::integrate(
            self.spring_constant,
            self.mass,
            self.damping_coefficient,
            self.velocity,
            self.displacement,
            self.gravity,
            dt,
        );
        self.apply(next);
    }

    /// Fallible form of [`OscillatorState::step`]. The state is left
    /// untouched on error.
    ///
    /// # Errors
    ///
    /// Returns the integrator's [`IntegrationError`].
    pub fn try_step(&mut self, dt: f64) -> Result<Oscillation, IntegrationError> {
        let next = oscillator::try_integrate(
            self.spring_constant,
            self.mass,
            self.damping_coefficient,
            self.velocity,
            self.displacement,
            self.gravity,
            dt,
        )?;
        self.apply(next);
        Ok(next)
    }

    fn apply(&mut self, next: Oscillation) {
        self.displacement = next.displacement;
        self.velocity = next.velocity;
    }

    pub fn regime(&self) -> Regime {
        Regime::classify(self.spring_constant, self.mass, self.damping_coefficient)
    }

    /// Displacement where the spring force balances gravity.
    pub fn equilibrium_displacement(&self) -> f64 {
        oscillator::equilibrium_displacement(self.spring_constant, self.mass, self.gravity)
    }

    /// Returns `true` when resting within `tolerance` of equilibrium.
    pub fn at_rest(&self, tolerance: f64) -> bool {
        let offset = self.displacement - self.equilibrium_displacement();
        math::abs(offset) <= tolerance && math::abs(self.velocity) <= tolerance
    }

    /// Mechanical energy of the current motion, with no thermal share.
    pub fn energy(&self) -> Energy {
        Energy::of_motion(
            self.spring_constant,
            self.mass,
            self.gravity,
            self.displacement,
            self.velocity,
        )
    }

    /// Returns the spring to its natural length at rest, as when the mass
    /// is taken off.
    pub fn reset(&mut self) {
        self.displacement = 0.0;
        self.velocity = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates() {
        assert!(OscillatorState::new(10.0, 0.5, 0.2, 9.8, 0.0, 0.0).is_ok());
        assert_eq!(
            OscillatorState::new(10.0, 0.5, 0.0, 9.8, 0.0, 0.0),
            Err(IntegrationError::NonPositiveMass(0.0))
        );
        assert_eq!(
            OscillatorState::new(-1.0, 0.5, 0.2, 9.8, 0.0, 0.0),
            Err(IntegrationError::NonPositiveSpringConstant(-1.0))
        );
        assert!(matches!(
            OscillatorState::new(10.0, f64::NAN, 0.2, 9.8, 0.0, 0.0),
            Err(IntegrationError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_step_matches_integrate() {
        let mut state = OscillatorState::new(8.0, 0.3, 0.4, 9.8, 0.1, -0.2).unwrap();
        let expected = oscillator::integrate(8.0, 0.4, 0.3, -0.2, 0.1, 9.8, 0.02);
        state.step(0.02);
        assert_eq!(state.displacement, expected.displacement);
        assert_eq!(state.velocity, expected.velocity);
    }

    #[test]
    fn test_try_step_leaves_state_on_error() {
        let mut state = OscillatorState::new(8.0, 0.3, 0.4, 9.8, 0.1, -0.2).unwrap();
        let before = state;
        assert_eq!(
            state.try_step(-0.1),
            Err(IntegrationError::NonPositiveTimestep(-0.1))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_regime_follows_parameter_changes() {
        let mut state = OscillatorState::new(9.0, 1.0, 1.0, 9.8, 0.0, 0.0).unwrap();
        assert_eq!(state.regime(), Regime::Underdamped);
        state.damping_coefficient = 6.0;
        assert_eq!(state.regime(), Regime::CriticallyDamped);
        state.damping_coefficient = 12.0;
        assert_eq!(state.regime(), Regime::Overdamped);
    }

    #[test]
    fn test_settles_at_rest() {
        let mut state = OscillatorState::new(12.0, 1.5, 0.3, 9.8, 0.0, 0.0).unwrap();
        assert!(!state.at_rest(1e-3));
        for _ in 0..3000 {
            state.step(0.01);
        }
        assert!(state.at_rest(1e-6), "{state:?}");
        assert!((state.equilibrium_displacement() + 0.3 * 9.8 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_reset() {
        let mut state = OscillatorState::new(12.0, 1.5, 0.3, 9.8, -0.2, 0.4).unwrap();
        state.reset();
        assert_eq!(state.displacement, 0.0);
        assert_eq!(state.velocity, 0.0);
    }
}
