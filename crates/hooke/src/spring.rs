//! A hanging spring that masses can be attached to, grabbed and released.
//!
//! Positions use a y-up axis. A spring hangs from its `anchor`; with nothing
//! attached its bottom sits at the rest position
//! `anchor − natural_resting_length`. The displacement is the bottom's
//! offset from that rest position, so a hanging mass stretches the spring to
//! a negative displacement.
//!
//! # Example
//!
//! ```rust
//! use hooke::{Mass, Spring};
//!
//! # fn main() -> Result<(), hooke::SpringError> {
//! let mut spring = Spring::new(2.0, 0.5);
//! spring.set_spring_constant(10.0)?;
//!
//! // Hook a 250 g mass on at the spring's natural length and let go
//! spring.attach(Mass::at(0.25, spring.rest_position()))?;
//! for _ in 0..120 {
//!     spring.step(1.0 / 60.0);
//! }
//! assert!(spring.displacement() < 0.0);
//! # Ok(())
//! # }
//! ```

use tracing::debug;

use crate::body::EARTH_GRAVITY;
use crate::energy::Energy;
use crate::error::{IntegrationError, SpringError};
use crate::oscillator::{self, Regime};
use crate::state::OscillatorState;

/// Spring constant of a freshly created spring (N/m).
pub const DEFAULT_SPRING_CONSTANT: f64 = 10.0;

/// A mass that can hang on a spring.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mass {
    /// Mass (kg).
    pub mass: f64,
    /// Height of the hook (m).
    pub position: f64,
    /// Vertical velocity (m/s).
    pub velocity: f64,
    /// Set while the user holds the mass; the spring then stops integrating.
    pub user_controlled: bool,
}

impl Mass {
    /// A mass at rest at height zero.
    #[inline]
    pub const fn new(mass: f64) -> Self {
        Self::at(mass, 0.0)
    }

    /// A mass at rest at the given height.
    #[inline]
    pub const fn at(mass: f64, position: f64) -> Self {
        Self {
            mass,
            position,
            velocity: 0.0,
            user_controlled: false,
        }
    }
}

/// A damped spring hanging from a fixed anchor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spring {
    anchor: f64,
    natural_resting_length: f64,
    spring_constant: f64,
    damping_coefficient: f64,
    gravity: f64,
    displacement: f64,
    attached: Option<Mass>,
    thermal_energy: f64,
}

impl Spring {
    /// Creates an undamped spring under Earth gravity with
    /// [`DEFAULT_SPRING_CONSTANT`].
    ///
    /// A negative natural length is clamped to zero.
    pub fn new(anchor: f64, natural_resting_length: f64) -> Self {
        Self {
            anchor,
            natural_resting_length: natural_resting_length.max(0.0),
            spring_constant: DEFAULT_SPRING_CONSTANT,
            damping_coefficient: 0.0,
            gravity: EARTH_GRAVITY,
            displacement: 0.0,
            attached: None,
            thermal_energy: 0.0,
        }
    }

    pub fn anchor(&self) -> f64 {
        self.anchor
    }

    pub fn natural_resting_length(&self) -> f64 {
        self.natural_resting_length
    }

    pub fn spring_constant(&self) -> f64 {
        self.spring_constant
    }

    pub fn damping_coefficient(&self) -> f64 {
        self.damping_coefficient
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn displacement(&self) -> f64 {
        self.displacement
    }

    /// The attached mass, if any.
    pub fn mass(&self) -> Option<&Mass> {
        self.attached.as_ref()
    }

    /// Velocity of the attached mass, zero when nothing hangs here.
    pub fn velocity(&self) -> f64 {
        self.attached.map_or(0.0, |mass| mass.velocity)
    }

    /// Height of the spring's bottom with nothing attached.
    pub fn rest_position(&self) -> f64 {
        self.anchor - self.natural_resting_length
    }

    /// Current height of the spring's bottom.
    pub fn bottom(&self) -> f64 {
        self.rest_position() + self.displacement
    }

    /// Sets the spring constant (N/m).
    ///
    /// # Errors
    ///
    /// Fails unless `k` is finite and positive.
    pub fn set_spring_constant(&mut self, k: f64) -> Result<(), SpringError> {
        if !k.is_finite() {
            return Err(non_finite("spring constant", k));
        }
        if k <= 0.0 {
            return Err(IntegrationError::NonPositiveSpringConstant(k).into());
        }
        self.spring_constant = k;
        Ok(())
    }

    /// Sets the damping coefficient (N·s/m).
    ///
    /// # Errors
    ///
    /// Fails unless `c` is finite and not negative.
    pub fn set_damping_coefficient(&mut self, c: f64) -> Result<(), SpringError> {
        if !c.is_finite() {
            return Err(non_finite("damping coefficient", c));
        }
        if c < 0.0 {
            return Err(IntegrationError::NegativeDamping(c).into());
        }
        self.damping_coefficient = c;
        Ok(())
    }

    /// Sets the gravitational acceleration (m/s²).
    ///
    /// # Errors
    ///
    /// Fails unless `g` is finite and not negative.
    pub fn set_gravity(&mut self, g: f64) -> Result<(), SpringError> {
        if !g.is_finite() {
            return Err(non_finite("gravity", g));
        }
        if g < 0.0 {
            return Err(IntegrationError::NegativeGravity(g).into());
        }
        self.gravity = g;
        Ok(())
    }

    /// Hangs `mass` on the spring, returning whatever hung there before.
    ///
    /// The spring stretches (or compresses) to reach the mass's hook, so the
    /// fresh displacement is the mass's position minus the rest position.
    /// The mass keeps its velocity.
    ///
    /// # Errors
    ///
    /// Fails if the mass is not positive or its position or velocity is not
    /// finite. The spring is left unchanged.
    pub fn attach(&mut self, mass: Mass) -> Result<Option<Mass>, SpringError> {
        let displacement = mass.position - self.rest_position();
        oscillator::check_state(
            self.spring_constant,
            mass.mass,
            self.damping_coefficient,
            mass.velocity,
            displacement,
            self.gravity,
        )?;

        let previous = self.detach();
        debug!(mass = mass.mass, displacement, "attaching mass");
        self.displacement = displacement;
        self.attached = Some(mass);
        self.thermal_energy = 0.0;
        Ok(previous)
    }

    /// Takes the mass off. The spring springs back to its natural length and
    /// the returned mass is at rest.
    pub fn detach(&mut self) -> Option<Mass> {
        let mut mass = self.attached.take()?;
        debug!(mass = mass.mass, "detaching mass");
        mass.velocity = 0.0;
        self.displacement = 0.0;
        self.thermal_energy = 0.0;
        Some(mass)
    }

    /// Puts the attached mass under user control, halting integration.
    ///
    /// # Errors
    ///
    /// Returns [`SpringError::NoMassAttached`] if nothing hangs here.
    pub fn grab(&mut self) -> Result<(), SpringError> {
        let mass = self.attached.as_mut().ok_or(SpringError::NoMassAttached)?;
        mass.user_controlled = true;
        mass.velocity = 0.0;
        self.thermal_energy = 0.0;
        Ok(())
    }

    /// Lets go of the attached mass; it starts from rest wherever it was
    /// dragged to.
    ///
    /// # Errors
    ///
    /// Returns [`SpringError::NoMassAttached`] if nothing hangs here.
    pub fn release(&mut self) -> Result<(), SpringError> {
        let mass = self.attached.as_mut().ok_or(SpringError::NoMassAttached)?;
        mass.user_controlled = false;
        mass.velocity = 0.0;
        self.thermal_energy = 0.0;
        Ok(())
    }

    /// Moves a grabbed mass, stretching the spring with it.
    ///
    /// # Errors
    ///
    /// Fails if no mass is attached, the mass has not been grabbed, or
    /// `position` is not finite.
    pub fn drag_to(&mut self, position: f64) -> Result<(), SpringError> {
        if !position.is_finite() {
            return Err(non_finite("position", position));
        }
        let rest = self.rest_position();
        let mass = self.attached.as_mut().ok_or(SpringError::NoMassAttached)?;
        if !mass.user_controlled {
            return Err(SpringError::NotUserControlled);
        }
        mass.position = position;
        self.displacement = position - rest;
        Ok(())
    }

    /// The oscillator state of the attached mass.
    pub fn state(&self) -> Option<OscillatorState> {
        self.attached.map(|mass| OscillatorState {
            spring_constant: self.spring_constant,
            damping_coefficient: self.damping_coefficient,
            mass: mass.mass,
            gravity: self.gravity,
            displacement: self.displacement,
            velocity: mass.velocity,
        })
    }

    pub fn regime(&self) -> Option<Regime> {
        self.state().map(|state| state.regime())
    }

    /// Height at which the attached mass would hang still.
    pub fn equilibrium_position(&self) -> Option<f64> {
        self.state()
            .map(|state| self.rest_position() + state.equilibrium_displacement())
    }

    /// Energy of the attached mass including what damping has dissipated.
    /// Zero when nothing hangs here.
    pub fn energy(&self) -> Energy {
        self.state().map_or_else(Energy::default, |state| {
            state.energy().with_thermal(self.thermal_energy)
        })
    }

    /// Advances the attached mass by `dt` seconds.
    ///
    /// Does nothing without a mass or while the mass is user controlled.
    ///
    /// # Panics
    ///
    /// Panics if `dt` is not a positive finite number.
    #[track_caller]
    pub fn step(&mut self, dt: f64) {
        let Some(mut state) = self.state() else {
            return;
        };
        let rest = self.rest_position();
        let Some(mass) = self.attached.as_mut() else {
            return;
        };
        if mass.user_controlled {
            return;
        }

        let before = state.energy().mechanical();
        state.step(dt);
        let after = state.energy().mechanical();

        self.displacement = state.displacement;
        mass.position = rest + state.displacement;
        mass.velocity = state.velocity;
        if self.damping_coefficient > 0.0 {
            self.thermal_energy = (self.thermal_energy + before - after).max(0.0);
        }
    }
}

fn non_finite(name: &'static str, value: f64) -> SpringError {
    IntegrationError::NonFinite { name, value }.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_spring(k: f64, c: f64, m: f64) -> Spring {
        let mut spring = Spring::new(2.0, 0.5);
        spring.set_spring_constant(k).unwrap();
        spring.set_damping_coefficient(c).unwrap();
        spring.attach(Mass::at(m, spring.rest_position())).unwrap();
        spring
    }

    #[test]
    fn test_new_defaults() {
        let spring = Spring::new(2.0, 0.5);
        assert_eq!(spring.rest_position(), 1.5);
        assert_eq!(spring.bottom(), 1.5);
        assert_eq!(spring.spring_constant(), DEFAULT_SPRING_CONSTANT);
        assert_eq!(spring.gravity(), EARTH_GRAVITY);
        assert!(spring.mass().is_none());
        assert_eq!(Spring::new(2.0, -1.0).natural_resting_length(), 0.0);
    }

    #[test]
    fn test_attach_computes_displacement() {
        let mut spring = Spring::new(2.0, 0.5);
        let previous = spring.attach(Mass::at(0.1, 1.2)).unwrap();
        assert!(previous.is_none());
        assert!((spring.displacement() + 0.3).abs() < 1e-12);
        assert!((spring.bottom() - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_attach_replaces_previous_mass() {
        let mut spring = loaded_spring(10.0, 0.0, 0.1);
        spring.step(0.05);
        let previous = spring.attach(Mass::at(0.2, 1.5)).unwrap();
        let previous = previous.unwrap();
        assert_eq!(previous.mass, 0.1);
        assert_eq!(previous.velocity, 0.0);
        assert_eq!(spring.mass().map(|m| m.mass), Some(0.2));
    }

    #[test]
    fn test_attach_rejects_invalid_mass() {
        let mut spring = Spring::new(2.0, 0.5);
        assert_eq!(
            spring.attach(Mass::new(0.0)),
            Err(SpringError::Integration(IntegrationError::NonPositiveMass(0.0)))
        );
        assert!(spring.mass().is_none());
        assert_eq!(spring.displacement(), 0.0);
    }

    #[test]
    fn test_detach_resets() {
        let mut spring = loaded_spring(10.0, 0.0, 0.1);
        for _ in 0..10 {
            spring.step(0.02);
        }
        assert!(spring.displacement() != 0.0);

        let mass = spring.detach().unwrap();
        assert_eq!(mass.velocity, 0.0);
        assert_eq!(spring.displacement(), 0.0);
        assert_eq!(spring.velocity(), 0.0);
        assert_eq!(spring.energy(), Energy::default());
        assert!(spring.detach().is_none());
    }

    #[test]
    fn test_step_without_mass_is_noop() {
        let mut spring = Spring::new(2.0, 0.5);
        spring.step(0.1);
        assert_eq!(spring.displacement(), 0.0);
    }

    #[test]
    fn test_user_controlled_mass_is_frozen() {
        let mut spring = loaded_spring(10.0, 0.0, 0.1);
        spring.grab().unwrap();
        spring.drag_to(1.0).unwrap();
        spring.step(0.1);
        assert!((spring.displacement() + 0.5).abs() < 1e-12);
        assert_eq!(spring.mass().map(|m| m.position), Some(1.0));

        spring.release().unwrap();
        spring.step(0.1);
        assert!(spring.displacement() > -0.5, "released below equilibrium should rise");
    }

    #[test]
    fn test_drag_requires_grab() {
        let mut spring = loaded_spring(10.0, 0.0, 0.1);
        assert_eq!(spring.drag_to(1.0), Err(SpringError::NotUserControlled));

        let mut empty = Spring::new(2.0, 0.5);
        assert_eq!(empty.grab(), Err(SpringError::NoMassAttached));
        assert_eq!(empty.drag_to(1.0), Err(SpringError::NoMassAttached));
    }

    #[test]
    fn test_mass_position_tracks_displacement() {
        let mut spring = loaded_spring(10.0, 0.2, 0.3);
        for _ in 0..25 {
            spring.step(0.016);
            let mass = spring.mass().copied().unwrap();
            assert!((mass.position - spring.bottom()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_equilibrium_position() {
        let spring = loaded_spring(10.0, 0.0, 0.5);
        let eq = spring.equilibrium_position().unwrap();
        assert!((eq - (1.5 - 0.49)).abs() < 1e-12);
        assert_eq!(Spring::new(2.0, 0.5).equilibrium_position(), None);
    }

    #[test]
    fn test_damping_turns_mechanical_into_thermal() {
        let mut spring = loaded_spring(10.0, 0.5, 0.25);
        let initial = spring.energy().total();
        for _ in 0..500 {
            spring.step(0.01);
        }
        let energy = spring.energy();
        assert!(energy.thermal > 0.0);
        assert!(
            (energy.total() - initial).abs() < 1e-6,
            "total {} drifted from {initial}",
            energy.total()
        );
    }

    #[test]
    fn test_undamped_accrues_no_thermal() {
        let mut spring = loaded_spring(10.0, 0.0, 0.25);
        for _ in 0..100 {
            spring.step(0.01);
        }
        assert_eq!(spring.energy().thermal, 0.0);
    }

    #[test]
    fn test_setters_validate() {
        let mut spring = Spring::new(2.0, 0.5);
        assert!(spring.set_spring_constant(0.0).is_err());
        assert!(spring.set_damping_coefficient(-1.0).is_err());
        assert!(spring.set_gravity(-9.8).is_err());
        assert!(spring.set_gravity(f64::NAN).is_err());
        assert_eq!(spring.spring_constant(), DEFAULT_SPRING_CONSTANT);

        spring.set_gravity(1.62).unwrap();
        assert_eq!(spring.gravity(), 1.62);
    }

    #[test]
    fn test_regime_tracks_parameters() {
        let mut spring = loaded_spring(9.0, 0.0, 1.0);
        assert_eq!(spring.regime(), Some(Regime::Underdamped));
        spring.set_damping_coefficient(6.0).unwrap();
        assert_eq!(spring.regime(), Some(Regime::CriticallyDamped));
        spring.set_damping_coefficient(9.0).unwrap();
        assert_eq!(spring.regime(), Some(Regime::Overdamped));
    }
}
