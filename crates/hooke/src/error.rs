//! Error types.

use thiserror::Error;

/// A violated precondition or postcondition of the oscillator integrator.
///
/// These indicate a bug in the caller's state management rather than a
/// recoverable runtime condition; [`integrate`](crate::integrate) panics
/// with this error's message, [`try_integrate`](crate::try_integrate)
/// returns it.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum IntegrationError {
    /// Spring constant must be strictly positive.
    #[error("spring constant must be positive, got {0}")]
    NonPositiveSpringConstant(f64),

    /// Mass must be strictly positive.
    #[error("mass must be positive, got {0}")]
    NonPositiveMass(f64),

    /// Damping coefficient must be zero or positive.
    #[error("damping coefficient must not be negative, got {0}")]
    NegativeDamping(f64),

    /// Gravitational acceleration must be zero or positive.
    #[error("gravity must not be negative, got {0}")]
    NegativeGravity(f64),

    /// Timestep must be strictly positive.
    #[error("timestep must be positive, got {0}")]
    NonPositiveTimestep(f64),

    /// An input was NaN or infinite.
    #[error("{name} must be finite, got {value}")]
    NonFinite {
        /// Name of the offending input.
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// The closed form produced NaN or infinity.
    #[error("integration produced a non-finite state (displacement {displacement}, velocity {velocity})")]
    NonFiniteResult {
        /// Computed displacement.
        displacement: f64,
        /// Computed velocity.
        velocity: f64,
    },
}

/// Errors from spring/mass interactions.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SpringError {
    /// The operation needs a mass hanging on the spring.
    #[error("no mass is attached to the spring")]
    NoMassAttached,

    /// Dragging requires the mass to be grabbed first.
    #[error("the attached mass is not user controlled")]
    NotUserControlled,

    /// The physical parameters are invalid.
    #[error(transparent)]
    Integration(#[from] IntegrationError),
}

/// Error returned when parsing a [`Body`](crate::Body) fails.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ParseBodyError {
    /// Neither a known planet name nor a number.
    #[error("unknown planet (expected moon, earth, jupiter, planet-x, zero-g or a gravity value)")]
    Unknown,

    /// A custom gravity value below zero.
    #[error("custom gravity must not be negative, got {0}")]
    NegativeGravity(f64),
}
