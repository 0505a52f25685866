#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]
// Allow these clippy lints for physics/math code readability
#![allow(clippy::must_use_candidate)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::use_self)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]

//! # Hooke
//!
//! Closed-form motion of masses hanging on damped springs.
//!
//! Hooke provides:
//! - **Integrator**: advances displacement and velocity of a damped,
//!   gravity-loaded spring exactly, with no energy drift at any timestep
//! - **Complex**: the small complex arithmetic the closed form is built on
//! - **Spring / Mass / Model**: attaching, dragging and releasing masses on
//!   two springs sharing a clock and a planet
//! - **Energy**: kinetic, potential and thermal bookkeeping
//!
//! ## Integrator Example
//!
//! ```rust
//! use hooke::{integrate, period};
//!
//! // 100 g on a 6 N/m spring, undamped, pulled 5 cm above its natural length
//! let (k, m, c, g) = (6.0, 0.1, 0.0, 9.8);
//! let steps = 100;
//! let dt = period(k, m) / steps as f64;
//!
//! let (mut x, mut v) = (0.05, 0.0);
//! for _ in 0..steps {
//!     let next = integrate(k, m, c, v, x, g, dt);
//!     x = next.displacement;
//!     v = next.velocity;
//! }
//!
//! // One full period later the mass is back where it started
//! assert!((x - 0.05).abs() < 1e-9);
//! assert!(v.abs() < 1e-9);
//! ```
//!
//! ## Model Example
//!
//! ```rust
//! use hooke::{fps, Body, Mass, Model};
//!
//! # fn main() -> Result<(), hooke::SpringError> {
//! let mut model = Model::default();
//! model.set_body(Body::Jupiter)?;
//!
//! let rest = model.spring(0).rest_position();
//! model.spring_mut(0).attach(Mass::at(0.1, rest))?;
//!
//! for _ in 0..60 {
//!     model.step(fps(60));
//! }
//! let energy = model.spring(0).energy();
//! assert!(energy.kinetic >= 0.0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Damping Regimes
//!
//! The sign of `c² − 4km` decides how the spring behaves:
//!
//! - **Over-damped (`c² > 4km`)**: No oscillation, slow return to equilibrium
//! - **Critically-damped (`c² = 4km`)**: Fastest return without oscillation
//! - **Under-damped (`c² < 4km`)**: Oscillates around equilibrium with decay
//!
//! ## Feature Flags
//!
//! - `std` (default): use the standard library's float functions
//! - `libm`: float functions from `libm`, for `no_std` builds
//! - `serde`: `Serialize`/`Deserialize` for the value types

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("hooke needs either the `std` or the `libm` feature");

mod body;
mod complex;
mod energy;
mod error;
mod math;
mod model;
mod oscillator;
mod spring;
mod state;

pub use body::{Body, EARTH_GRAVITY, JUPITER_GRAVITY, MOON_GRAVITY, PLANET_X_GRAVITY};
pub use complex::Complex;
pub use energy::Energy;
pub use error::{IntegrationError, ParseBodyError, SpringError};
pub use model::{fps, Model, TimeSpeed, DEFAULT_ANCHOR, DEFAULT_NATURAL_LENGTH, MAX_DT};
pub use oscillator::{
    critical_damping, damped_period, equilibrium_displacement, integrate, period, try_integrate,
    Oscillation, Regime, SQUELCH_THRESHOLD,
};
pub use spring::{Mass, Spring, DEFAULT_SPRING_CONSTANT};
pub use state::OscillatorState;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::body::Body;
    pub use crate::energy::Energy;
    pub use crate::model::{fps, Model, TimeSpeed};
    pub use crate::oscillator::{integrate, try_integrate, Oscillation, Regime};
    pub use crate::spring::{Mass, Spring};
    pub use crate::state::OscillatorState;
}
