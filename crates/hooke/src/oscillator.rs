//! Closed-form integration of a damped spring carrying a mass under gravity.
//!
//! The motion obeys
//!
//! ```text
//! m·x'' + c·x' + k·x = −m·g
//! ```
//!
//! where `x` is the spring's displacement from its natural resting length
//! (y-up, so a hanging mass stretches the spring to negative `x`) and the
//! equilibrium sits at `x = −m·g/k`.
//!
//! Rather than stepping the ODE numerically, each call evaluates the exact
//! solution over `dt`. The characteristic roots are
//!
//! ```text
//! r₁,₂ = (−c ± iα) / 2m,   α = sqrt(4km − c²)
//! ```
//!
//! Taking `α` as a complex square root handles the under-damped (`α` real)
//! and over-damped (`α` imaginary) cases with one formula. At critical
//! damping the two roots coincide and a dedicated closed form is used.
//!
//! # Example
//!
//! ```rust
//! use hooke::{integrate, Regime};
//!
//! let (k, m, c, g) = (6.0, 0.1, 0.0, 9.8);
//! assert_eq!(Regime::classify(k, m, c), Regime::Underdamped);
//!
//! let next = integrate(k, m, c, 0.0, 0.05, g, 0.01);
//! assert!(next.displacement < 0.05);
//! assert!(next.velocity < 0.0);
//! ```

use core::f64::consts::TAU;

use tracing::trace;

use crate::complex::Complex;
use crate::error::IntegrationError;
use crate::math;

/// Below this change in displacement (m), with a velocity (m/s) under the
/// same bound, an under-damped spring is snapped onto its equilibrium.
pub const SQUELCH_THRESHOLD: f64 = 1e-6;

/// Relative width of the band around `c² = 4km` treated as critical.
const CRITICAL_TOLERANCE: f64 = 4.0 * f64::EPSILON;

/// Displacement and velocity after one integration step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Oscillation {
    /// New displacement (m).
    pub displacement: f64,
    /// New vertical velocity (m/s).
    pub velocity: f64,
}

impl Oscillation {
    #[inline]
    pub const fn new(displacement: f64, velocity: f64) -> Self {
        Self {
            displacement,
            velocity,
        }
    }
}

impl From<Oscillation> for (f64, f64) {
    #[inline]
    fn from(o: Oscillation) -> Self {
        (o.displacement, o.velocity)
    }
}

/// Damping regime, selected by the sign of `c² − 4km`.
///
/// - **Under-damped (`c² < 4km`)**: oscillates with decaying amplitude
/// - **Critically-damped (`c² = 4km`)**: fastest return without oscillation
/// - **Over-damped (`c² > 4km`)**: slow return without oscillation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Regime {
    Underdamped,
    CriticallyDamped,
    Overdamped,
}

impl Regime {
    /// Classifies a spring from its constant `k`, the mass `m` and the
    /// damping coefficient `c`.
    pub fn classify(k: f64, m: f64, c: f64) -> Self {
        let stiffness = 4.0 * k * m;
        let discriminant = c * c - stiffness;
        if math::abs(discriminant) <= CRITICAL_TOLERANCE * stiffness {
            Regime::CriticallyDamped
        } else if discriminant > 0.0 {
            Regime::Overdamped
        } else {
            Regime::Underdamped
        }
    }

    /// Lowercase name, e.g. `"underdamped"`.
    pub const fn name(self) -> &'static str {
        match self {
            Regime::Underdamped => "underdamped",
            Regime::CriticallyDamped => "critically damped",
            Regime::Overdamped => "overdamped",
        }
    }
}

impl core::fmt::Display for Regime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Damping coefficient at which the spring is critically damped, `2·sqrt(km)`.
#[inline]
pub fn critical_damping(k: f64, m: f64) -> f64 {
    2.0 * math::sqrt(k * m)
}

/// Displacement at which spring force balances gravity, `−m·g/k`.
#[inline]
pub fn equilibrium_displacement(k: f64, m: f64, g: f64) -> f64 {
    -m * g / k
}

/// Undamped period of oscillation, `2π·sqrt(m/k)`.
#[inline]
pub fn period(k: f64, m: f64) -> f64 {
    TAU * math::sqrt(m / k)
}

/// Period of the decaying oscillation, or `None` unless under-damped.
pub fn damped_period(k: f64, m: f64, c: f64) -> Option<f64> {
    if Regime::classify(k, m, c) != Regime::Underdamped {
        return None;
    }
    let omega = math::sqrt(4.0 * k * m - c * c) / (2.0 * m);
    Some(TAU / omega)
}

/// Advances a hanging mass by `dt` seconds.
///
/// # Arguments
///
/// * `k` - Spring constant (N/m), positive
/// * `m` - Attached mass (kg), positive
/// * `c` - Damping coefficient (N·s/m), zero or positive
/// * `v` - Current vertical velocity (m/s)
/// * `x` - Current displacement (m)
/// * `g` - Gravitational acceleration (m/s²), zero or positive
/// * `dt` - Timestep (s), positive; callers clamp large frame times
///
/// # Panics
///
/// Panics if any precondition of [`try_integrate`] is violated or the
/// result is not finite. Both indicate a bug in the caller.
///
/// # Example
///
/// ```rust
/// use hooke::integrate;
///
/// // Critically damped: k = 9, m = 1, c = 6
/// let next = integrate(9.0, 1.0, 6.0, 0.0, 1.0, 0.0, 0.1);
/// let phi = (0.1f64 * 3.0).exp();
/// assert!((next.displacement - 1.3 / phi).abs() < 1e-12);
/// ```
#[track_caller]
pub fn integrate(k: f64, m: f64, c: f64, v: f64, x: f64, g: f64, dt: f64) -> Oscillation {
    match try_integrate(k, m, c, v, x, g, dt) {
        Ok(next) => next,
        Err(err) => panic!("oscillator integration failed: {err}"),
    }
}

/// Fallible form of [`integrate`].
///
/// # Errors
///
/// Returns an [`IntegrationError`] when `k <= 0`, `m <= 0`, `c < 0`,
/// `g < 0`, `dt <= 0`, an input is not finite, or the computed state is
/// not finite.
pub fn try_integrate(
    k: f64,
    m: f64,
    c: f64,
    v: f64,
    x: f64,
    g: f64,
    dt: f64,
) -> Result<Oscillation, IntegrationError> {
    check_inputs(k, m, c, v, x, g, dt)?;

    let regime = Regime::classify(k, m, c);
    trace!(%regime, x, v, dt, "integrating");
    let next = match regime {
        Regime::CriticallyDamped => critically_damped(k, m, v, x, g, dt),
        Regime::Overdamped => {
            let next = complex_closed_form(k, m, c, v, x, g, dt);
            Oscillation::new(match_sign(next.displacement, x), next.velocity)
        }
        Regime::Underdamped => {
            let next = complex_closed_form(k, m, c, v, x, g, dt);
            if math::abs(x - next.displacement) < SQUELCH_THRESHOLD
                && math::abs(v) < SQUELCH_THRESHOLD
            {
                trace!(displacement = next.displacement, "squelching residual oscillation");
                Oscillation::new(equilibrium_displacement(k, m, g), 0.0)
            } else {
                next
            }
        }
    };

    if !(next.displacement.is_finite() && next.velocity.is_finite()) {
        return Err(IntegrationError::NonFiniteResult {
            displacement: next.displacement,
            velocity: next.velocity,
        });
    }
    Ok(next)
}

fn check_inputs(
    k: f64,
    m: f64,
    c: f64,
    v: f64,
    x: f64,
    g: f64,
    dt: f64,
) -> Result<(), IntegrationError> {
    check_state(k, m, c, v, x, g)?;
    if !dt.is_finite() {
        return Err(IntegrationError::NonFinite {
            name: "timestep",
            value: dt,
        });
    }
    if dt <= 0.0 {
        return Err(IntegrationError::NonPositiveTimestep(dt));
    }
    Ok(())
}

/// Validates everything but the timestep.
pub(crate) fn check_state(
    k: f64,
    m: f64,
    c: f64,
    v: f64,
    x: f64,
    g: f64,
) -> Result<(), IntegrationError> {
    let inputs = [
        ("spring constant", k),
        ("mass", m),
        ("damping coefficient", c),
        ("velocity", v),
        ("displacement", x),
        ("gravity", g),
    ];
    for (name, value) in inputs {
        if !value.is_finite() {
            return Err(IntegrationError::NonFinite { name, value });
        }
    }

    if k <= 0.0 {
        return Err(IntegrationError::NonPositiveSpringConstant(k));
    }
    if m <= 0.0 {
        return Err(IntegrationError::NonPositiveMass(m));
    }
    if c < 0.0 {
        return Err(IntegrationError::NegativeDamping(c));
    }
    if g < 0.0 {
        return Err(IntegrationError::NegativeGravity(g));
    }
    Ok(())
}

/// Shared under/over-damped solution in equilibrium-relative space.
///
/// With `y = x − x_eq` the motion is `y(t) = A·e^(r₁t) + B·e^(r₂t)`. Factoring
/// `η = e^(r₂·dt)` out leaves `β = e^(r₁·dt − r₂·dt) = e^(iα·dt/m)`.
fn complex_closed_form(k: f64, m: f64, c: f64, v: f64, x: f64, g: f64, dt: f64) -> Oscillation {
    let equilibrium = equilibrium_displacement(k, m, g);
    let y = x - equilibrium;

    let alpha = Complex::real(4.0 * k * m - c * c).sqrt();
    let i_alpha = Complex::I * alpha;
    let two_m = 2.0 * m;

    let r1 = (i_alpha - c) / two_m;
    let r2 = (-i_alpha - c) / two_m;

    let beta = (i_alpha * (dt / m)).exp();
    let eta = (r2 * dt).exp();

    // A·(r₁ − r₂) and B·(r₁ − r₂)
    let a = Complex::real(v) - r2 * y;
    let b = r1 * y - v;
    let inv_root_gap = Complex::ONE / (r1 - r2);

    let displacement = eta * (a * beta + b) * inv_root_gap;
    let velocity = eta * (r1 * a * beta + r2 * b) * inv_root_gap;

    Oscillation::new(displacement.re + equilibrium, velocity.re)
}

/// Repeated-root solution for `c² = 4km`.
fn critically_damped(k: f64, m: f64, v: f64, x: f64, g: f64, dt: f64) -> Oscillation {
    let omega = math::sqrt(k / m);
    let root_km = math::sqrt(k * m);
    let phi = math::exp(dt * omega);

    let displacement =
        (g * (-m * phi + dt * root_km + m) + k * (dt * (x * omega + v) + x)) / (phi * k);
    let velocity = (g * m * (root_km - omega * (m + dt * root_km))
        - k * (m * v * (omega * dt - 1.0) + k * dt * x))
        / (phi * k * m);

    Oscillation::new(displacement, velocity)
}

/// Gives `value` the sign of `previous`.
///
/// Over-damped results can come back mirrored through zero when the complex
/// square root lands on the other branch, so the displacement is held on the
/// side it started from. A previous value of exactly zero has no side and
/// leaves `value` untouched.
fn match_sign(value: f64, previous: f64) -> f64 {
    if previous > 0.0 {
        math::abs(value)
    } else if previous < 0.0 {
        -math::abs(value)
    } else {
        value
    }
}
