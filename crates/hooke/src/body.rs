//! Gravity presets for the planets a spring can be taken to.

use core::fmt;
use core::str::FromStr;

use crate::error::ParseBodyError;

/// Gravitational acceleration on the Moon (m/s²).
pub const MOON_GRAVITY: f64 = 1.62;
/// Gravitational acceleration on Earth (m/s²).
pub const EARTH_GRAVITY: f64 = 9.8;
/// Gravitational acceleration on Jupiter (m/s²).
pub const JUPITER_GRAVITY: f64 = 24.79;
/// Gravitational acceleration on Planet X (m/s²).
pub const PLANET_X_GRAVITY: f64 = 14.2;

/// A place with a known (or user-chosen) gravity.
///
/// # Example
///
/// ```rust
/// use hooke::Body;
///
/// let jupiter: Body = "jupiter".parse().unwrap();
/// assert_eq!(jupiter.gravity(), 24.79);
///
/// let custom: Body = "3.7".parse().unwrap();
/// assert_eq!(custom, Body::Custom(3.7));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Body {
    Moon,
    #[default]
    Earth,
    Jupiter,
    PlanetX,
    ZeroG,
    /// User-chosen gravity (m/s²).
    Custom(f64),
}

impl Body {
    /// All named presets, in menu order.
    pub const PRESETS: [Body; 5] = [
        Body::Moon,
        Body::Earth,
        Body::Jupiter,
        Body::PlanetX,
        Body::ZeroG,
    ];

    /// Gravitational acceleration (m/s²).
    pub const fn gravity(self) -> f64 {
        match self {
            Body::Moon => MOON_GRAVITY,
            Body::Earth => EARTH_GRAVITY,
            Body::Jupiter => JUPITER_GRAVITY,
            Body::PlanetX => PLANET_X_GRAVITY,
            Body::ZeroG => 0.0,
            Body::Custom(g) => g,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Body::Moon => "moon",
            Body::Earth => "earth",
            Body::Jupiter => "jupiter",
            Body::PlanetX => "planet-x",
            Body::ZeroG => "zero-g",
            Body::Custom(_) => "custom",
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Custom(g) => write!(f, "custom ({g} m/s²)"),
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for Body {
    type Err = ParseBodyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        for body in Body::PRESETS {
            if s.eq_ignore_ascii_case(body.name()) {
                return Ok(body);
            }
        }
        if s.eq_ignore_ascii_case("planetx") || s.eq_ignore_ascii_case("planet_x") {
            return Ok(Body::PlanetX);
        }
        if s.eq_ignore_ascii_case("zerog") || s.eq_ignore_ascii_case("zero_g") {
            return Ok(Body::ZeroG);
        }

        let g: f64 = s.parse().map_err(|_| ParseBodyError::Unknown)?;
        if !g.is_finite() {
            return Err(ParseBodyError::Unknown);
        }
        if g < 0.0 {
            return Err(ParseBodyError::NegativeGravity(g));
        }
        Ok(Body::Custom(g))
    }
}
