//! Minimal complex arithmetic for the oscillator closed form.
//!
//! Only the handful of operations the integrator needs are provided: the
//! four arithmetic operators, principal square root, exponential and the
//! trigonometric functions of a complex argument.
//!
//! # Example
//!
//! ```rust
//! use hooke::Complex;
//!
//! // The square root of a negative real lands on the positive imaginary axis
//! let root = Complex::real(-4.0).sqrt();
//! assert_eq!(root, Complex::new(0.0, 2.0));
//!
//! // e^(iπ) = -1
//! let z = (Complex::I * core::f64::consts::PI).exp();
//! assert!((z.re + 1.0).abs() < 1e-12);
//! ```

use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::math;

/// A complex number with `f64` real and imaginary parts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Complex {
    /// Real part.
    pub re: f64,
    /// Imaginary part.
    pub im: f64,
}

impl Complex {
    /// `0 + 0i`.
    pub const ZERO: Self = Self::new(0.0, 0.0);
    /// `1 + 0i`.
    pub const ONE: Self = Self::new(1.0, 0.0);
    /// The imaginary unit.
    pub const I: Self = Self::new(0.0, 1.0);

    /// Creates a complex number from its parts.
    #[inline]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Creates a complex number on the real axis.
    #[inline]
    pub const fn real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    /// Returns the real part.
    #[inline]
    pub const fn real_part(self) -> f64 {
        self.re
    }

    /// Returns the imaginary part.
    #[inline]
    pub const fn imaginary_part(self) -> f64 {
        self.im
    }

    #[inline]
    pub const fn conjugate(self) -> Self {
        Self::new(self.re, -self.im)
    }

    #[inline]
    pub fn magnitude_squared(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    #[inline]
    pub fn magnitude(self) -> f64 {
        math::hypot(self.re, self.im)
    }

    /// Returns `true` if both parts are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }

    /// Principal square root (non-negative real part).
    ///
    /// The branch cut lies along the negative real axis; a negative real
    /// argument with a `+0.0` imaginary part maps to the positive imaginary
    /// axis.
    pub fn sqrt(self) -> Self {
        if self.re == 0.0 && self.im == 0.0 {
            return Self::ZERO;
        }

        let r = self.magnitude();
        if self.re >= 0.0 {
            let t = math::sqrt((r + self.re) * 0.5);
            Self::new(t, self.im / (2.0 * t))
        } else {
            // Avoid cancellation in (r + re) when re is negative
            let t = math::sqrt((r - self.re) * 0.5);
            let im = if self.im.is_sign_negative() { -t } else { t };
            Self::new(math::abs(self.im) / (2.0 * t), im)
        }
    }

    /// Complex exponential, `e^re · (cos im + i sin im)`.
    pub fn exp(self) -> Self {
        let scale = math::exp(self.re);
        if self.im == 0.0 {
            return Self::real(scale);
        }
        Self::new(scale * math::cos(self.im), scale * math::sin(self.im))
    }

    /// Sine of a complex argument.
    pub fn sin(self) -> Self {
        let (cosh, sinh) = cosh_sinh(self.im);
        Self::new(math::sin(self.re) * cosh, math::cos(self.re) * sinh)
    }

    /// Cosine of a complex argument.
    pub fn cos(self) -> Self {
        let (cosh, sinh) = cosh_sinh(self.im);
        Self::new(math::cos(self.re) * cosh, -math::sin(self.re) * sinh)
    }
}

fn cosh_sinh(x: f64) -> (f64, f64) {
    let e = math::exp(x);
    let inv = 1.0 / e;
    ((e + inv) * 0.5, (e - inv) * 0.5)
}

impl From<f64> for Complex {
    #[inline]
    fn from(re: f64) -> Self {
        Self::real(re)
    }
}

impl Add for Complex {
    type Output = Complex;

    #[inline]
    fn add(self, other: Complex) -> Complex {
        Complex::new(self.re + other.re, self.im + other.im)
    }
}

impl Add<f64> for Complex {
    type Output = Complex;

    #[inline]
    fn add(self, other: f64) -> Complex {
        Complex::new(self.re + other, self.im)
    }
}

impl Sub for Complex {
    type Output = Complex;

    #[inline]
    fn sub(self, other: Complex) -> Complex {
        Complex::new(self.re - other.re, self.im - other.im)
    }
}

impl Sub<f64> for Complex {
    type Output = Complex;

    #[inline]
    fn sub(self, other: f64) -> Complex {
        Complex::new(self.re - other, self.im)
    }
}

impl Mul for Complex {
    type Output = Complex;

    #[inline]
    fn mul(self, other: Complex) -> Complex {
        Complex::new(
            self.re * other.re - self.im * other.im,
            self.re * other.im + self.im * other.re,
        )
    }
}

impl Mul<f64> for Complex {
    type Output = Complex;

    #[inline]
    fn mul(self, scalar: f64) -> Complex {
        Complex::new(self.re * scalar, self.im * scalar)
    }
}

impl Div for Complex {
    type Output = Complex;

    #[inline]
    fn div(self, other: Complex) -> Complex {
        let denominator = other.magnitude_squared();
        Complex::new(
            (self.re * other.re + self.im * other.im) / denominator,
            (self.im * other.re - self.re * other.im) / denominator,
        )
    }
}

impl Div<f64> for Complex {
    type Output = Complex;

    #[inline]
    fn div(self, scalar: f64) -> Complex {
        Complex::new(self.re / scalar, self.im / scalar)
    }
}

impl Neg for Complex {
    type Output = Complex;

    #[inline]
    fn neg(self) -> Complex {
        Complex::new(-self.re, -self.im)
    }
}
