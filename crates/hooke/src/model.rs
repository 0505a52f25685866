//! Two-spring simulation driver.
//!
//! The model owns both springs and advances them once per animation frame.
//! Frame times are clamped before integrating so a stalled frame (a tab
//! switched away, a debugger pause) cannot throw the masses across the
//! screen.

use tracing::{debug, trace};

use crate::body::Body;
use crate::error::SpringError;
use crate::spring::Spring;

/// Longest frame the model will integrate in one step (s).
pub const MAX_DT: f64 = 0.3;

/// Height of both spring anchors in the default layout (m).
pub const DEFAULT_ANCHOR: f64 = 2.1;

/// Natural length of both springs in the default layout (m).
pub const DEFAULT_NATURAL_LENGTH: f64 = 0.5;

/// Returns a time delta for a given number of frames per second.
///
/// # Example
///
/// ```rust
/// use hooke::fps;
///
/// assert_eq!(fps(60), 1.0 / 60.0);
/// ```
#[inline]
pub fn fps(n: u32) -> f64 {
    1.0 / n as f64
}

/// Playback speed of the simulation clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeSpeed {
    #[default]
    Normal,
    /// One eighth of real time.
    Slow,
}

impl TimeSpeed {
    /// Multiplier applied to frame times.
    pub const fn factor(self) -> f64 {
        match self {
            TimeSpeed::Normal => 1.0,
            TimeSpeed::Slow => 0.125,
        }
    }
}

/// Two springs side by side sharing a clock and a planet.
///
/// # Example
///
/// ```rust
/// use hooke::{Body, Mass, Model};
///
/// # fn main() -> Result<(), hooke::SpringError> {
/// let mut model = Model::default();
/// let rest = model.spring(0).rest_position();
/// model.spring_mut(0).attach(Mass::at(0.25, rest))?;
/// model.set_body(Body::Moon)?;
///
/// for _ in 0..60 {
///     model.step(1.0 / 60.0);
/// }
/// assert!(model.elapsed() > 0.99);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    springs: [Spring; 2],
    initial: ([Spring; 2], Body),
    body: Body,
    time_speed: TimeSpeed,
    playing: bool,
    elapsed: f64,
}

impl Model {
    /// Creates a playing model around two springs placed on `body`.
    /// [`Model::reset`] returns to exactly this state.
    ///
    /// # Errors
    ///
    /// Fails for a custom body with negative or non-finite gravity.
    pub fn new(mut springs: [Spring; 2], body: Body) -> Result<Self, SpringError> {
        for spring in &mut springs {
            spring.set_gravity(body.gravity())?;
        }
        Ok(Self::from_parts(springs, body))
    }

    fn from_parts(springs: [Spring; 2], body: Body) -> Self {
        Self {
            initial: (springs.clone(), body),
            springs,
            body,
            time_speed: TimeSpeed::Normal,
            playing: true,
            elapsed: 0.0,
        }
    }

    pub fn springs(&self) -> &[Spring; 2] {
        &self.springs
    }

    /// Returns spring `index` (0 or 1).
    ///
    /// # Panics
    ///
    /// Panics if `index > 1`.
    pub fn spring(&self, index: usize) -> &Spring {
        &self.springs[index]
    }

    /// Mutable access to spring `index` (0 or 1).
    ///
    /// # Panics
    ///
    /// Panics if `index > 1`.
    pub fn spring_mut(&mut self, index: usize) -> &mut Spring {
        &mut self.springs[index]
    }

    pub fn body(&self) -> Body {
        self.body
    }

    /// Takes both springs to another planet.
    ///
    /// # Errors
    ///
    /// Fails for a custom body with negative or non-finite gravity; neither
    /// spring is changed.
    pub fn set_body(&mut self, body: Body) -> Result<(), SpringError> {
        let g = body.gravity();
        let mut springs = self.springs.clone();
        for spring in &mut springs {
            spring.set_gravity(g)?;
        }
        debug!(%body, gravity = g, "changing planet");
        self.springs = springs;
        self.body = body;
        Ok(())
    }

    pub fn time_speed(&self) -> TimeSpeed {
        self.time_speed
    }

    pub fn set_time_speed(&mut self, speed: TimeSpeed) {
        self.time_speed = speed;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Simulated seconds since creation or the last reset.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Advances the model by one animation frame of `dt` seconds.
    ///
    /// Nothing happens while paused or for a non-positive frame time.
    /// Otherwise `dt` is clamped to [`MAX_DT`] and scaled by the time speed.
    /// Returns the simulated time that passed.
    pub fn step(&mut self, dt: f64) -> f64 {
        if !self.playing || dt.is_nan() || dt <= 0.0 {
            return 0.0;
        }
        let dt = if dt > MAX_DT {
            debug!(dt, max = MAX_DT, "clamping frame time");
            MAX_DT
        } else {
            dt
        };
        let dt = dt * self.time_speed.factor();
        self.advance(dt);
        dt
    }

    /// Advances by a single 60 FPS frame, even while paused.
    pub fn step_forward(&mut self) -> f64 {
        let dt = fps(60);
        self.advance(dt);
        dt
    }

    /// Restores the springs and planet given to [`Model::new`], normal
    /// speed and a running clock at zero.
    pub fn reset(&mut self) {
        debug!("resetting model");
        let (springs, body) = self.initial.clone();
        *self = Self::from_parts(springs, body);
    }

    // Springs are independent; spring 1 always goes before spring 2.
    fn advance(&mut self, dt: f64) {
        for (index, spring) in self.springs.iter_mut().enumerate() {
            spring.step(dt);
            trace!(
                spring = index + 1,
                displacement = spring.displacement(),
                velocity = spring.velocity(),
                "stepped"
            );
        }
        self.elapsed += dt;
    }
}

impl Default for Model {
    /// Two bare springs at the default anchor and natural length, on Earth.
    fn default() -> Self {
        let spring = Spring::new(DEFAULT_ANCHOR, DEFAULT_NATURAL_LENGTH);
        Self::from_parts([spring.clone(), spring], Body::Earth)
    }
}
