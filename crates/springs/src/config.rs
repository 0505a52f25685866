//! Scenario configuration.
//!
//! A [`Scenario`] is the single description of a run, resolved from a TOML
//! file, `SPRINGS_*` environment variables and command-line flags. Flags and
//! environment win over the file, the file wins over the defaults.
//!
//! ```toml
//! dt = 0.01
//! duration = 5.0
//! every = 10
//! planet = "moon"
//!
//! [[springs]]
//! spring_constant = 6.0
//! mass = 0.1
//! displacement = 0.05
//!
//! [[springs]]
//! spring_constant = 12.0
//! mass = 0.3
//! damping = 1.5
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use hooke::{
    fps, Body, Mass, Model, ParseBodyError, Spring, SpringError, TimeSpeed, DEFAULT_ANCHOR,
    DEFAULT_NATURAL_LENGTH, DEFAULT_SPRING_CONSTANT, MAX_DT,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::{RunArgs, ScenarioArgs};

/// Number of springs the model holds.
pub const MAX_SPRINGS: usize = 2;

/// Mass hung on a spring when the scenario names none (kg).
pub const DEFAULT_MASS: f64 = 0.25;

/// Simulated time of a run when the scenario names none (s).
pub const DEFAULT_DURATION: f64 = 2.0;

/// One spring and the mass hanging on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpringConfig {
    /// Spring constant (N/m).
    pub spring_constant: f64,
    /// Attached mass (kg).
    pub mass: f64,
    /// Damping coefficient (N·s/m).
    pub damping: f64,
    /// Initial displacement from the natural length (m).
    pub displacement: f64,
    /// Initial velocity (m/s).
    pub velocity: f64,
    /// Unloaded length of the spring (m).
    pub natural_length: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            spring_constant: DEFAULT_SPRING_CONSTANT,
            mass: DEFAULT_MASS,
            damping: 0.0,
            displacement: 0.0,
            velocity: 0.0,
            natural_length: DEFAULT_NATURAL_LENGTH,
        }
    }
}

impl SpringConfig {
    /// Builds the spring with its mass attached.
    ///
    /// # Errors
    ///
    /// Returns a [`SpringError`] for parameters the integrator rejects.
    pub fn build(&self) -> Result<Spring, SpringError> {
        let mut spring = Spring::new(DEFAULT_ANCHOR, self.natural_length);
        spring.set_spring_constant(self.spring_constant)?;
        spring.set_damping_coefficient(self.damping)?;
        let mut mass = Mass::at(self.mass, spring.rest_position() + self.displacement);
        mass.velocity = self.velocity;
        spring.attach(mass)?;
        Ok(spring)
    }
}

/// Everything needed to run or classify a set of springs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scenario {
    /// Timestep (s).
    pub dt: f64,
    /// Simulated time to run for (s).
    pub duration: f64,
    /// Print every Nth step.
    pub every: usize,
    /// Run the clock at one eighth speed.
    pub slow: bool,
    /// Planet name or gravity value, see [`Body`].
    pub planet: Option<String>,
    /// Custom gravitational acceleration (m/s²).
    pub gravity: Option<f64>,
    /// Up to [`MAX_SPRINGS`] springs; empty means one default spring.
    pub springs: Vec<SpringConfig>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            dt: fps(60),
            duration: DEFAULT_DURATION,
            every: 1,
            slow: false,
            planet: None,
            gravity: None,
            springs: Vec::new(),
        }
    }
}

impl Scenario {
    /// Create a scenario with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a TOML scenario.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses a TOML scenario file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if it is not a valid scenario.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario = Self::from_toml_str(&source)?;
        debug!(path = %path.display(), springs = scenario.springs.len(), "loaded scenario");
        Ok(scenario)
    }

    /// Loads the file named by `args` (if any) and layers the flags on top.
    ///
    /// # Errors
    ///
    /// Fails if the scenario file cannot be loaded.
    pub fn from_args(args: &ScenarioArgs) -> Result<Self, ConfigError> {
        let mut scenario = match &args.scenario {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        scenario.apply(args);
        Ok(scenario)
    }

    /// [`Scenario::from_args`] plus the timing flags of `springs run`.
    ///
    /// # Errors
    ///
    /// Fails if the scenario file cannot be loaded.
    pub fn from_run_args(args: &RunArgs) -> Result<Self, ConfigError> {
        let mut scenario = Self::from_args(&args.scenario)?;
        if let Some(dt) = args.dt {
            scenario.dt = dt;
        }
        if let Some(duration) = args.duration {
            scenario.duration = duration;
        }
        if let Some(every) = args.every {
            scenario.every = every;
        }
        scenario.slow |= args.slow;
        Ok(scenario)
    }

    /// Overrides file values with command-line flags. Spring parameters go
    /// to the first spring, which is created if the scenario has none.
    pub fn apply(&mut self, args: &ScenarioArgs) {
        if let Some(body) = args.planet {
            if let Body::Custom(g) = body {
                self.planet = None;
                self.gravity = Some(g);
            } else {
                self.planet = Some(body.name().to_string());
                self.gravity = None;
            }
        }
        if let Some(g) = args.gravity {
            self.planet = None;
            self.gravity = Some(g);
        }

        let has_spring_flags = args.spring_constant.is_some()
            || args.mass.is_some()
            || args.damping.is_some()
            || args.displacement.is_some()
            || args.velocity.is_some();
        if !has_spring_flags {
            return;
        }
        if self.springs.is_empty() {
            self.springs.push(SpringConfig::default());
        }
        let first = &mut self.springs[0];
        if let Some(k) = args.spring_constant {
            first.spring_constant = k;
        }
        if let Some(m) = args.mass {
            first.mass = m;
        }
        if let Some(c) = args.damping {
            first.damping = c;
        }
        if let Some(x) = args.displacement {
            first.displacement = x;
        }
        if let Some(v) = args.velocity {
            first.velocity = v;
        }
    }

    /// The springs to load, with one default spring standing in for none.
    pub fn spring_configs(&self) -> Vec<SpringConfig> {
        if self.springs.is_empty() {
            vec![SpringConfig::default()]
        } else {
            self.springs.clone()
        }
    }

    /// Resolves `planet` / `gravity` to a [`Body`].
    ///
    /// # Errors
    ///
    /// Fails if both are given, the planet is unknown, or the gravity is
    /// negative or not finite.
    pub fn body(&self) -> Result<Body, ConfigError> {
        match (&self.planet, self.gravity) {
            (Some(_), Some(_)) => Err(ConfigError::PlanetAndGravity),
            (Some(name), None) => name.parse().map_err(|source| ConfigError::Planet {
                name: name.clone(),
                source,
            }),
            (None, Some(g)) if !g.is_finite() || g < 0.0 => Err(ConfigError::Gravity(g)),
            (None, Some(g)) => Ok(Body::Custom(g)),
            (None, None) => Ok(Body::Earth),
        }
    }

    /// Number of integration steps in the run.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "validated finite and positive"
    )]
    pub fn steps(&self) -> usize {
        (self.duration / self.dt).round() as usize
    }

    /// Validate the scenario.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.dt.is_finite() || self.dt <= 0.0 || self.dt > MAX_DT {
            return Err(ConfigError::Timestep(self.dt));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(ConfigError::Duration(self.duration));
        }
        if self.every == 0 {
            return Err(ConfigError::ZeroEvery);
        }
        if self.springs.len() > MAX_SPRINGS {
            return Err(ConfigError::TooManySprings(self.springs.len()));
        }
        self.body()?;
        for (index, spring) in self.spring_configs().iter().enumerate() {
            spring.build().map_err(|source| ConfigError::Spring {
                index: index + 1,
                source,
            })?;
        }
        Ok(())
    }

    /// Builds the model for a validated scenario. A second spring that the
    /// scenario does not describe hangs empty.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Scenario::validate`].
    pub fn build_model(&self) -> Result<Model, ConfigError> {
        self.validate()?;
        let configs = self.spring_configs();
        let spring = |index: usize| -> Result<Spring, ConfigError> {
            configs.get(index).map_or_else(
                || Ok(Spring::new(DEFAULT_ANCHOR, DEFAULT_NATURAL_LENGTH)),
                |config| {
                    config.build().map_err(|source| ConfigError::Spring {
                        index: index + 1,
                        source,
                    })
                },
            )
        };
        let body = self.body()?;
        let mut model = Model::new([spring(0)?, spring(1)?], body)
            .map_err(|_| ConfigError::Gravity(body.gravity()))?;
        if self.slow {
            model.set_time_speed(TimeSpeed::Slow);
        }
        Ok(model)
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Scenario file could not be read.
    #[error("cannot read scenario {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Scenario file is not valid TOML or has unknown keys.
    #[error("invalid scenario: {0}")]
    Parse(#[from] toml::de::Error),

    /// Timestep outside `(0, MAX_DT]`.
    #[error("dt must be greater than 0 and at most {max} s, got {0}", max = MAX_DT)]
    Timestep(f64),

    /// Negative or non-finite duration.
    #[error("duration must be a finite, non-negative number of seconds, got {0}")]
    Duration(f64),

    /// `every = 0` would never print.
    #[error("every must be at least 1")]
    ZeroEvery,

    /// More springs than the model holds.
    #[error("at most {max} springs are supported, got {0}", max = MAX_SPRINGS)]
    TooManySprings(usize),

    /// Both a planet and a custom gravity were given.
    #[error("give either a planet or a gravity value, not both")]
    PlanetAndGravity,

    /// Planet name not recognised.
    #[error("planet {name:?}: {source}")]
    Planet {
        name: String,
        #[source]
        source: ParseBodyError,
    },

    /// Negative or non-finite custom gravity.
    #[error("gravity must be a finite, non-negative acceleration, got {0}")]
    Gravity(f64),

    /// A spring's parameters were rejected.
    #[error("spring {index}: {source}")]
    Spring {
        index: usize,
        #[source]
        source: SpringError,
    },
}
