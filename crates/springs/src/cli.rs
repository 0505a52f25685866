//! Command-line interface for `springs`.
//!
//! # Examples
//!
//! ```bash
//! # 250 g on the default spring, released at its natural length
//! springs run
//!
//! # The reference scenario: 100 g on a 6 N/m spring, 5 cm above rest
//! springs run -k 6 -m 0.1 -x 0.05 --dt 0.01 --duration 0.81
//!
//! # Load a scenario and take it to Jupiter
//! springs run --scenario lab.toml --planet jupiter --format csv
//!
//! # Which damping regime is this?
//! springs classify -k 9 -m 1 -c 6
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use hooke::Body;

/// Hanging springs, integrated in closed form.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "springs",
    author,
    version,
    about = "Simulate masses hanging on damped springs",
    long_about = "Runs one or two damped, gravity-loaded springs with an exact \
                  closed-form integrator and prints the trajectory."
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    ///
    /// `RUST_LOG` takes precedence when set
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Integrate a scenario and print the trajectory
    Run(RunArgs),

    /// Print the damping regime and characteristic values of each spring
    Classify(ClassifyArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Timestep (s), at most 0.3
    #[arg(long, env = "SPRINGS_DT")]
    pub dt: Option<f64>,

    /// Simulated time to run for (s)
    #[arg(long, short = 't', env = "SPRINGS_DURATION")]
    pub duration: Option<f64>,

    /// Print every Nth step
    #[arg(long, short = 'e', env = "SPRINGS_EVERY")]
    pub every: Option<usize>,

    /// Run the clock at one eighth of real time
    #[arg(long, env = "SPRINGS_SLOW")]
    pub slow: bool,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t, env = "SPRINGS_FORMAT")]
    pub format: OutputFormat,
}

/// Arguments for the `classify` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t, env = "SPRINGS_FORMAT")]
    pub format: OutputFormat,
}

/// Scenario file and the overrides layered on top of it.
///
/// Spring parameters apply to the first spring.
#[derive(Args, Debug, Clone, Default)]
pub struct ScenarioArgs {
    /// TOML scenario file
    #[arg(long, short = 's', env = "SPRINGS_SCENARIO")]
    pub scenario: Option<PathBuf>,

    /// Spring constant (N/m)
    #[arg(long, short = 'k', allow_negative_numbers = true, env = "SPRINGS_SPRING_CONSTANT")]
    pub spring_constant: Option<f64>,

    /// Attached mass (kg)
    #[arg(long, short = 'm', allow_negative_numbers = true, env = "SPRINGS_MASS")]
    pub mass: Option<f64>,

    /// Damping coefficient (N·s/m)
    #[arg(long, short = 'c', allow_negative_numbers = true, env = "SPRINGS_DAMPING")]
    pub damping: Option<f64>,

    /// Initial displacement from the natural length (m, up is positive)
    #[arg(long, short = 'x', allow_negative_numbers = true, env = "SPRINGS_DISPLACEMENT")]
    pub displacement: Option<f64>,

    /// Initial velocity (m/s, up is positive)
    #[arg(long, allow_negative_numbers = true, env = "SPRINGS_VELOCITY")]
    pub velocity: Option<f64>,

    /// Planet: moon, earth, jupiter, planet-x, zero-g
    #[arg(long, short = 'p', env = "SPRINGS_PLANET")]
    pub planet: Option<Body>,

    /// Custom gravitational acceleration (m/s²)
    #[arg(
        long,
        short = 'g',
        allow_negative_numbers = true,
        conflicts_with = "planet",
        env = "SPRINGS_GRAVITY"
    )]
    pub gravity: Option<f64>,
}

/// How results are printed.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned columns
    #[default]
    Table,
    /// Comma-separated values with a header row
    Csv,
    /// Pretty-printed JSON
    Json,
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Default log filter for the verbosity count.
    #[must_use]
    pub const fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
