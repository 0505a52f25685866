#![forbid(unsafe_code)]

//! # Springs
//!
//! Command-line scenarios for the [`hooke`] spring integrator.
//!
//! A scenario hangs one or two masses on damped springs on a chosen planet,
//! runs the two-spring model for a while and reports the trajectory and
//! energy of every mass.
//!
//! ## Usage
//!
//! ```bash
//! springs run -k 6 -m 0.1 -x 0.05 --dt 0.01 --duration 0.81
//! springs run --scenario lab.toml --format json
//! springs classify -k 9 -m 1 -c 6 --planet zero-g
//! ```

pub mod cli;
pub mod config;
pub mod output;
pub mod simulate;

pub use cli::{Cli, Command, OutputFormat};
pub use config::{ConfigError, Scenario, SpringConfig};
pub use simulate::{classify, run, Classification, Sample, SpringSample, Trajectory};
