#![forbid(unsafe_code)]

//! # Springs CLI
//!
//! ```bash
//! springs run                       # 250 g on the default spring, 2 s
//! springs run --scenario lab.toml   # Scenario file
//! springs classify -k 9 -m 1 -c 6   # Damping regime
//! ```

use std::io::{self, Write};

use anyhow::Context;
use springs::{Cli, Command, Scenario};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Command::Run(args) => {
            let scenario = Scenario::from_run_args(args)?;
            let trajectory = springs::run(&scenario)?;
            springs::output::write_trajectory(&mut out, &trajectory, args.format)
                .context("writing trajectory")?;
        }
        Command::Classify(args) => {
            let scenario = Scenario::from_args(&args.scenario)?;
            let rows = springs::classify(&scenario)?;
            springs::output::write_classification(&mut out, &rows, args.format)
                .context("writing classification")?;
        }
    }
    out.flush()?;

    Ok(())
}
