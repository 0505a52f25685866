//! Printing trajectories and classifications.

use std::io::{self, Write};

use crate::cli::OutputFormat;
use crate::simulate::{Classification, Trajectory};

const TRAJECTORY_COLUMNS: [&str; 9] = [
    "time",
    "spring",
    "displacement",
    "velocity",
    "position",
    "kinetic",
    "potential",
    "thermal",
    "total",
];

const CLASSIFICATION_COLUMNS: [&str; 9] = [
    "spring",
    "regime",
    "spring_constant",
    "mass",
    "damping",
    "critical_damping",
    "equilibrium",
    "period",
    "damped_period",
];

/// Writes a trajectory in the chosen format, one row per spring per sample.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn write_trajectory<W: Write>(
    out: &mut W,
    trajectory: &Trajectory,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(out, trajectory),
        OutputFormat::Csv => {
            writeln!(out, "{}", TRAJECTORY_COLUMNS.join(","))?;
            for sample in &trajectory.samples {
                for s in &sample.springs {
                    writeln!(
                        out,
                        "{},{},{},{},{},{},{},{},{}",
                        sample.time,
                        s.spring,
                        s.displacement,
                        s.velocity,
                        s.position,
                        s.kinetic,
                        s.potential,
                        s.thermal,
                        s.total
                    )?;
                }
            }
            Ok(())
        }
        OutputFormat::Table => {
            writeln!(
                out,
                "# {} (g = {} m/s²), dt = {} s",
                trajectory.body, trajectory.gravity, trajectory.dt
            )?;
            writeln!(
                out,
                "{:>9} {:>6} {:>13} {:>13} {:>10} {:>11} {:>11} {:>11} {:>11}",
                TRAJECTORY_COLUMNS[0],
                TRAJECTORY_COLUMNS[1],
                TRAJECTORY_COLUMNS[2],
                TRAJECTORY_COLUMNS[3],
                TRAJECTORY_COLUMNS[4],
                TRAJECTORY_COLUMNS[5],
                TRAJECTORY_COLUMNS[6],
                TRAJECTORY_COLUMNS[7],
                TRAJECTORY_COLUMNS[8],
            )?;
            for sample in &trajectory.samples {
                for s in &sample.springs {
                    writeln!(
                        out,
                        "{:>9.4} {:>6} {:>13.8} {:>13.8} {:>10.6} {:>11.6} {:>11.6} {:>11.6} {:>11.6}",
                        sample.time,
                        s.spring,
                        s.displacement,
                        s.velocity,
                        s.position,
                        s.kinetic,
                        s.potential,
                        s.thermal,
                        s.total
                    )?;
                }
            }
            Ok(())
        }
    }
}

/// Writes spring classifications in the chosen format.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn write_classification<W: Write>(
    out: &mut W,
    rows: &[Classification],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(out, rows),
        OutputFormat::Csv => {
            writeln!(out, "{}", CLASSIFICATION_COLUMNS.join(","))?;
            for row in rows {
                writeln!(
                    out,
                    "{},{},{},{},{},{},{},{},{}",
                    row.spring,
                    row.regime,
                    row.spring_constant,
                    row.mass,
                    row.damping,
                    row.critical_damping,
                    row.equilibrium_displacement,
                    row.period,
                    row.damped_period.map_or_else(String::new, |t| t.to_string())
                )?;
            }
            Ok(())
        }
        OutputFormat::Table => {
            for row in rows {
                writeln!(out, "spring {}: {}", row.spring, row.regime)?;
                writeln!(
                    out,
                    "  k = {} N/m, m = {} kg, c = {} N·s/m",
                    row.spring_constant, row.mass, row.damping
                )?;
                writeln!(out, "  critical damping  {:.6} N·s/m", row.critical_damping)?;
                writeln!(out, "  equilibrium       {:.6} m", row.equilibrium_displacement)?;
                writeln!(out, "  period            {:.6} s", row.period)?;
                if let Some(t) = row.damped_period {
                    writeln!(out, "  damped period     {t:.6} s")?;
                }
            }
            Ok(())
        }
    }
}

fn write_json<W: Write, T: serde::Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}
