//! Swing-twist verification harness
//!
//! Exercises the decomposition on fixed scenarios and random inputs and
//! reports whether every defining property holds.
//!
//! # Commands
//!
//! - `swing-twist-check run` - Fixed scenarios plus seeded random trials
//! - `swing-twist-check decompose --rotation w,x,y,z --axis x,y,z` -
//!   Decompose and check a single rotation
//!
//! Both commands exit with a non-zero status when any check fails.

mod decompose;
mod report;
mod run;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use nalgebra::{Quaternion, Vector3};
use swing_twist::{DEFAULT_ALIGNMENT_TOLERANCE, DEFAULT_VERIFY_TOLERANCE};

/// Swing-twist decomposition checks
#[derive(Parser)]
#[command(name = "swing-twist-check")]
#[command(about = "Verify the swing-twist rotation decomposition", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the fixed scenarios followed by random trials
    Run(RunArgs),

    /// Decompose a single rotation and check the result
    Decompose(DecomposeArgs),
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Colored, human-readable text
    Pretty,
    /// Machine-readable JSON
    Json,
}

/// Options shared by every command.
#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Tolerance for every property check
    #[arg(long, default_value_t = DEFAULT_VERIFY_TOLERANCE)]
    pub tolerance: f64,

    /// Distance below which the rotated reference axis counts as unmoved or reversed
    #[arg(long, default_value_t = DEFAULT_ALIGNMENT_TOLERANCE)]
    pub alignment_tolerance: f64,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Pretty)]
    pub format: Format,
}

/// Arguments for `run`.
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Number of random trials after the fixed scenarios
    #[arg(long, default_value_t = 1000)]
    pub trials: usize,

    /// Seed for the random trials (default: derived from the clock)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Keep going after the first failure
    #[arg(long)]
    pub keep_going: bool,

    /// Print the full diagnostic block for every case
    #[arg(short, long)]
    pub verbose: bool,

    #[command(flatten)]
    pub check: CheckArgs,
}

/// Arguments for `decompose`.
#[derive(Debug, Clone, Args)]
pub struct DecomposeArgs {
    /// Rotation quaternion as `w,x,y,z` (need not be normalized)
    #[arg(long, value_parser = parse_quaternion, allow_hyphen_values = true)]
    pub rotation: Quaternion<f64>,

    /// Reference direction as `x,y,z` (need not be normalized)
    #[arg(long, value_parser = parse_vector, allow_hyphen_values = true)]
    pub axis: Vector3<f64>,

    #[command(flatten)]
    pub check: CheckArgs,
}

fn parse_components<const N: usize>(s: &str) -> std::result::Result<[f64; N], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(format!(
            "expected {N} comma-separated numbers, got {}",
            parts.len()
        ));
    }

    let mut out = [0.0; N];
    for (slot, part) in out.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|e| format!("invalid number '{part}': {e}"))?;
    }
    Ok(out)
}

fn parse_quaternion(s: &str) -> std::result::Result<Quaternion<f64>, String> {
    let [w, x, y, z] = parse_components::<4>(s)?;
    Ok(Quaternion::new(w, x, y, z))
}

fn parse_vector(s: &str) -> std::result::Result<Vector3<f64>, String> {
    let [x, y, z] = parse_components::<3>(s)?;
    Ok(Vector3::new(x, y, z))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run::run(&args),
        Commands::Decompose(args) => decompose::run(&args),
    }
}
