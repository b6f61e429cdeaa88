//! The `decompose` command: one rotation from the command line.

use anyhow::{Context, Result, bail};
use swing_twist::{TrialOutcome, try_decompose, verify};

use crate::run::verify_params;
use crate::{DecomposeArgs, Format, report};

/// Decompose and check a single rotation
pub fn run(args: &DecomposeArgs) -> Result<()> {
    let params = verify_params(&args.check, true)?;

    let decomposition = try_decompose(args.rotation, args.axis, &params.decompose)
        .context("Cannot decompose input")?;
    let outcome = TrialOutcome {
        group: "input".to_string(),
        label: "command line".to_string(),
        rotation: args.rotation,
        direction: args.axis,
        expected: None,
        decomposition,
        report: verify(args.rotation, args.axis, &decomposition, &params),
    };

    match args.check.format {
        Format::Json => {
            let json = serde_json::to_string_pretty(&outcome)
                .context("Failed to serialize decomposition")?;
            println!("{json}");
        }
        Format::Pretty => report::print_outcome_detail(&outcome),
    }

    if !outcome.passed() {
        let failed: Vec<_> = outcome
            .report
            .failures()
            .iter()
            .map(|p| p.description())
            .collect();
        bail!("Decomposition failed checks: {}", failed.join(", "));
    }

    Ok(())
}
