//! The `run` command: fixed scenarios plus random trials.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};
use owo_colors::OwoColorize;
use swing_twist::{DecomposeParams, TrialSummary, VerifyParams, run_trials};

use crate::report;
use crate::{CheckArgs, Format, RunArgs};

/// Build verification parameters from the command line.
pub fn verify_params(check: &CheckArgs, fail_fast: bool) -> Result<VerifyParams> {
    let params = VerifyParams::new()
        .with_tolerance(check.tolerance)
        .with_fail_fast(fail_fast)
        .with_decompose_params(
            DecomposeParams::new().with_alignment_tolerance(check.alignment_tolerance),
        );
    params.validate().context("Invalid tolerance")?;
    Ok(params)
}

/// Run the full verification suite
pub fn run(args: &RunArgs) -> Result<()> {
    let params = verify_params(&args.check, !args.keep_going)?;
    let seed = args.seed.unwrap_or_else(clock_seed);

    let summary = run_trials(args.trials, seed, &params).context("Failed to run trials")?;

    match args.check.format {
        Format::Json => {
            let json = serde_json::to_string_pretty(&summary)
                .context("Failed to serialize trial summary")?;
            println!("{json}");
        }
        Format::Pretty => print_pretty(&summary, args.verbose),
    }

    if !summary.all_passed() {
        bail!(
            "{} of {} cases failed",
            summary.failed_count(),
            summary.outcomes.len()
        );
    }

    Ok(())
}

fn print_pretty(summary: &TrialSummary, verbose: bool) {
    let mut current_group: Option<&str> = None;
    let mut random_seen = 0usize;

    for outcome in &summary.outcomes {
        if current_group != Some(outcome.group.as_str()) {
            report::heading(&outcome.group);
            current_group = Some(outcome.group.as_str());
        }

        let is_random = outcome.group == swing_twist::RANDOM_GROUP;
        if verbose {
            report::print_outcome_detail(outcome);
        } else if !is_random || !outcome.passed() {
            report::print_outcome_line(outcome);
            if !outcome.passed() {
                report::print_checks(&outcome.report);
            }
        }

        if is_random && outcome.passed() {
            random_seen += 1;
        }
    }

    if !verbose && random_seen > 0 {
        println!("  {} {random_seen} random trials passed", "✓".green());
    }

    report::print_summary(summary);
}

// Low 64 bits of the nanosecond clock
#[allow(clippy::cast_possible_truncation)]
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use swing_twist::{DEFAULT_ALIGNMENT_TOLERANCE, DEFAULT_VERIFY_TOLERANCE};

    fn args(alignment_tolerance: f64, format: Format) -> RunArgs {
        RunArgs {
            trials: 20,
            seed: Some(7),
            keep_going: false,
            verbose: false,
            check: CheckArgs {
                tolerance: DEFAULT_VERIFY_TOLERANCE,
                alignment_tolerance,
                format,
            },
        }
    }

    #[test]
    fn passing_run_is_ok() {
        assert!(run(&args(DEFAULT_ALIGNMENT_TOLERANCE, Format::Pretty)).is_ok());
        assert!(run(&args(DEFAULT_ALIGNMENT_TOLERANCE, Format::Json)).is_ok());
    }

    #[test]
    fn failing_run_is_an_error() {
        // Everything counts as aligned, so the twist moves the reference axis
        let err = run(&args(3.0, Format::Pretty)).unwrap_err();
        assert!(err.to_string().contains("failed"));

        let err = run(&args(3.0, Format::Json)).unwrap_err();
        assert!(err.to_string().contains("failed"));
    }

    #[test]
    fn invalid_tolerance_is_an_error() {
        let mut bad = args(DEFAULT_ALIGNMENT_TOLERANCE, Format::Pretty);
        bad.check.tolerance = -1.0;

        let err = run(&bad).unwrap_err();
        assert!(err.to_string().contains("Invalid tolerance"));
    }
}
