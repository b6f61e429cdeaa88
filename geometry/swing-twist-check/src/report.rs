//! Human-readable output.

use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use owo_colors::OwoColorize;
use swing_twist::{Property, PropertyReport, TrialOutcome, TrialSummary};

/// Print a section heading
pub fn heading(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "=".repeat(title.chars().count()).bold());
}

/// Print the full diagnostic block for one case: inputs, outputs, angles
/// and property checks.
pub fn print_outcome_detail(outcome: &TrialOutcome) {
    let d = &outcome.decomposition;

    println!("{} {}", "decomposition test:".dimmed(), outcome.label);
    println!("  input:");
    print_quaternion("r", &outcome.rotation);
    print_vector("e_q", &outcome.direction);

    println!("  output ({} case):", d.case);
    print_unit_quaternion("p", &d.swing);
    println!("      theta_p: {:+.6}", d.swing_angle());
    print_unit_quaternion("q", &d.twist);
    println!("      theta_q: {:+.6}", d.twist_angle());

    println!("  check:");
    print_checks(&outcome.report);
    if let Some(expected) = outcome.expected {
        let line = format!("expected {expected} case");
        if outcome.case_matches() {
            println!("    {} {}", "✓".green(), line);
        } else {
            println!("    {} {} (got {})", "✗".red(), line, d.case);
        }
    }
    print_verdict(outcome.passed());
}

/// Print one line per case.
pub fn print_outcome_line(outcome: &TrialOutcome) {
    let status = if outcome.passed() {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    };
    println!(
        "  {} {:<36} {:>8}  theta_p {:+.6}  theta_q {:+.6}",
        status,
        outcome.label,
        outcome.decomposition.case.name(),
        outcome.decomposition.swing_angle(),
        outcome.decomposition.twist_angle(),
    );
}

/// Print each property with its residual.
pub fn print_checks(report: &PropertyReport) {
    for property in Property::ALL {
        let residual = report.residual(property);
        if report.holds(property) {
            println!(
                "    {} {:<30} {}",
                "✓".green(),
                property.description(),
                format!("{residual:.3e}").dimmed()
            );
        } else {
            println!(
                "    {} {:<30} {}",
                "✗".red(),
                property.description(),
                format!("{residual:.3e} > {:.1e}", report.tolerance).red()
            );
        }
    }
}

/// Print the closing verdict for one case.
pub fn print_verdict(passed: bool) {
    if passed {
        println!("  {}", "Good.".green());
    } else {
        println!("  {}", "Something wrong.".red().bold());
    }
}

/// Print the totals for a run.
pub fn print_summary(summary: &TrialSummary) {
    let passed = summary.passed_count();
    let failed = summary.failed_count();

    println!();
    println!(
        "{} passed, {} failed (seed {})",
        passed.to_string().green(),
        if failed > 0 {
            failed.to_string().red().to_string()
        } else {
            failed.to_string()
        },
        summary.seed
    );
    if summary.stopped_early {
        println!(
            "{}",
            "Stopped at the first failure; rerun with --keep-going to see the rest.".yellow()
        );
    }
    if summary.all_passed() {
        println!("{}", "All OK.".green().bold());
    }
}

fn print_quaternion(name: &str, q: &Quaternion<f64>) {
    println!("    quaternion {name}");
    println!("      w: {:+.6}", q.w);
    println!("      x: {:+.6}", q.i);
    println!("      y: {:+.6}", q.j);
    println!("      z: {:+.6}", q.k);
}

fn print_unit_quaternion(name: &str, q: &UnitQuaternion<f64>) {
    print_quaternion(name, q.quaternion());
}

fn print_vector(name: &str, v: &Vector3<f64>) {
    println!("    vector {name}");
    println!("      x: {:+.6}", v.x);
    println!("      y: {:+.6}", v.y);
    println!("      z: {:+.6}", v.z);
}
