//! Verification runs over the fixed scenarios and random inputs.

use nalgebra::{Quaternion, Vector3};
use rand::SeedableRng;
use rand::rngs::StdRng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cases::canonical_cases;
use crate::decompose::{Decomposition, DecompositionCase, decompose};
use crate::error::DecomposeResult;
use crate::params::VerifyParams;
use crate::sampling::{random_unit_direction, random_unit_quaternion};
use crate::verify::{PropertyReport, verify};

/// Group name used for randomly drawn trials.
pub const RANDOM_GROUP: &str = "random";

/// Result of decomposing and checking one input.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrialOutcome {
    /// Group the input belongs to.
    pub group: String,
    /// Short description of the input.
    pub label: String,
    /// Rotation as supplied.
    pub rotation: Quaternion<f64>,
    /// Reference direction as supplied.
    pub direction: Vector3<f64>,
    /// Expected branch, if the input prescribes one.
    pub expected: Option<DecompositionCase>,
    /// Computed decomposition.
    pub decomposition: Decomposition,
    /// Property residuals.
    pub report: PropertyReport,
}

impl TrialOutcome {
    fn evaluate(
        group: &str,
        label: String,
        rotation: Quaternion<f64>,
        direction: Vector3<f64>,
        expected: Option<DecompositionCase>,
        params: &VerifyParams,
    ) -> Self {
        let decomposition = decompose(rotation, direction, &params.decompose);
        let report = verify(rotation, direction, &decomposition, params);
        Self {
            group: group.to_string(),
            label,
            rotation,
            direction,
            expected,
            decomposition,
            report,
        }
    }

    /// True when the decomposition took the expected branch.
    #[must_use]
    pub fn case_matches(&self) -> bool {
        self.expected.is_none_or(|expected| expected == self.decomposition.case)
    }

    /// True when every property holds and the branch matches.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.report.passed() && self.case_matches()
    }
}

/// Outcome of [`run_trials`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrialSummary {
    /// Seed used for the random trials.
    pub seed: u64,
    /// Number of random trials requested.
    pub requested_trials: usize,
    /// Whether the run stopped at a failure before covering every input.
    pub stopped_early: bool,
    /// Every evaluated input, in order.
    pub outcomes: Vec<TrialOutcome>,
}

impl TrialSummary {
    /// Number of inputs that passed.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    /// Number of inputs that failed.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.passed_count()
    }

    /// True when every evaluated input passed and none were skipped.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        !self.stopped_early && self.outcomes.iter().all(TrialOutcome::passed)
    }

    /// First failing input, if any.
    #[must_use]
    pub fn first_failure(&self) -> Option<&TrialOutcome> {
        self.outcomes.iter().find(|o| !o.passed())
    }

    /// Outcomes belonging to `group`.
    pub fn group<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a TrialOutcome> + 'a {
        self.outcomes.iter().filter(move |o| o.group == group)
    }
}

/// Runs the canonical scenarios followed by `count` random trials.
///
/// Random inputs are drawn from a [`StdRng`] seeded with `seed`, so a run is
/// reproducible. With [`VerifyParams::fail_fast`] set the run stops at the
/// first failing input.
///
/// # Errors
///
/// Returns [`DecomposeError::InvalidParameter`](crate::DecomposeError) if
/// `params` fails validation.
///
/// # Example
///
/// ```
/// use swing_twist::{VerifyParams, run_trials};
///
/// let summary = run_trials(100, 42, &VerifyParams::default()).unwrap();
/// assert!(summary.all_passed());
/// ```
pub fn run_trials(
    count: usize,
    seed: u64,
    params: &VerifyParams,
) -> DecomposeResult<TrialSummary> {
    params.validate()?;
    let total = canonical_len() + count;

    info!(count, seed, tolerance = params.tolerance, "Starting decomposition trials");

    let mut summary = TrialSummary {
        seed,
        requested_trials: count,
        stopped_early: false,
        outcomes: Vec::with_capacity(total),
    };

    let fixed = canonical_cases().into_iter().flat_map(|group| {
        group.cases.into_iter().map(move |case| {
            TrialOutcome::evaluate(
                group.name,
                case.label.to_string(),
                case.rotation,
                case.direction,
                Some(case.expected),
                params,
            )
        })
    });

    let mut rng = StdRng::seed_from_u64(seed);
    let random = (0..count).map(move |i| {
        let rotation = random_unit_quaternion(&mut rng).into_inner();
        let direction = random_unit_direction(&mut rng).into_inner();
        TrialOutcome::evaluate(
            RANDOM_GROUP,
            format!("trial {i}"),
            rotation,
            direction,
            None,
            params,
        )
    });

    for outcome in fixed.chain(random) {
        let passed = outcome.passed();
        if !passed {
            warn!(
                group = %outcome.group,
                label = %outcome.label,
                case = outcome.decomposition.case.name(),
                "Decomposition check failed"
            );
        }
        summary.outcomes.push(outcome);
        if !passed && params.fail_fast {
            summary.stopped_early = summary.outcomes.len() < total;
            break;
        }
    }

    info!(
        passed = summary.passed_count(),
        failed = summary.failed_count(),
        "Decomposition trials complete"
    );

    Ok(summary)
}

fn canonical_len() -> usize {
    canonical_cases().iter().map(|g| g.cases.len()).sum()
}
