//! Fixed decomposition scenarios through the public API.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, PI};

use approx::assert_relative_eq;
use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use rand::SeedableRng;
use rand::rngs::StdRng;
use swing_twist::prelude::*;
use swing_twist::{
    RANDOM_GROUP, canonical_cases, random_unit_direction, random_unit_quaternion, run_trials,
};

fn check(r: Quaternion<f64>, e_q: Vector3<f64>) -> (Decomposition, PropertyReport) {
    let d = decompose(r, e_q, &DecomposeParams::default());
    let report = verify(r, e_q, &d, &VerifyParams::default());
    (d, report)
}

#[test]
fn identity_with_x_reference() {
    let (d, report) = check(Quaternion::new(1.0, 0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));

    assert_eq!(d.case, DecompositionCase::Aligned);
    assert_eq!(d.swing, UnitQuaternion::identity());
    assert_eq!(d.twist, UnitQuaternion::identity());
    assert!(report.passed());
}

#[test]
fn half_turn_about_x_with_x_reference() {
    let r = Quaternion::new(0.0, 1.0, 0.0, 0.0);
    let (d, report) = check(r, Vector3::new(1.0, 0.0, 0.0));

    assert_eq!(d.case, DecompositionCase::Aligned);
    assert_eq!(d.swing, UnitQuaternion::identity());
    assert_relative_eq!(d.twist.into_inner(), r, epsilon = 1e-12);
    assert_relative_eq!(d.twist_angle(), PI, epsilon = 1e-12);
    assert!(report.passed());
}

#[test]
fn half_turn_about_x_with_z_reference() {
    let r = Quaternion::new(0.0, 1.0, 0.0, 0.0);
    let (d, report) = check(r, Vector3::new(0.0, 0.0, 1.0));

    assert_eq!(d.case, DecompositionCase::Flipped);
    assert_relative_eq!(d.swing.into_inner(), r, epsilon = 1e-12);
    assert_eq!(d.twist, UnitQuaternion::identity());
    assert!(report.passed());
}

#[test]
fn quarter_turn_about_x_with_z_reference() {
    let r = Quaternion::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0, 0.0);
    let (d, report) = check(r, Vector3::new(0.0, 0.0, 1.0));

    assert_eq!(d.case, DecompositionCase::General);
    assert_relative_eq!(d.swing_angle(), FRAC_PI_2, epsilon = 1e-12);
    assert_relative_eq!(d.swing_axis_vector(), Vector3::x(), epsilon = 1e-12);
    assert!(report.passed(), "{:?}", report.failures());
    for property in Property::ALL {
        assert!(report.residual(property) < 1e-12, "{property}");
    }
}

#[test]
fn thousand_random_trials() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for i in 0..1000 {
        let r = random_unit_quaternion(&mut rng).into_inner();
        let e_q = random_unit_direction(&mut rng).into_inner();
        let (d, report) = check(r, e_q);

        assert!(
            report.passed(),
            "trial {i}: {:?} failed ({}) for r = {r:?}, e_q = {e_q:?}",
            report.failures(),
            d.case
        );
    }
}

#[test]
fn tilts_just_past_the_alignment_tolerance() {
    let z = Vector3::z();

    for tilt in [5e-10, 1e-9, 2e-9, 1e-8, 1e-7] {
        let r = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), tilt).into_inner();
        let (d, report) = check(r, z);
        assert_eq!(d.case, DecompositionCase::General, "tilt {tilt:e}");
        assert!(report.passed(), "tilt {tilt:e}: {:?}", report.failures());
        assert_relative_eq!(d.swing_angle(), tilt, max_relative = 1e-6);

        let r = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), PI - tilt).into_inner();
        let (d, report) = check(r, z);
        assert_eq!(d.case, DecompositionCase::General, "flip - {tilt:e}");
        assert!(report.passed(), "flip - {tilt:e}: {:?}", report.failures());
    }
}

#[test]
fn canonical_cases_match_scenarios() {
    let groups = canonical_cases();
    let cases: Vec<_> = groups.iter().flat_map(|g| g.cases.iter()).collect();

    assert_eq!(cases.len(), 4);
    assert_eq!(cases[0].expected, DecompositionCase::Aligned);
    assert_eq!(cases[1].expected, DecompositionCase::Aligned);
    assert_eq!(cases[2].expected, DecompositionCase::Flipped);
    assert_eq!(cases[3].expected, DecompositionCase::General);
}

#[test]
fn full_run_with_default_parameters() {
    let summary = run_trials(1000, 2024, &VerifyParams::default()).unwrap();

    assert!(summary.all_passed(), "{:?}", summary.first_failure());
    assert_eq!(summary.group(RANDOM_GROUP).count(), 1000);
    assert_eq!(summary.seed, 2024);
}

#[test]
fn checked_and_unchecked_agree() {
    let mut rng = StdRng::seed_from_u64(11);
    let params = DecomposeParams::default();

    for _ in 0..50 {
        let r = random_unit_quaternion(&mut rng).into_inner() * 3.0;
        let e_q = random_unit_direction(&mut rng).into_inner() * 0.25;

        assert_eq!(try_decompose(r, e_q, &params).unwrap(), decompose(r, e_q, &params));
    }
}

#[cfg(feature = "serde")]
#[test]
fn summary_serializes_to_json() {
    let summary = run_trials(5, 1, &VerifyParams::default()).unwrap();
    let json = serde_json::to_string(&summary).unwrap();

    assert!(json.contains("\"seed\":1"));
    assert!(json.contains("random"));
}
