//! Fixed verification scenarios.

use std::f64::consts::FRAC_1_SQRT_2;

use nalgebra::{Quaternion, Vector3};

use crate::decompose::DecompositionCase;

/// One input to the decomposition with its expected branch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Case {
    /// Short description.
    pub label: &'static str,
    /// Rotation to decompose.
    pub rotation: Quaternion<f64>,
    /// Reference direction.
    pub direction: Vector3<f64>,
    /// Branch the decomposition should take.
    pub expected: DecompositionCase,
}

/// A named group of cases reported together.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseGroup {
    /// Group heading.
    pub name: &'static str,
    /// Cases in this group.
    pub cases: Vec<Case>,
}

/// The fixed scenarios: reference axis unmoved, reversed, and a quarter
/// turn across it.
#[must_use]
pub fn canonical_cases() -> Vec<CaseGroup> {
    let half_turn_x = Quaternion::new(0.0, 1.0, 0.0, 0.0);

    vec![
        CaseGroup {
            name: "re_q == e_q",
            cases: vec![
                Case {
                    label: "identity about x",
                    rotation: Quaternion::identity(),
                    direction: Vector3::x(),
                    expected: DecompositionCase::Aligned,
                },
                Case {
                    label: "half turn about x, reference x",
                    rotation: half_turn_x,
                    direction: Vector3::x(),
                    expected: DecompositionCase::Aligned,
                },
            ],
        },
        CaseGroup {
            name: "re_q == -1 * e_q",
            cases: vec![Case {
                label: "half turn about x, reference z",
                rotation: half_turn_x,
                direction: Vector3::z(),
                expected: DecompositionCase::Flipped,
            }],
        },
        CaseGroup {
            name: "quarter turn",
            cases: vec![Case {
                label: "quarter turn about x, reference z",
                rotation: Quaternion::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0, 0.0),
                direction: Vector3::z(),
                expected: DecompositionCase::General,
            }],
        },
    ]
}
