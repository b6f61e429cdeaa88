//! Property checks for a computed decomposition.
//!
//! Every decomposition `r = p * q` about `e_q` must satisfy:
//!
//! 1. `p` and `q` are unit quaternions
//! 2. `p * q` reproduces `r` (up to quaternion sign)
//! 3. `q` leaves `e_q` in place
//! 4. the swing axis is perpendicular to `e_q`
//!
//! [`verify`] measures the residual of each and compares it against a
//! tolerance.

use std::fmt;

use nalgebra::{Quaternion, UnitQuaternion, Vector3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decompose::Decomposition;
use crate::params::VerifyParams;

/// A property checked by [`verify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Property {
    /// `‖p‖ = 1`.
    SwingNorm,
    /// `‖q‖ = 1`.
    TwistNorm,
    /// `p * q = ±r`.
    Reconstruction,
    /// `q * e_q = e_q`.
    FixedAxis,
    /// `axis(p) · e_q = 0`.
    Orthogonality,
}

impl Property {
    /// All properties in reporting order.
    pub const ALL: [Self; 5] = [
        Self::SwingNorm,
        Self::TwistNorm,
        Self::Reconstruction,
        Self::FixedAxis,
        Self::Orthogonality,
    ];

    /// Human-readable statement of the property.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::SwingNorm => "size of p is 1",
            Self::TwistNorm => "size of q is 1",
            Self::Reconstruction => "r = p * q",
            Self::FixedAxis => "q fixes e_q",
            Self::Orthogonality => "e_p and e_q are perpendicular",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Measured residuals for one decomposition.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PropertyReport {
    /// `|‖p‖ - 1|`.
    pub swing_norm_error: f64,
    /// `|‖q‖ - 1|`.
    pub twist_norm_error: f64,
    /// `min(‖r - pq‖, ‖r + pq‖)` with `r` normalized.
    pub reconstruction_error: f64,
    /// `‖q·e_q - e_q‖` with `e_q` normalized.
    pub fixed_axis_error: f64,
    /// `|axis(p) · e_q|`; zero when `p` has no axis.
    pub orthogonality_error: f64,
    /// Tolerance every residual is compared against.
    pub tolerance: f64,
}

impl PropertyReport {
    /// Residual measured for `property`.
    #[must_use]
    pub const fn residual(&self, property: Property) -> f64 {
        match property {
            Property::SwingNorm => self.swing_norm_error,
            Property::TwistNorm => self.twist_norm_error,
            Property::Reconstruction => self.reconstruction_error,
            Property::FixedAxis => self.fixed_axis_error,
            Property::Orthogonality => self.orthogonality_error,
        }
    }

    /// Whether `property` holds within tolerance. NaN residuals never hold.
    #[must_use]
    pub fn holds(&self, property: Property) -> bool {
        self.residual(property) <= self.tolerance
    }

    /// True when every property holds.
    #[must_use]
    pub fn passed(&self) -> bool {
        Property::ALL.iter().all(|&p| self.holds(p))
    }

    /// Properties that do not hold, in reporting order.
    #[must_use]
    pub fn failures(&self) -> Vec<Property> {
        Property::ALL
            .into_iter()
            .filter(|&p| !self.holds(p))
            .collect()
    }
}

/// Checks `decomposition` against the rotation and reference direction it
/// was computed from.
///
/// `r` and `e_q` are normalized before comparison, matching what the
/// decomposition itself does.
///
/// # Example
///
/// ```
/// use nalgebra::{Quaternion, Vector3};
/// use swing_twist::{DecomposeParams, VerifyParams, decompose, verify};
///
/// let r = Quaternion::new(0.3, -0.2, 0.9, 0.1);
/// let e_q = Vector3::new(1.0, 1.0, 0.0);
/// let d = decompose(r, e_q, &DecomposeParams::default());
///
/// let report = verify(r, e_q, &d, &VerifyParams::default());
/// assert!(report.passed());
/// ```
#[must_use]
pub fn verify(
    r: Quaternion<f64>,
    e_q: Vector3<f64>,
    decomposition: &Decomposition,
    params: &VerifyParams,
) -> PropertyReport {
    let r = UnitQuaternion::new_normalize(r);
    let e_q = e_q.normalize();
    let p = decomposition.swing;
    let q = decomposition.twist;
    let pq = p * q;

    let report = PropertyReport {
        swing_norm_error: (p.norm() - 1.0).abs(),
        twist_norm_error: (q.norm() - 1.0).abs(),
        reconstruction_error: (r.coords - pq.coords)
            .norm()
            .min((r.coords + pq.coords).norm()),
        fixed_axis_error: (q * e_q - e_q).norm(),
        orthogonality_error: decomposition.swing_axis_vector().dot(&e_q).abs(),
        tolerance: params.tolerance,
    };

    for property in report.failures() {
        debug!(
            property = property.description(),
            residual = report.residual(property),
            tolerance = params.tolerance,
            case = decomposition.case.name(),
            "decomposition property violated"
        );
    }

    report
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::decompose::{DecompositionCase, decompose};
    use crate::params::DecomposeParams;
    use approx::assert_relative_eq;

    fn check(r: Quaternion<f64>, e_q: Vector3<f64>) -> PropertyReport {
        let d = decompose(r, e_q, &DecomposeParams::default());
        verify(r, e_q, &d, &VerifyParams::default())
    }

    #[test]
    fn canonical_inputs_pass() {
        let half = std::f64::consts::FRAC_1_SQRT_2;
        assert!(check(Quaternion::identity(), Vector3::x()).passed());
        assert!(check(Quaternion::new(0.0, 1.0, 0.0, 0.0), Vector3::x()).passed());
        assert!(check(Quaternion::new(0.0, 1.0, 0.0, 0.0), Vector3::z()).passed());
        assert!(check(Quaternion::new(half, half, 0.0, 0.0), Vector3::z()).passed());
    }

    #[test]
    fn residuals_are_small_for_general_case() {
        let report = check(Quaternion::new(0.5, 0.1, -0.7, 0.3), Vector3::new(0.3, 0.2, 0.9));

        for property in Property::ALL {
            assert!(report.residual(property) < 1e-12, "{property}");
        }
        assert!(report.failures().is_empty());
    }

    #[test]
    fn reconstruction_ignores_quaternion_sign() {
        let r = UnitQuaternion::from_euler_angles(0.2, 0.4, 0.6);
        let d = Decomposition {
            swing: UnitQuaternion::identity(),
            twist: UnitQuaternion::new_unchecked(-r.into_inner()),
            case: DecompositionCase::Aligned,
        };

        let report = verify(r.into_inner(), Vector3::z(), &d, &VerifyParams::default());
        assert_relative_eq!(report.reconstruction_error, 0.0, epsilon = 1e-15);
        assert!(report.holds(Property::Reconstruction));
    }

    #[test]
    fn detects_wrong_twist() {
        let r = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 0.8);
        // Twist about X cannot fix the Z reference axis
        let d = Decomposition {
            swing: UnitQuaternion::identity(),
            twist: r,
            case: DecompositionCase::Aligned,
        };

        let report = verify(r.into_inner(), Vector3::z(), &d, &VerifyParams::default());
        assert!(!report.passed());
        assert!(report.failures().contains(&Property::FixedAxis));
        assert!(report.holds(Property::Reconstruction));
    }

    #[test]
    fn detects_non_orthogonal_swing() {
        let swing = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.5);
        let d = Decomposition {
            swing,
            twist: UnitQuaternion::identity(),
            case: DecompositionCase::General,
        };

        let report = verify(swing.into_inner(), Vector3::z(), &d, &VerifyParams::default());
        assert_relative_eq!(report.orthogonality_error, 1.0, epsilon = 1e-12);
        assert!(!report.holds(Property::Orthogonality));
    }

    #[test]
    fn detects_non_unit_output() {
        let d = Decomposition {
            swing: UnitQuaternion::new_unchecked(Quaternion::new(2.0, 0.0, 0.0, 0.0)),
            twist: UnitQuaternion::identity(),
            case: DecompositionCase::Aligned,
        };

        let report = verify(Quaternion::identity(), Vector3::x(), &d, &VerifyParams::default());
        assert_relative_eq!(report.swing_norm_error, 1.0);
        assert_eq!(
            report.failures(),
            vec![Property::SwingNorm, Property::Reconstruction]
        );
    }

    #[test]
    fn nan_residuals_fail() {
        let d = decompose(Quaternion::identity(), Vector3::zeros(), &DecomposeParams::default());
        let report = verify(Quaternion::identity(), Vector3::zeros(), &d, &VerifyParams::default());
        assert!(!report.passed());
    }

    #[test]
    fn looser_tolerance_accepts_more() {
        let r = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 0.8);
        let d = Decomposition {
            swing: UnitQuaternion::identity(),
            twist: UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 0.8 + 1e-6),
            case: DecompositionCase::Aligned,
        };

        let strict = verify(r.into_inner(), Vector3::x(), &d, &VerifyParams::default());
        let loose = verify(
            r.into_inner(),
            Vector3::x(),
            &d,
            &VerifyParams::new().with_tolerance(1e-4),
        );

        assert!(!strict.passed());
        assert!(loose.passed());
    }

    #[test]
    fn property_descriptions() {
        assert_eq!(Property::Reconstruction.to_string(), "r = p * q");
        assert_eq!(Property::ALL.len(), 5);
    }
}
