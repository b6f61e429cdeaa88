//! Swing-twist decomposition of a rotation about a reference axis.
//!
//! A rotation `r` is split into `r = p * q` where:
//!
//! - `q` (twist) rotates only about the reference direction `e_q`, so
//!   `q * e_q == e_q`
//! - `p` (swing) carries `e_q` onto `r * e_q` along the shortest arc, so its
//!   axis is perpendicular to `e_q`
//!
//! The cross product that defines the swing axis vanishes when `r * e_q` is
//! parallel or antiparallel to `e_q`, so both of those configurations are
//! resolved explicitly (see [`DecompositionCase`]).

use std::fmt;

use nalgebra::{Quaternion, Unit, UnitQuaternion, Vector3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{DecomposeError, DecomposeResult};
use crate::params::DecomposeParams;

/// Vector parts shorter than this are treated as "no axis".
const AXIS_EPSILON: f64 = 1e-15;

/// Which branch of the decomposition produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DecompositionCase {
    /// `r * e_q == e_q`: the whole rotation is twist, swing is identity.
    Aligned,
    /// `r * e_q == -e_q`: the whole rotation is attributed to the swing,
    /// twist is identity.
    Flipped,
    /// The reference axis moved without being reversed.
    General,
}

impl DecompositionCase {
    /// Short lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aligned => "aligned",
            Self::Flipped => "flipped",
            Self::General => "general",
        }
    }
}

impl fmt::Display for DecompositionCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of splitting a rotation into swing and twist.
///
/// # Example
///
/// ```
/// use nalgebra::{Quaternion, Vector3};
/// use swing_twist::{DecomposeParams, DecompositionCase, decompose};
///
/// let half = std::f64::consts::FRAC_1_SQRT_2;
/// // 90 degrees about X, decomposed about Z
/// let r = Quaternion::new(half, half, 0.0, 0.0);
/// let d = decompose(r, Vector3::z(), &DecomposeParams::default());
///
/// assert_eq!(d.case, DecompositionCase::General);
/// assert!((d.swing_angle() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
/// assert!(d.twist_angle().abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Decomposition {
    /// Rotation that redirects the reference axis (`p`).
    pub swing: UnitQuaternion<f64>,
    /// Rotation about the reference axis (`q`).
    pub twist: UnitQuaternion<f64>,
    /// Branch that produced this result.
    pub case: DecompositionCase,
}

impl Decomposition {
    /// Rotation angle of the swing, `2 * acos(w)`, in `[0, 2π]`.
    #[must_use]
    pub fn swing_angle(&self) -> f64 {
        rotation_angle(&self.swing)
    }

    /// Rotation angle of the twist, `2 * acos(w)`, in `[0, 2π]`.
    #[must_use]
    pub fn twist_angle(&self) -> f64 {
        rotation_angle(&self.twist)
    }

    /// Rotation axis of the swing, or `None` when the swing is the identity.
    #[must_use]
    pub fn swing_axis(&self) -> Option<Unit<Vector3<f64>>> {
        Unit::try_new(self.swing.imag(), AXIS_EPSILON)
    }

    /// Swing axis as a plain vector; zero when the swing has no axis.
    #[must_use]
    pub fn swing_axis_vector(&self) -> Vector3<f64> {
        self.swing_axis().map_or_else(Vector3::zeros, Unit::into_inner)
    }

    /// Composes the parts back into a single rotation, `p * q`.
    #[must_use]
    pub fn recompose(&self) -> UnitQuaternion<f64> {
        self.swing * self.twist
    }

    /// Returns `(p, q)`.
    #[must_use]
    pub const fn into_pair(self) -> (UnitQuaternion<f64>, UnitQuaternion<f64>) {
        (self.swing, self.twist)
    }
}

// Equals 2 * acos(w), accurate for small angles too
fn rotation_angle(q: &UnitQuaternion<f64>) -> f64 {
    2.0 * q.imag().norm().atan2(q.scalar())
}

/// Decomposes `r` into `(p, q)` about the reference direction `e_q`.
///
/// Neither input needs to be normalized. `e_q` must be non-zero and `r`
/// must be finite and non-zero; otherwise the returned quaternions contain
/// NaN. Use [`try_decompose`] for input that has not been checked.
///
/// # Example
///
/// ```
/// use nalgebra::{Quaternion, UnitQuaternion, Vector3};
/// use swing_twist::decompose_rotation;
///
/// // Half turn about X leaves the X axis in place: all twist.
/// let r = Quaternion::new(0.0, 1.0, 0.0, 0.0);
/// let (p, q) = decompose_rotation(r, Vector3::x());
///
/// assert_eq!(p, UnitQuaternion::identity());
/// assert_eq!(q.into_inner(), r);
/// ```
#[must_use]
pub fn decompose_rotation(
    r: Quaternion<f64>,
    e_q: Vector3<f64>,
) -> (UnitQuaternion<f64>, UnitQuaternion<f64>) {
    decompose(r, e_q, &DecomposeParams::default()).into_pair()
}

/// Decomposes `r` about `e_q`, returning the full [`Decomposition`].
///
/// Same preconditions as [`decompose_rotation`]. `params` is not validated
/// here.
#[must_use]
pub fn decompose(
    r: Quaternion<f64>,
    e_q: Vector3<f64>,
    params: &DecomposeParams,
) -> Decomposition {
    let e_q = e_q.normalize();
    let r = UnitQuaternion::new_normalize(r);
    let re_q = r * e_q;

    if (re_q - e_q).norm() <= params.alignment_tolerance {
        trace!(case = "aligned", "reference axis fixed by rotation");
        return Decomposition {
            swing: UnitQuaternion::identity(),
            twist: r,
            case: DecompositionCase::Aligned,
        };
    }

    if (re_q + e_q).norm() <= params.alignment_tolerance {
        trace!(case = "flipped", "reference axis reversed by rotation");
        return Decomposition {
            swing: r,
            twist: UnitQuaternion::identity(),
            case: DecompositionCase::Flipped,
        };
    }

    // Near the two special cases the cross product is a small difference of
    // large terms; drop the component along e_q that rounding leaves behind.
    let cross = e_q.cross(&re_q);
    let e_p = Unit::new_normalize(cross - e_q * cross.dot(&e_q));
    // acos(clamp(dot)), but without the loss of precision near ±1
    let theta_p = cross.norm().atan2(e_q.dot(&re_q));
    let swing = UnitQuaternion::from_axis_angle(&e_p, theta_p);
    let twist = swing.conjugate() * r;

    trace!(case = "general", theta_p, "split rotation into swing and twist");

    Decomposition {
        swing,
        twist,
        case: DecompositionCase::General,
    }
}

/// Checked variant of [`decompose`] for untrusted input.
///
/// # Errors
///
/// - [`DecomposeError::NonFiniteRotation`], [`DecomposeError::ZeroRotation`]
///   or [`DecomposeError::RotationOverflow`] if `r` cannot be normalized
/// - [`DecomposeError::NonFiniteDirection`],
///   [`DecomposeError::ZeroDirection`] or
///   [`DecomposeError::DirectionOverflow`] if `e_q` cannot be normalized
/// - [`DecomposeError::InvalidParameter`] if `params` fails validation
///
/// # Example
///
/// ```
/// use nalgebra::{Quaternion, Vector3};
/// use swing_twist::{DecomposeError, DecomposeParams, try_decompose};
///
/// let err = try_decompose(
///     Quaternion::identity(),
///     Vector3::zeros(),
///     &DecomposeParams::default(),
/// )
/// .unwrap_err();
/// assert!(matches!(err, DecomposeError::ZeroDirection { .. }));
/// ```
pub fn try_decompose(
    r: Quaternion<f64>,
    e_q: Vector3<f64>,
    params: &DecomposeParams,
) -> DecomposeResult<Decomposition> {
    params.validate()?;

    if r.coords.iter().any(|c| !c.is_finite()) {
        return Err(DecomposeError::non_finite_rotation(r.w, r.i, r.j, r.k));
    }
    let norm = r.norm();
    if norm < f64::EPSILON {
        return Err(DecomposeError::zero_rotation(norm));
    }
    if !norm.is_finite() {
        return Err(DecomposeError::rotation_overflow(norm));
    }

    if e_q.iter().any(|c| !c.is_finite()) {
        return Err(DecomposeError::non_finite_direction(e_q.x, e_q.y, e_q.z));
    }
    let length = e_q.norm();
    if length < f64::EPSILON {
        return Err(DecomposeError::zero_direction(length));
    }
    if !length.is_finite() {
        return Err(DecomposeError::direction_overflow(length));
    }

    Ok(decompose(r, e_q, params))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::similar_names
)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, PI};

    fn identity() -> UnitQuaternion<f64> {
        UnitQuaternion::identity()
    }

    #[test]
    fn identity_about_x_is_aligned() {
        let d = decompose(Quaternion::identity(), Vector3::x(), &DecomposeParams::default());

        assert_eq!(d.case, DecompositionCase::Aligned);
        assert_relative_eq!(d.swing, identity(), epsilon = 1e-12);
        assert_relative_eq!(d.twist, identity(), epsilon = 1e-12);
        assert!(d.swing_axis().is_none());
        assert_relative_eq!(d.swing_angle(), 0.0);
    }

    #[test]
    fn half_turn_about_reference_is_all_twist() {
        let r = Quaternion::new(0.0, 1.0, 0.0, 0.0);
        let (p, q) = decompose_rotation(r, Vector3::x());

        assert_relative_eq!(p, identity(), epsilon = 1e-12);
        assert_relative_eq!(q.into_inner(), r, epsilon = 1e-12);
    }

    #[test]
    fn half_turn_across_reference_is_all_swing() {
        let r = Quaternion::new(0.0, 1.0, 0.0, 0.0);
        let d = decompose(r, Vector3::z(), &DecomposeParams::default());

        assert_eq!(d.case, DecompositionCase::Flipped);
        assert_relative_eq!(d.swing.into_inner(), r, epsilon = 1e-12);
        assert_relative_eq!(d.twist, identity(), epsilon = 1e-12);

        let axis = d.swing_axis().unwrap();
        assert_relative_eq!(axis.dot(&Vector3::z()), 0.0, epsilon = 1e-12);
        assert_relative_eq!(d.swing_angle(), PI, epsilon = 1e-12);
    }

    #[test]
    fn quarter_turn_about_x_with_z_reference() {
        let r = Quaternion::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0, 0.0);
        let d = decompose(r, Vector3::z(), &DecomposeParams::default());

        assert_eq!(d.case, DecompositionCase::General);
        // Z rotated to -Y; swing axis is Z x -Y = +X
        assert_relative_eq!(d.swing_axis_vector(), Vector3::x(), epsilon = 1e-12);
        assert_relative_eq!(d.swing_angle(), FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(d.swing.into_inner(), r, epsilon = 1e-12);
        assert_relative_eq!(d.twist, identity(), epsilon = 1e-12);
    }

    #[test]
    fn recovers_known_swing_and_twist() {
        let swing = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 0.4);
        let twist = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 1.1);
        let r = (swing * twist).into_inner();

        let d = decompose(r, Vector3::z(), &DecomposeParams::default());

        assert_eq!(d.case, DecompositionCase::General);
        assert_relative_eq!(d.swing, swing, epsilon = 1e-12);
        assert_relative_eq!(d.twist, twist, epsilon = 1e-12);
        assert_relative_eq!(d.twist_angle(), 1.1, epsilon = 1e-12);
    }

    #[test]
    fn pure_twist_about_oblique_axis() {
        let axis = Unit::new_normalize(Vector3::new(1.0, 2.0, -3.0));
        let r = UnitQuaternion::from_axis_angle(&axis, 2.3);

        let d = decompose(r.into_inner(), axis.into_inner(), &DecomposeParams::default());

        assert_eq!(d.case, DecompositionCase::Aligned);
        assert_relative_eq!(d.twist, r, epsilon = 1e-12);
        assert_relative_eq!(d.twist_angle(), 2.3, epsilon = 1e-12);
    }

    #[test]
    fn twist_fixes_reference_axis() {
        let r = UnitQuaternion::from_euler_angles(0.3, -1.2, 2.5);
        let e_q = Vector3::new(0.2, -0.7, 0.4);

        let d = decompose(r.into_inner(), e_q, &DecomposeParams::default());
        let e_q = e_q.normalize();

        assert_relative_eq!(d.twist * e_q, e_q, epsilon = 1e-12);
        assert_relative_eq!(d.recompose(), r, epsilon = 1e-12);
        assert_relative_eq!(d.swing_axis_vector().dot(&e_q), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn inputs_need_not_be_normalized() {
        let r = UnitQuaternion::from_euler_angles(1.0, 0.5, -0.25);
        let e_q = Vector3::new(0.0, 3.0, 4.0);

        let unit = decompose(r.into_inner(), e_q.normalize(), &DecomposeParams::default());
        let scaled = decompose(r.into_inner() * 7.5, e_q, &DecomposeParams::default());

        assert_eq!(unit.case, scaled.case);
        assert_relative_eq!(unit.swing, scaled.swing, epsilon = 1e-12);
        assert_relative_eq!(unit.twist, scaled.twist, epsilon = 1e-12);
    }

    #[test]
    fn outputs_are_unit_length() {
        let r = Quaternion::new(0.3, -0.2, 0.9, 0.1);
        let d = decompose(r, Vector3::new(1.0, 1.0, 0.0), &DecomposeParams::default());

        assert_relative_eq!(d.swing.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(d.twist.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn alignment_tolerance_widens_aligned_branch() {
        let r = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 1e-6);

        let strict = decompose(r.into_inner(), Vector3::z(), &DecomposeParams::default());
        let loose = decompose(
            r.into_inner(),
            Vector3::z(),
            &DecomposeParams::new().with_alignment_tolerance(1e-3),
        );

        assert_eq!(strict.case, DecompositionCase::General);
        assert_eq!(loose.case, DecompositionCase::Aligned);
        assert_relative_eq!(loose.twist, r, epsilon = 1e-12);
    }

    #[test]
    fn tiny_tilt_is_resolved_as_swing() {
        let r = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 1e-9);
        let e_q = Vector3::z();

        let d = decompose(r.into_inner(), e_q, &DecomposeParams::default());

        assert_eq!(d.case, DecompositionCase::General);
        assert_relative_eq!(d.swing_angle(), 1e-9, max_relative = 1e-6);
        assert!((d.twist * e_q - e_q).norm() < 1e-12);
        assert_relative_eq!(d.swing_axis_vector(), Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn almost_half_turn_is_resolved_as_swing() {
        let r = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), PI - 1e-9);
        let e_q = Vector3::z();

        let d = decompose(r.into_inner(), e_q, &DecomposeParams::default());

        assert_eq!(d.case, DecompositionCase::General);
        assert_relative_eq!(d.swing_angle(), PI - 1e-9, epsilon = 1e-12);
        assert!((d.twist * e_q - e_q).norm() < 1e-12);
        assert_relative_eq!(d.twist_angle(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn almost_flipped_oblique_reference_keeps_swing_axis_perpendicular() {
        let e_q = Unit::new_normalize(Vector3::new(0.3, -0.5, 0.8));
        let perpendicular = Unit::new_normalize(e_q.cross(&Vector3::x()));
        let swing = UnitQuaternion::from_axis_angle(&perpendicular, PI - 1e-7);
        let twist = UnitQuaternion::from_axis_angle(&e_q, 0.7);
        let r = swing * twist;

        let d = decompose(r.into_inner(), e_q.into_inner(), &DecomposeParams::default());

        assert_eq!(d.case, DecompositionCase::General);
        assert!(d.swing_axis_vector().dot(&e_q).abs() < 1e-12);
        assert!((d.twist * e_q.into_inner() - e_q.into_inner()).norm() < 1e-12);
        assert_relative_eq!(d.recompose(), r, epsilon = 1e-12);
    }

    #[test]
    fn zero_direction_yields_nan() {
        let (p, q) = decompose_rotation(Quaternion::identity(), Vector3::zeros());
        assert!(p.coords.iter().any(|c| c.is_nan()));
        assert!(q.coords.iter().any(|c| c.is_nan()));
    }

    #[test]
    fn try_decompose_accepts_valid_input() {
        let r = Quaternion::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0, 0.0);
        let checked = try_decompose(r, Vector3::z(), &DecomposeParams::default()).unwrap();
        let unchecked = decompose(r, Vector3::z(), &DecomposeParams::default());
        assert_eq!(checked, unchecked);
    }

    #[test]
    fn try_decompose_rejects_bad_rotation() {
        let params = DecomposeParams::default();

        let err = try_decompose(Quaternion::new(f64::NAN, 0.0, 0.0, 0.0), Vector3::x(), &params)
            .unwrap_err();
        assert!(matches!(err, DecomposeError::NonFiniteRotation { .. }));

        let err = try_decompose(Quaternion::new(0.0, 0.0, 0.0, 0.0), Vector3::x(), &params)
            .unwrap_err();
        assert!(matches!(err, DecomposeError::ZeroRotation { .. }));
    }

    #[test]
    fn try_decompose_rejects_bad_direction() {
        let params = DecomposeParams::default();

        let err = try_decompose(
            Quaternion::identity(),
            Vector3::new(0.0, f64::INFINITY, 0.0),
            &params,
        )
        .unwrap_err();
        assert!(matches!(err, DecomposeError::NonFiniteDirection { .. }));

        let err = try_decompose(Quaternion::identity(), Vector3::zeros(), &params).unwrap_err();
        assert!(matches!(err, DecomposeError::ZeroDirection { .. }));
    }

    #[test]
    fn try_decompose_rejects_overflowing_input() {
        let params = DecomposeParams::default();

        let err = try_decompose(Quaternion::new(1e200, 0.0, 0.0, 0.0), Vector3::x(), &params)
            .unwrap_err();
        assert!(matches!(err, DecomposeError::RotationOverflow { .. }));

        let err = try_decompose(
            Quaternion::identity(),
            Vector3::new(1e200, 1e200, 0.0),
            &params,
        )
        .unwrap_err();
        assert!(matches!(err, DecomposeError::DirectionOverflow { .. }));
    }

    #[test]
    fn try_decompose_accepts_large_finite_input() {
        let params = DecomposeParams::default();
        let r = Quaternion::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0, 0.0) * 1e100;

        let d = try_decompose(r, Vector3::z() * 1e100, &params).unwrap();
        assert_eq!(d.case, DecompositionCase::General);
        assert_relative_eq!(d.swing_angle(), FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn try_decompose_rejects_bad_params() {
        let params = DecomposeParams::new().with_alignment_tolerance(0.0);
        let err = try_decompose(Quaternion::identity(), Vector3::x(), &params).unwrap_err();
        assert!(matches!(err, DecomposeError::InvalidParameter(_)));
    }

    #[test]
    fn case_display() {
        assert_eq!(DecompositionCase::Aligned.to_string(), "aligned");
        assert_eq!(DecompositionCase::Flipped.to_string(), "flipped");
        assert_eq!(DecompositionCase::General.to_string(), "general");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn decomposition_serialization() {
        let d = decompose(
            Quaternion::new(0.3, -0.2, 0.9, 0.1),
            Vector3::y(),
            &DecomposeParams::default(),
        );
        let json = serde_json::to_string(&d).unwrap();
        assert!(json.contains("general") || json.contains("General"));

        let parsed: Decomposition = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.case, d.case);
    }
}
