//! Swing-twist decomposition of 3D rotations.
//!
//! Given a rotation `r` and a reference direction `e_q`, this crate splits
//! `r` into two rotations applied in sequence, `r = p * q`:
//!
//! - **twist** `q`: spins about `e_q` and leaves it in place
//! - **swing** `p`: tilts `e_q` onto `r * e_q` about an axis perpendicular
//!   to it
//!
//! This separates "pointing" motion from "spinning" motion, e.g. the roll
//! of a tool about its own axis versus the change in where it points.
//!
//! # Decomposition
//!
//! - [`decompose_rotation`] - Returns the `(p, q)` pair
//! - [`decompose`] - Returns a [`Decomposition`] with angles, axis and branch
//! - [`try_decompose`] - Checked variant for untrusted input
//!
//! # Verification
//!
//! - [`verify`] - Measures the four defining properties of a decomposition
//! - [`canonical_cases`] - Fixed aligned / flipped / general scenarios
//! - [`random_unit_quaternion`], [`random_unit_direction`] - Uniform sampling
//! - [`run_trials`] - Canonical scenarios plus seeded random trials
//!
//! # Example
//!
//! ```
//! use nalgebra::{UnitQuaternion, Vector3};
//! use swing_twist::decompose_rotation;
//!
//! let swing = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 0.4);
//! let twist = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 1.1);
//! let r = swing * twist;
//!
//! let (p, q) = decompose_rotation(r.into_inner(), Vector3::z());
//!
//! assert!((p.coords - swing.coords).norm() < 1e-12);
//! assert!((q.coords - twist.coords).norm() < 1e-12);
//! assert!((q * Vector3::z() - Vector3::z()).norm() < 1e-12);
//! ```
//!
//! # Conventions
//!
//! Quaternions are `(w, x, y, z)` with `w` the scalar part, as constructed by
//! [`nalgebra::Quaternion::new`]. When `r` reverses `e_q` exactly, the whole
//! rotation is attributed to the swing and the twist is the identity.
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**.
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization for results and reports

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod cases;
mod decompose;
mod error;
mod params;
mod sampling;
mod trials;
mod verify;

pub use cases::{Case, CaseGroup, canonical_cases};
pub use decompose::{
    Decomposition, DecompositionCase, decompose, decompose_rotation, try_decompose,
};
pub use error::{DecomposeError, DecomposeResult};
pub use params::{
    DEFAULT_ALIGNMENT_TOLERANCE, DEFAULT_VERIFY_TOLERANCE, DecomposeParams, VerifyParams,
};
pub use sampling::{random_unit_direction, random_unit_quaternion};
pub use trials::{RANDOM_GROUP, TrialOutcome, TrialSummary, run_trials};
pub use verify::{Property, PropertyReport, verify};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        DecomposeError, DecomposeParams, Decomposition, DecompositionCase, Property,
        PropertyReport, VerifyParams, decompose, decompose_rotation, try_decompose, verify,
    };
}
