//! Error types for swing-twist crate.

use thiserror::Error;

/// Errors reported by the checked decomposition front-end and by parameter
/// validation.
///
/// The core [`decompose_rotation`](crate::decompose_rotation) never returns
/// an error; these only surface from
/// [`try_decompose`](crate::try_decompose) and the `validate` methods on the
/// parameter types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecomposeError {
    /// Rotation quaternion has a NaN or infinite component.
    #[error("rotation has non-finite component: ({w}, {x}, {y}, {z})")]
    NonFiniteRotation {
        /// Scalar part.
        w: f64,
        /// First vector component.
        x: f64,
        /// Second vector component.
        y: f64,
        /// Third vector component.
        z: f64,
    },

    /// Rotation quaternion is too short to normalize.
    #[error("rotation quaternion has zero norm ({norm:e})")]
    ZeroRotation {
        /// Norm of the rejected quaternion.
        norm: f64,
    },

    /// Rotation quaternion is so long that its norm overflows.
    #[error("rotation quaternion norm overflows ({norm:e})")]
    RotationOverflow {
        /// Norm of the rejected quaternion.
        norm: f64,
    },

    /// Reference direction has a NaN or infinite component.
    #[error("reference direction has non-finite component: ({x}, {y}, {z})")]
    NonFiniteDirection {
        /// X component.
        x: f64,
        /// Y component.
        y: f64,
        /// Z component.
        z: f64,
    },

    /// Reference direction is too short to normalize.
    #[error("reference direction has zero length ({length:e})")]
    ZeroDirection {
        /// Length of the rejected vector.
        length: f64,
    },

    /// Reference direction is so long that its length overflows.
    #[error("reference direction length overflows ({length:e})")]
    DirectionOverflow {
        /// Length of the rejected vector.
        length: f64,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl DecomposeError {
    /// Creates a non-finite rotation error.
    #[must_use]
    pub const fn non_finite_rotation(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self::NonFiniteRotation { w, x, y, z }
    }

    /// Creates a zero rotation error.
    #[must_use]
    pub const fn zero_rotation(norm: f64) -> Self {
        Self::ZeroRotation { norm }
    }

    /// Creates a rotation overflow error.
    #[must_use]
    pub const fn rotation_overflow(norm: f64) -> Self {
        Self::RotationOverflow { norm }
    }

    /// Creates a non-finite direction error.
    #[must_use]
    pub const fn non_finite_direction(x: f64, y: f64, z: f64) -> Self {
        Self::NonFiniteDirection { x, y, z }
    }

    /// Creates a zero direction error.
    #[must_use]
    pub const fn zero_direction(length: f64) -> Self {
        Self::ZeroDirection { length }
    }

    /// Creates a direction overflow error.
    #[must_use]
    pub const fn direction_overflow(length: f64) -> Self {
        Self::DirectionOverflow { length }
    }

    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(reason: impl Into<String>) -> Self {
        Self::InvalidParameter(reason.into())
    }
}

/// Result type for swing-twist operations.
pub type DecomposeResult<T> = Result<T, DecomposeError>;
