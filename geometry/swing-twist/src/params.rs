//! Parameters for decomposition and verification.

use crate::error::{DecomposeError, DecomposeResult};

/// Default tolerance for detecting an aligned or flipped reference axis.
pub const DEFAULT_ALIGNMENT_TOLERANCE: f64 = 1e-10;

/// Default tolerance for the property checks.
pub const DEFAULT_VERIFY_TOLERANCE: f64 = 1e-10;

/// Parameters for [`decompose`](crate::decompose).
///
/// # Example
///
/// ```
/// use swing_twist::DecomposeParams;
///
/// let params = DecomposeParams::new().with_alignment_tolerance(1e-8);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecomposeParams {
    /// Distance between the rotated and original reference axis below which
    /// the two are treated as equal (or opposite). Default: `1e-10`.
    pub alignment_tolerance: f64,
}

impl Default for DecomposeParams {
    fn default() -> Self {
        Self {
            alignment_tolerance: DEFAULT_ALIGNMENT_TOLERANCE,
        }
    }
}

impl DecomposeParams {
    /// Creates new parameters with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the alignment tolerance.
    #[must_use]
    pub const fn with_alignment_tolerance(mut self, tolerance: f64) -> Self {
        self.alignment_tolerance = tolerance;
        self
    }

    /// Checks that the parameters are usable.
    ///
    /// # Errors
    ///
    /// Returns [`DecomposeError::InvalidParameter`] if the tolerance is not a
    /// positive finite number.
    pub fn validate(&self) -> DecomposeResult<()> {
        validate_tolerance("alignment_tolerance", self.alignment_tolerance)
    }
}

/// Parameters for [`verify`](crate::verify) and
/// [`run_trials`](crate::run_trials).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerifyParams {
    /// Tolerance applied to every property residual. Default: `1e-10`.
    pub tolerance: f64,
    /// Stop a trial run at the first failing case. Default: `true`.
    pub fail_fast: bool,
    /// Parameters forwarded to the decomposition under test.
    pub decompose: DecomposeParams,
}

impl Default for VerifyParams {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_VERIFY_TOLERANCE,
            fail_fast: true,
            decompose: DecomposeParams::default(),
        }
    }
}

impl VerifyParams {
    /// Creates new parameters with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the property tolerance.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets whether a trial run stops at the first failure.
    #[must_use]
    pub const fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Sets the decomposition parameters.
    #[must_use]
    pub const fn with_decompose_params(mut self, decompose: DecomposeParams) -> Self {
        self.decompose = decompose;
        self
    }

    /// Checks that the parameters are usable.
    ///
    /// # Errors
    ///
    /// Returns [`DecomposeError::InvalidParameter`] if either tolerance is
    /// not a positive finite number.
    pub fn validate(&self) -> DecomposeResult<()> {
        validate_tolerance("tolerance", self.tolerance)?;
        self.decompose.validate()
    }
}

fn validate_tolerance(name: &str, value: f64) -> DecomposeResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DecomposeError::invalid_parameter(format!(
            "{name} must be positive and finite, got {value}"
        )))
    }
}
