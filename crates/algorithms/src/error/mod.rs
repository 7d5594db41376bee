//! Error handling for the curve primitives

use alloc::borrow::Cow;

use core::fmt;

use dpair_api::{Error as CoreError, Result as CoreResult};

/// The error type for curve primitives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Value is not canonical (not reduced below its modulus) or flag bits are invalid
    Range {
        /// Where the out-of-range value was found
        context: &'static str,
    },

    /// Length validation error
    Length {
        /// Context where the length error occurred
        context: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Decoded coordinates do not satisfy the curve equation
    NotOnCurve {
        /// Which decoder rejected the point
        context: &'static str,
    },

    /// Point or target-group element lies outside the prime-order subgroup
    NotInSubgroup {
        /// Which decoder rejected the element
        context: &'static str,
    },

    /// Inversion of zero where a value was required
    NotInvertible {
        /// Operation that needed the inverse
        context: &'static str,
    },

    /// A required input is absent or empty
    NilInput {
        /// Name of the missing input
        context: &'static str,
    },

    /// Paired input slices have different lengths
    LengthMismatch {
        /// Operation that received the slices
        context: &'static str,
        /// Length of the first slice
        left: usize,
        /// Length of the second slice
        right: usize,
    },

    /// Parameter validation error
    Parameter {
        /// Name of the invalid parameter
        name: Cow<'static, str>,
        /// Reason why the parameter is invalid
        reason: Cow<'static, str>,
    },
}

impl Error {
    /// Shorthand to create a Parameter error
    pub fn param<N: Into<Cow<'static, str>>, R: Into<Cow<'static, str>>>(
        name: N,
        reason: R,
    ) -> Self {
        Error::Parameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for curve primitive operations
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Range { context } => write!(f, "Value out of range in {}", context),
            Error::Length { context, expected, actual } => {
                write!(f, "Invalid length for {}: expected {}, got {}", context, expected, actual)
            }
            Error::NotOnCurve { context } => write!(f, "Point not on curve in {}", context),
            Error::NotInSubgroup { context } => {
                write!(f, "Element not in prime-order subgroup in {}", context)
            }
            Error::NotInvertible { context } => write!(f, "Element not invertible in {}", context),
            Error::NilInput { context } => write!(f, "Missing input: {}", context),
            Error::LengthMismatch { context, left, right } => {
                write!(f, "Length mismatch in {}: {} vs {}", context, left, right)
            }
            Error::Parameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
        }
    }
}

// Implement std::error::Error when std is available
#[cfg(feature = "std")]
impl std::error::Error for Error {}

// Implement conversion to CoreError
impl From<Error> for CoreError {
    #[cfg_attr(not(feature = "std"), allow(unused_variables))]
    fn from(err: Error) -> Self {
        match err {
            Error::Range { context } => CoreError::InvalidEncoding {
                context,
                #[cfg(feature = "std")]
                message: "value out of range".to_string(),
            },
            Error::Length { context, expected, actual } => CoreError::InvalidLength {
                context,
                expected,
                actual,
            },
            Error::NotOnCurve { context } => CoreError::InvalidPoint {
                context,
                #[cfg(feature = "std")]
                message: "not on curve".to_string(),
            },
            Error::NotInSubgroup { context } => CoreError::InvalidPoint {
                context,
                #[cfg(feature = "std")]
                message: "not in prime-order subgroup".to_string(),
            },
            Error::NotInvertible { context } => CoreError::NotInvertible { context },
            Error::NilInput { context } => CoreError::NilInput { context },
            Error::LengthMismatch { context, left, right } => CoreError::LengthMismatch {
                context,
                left,
                right,
            },
            Error::Parameter { name, reason } => CoreError::InvalidParameter {
                context: match name {
                    Cow::Borrowed(s) => s,
                    Cow::Owned(_) => "parameter",
                },
                #[cfg(feature = "std")]
                message: reason.into_owned(),
            },
        }
    }
}

/// Convert a primitives result to a core result with additional context
#[inline]
pub fn to_core_result<T>(r: Result<T>, ctx: &'static str) -> CoreResult<T> {
    r.map_err(|e| CoreError::from(e).with_context(ctx))
}

// Re-export core error handling traits for convenience
pub use dpair_api::error::ResultExt;

// Include the validation submodule
pub mod validate;
