//! Error type definitions for pairing-engine operations

#[cfg(feature = "std")]
use std::string::String;

/// Primary error type for pairing-engine operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input has the wrong byte length
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Encoding is malformed: a value is not canonical or flag bits are inconsistent
    InvalidEncoding {
        context: &'static str,
        #[cfg(feature = "std")]
        message: String,
    },

    /// Point is not on the curve or not in the prime-order subgroup
    InvalidPoint {
        context: &'static str,
        #[cfg(feature = "std")]
        message: String,
    },

    /// Attempted to invert zero
    NotInvertible {
        context: &'static str,
    },

    /// A required input was absent or empty
    NilInput {
        context: &'static str,
    },

    /// Two inputs that must be paired up have different lengths
    LengthMismatch {
        context: &'static str,
        left: usize,
        right: usize,
    },

    /// Invalid parameter error
    InvalidParameter {
        context: &'static str,
        #[cfg(feature = "std")]
        message: String,
    },

    /// Random generation error
    RandomGenerationError {
        context: &'static str,
        #[cfg(feature = "std")]
        message: String,
    },

    /// Other error
    Other {
        context: &'static str,
        #[cfg(feature = "std")]
        message: String,
    },
}

/// Result type for pairing-engine operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Replace the context of an existing error
    pub fn with_context(self, context: &'static str) -> Self {
        match self {
            Self::InvalidLength { expected, actual, .. } => Self::InvalidLength {
                context,
                expected,
                actual,
            },
            Self::InvalidEncoding { .. } => Self::InvalidEncoding {
                context,
                #[cfg(feature = "std")]
                message: String::new(),
            },
            Self::InvalidPoint { .. } => Self::InvalidPoint {
                context,
                #[cfg(feature = "std")]
                message: String::new(),
            },
            Self::NotInvertible { .. } => Self::NotInvertible { context },
            Self::NilInput { .. } => Self::NilInput { context },
            Self::LengthMismatch { left, right, .. } => Self::LengthMismatch {
                context,
                left,
                right,
            },
            Self::InvalidParameter { .. } => Self::InvalidParameter {
                context,
                #[cfg(feature = "std")]
                message: String::new(),
            },
            Self::RandomGenerationError { .. } => Self::RandomGenerationError {
                context,
                #[cfg(feature = "std")]
                message: String::new(),
            },
            Self::Other { .. } => Self::Other {
                context,
                #[cfg(feature = "std")]
                message: String::new(),
            },
        }
    }

    /// Attach a message to an existing error (when std is available)
    ///
    /// Variants without a message slot are returned unchanged.
    #[cfg(feature = "std")]
    pub fn with_message(self, message: impl Into<String>) -> Self {
        let message = message.into();
        match self {
            Self::InvalidEncoding { context, .. } => Self::InvalidEncoding { context, message },
            Self::InvalidPoint { context, .. } => Self::InvalidPoint { context, message },
            Self::InvalidParameter { context, .. } => Self::InvalidParameter { context, message },
            Self::RandomGenerationError { context, .. } => {
                Self::RandomGenerationError { context, message }
            }
            Self::Other { context, .. } => Self::Other { context, message },
            other => other,
        }
    }

    /// The static context string carried by every variant
    pub fn context(&self) -> &'static str {
        match self {
            Self::InvalidLength { context, .. }
            | Self::InvalidEncoding { context, .. }
            | Self::InvalidPoint { context, .. }
            | Self::NotInvertible { context }
            | Self::NilInput { context }
            | Self::LengthMismatch { context, .. }
            | Self::InvalidParameter { context, .. }
            | Self::RandomGenerationError { context, .. }
            | Self::Other { context, .. } => context,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidLength { context, expected, actual } => {
                write!(f, "{}: invalid length (expected {}, got {})", context, expected, actual)
            }
            #[cfg(feature = "std")]
            Self::InvalidEncoding { context, message } => {
                write!(f, "Invalid encoding: {}: {}", context, message)
            }
            #[cfg(not(feature = "std"))]
            Self::InvalidEncoding { context } => write!(f, "Invalid encoding: {}", context),
            #[cfg(feature = "std")]
            Self::InvalidPoint { context, message } => {
                write!(f, "Invalid point: {}: {}", context, message)
            }
            #[cfg(not(feature = "std"))]
            Self::InvalidPoint { context } => write!(f, "Invalid point: {}", context),
            Self::NotInvertible { context } => write!(f, "{}: element is not invertible", context),
            Self::NilInput { context } => write!(f, "{}: required input is missing", context),
            Self::LengthMismatch { context, left, right } => {
                write!(f, "{}: length mismatch ({} vs {})", context, left, right)
            }
            #[cfg(feature = "std")]
            Self::InvalidParameter { context, message } => write!(f, "{}: {}", context, message),
            #[cfg(not(feature = "std"))]
            Self::InvalidParameter { context } => write!(f, "Invalid parameter: {}", context),
            #[cfg(feature = "std")]
            Self::RandomGenerationError { context, message } => {
                write!(f, "Random generation error: {}: {}", context, message)
            }
            #[cfg(not(feature = "std"))]
            Self::RandomGenerationError { context } => {
                write!(f, "Random generation error: {}", context)
            }
            #[cfg(feature = "std")]
            Self::Other { context, message } => write!(f, "{}: {}", context, message),
            #[cfg(not(feature = "std"))]
            Self::Other { context } => write!(f, "Error: {}", context),
        }
    }
}
