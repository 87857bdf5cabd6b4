//! Error types for BloomStack operations.
//!
//! All fallible operations in the crate return [`Result<T>`] with
//! [`BloomStackError`] as the error type. The taxonomy mirrors the three ways
//! a filter can fail:
//!
//! - **Configuration errors**: bad capacity or error rate at construction.
//!   The structure is never created.
//! - **Format errors**: a persisted image is missing, corrupt, or written by
//!   an incompatible version. No partial structure is returned.
//! - **I/O errors**: the storage boundary failed during flush or load. A
//!   failed flush leaves the in-memory structure untouched and valid.
//!
//! Non-fatal conditions (counter saturation, decrement of a zero counter) are
//! never surfaced as errors; they are absorbed, counted, and reported through
//! diagnostics. Deleting or checking a key that was never inserted is a normal
//! `false` outcome, not an error.
//!
//! # Error Propagation
//!
//! ```
//! use bloomstack::Result;
//! use bloomstack::core::params::optimal_counter_count;
//!
//! fn sized_for(capacity: usize, error_rate: f64) -> Result<usize> {
//!     let m = optimal_counter_count(capacity, error_rate)?;
//!     Ok(m)
//! }
//! # assert!(sized_for(1000, 0.01).is_ok());
//! # assert!(sized_for(0, 0.01).is_err());
//! ```

#![allow(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::fmt;

/// Result type alias for BloomStack operations.
///
/// # Examples
/// ```
/// use bloomstack::{Result, BloomStackError};
///
/// fn validate_capacity(capacity: usize) -> Result<()> {
///     if capacity == 0 {
///         return Err(BloomStackError::invalid_capacity(capacity));
///     }
///     Ok(())
/// }
/// # assert!(validate_capacity(100).is_ok());
/// ```
pub type Result<T> = std::result::Result<T, BloomStackError>;

/// Errors that can occur during filter construction, persistence, or I/O.
///
/// # Design Notes
/// - `Clone` + `PartialEq` enable testing and error comparison; I/O errors are
///   therefore carried as rendered messages rather than `std::io::Error`.
/// - Each variant includes sufficient context to diagnose the failure without
///   a debugger.
#[derive(Debug, Clone, PartialEq)]
pub enum BloomStackError {
    /// Invalid filter configuration provided during construction.
    ///
    /// Catch-all for parameter combinations that don't satisfy the sizing
    /// formulas' constraints.
    InvalidConfig {
        /// Human-readable description of what's invalid.
        message: String,
    },

    /// Target capacity is invalid (zero).
    ///
    /// A capacity of 0 makes the sizing formulas degenerate (log of zero,
    /// division by zero) and describes a filter that can hold nothing.
    InvalidCapacity {
        /// The invalid capacity that was provided.
        capacity: usize,
    },

    /// Error rate out of valid bounds (0, 1).
    ///
    /// # Examples
    /// - ε = 0: would require infinite memory
    /// - ε = 1: filter accepts everything (useless)
    ErrorRateOutOfBounds {
        /// The invalid error rate that was provided.
        error_rate: f64,
    },

    /// Hash function count outside practical limits.
    InvalidHashCount {
        /// The invalid hash count.
        count: usize,
        /// Minimum allowed value.
        min: usize,
        /// Maximum allowed value.
        max: usize,
    },

    /// Counter array size is invalid (zero or beyond memory limits).
    InvalidFilterSize {
        /// The invalid size in counters.
        size: usize,
    },

    /// The generation chain reached its hard ceiling.
    ///
    /// A filter that hits this ceiling was sized far below its real workload;
    /// failing here is preferable to unbounded memory growth.
    GenerationLimitReached {
        /// Maximum number of generations.
        limit: usize,
    },

    /// A persisted filter image is missing, corrupt, or incompatible.
    ///
    /// Returned by `load` only; no partial structure is ever produced.
    FormatError {
        /// Description of what failed to validate.
        message: String,
    },

    /// The storage boundary failed during flush or load.
    ///
    /// The in-memory structure remains valid after a failed flush.
    Io {
        /// Rendered `std::io::Error` message.
        message: String,
    },
}

impl fmt::Display for BloomStackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { message } => {
                write!(f, "Invalid filter configuration: {}.", message)
            }
            Self::InvalidCapacity { capacity } => {
                write!(
                    f,
                    "Invalid capacity: {}. Capacity must be greater than 0.",
                    capacity
                )
            }
            Self::ErrorRateOutOfBounds { error_rate } => {
                write!(
                    f,
                    "Error rate {} is out of bounds. Must be in range (0, 1).",
                    error_rate
                )
            }
            Self::InvalidHashCount { count, min, max } => {
                write!(
                    f,
                    "Invalid hash function count: {}. Must be in range [{}, {}].",
                    count, min, max
                )
            }
            Self::InvalidFilterSize { size } => {
                write!(
                    f,
                    "Invalid filter size: {} counters. Must be positive and within memory limits.",
                    size
                )
            }
            Self::GenerationLimitReached { limit } => {
                write!(
                    f,
                    "Generation limit of {} reached. Increase the configured capacity.",
                    limit
                )
            }
            Self::FormatError { message } => {
                write!(f, "Invalid filter image: {}.", message)
            }
            Self::Io { message } => {
                write!(f, "I/O error: {}.", message)
            }
        }
    }
}

impl std::error::Error for BloomStackError {}

impl From<std::io::Error> for BloomStackError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

impl BloomStackError {
    /// Create an `InvalidConfig` error with a formatted message.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an `InvalidCapacity` error.
    #[must_use]
    pub fn invalid_capacity(capacity: usize) -> Self {
        Self::InvalidCapacity { capacity }
    }

    /// Create an `ErrorRateOutOfBounds` error.
    #[must_use]
    pub fn error_rate_out_of_bounds(error_rate: f64) -> Self {
        Self::ErrorRateOutOfBounds { error_rate }
    }

    /// Create an `InvalidHashCount` error.
    #[must_use]
    pub fn invalid_hash_count(count: usize, min: usize, max: usize) -> Self {
        Self::InvalidHashCount { count, min, max }
    }

    /// Create an `InvalidFilterSize` error.
    #[must_use]
    pub fn invalid_filter_size(size: usize) -> Self {
        Self::InvalidFilterSize { size }
    }

    /// Create a `GenerationLimitReached` error.
    #[must_use]
    pub fn generation_limit_reached(limit: usize) -> Self {
        Self::GenerationLimitReached { limit }
    }

    /// Create a `FormatError`.
    #[must_use]
    pub fn format_error(message: impl Into<String>) -> Self {
        Self::FormatError {
            message: message.into(),
        }
    }

    /// Create an `Io` error from a message.
    #[must_use]
    pub fn io_error(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }
}
