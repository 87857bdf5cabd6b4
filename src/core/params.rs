//! Optimal parameter calculation for counting Bloom filters.
//!
//! Implements the standard Bloom filter sizing formulas, applied here to
//! counter arrays: every slot is a small counter instead of a bit, but the
//! occupancy math is identical.
//!
//! # Mathematical Background
//!
//! Given:
//! - `n`: target capacity of one generation
//! - `ε`: target false positive rate
//!
//! Optimal parameters:
//! - `m = -n × ln(ε) / (ln 2)²` (counters in the array)
//! - `k = (m/n) × ln 2` (number of hash functions)
//!
//! Expected false positive rate after `n` insertions:
//! - `p = (1 - e^(-kn/m))^k`
//!
//! # References
//!
//! - Bloom, Burton H. (1970). "Space/Time Trade-offs in Hash Coding with Allowable Errors"
//! - Fan, L., Cao, P., Almeida, J., & Broder, A. Z. (2000). "Summary cache: a scalable
//!   wide-area web cache sharing protocol"

#![allow(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

use crate::error::{BloomStackError, Result};
use std::f64::consts::LN_2;

/// Mathematical constant: (ln 2)² ≈ 0.4804530139182014
const LN2_SQUARED: f64 = LN_2 * LN_2;

/// Minimum practical counter array size.
///
/// Arrays smaller than 8 counters offer negligible utility.
pub const MIN_FILTER_SIZE: usize = 8;

/// Maximum practical number of hash functions.
///
/// Beyond 32 hash functions the computational cost exceeds the marginal
/// improvement in false positive rate.
pub const MAX_HASH_FUNCTIONS: usize = 32;

/// Minimum number of hash functions.
pub const MIN_HASH_FUNCTIONS: usize = 1;

/// Calculate the optimal number of counters for given constraints.
///
/// Implements the formula: `m = -n × ln(ε) / (ln 2)²`
///
/// # Arguments
///
/// * `capacity` - Target number of elements per generation (must be > 0)
/// * `error_rate` - Target false positive rate (must be in range (0, 1))
///
/// # Errors
///
/// - [`BloomStackError::InvalidCapacity`] if `capacity == 0`
/// - [`BloomStackError::ErrorRateOutOfBounds`] if `error_rate` not in (0, 1)
/// - [`BloomStackError::InvalidConfig`] if the result exceeds system limits
///
/// # Examples
///
/// ```
/// use bloomstack::core::params::optimal_counter_count;
///
/// // For 1000 items with 1% false positive rate
/// let m = optimal_counter_count(1000, 0.01).unwrap();
/// assert!(m >= 9585 && m <= 9586);
/// ```
pub fn optimal_counter_count(capacity: usize, error_rate: f64) -> Result<usize> {
    if capacity == 0 {
        return Err(BloomStackError::invalid_capacity(capacity));
    }

    if error_rate <= 0.0 || error_rate >= 1.0 {
        return Err(BloomStackError::error_rate_out_of_bounds(error_rate));
    }

    let n = capacity as f64;
    let m = -n * error_rate.ln() / LN2_SQUARED;

    if m > usize::MAX as f64 {
        return Err(BloomStackError::invalid_config(format!(
            "Calculated filter size {:.0} exceeds system limits (usize::MAX = {})",
            m,
            usize::MAX
        )));
    }

    // Round up so the target error rate is met or exceeded
    let m_final = (m.ceil() as usize).max(MIN_FILTER_SIZE);

    if m_final > usize::MAX / 2 {
        return Err(BloomStackError::invalid_config(format!(
            "Calculated filter size {} exceeds reasonable bounds. \
             Consider increasing the error rate or reducing the capacity.",
            m_final
        )));
    }

    Ok(m_final)
}

/// Calculate the optimal number of hash functions.
///
/// Implements the formula: `k = (m/n) × ln 2`, clamped to
/// [[`MIN_HASH_FUNCTIONS`], [`MAX_HASH_FUNCTIONS`]].
///
/// # Errors
///
/// - [`BloomStackError::InvalidFilterSize`] if `size == 0`
/// - [`BloomStackError::InvalidCapacity`] if `capacity == 0`
///
/// # Examples
///
/// ```
/// use bloomstack::core::params::optimal_hash_count;
///
/// let k = optimal_hash_count(9585, 1000).unwrap();
/// assert_eq!(k, 7);
/// ```
pub fn optimal_hash_count(size: usize, capacity: usize) -> Result<usize> {
    if size == 0 {
        return Err(BloomStackError::invalid_filter_size(size));
    }

    if capacity == 0 {
        return Err(BloomStackError::invalid_capacity(capacity));
    }

    let k = (size as f64 / capacity as f64) * LN_2;
    let k_final = (k.round() as usize).clamp(MIN_HASH_FUNCTIONS, MAX_HASH_FUNCTIONS);

    Ok(k_final)
}

/// Calculate the expected false positive rate for given parameters.
///
/// Implements the formula: `p = (1 - e^(-kn/m))^k` for `n` elements inserted
/// into an array of `m` counters using `k` hash functions.
///
/// # Errors
///
/// - [`BloomStackError::InvalidFilterSize`] if `size == 0`
/// - [`BloomStackError::InvalidHashCount`] if `k` is outside valid bounds
///
/// # Examples
///
/// ```
/// use bloomstack::core::params::expected_fp_rate;
///
/// let fp = expected_fp_rate(9585, 1000, 7).unwrap();
/// assert!((fp - 0.01).abs() < 0.001);
/// ```
pub fn expected_fp_rate(size: usize, items: usize, k: usize) -> Result<f64> {
    if size == 0 {
        return Err(BloomStackError::invalid_filter_size(size));
    }

    if !(MIN_HASH_FUNCTIONS..=MAX_HASH_FUNCTIONS).contains(&k) {
        return Err(BloomStackError::invalid_hash_count(
            k,
            MIN_HASH_FUNCTIONS,
            MAX_HASH_FUNCTIONS,
        ));
    }

    if items == 0 {
        return Ok(0.0);
    }

    let m = size as f64;
    let n = items as f64;
    let k_f64 = k as f64;

    let prob_slot_occupied = 1.0 - (-(k_f64 * n) / m).exp();
    let fp_rate = prob_slot_occupied.powf(k_f64);

    Ok(fp_rate.clamp(0.0, 1.0))
}

/// Validate a capacity/error-rate configuration.
///
/// Performed once at construction; an invalid configuration is rejected
/// before any structure is created.
///
/// # Errors
///
/// - [`BloomStackError::InvalidCapacity`] if `capacity == 0`
/// - [`BloomStackError::ErrorRateOutOfBounds`] if `error_rate` not in (0, 1)
///
/// # Examples
///
/// ```
/// use bloomstack::core::params::validate_config;
///
/// assert!(validate_config(100_000, 0.005).is_ok());
/// assert!(validate_config(0, 0.005).is_err());
/// assert!(validate_config(100_000, 1.0).is_err());
/// ```
pub fn validate_config(capacity: usize, error_rate: f64) -> Result<()> {
    if capacity == 0 {
        return Err(BloomStackError::invalid_capacity(capacity));
    }

    if error_rate <= 0.0 || error_rate >= 1.0 || !error_rate.is_finite() {
        return Err(BloomStackError::error_rate_out_of_bounds(error_rate));
    }

    Ok(())
}

/// Calculate both optimal parameters at once.
///
/// # Returns
///
/// Tuple of `(counter_count, hash_count)`.
///
/// # Errors
///
/// Returns an error if parameters are invalid (see [`optimal_counter_count`]).
///
/// # Examples
///
/// ```
/// use bloomstack::core::params::calculate_filter_params;
///
/// let (m, k) = calculate_filter_params(1000, 0.01).unwrap();
/// assert!(m >= 9585 && m <= 9586);
/// assert_eq!(k, 7);
/// ```
pub fn calculate_filter_params(capacity: usize, error_rate: f64) -> Result<(usize, usize)> {
    let m = optimal_counter_count(capacity, error_rate)?;
    let k = optimal_hash_count(m, capacity)?;
    Ok((m, k))
}
