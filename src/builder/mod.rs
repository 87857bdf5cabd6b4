//! Type-safe builder for scaling filters.
//!
//! # Type-State Pattern
//!
//! Required parameters are enforced at compile time: the builder only gains a
//! `build()` method once capacity and error rate have been provided.
//!
//! ```text
//! Initial → WithCapacity → Complete → ScalingBloomFilter
//!     ↓           ↓            ↓
//!  .capacity()  .error_rate()  .build()
//! ```
//!
//! # Examples
//!
//! ## Minimal Configuration
//!
//! ```no_run
//! use bloomstack::builder::ScalingBloomFilterBuilder;
//!
//! # fn main() -> bloomstack::Result<()> {
//! let filter = ScalingBloomFilterBuilder::new()
//!     .capacity(100_000)
//!     .error_rate(0.005)
//!     .path("kmers.bloom")
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Full Configuration
//!
//! ```no_run
//! use bloomstack::builder::ScalingBloomFilterBuilder;
//! use bloomstack::hash::HashStrategy;
//!
//! # fn main() -> bloomstack::Result<()> {
//! let filter = ScalingBloomFilterBuilder::new()
//!     .capacity(100_000)
//!     .error_rate(0.005)
//!     .path("kmers.bloom")
//!     .hash_strategy(HashStrategy::EnhancedDouble)
//!     .build()?;
//! # Ok(())
//! # }
//! ```

#![allow(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use crate::error::{BloomStackError, Result};
use crate::filters::ScalingBloomFilter;
use crate::hash::HashStrategy;
use std::marker::PhantomData;
use std::path::PathBuf;

/// Type-state marker: no required parameters set.
pub struct Initial;

/// Type-state marker: capacity is set.
pub struct WithCapacity;

/// Type-state marker: all required numeric parameters set.
pub struct Complete;

/// Builder for [`ScalingBloomFilter`] with type-state guarantees.
pub struct ScalingBloomFilterBuilder<State> {
    capacity: Option<usize>,
    error_rate: Option<f64>,
    path: Option<PathBuf>,
    strategy: HashStrategy,
    _state: PhantomData<State>,
}

impl ScalingBloomFilterBuilder<Initial> {
    /// Create a new builder.
    ///
    /// Defaults:
    /// - `hash_strategy`: [`HashStrategy::Double`]
    #[must_use]
    pub fn new() -> Self {
        Self {
            capacity: None,
            error_rate: None,
            path: None,
            strategy: HashStrategy::default(),
            _state: PhantomData,
        }
    }

    /// Set the per-generation capacity. Required; transitions to
    /// `WithCapacity`.
    #[must_use]
    pub fn capacity(self, capacity: usize) -> ScalingBloomFilterBuilder<WithCapacity> {
        ScalingBloomFilterBuilder {
            capacity: Some(capacity),
            error_rate: self.error_rate,
            path: self.path,
            strategy: self.strategy,
            _state: PhantomData,
        }
    }
}

impl Default for ScalingBloomFilterBuilder<Initial> {
    fn default() -> Self {
        Self::new()
    }
}

impl ScalingBloomFilterBuilder<WithCapacity> {
    /// Set the target false positive rate. Required; transitions to
    /// `Complete`.
    #[must_use]
    pub fn error_rate(self, error_rate: f64) -> ScalingBloomFilterBuilder<Complete> {
        ScalingBloomFilterBuilder {
            capacity: self.capacity,
            error_rate: Some(error_rate),
            path: self.path,
            strategy: self.strategy,
            _state: PhantomData,
        }
    }
}

impl ScalingBloomFilterBuilder<Complete> {
    /// Set the image file path. Required before `build()`.
    #[must_use]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Override the index derivation strategy.
    #[must_use]
    pub fn hash_strategy(mut self, strategy: HashStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Create the filter and write its initial image.
    ///
    /// # Errors
    ///
    /// - [`BloomStackError::InvalidConfig`] if no path was provided
    /// - Everything [`ScalingBloomFilter::with_strategy`] can return
    pub fn build(self) -> Result<ScalingBloomFilter> {
        let capacity = self.capacity.expect("type-state guarantees capacity");
        let error_rate = self.error_rate.expect("type-state guarantees error_rate");
        let path = self
            .path
            .ok_or_else(|| BloomStackError::invalid_config("no image path provided"))?;

        ScalingBloomFilter::with_strategy(capacity, error_rate, path, self.strategy)
    }
}
