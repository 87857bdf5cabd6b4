//! A single fixed-capacity counting Bloom filter generation.
//!
//! A [`SubFilter`] is one link in the scaling chain: a counter array sized
//! from a target capacity and error rate, a per-generation hash seed, an
//! insert counter, and a sealed flag. Generations are created in
//! monotonically increasing order by the scaling filter and never destroyed
//! individually.
//!
//! # Sealing
//!
//! A sub-filter seals itself once its insert count reaches the configured
//! capacity. Sealing is advisory: the scaling filter uses it to decide when
//! to roll over to a fresh generation, but inserts past capacity remain
//! legal and merely push the false positive rate beyond the configured
//! bound.
//!
//! # Id Span
//!
//! Every insert carries a caller-supplied sequence id. The sub-filter records
//! the `[min, max]` span of ids it has absorbed; the scaling filter uses the
//! span to route deletes to the generation that actually holds the key
//! instead of broadcasting decrements across all generations.
//!
//! # Examples
//!
//! ```
//! use bloomstack::filters::SubFilter;
//! use bloomstack::hash::HashStrategy;
//!
//! let mut filter = SubFilter::new(1000, 0.01, 7, HashStrategy::Double).unwrap();
//!
//! filter.add(b"hello", 0);
//! assert!(filter.check(b"hello"));
//! assert!(!filter.check(b"world"));
//!
//! assert!(filter.delete(b"hello", 0));
//! assert!(!filter.check(b"hello"));
//! ```

#![allow(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use crate::core::countervec::CounterVec;
use crate::core::params::{self, MAX_HASH_FUNCTIONS, MIN_HASH_FUNCTIONS};
use crate::error::{BloomStackError, Result};
use crate::hash::{BloomHasher, Fnv1aHasher, HashStrategy};

/// One generation: a fixed-capacity counting Bloom filter.
///
/// # Invariants
///
/// - The counter array size is fixed at construction and never resized.
/// - Insert and delete derive the identical index sequence for a key, so a
///   delete exactly undoes a prior add (absent counter saturation).
#[derive(Debug, Clone)]
pub struct SubFilter {
    /// Packed 4-bit counters.
    counters: CounterVec,

    /// Number of hash functions (k).
    k: usize,

    /// Per-generation hash seed.
    seed: u64,

    /// Seeded hasher, derived from `seed`.
    hasher: Fnv1aHasher,

    /// Index derivation strategy.
    strategy: HashStrategy,

    /// Configured capacity (sealing threshold).
    capacity: usize,

    /// Number of adds absorbed so far.
    count: u64,

    /// Set once `count` reaches `capacity`.
    sealed: bool,

    /// `[min, max]` of insert ids absorbed, `None` while empty.
    id_span: Option<(u64, u64)>,
}

impl SubFilter {
    /// Create a new generation sized for `capacity` elements at `error_rate`.
    ///
    /// # Errors
    ///
    /// - [`BloomStackError::InvalidCapacity`] if `capacity` is 0
    /// - [`BloomStackError::ErrorRateOutOfBounds`] if `error_rate` not in (0, 1)
    ///
    /// # Examples
    ///
    /// ```
    /// use bloomstack::filters::SubFilter;
    /// use bloomstack::hash::HashStrategy;
    ///
    /// let filter = SubFilter::new(10_000, 0.005, 0, HashStrategy::Double).unwrap();
    /// assert!(filter.size() > 0);
    /// assert!(!filter.is_sealed());
    /// ```
    pub fn new(
        capacity: usize,
        error_rate: f64,
        seed: u64,
        strategy: HashStrategy,
    ) -> Result<Self> {
        params::validate_config(capacity, error_rate)?;

        let (size, k) = params::calculate_filter_params(capacity, error_rate)?;

        Ok(Self {
            counters: CounterVec::new(size)?,
            k,
            seed,
            hasher: Fnv1aHasher::with_seed(seed),
            strategy,
            capacity,
            count: 0,
            sealed: false,
            id_span: None,
        })
    }

    /// Reconstruct a generation from its persisted parts.
    ///
    /// Used by the persistence layer on load. `id_span` is `None` when the
    /// persisted count is zero.
    ///
    /// # Errors
    ///
    /// - [`BloomStackError::InvalidHashCount`] if `k` is outside valid bounds
    /// - [`BloomStackError::FormatError`] if `counter_bytes` is too short
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        size: usize,
        k: usize,
        seed: u64,
        strategy: HashStrategy,
        capacity: usize,
        count: u64,
        sealed: bool,
        id_span: Option<(u64, u64)>,
        counter_bytes: &[u8],
    ) -> Result<Self> {
        if !(MIN_HASH_FUNCTIONS..=MAX_HASH_FUNCTIONS).contains(&k) {
            return Err(BloomStackError::invalid_hash_count(
                k,
                MIN_HASH_FUNCTIONS,
                MAX_HASH_FUNCTIONS,
            ));
        }

        Ok(Self {
            counters: CounterVec::from_bytes(size, counter_bytes)?,
            k,
            seed,
            hasher: Fnv1aHasher::with_seed(seed),
            strategy,
            capacity,
            count,
            sealed,
            id_span,
        })
    }

    /// Derive the slot indices for `key`.
    ///
    /// Deterministic: the same key always maps to the same sequence of
    /// indices, including repeats.
    #[inline]
    fn positions(&self, key: &[u8]) -> Vec<usize> {
        let (h1, h2) = self.hasher.hash_bytes_pair(key);
        self.strategy.generate_indices(h1, h2, self.k, self.size())
    }

    /// Insert `key` with insert sequence id `id`.
    ///
    /// Increments the counter at each derived index (saturating) and seals
    /// the generation once the configured capacity is reached. Inserts into a
    /// sealed generation remain legal.
    pub fn add(&mut self, key: &[u8], id: u64) {
        for idx in self.positions(key) {
            self.counters.increment(idx);
        }

        self.count += 1;
        self.id_span = Some(match self.id_span {
            None => (id, id),
            Some((lo, hi)) => (lo.min(id), hi.max(id)),
        });

        if !self.sealed && self.count >= self.capacity as u64 {
            self.sealed = true;
            tracing::info!(
                capacity = self.capacity,
                seed = self.seed,
                "generation reached capacity and sealed"
            );
        }
    }

    /// Delete `key` from this generation.
    ///
    /// Checks membership first: if the key does not appear present, no
    /// counter is touched and `false` is returned. This keeps a delete of a
    /// never-inserted (or misrouted) key from corrupting counters that other
    /// keys depend on.
    ///
    /// The `_id` is the caller's insert sequence id; routing happened before
    /// this call, so it does not affect hashing.
    ///
    /// # Returns
    ///
    /// `true` if the key appeared present and its counters were decremented.
    pub fn delete(&mut self, key: &[u8], _id: u64) -> bool {
        if !self.check(key) {
            return false;
        }

        for idx in self.positions(key) {
            self.counters.decrement(idx);
        }

        true
    }

    /// Check whether `key` might be in this generation.
    ///
    /// # Returns
    ///
    /// - `true`: every derived counter is non-zero (possibly a false positive)
    /// - `false`: the key is definitely not in this generation
    #[must_use]
    pub fn check(&self, key: &[u8]) -> bool {
        self.positions(key)
            .iter()
            .all(|&idx| !self.counters.is_zero(idx))
    }

    /// Whether `id` falls inside this generation's recorded insert span.
    #[must_use]
    #[inline]
    pub fn contains_id(&self, id: u64) -> bool {
        match self.id_span {
            Some((lo, hi)) => id >= lo && id <= hi,
            None => false,
        }
    }

    /// Whether this generation has reached its capacity.
    #[must_use]
    #[inline]
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Number of counters (m).
    #[must_use]
    #[inline]
    pub fn size(&self) -> usize {
        self.counters.len()
    }

    /// Number of hash functions (k).
    #[must_use]
    #[inline]
    pub fn num_hashes(&self) -> usize {
        self.k
    }

    /// Per-generation hash seed.
    #[must_use]
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Index derivation strategy.
    #[must_use]
    #[inline]
    pub fn strategy(&self) -> HashStrategy {
        self.strategy
    }

    /// Configured capacity.
    #[must_use]
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of adds absorbed.
    #[must_use]
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Recorded `[min, max]` insert id span.
    #[must_use]
    #[inline]
    pub fn id_span(&self) -> Option<(u64, u64)> {
        self.id_span
    }

    /// Borrow the underlying counter array.
    #[must_use]
    #[inline]
    pub fn counters(&self) -> &CounterVec {
        &self.counters
    }

    /// Fraction of counters that are non-zero.
    #[must_use]
    pub fn fill_rate(&self) -> f64 {
        self.counters.fill_rate()
    }

    /// Expected false positive rate at the current insert count.
    #[must_use]
    pub fn estimate_fp_rate(&self) -> f64 {
        params::expected_fp_rate(self.size(), self.count as usize, self.k).unwrap_or(1.0)
    }
}
