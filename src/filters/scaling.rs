//! Scaling counting Bloom filter with file persistence.
//!
//! A [`ScalingBloomFilter`] owns an append-only chain of fixed-capacity
//! [`SubFilter`] generations plus the path of its persisted image. When the
//! current generation seals, the next insert appends a fresh generation; the
//! chain grows to absorb any number of elements while each generation keeps
//! its configured error rate.
//!
//! # Algorithm
//!
//! ```text
//! ScalingBloomFilter = [Generation₀, Generation₁, Generation₂, ...]
//!
//! add:    route to the newest generation, rolling over if it is sealed
//! check:  OR across generations, newest first
//! delete: route to the generation whose insert-id span contains the id
//! ```
//!
//! # Delete Routing
//!
//! Every insert carries a caller-supplied monotonic sequence id, and every
//! generation records the span of ids it absorbed. A delete consults those
//! spans and decrements counters only in the generation that actually holds
//! the key. Broadcasting decrements across all generations would risk
//! clearing a slot that a colliding key in an unrelated generation still
//! depends on; span routing avoids that entirely.
//!
//! # Lifecycle
//!
//! ```no_run
//! use bloomstack::ScalingBloomFilter;
//!
//! # fn main() -> bloomstack::Result<()> {
//! let mut filter = ScalingBloomFilter::create(100_000, 0.005, "kmers.bloom")?;
//!
//! filter.add(b"ACGTACGTACGTACGTACGT", 0)?;
//! assert!(filter.check(b"ACGTACGTACGTACGTACGT"));
//!
//! filter.flush()?;
//! filter.close()?;
//!
//! // Later, in this or another process:
//! let reopened = ScalingBloomFilter::load(100_000, 0.005, "kmers.bloom")?;
//! assert!(reopened.check(b"ACGTACGTACGTACGTACGT"));
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! Mutation requires `&mut self` (single-writer model). For concurrent access
//! wrap the filter in a `Mutex`:
//!
//! ```no_run
//! use bloomstack::ScalingBloomFilter;
//! use std::sync::{Arc, Mutex};
//!
//! # fn main() -> bloomstack::Result<()> {
//! let filter = Arc::new(Mutex::new(
//!     ScalingBloomFilter::create(10_000, 0.01, "shared.bloom")?,
//! ));
//!
//! let clone = Arc::clone(&filter);
//! std::thread::spawn(move || {
//!     clone.lock().unwrap().add(b"item", 0).unwrap();
//! });
//! # Ok(())
//! # }
//! ```
//!
//! # References
//!
//! - Almeida, P. S., Baquero, C., Preguiça, N., & Hutchison, D. (2007).
//!   "Scalable Bloom Filters". Information Processing Letters, 101(6), 255-261.

#![allow(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use crate::error::{BloomStackError, Result};
use crate::filters::subfilter::SubFilter;
use crate::hash::HashStrategy;
use crate::persist::{self, format};
use std::fmt;
use std::path::{Path, PathBuf};

/// Maximum number of generations.
///
/// 64 generations of equal capacity already multiply the configured capacity
/// 64-fold; hitting this ceiling means the filter was sized far below its
/// workload.
pub const MAX_GENERATIONS: usize = 64;

/// Multiplier for deriving per-generation hash seeds (golden ratio constant).
const SEED_STEP: u64 = 0x9e37_79b9_7f4a_7c15;

/// Derive the hash seed for generation `index`.
///
/// Deterministic so that a filter reconstructed from its image continues the
/// same seed sequence when it grows further.
#[inline]
fn seed_for(index: usize) -> u64 {
    (index as u64).wrapping_mul(SEED_STEP)
}

/// Scalable counting Bloom filter persisted to a single file.
///
/// See the [module documentation](self) for the full contract.
#[derive(Debug)]
pub struct ScalingBloomFilter {
    /// Generations, oldest first. Invariant: only the last may be unsealed.
    generations: Vec<SubFilter>,

    /// Per-generation capacity.
    capacity: usize,

    /// Configured false positive rate per generation.
    error_rate: f64,

    /// Index derivation strategy shared by all generations.
    strategy: HashStrategy,

    /// Path of the persisted image.
    path: PathBuf,
}

impl ScalingBloomFilter {
    /// Create a new filter and write its initial image to `path`.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Target capacity of each generation (must be > 0)
    /// * `error_rate` - Target false positive rate (must be in (0, 1))
    /// * `path` - Destination of the persisted image
    ///
    /// # Errors
    ///
    /// - [`BloomStackError::InvalidCapacity`] / [`BloomStackError::ErrorRateOutOfBounds`]
    ///   on invalid configuration; nothing is created
    /// - [`BloomStackError::Io`] if the initial image cannot be written
    pub fn create(
        capacity: usize,
        error_rate: f64,
        path: impl AsRef<Path>,
    ) -> Result<Self> {
        Self::with_strategy(capacity, error_rate, path, HashStrategy::default())
    }

    /// Create a new filter with an explicit hash strategy.
    ///
    /// # Errors
    ///
    /// Same as [`ScalingBloomFilter::create`].
    pub fn with_strategy(
        capacity: usize,
        error_rate: f64,
        path: impl AsRef<Path>,
        strategy: HashStrategy,
    ) -> Result<Self> {
        let first = SubFilter::new(capacity, error_rate, seed_for(0), strategy)?;

        let mut filter = Self {
            generations: vec![first],
            capacity,
            error_rate,
            strategy,
            path: path.as_ref().to_path_buf(),
        };

        filter.flush()?;
        tracing::info!(path = %filter.path.display(), capacity, error_rate, "created filter image");
        Ok(filter)
    }

    /// Reload a filter from its persisted image.
    ///
    /// The header must match the expected `capacity` and `error_rate`; the
    /// reconstructed filter answers `check` identically to the structure that
    /// was flushed.
    ///
    /// # Errors
    ///
    /// - [`BloomStackError::Io`] if the file is missing or unreadable
    /// - [`BloomStackError::FormatError`] if the image is corrupt, truncated,
    ///   version-incompatible, or was written with a different configuration
    pub fn load(
        capacity: usize,
        error_rate: f64,
        path: impl AsRef<Path>,
    ) -> Result<Self> {
        let path = path.as_ref();
        let image = persist::read_image(path)?;
        format::validate_expected(&image, capacity, error_rate)?;

        // All generations but the newest must be sealed; anything else means
        // the image was produced by a buggy writer.
        let last = image.generations.len() - 1;
        for (index, generation) in image.generations.iter().enumerate() {
            if index != last && !generation.is_sealed() {
                return Err(BloomStackError::format_error(format!(
                    "generation {index} is unsealed but not current"
                )));
            }
        }

        tracing::info!(
            path = %path.display(),
            generations = image.generations.len(),
            "loaded filter image"
        );

        Ok(Self {
            generations: image.generations,
            capacity: image.capacity,
            error_rate: image.error_rate,
            strategy: image.strategy,
            path: path.to_path_buf(),
        })
    }

    /// Insert `key` with insert sequence id `id`.
    ///
    /// Routes to the newest generation; if that generation is sealed, a new
    /// one is appended first and becomes the insertion target. Ids are
    /// expected to be monotonically non-decreasing across calls; the delete
    /// routing index is built from them.
    ///
    /// # Errors
    ///
    /// [`BloomStackError::GenerationLimitReached`] if growth would exceed
    /// [`MAX_GENERATIONS`]. The filter remains usable; the key is not
    /// inserted.
    pub fn add(&mut self, key: &[u8], id: u64) -> Result<()> {
        if self.current().is_sealed() {
            self.grow()?;
        }

        self.generations
            .last_mut()
            .expect("generation chain is never empty")
            .add(key, id);
        Ok(())
    }

    /// Delete `key` previously inserted with sequence id `id`.
    ///
    /// The id selects the generation: only generations whose recorded insert
    /// span contains `id` are consulted, and counters are decremented in at
    /// most one of them. Deleting a key that was never inserted (or an id
    /// outside every span) is a no-op.
    ///
    /// # Returns
    ///
    /// `true` if a generation held the key and its counters were decremented.
    pub fn delete(&mut self, key: &[u8], id: u64) -> bool {
        for generation in self.generations.iter_mut().rev() {
            if generation.contains_id(id) && generation.delete(key, id) {
                return true;
            }
        }
        false
    }

    /// Check whether `key` might be in the filter.
    ///
    /// Membership in the union structure: true iff any generation reports
    /// true. Generations are consulted newest first.
    ///
    /// # Returns
    ///
    /// - `true`: the key might be present (bounded false positive probability)
    /// - `false`: the key is definitely not present
    #[must_use]
    pub fn check(&self, key: &[u8]) -> bool {
        self.generations.iter().rev().any(|g| g.check(key))
    }

    /// Alias for [`ScalingBloomFilter::check`] with identical semantics.
    ///
    /// The two spellings agree for every key and every filter state.
    #[must_use]
    #[inline]
    pub fn contains(&self, key: &[u8]) -> bool {
        self.check(key)
    }

    /// Durably write the current state to the filter's image file.
    ///
    /// Returns only after the image is on stable storage; every `add` and
    /// `delete` issued before the call is reflected in the file. The write is
    /// atomic with respect to crashes (temp file + rename, both fsynced).
    ///
    /// # Errors
    ///
    /// [`BloomStackError::Io`] if the write fails; the in-memory structure is
    /// unaffected.
    pub fn flush(&mut self) -> Result<()> {
        let bytes = format::encode_image(
            self.capacity,
            self.error_rate,
            self.strategy,
            &self.generations,
        );
        persist::write_atomic(&self.path, &bytes)
    }

    /// Flush and release the filter.
    ///
    /// Consumes the handle; reopen with [`ScalingBloomFilter::load`].
    ///
    /// # Errors
    ///
    /// [`BloomStackError::Io`] if the final flush fails.
    pub fn close(mut self) -> Result<()> {
        self.flush()
    }

    /// Append a fresh generation and make it current.
    fn grow(&mut self) -> Result<()> {
        if self.generations.len() >= MAX_GENERATIONS {
            return Err(BloomStackError::generation_limit_reached(MAX_GENERATIONS));
        }

        let next = SubFilter::new(
            self.capacity,
            self.error_rate,
            seed_for(self.generations.len()),
            self.strategy,
        )?;

        tracing::info!(
            generation = self.generations.len(),
            capacity = self.capacity,
            "rolling over to new generation"
        );
        self.generations.push(next);
        Ok(())
    }

    /// The newest generation.
    fn current(&self) -> &SubFilter {
        self.generations
            .last()
            .expect("generation chain is never empty")
    }

    /// Number of generations in the chain.
    #[must_use]
    #[inline]
    pub fn generation_count(&self) -> usize {
        self.generations.len()
    }

    /// Total number of adds across all generations.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.generations.iter().map(SubFilter::count).sum()
    }

    /// Whether no adds have been absorbed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured per-generation capacity.
    #[must_use]
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Configured false positive rate.
    #[must_use]
    #[inline]
    pub fn error_rate(&self) -> f64 {
        self.error_rate
    }

    /// Path of the persisted image.
    #[must_use]
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Index derivation strategy.
    #[must_use]
    #[inline]
    pub fn strategy(&self) -> HashStrategy {
        self.strategy
    }

    /// Borrow the generation chain, oldest first.
    pub(crate) fn generations(&self) -> &[SubFilter] {
        &self.generations
    }

    /// Estimated false positive rate of the union structure.
    ///
    /// A query is a false positive if any generation misfires:
    /// `1 - Π(1 - pᵢ)` over the per-generation estimates.
    #[must_use]
    pub fn estimate_fp_rate(&self) -> f64 {
        let miss_all: f64 = self
            .generations
            .iter()
            .map(|g| 1.0 - g.estimate_fp_rate())
            .product();
        (1.0 - miss_all).clamp(0.0, 1.0)
    }

    /// Snapshot of the filter's health.
    #[must_use]
    pub fn stats(&self) -> ScalingFilterStats {
        let saturations = self.generations.iter().map(|g| g.counters().saturations()).sum();
        let underflows = self.generations.iter().map(|g| g.counters().underflows()).sum();
        let memory_bytes = self
            .generations
            .iter()
            .map(|g| g.counters().memory_usage())
            .sum();

        ScalingFilterStats {
            generation_count: self.generations.len(),
            total_items: self.len(),
            capacity: self.capacity,
            error_rate: self.error_rate,
            estimated_fp_rate: self.estimate_fp_rate(),
            current_fill_rate: self.current().fill_rate(),
            saturations,
            underflows,
            memory_bytes,
        }
    }
}

/// Health snapshot of a scaling filter.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalingFilterStats {
    /// Number of generations.
    pub generation_count: usize,

    /// Total adds across all generations.
    pub total_items: u64,

    /// Configured per-generation capacity.
    pub capacity: usize,

    /// Configured false positive rate.
    pub error_rate: f64,

    /// Estimated false positive rate of the union structure.
    pub estimated_fp_rate: f64,

    /// Fill rate of the current generation.
    pub current_fill_rate: f64,

    /// Increments absorbed by saturated counters.
    pub saturations: u64,

    /// Decrements absorbed by zero counters.
    pub underflows: u64,

    /// Counter memory across all generations, in bytes.
    pub memory_bytes: usize,
}

impl fmt::Display for ScalingFilterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ScalingBloomFilter Stats")?;
        writeln!(f, "========================")?;
        writeln!(f, "Generations:      {}", self.generation_count)?;
        writeln!(f, "Total items:      {}", self.total_items)?;
        writeln!(f, "Capacity/gen:     {}", self.capacity)?;
        writeln!(f, "Target FPR:       {:.4}%", self.error_rate * 100.0)?;
        writeln!(f, "Estimated FPR:    {:.4}%", self.estimated_fp_rate * 100.0)?;
        writeln!(f, "Current fill:     {:.1}%", self.current_fill_rate * 100.0)?;
        writeln!(f, "Saturations:      {}", self.saturations)?;
        writeln!(f, "Underflows:       {}", self.underflows)?;
        writeln!(f, "Counter memory:   {} bytes", self.memory_bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn scratch(name: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join(name);
        (dir, path)
    }

    fn key(i: u64) -> [u8; 8] {
        i.to_le_bytes()
    }

    #[test]
    fn test_create_writes_initial_image() {
        let (_dir, path) = scratch("new.bloom");
        let filter = ScalingBloomFilter::create(1000, 0.01, &path).unwrap();

        assert!(path.exists());
        assert_eq!(filter.generation_count(), 1);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_create_invalid_config() {
        let (_dir, path) = scratch("bad.bloom");

        assert!(matches!(
            ScalingBloomFilter::create(0, 0.01, &path).unwrap_err(),
            BloomStackError::InvalidCapacity { .. }
        ));
        assert!(matches!(
            ScalingBloomFilter::create(100, 0.0, &path).unwrap_err(),
            BloomStackError::ErrorRateOutOfBounds { .. }
        ));
        assert!(matches!(
            ScalingBloomFilter::create(100, 1.0, &path).unwrap_err(),
            BloomStackError::ErrorRateOutOfBounds { .. }
        ));
        // Nothing was created
        assert!(!path.exists());
    }

    #[test]
    fn test_add_and_check() {
        let (_dir, path) = scratch("basic.bloom");
        let mut filter = ScalingBloomFilter::create(1000, 0.01, &path).unwrap();

        filter.add(b"hello", 0).unwrap();
        assert!(filter.check(b"hello"));
        assert!(!filter.check(b"world"));
        assert_eq!(filter.len(), 1);
    }

    #[test]
    fn test_check_and_contains_agree() {
        let (_dir, path) = scratch("agree.bloom");
        let mut filter = ScalingBloomFilter::create(100, 0.01, &path).unwrap();

        for i in 0..300 {
            filter.add(&key(i), i).unwrap();
        }
        for i in 150..160 {
            filter.delete(&key(i), i);
        }

        for i in 0..600 {
            assert_eq!(
                filter.check(&key(i)),
                filter.contains(&key(i)),
                "check/contains disagree for {}",
                i
            );
        }
    }

    #[test]
    fn test_rollover_on_seal() {
        let (_dir, path) = scratch("rollover.bloom");
        let mut filter = ScalingBloomFilter::create(100, 0.01, &path).unwrap();

        for i in 0..100 {
            filter.add(&key(i), i).unwrap();
        }
        assert_eq!(filter.generation_count(), 1);

        // The 101st insert rolls over
        filter.add(&key(100), 100).unwrap();
        assert_eq!(filter.generation_count(), 2);
    }

    #[test]
    fn test_no_false_negatives_across_generations() {
        let (_dir, path) = scratch("multi-gen.bloom");
        let mut filter = ScalingBloomFilter::create(100, 0.01, &path).unwrap();

        for i in 0..550 {
            filter.add(&key(i), i).unwrap();
        }
        assert!(filter.generation_count() >= 5);

        for i in 0..550 {
            assert!(filter.check(&key(i)), "false negative for {}", i);
        }
    }

    #[test]
    fn test_at_most_one_unsealed_generation() {
        let (_dir, path) = scratch("sealed.bloom");
        let mut filter = ScalingBloomFilter::create(50, 0.01, &path).unwrap();

        for i in 0..380 {
            filter.add(&key(i), i).unwrap();
        }

        let unsealed = filter
            .generations()
            .iter()
            .filter(|g| !g.is_sealed())
            .count();
        assert!(unsealed <= 1);

        // And the unsealed one, if any, is the newest
        for g in &filter.generations()[..filter.generation_count() - 1] {
            assert!(g.is_sealed());
        }
    }

    #[test]
    fn test_delete_routes_by_id() {
        let (_dir, path) = scratch("route.bloom");
        let mut filter = ScalingBloomFilter::create(100, 0.01, &path).unwrap();

        for i in 0..250 {
            filter.add(&key(i), i).unwrap();
        }
        assert_eq!(filter.generation_count(), 3);

        // Delete a key from the middle generation
        assert!(filter.delete(&key(150), 150));

        // The middle generation no longer holds it; the others were never
        // touched (their counters can still collide, so assert per-generation)
        assert!(!filter.generations()[1].check(&key(150)));

        // Neighbors survive
        assert!(filter.check(&key(149)));
        assert!(filter.check(&key(151)));
    }

    #[test]
    fn test_delete_with_wrong_id_is_noop() {
        let (_dir, path) = scratch("wrong-id.bloom");
        let mut filter = ScalingBloomFilter::create(100, 0.01, &path).unwrap();

        filter.add(b"item", 5).unwrap();

        // Id outside every recorded span touches nothing
        assert!(!filter.delete(b"item", 900));
        assert!(filter.check(b"item"));
    }

    #[test]
    fn test_delete_never_inserted_key() {
        let (_dir, path) = scratch("ghost.bloom");
        let mut filter = ScalingBloomFilter::create(100, 0.01, &path).unwrap();

        filter.add(b"present", 0).unwrap();

        assert!(!filter.delete(b"ghost", 0));
        assert!(filter.check(b"present"));
    }

    #[test]
    fn test_delete_is_inverse_of_add() {
        let (_dir, path) = scratch("inverse.bloom");
        let mut filter = ScalingBloomFilter::create(1000, 0.01, &path).unwrap();

        for i in 0..500 {
            filter.add(&key(i), i).unwrap();
        }
        for i in 0..500 {
            assert!(filter.delete(&key(i), i), "delete failed for {}", i);
        }

        assert_eq!(filter.generations()[0].counters().count_nonzero(), 0);
    }

    #[test]
    fn test_generation_limit() {
        let (_dir, path) = scratch("limit.bloom");
        let mut filter = ScalingBloomFilter::create(1, 0.5, &path).unwrap();

        // Fill all 64 generations (capacity 1 each)
        for i in 0..MAX_GENERATIONS as u64 {
            filter.add(&key(i), i).unwrap();
        }
        assert_eq!(filter.generation_count(), MAX_GENERATIONS);

        let err = filter.add(b"one-too-many", 999).unwrap_err();
        assert!(matches!(err, BloomStackError::GenerationLimitReached { .. }));

        // Filter still answers queries
        assert!(filter.check(&key(0)));
    }

    #[test]
    fn test_flush_and_load_roundtrip() {
        let (_dir, path) = scratch("roundtrip.bloom");
        let mut filter = ScalingBloomFilter::create(100, 0.01, &path).unwrap();

        for i in 0..250 {
            filter.add(&key(i), i).unwrap();
        }
        for i in (0..250).step_by(5) {
            filter.delete(&key(i), i);
        }
        filter.flush().unwrap();

        let reloaded = ScalingBloomFilter::load(100, 0.01, &path).unwrap();
        assert_eq!(reloaded.generation_count(), filter.generation_count());
        assert_eq!(reloaded.len(), filter.len());

        // Identical answers for every key, inserted or not
        for i in 0..500 {
            assert_eq!(
                filter.check(&key(i)),
                reloaded.check(&key(i)),
                "answers differ for {}",
                i
            );
        }
    }

    #[test]
    fn test_load_continues_growing_with_same_seeds() {
        let (_dir, path) = scratch("regrow.bloom");
        let mut filter = ScalingBloomFilter::create(100, 0.01, &path).unwrap();
        for i in 0..150 {
            filter.add(&key(i), i).unwrap();
        }
        filter.flush().unwrap();

        let mut reloaded = ScalingBloomFilter::load(100, 0.01, &path).unwrap();
        for i in 150..250 {
            reloaded.add(&key(i), i).unwrap();
        }
        assert_eq!(reloaded.generation_count(), 3);
        assert_eq!(reloaded.generations()[2].seed(), seed_for(2));

        for i in 0..250 {
            assert!(reloaded.check(&key(i)), "false negative for {}", i);
        }
    }

    #[test]
    fn test_load_config_mismatch() {
        let (_dir, path) = scratch("mismatch.bloom");
        let mut filter = ScalingBloomFilter::create(100, 0.01, &path).unwrap();
        filter.flush().unwrap();

        assert!(matches!(
            ScalingBloomFilter::load(200, 0.01, &path).unwrap_err(),
            BloomStackError::FormatError { .. }
        ));
        assert!(matches!(
            ScalingBloomFilter::load(100, 0.02, &path).unwrap_err(),
            BloomStackError::FormatError { .. }
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let (_dir, path) = scratch("missing.bloom");
        assert!(matches!(
            ScalingBloomFilter::load(100, 0.01, &path).unwrap_err(),
            BloomStackError::Io { .. }
        ));
    }

    #[test]
    fn test_load_corrupt_file() {
        let (_dir, path) = scratch("corrupt.bloom");
        std::fs::write(&path, b"not a filter image").unwrap();

        assert!(matches!(
            ScalingBloomFilter::load(100, 0.01, &path).unwrap_err(),
            BloomStackError::FormatError { .. }
        ));
    }

    #[test]
    fn test_close_flushes() {
        let (_dir, path) = scratch("close.bloom");
        let mut filter = ScalingBloomFilter::create(100, 0.01, &path).unwrap();
        filter.add(b"durable", 0).unwrap();
        filter.close().unwrap();

        let reloaded = ScalingBloomFilter::load(100, 0.01, &path).unwrap();
        assert!(reloaded.check(b"durable"));
    }

    #[test]
    fn test_failed_flush_leaves_memory_valid() {
        let (_dir, path) = scratch("subdir-gone.bloom");
        let mut filter = ScalingBloomFilter::create(100, 0.01, &path).unwrap();
        filter.add(b"kept", 0).unwrap();

        // Point the image at an unwritable location
        filter.path = PathBuf::from("/nonexistent-dir/filter.bloom");
        assert!(filter.flush().is_err());

        // In-memory state is unaffected
        assert!(filter.check(b"kept"));
        assert_eq!(filter.len(), 1);
    }

    #[test]
    fn test_stats() {
        let (_dir, path) = scratch("stats.bloom");
        let mut filter = ScalingBloomFilter::create(100, 0.01, &path).unwrap();

        for i in 0..150 {
            filter.add(&key(i), i).unwrap();
        }

        let stats = filter.stats();
        assert_eq!(stats.generation_count, 2);
        assert_eq!(stats.total_items, 150);
        assert_eq!(stats.capacity, 100);
        assert!(stats.current_fill_rate > 0.0);
        assert!(stats.estimated_fp_rate > 0.0);
        assert!(stats.memory_bytes > 0);

        let rendered = format!("{stats}");
        assert!(rendered.contains("Generations:      2"));
        assert!(rendered.contains("Total items:      150"));
    }

    #[test]
    fn test_estimate_fp_rate_grows_with_generations() {
        let (_dir, path) = scratch("fpr.bloom");
        let mut filter = ScalingBloomFilter::create(100, 0.01, &path).unwrap();

        for i in 0..100 {
            filter.add(&key(i), i).unwrap();
        }
        let one_gen = filter.estimate_fp_rate();

        for i in 100..200 {
            filter.add(&key(i), i).unwrap();
        }
        let two_gen = filter.estimate_fp_rate();

        assert!(two_gen > one_gen);
        assert!(two_gen < 0.05);
    }

    #[test]
    fn test_seed_for_is_deterministic_and_distinct() {
        assert_eq!(seed_for(3), seed_for(3));
        let seeds: std::collections::HashSet<u64> =
            (0..MAX_GENERATIONS).map(seed_for).collect();
        assert_eq!(seeds.len(), MAX_GENERATIONS);
    }
}
