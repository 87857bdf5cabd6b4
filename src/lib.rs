//! BloomStack: scalable counting Bloom filter with file persistence.
//!
//! BloomStack provides approximate set membership at scale: insertion,
//! deletion, and membership queries over opaque byte keys, with a bounded
//! false positive rate and crash-safe on-disk state.
//!
//! # How It Works
//!
//! A [`ScalingBloomFilter`] chains fixed-capacity counting Bloom filter
//! generations:
//!
//! - **Counting**: every slot is a 4-bit saturating counter instead of a bit,
//!   so elements can be deleted by decrementing.
//! - **Scaling**: when the current generation reaches capacity it seals, and
//!   the next insert opens a fresh generation. Queries OR across the chain.
//! - **Persistence**: the whole chain serializes to a single file that can be
//!   memory-mapped and reloaded into an equivalent structure.
//!
//! Like every Bloom filter, the structure can produce:
//! - **False positives**: may report a key present when it isn't (probability
//!   bounded by the configured error rate)
//! - **Zero false negatives**: a key that was added and not deleted is always
//!   reported present
//!
//! # Quick Start
//!
//! ```no_run
//! use bloomstack::ScalingBloomFilter;
//!
//! # fn main() -> bloomstack::Result<()> {
//! // One generation holds 100k elements at a 0.5% false positive rate
//! let mut filter = ScalingBloomFilter::create(100_000, 0.005, "kmers.bloom")?;
//!
//! // Insert keys with monotonic sequence ids
//! filter.add(b"ACGTACGTACGTACGTACGT", 0)?;
//! filter.add(b"TTTTACGTACGTACGTACGT", 1)?;
//!
//! // Query
//! assert!(filter.check(b"ACGTACGTACGTACGTACGT"));
//! assert!(filter.contains(b"ACGTACGTACGTACGTACGT")); // same answer, always
//!
//! // Delete by key + original id
//! filter.delete(b"TTTTACGTACGTACGTACGT", 1);
//!
//! // Persist, drop, reload
//! filter.flush()?;
//! filter.close()?;
//! let filter = ScalingBloomFilter::load(100_000, 0.005, "kmers.bloom")?;
//! assert!(filter.check(b"ACGTACGTACGTACGTACGT"));
//! # Ok(())
//! # }
//! ```
//!
//! # Concurrency Model
//!
//! Single-writer: all mutating operations take `&mut self`, and one process
//! owns the image file. For multi-threaded use, wrap the filter in a `Mutex`
//! (one global lock is sufficient at the call rates this structure targets):
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
//! # Using the Builder
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
//! # Feature Flags
//!
//! | Feature  | Enables                                           |
//! |----------|---------------------------------------------------|
//! | `serde`  | Serde interop for sub-filters (bincode, JSON)     |
//!
//! # Unsafe Code Policy
//!
//! The single `unsafe` block in the crate memory-maps the image file during
//! load (`persist::read_image`), justified by the single-writer ownership
//! model and documented at the call site. Everything else is safe Rust.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Core data structures and sizing utilities
pub mod core;

/// Error types and result alias
pub mod error;

/// Filter implementations
pub mod filters;

/// Hash functions and index strategies
pub mod hash;

/// On-disk image format and atomic file I/O
pub mod persist;

/// Type-safe builder for scaling filters
pub mod builder;

/// Serde interop (requires `serde` feature)
#[cfg(feature = "serde")]
pub mod serde_support;

// Re-export commonly used types at the crate root
pub use error::{BloomStackError, Result};

pub use filters::{ScalingBloomFilter, ScalingFilterStats, SubFilter, MAX_GENERATIONS};

pub use builder::ScalingBloomFilterBuilder;

pub use hash::{BloomHasher, HashStrategy};

/// Prelude module for convenient imports.
///
/// # Examples
///
/// ```no_run
/// use bloomstack::prelude::*;
///
/// # fn main() -> bloomstack::Result<()> {
/// let mut filter = ScalingBloomFilter::create(1000, 0.01, "items.bloom")?;
/// filter.add(b"hello", 0)?;
/// assert!(filter.contains(b"hello"));
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::builder::ScalingBloomFilterBuilder;
    pub use crate::error::{BloomStackError, Result};
    pub use crate::filters::{ScalingBloomFilter, ScalingFilterStats, SubFilter};
    pub use crate::hash::{BloomHasher, Fnv1aHasher, HashStrategy};

    #[cfg(feature = "serde")]
    pub use crate::serde_support::SubFilterSerdeSupport;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use tempfile::tempdir;

    #[test]
    fn test_prelude_imports() {
        let dir = tempdir().unwrap();
        let mut filter =
            ScalingBloomFilter::create(100, 0.01, dir.path().join("prelude.bloom")).unwrap();
        filter.add(b"test", 0).unwrap();
        assert!(filter.contains(b"test"));
    }

    #[test]
    fn test_builder_from_root() {
        let dir = tempdir().unwrap();
        let filter = ScalingBloomFilterBuilder::new()
            .capacity(1000)
            .error_rate(0.01)
            .path(dir.path().join("root.bloom"))
            .build()
            .unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_full_lifecycle() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lifecycle.bloom");

        let mut filter = ScalingBloomFilter::create(100, 0.01, &path).unwrap();
        filter.add(b"persisted", 0).unwrap();
        filter.add(b"deleted", 1).unwrap();
        filter.delete(b"deleted", 1);
        filter.close().unwrap();

        let filter = ScalingBloomFilter::load(100, 0.01, &path).unwrap();
        assert!(filter.check(b"persisted"));
        assert!(!filter.check(b"deleted"));
    }
}
