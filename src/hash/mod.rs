//! Hash functions and index-generation strategies.
//!
//! The hash engine is split into two layers, composed by every generation of
//! the scaling filter:
//!
//! ```text
//! hash/
//! ├── hasher.rs      - BloomHasher trait and seeded FNV-1a implementation
//! ├── strategies.rs  - Double-hashing index derivation
//! └── mod.rs         - This file (public API)
//! ```
//!
//! # Quick Start
//!
//! ```
//! use bloomstack::hash::{BloomHasher, Fnv1aHasher, HashStrategy};
//!
//! let hasher = Fnv1aHasher::with_seed(7);
//! let (h1, h2) = hasher.hash_bytes_pair(b"ACGTACGTACGTACGTACGT");
//!
//! // Seven slot indices for a 10000-counter array
//! let indices = HashStrategy::Double.generate_indices(h1, h2, 7, 10_000);
//! assert_eq!(indices.len(), 7);
//! ```
//!
//! # Determinism
//!
//! Everything in this module is deterministic across processes: a persisted
//! filter reloaded elsewhere derives the same indices for every key. See the
//! `hasher` module docs for why the standard library's SipHash is unsuitable.

pub mod hasher;
pub mod strategies;

pub use hasher::{BloomHasher, Fnv1aHasher};
pub use strategies::{DoubleHashing, EnhancedDoubleHashing, HashStrategy, IndexStrategy};

/// Type alias for the default hasher used by all filters.
pub type DefaultHasher = Fnv1aHasher;
