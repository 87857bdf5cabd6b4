//! Filter implementations.
//!
//! # Available Types
//!
//! - [`SubFilter`] - One fixed-capacity counting Bloom filter generation
//! - [`ScalingBloomFilter`] - The chained, persisted structure client code uses
//!
//! Client code almost always wants [`ScalingBloomFilter`]; [`SubFilter`] is
//! exposed for callers that need a single fixed-capacity counting filter
//! without growth or persistence.
//!
//! # Examples
//!
//! ```no_run
//! use bloomstack::ScalingBloomFilter;
//!
//! # fn main() -> bloomstack::Result<()> {
//! let mut filter = ScalingBloomFilter::create(10_000, 0.01, "items.bloom")?;
//!
//! filter.add(b"temporary", 0)?;
//! assert!(filter.contains(b"temporary"));
//!
//! filter.delete(b"temporary", 0);
//! assert!(!filter.contains(b"temporary"));
//! # Ok(())
//! # }
//! ```

pub mod scaling;
pub mod subfilter;

pub use scaling::{ScalingBloomFilter, ScalingFilterStats, MAX_GENERATIONS};
pub use subfilter::SubFilter;
