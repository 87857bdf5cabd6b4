//! Serde interop for sub-filters (requires the `serde` feature).
//!
//! The primary persistence path is the crate's own binary image (see
//! [`crate::persist`]); this module exists for callers that want to embed a
//! generation in their own serde-encoded structures or exchange filters
//! across services in JSON or bincode.
//!
//! # Format
//!
//! The serialized representation carries a format version plus the filter's
//! raw parts: size, hash count, seed, strategy, capacity, count, sealed flag,
//! id span, and the packed counter bytes. Counter state is preserved exactly,
//! so deletion behaves identically after a roundtrip.
//!
//! # Examples
//!
//! ```
//! use bloomstack::filters::SubFilter;
//! use bloomstack::hash::HashStrategy;
//!
//! let mut filter = SubFilter::new(1000, 0.01, 7, HashStrategy::Double).unwrap();
//! filter.add(b"hello", 0);
//! filter.add(b"hello", 1); // inserted twice
//!
//! let bytes = bincode::serialize(&filter).unwrap();
//! let mut restored: SubFilter = bincode::deserialize(&bytes).unwrap();
//!
//! assert!(restored.check(b"hello"));
//! restored.delete(b"hello", 0);
//! assert!(restored.check(b"hello"));  // count was 2, still present
//! restored.delete(b"hello", 1);
//! assert!(!restored.check(b"hello"));
//! ```

use crate::error::{BloomStackError, Result};
use crate::filters::SubFilter;
use crate::hash::HashStrategy;
use serde::{Deserialize, Serialize};

/// Serialization format version for sub-filters.
const FORMAT_VERSION: u16 = 1;

/// Serializable raw-parts representation of a sub-filter.
#[derive(Serialize, Deserialize)]
struct SubFilterSerde {
    /// Format version
    version: u16,
    /// Number of counters
    size: usize,
    /// Number of hash functions
    num_hashes: usize,
    /// Per-generation hash seed
    seed: u64,
    /// Hash strategy identifier
    hash_strategy: u8,
    /// Configured capacity
    capacity: usize,
    /// Adds absorbed
    count: u64,
    /// Sealed flag
    sealed: bool,
    /// Insert id span, if any
    id_span: Option<(u64, u64)>,
    /// Packed 4-bit counter data, two counters per byte
    counters: Vec<u8>,
}

impl SubFilterSerde {
    fn from_filter(filter: &SubFilter) -> Self {
        Self {
            version: FORMAT_VERSION,
            size: filter.size(),
            num_hashes: filter.num_hashes(),
            seed: filter.seed(),
            hash_strategy: filter.strategy().id(),
            capacity: filter.capacity(),
            count: filter.count(),
            sealed: filter.is_sealed(),
            id_span: filter.id_span(),
            counters: filter.counters().as_bytes().to_vec(),
        }
    }

    fn into_filter(self) -> Result<SubFilter> {
        if self.version != FORMAT_VERSION {
            return Err(BloomStackError::format_error(format!(
                "incompatible serialization version: expected {}, got {}",
                FORMAT_VERSION, self.version
            )));
        }

        let strategy = HashStrategy::from_id(self.hash_strategy)?;

        SubFilter::from_parts(
            self.size,
            self.num_hashes,
            self.seed,
            strategy,
            self.capacity,
            self.count,
            self.sealed,
            self.id_span,
            &self.counters,
        )
    }
}

impl Serialize for SubFilter {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        SubFilterSerde::from_filter(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SubFilter {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = SubFilterSerde::deserialize(deserializer)?;
        raw.into_filter().map_err(serde::de::Error::custom)
    }
}

/// Helper type for sub-filter serde support.
pub struct SubFilterSerdeSupport;

impl SubFilterSerdeSupport {
    /// Serialize to bytes using bincode.
    ///
    /// # Errors
    ///
    /// Returns [`BloomStackError::FormatError`] if encoding fails.
    pub fn to_bytes(filter: &SubFilter) -> Result<Vec<u8>> {
        bincode::serialize(filter).map_err(|e| BloomStackError::format_error(e.to_string()))
    }

    /// Deserialize from bincode bytes.
    ///
    /// # Errors
    ///
    /// Returns [`BloomStackError::FormatError`] if the payload is invalid.
    pub fn from_bytes(bytes: &[u8]) -> Result<SubFilter> {
        bincode::deserialize(bytes).map_err(|e| BloomStackError::format_error(e.to_string()))
    }

    /// Serialize to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`BloomStackError::FormatError`] if encoding fails.
    pub fn to_json(filter: &SubFilter) -> Result<String> {
        serde_json::to_string(filter).map_err(|e| BloomStackError::format_error(e.to_string()))
    }

    /// Deserialize from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`BloomStackError::FormatError`] if the payload is invalid.
    pub fn from_json(json: &str) -> Result<SubFilter> {
        serde_json::from_str(json).map_err(|e| BloomStackError::format_error(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SubFilter {
        let mut filter = SubFilter::new(1000, 0.01, 3, HashStrategy::Double).unwrap();
        filter.add(b"hello", 0);
        filter.add(b"hello", 1);
        filter.add(b"world", 2);
        filter
    }

    #[test]
    fn test_bincode_roundtrip() {
        let filter = sample();
        let bytes = bincode::serialize(&filter).unwrap();
        let restored: SubFilter = bincode::deserialize(&bytes).unwrap();

        assert!(restored.check(b"hello"));
        assert!(restored.check(b"world"));
        assert!(!restored.check(b"absent"));
        assert_eq!(restored.count(), 3);
        assert_eq!(restored.seed(), 3);
        assert_eq!(restored.id_span(), Some((0, 2)));
    }

    #[test]
    fn test_json_roundtrip() {
        let filter = sample();
        let json = serde_json::to_string(&filter).unwrap();
        let restored: SubFilter = serde_json::from_str(&json).unwrap();

        assert!(restored.check(b"hello"));
        assert!(restored.check(b"world"));
    }

    #[test]
    fn test_counter_state_preserved() {
        let filter = sample();
        let bytes = bincode::serialize(&filter).unwrap();
        let mut restored: SubFilter = bincode::deserialize(&bytes).unwrap();

        // "hello" was inserted twice; one delete leaves it present
        restored.delete(b"hello", 0);
        assert!(restored.check(b"hello"));
        restored.delete(b"hello", 1);
        assert!(!restored.check(b"hello"));
    }

    #[test]
    fn test_helper_methods() {
        let filter = sample();

        let bytes = SubFilterSerdeSupport::to_bytes(&filter).unwrap();
        let restored = SubFilterSerdeSupport::from_bytes(&bytes).unwrap();
        assert!(restored.check(b"hello"));

        let json = SubFilterSerdeSupport::to_json(&filter).unwrap();
        let restored = SubFilterSerdeSupport::from_json(&json).unwrap();
        assert!(restored.check(b"world"));
    }

    #[test]
    fn test_version_mismatch() {
        let raw = SubFilterSerde {
            version: 99,
            size: 100,
            num_hashes: 7,
            seed: 0,
            hash_strategy: 0,
            capacity: 100,
            count: 0,
            sealed: false,
            id_span: None,
            counters: vec![0; 50],
        };
        assert!(raw.into_filter().is_err());
    }

    #[test]
    fn test_invalid_strategy_id() {
        let raw = SubFilterSerde {
            version: FORMAT_VERSION,
            size: 100,
            num_hashes: 7,
            seed: 0,
            hash_strategy: 42,
            capacity: 100,
            count: 0,
            sealed: false,
            id_span: None,
            counters: vec![0; 50],
        };
        assert!(raw.into_filter().is_err());
    }

    #[test]
    fn test_truncated_counters() {
        let raw = SubFilterSerde {
            version: FORMAT_VERSION,
            size: 1000,
            num_hashes: 7,
            seed: 0,
            hash_strategy: 0,
            capacity: 1000,
            count: 0,
            sealed: false,
            id_span: None,
            counters: vec![0; 10], // needs 500
        };
        assert!(raw.into_filter().is_err());
    }

    #[test]
    fn test_empty_filter_roundtrip() {
        let filter = SubFilter::new(100, 0.01, 0, HashStrategy::Double).unwrap();
        let bytes = bincode::serialize(&filter).unwrap();
        let restored: SubFilter = bincode::deserialize(&bytes).unwrap();

        assert_eq!(restored.count(), 0);
        assert_eq!(restored.id_span(), None);
        assert!(!restored.is_sealed());
    }
}
