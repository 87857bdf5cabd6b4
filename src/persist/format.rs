//! Binary image format for persisted filters.
//!
//! The on-disk image is a single self-describing blob:
//!
//! ```text
//! [File header: 48 bytes]
//!   Magic:            4 bytes  ("SBLF")
//!   Version:          2 bytes  (format version, little-endian)
//!   Hash Strategy:    1 byte   (0=Double, 1=EnhancedDouble)
//!   Reserved:         1 byte
//!   Capacity:         8 bytes  (per-generation capacity)
//!   Error Rate:       8 bytes  (f64 bit pattern)
//!   Generation Count: 4 bytes
//!   Total Items:      8 bytes  (adds across all generations)
//!   Reserved:         12 bytes
//!
//! [Generation region, repeated Generation Count times]
//!   Header: 48 bytes
//!     Size:       8 bytes  (number of counters)
//!     Num Hashes: 4 bytes
//!     Seed:       8 bytes
//!     Count:      8 bytes  (adds into this generation)
//!     Id Start:   8 bytes
//!     Id End:     8 bytes
//!     Sealed:     1 byte
//!     Reserved:   3 bytes
//!   Counters: ⌈Size / 2⌉ bytes (packed 4-bit, little-endian nibble order)
//! ```
//!
//! All multi-byte fields are little-endian and written field-by-field; there
//! are no padding bytes and no alignment requirements, so the format is safe
//! to parse from a memory map on any architecture.
//!
//! Decoding validates everything it reads (magic, version, strategy id,
//! generation count, region bounds) and fails with a [`FormatError`] rather
//! than returning a partial structure.

#![allow(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use crate::error::{BloomStackError, Result};
use crate::filters::SubFilter;
use crate::hash::HashStrategy;

/// Magic bytes identifying a filter image.
pub const MAGIC: &[u8; 4] = b"SBLF";

/// Current image format version.
pub const FORMAT_VERSION: u16 = 1;

/// File header size in bytes.
pub const HEADER_SIZE: usize = 48;

/// Per-generation header size in bytes.
pub const GENERATION_HEADER_SIZE: usize = 48;

/// Upper bound on the generation count field.
///
/// Matches the scaling filter's growth ceiling; anything larger in a header
/// is corruption, not configuration.
const MAX_GENERATIONS: u32 = 64;

/// Image decoding errors.
///
/// Converted into [`BloomStackError::FormatError`] at the crate boundary.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FormatError {
    /// Invalid magic bytes in header
    #[error("invalid magic bytes (expected 'SBLF')")]
    InvalidMagic,

    /// Unsupported format version
    #[error("unsupported format version: {0} (expected {})", FORMAT_VERSION)]
    UnsupportedVersion(u16),

    /// Buffer too small for the region being parsed
    #[error("image truncated: expected at least {expected} bytes, got {actual}")]
    Truncated {
        /// Minimum size the region requires
        expected: usize,
        /// Bytes actually available
        actual: usize,
    },

    /// Generation count outside sane bounds
    #[error("invalid generation count: {0}")]
    InvalidGenerationCount(u32),

    /// Header field disagrees with the configuration the caller expects
    #[error("configuration mismatch: {field} is {actual}, expected {expected}")]
    ConfigMismatch {
        /// Name of the mismatched field
        field: &'static str,
        /// Value the caller expected
        expected: String,
        /// Value found in the header
        actual: String,
    },
}

impl From<FormatError> for BloomStackError {
    fn from(err: FormatError) -> Self {
        BloomStackError::format_error(err.to_string())
    }
}

/// A decoded filter image, ready to become a scaling filter.
#[derive(Debug)]
pub struct DecodedImage {
    /// Per-generation capacity from the header.
    pub capacity: usize,
    /// Error rate from the header.
    pub error_rate: f64,
    /// Hash strategy from the header.
    pub strategy: HashStrategy,
    /// Reconstructed generations, oldest first.
    pub generations: Vec<SubFilter>,
}

/// Serialize a filter's state into an image.
///
/// `generations` must be ordered oldest first, matching the in-memory chain.
#[must_use]
pub fn encode_image(
    capacity: usize,
    error_rate: f64,
    strategy: HashStrategy,
    generations: &[SubFilter],
) -> Vec<u8> {
    let total_items: u64 = generations.iter().map(SubFilter::count).sum();
    let data_size: usize = generations
        .iter()
        .map(|g| GENERATION_HEADER_SIZE + g.counters().as_bytes().len())
        .sum();

    let mut bytes = Vec::with_capacity(HEADER_SIZE + data_size);

    // File header, field by field
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    bytes.push(strategy.id());
    bytes.push(0); // reserved
    bytes.extend_from_slice(&(capacity as u64).to_le_bytes());
    bytes.extend_from_slice(&error_rate.to_bits().to_le_bytes());
    bytes.extend_from_slice(&(generations.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&total_items.to_le_bytes());
    bytes.extend_from_slice(&[0u8; 12]);

    debug_assert_eq!(bytes.len(), HEADER_SIZE);

    for generation in generations {
        let (id_start, id_end) = generation.id_span().unwrap_or((0, 0));

        bytes.extend_from_slice(&(generation.size() as u64).to_le_bytes());
        bytes.extend_from_slice(&(generation.num_hashes() as u32).to_le_bytes());
        bytes.extend_from_slice(&generation.seed().to_le_bytes());
        bytes.extend_from_slice(&generation.count().to_le_bytes());
        bytes.extend_from_slice(&id_start.to_le_bytes());
        bytes.extend_from_slice(&id_end.to_le_bytes());
        bytes.push(u8::from(generation.is_sealed()));
        bytes.extend_from_slice(&[0u8; 3]);

        bytes.extend_from_slice(generation.counters().as_bytes());
    }

    bytes
}

/// Parse an image back into its generations.
///
/// # Errors
///
/// Returns a [`FormatError`]-derived error if the header is absent, the magic
/// or version doesn't match, a region is truncated, or any field fails
/// validation. No partial result is returned.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage> {
    if bytes.len() < HEADER_SIZE {
        return Err(FormatError::Truncated {
            expected: HEADER_SIZE,
            actual: bytes.len(),
        }
        .into());
    }

    if &bytes[0..4] != MAGIC {
        return Err(FormatError::InvalidMagic.into());
    }

    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != FORMAT_VERSION {
        return Err(FormatError::UnsupportedVersion(version).into());
    }

    let strategy = HashStrategy::from_id(bytes[6])?;
    let capacity = read_u64(bytes, 8) as usize;
    let error_rate = f64::from_bits(read_u64(bytes, 16));
    let generation_count = u32::from_le_bytes([bytes[24], bytes[25], bytes[26], bytes[27]]);
    // Total items at offset 28 is informational; per-generation counts are
    // authoritative on load.

    if generation_count == 0 || generation_count > MAX_GENERATIONS {
        return Err(FormatError::InvalidGenerationCount(generation_count).into());
    }

    let mut generations = Vec::with_capacity(generation_count as usize);
    let mut offset = HEADER_SIZE;

    for index in 0..generation_count {
        if bytes.len() < offset + GENERATION_HEADER_SIZE {
            return Err(FormatError::Truncated {
                expected: offset + GENERATION_HEADER_SIZE,
                actual: bytes.len(),
            }
            .into());
        }

        let size = read_u64(bytes, offset) as usize;
        let num_hashes = u32::from_le_bytes([
            bytes[offset + 8],
            bytes[offset + 9],
            bytes[offset + 10],
            bytes[offset + 11],
        ]) as usize;
        let seed = read_u64(bytes, offset + 12);
        let count = read_u64(bytes, offset + 20);
        let id_start = read_u64(bytes, offset + 28);
        let id_end = read_u64(bytes, offset + 36);
        let sealed = bytes[offset + 44] != 0;

        offset += GENERATION_HEADER_SIZE;

        // size / 2 + parity avoids overflow on a corrupt size field
        let counter_bytes = size / 2 + (size & 1);
        if bytes.len().saturating_sub(offset) < counter_bytes {
            return Err(FormatError::Truncated {
                expected: offset.saturating_add(counter_bytes),
                actual: bytes.len(),
            }
            .into());
        }

        let id_span = if count > 0 {
            Some((id_start, id_end))
        } else {
            None
        };

        let generation = SubFilter::from_parts(
            size,
            num_hashes,
            seed,
            strategy,
            capacity,
            count,
            sealed,
            id_span,
            &bytes[offset..offset + counter_bytes],
        )
        .map_err(|e| {
            BloomStackError::format_error(format!("generation {index} invalid: {e}"))
        })?;

        generations.push(generation);
        offset += counter_bytes;
    }

    Ok(DecodedImage {
        capacity,
        error_rate,
        strategy,
        generations,
    })
}

/// Validate that a decoded header matches the configuration the caller opened
/// the file with.
///
/// # Errors
///
/// Returns a `ConfigMismatch`-derived [`BloomStackError::FormatError`] when
/// capacity or error rate disagree.
pub fn validate_expected(
    image: &DecodedImage,
    expected_capacity: usize,
    expected_error_rate: f64,
) -> Result<()> {
    if image.capacity != expected_capacity {
        return Err(FormatError::ConfigMismatch {
            field: "capacity",
            expected: expected_capacity.to_string(),
            actual: image.capacity.to_string(),
        }
        .into());
    }

    if image.error_rate.to_bits() != expected_error_rate.to_bits() {
        return Err(FormatError::ConfigMismatch {
            field: "error_rate",
            expected: expected_error_rate.to_string(),
            actual: image.error_rate.to_string(),
        }
        .into());
    }

    Ok(())
}

#[inline]
fn read_u64(bytes: &[u8], offset: usize) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[offset..offset + 8]);
    u64::from_le_bytes(buf)
}
