//! Crash-safe persistence for scaling filters.
//!
//! ```text
//! persist/
//! ├── format.rs - Binary image layout (encode/decode/validate)
//! └── mod.rs    - Atomic file replacement and memory-mapped load
//! ```
//!
//! # Atomicity
//!
//! A flush never modifies the live file in place. The image is written to a
//! temporary file in the destination directory, fsynced, and renamed over the
//! target; the directory is then fsynced so the rename itself is durable. A
//! crash at any point leaves either the complete old image or the complete
//! new image, never a torn one.
//!
//! # Loading
//!
//! `read_image` memory-maps the file and parses the image directly out of the
//! map. The format has no alignment requirements, so this is safe on every
//! architecture; counters are copied into owned memory during decoding and
//! the map is dropped before the call returns.

#![allow(clippy::pedantic)]

pub mod format;

pub use format::{DecodedImage, FormatError, FORMAT_VERSION, MAGIC};

use crate::error::{BloomStackError, Result};
use memmap2::Mmap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Atomically replace `path` with `bytes`.
///
/// # Errors
///
/// Returns [`BloomStackError::Io`] if any step of the write fails. The
/// destination file is untouched on failure.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());

    let mut tmp = match dir {
        Some(dir) => tempfile::Builder::new()
            .prefix(".bloomstack-")
            .tempfile_in(dir)?,
        None => tempfile::Builder::new().prefix(".bloomstack-").tempfile()?,
    };

    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    tmp.persist(path)
        .map_err(|e| BloomStackError::io_error(e.to_string()))?;

    // Make the rename itself durable
    #[cfg(unix)]
    if let Some(dir) = dir {
        File::open(dir)?.sync_all()?;
    }

    Ok(())
}

/// Memory-map and decode a filter image.
///
/// # Errors
///
/// - [`BloomStackError::Io`] if the file cannot be opened or mapped
/// - [`BloomStackError::FormatError`] if the image fails validation
pub fn read_image(path: &Path) -> Result<DecodedImage> {
    let file = File::open(path)?;

    // An empty file cannot be mapped on all platforms; report it as the
    // truncated image it is rather than as a mapping failure.
    if file.metadata()?.len() == 0 {
        return Err(BloomStackError::format_error("image is empty"));
    }

    // SAFETY: the single-writer model means no other process mutates the file
    // while it is mapped, and the map is dropped before this function returns.
    let mmap = unsafe { Mmap::map(&file)? };

    format::decode_image(&mmap)
}
