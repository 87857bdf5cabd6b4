//! Core data structures and utilities for BloomStack.
//!
//! This module contains the building blocks shared by every generation of the
//! scaling filter:
//!
//! - **Data structures**: [`CounterVec`] (packed 4-bit saturating counters)
//! - **Utilities**: sizing formulas in [`params`]
//!
//! # Module Organization
//!
//! ```text
//! core/
//! ├── countervec.rs - Packed counter vector
//! ├── params.rs     - Parameter calculations
//! └── mod.rs        - This file (public API)
//! ```

pub mod countervec;
pub mod params;

pub use countervec::{CounterVec, COUNTER_MAX};
pub use params::{calculate_filter_params, expected_fp_rate, validate_config};
