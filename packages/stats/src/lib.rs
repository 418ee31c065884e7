#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Numeric subsystem for the explorer: seeded PRNG, deterministic jitter,
//! and LOESS trend smoothing.
//!
//! Everything here is pure computation over in-memory data with no shared
//! mutable state — safe to call any number of times in any order.

pub mod jitter;
pub mod loess;
pub mod rng;

pub use jitter::{apply_jitter, jitter_amount, median_positive_gap};
pub use loess::{DEFAULT_BANDWIDTH, loess};
pub use rng::Mulberry32;
