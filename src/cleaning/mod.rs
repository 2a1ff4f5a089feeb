//! Dataset cleaning.
//!
//! One shared routine turns raw rows into cleaned order records; every view
//! consumes its output.

pub mod error;
pub mod normalizer;
pub mod sentinels;

pub use error::NormalizeError;
pub use normalizer::{CoercionPolicy, NormalizeStats, Normalizer};
