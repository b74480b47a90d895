//! Nullable infrastructure for deterministic testing.
//!
//! External dependencies (currently only time) are abstracted behind traits
//! in `stakedao-types`. This crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the system clock
//!
//! Usage: swap `SystemClock` for `NullClock` in tests and replays.

pub mod clock;

pub use clock::NullClock;
