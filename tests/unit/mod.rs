//! End-to-end tests for the GEX engine.
//!
//! All tests use synthetic fixture chains and a pinned clock; the math is
//! verified against independent hand calculations.

mod engine_tests;
mod snapshot_tests;
