//! Integration test support for dpair
//!
//! Known-answer vectors shared by the integration tests and a statistical
//! timing harness for the constant-time code paths.

pub mod constant_time;
pub mod vectors;
