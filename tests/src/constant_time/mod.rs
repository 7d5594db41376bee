//! Statistical timing checks for secret-dependent operations
//!
//! Two input classes are timed against each other (for example a scalar
//! with a single set bit against a dense random scalar) and compared with
//! Welch's t-test. The checks are heuristics: they catch gross branching on
//! secret data, not cache-level leakage.

pub mod config;
pub mod tester;

pub use config::TestConfig;
pub use tester::{TimingAnalysis, TimingTester};
