//! Conformance testing harness for mingwex-rs.
//!
//! This crate provides:
//! - Fixture loading: printf conversion cases as JSON reference data
//! - Fixture verify: run the formatting engine against expected output
//!   and expected return counts
//! - Diff rendering for failed cases
//! - Report generation: human-readable markdown + machine-readable JSON

#![forbid(unsafe_code)]

pub mod diff;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod verify;

pub use fixtures::{ArgSpec, FixtureCase, FixtureSet};
pub use report::ConformanceReport;
pub use runner::TestRunner;
pub use verify::{Expectation, VerificationResult};
