//! Library interface for the verdict CLI
//!
//! Exposes the `explain` logic for integration testing while keeping the
//! argument handling in main.rs.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod explain;

pub use anyhow::Result;
pub use explain::{explain, parse_expected, parse_scalar, ExplainReport, ExplainRequest};
