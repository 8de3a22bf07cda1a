//! Response assertion evaluation.
//!
//! This module provides the runner that checks assertions against HTTP responses.

mod runner;

pub use runner::AssertionRunner;
