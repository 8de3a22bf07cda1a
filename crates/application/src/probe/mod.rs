//! The ordered backend scenarios and the runner that drives them.

mod runner;

pub use runner::{DEFAULT_CLIENT_NAME, DEFAULT_ORIGIN, ProbeRunner};
