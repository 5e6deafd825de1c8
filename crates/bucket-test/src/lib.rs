//! Test support for the bucket container
//!
//! - [`fixtures`]: rstest fixtures and a table of sample types
//! - [`logging`]: one-time tracing initialisation for tests

pub mod fixtures;
pub mod logging;
