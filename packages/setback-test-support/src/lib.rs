//! Test support shared by the setback crates.
//!
//! Currently this is the logging bootstrap used by unit and integration test
//! binaries.

pub mod logging;
