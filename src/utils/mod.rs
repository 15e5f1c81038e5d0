//! Utility modules
//!
//! This module contains the error type and logging setup shared by the
//! configuration layer and the lookup engine.

pub mod errors;
pub mod logging;

pub use errors::{LookupError, Result};
