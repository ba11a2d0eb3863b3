//! Foundation types for the Ember developer console.
//!
//! This crate contains the types shared by the console core and its hosts:
//! the error taxonomy and the output line severity.

pub mod error;
pub mod severity;

pub use error::{ConsoleError, Result};
pub use severity::Severity;
