//! Core types for warup
//!
//! The core module provides the error foundation used throughout the crate:
//!
//! - [`WarupError`] - enumerated failure families covering every phase of an
//!   apply run (validation, staging, extraction, parsing, execution, swap)
//! - [`ErrorContext`] - user-friendly wrapper with suggestions and details
//! - [`user_friendly_error`] - conversion used at the CLI boundary
//!
//! Every operation that can fail returns a [`Result`] carrying a typed error;
//! errors are never caught and retried internally. Failures identify the
//! phase that raised them so callers can tell whether the real target was
//! still untouched when the run aborted.

pub mod error;

pub use error::{ErrorContext, Result, WarupError, user_friendly_error};
