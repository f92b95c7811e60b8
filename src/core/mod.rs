//! Core types shared across the conversion pipeline.
//!
//! The error system follows a two-layer design:
//! - **Strongly-typed errors** ([`LockforgeError`]) for precise handling in code
//! - **User-friendly contexts** ([`ErrorContext`]) with actionable suggestions
//!   for CLI display, produced from any [`anyhow::Error`] by
//!   [`user_friendly_error`]
//!
//! Everything here is fatal by design: a conversion either completes in full
//! or fails with no partial output, so there is no retry or recovery layer.

pub mod error;

pub use error::{ErrorContext, LockforgeError, user_friendly_error};
