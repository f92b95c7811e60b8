//! Shared filesystem helpers.
//!
//! Everything the conversion pipeline writes goes through [`fs::atomic_write`]
//! so a generated lockfile is never observable in a half-written state, and
//! every directory identity decision goes through [`fs::safe_canonicalize`]
//! so symlinked (workspace-linked) packages compare equal to their targets.

pub mod fs;

pub use fs::{atomic_write, ensure_dir, safe_canonicalize};
