//! lockforge - convert yarn lockfiles to npm package-lock.json
//!
//! lockforge translates an already-resolved `yarn.lock` plus an installed
//! `node_modules` tree into npm's v1 `package-lock.json` format. It never
//! resolves versions, touches the network, or modifies the installed
//! tree: all resolution already happened, and the two inputs are
//! cross-checked against each other while the nested lockfile tree is
//! assembled.
//!
//! # How a conversion works
//!
//! 1. `yarn.lock` is located by walking upward from the manifest's
//!    directory and parsed into an index keyed by `name@range`
//! 2. each declared dependency is located in `node_modules` with
//!    Node-style upward resolution and its own manifest is loaded
//! 3. the installed manifest must name the requested package (a mismatch
//!    means a corrupted install and aborts the run)
//! 4. version, tarball URL, and integrity come verbatim from the yarn
//!    index; packages absent from it are workspace-linked and fall back
//!    to their own manifest's version
//! 5. the fully nested tree is optionally hoisted flat and serialized as
//!    deterministic, pretty-printed JSON
//!
//! # Core Modules
//!
//! - [`cli`] - command-line surface (`convert`, `tree`)
//! - [`convert`] - the pipeline wiring the stages below together
//! - [`core`] - error taxonomy and user-facing error display
//! - [`hoist`] - in-place deduplication of the built tree
//! - [`locate`] - upward-walking package and file discovery
//! - [`lockfile`] - the generated `package-lock.json` model
//! - [`manifest`] - the `package.json` model
//! - [`report`] - flat diagnostic rendering of a lock tree
//! - [`resolver`] - the tree builder at the heart of the conversion
//! - [`utils`] - atomic writes and path canonicalization
//! - [`yarn`] - the `yarn.lock` v1 parser
//!
//! # Example
//!
//! ```rust,no_run
//! use lockforge::convert::{ConvertOptions, convert};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut options = ConvertOptions::new("package.json");
//! options.output_path = Some("package-lock.json".into());
//! convert(&options).await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod convert;
pub mod core;
pub mod hoist;
pub mod locate;
pub mod lockfile;
pub mod manifest;
pub mod report;
pub mod resolver;
pub mod utils;
pub mod yarn;
