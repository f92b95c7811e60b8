//! The `tree` command.
//!
//! Builds the resolved tree without writing anything and prints the flat
//! `path @ version` report. The nested (pre-hoist) shape is shown by
//! default since that is what the installed directories physically look
//! like; `--hoist` shows the deduplicated shape instead.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::convert::{ConvertOptions, convert};
use crate::report::render_tree;

/// Print the resolved dependency tree as flat text lines.
#[derive(Args)]
pub struct TreeCommand {
    /// Path to the project's package.json
    manifest: PathBuf,

    /// Show the hoisted (deduplicated) shape instead of the nested tree
    #[arg(long)]
    hoist: bool,
}

impl TreeCommand {
    pub async fn execute(self) -> Result<()> {
        let options = ConvertOptions {
            manifest_path: self.manifest,
            output_path: None,
            hoist: self.hoist,
        };

        let lock = convert(&options).await?;
        print!("{}", render_tree(&lock.dependencies));

        Ok(())
    }
}
