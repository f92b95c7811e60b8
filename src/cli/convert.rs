//! The `convert` command.
//!
//! Runs the full conversion pipeline. Without `--output` the generated
//! lockfile is pretty-printed to stdout; with it, the file is written
//! atomically and a one-line confirmation goes to the terminal instead.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::convert::{ConvertOptions, convert};

/// Generate a `package-lock.json` from `yarn.lock` and `node_modules`.
#[derive(Args)]
pub struct ConvertCommand {
    /// Path to the project's package.json
    manifest: PathBuf,

    /// Write the lockfile here instead of printing it to stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Keep the fully nested tree; skip the hoisting pass
    #[arg(long)]
    no_hoist: bool,
}

impl ConvertCommand {
    pub async fn execute(self) -> Result<()> {
        let options = ConvertOptions {
            manifest_path: self.manifest,
            output_path: self.output,
            hoist: !self.no_hoist,
        };

        let lock = convert(&options).await?;

        match &options.output_path {
            Some(path) => {
                println!(
                    "{} {} ({} top-level packages)",
                    "Generated".green().bold(),
                    path.display(),
                    lock.dependencies.len()
                );
            }
            None => println!("{}", lock.to_json()?),
        }

        Ok(())
    }
}
