//! Command-line interface for lockforge.
//!
//! Two subcommands cover the tool's surface:
//! - `convert` - generate a `package-lock.json` from a `yarn.lock` and the
//!   installed `node_modules` tree
//! - `tree` - print the resolved tree as flat diagnostic lines
//!
//! Each command is its own module with its own argument struct and an
//! async `execute()`; this module owns the global flags and dispatch.
//! Logging goes to stderr so stdout stays clean for the generated JSON.
//!
//! # Examples
//!
//! ```bash
//! # Print the converted lockfile to stdout
//! lockforge convert package.json
//!
//! # Write it next to the manifest instead
//! lockforge convert package.json -o package-lock.json
//!
//! # Inspect the nested shape before hoisting
//! lockforge tree package.json
//! ```

pub mod convert;
pub mod tree;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Top-level CLI: global verbosity flags plus one subcommand.
#[derive(Parser)]
#[command(
    name = "lockforge",
    about = "Convert yarn.lock and an installed node_modules tree into package-lock.json",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a package-lock.json from yarn.lock and node_modules.
    Convert(convert::ConvertCommand),

    /// Print the resolved dependency tree as flat text lines.
    Tree(tree::TreeCommand),
}

impl Cli {
    /// Initialize logging per the global flags and run the subcommand.
    pub async fn execute(self) -> Result<()> {
        self.init_logging();

        match self.command {
            Commands::Convert(cmd) => cmd.execute().await,
            Commands::Tree(cmd) => cmd.execute().await,
        }
    }

    /// Set up the tracing subscriber: `--verbose` forces debug, `--quiet`
    /// installs nothing, otherwise `RUST_LOG` applies with an info
    /// default. Output goes to stderr; stdout is reserved for results.
    fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let filter = if self.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
}
