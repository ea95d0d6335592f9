//! CLI module for mapwire.
//!
//! Subcommands:
//! - `generate`: Run generation for a crate and write the units to a directory
//! - `scan`: Print the discovered conversion methods as JSON

mod generate;
mod scan;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// mapwire - generated `Map<TIn, TOut>` wrappers and DI registration
#[derive(Parser)]
#[command(name = "mapwire")]
#[command(about = "Discovers mapper declarations and generates Map wrappers and DI registrations")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate units for a crate and write them with their index file
    Generate {
        /// Directory containing the crate's Cargo.toml
        #[arg(long, default_value = ".")]
        manifest_dir: PathBuf,

        /// Output directory (defaults to `target/mapwire` below the manifest dir)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Print discovered conversion methods as JSON
    Scan {
        /// Directory containing the crate's Cargo.toml
        #[arg(long, default_value = ".")]
        manifest_dir: PathBuf,
    },
}

impl App {
    /// Run the CLI application.
    pub fn run(self) -> color_eyre::Result<()> {
        match self.command {
            Command::Generate {
                ref manifest_dir,
                ref out_dir,
            } => self.run_generate(manifest_dir, out_dir.as_deref()),
            Command::Scan { ref manifest_dir } => self.run_scan(manifest_dir),
        }
    }
}
