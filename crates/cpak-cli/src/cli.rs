//! CLI argument definitions for cpak.
//!
//! Uses `clap` derive macros to define the full command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "cpak",
    version,
    about = "A Cargo-inspired package manager and build tool for C/C++",
    long_about = "cpak resolves versioned dependencies against a package registry, \
                  locks them in Cpak.lock, and drives the native compiler to produce \
                  binaries, static libraries, and shared libraries."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new cpak project
    New {
        /// Project name
        name: String,
        /// Project template: bin, lib
        #[arg(short, long, default_value = "bin")]
        template: String,
    },

    /// Initialize cpak in an existing directory
    Init {
        /// Project template: bin, lib
        #[arg(short, long, default_value = "bin")]
        template: String,
    },

    /// Build the project
    Build {
        /// Build with optimizations
        #[arg(short, long)]
        release: bool,
    },

    /// Build and run the project
    Run {
        /// Build with optimizations
        #[arg(short, long)]
        release: bool,
        /// Arguments to pass to the program
        #[arg(last = true)]
        args: Vec<String>,
    },

    /// Remove build artifacts
    Clean,

    /// Resolve and download all dependencies
    Fetch,

    /// Re-resolve dependencies and regenerate Cpak.lock
    Lock,

    /// Print the resolved dependency tree
    Tree {
        /// Limit display depth
        #[arg(short, long)]
        depth: Option<usize>,
    },
}

/// Parse the process arguments.
pub fn parse() -> Cli {
    Cli::parse()
}
