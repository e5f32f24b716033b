//! Command-line interface (CLI) argument parsing module.
//!
//! This module provides CLI argument parsing using `clap`.
//! It supports three commands: building the region map, probing
//! resolver-steered edges, and listing the configured targets.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default path of the CSV report written by the map command.
pub const DEFAULT_OUTPUT: &str = "edge_region_map.csv";

/// CLI argument parser using clap derive macro.
///
/// # Example
///
/// ```ignore
/// let cli = Cli::parse();
/// match cli.command {
///     Some(Commands::Map { output, .. }) => { /* ... */ }
///     Some(Commands::Edges { .. }) => { /* ... */ }
///     None => { /* defaults to map */ }
/// }
/// ```
#[derive(Parser, Debug)]
#[command(
    name = "edgemap",
    version,
    about = "Map CDN edge ranges and resolver-steered edges to geography",
    long_about = "Maps CDN address blocks and the edge IPs different recursive \
                  resolvers steer a host to, enriches each address with ASN and \
                  coarse geography, flags incident regions, and writes a CSV report",
    infer_subcommands = true
)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (only errors)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the edgemap CLI.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the region map report
    ///
    /// Samples every configured CDN block, resolves the target host
    /// through every configured resolver, enriches each address, and
    /// writes the CSV report. This is the default command.
    #[command(alias = "m")]
    Map {
        /// Custom targets file (JSON format)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Output CSV path
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Lookup credential; the documented placeholder disables
        /// enrichment
        #[arg(long, env = "IPINFO_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },

    /// Probe resolver-steered edges
    ///
    /// Resolves the target host through an extended resolver list and
    /// verifies each returned edge by fetching the manifest endpoints
    /// directly from it.
    #[command(alias = "e")]
    Edges {
        /// Custom targets file (JSON format, host only is used)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Per-fetch timeout in seconds
        #[arg(short, long, default_value = "8")]
        timeout: u64,
    },

    /// List the configured blocks and resolvers
    #[command(alias = "l")]
    List {
        /// Custom targets file (JSON format)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Parse CLI arguments and return the verbose flag alongside.
///
/// # Returns
///
/// Returns a tuple of `(Cli, verbose)` where `verbose` indicates
/// whether verbose logging was enabled.
#[must_use]
pub fn parse_verbose() -> (Cli, bool) {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    (cli, verbose)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults() {
        let cli = Cli::try_parse_from(["edgemap"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_map_defaults() {
        let cli = Cli::try_parse_from(["edgemap", "map"]).unwrap();
        match cli.command {
            Some(Commands::Map { output, file, .. }) => {
                assert_eq!(output, PathBuf::from(DEFAULT_OUTPUT));
                assert!(file.is_none());
            }
            _ => panic!("expected map command"),
        }
    }

    #[test]
    fn test_edges_timeout() {
        let cli = Cli::try_parse_from(["edgemap", "edges", "--timeout", "3"]).unwrap();
        match cli.command {
            Some(Commands::Edges { timeout, .. }) => assert_eq!(timeout, 3),
            _ => panic!("expected edges command"),
        }
    }

    #[test]
    fn test_verbose_quiet_conflict() {
        assert!(Cli::try_parse_from(["edgemap", "-v", "-q"]).is_err());
    }
}
