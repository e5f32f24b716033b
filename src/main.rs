//! edgemap - CDN edge region mapping tool.
//!
//! Binary entry point for the edgemap CLI application.

#![warn(clippy::all, warnings)]
#![warn(clippy::pedantic, clippy::nursery)]

use edgemap::cli::{Commands, DEFAULT_OUTPUT};
use edgemap::config::ConfigLoader;
use edgemap::dns::{DigResolver, Resolver};
use edgemap::edge::{probe_resolvers, EdgeProber, ResolverReport};
use edgemap::error::Result;
use edgemap::geo::GeoClient;
use edgemap::report::{write_csv, ReportBuilder};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Set up logging based on verbosity level.
///
/// # Arguments
///
/// * `verbose` - Enable debug-level logging
/// * `quiet` - Enable error-level only logging
fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"))
    } else if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().without_time())
        .init();
}

/// Build the region map report and write it to the CSV sink.
///
/// # Arguments
///
/// * `file` - Optional targets file overriding the built-in tables
/// * `output` - CSV output path
/// * `token` - Lookup credential; absent or placeholder disables
///   enrichment
async fn run_map(file: Option<PathBuf>, output: PathBuf, token: Option<String>) -> Result<()> {
    let config = ConfigLoader::resolve(file)?;
    let blocks = config.blocks();

    println!(
        "Mapping {} blocks and {} resolvers for {}...\n",
        blocks.len(),
        config.resolvers.len(),
        config.host
    );

    let lookup = GeoClient::new(token)?;
    let resolver = DigResolver::new();
    let rows = ReportBuilder::new(&config, &lookup, &resolver)
        .collect()
        .await;

    write_csv(&rows, &output)?;
    println!("Wrote: {}", output.display());

    for row in &rows {
        println!("{}", row.summary_line());
    }

    Ok(())
}

/// Probe the edges each resolver steers the target host to.
///
/// # Arguments
///
/// * `file` - Optional targets file (only the host is used)
/// * `timeout` - Per-query and per-fetch timeout in seconds
async fn run_edges(file: Option<PathBuf>, timeout: u64) -> Result<()> {
    let config = ConfigLoader::resolve(file)?;
    let timeout = Duration::from_secs(timeout);

    println!(
        "==== Resolver -> edge -> classification @ {} ====",
        chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ")
    );
    println!("Host: {}\n", config.host);

    let resolver = DigResolver::with_timeout(timeout);
    let prober = EdgeProber::with_timeout(&config.host, timeout);

    for spec in probe_resolvers() {
        let ips = resolver.resolve(spec.address.as_deref(), &config.host).await;
        if ips.is_empty() {
            println!("[{:<13}] A: (none)  ->  SKIP", spec.name);
            continue;
        }

        let report = ResolverReport {
            name: spec.name,
            probes: prober.probe_all(&ips).await,
        };

        let edges: Vec<&str> = report.probes.iter().map(|p| p.ip.as_str()).collect();
        println!(
            "[{:<13}] A: {}  ->  {}",
            report.name,
            edges.join(", "),
            report.verdict()
        );
        for probe in &report.probes {
            println!(
                "   - {}: {:<5} | version_len={:<3} | manifest_len={:<7} | etag={}",
                probe.ip,
                probe.health.to_string(),
                display_len(probe.version_len),
                display_len(probe.manifest_len),
                probe.etag
            );
        }
        println!();
    }

    Ok(())
}

/// Render an optional body length for the console report.
fn display_len(len: Option<usize>) -> String {
    len.map_or_else(|| "-".to_string(), |l| l.to_string())
}

/// List the configured blocks and resolvers.
///
/// # Arguments
///
/// * `file` - Optional targets file overriding the built-in tables
fn run_list(file: Option<PathBuf>) -> Result<()> {
    let config = ConfigLoader::resolve(file)?;
    let blocks = config.blocks();

    println!("Host: {}\n", config.host);

    println!("{:<4} {:<18} {:<8} {:<16}", "#", "CIDR", "Status", "Sample");
    println!("{}", "-".repeat(50));
    for (idx, block) in blocks.iter().enumerate() {
        println!(
            "{:<4} {:<18} {:<8} {:<16}",
            idx + 1,
            block.cidr,
            block.status.to_string(),
            block.sample_ip()
        );
    }

    println!();
    println!("{:<4} {:<14} {:<18}", "#", "Resolver", "Address");
    println!("{}", "-".repeat(40));
    for (idx, resolver) in config.resolvers.iter().enumerate() {
        println!(
            "{:<4} {:<14} {:<18}",
            idx + 1,
            resolver.name,
            resolver.address.as_deref().unwrap_or("(system default)")
        );
    }

    Ok(())
}

/// Main entry point for the edgemap CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let (cli, verbose) = edgemap::cli::parse_verbose();
    setup_logging(verbose, cli.quiet);

    tracing::info!("edgemap starting...");

    match cli.command {
        Some(Commands::Map {
            file,
            output,
            token,
        }) => {
            run_map(file, output, token).await?;
        }

        Some(Commands::Edges { file, timeout }) => {
            run_edges(file, timeout).await?;
        }

        Some(Commands::List { file }) => {
            run_list(file)?;
        }

        None => {
            // Default to the map command with its defaults
            run_map(
                None,
                PathBuf::from(DEFAULT_OUTPUT),
                std::env::var("IPINFO_TOKEN").ok(),
            )
            .await?;
        }
    }

    Ok(())
}
