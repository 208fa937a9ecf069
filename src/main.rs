//! Wares main entry point
//!
//! This is the command-line interface for the Wares product-URL crawler.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wares::config::{load_config, Config};
use wares::crawler::crawl;
use wares::output::{print_summary, write_report};

/// Wares: a bounded product-URL discovery crawler
///
/// Wares walks the configured sites breadth-first under depth, page, and
/// concurrency budgets, records every URL matching the configured product
/// patterns, and writes the result list to a JSON file.
#[derive(Parser, Debug)]
#[command(name = "wares")]
#[command(version = "0.1.0")]
#[command(about = "A bounded product-URL discovery crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without fetching
    #[arg(long)]
    dry_run: bool,

    /// Write results to this path instead of the configured one
    #[arg(long, value_name = "PATH")]
    results: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config, cli.results).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wares=info,warn"),
            1 => EnvFilter::new("wares=debug,info"),
            2 => EnvFilter::new("wares=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the crawl plan
fn handle_dry_run(config: &Config) {
    println!("=== Wares Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Max pages: {}", config.crawler.max_pages);
    println!(
        "  Max concurrent requests: {}",
        config.crawler.max_concurrent_requests
    );
    println!(
        "  Request timeout: {}ms",
        config.crawler.request_timeout_ms
    );
    println!("  User agent: {}", config.crawler.user_agent);

    println!("\nProduct Patterns ({}):", config.matcher.product_patterns.len());
    for pattern in &config.matcher.product_patterns {
        println!("  - {}", pattern);
    }

    println!("\nOutput:");
    println!("  Results: {}", config.output.results_path);

    println!("\nSites ({}):", config.site.len());
    for entry in &config.site {
        println!("  - {}", entry.domain);
        for seed in entry.seed_urls() {
            println!("    * {}", seed);
        }
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would start crawling with {} seed URLs",
        config.seed_urls().len()
    );
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, results_override: Option<PathBuf>) -> anyhow::Result<()> {
    let results_path =
        results_override.unwrap_or_else(|| PathBuf::from(&config.output.results_path));

    let report = match crawl(config).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    print_summary(&report);

    write_report(&report, &results_path)
        .with_context(|| format!("failed to write {}", results_path.display()))?;
    println!("\n✓ Results written to: {}", results_path.display());

    Ok(())
}
