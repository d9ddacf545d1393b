// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging, the HTTP fetcher and the on-disk store
// 3. Mirror every address given on the command line, or read addresses
//    from stdin one per line until "exit"
// 4. Exit with proper code (0 = success, 1 = invalid address, 2 = error)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod address; // src/address/ - canonical addresses and local paths
mod cli; // src/cli.rs - command-line parsing
mod crawl; // src/crawl/ - the mirroring crawler
mod html; // src/html.rs - href extraction
mod logging; // src/logging.rs - tracing setup
mod net; // src/net/ - fetching pages
mod session; // src/session.rs - state shared by every address of a run
mod store; // src/store.rs - writing pages to disk

#[cfg(test)]
mod testing;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use cli::Cli;
use crawl::{CrawlConfig, CrawlReport, DownloadOutcome};
use net::HttpFetcher;
use session::{with_default_scheme, Command, Session};
use store::FsStore;

type MirrorSession = Session<HttpFetcher, FsStore>;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level)?;

    let fetcher = HttpFetcher::new(Duration::from_secs(cli.timeout))?;
    let store = FsStore::new(cli.mirror_root());
    info!("Mirroring into {}", store.root().display());

    let mut session = Session::new(CrawlConfig::new(cli.max_depth), fetcher, store);

    let exit_code = if cli.addresses.is_empty() {
        run_prompt(&mut session, cli.json).await?
    } else {
        run_addresses(&mut session, &cli.addresses, cli.json).await?
    };

    info!("Session finished, {} address(es) fetched", session.visited_count());
    Ok(exit_code)
}

// Mirrors the addresses given as arguments, in order
async fn run_addresses(session: &mut MirrorSession, addresses: &[String], json: bool) -> Result<i32> {
    let mut exit_code = 0;

    for address in addresses {
        let address = with_default_scheme(address);

        match session.mirror(&address).await {
            Ok(outcome) => {
                if !print_outcome(&outcome, json)? {
                    exit_code = exit_code.max(1);
                }
            }
            Err(e) => {
                eprintln!("Error mirroring {}: {:#}", address, e);
                exit_code = 2;
            }
        }
    }

    Ok(exit_code)
}

// Reads one address per line until "exit" or end of input
//
// A failing address does not end the session: the error is printed and
// the next line is read.
async fn run_prompt(session: &mut MirrorSession, json: bool) -> Result<i32> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Exit => break,
            Command::Blank => continue,
            Command::Mirror(address) => match session.mirror(&address).await {
                Ok(outcome) => {
                    print_outcome(&outcome, json)?;
                }
                Err(e) => eprintln!("Error mirroring {}: {:#}", address, e),
            },
        }
    }

    Ok(0)
}

// Prints the outcome of one address; returns false for an invalid address
fn print_outcome(outcome: &DownloadOutcome, json: bool) -> Result<bool> {
    match outcome {
        DownloadOutcome::InvalidUrl => {
            println!("Invalid URL");
            Ok(false)
        }
        DownloadOutcome::Mirrored(report) => {
            if json {
                println!("{}", serde_json::to_string_pretty(report)?);
            } else {
                print_summary(report);
            }
            Ok(true)
        }
    }
}

fn print_summary(report: &CrawlReport) {
    if report.pages.is_empty() {
        println!("✅ {} is already mirrored", report.seed);
        return;
    }

    println!("📄 Mirrored {} page(s) from {}", report.pages.len(), report.seed);
    for page in &report.pages {
        println!("   {}", page);
    }
    println!(
        "🔗 Links: {} local, {} absolute, {} foreign",
        report.local_links, report.absolute_links, report.foreign_links
    );
}
