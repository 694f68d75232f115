#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the daily jail report pipeline.
//!
//! `run` drives the whole thing: fetch the county's booked-in PDF, parse
//! it into records, compute the day's statistics, render the HTML report
//! and text snapshot, and publish the broadcast. The other subcommands
//! expose the individual stages for debugging against local files.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use jail_report_booking_models::BookedInReport;
use jail_report_broadcast::BroadcastConfig;
use jail_report_fetch::{FetchError, booked_in_url, download, extract, read_pdf_file};

/// Default report base URL (Tarrant County CJ reports, final PDFs).
const DEFAULT_BASE_URL: &str = "https://cjreports.tarrantcounty.com/Reports/JailedInmates/FinalPDF";

/// Cities listed in the HTML report before the remainder bucket.
const REPORT_TOP_CITIES: usize = 9;

/// Cities listed in the text snapshot before the remainder bucket.
const SNAPSHOT_TOP_CITIES: usize = 12;

#[derive(Parser)]
#[command(name = "jail_report_cli", about = "Tarrant County daily jail report pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: fetch, parse, analyze, render, publish
    Run {
        /// Directory the rendered report and snapshot are written to
        #[arg(long, default_value = "output")]
        out_dir: PathBuf,
        /// Render everything but never publish the broadcast
        #[arg(long)]
        skip_broadcast: bool,
    },
    /// Download the configured day's report PDF to a file
    Fetch {
        /// Destination file
        #[arg(long, default_value = "booked-in.pdf")]
        out: PathBuf,
    },
    /// Parse a local report PDF and print the records as JSON
    Parse {
        /// Report PDF to parse
        file: PathBuf,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Parse a local report PDF and print the text snapshot
    Snapshot {
        /// Report PDF to parse
        file: PathBuf,
    },
}

/// Environment-driven configuration, all optional.
struct Config {
    base_url: String,
    day: String,
    api_key: Option<String>,
    api_secret: Option<String>,
}

impl Config {
    fn from_env() -> Self {
        Self {
            base_url: env_or("BOOKED_BASE_URL", DEFAULT_BASE_URL),
            day: env_or("BOOKED_DAY", "01"),
            api_key: env_non_empty("KIT_API_KEY"),
            api_secret: env_non_empty("KIT_API_SECRET"),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_owned(),
        _ => default.to_owned(),
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn build_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent("jail-report/1.0")
        .timeout(std::time::Duration::from_secs(60))
        .build()
}

fn parse_file(path: &Path) -> Result<BookedInReport, FetchError> {
    let bytes = read_pdf_file(path)?;
    let pages = extract::extract_pages(&bytes)?;
    Ok(jail_report_parser::parse_pages(&pages))
}

async fn run_pipeline(
    config: &Config,
    out_dir: &Path,
    skip_broadcast: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let client = build_client()?;

    let url = booked_in_url(&config.base_url, &config.day);
    log::info!("fetching booked-in report from {url}");
    let pages = jail_report_fetch::fetch_report_pages(&client, &url).await?;

    let report = jail_report_parser::parse_pages(&pages);
    let stats = jail_report_stats::analyze(&report.records, REPORT_TOP_CITIES);
    let snapshot_stats = jail_report_stats::analyze(&report.records, SNAPSHOT_TOP_CITIES);

    let page = jail_report_render::render_html(&report, &stats);
    let snapshot = jail_report_render::render_snapshot(report.report_date, &snapshot_stats);

    std::fs::create_dir_all(out_dir)?;
    let html_path = out_dir.join("daily_jail_report.html");
    std::fs::write(&html_path, &page)?;
    log::info!("wrote {}", html_path.display());
    let snapshot_path = out_dir.join("daily_jail_snapshot.txt");
    std::fs::write(&snapshot_path, &snapshot)?;
    log::info!("wrote {}", snapshot_path.display());

    if skip_broadcast {
        log::info!("skipping broadcast (--skip-broadcast)");
    } else if let Some(api_key) = &config.api_key {
        let mut broadcast_config = BroadcastConfig::new(api_key);
        if let Some(secret) = &config.api_secret {
            broadcast_config = broadcast_config.with_api_secret(secret);
        }
        let subject = jail_report_render::report_subject(report.report_date);
        // The report files are already on disk; a failed publish should
        // not fail the whole run.
        if let Err(e) =
            jail_report_broadcast::publish(&client, &broadcast_config, &subject, &page).await
        {
            log::error!("failed to publish broadcast: {e}");
        }
    } else {
        log::warn!("KIT_API_KEY not set, skipping broadcast");
    }

    log::info!("pipeline complete in {:.1}s", start.elapsed().as_secs_f64());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        Commands::Run {
            out_dir,
            skip_broadcast,
        } => run_pipeline(&config, &out_dir, skip_broadcast).await?,
        Commands::Fetch { out } => {
            let client = build_client()?;
            let url = booked_in_url(&config.base_url, &config.day);
            log::info!("fetching {url}");
            let bytes = download::download_pdf(&client, &url).await?;
            std::fs::write(&out, &bytes)?;
            log::info!("wrote {} bytes to {}", bytes.len(), out.display());
        }
        Commands::Parse { file, pretty } => {
            let report = parse_file(&file)?;
            let json = if pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            println!("{json}");
        }
        Commands::Snapshot { file } => {
            let report = parse_file(&file)?;
            let stats = jail_report_stats::analyze(&report.records, SNAPSHOT_TOP_CITIES);
            println!(
                "{}",
                jail_report_render::render_snapshot(report.report_date, &stats)
            );
        }
    }

    Ok(())
}
