mod anime;
mod client;
mod document;
mod error_log;
mod fetcher;
mod output_writer;
mod types;
mod utils;

use std::{path::PathBuf, process::ExitCode, time::Duration};

use anime::{
    batch::{Batch, BatchConfig, BatchController},
    scraper::AnimeScraper,
};
use chrono::Local;
use clap::Parser;
use client::{HttpClientWrapper, USER_AGENT};
use error_log::{ErrorSink, FileErrorLog};
use fetcher::PageFetcher;
use log::{debug, error, info};
use output_writer::JsonWriter;

const LIST_URL: &str = "https://oploverz.co.id/anime-list/";

/// Anime catalog scraper
#[derive(Parser)]
#[command(version, about)]
struct MainArgs {
    /// Catalog list page to start from
    #[arg(long, default_value = LIST_URL)]
    list_url: String,
    /// Where the JSON dataset is written, replacing any previous one
    #[arg(short, long, default_value = "src/data/anime.json")]
    output: PathBuf,
    /// Append-only log of recoverable failures
    #[arg(long, default_value = "scrape_errors.log")]
    error_log: PathBuf,
    /// Zero-based shard number
    #[arg(long, env = "BATCH_INDEX", default_value_t = 0)]
    batch_index: usize,
    /// Items per shard, 0 scrapes the whole catalog
    #[arg(long, env = "BATCH_SIZE", default_value_t = 0)]
    batch_size: usize,
    /// Navigation timeout for the list page in milliseconds
    #[arg(long, default_value_t = 60_000)]
    list_timeout_ms: u64,
    /// Navigation timeout for detail and episode pages in milliseconds
    #[arg(long, default_value_t = 30_000)]
    timeout_ms: u64,
    #[arg(long, default_value = USER_AGENT)]
    user_agent: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    debug!("Starting...");
    let args = MainArgs::parse();
    info!(
        "{} | Batch {} | Size {}",
        Local::now().format("%a, %d %b %Y"),
        args.batch_index,
        args.batch_size
    );

    let error_log = FileErrorLog::new(&args.error_log);
    let client = match HttpClientWrapper::build(&args.user_agent) {
        Ok(client) => client,
        Err(e) => {
            error!("An error occurred: {}", e);
            error_log.record(format!("An error occurred: {}", e)).await;
            return ExitCode::FAILURE;
        }
    };

    let scraper = AnimeScraper::new(
        PageFetcher::new(client),
        error_log,
        Duration::from_millis(args.timeout_ms),
    );
    let controller = BatchController::new(
        scraper,
        BatchConfig {
            list_url: args.list_url,
            list_timeout: Duration::from_millis(args.list_timeout_ms),
            batch: Batch::new(args.batch_index, args.batch_size),
            output_path: args.output,
        },
    );

    match controller.run(&JsonWriter {}).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
