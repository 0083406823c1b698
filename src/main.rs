// src/main.rs
mod directory;
mod extractors;
mod storage;
mod utils;

use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use std::time::Duration;
use utils::AppError;
use directory::client::{HttpDirectory, HttpSettings, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use directory::snapshot::SnapshotDirectory;
use directory::{PageContentProvider, PageNavigator};
use extractors::pagination::DEFAULT_SETTLE_DELAY_MS;
use extractors::{select_sample, summary_line, CrawlOutcome, PaginationDriver, PaginationSettings, RecordExtractor, DEFAULT_KEYWORDS};
use storage::{FileSink, OutputSink, RunContext, StdoutSink};

/// Extracts contacts from a paginated directory and prints a JSON sample:
/// every targeted contact plus the first three others.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("source").required(true).args(["url", "pages", "pages_dir"])))]
struct Args {
    /// URL of the first directory page
    #[arg(short, long)]
    url: Option<String>,

    /// Saved HTML pages, scanned in the given order
    #[arg(short, long, num_args = 1..)]
    pages: Vec<PathBuf>,

    /// Directory of saved HTML pages, scanned in file name order
    #[arg(long)]
    pages_dir: Option<PathBuf>,

    /// Pause after each page change, in milliseconds
    #[arg(long, default_value_t = DEFAULT_SETTLE_DELAY_MS)]
    delay_ms: u64,

    /// Stop after this many pages (default: follow pagination to the end)
    #[arg(long)]
    max_pages: Option<usize>,

    /// Extra job-title keyword marking a contact as targeted (repeatable)
    #[arg(short, long = "keyword")]
    keywords: Vec<String>,

    /// Write contacts.json and contacts_meta.json here instead of stdout
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// User-Agent sent with directory requests
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Extra request header as "Name: value" (repeatable)
    #[arg(long = "header")]
    headers: Vec<String>,

    /// Cookie header sent with every request, e.g. "PHPSESSID=..."
    #[arg(long)]
    cookie: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Debug mode - save annotated HTML of every scanned page
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting extraction with args: {:?}", args);

    if args.max_pages == Some(0) {
        return Err(AppError::Config("--max-pages must be at least 1".to_string()));
    }

    // 3. Build the extractor and the pagination driver
    let keywords = DEFAULT_KEYWORDS
        .iter()
        .map(|k| k.to_string())
        .chain(args.keywords.iter().cloned());
    let extractor = RecordExtractor::new(keywords);
    tracing::info!("Targeted keywords: {:?}", extractor.keywords());

    let debug_dir = args.debug.then(|| {
        args.output_dir.clone().unwrap_or_else(|| PathBuf::from("./output")).join("debug")
    });
    let settings = PaginationSettings {
        settle_delay: Duration::from_millis(args.delay_ms),
        max_pages: args.max_pages,
        debug_dir,
    };
    let driver = PaginationDriver::new(extractor, settings);

    // 4. Open the directory and walk its pages
    let (source_label, outcome) = if let Some(url) = &args.url {
        let http = HttpSettings {
            user_agent: args.user_agent.clone(),
            timeout: Duration::from_secs(args.timeout_secs),
            headers: args.headers.clone(),
            cookie: args.cookie.clone(),
        };
        let mut directory = HttpDirectory::open(url, &http).await?;
        tracing::info!("Opened directory at {}", directory.current_url());
        (url.clone(), crawl(&driver, &mut directory).await)
    } else if let Some(dir) = &args.pages_dir {
        let mut directory = SnapshotDirectory::from_dir(dir)?;
        (dir.display().to_string(), crawl(&driver, &mut directory).await)
    } else {
        let mut directory = SnapshotDirectory::from_files(args.pages.clone())?;
        (format!("{} snapshot file(s)", args.pages.len()), crawl(&driver, &mut directory).await)
    };

    // 5. Select the sample and hand it to the sink
    let context = RunContext {
        source: source_label,
        pages_scanned: outcome.pages_scanned,
        total_unique: outcome.records.len(),
    };
    let sample = select_sample(outcome.records);
    let summary = summary_line(&sample);
    tracing::info!("{}", summary);

    match &args.output_dir {
        Some(dir) => {
            let mut sink = FileSink::new(dir, context)?;
            sink.emit(&sample, &summary)?;
            for path in sink.written() {
                tracing::info!("Wrote {}", path.display());
            }
        }
        None => StdoutSink.emit(&sample, &summary)?,
    }

    Ok(())
}

async fn crawl<S>(driver: &PaginationDriver, directory: &mut S) -> CrawlOutcome
where
    S: PageContentProvider + PageNavigator + Send + Sync,
{
    let outcome = driver.run(directory).await;
    tracing::info!(
        "Collected {} unique contacts from {} page(s)",
        outcome.records.len(),
        outcome.pages_scanned
    );
    outcome
}
