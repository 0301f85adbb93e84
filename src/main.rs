mod error;
mod extract;
mod fetch;
mod frequency;
mod models;
mod normalize;
mod pipeline;
mod render;
mod select;
mod stopwords;

use anyhow::Result;
use clap::Parser;
use pipeline::{run, RunConfig};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

const DEFAULT_FREQUENCIES: &str = "data/count_1w.txt";
const DEFAULT_OUTPUT: &str = "data/example_output.pdf";

/// Sermon Bingo - turn a sermon transcript into a printable bingo card
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Page holding the sermon transcript (http or https)
    #[arg(value_parser = parse_http_url)]
    url: Url,

    /// How many of the most common words become blank squares (0 disables)
    #[arg(long, default_value_t = 3)]
    empty_boxes: usize,

    /// Word frequency table, "word count" per line (overrides SERMON_BINGO_FREQUENCIES)
    #[arg(long)]
    frequencies: Option<PathBuf>,

    /// Output PDF path (overrides SERMON_BINGO_OUTPUT; default: "data/example_output.pdf")
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the card as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Seed for the word shuffle, for a reproducible card
    #[arg(long)]
    seed: Option<u64>,

    /// HTTP timeout in seconds (at least 1)
    #[arg(
        long,
        default_value_t = fetch::DEFAULT_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,

    /// Print the card grid to stdout as well
    #[arg(long)]
    print: bool,
}

fn parse_http_url(s: &str) -> std::result::Result<Url, String> {
    let url = Url::parse(s).map_err(|e| format!("invalid URL {s:?}: {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported scheme {other:?}, expected http or https")),
    }
}

/// Side-file and output locations: CLI flag, then environment, then default.
fn resolve_paths(args: &Args) -> (PathBuf, PathBuf) {
    let frequencies = args.frequencies.clone().unwrap_or_else(|| {
        std::env::var("SERMON_BINGO_FREQUENCIES")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_FREQUENCIES))
    });
    let output = args.output.clone().unwrap_or_else(|| {
        std::env::var("SERMON_BINGO_OUTPUT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT))
    });
    (frequencies, output)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!("Starting sermon_bingo");

    let (frequencies_path, output_path) = resolve_paths(&args);
    debug!(
        "Resolved paths - frequencies={}, output={}",
        frequencies_path.display(),
        output_path.display()
    );

    let cfg = RunConfig {
        url: args.url.to_string(),
        empty_boxes: args.empty_boxes,
        frequencies_path,
        output_path,
        json_path: args.json,
        seed: args.seed,
        timeout: Duration::from_secs(args.timeout),
        print: args.print,
    };

    run(&cfg)
}
