use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use driver::{GraphConfig, PipelineConfig, PipelineDriver, PipelineReport, RemoteConfig};

/// BookRecs - Book catalog loader and recommender
#[derive(Parser, Debug)]
#[command(name = "book-recs")]
#[command(
    about = "Load a book catalog into Neo4j and recommend similar books",
    long_about = None
)]
struct Cli {
    /// Path to the delimited catalog file (header row, then id,title,author,...)
    #[arg(short, long, env = "BOOK_RECS_CATALOG", default_value = "books.csv")]
    catalog: PathBuf,

    /// Book title to get recommendations for (exact match)
    #[arg(short, long, env = "BOOK_RECS_TITLE", default_value = "Harry Potter")]
    title: String,

    /// Field delimiter: a single character, or "tab"
    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,

    /// Neo4j Bolt address
    #[arg(long, env = "NEO4J_URI", default_value = "127.0.0.1:7687")]
    neo4j_uri: String,

    /// Neo4j user
    #[arg(long, env = "NEO4J_USER", default_value = "neo4j")]
    neo4j_user: String,

    /// Neo4j password
    #[arg(long, env = "NEO4J_PASSWORD", hide_env_values = true)]
    neo4j_password: String,

    /// URL of the remote recommendation endpoint
    #[arg(long, env = "BOOK_RECS_RECOMMEND_URL")]
    recommend_url: Option<String>,

    /// Timeout for the remote recommendation call, in seconds
    #[arg(long, default_value = "30")]
    recommend_timeout_secs: u64,
}

impl Cli {
    fn into_config(self) -> PipelineConfig {
        PipelineConfig {
            catalog_path: self.catalog,
            delimiter: self.delimiter,
            title: self.title,
            graph: GraphConfig {
                uri: self.neo4j_uri,
                user: self.neo4j_user,
                password: self.neo4j_password,
            },
            remote: RemoteConfig {
                endpoint: self.recommend_url,
                timeout: Duration::from_secs(self.recommend_timeout_secs),
            },
        }
    }
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => match s.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(format!("delimiter must be a single ASCII character, got {:?}", s)),
        },
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_config();
    let driver = PipelineDriver::from_config(&config)?;

    println!(
        "Loading catalog from {}...",
        config.catalog_path.display()
    );
    let start = Instant::now();

    // Catalog and store failures end the run with a non-zero exit status.
    // Strategy failures are part of the report.
    let report = driver
        .run(&config.catalog_path, &config.title)
        .await
        .context("Pipeline failed")?;

    println!("{} Finished in {:?}", "✓".green(), start.elapsed());
    print_report(&report).context("Failed to write recommendations")?;

    Ok(())
}

/// Print the report under a header, plus a one-line summary
fn print_report(report: &PipelineReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "{}", "Recommended Books:".bold().blue())?;
    report.write_to(&mut out)?;

    let answered = report.outcomes.iter().filter(|o| o.is_ok()).count();
    let summary = format!("{} of {} strategies answered", answered, report.outcomes.len());
    if answered == report.outcomes.len() {
        writeln!(out, "{} {}", "✓".green(), summary)
    } else {
        writeln!(out, "{} {}", "!".yellow(), summary)
    }
}
