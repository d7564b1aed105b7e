use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::{error, info};

use drivepoint_scraper::config::Config;
use drivepoint_scraper::fetch::HttpClient;
use drivepoint_scraper::pipeline;

/// Every flag is optional; a bare invocation scrapes the whole site with the
/// built-in settings.
#[derive(Parser)]
#[command(name = "drivepoint_scraper", about = "Scrape drivepoint.gr driving-theory questions to JSON")]
struct Cli {
    /// Directory for the JSON output files
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,
    /// Also save raw HTML of fetched listing pages here
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,
    /// Max pages to follow per category
    #[arg(long)]
    max_pages: Option<usize>,
    /// Pause between page requests, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,
    /// Per-request timeout, in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Page listing the categories
    #[arg(long)]
    categories_url: Option<String>,
    /// Disable the progress bar
    #[arg(long)]
    no_progress: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        let default = Config::default();
        Config {
            categories_url: self.categories_url.unwrap_or(default.categories_url),
            output_dir: self.output_dir,
            snapshot_dir: self.snapshot_dir,
            max_pages: self.max_pages.unwrap_or(default.max_pages),
            page_delay: self.delay_ms.map(Duration::from_millis).unwrap_or(default.page_delay),
            request_timeout: self
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(default.request_timeout),
            progress: !self.no_progress,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let config = Cli::parse().into_config();
    info!("Starting the drivepoint.gr scraper");

    let result = async {
        let client = HttpClient::new(config.request_timeout)?;
        pipeline::run(&client, &config).await
    }
    .await;

    match result {
        Ok(summary) => {
            println!(
                "Done: {} categories, {} questions, {} files written to {}{}",
                summary.categories,
                summary.questions,
                summary.files.len(),
                config.output_dir.display(),
                if summary.used_example { " (example fallback)" } else { "" }
            );
            let elapsed = t0.elapsed();
            if elapsed.as_secs() >= 1 {
                println!("Finished in {}", format_duration(elapsed));
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error scraping questions: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_uses_defaults() {
        let config = Cli::parse_from(["drivepoint_scraper"]).into_config();
        let default = Config::default();
        assert_eq!(config.categories_url, default.categories_url);
        assert_eq!(config.max_pages, 25);
        assert_eq!(config.page_delay, Duration::from_millis(500));
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert!(config.progress);
    }

    #[test]
    fn flags_override() {
        let config = Cli::parse_from([
            "drivepoint_scraper",
            "--max-pages",
            "3",
            "--delay-ms",
            "0",
            "--snapshot-dir",
            "temp",
            "--no-progress",
        ])
        .into_config();
        assert_eq!(config.max_pages, 3);
        assert_eq!(config.page_delay, Duration::ZERO);
        assert_eq!(config.snapshot_dir, Some(PathBuf::from("temp")));
        assert!(!config.progress);
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_duration(Duration::from_secs(3725)), "1h 2m 5s");
    }
}
