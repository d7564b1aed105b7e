use std::path::PathBuf;
use std::time::Duration;

pub const BASE_URL: &str = "https://www.drivepoint.gr";
pub const CATEGORIES_PATH: &str = "/erotiseis/enotita/simansi?showAll=1";
pub const MAX_PAGES: usize = 25;
pub const PAGE_DELAY_MS: u64 = 500;
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const USER_AGENT: &str = "drivepoint-scraper/0.1";

/// Run configuration. `Default` holds the fixed site values; the CLI only
/// overrides individual fields.
#[derive(Debug, Clone)]
pub struct Config {
    pub categories_url: String,
    pub output_dir: PathBuf,
    pub snapshot_dir: Option<PathBuf>,
    pub max_pages: usize,
    pub page_delay: Duration,
    pub request_timeout: Duration,
    pub progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            categories_url: format!("{}{}", BASE_URL, CATEGORIES_PATH),
            output_dir: PathBuf::from("output"),
            snapshot_dir: None,
            max_pages: MAX_PAGES,
            page_delay: Duration::from_millis(PAGE_DELAY_MS),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            progress: true,
        }
    }
}
