use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::{Config, MAX_PAGES, PAGE_DELAY_MS};
use crate::fetch::{FetchError, PageSource};
use crate::model::Question;
use crate::output::Snapshots;
use crate::parser::{self, pagination::NextPage, urls};

#[derive(Debug, Clone)]
pub struct PaginateOptions {
    pub max_pages: usize,
    /// Pause before each follow-up request.
    pub page_delay: Duration,
}

impl Default for PaginateOptions {
    fn default() -> Self {
        Self {
            max_pages: MAX_PAGES,
            page_delay: Duration::from_millis(PAGE_DELAY_MS),
        }
    }
}

impl From<&Config> for PaginateOptions {
    fn from(config: &Config) -> Self {
        Self {
            max_pages: config.max_pages,
            page_delay: config.page_delay,
        }
    }
}

/// Why a category walk ended.
#[derive(Debug)]
pub enum StopReason {
    Exhausted,
    MalformedLink,
    PageLimit,
    FetchFailed(FetchError),
}

/// Result of walking one category: every question from the pages that were
/// fetched, in page order. Duplicates across pages are kept.
#[derive(Debug)]
pub struct CategoryPages {
    pub questions: Vec<Question>,
    pub pages: usize,
    pub stop: StopReason,
}

/// Follow `rel="next"` links from `start_url` until they run out, a link is
/// unusable, a fetch fails, or `max_pages` pages have been fetched.
pub async fn paginate<S: PageSource>(
    source: &S,
    start_url: &str,
    opts: &PaginateOptions,
    snapshots: &Snapshots,
) -> CategoryPages {
    let mut current_url = start_url.to_string();
    let mut page_index = 1usize;
    let mut pages = 0usize;
    let mut collected: Vec<Question> = Vec::new();

    if opts.max_pages == 0 {
        return CategoryPages { questions: collected, pages, stop: StopReason::PageLimit };
    }

    let stop = loop {
        info!("Fetching page {} from {}", page_index, current_url);
        let html = match source.fetch(&current_url).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Stopping at page {}: {}", page_index, e);
                break StopReason::FetchFailed(e);
            }
        };
        pages += 1;

        if page_index == 1 {
            let name = urls::last_segment(start_url).unwrap_or_else(|| "category".into());
            snapshots.save(&name, &html);
        }

        let page = parser::parse_page(&html, &current_url);
        info!(
            "Retrieved {} questions from page {} ({} so far)",
            page.questions.len(),
            page_index,
            collected.len() + page.questions.len()
        );
        collected.extend(page.questions);

        match page.next {
            NextPage::None => break StopReason::Exhausted,
            NextPage::Malformed => {
                warn!("Unusable next-page link on {}", current_url);
                break StopReason::MalformedLink;
            }
            NextPage::Url(next) => {
                if page_index >= opts.max_pages {
                    warn!("Reached page limit ({}) at {}", opts.max_pages, current_url);
                    break StopReason::PageLimit;
                }
                current_url = next;
                page_index += 1;
                sleep(opts.page_delay).await;
            }
        }
    };

    info!("Total of {} questions over {} pages", collected.len(), pages);
    CategoryPages { questions: collected, pages, stop }
}
