use std::path::PathBuf;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::example::example_question;
use crate::fetch::PageSource;
use crate::model::{Category, Question};
use crate::output::{self, Snapshots, ALL_QUESTIONS_FILE, EXAMPLE_FILE};
use crate::paginator::{paginate, PaginateOptions, StopReason};
use crate::parser::categories::extract_categories;

/// What a run produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub categories: usize,
    pub questions: usize,
    pub files: Vec<PathBuf>,
    pub used_example: bool,
}

/// Scrape every category listed on the categories page and write one file
/// per category plus the aggregate. Falls back to the built-in example
/// question when nothing could be scraped. A failed category file is logged
/// and skipped; only aggregate and example write errors are returned.
pub async fn run<S: PageSource>(source: &S, config: &Config) -> Result<RunSummary> {
    let snapshots = Snapshots::new(config.snapshot_dir.clone());
    let mut summary = RunSummary::default();

    let categories = fetch_categories(source, &config.categories_url, &snapshots).await;
    summary.categories = categories.len();
    if categories.is_empty() {
        warn!("No categories found, falling back to the built-in example question");
        write_example(config, &mut summary)?;
        return Ok(summary);
    }

    let opts = PaginateOptions::from(config);
    let pb = if config.progress {
        ProgressBar::new(categories.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );

    let mut all: Vec<Question> = Vec::new();
    for category in &categories {
        pb.set_message(category.name.clone());
        info!(
            "Processing category: {} (expected questions: {})",
            category.name, category.count
        );

        let result = paginate(source, &category.url, &opts, &snapshots).await;
        if let StopReason::FetchFailed(e) = &result.stop {
            warn!("Category {} ended early: {}", category.name, e);
        }
        report_anomalies(category, &result.questions);

        if result.questions.is_empty() {
            warn!("No questions found for category: {}", category.name);
        } else {
            let file = output::category_file_name(&category.name);
            match output::write_questions(&config.output_dir, &file, &result.questions) {
                Ok(path) => summary.files.push(path),
                Err(e) => warn!("Skipping file for category {}: {:#}", category.name, e),
            }
            all.extend(result.questions);
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if all.is_empty() {
        warn!("Could not scrape any questions, falling back to the built-in example question");
        write_example(config, &mut summary)?;
    } else {
        summary
            .files
            .push(output::write_questions(&config.output_dir, ALL_QUESTIONS_FILE, &all)?);
        summary.questions = all.len();
        info!("Scraped a total of {} questions", all.len());
    }

    Ok(summary)
}

async fn fetch_categories<S: PageSource>(
    source: &S,
    url: &str,
    snapshots: &Snapshots,
) -> Vec<Category> {
    info!("Fetching categories from {}", url);
    match source.fetch(url).await {
        Ok(html) => {
            snapshots.save("categories", &html);
            extract_categories(&html)
        }
        Err(e) => {
            warn!("Error fetching categories: {}", e);
            Vec::new()
        }
    }
}

fn write_example(config: &Config, summary: &mut RunSummary) -> Result<()> {
    match example_question() {
        Some(q) => {
            let path = output::write_questions(&config.output_dir, EXAMPLE_FILE, &[q])?;
            summary.files.push(path);
            summary.questions = 1;
            summary.used_example = true;
        }
        None => error!("Could not parse the built-in example question"),
    }
    Ok(())
}

fn report_anomalies(category: &Category, questions: &[Question]) {
    let without_answer = questions.iter().filter(|q| q.correct_count() == 0).count();
    if without_answer > 0 {
        warn!(
            "{} questions in {} have no option marked correct",
            without_answer, category.name
        );
    }
    if category.count > 0 && questions.len() != category.count as usize {
        debug!(
            "Category {} lists {} questions, scraped {}",
            category.name,
            category.count,
            questions.len()
        );
    }
}
