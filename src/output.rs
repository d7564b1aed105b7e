use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::{info, warn};

use crate::model::Question;

pub const ALL_QUESTIONS_FILE: &str = "all_questions.json";
pub const EXAMPLE_FILE: &str = "example_question.json";

static UNSAFE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\s/\\:*?"<>|\x00-\x1f\x7f]+"#).unwrap());

/// `"ΟΔΙΚΗ ΑΣΦΑΛΕΙΑ"` -> `"οδικη_ασφαλεια.json"`.
///
/// Path separators and characters Windows rejects become `_`, so a scraped
/// name always maps to a single file inside the output directory.
pub fn category_file_name(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    let stem = UNSAFE_RUN.replace_all(&lower, "_");
    let stem = stem.trim_matches(|c| c == '_' || c == '.');
    if stem.is_empty() {
        "category.json".to_string()
    } else {
        format!("{}.json", stem)
    }
}

/// Write `questions` as a pretty-printed JSON array to `dir/file_name`.
pub fn write_questions(dir: &Path, file_name: &str, questions: &[Question]) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    let path = dir.join(file_name);
    let json = serde_json::to_string_pretty(questions)?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Saved {} questions to {}", questions.len(), path.display());
    Ok(path)
}

/// Optional sink for raw HTML of fetched pages, for debugging selector
/// drift. Disabled unless a directory is configured; write failures are
/// logged and ignored.
#[derive(Debug, Clone, Default)]
pub struct Snapshots {
    dir: Option<PathBuf>,
}

impl Snapshots {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    pub fn disabled() -> Self {
        Self { dir: None }
    }

    pub fn save(&self, name: &str, html: &str) {
        let Some(dir) = &self.dir else {
            return;
        };
        let path = dir.join(format!("{}.html", name));
        let result = fs::create_dir_all(dir).and_then(|_| fs::write(&path, html));
        if let Err(e) = result {
            warn!("Could not write snapshot {}: {}", path.display(), e);
        }
    }
}
