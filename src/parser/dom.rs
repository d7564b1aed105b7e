use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use super::{element_text, has_class, non_blank, urls};
use crate::model::{Question, QuestionOption, UNKNOWN};

static BLOCK: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".portlet-body").unwrap());
static TEXT: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".text-wrapper .text").unwrap());
static IMAGE: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".image img").unwrap());
static OPTION: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".option").unwrap());
static LABEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".labels .label").unwrap());

const SIDEBAR_MARKER: &str = "sidebar-list-wrapper";

/// Strategy B: scrape every `.portlet-body` question block on the page.
pub fn extract(document: &Html) -> Vec<Question> {
    let mut questions = Vec::new();
    let mut skipped = 0usize;

    for block in document.select(&BLOCK) {
        if has_class(&block, SIDEBAR_MARKER) {
            continue;
        }
        match parse_question_block(&block.html()) {
            Some(q) => questions.push(q),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("Skipped {} blocks without question text or options", skipped);
    }
    info!("Extracted {} questions from page markup", questions.len());
    questions
}

/// Parse a single question block's markup on its own.
///
/// Returns `None` when the block has no question text or no options.
pub fn parse_question_block(html: &str) -> Option<Question> {
    let fragment = Html::parse_fragment(html);

    let text = fragment
        .select(&TEXT)
        .next()
        .map(|e| element_text(&e))
        .and_then(non_blank)?;

    let image = fragment
        .select(&IMAGE)
        .next()
        .and_then(|img| img.value().attr("src"))
        .and_then(urls::absolute);

    let options: Vec<QuestionOption> = fragment
        .select(&OPTION)
        .map(|o| QuestionOption {
            text: element_text(&o),
            is_correct: has_class(&o, "correct"),
        })
        .collect();
    if options.is_empty() {
        return None;
    }

    let (category, vehicle_type) = labels(&fragment);

    Some(Question {
        id: content_id(&text),
        text,
        image,
        options,
        category,
        vehicle_type,
        explanation: None,
        explanation_image: None,
    })
}

/// `(category, vehicleType)` from the block's label badges.
fn labels(fragment: &Html) -> (String, String) {
    let mut category = None;
    let mut vehicle_type = None;

    for label in fragment.select(&LABEL) {
        let text = element_text(&label);
        if has_class(&label, "label-info") {
            category = Some(text.clone());
        }
        if is_vehicle_label(&label) {
            vehicle_type = Some(text);
        }
    }

    (
        category.unwrap_or_else(|| UNKNOWN.to_string()),
        vehicle_type.unwrap_or_else(|| UNKNOWN.to_string()),
    )
}

fn is_vehicle_label(label: &ElementRef) -> bool {
    let mut classes = label.value().classes();
    has_class(label, "q-label") && classes.any(|c| c.starts_with("label-category-"))
}

/// First 16 hex chars of SHA-256 over the question text.
pub fn content_id(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    digest[..8].iter().map(|b| format!("{:02x}", b)).collect()
}
