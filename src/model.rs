use serde::{Deserialize, Serialize};

pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    pub text: String,
    pub is_correct: bool,
}

/// One quiz question as written to the output files.
///
/// `id` is either the site's own identifier (structured payload) or a
/// 16-hex-char digest of the question text (DOM scraping). The two id spaces
/// are not comparable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    pub image: Option<String>,
    pub options: Vec<QuestionOption>,
    pub category: String,
    pub vehicle_type: String,
    pub explanation: Option<String>,
    pub explanation_image: Option<String>,
}

impl Question {
    pub fn correct_count(&self) -> usize {
        self.options.iter().filter(|o| o.is_correct).count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub url: String,
    /// Advisory only; taken from the sidebar badge.
    pub count: u32,
}

/// Maps the payload's numeric vehicle code to its label.
pub fn vehicle_type_label(code: Option<i64>) -> &'static str {
    match code {
        Some(2) => "αυτοκινητο",
        Some(1) => "μοτοσικλετα",
        _ => UNKNOWN,
    }
}
