use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{non_blank, urls};
use crate::model::{vehicle_type_label, Question, QuestionOption, UNKNOWN};

static CONTAINER: LazyLock<Selector> = LazyLock::new(|| Selector::parse("#json-container").unwrap());

const DATA_ATTR: &str = "data-questions";

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing field `{0}`")]
    Missing(&'static str),
    #[error("field `{0}` is malformed")]
    Malformed(&'static str),
    #[error("option {index}: missing or malformed field `{field}`")]
    Option { index: usize, field: &'static str },
}

#[derive(Debug, Deserialize)]
struct Envelope {
    questions: Option<Vec<Value>>,
}

/// Loosely-typed payload item. Fields are kept as raw JSON so that `decode`
/// can name the one that is absent or has the wrong type.
#[derive(Debug, Default, Deserialize)]
struct RawItem {
    id: Option<Value>,
    text: Option<Value>,
    options: Option<Value>,
    image: Option<Value>,
    section: Option<Value>,
    category: Option<Value>,
    explanation: Option<Value>,
    explanation_img: Option<Value>,
}

/// Strategy A: questions from the `#json-container[data-questions]` blob.
///
/// An empty result means "nothing here"; the caller falls back to DOM
/// scraping. Broken items are logged and skipped.
pub fn extract(document: &Html) -> Vec<Question> {
    let Some(container) = document.select(&CONTAINER).next() else {
        debug!("No JSON container found in page");
        return Vec::new();
    };
    let Some(raw) = container.value().attr(DATA_ATTR) else {
        debug!("JSON container has no {} attribute", DATA_ATTR);
        return Vec::new();
    };

    let envelope: Envelope = match serde_json::from_str(raw) {
        Ok(e) => e,
        Err(e) => {
            warn!("Unreadable question payload: {}", e);
            return Vec::new();
        }
    };
    let Some(items) = envelope.questions else {
        debug!("Question payload has no questions array");
        return Vec::new();
    };

    let mut questions = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match decode_item(item) {
            Ok(q) => questions.push(q),
            Err(e) => warn!("Skipping payload question #{}: {}", i, e),
        }
    }

    info!("Extracted {} of {} questions from JSON payload", questions.len(), items.len());
    questions
}

/// Items are usually JSON-encoded strings; plain objects are accepted too.
fn decode_item(item: &Value) -> Result<Question, DecodeError> {
    let raw: RawItem = match item {
        Value::String(s) => serde_json::from_str(s)?,
        Value::Object(_) => RawItem::deserialize(item)?,
        _ => return Err(DecodeError::Malformed("questions[]")),
    };
    decode(raw)
}

/// Required string: absent, null or blank is `Missing`, any other type is
/// `Malformed`.
fn required_str(value: Option<Value>, field: &'static str) -> Result<String, DecodeError> {
    match value {
        Some(Value::String(s)) => non_blank(s).ok_or(DecodeError::Missing(field)),
        None | Some(Value::Null) => Err(DecodeError::Missing(field)),
        Some(_) => Err(DecodeError::Malformed(field)),
    }
}

/// Optional string: a wrong type is logged and treated as absent.
fn optional_str(value: Option<Value>, field: &'static str) -> Option<String> {
    match value {
        Some(Value::String(s)) => non_blank(s),
        None | Some(Value::Null) => None,
        Some(_) => {
            warn!("Ignoring payload field: {}", DecodeError::Malformed(field));
            None
        }
    }
}

fn decode_option(index: usize, value: &Value) -> Result<QuestionOption, DecodeError> {
    let text = value
        .get("text")
        .and_then(Value::as_str)
        .ok_or(DecodeError::Option { index, field: "text" })?
        .to_string();
    let is_correct = value
        .get("is_correct")
        .and_then(|v| v.as_bool().or_else(|| v.as_i64().map(|n| n != 0)))
        .ok_or(DecodeError::Option { index, field: "is_correct" })?;
    Ok(QuestionOption { text, is_correct })
}

fn decode(raw: RawItem) -> Result<Question, DecodeError> {
    let id = match raw.id {
        Some(Value::String(s)) if !s.trim().is_empty() => s,
        Some(Value::Number(n)) => n.to_string(),
        None | Some(Value::Null) => return Err(DecodeError::Missing("id")),
        Some(_) => return Err(DecodeError::Malformed("id")),
    };
    let text = required_str(raw.text, "text")?;

    let raw_options = match raw.options {
        Some(Value::Array(items)) if !items.is_empty() => items,
        None | Some(Value::Null) => return Err(DecodeError::Missing("options")),
        Some(_) => return Err(DecodeError::Malformed("options")),
    };
    let options = raw_options
        .iter()
        .enumerate()
        .map(|(index, o)| decode_option(index, o))
        .collect::<Result<Vec<_>, DecodeError>>()?;

    let category = match raw.category {
        None | Some(Value::Null) => None,
        Some(v) => {
            let code = v.as_i64();
            if code.is_none() {
                warn!("Ignoring payload field: {}", DecodeError::Malformed("category"));
            }
            code
        }
    };

    Ok(Question {
        id,
        text,
        image: optional_str(raw.image, "image").and_then(|s| urls::absolute(&s)),
        options,
        category: optional_str(raw.section, "section").unwrap_or_else(|| UNKNOWN.to_string()),
        vehicle_type: vehicle_type_label(category).to_string(),
        explanation: optional_str(raw.explanation, "explanation"),
        explanation_image: optional_str(raw.explanation_img, "explanation_img")
            .and_then(|s| urls::absolute(&s)),
    })
}
