pub mod categories;
pub mod dom;
pub mod pagination;
pub mod payload;
pub mod urls;

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};
use tracing::info;

use crate::model::Question;
use pagination::NextPage;

static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Everything the paginator needs from one fetched page.
pub struct ParsedPage {
    pub questions: Vec<Question>,
    pub next: NextPage,
}

/// Structured payload first, markup scraping only when the payload yields
/// nothing. Both never fail; an empty `Vec` is a zero-result page.
pub fn extract_questions(html: &str) -> Vec<Question> {
    questions_from(&Html::parse_document(html))
}

/// Parse a page once for both its questions and its next-page link.
pub fn parse_page(html: &str, current_url: &str) -> ParsedPage {
    let document = Html::parse_document(html);
    ParsedPage {
        questions: questions_from(&document),
        next: pagination::next_page(&document, current_url),
    }
}

fn questions_from(document: &Html) -> Vec<Question> {
    let questions = payload::extract(document);
    if !questions.is_empty() {
        return questions;
    }
    let questions = dom::extract(document);
    if questions.is_empty() {
        info!("No questions found on page by either strategy");
    }
    questions
}

pub(crate) fn collapse_ws(s: &str) -> String {
    WS_RE.replace_all(s, " ").trim().to_string()
}

pub(crate) fn element_text(el: &ElementRef) -> String {
    collapse_ws(&el.text().collect::<String>())
}

pub(crate) fn has_class(el: &ElementRef, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

pub(crate) fn non_blank(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use serde_json::{json, Value};

    /// One payload entry, JSON-encoded the way the site embeds it.
    pub fn payload_item(id: u32, text: &str) -> Value {
        Value::String(
            json!({
                "id": id,
                "text": text,
                "options": [
                    {"text": "Σωστό", "is_correct": true},
                    {"text": "Λάθος", "is_correct": false}
                ],
                "section": "ΣΗΜΑΝΣΗ 1",
                "category": 2
            })
            .to_string(),
        )
    }

    /// A page carrying `items` in its `#json-container`, plus an optional
    /// `rel="next"` pagination link.
    pub fn payload_page(items: &[Value], next_href: Option<&str>) -> String {
        let blob = json!({ "questions": items }).to_string();
        let pagination = next_href
            .map(|h| {
                format!(
                    r#"<ul class="pagination"><li class="next"><a rel="next" href="{}">»</a></li></ul>"#,
                    h
                )
            })
            .unwrap_or_default();
        format!(
            r#"<html><body><div id="json-container" data-questions="{}"></div>{}</body></html>"#,
            escape_attr(&blob),
            pagination
        )
    }

    fn escape_attr(s: &str) -> String {
        s.replace('&', "&amp;")
            .replace('"', "&quot;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    }
}

#[cfg(test)]
mod tests {
    use super::testutil::{payload_item, payload_page};
    use super::*;

    #[test]
    fn payload_wins_over_markup() {
        let mut html = payload_page(&[payload_item(7, "from payload")], None);
        html = html.replace(
            "</body>",
            r#"<div class="portlet-body"><div class="text-wrapper"><div class="text">from markup</div></div>
               <div class="option correct">A</div></div></body>"#,
        );
        let qs = extract_questions(&html);
        assert_eq!(qs.len(), 1);
        assert_eq!(qs[0].text, "from payload");
    }

    #[test]
    fn falls_back_to_markup() {
        let html = std::fs::read_to_string("tests/fixtures/dom_page.html").unwrap();
        let qs = extract_questions(&html);
        assert_eq!(qs.len(), 2);
        assert_eq!(qs[0].id.len(), 16);
    }

    #[test]
    fn nothing_to_extract() {
        assert!(extract_questions("<html><body><p>Σφάλμα</p></body></html>").is_empty());
        assert!(extract_questions("").is_empty());
        assert!(extract_questions("<<<>>> not html at all").is_empty());
    }

    #[test]
    fn parse_page_reads_next_link() {
        let html = payload_page(&[payload_item(1, "a")], Some("/erotiseis?page=2"));
        let page = parse_page(&html, "https://www.drivepoint.gr/erotiseis?page=1");
        assert_eq!(page.questions.len(), 1);
        assert_eq!(
            page.next,
            NextPage::Url("https://www.drivepoint.gr/erotiseis?page=2".into())
        );
    }

    #[test]
    fn whitespace_helpers() {
        assert_eq!(collapse_ws("  a \n\t b  "), "a b");
        assert_eq!(non_blank(" \n".into()), None);
        assert_eq!(non_blank("x".into()).as_deref(), Some("x"));
    }
}
