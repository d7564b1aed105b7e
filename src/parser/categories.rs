use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use super::{collapse_ws, non_blank, urls};
use crate::model::Category;

static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".sidebar-list .nav li a").unwrap());
static BADGE: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".badge").unwrap());
static ENUM_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9. ]+").unwrap());

/// Categories listed in the sidebar navigation, in document order.
pub fn extract_categories(html: &str) -> Vec<Category> {
    let document = Html::parse_document(html);
    let mut categories = Vec::new();

    for anchor in document.select(&ANCHOR) {
        match category_from_anchor(&anchor) {
            Some(c) => categories.push(c),
            None => debug!("Skipping sidebar link without name or href"),
        }
    }

    info!("Found {} categories", categories.len());
    categories
}

fn category_from_anchor(anchor: &ElementRef) -> Option<Category> {
    let badge = anchor.select(&BADGE).next();
    let badge_text = badge.map(|b| collapse_ws(&b.text().collect::<String>()));

    // Anchor text minus the badge's own text.
    let mut label = String::new();
    for node in anchor.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let inside_badge = badge.is_some_and(|b| node.ancestors().any(|a| a.id() == b.id()));
        if !inside_badge {
            label.push_str(text);
            label.push(' ');
        }
    }

    let name = non_blank(normalize_name(&label))?;
    let url = anchor.value().attr("href").and_then(urls::absolute)?;
    let count = badge_text
        .and_then(|t| t.parse::<u32>().ok())
        .unwrap_or(0);

    Some(Category { name, url, count })
}

/// Collapse whitespace and strip a leading enumeration like `"1. "`.
pub fn normalize_name(raw: &str) -> String {
    let collapsed = collapse_ws(raw);
    ENUM_PREFIX.replace(&collapsed, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_enumeration() {
        assert_eq!(normalize_name("1. ΣΗΜΑΝΣΗ"), "ΣΗΜΑΝΣΗ");
        assert_eq!(normalize_name("  12.  ΚΑΝΟΝΕΣ ΚΥΚΛΟΦΟΡΙΑΣ \n"), "ΚΑΝΟΝΕΣ ΚΥΚΛΟΦΟΡΙΑΣ");
        assert_eq!(normalize_name("ΟΧΗΜΑ"), "ΟΧΗΜΑ");
        assert_eq!(normalize_name("3."), "");
    }

    #[test]
    fn sidebar_fixture() {
        let html = std::fs::read_to_string("tests/fixtures/categories.html").unwrap();
        let cats = extract_categories(&html);
        assert_eq!(cats.len(), 3);

        assert_eq!(cats[0].name, "ΣΗΜΑΝΣΗ");
        assert_eq!(cats[0].url, "https://www.drivepoint.gr/erotiseis/enotita/simansi");
        assert_eq!(cats[0].count, 120);

        assert_eq!(cats[1].name, "ΚΑΝΟΝΕΣ ΚΥΚΛΟΦΟΡΙΑΣ");
        assert_eq!(cats[1].count, 0);

        // absolute href passes through, badge is not numeric
        assert_eq!(cats[2].url, "https://other.example.com/enotita/ochima");
        assert_eq!(cats[2].count, 0);
    }

    #[test]
    fn skips_anchor_without_href_or_name() {
        let html = r#"<div class="sidebar-list"><ul class="nav">
            <li><a>1. ΧΩΡΙΣ ΣΥΝΔΕΣΜΟ</a></li>
            <li><a href="/x">2. </a></li>
            <li><a href="/ok">3. ΕΝΤΑΞΕΙ <span class="badge">7</span></a></li>
        </ul></div>"#;
        let cats = extract_categories(html);
        assert_eq!(cats.len(), 1);
        assert_eq!(cats[0].name, "ΕΝΤΑΞΕΙ");
        assert_eq!(cats[0].count, 7);
    }

    #[test]
    fn empty_document() {
        assert!(extract_categories("").is_empty());
        assert!(extract_categories("<ul><li><a href='/a'>A</a></li></ul>").is_empty());
    }
}
