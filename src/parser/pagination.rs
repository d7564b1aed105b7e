use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::urls;

static NEXT_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#".pagination .next a[rel="next"]"#).unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// No next-page control on the page.
    None,
    /// A next link exists but its href is missing or does not resolve.
    Malformed,
    Url(String),
}

/// Locate the `rel="next"` pagination link and resolve it against the
/// URL of the page it was found on.
pub fn next_page(document: &Html, current_url: &str) -> NextPage {
    let Some(link) = document.select(&NEXT_LINK).next() else {
        return NextPage::None;
    };
    match link.value().attr("href").and_then(|h| urls::resolve(current_url, h)) {
        Some(url) => NextPage::Url(url),
        None => NextPage::Malformed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn next(html: &str, current: &str) -> NextPage {
        next_page(&Html::parse_document(html), current)
    }

    #[test]
    fn relative_next_link() {
        let html = r#"<ul class="pagination"><li class="prev"><a rel="prev" href="?page=1">«</a></li>
            <li class="next"><a rel="next" href="?page=3">»</a></li></ul>"#;
        assert_eq!(
            next(html, "https://www.drivepoint.gr/erotiseis/enotita/simansi?page=2"),
            NextPage::Url("https://www.drivepoint.gr/erotiseis/enotita/simansi?page=3".into())
        );
    }

    #[test]
    fn no_next_control() {
        let html = r#"<ul class="pagination"><li class="next disabled"><span>»</span></li></ul>"#;
        assert_eq!(next(html, "https://www.drivepoint.gr/"), NextPage::None);
        // rel="next" outside .pagination does not count
        assert_eq!(
            next(r#"<a rel="next" href="/p2">next</a>"#, "https://www.drivepoint.gr/"),
            NextPage::None
        );
    }

    #[test]
    fn next_without_href() {
        let html = r#"<ul class="pagination"><li class="next"><a rel="next">»</a></li></ul>"#;
        assert_eq!(next(html, "https://www.drivepoint.gr/"), NextPage::Malformed);
    }

    #[test]
    fn unresolvable_base() {
        let html = r#"<ul class="pagination"><li class="next"><a rel="next" href="?page=2">»</a></li></ul>"#;
        assert_eq!(next(html, "not-a-url"), NextPage::Malformed);
    }
}
