//! Parsing of a single trainer listing page.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use crate::model::TrainerStub;
use crate::utils::{compile_static_regex, compile_static_selector, element_text, first_integer};

/// Link text marking a build article link.
pub const ARTICLE_MARKER: &str = "構築記事";

/// Link text of the "next page" navigation element.
pub const NEXT_PAGE_MARKER: &str = "次へ";

static ROW_SELECTOR: LazyLock<Selector> = LazyLock::new(|| compile_static_selector("tr"));
static CELL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| compile_static_selector("td"));
static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| compile_static_selector("a"));
static CREATURE_LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| compile_static_selector(r#"a[href*="/pokemon/show/"]"#));
static CREATURE_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"/pokemon/show/(\d{4}-\d{2})"));

/// What one listing page contained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    /// Number of `tr` rows on the page.
    pub row_count: usize,
    /// Whether any row carried a build article link.
    pub has_article_link: bool,
    /// Whether the page offers a "next page" link.
    pub has_next_page: bool,
    /// Rows that became stubs.
    pub stubs: Vec<TrainerStub>,
}

/// Parses a listing page. `page_url` is used to absolutize article links.
#[must_use]
pub fn parse_listing_page(html: &str, page_url: &Url) -> ListingPage {
    let document = Html::parse_document(html);
    let mut page = ListingPage::default();

    for row in document.select(&ROW_SELECTOR) {
        page.row_count += 1;

        let Some(article_link) = find_link_containing(row, ARTICLE_MARKER) else {
            continue;
        };
        page.has_article_link = true;

        if let Some(stub) = parse_row(row, article_link, page_url) {
            page.stubs.push(stub);
        }
    }

    page.has_next_page = find_link_containing(document.root_element(), NEXT_PAGE_MARKER).is_some();
    page
}

fn parse_row(row: ElementRef<'_>, article_link: ElementRef<'_>, page_url: &Url) -> Option<TrainerStub> {
    let cells: Vec<ElementRef<'_>> = row.select(&CELL_SELECTOR).collect();
    if cells.len() < 3 {
        debug!(cells = cells.len(), "article row has too few cells, skipping");
        return None;
    }

    let Some(rank) = first_integer(&element_text(cells[0])) else {
        debug!("article row has no numeric rank, skipping");
        return None;
    };
    let Some(rating) = first_integer(&element_text(cells[1])) else {
        debug!(rank, "article row has no numeric rating, skipping");
        return None;
    };

    let trainer_cell = cells[2];
    let trainer_name = element_text(trainer_cell)
        .replace(ARTICLE_MARKER, "")
        .trim()
        .to_string();

    let article_url = article_link
        .value()
        .attr("href")
        .and_then(|href| page_url.join(href.trim()).ok())
        .map(|url| url.to_string())
        .unwrap_or_default();
    if article_url.is_empty() {
        debug!(rank, "article link has no usable href, skipping");
        return None;
    }

    let creature_refs = creature_refs(trainer_cell);
    if creature_refs.is_empty() {
        debug!(rank, trainer = %trainer_name, "no visible team members, skipping");
        return None;
    }

    Some(TrainerStub {
        rank,
        rating,
        trainer_name,
        article_url,
        creature_refs,
    })
}

fn creature_refs(cell: ElementRef<'_>) -> Vec<String> {
    let mut refs: Vec<String> = Vec::new();
    for link in cell.select(&CREATURE_LINK_SELECTOR) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        if let Some(caps) = CREATURE_REF_RE.captures(href) {
            let creature_ref = caps[1].to_string();
            if !refs.contains(&creature_ref) {
                refs.push(creature_ref);
            }
        }
    }
    refs
}

fn find_link_containing<'a>(scope: ElementRef<'a>, marker: &str) -> Option<ElementRef<'a>> {
    scope
        .select(&LINK_SELECTOR)
        .find(|link| link.text().collect::<String>().contains(marker))
}
