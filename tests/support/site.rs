//! Mock ranking site fixtures: listing pages and build articles served by wiremock.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// One listing row. `article` is a path on the mock server; `None` renders a
/// row without a build article link.
pub struct Row<'a> {
    pub rank: u32,
    pub rating: &'a str,
    pub name: &'a str,
    pub article: Option<&'a str>,
    pub refs: &'a [&'a str],
}

#[must_use]
pub fn render_row(server_uri: &str, row: &Row<'_>) -> String {
    let article = row
        .article
        .map(|article| format!(r#"<a href="{server_uri}{article}">構築記事</a>"#))
        .unwrap_or_default();
    let refs: String = row
        .refs
        .iter()
        .map(|r| format!(r#"<a href="/pokemon/show/{r}?season=27"><img alt=""></a>"#))
        .collect();
    format!(
        "<tr><td>{}</td><td>{}</td><td><span>{}</span>{article}<div>{refs}</div></td></tr>",
        row.rank, row.rating, row.name
    )
}

#[must_use]
pub fn listing_page(rows: &str, has_next: bool) -> String {
    let nav = if has_next {
        r#"<nav><a href="?page=next">次へ</a></nav>"#
    } else {
        ""
    };
    format!(
        r#"<html><head><meta charset="utf-8"></head><body><table><tbody>{rows}</tbody></table>{nav}</body></html>"#
    )
}

#[must_use]
pub fn article_page(paragraphs: &[&str]) -> String {
    let body: String = paragraphs.iter().map(|p| format!("<p>{p}</p>")).collect();
    format!(r#"<html><head><meta charset="utf-8"></head><body>{body}</body></html>"#)
}

pub async fn mount_listing_page(server: &MockServer, page: u32, html: String) {
    Mock::given(method("GET"))
        .and(path("/trainer/list"))
        .and(query_param("page", page.to_string()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .insert_header("Content-Type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

pub async fn mount_article(server: &MockServer, article_path: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(article_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .insert_header("Content-Type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}
