//! Field extraction from free-form build articles.
//!
//! Articles are third-party blog posts with no fixed layout. The extractor
//! splits a page into text blocks (headings, `div` and `p` elements in
//! document order) and runs the ordered [`RULES`] table over each block,
//! filling a [`CreatureBuilder`] whose fields can only be set once. Anything
//! not found stays at the `"unknown"` sentinel.

mod builder;
mod rules;

pub use builder::CreatureBuilder;
pub use rules::{Capture, Field, RULES, Rule};

use std::sync::{Arc, LazyLock};

use scraper::{Html, Selector};
use tracing::{debug, instrument, warn};

use crate::fetch::PageFetcher;
use crate::model::CreatureRecord;
use crate::names::{NameTable, dex_number, placeholder_name};
use crate::utils::{compile_static_selector, element_text};

static BLOCK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| compile_static_selector("h1, h2, h3, h4, h5, h6, div, p"));

/// Splits an article into block texts in document order. Blocks with no
/// visible text are dropped.
#[must_use]
pub fn article_blocks(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(&BLOCK_SELECTOR)
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect()
}

/// Builds [`CreatureRecord`]s from article text.
#[derive(Debug, Clone)]
pub struct Extractor {
    names: Arc<NameTable>,
}

impl Extractor {
    #[must_use]
    pub fn new(names: Arc<NameTable>) -> Self {
        Self { names }
    }

    #[must_use]
    pub fn names(&self) -> &NameTable {
        &self.names
    }

    /// Extracts one creature from already-fetched article HTML.
    ///
    /// Pure and deterministic: the same `html` and `creature_ref` always give
    /// the same record. The name is the one registered for the reference's
    /// dex number. Unregistered numbers take the first table name seen in a
    /// block, else a placeholder. A reference with no numeric prefix and no
    /// name in the text gets a blank name.
    #[must_use]
    pub fn extract_from_html(&self, html: &str, creature_ref: &str) -> CreatureRecord {
        self.extract_from_blocks(&article_blocks(html), creature_ref)
    }

    /// Same as [`Extractor::extract_from_html`] for pre-split blocks, so one
    /// article can be parsed once and reused for every reference.
    #[must_use]
    pub fn extract_from_blocks(&self, blocks: &[String], creature_ref: &str) -> CreatureRecord {
        let mut builder = CreatureBuilder::new();
        if let Some(name) = self.names.resolve_ref(creature_ref) {
            builder.offer_name(name);
        }

        for block in blocks {
            if !builder.has_name()
                && let Some(name) = self.names.find_in(block)
            {
                builder.offer_name(name);
            }

            for rule in RULES.iter() {
                if !builder.is_open(rule.field) {
                    continue;
                }
                if let Some(capture) = rule.apply(block) {
                    builder.offer(rule.field, capture);
                }
            }
        }

        builder.finish(dex_number(creature_ref).map(placeholder_name))
    }

    /// Fetches `article_url` and extracts the creature for `creature_ref`.
    ///
    /// Returns `None` only when the fetch fails.
    #[instrument(skip(self, fetcher))]
    pub async fn extract_creature(
        &self,
        fetcher: &dyn PageFetcher,
        article_url: &str,
        creature_ref: &str,
    ) -> Option<CreatureRecord> {
        match fetcher.fetch(article_url, &[]).await {
            Ok(html) => {
                let record = self.extract_from_html(&html, creature_ref);
                debug!(name = %record.name, "creature extracted");
                Some(record)
            }
            Err(error) => {
                warn!(url = %article_url, error = %error, "article fetch failed");
                None
            }
        }
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(Arc::new(NameTable::builtin()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::fetch::FetchError;
    use crate::model::{EffortValues, UNKNOWN};

    fn extractor() -> Extractor {
        Extractor::new(Arc::new(NameTable::from_pairs([
            (25, "ピカチュウ"),
            (445, "ガブリアス"),
            (1004, "サーフゴー"),
        ])))
    }

    const FULL_ARTICLE: &str = r#"<html><body>
        <h2>サーフゴー</h2>
        <p>持ち物：こだわりスカーフ</p>
        <p>特性：おうごんのからだ</p>
        <p>性格：おくびょう</p>
        <p>テラスタイプ：はがね</p>
        <p>技：ゴールドラッシュ、シャドーボール、トリック、わるだくみ</p>
        <p>努力値：H4 A0 B0 C252 D0 S252</p>
    </body></html>"#;

    #[test]
    fn test_full_article() {
        let record = extractor().extract_from_html(FULL_ARTICLE, "1004-00");
        assert_eq!(record.name, "サーフゴー");
        assert_eq!(record.item, "こだわりスカーフ");
        assert_eq!(record.ability, "おうごんのからだ");
        assert_eq!(record.nature, "おくびょう");
        assert_eq!(record.tera_type, "はがね");
        assert_eq!(
            record.moves,
            vec!["ゴールドラッシュ", "シャドーボール", "トリック", "わるだくみ"]
        );
        assert_eq!(record.evs, EffortValues::from_array([4, 0, 0, 252, 0, 252]));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let ex = extractor();
        let first = ex.extract_from_html(FULL_ARTICLE, "1004-00");
        let second = ex.extract_from_html(FULL_ARTICLE, "1004-00");
        assert_eq!(first, second);
    }

    #[test]
    fn test_first_label_variant_wins_within_block() {
        let html = "<html><body><p>もちもの：たべのこし 持ち物：いのちのたま</p></body></html>";
        let record = extractor().extract_from_html(html, "0445-00");
        assert_eq!(record.item, "いのちのたま");
    }

    #[test]
    fn test_later_block_does_not_overwrite() {
        let html = "<html><body>\
            <p>持ち物：いのちのたま</p>\
            <p>アイテム：きあいのタスキ</p>\
            <p>特性：さめはだ</p>\
            <p>特性：すながくれ</p>\
            </body></html>";
        let record = extractor().extract_from_html(html, "0445-00");
        assert_eq!(record.item, "いのちのたま");
        assert_eq!(record.ability, "さめはだ");
    }

    #[test]
    fn test_ev_spread_is_committed_once() {
        let html = "<html><body>\
            <p>努力値：H252 A4 B0 C0 D0 S252</p>\
            <p>努力値：H0 A252 B0 C0 D4 S252</p>\
            </body></html>";
        let record = extractor().extract_from_html(html, "0445-00");
        assert_eq!(record.evs, EffortValues::from_array([252, 4, 0, 0, 0, 252]));
    }

    #[test]
    fn test_partial_ev_line_leaves_spread_zero() {
        let html = "<html><body><p>努力値：H252 A4</p></body></html>";
        let record = extractor().extract_from_html(html, "0445-00");
        assert!(record.evs.is_zero());
    }

    #[test]
    fn test_sparse_article_keeps_sentinels() {
        let html = "<html><body><div>特性：にげあし</div></body></html>";
        let record = extractor().extract_from_html(html, "0025-01");
        assert_eq!(record.name, "ピカチュウ");
        assert_eq!(record.ability, "にげあし");
        assert_eq!(record.item, UNKNOWN);
        assert_eq!(record.nature, UNKNOWN);
        assert_eq!(record.tera_type, UNKNOWN);
        assert!(record.moves.is_empty());
        assert!(record.evs.is_zero());
    }

    #[test]
    fn test_shared_article_keeps_registered_name_per_reference() {
        let html = "<html><body>\
            <h2>サーフゴー</h2><p>特性：おうごんのからだ</p>\
            <h2>ガブリアス</h2><p>特性：さめはだ</p>\
            </body></html>";
        let ex = extractor();
        let blocks = article_blocks(html);

        let names: Vec<String> = ["1004-00", "0445-00", "0025-01"]
            .iter()
            .map(|creature_ref| ex.extract_from_blocks(&blocks, creature_ref).name)
            .collect();
        assert_eq!(names, vec!["サーフゴー", "ガブリアス", "ピカチュウ"]);
    }

    #[test]
    fn test_unregistered_number_takes_name_from_text() {
        let html = "<html><body><h3>ガブリアス</h3></body></html>";
        let record = extractor().extract_from_html(html, "0999-00");
        assert_eq!(record.name, "ガブリアス");
    }

    #[test]
    fn test_first_name_in_dex_order_is_chosen() {
        let html = "<html><body><p>サーフゴーとピカチュウ</p></body></html>";
        let record = extractor().extract_from_html(html, "0999-00");
        assert_eq!(record.name, "ピカチュウ");
    }

    #[test]
    fn test_inline_markup_does_not_split_labels() {
        let html = "<html><body>\
            <p><b>持ち物</b>：こだわりスカーフ</p>\
            <p>努力値：H<b>252</b> A0 B0 C0 D4 S252</p>\
            <p><strong>特性</strong>：さめはだ</p>\
            </body></html>";
        let record = extractor().extract_from_html(html, "0445-00");
        assert_eq!(record.item, "こだわりスカーフ");
        assert_eq!(record.ability, "さめはだ");
        assert_eq!(record.evs, EffortValues::from_array([252, 0, 0, 0, 4, 252]));
    }

    #[test]
    fn test_unregistered_number_gets_placeholder() {
        let record = extractor().extract_from_html("<p>nothing</p>", "0999-00");
        assert_eq!(record.name, "<unknown:0999>");
    }

    #[test]
    fn test_unparseable_ref_gives_blank_name() {
        let record = extractor().extract_from_html("<p>nothing</p>", "abc");
        assert_eq!(record.name, "");
    }

    #[test]
    fn test_blocks_keep_document_order() {
        let blocks = article_blocks("<html><body><h1>a</h1><p>b</p><p> </p><div>c</div></body></html>");
        assert_eq!(blocks, vec!["a", "b", "c"]);
    }

    struct FixedFetcher(Result<String, u16>);

    #[async_trait]
    impl PageFetcher for FixedFetcher {
        async fn fetch(&self, url: &str, _params: &[(&str, String)]) -> Result<String, FetchError> {
            self.0
                .clone()
                .map_err(|status| FetchError::http_status(url, status))
        }
    }

    #[tokio::test]
    async fn test_extract_creature_fetches_article() {
        let fetcher = FixedFetcher(Ok(FULL_ARTICLE.to_string()));
        let record = extractor()
            .extract_creature(&fetcher, "https://b.example/a", "1004-00")
            .await
            .unwrap();
        assert_eq!(record.item, "こだわりスカーフ");
    }

    #[tokio::test]
    async fn test_extract_creature_none_on_fetch_failure() {
        let fetcher = FixedFetcher(Err(404));
        let record = extractor()
            .extract_creature(&fetcher, "https://b.example/a", "1004-00")
            .await;
        assert!(record.is_none());
    }
}
