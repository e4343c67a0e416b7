//! Static dex-number to display-name lookup.
//!
//! A [`NameTable`] is built once at startup and shared (`Arc<NameTable>`) with
//! the extractor. Tests build restricted tables with [`NameTable::from_pairs`].

use std::collections::BTreeMap;

/// Built-in names for creatures commonly seen in ranked teams.
const BUILTIN_NAMES: &[(u16, &str)] = &[
    (1, "フシギダネ"),
    (2, "フシギソウ"),
    (3, "フシギバナ"),
    (4, "ヒトカゲ"),
    (5, "リザード"),
    (6, "リザードン"),
    (7, "ゼニガメ"),
    (8, "カメール"),
    (9, "カメックス"),
    (25, "ピカチュウ"),
    (26, "ライチュウ"),
    (59, "ウインディ"),
    (89, "ベトベトン"),
    (110, "マタドガス"),
    (113, "ラッキー"),
    (131, "ラプラス"),
    (132, "メタモン"),
    (143, "カビゴン"),
    (149, "カイリュー"),
    (150, "ミュウツー"),
    (196, "エーフィ"),
    (211, "ハリーセン"),
    (212, "ハッサム"),
    (232, "ドンファン"),
    (235, "ツボツボ"),
    (242, "ハピナス"),
    (248, "バンギラス"),
    (249, "ルギア"),
    (250, "ホウオウ"),
    (260, "ラグラージ"),
    (282, "サーナイト"),
    (286, "キノガッサ"),
    (330, "フライゴン"),
    (380, "ラティアス"),
    (382, "カイオーガ"),
    (383, "グラードン"),
    (384, "レックウザ"),
    (426, "フワライド"),
    (437, "ドータクン"),
    (445, "ガブリアス"),
    (450, "カバルドン"),
    (472, "グライオン"),
    (479, "ロトム"),
    (485, "ヒードラン"),
    (487, "ギラティナ"),
    (488, "クレセリア"),
    (547, "フラージェス"),
    (594, "ママンボウ"),
    (645, "ランドロス"),
    (658, "ゲッコウガ"),
    (727, "オドリドリ"),
    (730, "アシレーヌ"),
    (745, "ルガルガン"),
    (748, "ドヒドイデ"),
    (778, "ミミッキュ"),
    (792, "ルナアーラ"),
    (800, "ネクロズマ"),
    (812, "ゴリランダー"),
    (823, "アーマーガア"),
    (855, "ヤバチャ"),
    (858, "ブリムオン"),
    (861, "グリムスナール"),
    (876, "イエッサン"),
    (877, "モルペコ"),
    (888, "ザシアン"),
    (889, "ザマゼンタ"),
    (890, "ムゲンダイナ"),
    (892, "ウーラオス"),
    (898, "バドレックス"),
    (901, "パオジアン"),
    (903, "ドオー"),
    (911, "ラウドボーン"),
    (923, "ブロロローム"),
    (925, "ラブトロス"),
    (934, "キョジオーン"),
    (970, "ハバタクカミ"),
    (973, "イダイナキバ"),
    (977, "ヘイラッシャ"),
    (978, "キチキギス"),
    (980, "テツノワダチ"),
    (981, "テツノカイナ"),
    (984, "デカヌチャン"),
    (986, "セグレイブ"),
    (987, "ディンルー"),
    (990, "イーユイ"),
    (991, "トドロクツキ"),
    (992, "テツノブジン"),
    (1000, "ミライドン"),
    (1001, "コライドン"),
    (1002, "ウネルミナモ"),
    (1003, "テツノドクガ"),
    (1004, "サーフゴー"),
    (1005, "チオンジェン"),
    (1006, "パーモット"),
    (1007, "オーガポン"),
    (1008, "マシマシラ"),
    (1009, "キラフロル"),
    (1017, "オーロンゲ"),
    (1018, "ブリジュラス"),
    (1020, "ヒスイウォーグル"),
    (1021, "ドドゲザン"),
    (1024, "イイネイヌ"),
];

/// Immutable dex-number to display-name mapping.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    names: BTreeMap<u16, String>,
}

impl NameTable {
    /// Builds the table shipped with the crate.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN_NAMES.iter().copied())
    }

    /// Builds a table from `(number, name)` pairs. Later duplicates win.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u16, S)>,
        S: Into<String>,
    {
        Self {
            names: pairs
                .into_iter()
                .map(|(number, name)| (number, name.into()))
                .collect(),
        }
    }

    /// Looks up a display name by dex number.
    #[must_use]
    pub fn get(&self, number: u16) -> Option<&str> {
        self.names.get(&number).map(String::as_str)
    }

    /// Looks up the display name for a creature reference such as `"0025-01"`.
    #[must_use]
    pub fn resolve_ref(&self, creature_ref: &str) -> Option<&str> {
        dex_number(creature_ref).and_then(|number| self.get(number))
    }

    /// Returns the first name (in ascending dex order) that occurs verbatim in `text`.
    #[must_use]
    pub fn find_in(&self, text: &str) -> Option<&str> {
        self.names
            .values()
            .map(String::as_str)
            .find(|name| text.contains(name))
    }

    /// Number of names in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the table holds no names.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Parses the numeric prefix of a creature reference (`"1004-01"` → `1004`).
#[must_use]
pub fn dex_number(creature_ref: &str) -> Option<u16> {
    let prefix = creature_ref.split('-').next()?.trim();
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    prefix.parse().ok()
}

/// Placeholder name for a dex number missing from the table.
#[must_use]
pub fn placeholder_name(number: u16) -> String {
    format!("<unknown:{number:04}>")
}
