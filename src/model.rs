//! Records produced by a crawl and persisted to the output file.
//!
//! Field names on the wire follow the output file contract consumed by the
//! spreadsheet uploader (`trainer_name`, `tera_type`, `evs.H` ...).

use serde::{Deserialize, Deserializer, Serialize};

/// Sentinel stored in text fields that no pattern recovered.
pub const UNKNOWN: &str = "unknown";

/// A ranked listing row that links a build article.
///
/// Only built by the listing parser, and only when at least one creature
/// reference was found on the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainerStub {
    /// Ranking position at capture time.
    pub rank: u32,
    /// Ranking score at capture time.
    pub rating: u32,
    /// Display name assigned by the ranking site.
    pub trainer_name: String,
    /// Absolute URL of the build article.
    pub article_url: String,
    /// `NNNN-NN` references for the visible team slots, in page order.
    pub creature_refs: Vec<String>,
}

impl TrainerStub {
    /// Returns true if `record` describes the same listing entry.
    #[must_use]
    pub fn matches(&self, record: &TrainerRecord) -> bool {
        self.rank == record.rank
            && self.trainer_name == record.trainer_name
            && self.article_url == record.article_url
    }
}

/// Six-axis effort value spread.
///
/// Letters follow the usual community shorthand: H (HP), A (Attack),
/// B (Defense), C (Sp. Atk), D (Sp. Def), S (Speed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffortValues {
    #[serde(rename = "H", deserialize_with = "number_or_digits")]
    pub hp: u32,
    #[serde(rename = "A", deserialize_with = "number_or_digits")]
    pub attack: u32,
    #[serde(rename = "B", deserialize_with = "number_or_digits")]
    pub defense: u32,
    #[serde(rename = "C", deserialize_with = "number_or_digits")]
    pub sp_attack: u32,
    #[serde(rename = "D", deserialize_with = "number_or_digits")]
    pub sp_defense: u32,
    #[serde(rename = "S", deserialize_with = "number_or_digits")]
    pub speed: u32,
}

impl EffortValues {
    /// Builds a spread from values in H/A/B/C/D/S order.
    #[must_use]
    pub fn from_array([h, a, b, c, d, s]: [u32; 6]) -> Self {
        Self {
            hp: h,
            attack: a,
            defense: b,
            sp_attack: c,
            sp_defense: d,
            speed: s,
        }
    }

    /// Returns the spread in H/A/B/C/D/S order.
    #[must_use]
    pub fn to_array(self) -> [u32; 6] {
        [
            self.hp,
            self.attack,
            self.defense,
            self.sp_attack,
            self.sp_defense,
            self.speed,
        ]
    }

    /// Returns true while no spread has been recorded.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.to_array().iter().all(|&v| v == 0)
    }
}

/// One resolved team member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureRecord {
    pub name: String,
    pub item: String,
    pub ability: String,
    pub nature: String,
    pub tera_type: String,
    /// Up to four move names; empty when no move list was found.
    pub moves: Vec<String>,
    pub evs: EffortValues,
}

/// The persisted unit: a listing entry plus its extracted team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerRecord {
    pub rank: u32,
    pub rating: u32,
    pub trainer_name: String,
    pub article_url: String,
    pub pokemon: Vec<CreatureRecord>,
}

impl TrainerRecord {
    /// Starts a record for `stub` with an empty team.
    #[must_use]
    pub fn from_stub(stub: &TrainerStub) -> Self {
        Self {
            rank: stub.rank,
            rating: stub.rating,
            trainer_name: stub.trainer_name.clone(),
            article_url: stub.article_url.clone(),
            pokemon: Vec::new(),
        }
    }
}

/// Accepts `252` as well as `"252"`; older output files stored digits as strings.
fn number_or_digits<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}
