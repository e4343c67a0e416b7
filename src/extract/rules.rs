//! Ordered label-pattern table for build article text.
//!
//! Each [`Rule`] pairs a target [`Field`] with one label pattern. Rules for
//! the same field are listed from most to least specific; the extractor tries
//! them in table order and keeps the first hit per field.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::model::EffortValues;
use crate::utils::compile_static_regex;

/// Creature attribute a rule fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Item,
    Ability,
    Nature,
    TeraType,
    Moves,
    EffortValues,
}

/// One `(field, pattern)` entry of the table.
#[derive(Debug)]
pub struct Rule {
    pub field: Field,
    pub pattern: Regex,
}

/// Value recovered by a rule, shaped by its field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capture {
    Text(String),
    Moves(Vec<String>),
    Spread(EffortValues),
}

/// Label + colon (full- or half-width), then a single non-whitespace token.
fn labelled(label: &str) -> String {
    format!(r"{label}[：:]\s*(\S+)")
}

/// Label + colon, then four move names separated by `、`, `,` or `，`.
fn move_list(label: &str) -> String {
    let token = r"\s*([^、,，\n]+?)\s*";
    format!(r"{label}[：:]{token}[、,，]{token}[、,，]{token}[、,，]{token}(?:[、,，\n]|$)")
}

const EV_HEAD: &str = r"努力値[：:]\s*";

/// Every rule, in evaluation order.
pub static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    let table: Vec<(Field, String)> = vec![
        (Field::Item, labelled("持ち物")),
        (Field::Item, labelled("もちもの")),
        (Field::Item, labelled("アイテム")),
        (Field::Ability, labelled("特性")),
        (Field::Ability, labelled("とくせい")),
        (Field::Nature, labelled("性格")),
        (Field::Nature, labelled("せいかく")),
        (Field::TeraType, labelled("テラスタイプ")),
        (Field::TeraType, labelled("テラス")),
        (Field::TeraType, labelled("テラ")),
        (Field::Moves, move_list("技")),
        (Field::Moves, move_list("わざ")),
        (Field::Moves, move_list("技構成")),
        (
            Field::EffortValues,
            format!(
                r"{EV_HEAD}(?:H|HP)(\d+)\s*(?:A|攻撃)(\d+)\s*(?:B|防御)(\d+)\s*(?:C|特攻)(\d+)\s*(?:D|特防)(\d+)\s*(?:S|素早)(\d+)"
            ),
        ),
        (
            Field::EffortValues,
            format!(
                r"{EV_HEAD}(?:HP|H)(\d+)\s*(?:攻撃|A)(\d+)\s*(?:防御|B)(\d+)\s*(?:特攻|C)(\d+)\s*(?:特防|D)(\d+)\s*(?:素早さ|S)(\d+)"
            ),
        ),
        (
            Field::EffortValues,
            format!(
                r"{EV_HEAD}(?:HP|H)(\d+)[\s\-・/]*(?:攻撃|A)(\d+)[\s\-・/]*(?:防御|B)(\d+)[\s\-・/]*(?:特攻|C)(\d+)[\s\-・/]*(?:特防|D)(\d+)[\s\-・/]*(?:素早さ|素早|S)(\d+)"
            ),
        ),
    ];

    table
        .into_iter()
        .map(|(field, pattern)| Rule {
            field,
            pattern: compile_static_regex(&pattern),
        })
        .collect()
});

impl Rule {
    /// Applies the rule to `text`, parsing the captures for its field.
    #[must_use]
    pub fn apply(&self, text: &str) -> Option<Capture> {
        let caps = self.pattern.captures(text)?;
        match self.field {
            Field::Item | Field::Ability | Field::Nature | Field::TeraType => {
                group(&caps, 1).map(|value| Capture::Text(value.to_string()))
            }
            Field::Moves => {
                let moves: Vec<String> = (1..=4)
                    .filter_map(|i| group(&caps, i))
                    .map(str::to_string)
                    .collect();
                (moves.len() == 4).then_some(Capture::Moves(moves))
            }
            Field::EffortValues => {
                let mut values = [0u32; 6];
                for (slot, i) in values.iter_mut().zip(1..=6) {
                    *slot = group(&caps, i)?.parse().ok()?;
                }
                Some(Capture::Spread(EffortValues::from_array(values)))
            }
        }
    }
}

fn group<'t>(caps: &Captures<'t>, index: usize) -> Option<&'t str> {
    caps.get(index)
        .map(|m| m.as_str().trim())
        .filter(|value| !value.is_empty())
}
