//! One-shot field accumulator for a single creature.

use crate::model::{CreatureRecord, EffortValues, UNKNOWN};

use super::rules::{Capture, Field};

/// Collects fields for one creature. Every field can be set once; later
/// offers for an already-set field are ignored.
#[derive(Debug, Default, Clone)]
pub struct CreatureBuilder {
    name: Option<String>,
    item: Option<String>,
    ability: Option<String>,
    nature: Option<String>,
    tera_type: Option<String>,
    moves: Option<Vec<String>>,
    evs: EffortValues,
}

impl CreatureBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_name(&self) -> bool {
        self.name.is_some()
    }

    /// Sets the name unless one is already locked in.
    pub fn offer_name(&mut self, name: &str) -> bool {
        set_once(&mut self.name, name.to_string())
    }

    /// Returns true while `field` can still accept a value.
    #[must_use]
    pub fn is_open(&self, field: Field) -> bool {
        match field {
            Field::Item => self.item.is_none(),
            Field::Ability => self.ability.is_none(),
            Field::Nature => self.nature.is_none(),
            Field::TeraType => self.tera_type.is_none(),
            Field::Moves => self.moves.is_none(),
            Field::EffortValues => self.evs.is_zero(),
        }
    }

    /// Offers a captured value for `field`. Returns true if it was stored.
    ///
    /// A spread is stored whole, and only while the current spread is all zero.
    pub fn offer(&mut self, field: Field, capture: Capture) -> bool {
        match (field, capture) {
            (Field::Item, Capture::Text(value)) => set_once(&mut self.item, value),
            (Field::Ability, Capture::Text(value)) => set_once(&mut self.ability, value),
            (Field::Nature, Capture::Text(value)) => set_once(&mut self.nature, value),
            (Field::TeraType, Capture::Text(value)) => set_once(&mut self.tera_type, value),
            (Field::Moves, Capture::Moves(moves)) => set_once(&mut self.moves, moves),
            (Field::EffortValues, Capture::Spread(spread)) if self.evs.is_zero() => {
                self.evs = spread;
                true
            }
            _ => false,
        }
    }

    /// Finishes the record, using `fallback_name` when no name was offered and
    /// the `"unknown"` sentinel for unset text fields.
    #[must_use]
    pub fn finish(self, fallback_name: Option<String>) -> CreatureRecord {
        let or_unknown = |value: Option<String>| value.unwrap_or_else(|| UNKNOWN.to_string());
        CreatureRecord {
            name: self.name.or(fallback_name).unwrap_or_default(),
            item: or_unknown(self.item),
            ability: or_unknown(self.ability),
            nature: or_unknown(self.nature),
            tera_type: or_unknown(self.tera_type),
            moves: self.moves.unwrap_or_default(),
            evs: self.evs,
        }
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T) -> bool {
    if slot.is_some() {
        return false;
    }
    *slot = Some(value);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_field_is_set_once() {
        let mut builder = CreatureBuilder::new();
        assert!(builder.offer(Field::Item, Capture::Text("A".to_string())));
        assert!(!builder.offer(Field::Item, Capture::Text("B".to_string())));
        assert!(!builder.is_open(Field::Item));
        assert_eq!(builder.finish(None).item, "A");
    }

    #[test]
    fn test_spread_is_committed_whole_and_once() {
        let mut builder = CreatureBuilder::new();
        let first = EffortValues::from_array([252, 0, 4, 0, 0, 252]);
        let second = EffortValues::from_array([0, 252, 0, 0, 4, 252]);
        assert!(builder.offer(Field::EffortValues, Capture::Spread(first)));
        assert!(!builder.offer(Field::EffortValues, Capture::Spread(second)));
        assert_eq!(builder.finish(None).evs, first);
    }

    #[test]
    fn test_mismatched_capture_is_rejected() {
        let mut builder = CreatureBuilder::new();
        assert!(!builder.offer(Field::Moves, Capture::Text("x".to_string())));
        assert!(builder.is_open(Field::Moves));
    }

    #[test]
    fn test_finish_fills_sentinels() {
        let record = CreatureBuilder::new().finish(Some("ピカチュウ".to_string()));
        assert_eq!(record.name, "ピカチュウ");
        assert_eq!(record.item, UNKNOWN);
        assert_eq!(record.ability, UNKNOWN);
        assert_eq!(record.nature, UNKNOWN);
        assert_eq!(record.tera_type, UNKNOWN);
        assert!(record.moves.is_empty());
        assert!(record.evs.is_zero());
    }

    #[test]
    fn test_offered_name_beats_fallback() {
        let mut builder = CreatureBuilder::new();
        assert!(builder.offer_name("ガブリアス"));
        assert!(!builder.offer_name("カイリュー"));
        assert_eq!(builder.finish(Some("x".to_string())).name, "ガブリアス");
    }

    #[test]
    fn test_no_name_and_no_fallback_is_blank() {
        assert_eq!(CreatureBuilder::new().finish(None).name, "");
    }
}
