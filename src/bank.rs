//! Item Bank Boundary
//!
//! Validates raw item records on the way in. A malformed record is dropped
//! with a log line rather than raised; the algorithmic core only ever sees
//! well-formed items.

use serde_json::Value;

use crate::types::{Item, ItemKind, Subject};

/// Bounds on a well-formed item difficulty.
const DIFFICULTY_MIN: f64 = -2.0;
const DIFFICULTY_MAX: f64 = 2.0;

/// Source of raw item records for a subject, e.g. a bundled JSON file or a
/// host-side content service.
pub trait ItemBankProvider {
    fn load_item_bank(&self, subject: Subject) -> Vec<Item>;
}

/// Bank backed by a flat list of raw JSON records.
pub struct JsonItemBank {
    records: Vec<Value>,
}

impl JsonItemBank {
    pub fn new(records: Vec<Value>) -> Self {
        Self { records }
    }
}

impl ItemBankProvider for JsonItemBank {
    fn load_item_bank(&self, subject: Subject) -> Vec<Item> {
        let items: Vec<Item> = self
            .records
            .iter()
            .filter_map(|record| validate_record(record, subject))
            .collect();
        tracing::debug!(
            subject = subject.as_str(),
            loaded = items.len(),
            raw = self.records.len(),
            "item bank loaded"
        );
        items
    }
}

/// Validate a single raw record against the bank contract: parseable shape,
/// non-empty id, matching subject, finite in-range difficulty, non-empty
/// answer, and a well-formed per-kind payload. Returns `None` (and logs)
/// for anything malformed.
pub fn validate_record(record: &Value, subject: Subject) -> Option<Item> {
    let item: Item = match serde_json::from_value(record.clone()) {
        Ok(item) => item,
        Err(err) => {
            tracing::warn!(error = %err, "dropping unparsable item record");
            return None;
        }
    };

    if item.id.trim().is_empty() {
        tracing::warn!("dropping item record with empty id");
        return None;
    }
    if item.subject != subject {
        tracing::warn!(
            item_id = %item.id,
            expected = subject.as_str(),
            actual = item.subject.as_str(),
            "dropping item record for wrong subject"
        );
        return None;
    }
    if !item.difficulty.is_finite()
        || item.difficulty < DIFFICULTY_MIN
        || item.difficulty > DIFFICULTY_MAX
    {
        tracing::warn!(item_id = %item.id, difficulty = item.difficulty, "dropping item with invalid difficulty");
        return None;
    }
    if item.correct_answer.trim().is_empty() {
        tracing::warn!(item_id = %item.id, "dropping item with empty answer");
        return None;
    }
    if let ItemKind::Mcq { choices } = &item.kind {
        if choices.is_empty() {
            tracing::warn!(item_id = %item.id, "dropping mcq item with no choices");
            return None;
        }
    }

    Some(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn good_record() -> Value {
        json!({
            "id": "m-001",
            "subject": "math",
            "skill": "counting",
            "difficulty": -1.0,
            "type": "count",
            "target": 7,
            "prompt": "How many stars?",
            "correctAnswer": "7"
        })
    }

    #[test]
    fn test_valid_record_accepted() {
        let item = validate_record(&good_record(), Subject::Math).unwrap();
        assert_eq!(item.id, "m-001");
        assert_eq!(item.kind, ItemKind::Count { target: 7 });
    }

    #[test]
    fn test_empty_id_dropped() {
        let mut record = good_record();
        record["id"] = json!("  ");
        assert!(validate_record(&record, Subject::Math).is_none());
    }

    #[test]
    fn test_wrong_subject_dropped() {
        assert!(validate_record(&good_record(), Subject::Reading).is_none());
    }

    #[test]
    fn test_non_numeric_difficulty_dropped() {
        let mut record = good_record();
        record["difficulty"] = json!("hard");
        assert!(validate_record(&record, Subject::Math).is_none());
    }

    #[test]
    fn test_out_of_range_difficulty_dropped() {
        let mut record = good_record();
        record["difficulty"] = json!(5.0);
        assert!(validate_record(&record, Subject::Math).is_none());
    }

    #[test]
    fn test_empty_answer_dropped() {
        let mut record = good_record();
        record["correctAnswer"] = json!("");
        assert!(validate_record(&record, Subject::Math).is_none());
    }

    #[test]
    fn test_mcq_without_choices_dropped() {
        let record = json!({
            "id": "r-001",
            "subject": "reading",
            "skill": "phonics",
            "difficulty": 0.0,
            "type": "mcq",
            "choices": [],
            "prompt": "Which word rhymes?",
            "correctAnswer": "cat"
        });
        assert!(validate_record(&record, Subject::Reading).is_none());
    }

    #[test]
    fn test_bank_drops_malformed_and_keeps_valid() {
        let mut bad = good_record();
        bad["correctAnswer"] = json!("");
        let bank = JsonItemBank::new(vec![good_record(), bad, json!({"not": "an item"})]);
        let items = bank.load_item_bank(Subject::Math);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "m-001");
    }
}
