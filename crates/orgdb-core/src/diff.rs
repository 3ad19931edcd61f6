//! Field-level diff between two record snapshots.
//!
//! `compute_changes` is pure and total. Rules, per key present in either
//! snapshot (metadata keys skipped):
//!
//! - array on either side: whole-sequence comparison, a missing or non-array
//!   side counts as `[]`, one `{from, to}` entry on any difference
//! - otherwise: absent, `null` and `""` all normalize to `null`, an entry is
//!   emitted when the normalized values differ
//!
//! The result is sparse: unchanged keys are omitted.

use std::collections::{BTreeMap, BTreeSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::snapshot::{Snapshot, is_metadata_key};

/// Before/after pair for one changed field.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FieldChange {
    pub from: Value,
    pub to: Value,
}

/// Changed fields keyed by field name. Ordered for stable output.
pub type ChangeSet = BTreeMap<String, FieldChange>;

/// Compute the sparse change set between `old` and `new`.
///
/// Either side may be `None`, which is treated as an empty snapshot.
#[must_use]
pub fn compute_changes(old: Option<&Snapshot>, new: Option<&Snapshot>) -> ChangeSet {
    let empty = Snapshot::new();
    let old = old.unwrap_or(&empty);
    let new = new.unwrap_or(&empty);

    let keys: BTreeSet<&String> = old.keys().chain(new.keys()).collect();

    let mut changes = ChangeSet::new();
    for key in keys {
        if is_metadata_key(key) {
            continue;
        }
        if let Some(change) = diff_value(old.get(key), new.get(key)) {
            changes.insert(key.clone(), change);
        }
    }
    changes
}

fn diff_value(before: Option<&Value>, after: Option<&Value>) -> Option<FieldChange> {
    if before.is_some_and(Value::is_array) || after.is_some_and(Value::is_array) {
        let from = as_sequence(before);
        let to = as_sequence(after);
        return (from != to).then(|| FieldChange {
            from: Value::Array(from),
            to: Value::Array(to),
        });
    }

    let from = normalize_scalar(before);
    let to = normalize_scalar(after);
    (from != to).then_some(FieldChange { from, to })
}

fn as_sequence(value: Option<&Value>) -> Vec<Value> {
    match value {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    }
}

fn normalize_scalar(value: Option<&Value>) -> Value {
    match value {
        None | Some(Value::Null) => Value::Null,
        Some(Value::String(s)) if s.is_empty() => Value::Null,
        Some(other) => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn snap(value: Value) -> Snapshot {
        value.as_object().cloned().unwrap()
    }

    fn change(from: Value, to: Value) -> FieldChange {
        FieldChange { from, to }
    }

    #[test]
    fn identical_snapshots_have_no_changes() {
        let a = snap(json!({
            "Name": "Foo", "Region": ["EU"], "Flagged for Review": false, "Notes": ""
        }));
        assert!(compute_changes(Some(&a), Some(&a)).is_empty());
    }

    #[test]
    fn scalar_rename() {
        let old = snap(json!({"Name": "Foo", "City": "Oslo"}));
        let new = snap(json!({"Name": "Bar", "City": "Oslo"}));
        let changes = compute_changes(Some(&old), Some(&new));

        let mut expected = ChangeSet::new();
        expected.insert("Name".into(), change(json!("Foo"), json!("Bar")));
        assert_eq!(changes, expected);
    }

    #[test]
    fn array_change_is_whole_sequence() {
        let old = snap(json!({"Name": "Foo", "Region": ["EU"]}));
        let new = snap(json!({"Name": "Foo", "Region": ["EU", "NA"]}));
        let changes = compute_changes(Some(&old), Some(&new));

        assert_eq!(changes.len(), 1);
        assert_eq!(
            changes["Region"],
            change(json!(["EU"]), json!(["EU", "NA"]))
        );
    }

    #[test]
    fn metadata_keys_never_appear() {
        let old = snap(json!({
            "_id": "a", "__v": 0, "createdAt": "t1", "updatedAt": "t1",
            "createdBy": "x", "updatedBy": "x"
        }));
        let new = snap(json!({
            "_id": "b", "__v": 1, "createdAt": "t2", "updatedAt": "t2",
            "createdBy": "y", "updatedBy": "y"
        }));
        assert!(compute_changes(Some(&old), Some(&new)).is_empty());
    }

    #[test]
    fn missing_snapshots_are_empty() {
        assert!(compute_changes(None, None).is_empty());

        let new = snap(json!({"Name": "Foo", "Focus": ["water"]}));
        let changes = compute_changes(None, Some(&new));
        assert_eq!(changes["Name"], change(Value::Null, json!("Foo")));
        assert_eq!(changes["Focus"], change(json!([]), json!(["water"])));
    }

    #[rstest]
    #[case::empty_to_null(json!(""), json!(null))]
    #[case::null_to_empty(json!(null), json!(""))]
    #[case::empty_to_empty(json!(""), json!(""))]
    #[case::equal_bools(json!(true), json!(true))]
    #[case::equal_numbers(json!(3), json!(3))]
    fn normalized_equal_values_are_not_changes(#[case] before: Value, #[case] after: Value) {
        let old = snap(json!({ "Notes": before }));
        let new = snap(json!({ "Notes": after }));
        assert!(compute_changes(Some(&old), Some(&new)).is_empty());
    }

    #[test]
    fn empty_string_versus_absent_is_not_a_change() {
        let old = snap(json!({"Notes": ""}));
        let new = snap(json!({}));
        assert!(compute_changes(Some(&old), Some(&new)).is_empty());
        assert!(compute_changes(Some(&new), Some(&old)).is_empty());
    }

    #[rstest]
    #[case::cleared(json!("Foo"), json!(""), json!("Foo"), json!(null))]
    #[case::filled(json!(null), json!("Bar"), json!(null), json!("Bar"))]
    #[case::flag_set(json!(false), json!(true), json!(false), json!(true))]
    #[case::number(json!(1), json!(2), json!(1), json!(2))]
    fn scalar_changes_emit_normalized_values(
        #[case] before: Value,
        #[case] after: Value,
        #[case] from: Value,
        #[case] to: Value,
    ) {
        let old = snap(json!({ "Field": before }));
        let new = snap(json!({ "Field": after }));
        let changes = compute_changes(Some(&old), Some(&new));
        assert_eq!(changes["Field"], change(from, to));
    }

    #[rstest]
    #[case::absent_vs_empty(None, Some(json!([])))]
    #[case::empty_string_vs_empty(Some(json!("")), Some(json!([])))]
    #[case::null_vs_empty(Some(json!(null)), Some(json!([])))]
    fn missing_sequences_equal_empty(#[case] before: Option<Value>, #[case] after: Option<Value>) {
        let mut old = Snapshot::new();
        if let Some(v) = before {
            old.insert("Focus".into(), v);
        }
        let mut new = Snapshot::new();
        if let Some(v) = after {
            new.insert("Focus".into(), v);
        }
        assert!(compute_changes(Some(&old), Some(&new)).is_empty());
    }

    #[test]
    fn sequence_order_matters() {
        let old = snap(json!({"Region": ["EU", "NA"]}));
        let new = snap(json!({"Region": ["NA", "EU"]}));
        assert_eq!(compute_changes(Some(&old), Some(&new)).len(), 1);
    }

    #[test]
    fn removed_sequence_normalizes_to_empty() {
        let old = snap(json!({"Focus": ["energy"]}));
        let new = snap(json!({}));
        let changes = compute_changes(Some(&old), Some(&new));
        assert_eq!(changes["Focus"], change(json!(["energy"]), json!([])));
    }

    #[test]
    fn change_set_serializes_as_from_to_objects() {
        let old = snap(json!({"Name": "Foo"}));
        let new = snap(json!({"Name": "Bar"}));
        let value = serde_json::to_value(compute_changes(Some(&old), Some(&new))).unwrap();
        assert_eq!(value, json!({"Name": {"from": "Foo", "to": "Bar"}}));
    }
}
