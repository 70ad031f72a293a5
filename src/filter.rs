//! Predicate filtering over device state records.
//!
//! Pure helpers used by the query surface to narrow ARP/MAC/LLDP tables
//! down to the entries a caller asked for. Matching is exact `Value`
//! equality with no coercion: filtering a numeric `vlan` field with the
//! string `"10"` matches nothing.

use serde_json::Value;

use crate::driver::{GroupedRecords, Record};

/// Returns, in original order, every record whose field `key` equals `value`.
///
/// Records missing the key never match. Empty input yields empty output.
pub fn filter_records(records: &[Record], key: &str, value: &Value) -> Vec<Record> {
    records
        .iter()
        .filter(|record| record.get(key) == Some(value))
        .cloned()
        .collect()
}

/// Applies [`filter_records`] to each group's record list.
///
/// A group whose filtered list is empty is omitted entirely from the result
/// rather than kept as an empty list. Surviving keys keep the input map's
/// iteration order.
pub fn filter_grouped_records(
    groups: &GroupedRecords,
    key: &str,
    value: &Value,
) -> GroupedRecords {
    let mut filtered = GroupedRecords::new();
    for (group, records) in groups {
        let kept = filter_records(records, key, value);
        if !kept.is_empty() {
            filtered.insert(group.clone(), kept);
        }
    }
    filtered
}
