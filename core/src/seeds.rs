#![deny(missing_docs)]

//! # Seed Adapter Contract
//!
//! Optional per-storage-group seed records for the generated stores.
//!
//! Seed records are opaque payloads. The loader is the upstream filter the
//! core contract assumes: only sequence values survive it, so every group
//! lookup yields a list. A group with no entry behaves identically to an
//! explicitly empty list; "missing" is never special-cased.

use crate::error::{AppError, AppResult};
use crate::naming;
use indexmap::IndexMap;
use serde_json::Value;

/// Supplies the seed records for one storage-group key.
pub trait SeedSource {
    /// Records for the given canonical group key; empty when none exist.
    fn records(&self, group: &str) -> Vec<Value>;
}

/// A source with no records for any group.
pub struct EmptySeeds;

impl SeedSource for EmptySeeds {
    fn records(&self, _group: &str) -> Vec<Value> {
        Vec::new()
    }
}

/// Seed records loaded from a YAML/JSON map of group name -> list.
#[derive(Debug, Default)]
pub struct SeedTable {
    entries: IndexMap<String, Vec<Value>>,
}

impl SeedTable {
    /// Parses a seed document. Keys fold to canonical group form so a file
    /// keyed `user_profile` seeds the `UserProfile` group. Map values that
    /// are not sequences are rejected here, before the core ever sees them.
    pub fn parse(text: &str) -> AppResult<Self> {
        let raw: IndexMap<String, Value> = serde_yaml::from_str(text)
            .map_err(|e| AppError::General(format!("failed to parse seed file: {}", e)))?;

        let mut entries = IndexMap::new();
        for (group, value) in raw {
            match value {
                Value::Array(records) => {
                    entries.insert(naming::type_name(&group), records);
                }
                other => {
                    return Err(AppError::General(format!(
                        "seed entry '{}' must be a sequence, got {}",
                        group,
                        value_kind(&other)
                    )));
                }
            }
        }
        Ok(Self { entries })
    }
}

impl SeedSource for SeedTable {
    fn records(&self, group: &str) -> Vec<Value> {
        self.entries
            .get(&naming::type_name(group))
            .cloned()
            .unwrap_or_default()
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_group_equals_empty_list() {
        let table = SeedTable::parse("pets:\n  - {name: Rex}\n").unwrap();
        assert_eq!(table.records("Pets"), vec![json!({"name": "Rex"})]);
        assert_eq!(table.records("Owners"), Vec::<Value>::new());
        assert_eq!(EmptySeeds.records("Pets"), Vec::<Value>::new());
    }

    #[test]
    fn test_group_keys_fold_to_canonical_form() {
        let table = SeedTable::parse("user_profile:\n  - {bio: hi}\n").unwrap();
        assert_eq!(table.records("UserProfile").len(), 1);
        assert_eq!(table.records("user-profile").len(), 1);
    }

    #[test]
    fn test_non_sequence_values_are_rejected() {
        let err = SeedTable::parse("pets: 42\n").unwrap_err();
        assert!(format!("{}", err).contains("must be a sequence"));
    }
}
