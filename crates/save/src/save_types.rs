//! On-disk save record.
//!
//! The record is a flat JSON object of parallel arrays:
//!
//! ```json
//! {"collectedKeys":["Железо"],"collectedValues":[12],
//!  "buildingIds":["iron_mine"],"buildingStored":[40]}
//! ```
//!
//! Missing fields default to empty arrays. Mismatched array lengths are
//! truncated to the shorter one when the record is applied.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::save_error::SaveError;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveRecord {
    pub collected_keys: Vec<String>,
    pub collected_values: Vec<u32>,
    pub building_ids: Vec<String>,
    pub building_stored: Vec<u32>,
}

impl SaveRecord {
    pub fn from_maps(collected: &BTreeMap<String, u32>, buildings: &BTreeMap<String, u32>) -> Self {
        Self {
            collected_keys: collected.keys().cloned().collect(),
            collected_values: collected.values().copied().collect(),
            building_ids: buildings.keys().cloned().collect(),
            building_stored: buildings.values().copied().collect(),
        }
    }

    /// Collected totals; later duplicates win.
    pub fn collected_map(&self) -> BTreeMap<String, u32> {
        zip_to_map(&self.collected_keys, &self.collected_values)
    }

    /// Stored amount per building save id; later duplicates win.
    pub fn building_map(&self) -> BTreeMap<String, u32> {
        zip_to_map(&self.building_ids, &self.building_stored)
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        serde_json::to_string(self).map_err(|e| SaveError::Encode(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SaveError> {
        if json.trim().is_empty() {
            return Err(SaveError::NoData);
        }
        Ok(serde_json::from_str(json)?)
    }
}

fn zip_to_map(keys: &[String], values: &[u32]) -> BTreeMap<String, u32> {
    keys.iter()
        .zip(values.iter())
        .map(|(k, v)| (k.clone(), *v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_uses_camel_case_parallel_arrays() {
        let mut collected = BTreeMap::new();
        collected.insert("Железо".to_string(), 12);
        let mut buildings = BTreeMap::new();
        buildings.insert("iron_mine".to_string(), 40);
        let json = SaveRecord::from_maps(&collected, &buildings)
            .to_json()
            .unwrap();
        assert_eq!(
            json,
            r#"{"collectedKeys":["Железо"],"collectedValues":[12],"buildingIds":["iron_mine"],"buildingStored":[40]}"#
        );
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let record = SaveRecord::from_json(r#"{"collectedKeys":["a"],"collectedValues":[1]}"#)
            .unwrap();
        assert_eq!(record.collected_map().get("a"), Some(&1));
        assert!(record.building_ids.is_empty());
        assert!(record.building_map().is_empty());
    }

    #[test]
    fn test_mismatched_lengths_zip_to_shorter() {
        let record = SaveRecord {
            collected_keys: vec!["a".into(), "b".into(), "c".into()],
            collected_values: vec![1, 2],
            building_ids: vec!["x".into()],
            building_stored: vec![5, 6, 7],
        };
        let collected = record.collected_map();
        assert_eq!(collected.len(), 2);
        assert_eq!(collected.get("c"), None);
        let buildings = record.building_map();
        assert_eq!(buildings.len(), 1);
        assert_eq!(buildings.get("x"), Some(&5));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let record = SaveRecord {
            collected_keys: vec!["a".into(), "a".into()],
            collected_values: vec![1, 9],
            ..Default::default()
        };
        assert_eq!(record.collected_map().get("a"), Some(&9));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = SaveRecord::from_json("not json at all").unwrap_err();
        assert!(err.is_decode(), "got {err:?}");
        let err = SaveRecord::from_json(r#"{"collectedValues":[-3]}"#).unwrap_err();
        assert!(err.is_decode(), "negative amounts are rejected, got {err:?}");
    }

    #[test]
    fn test_blank_blob_is_no_data() {
        assert!(matches!(SaveRecord::from_json("  "), Err(SaveError::NoData)));
    }
}
