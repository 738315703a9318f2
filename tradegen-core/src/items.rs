use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::{GeneratorError, Result};

pub type ItemId = u32;

/// One row of the item database dump.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ItemRecord {
    pub id: ItemId,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_original_flag")]
    pub is_original: bool,
}

// The dump writes the flag as 0/1, but booleans and null show up in
// hand-edited files.
#[derive(Deserialize)]
#[serde(untagged)]
enum OriginalFlag {
    Bool(bool),
    Int(i64),
    Float(f64),
}

fn deserialize_original_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let flag = Option::<OriginalFlag>::deserialize(deserializer)?;
    Ok(match flag {
        None => false,
        Some(OriginalFlag::Bool(b)) => b,
        Some(OriginalFlag::Int(n)) => n != 0,
        Some(OriginalFlag::Float(f)) => f != 0.0,
    })
}

pub fn load_items(path: &Path) -> Result<Vec<ItemRecord>> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|source| GeneratorError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Lookup tables built once from the item dump.
///
/// Keys are indexed only for stock (non-original) items and the first item
/// claiming a key keeps it. Names are indexed for every item and a later item
/// with the same name replaces the earlier one.
#[derive(Debug, Default)]
pub struct ItemIndex {
    by_key: HashMap<String, ItemId>,
    by_name: HashMap<String, ItemId>,
    item_count: usize,
}

impl ItemIndex {
    pub fn build(items: &[ItemRecord]) -> Self {
        let mut index = ItemIndex {
            item_count: items.len(),
            ..ItemIndex::default()
        };

        for item in items {
            if !item.is_original {
                if let Some(key) = item.key.as_deref().filter(|k| !k.is_empty()) {
                    index.by_key.entry(key.to_string()).or_insert(item.id);
                }
            }

            if let Some(name) = item.name.as_deref().filter(|n| !n.is_empty()) {
                index.by_name.insert(name.to_string(), item.id);
            }
        }

        index
    }

    pub fn by_key(&self, key: &str) -> Option<ItemId> {
        self.by_key.get(key).copied()
    }

    pub fn by_name(&self, name: &str) -> Option<ItemId> {
        self.by_name.get(name).copied()
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn key_count(&self) -> usize {
        self.by_key.len()
    }

    pub fn name_count(&self) -> usize {
        self.by_name.len()
    }
}
