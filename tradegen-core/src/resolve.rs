use log::warn;
use serde::{Deserialize, Serialize};

use crate::items::{ItemId, ItemIndex};

/// Namespace tried as a fallback for bare keys such as `diamond`.
pub const KEY_NAMESPACE: &str = "minecraft:";

/// A reference to an item as written in a catalog definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemRef {
    /// Namespaced key of a stock item, e.g. `minecraft:diamond`.
    Key(String),
    /// Display name of an item, typically a custom one.
    Name(String),
}

impl ItemRef {
    pub fn key(key: impl Into<String>) -> Self {
        ItemRef::Key(key.into())
    }

    pub fn name(name: impl Into<String>) -> Self {
        ItemRef::Name(name.into())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RefScheme {
    Key,
    Name,
}

/// Receives a notification for every reference that failed to resolve.
pub trait MissReporter {
    fn missing(&self, scheme: RefScheme, reference: &str);
}

/// Reports misses as `warn` records on the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl MissReporter for LogReporter {
    fn missing(&self, scheme: RefScheme, reference: &str) {
        match scheme {
            RefScheme::Key => warn!("Key not found: {reference}"),
            RefScheme::Name => warn!("Original item name not found: {reference}"),
        }
    }
}

pub struct Resolver<'a> {
    index: &'a ItemIndex,
    reporter: &'a dyn MissReporter,
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a ItemIndex, reporter: &'a dyn MissReporter) -> Self {
        Self { index, reporter }
    }

    /// Look up a namespaced key, retrying with [`KEY_NAMESPACE`] prepended
    /// when the key has no namespace. An empty or absent key is not a miss.
    pub fn resolve_key(&self, key: Option<&str>) -> Option<ItemId> {
        let key = key.filter(|k| !k.is_empty())?;

        if let Some(id) = self.index.by_key(key) {
            return Some(id);
        }

        if !key.starts_with(KEY_NAMESPACE) {
            let namespaced = format!("{KEY_NAMESPACE}{key}");
            if let Some(id) = self.index.by_key(&namespaced) {
                return Some(id);
            }
        }

        self.reporter.missing(RefScheme::Key, key);
        None
    }

    pub fn resolve_name(&self, name: &str) -> Option<ItemId> {
        let id = self.index.by_name(name);
        if id.is_none() {
            self.reporter.missing(RefScheme::Name, name);
        }
        id
    }

    pub fn resolve(&self, reference: &ItemRef) -> Option<ItemId> {
        match reference {
            ItemRef::Key(key) => self.resolve_key(Some(key.as_str())),
            ItemRef::Name(name) => self.resolve_name(name),
        }
    }
}
