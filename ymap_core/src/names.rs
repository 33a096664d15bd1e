use std::collections::HashMap;

use crate::placement::{ModelHash, PlacementRecord};

/// Looks up a human-readable model name for a numeric hash.
pub trait ModelNameResolver {
    fn resolve(&self, hash: u32) -> Option<String>;
}

impl<F> ModelNameResolver for F
where
    F: Fn(u32) -> Option<String>,
{
    fn resolve(&self, hash: u32) -> Option<String> {
        self(hash)
    }
}

/// Resolver that knows no names; every numeric hash falls back to hex.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoNames;

impl ModelNameResolver for NoNames {
    fn resolve(&self, _hash: u32) -> Option<String> {
        None
    }
}

/// In-memory hash → name table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameTable {
    names: HashMap<u32, String>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, hash: u32, name: impl Into<String>) -> Option<String> {
        self.names.insert(hash, name.into())
    }

    pub fn get(&self, hash: u32) -> Option<&str> {
        self.names.get(&hash).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(u32, String)> for NameTable {
    fn from_iter<T: IntoIterator<Item = (u32, String)>>(iter: T) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

impl ModelNameResolver for NameTable {
    fn resolve(&self, hash: u32) -> Option<String> {
        self.get(hash).map(str::to_string)
    }
}

/// Picks the name written into the canonical map for a record.
///
/// A non-empty model name wins. Numeric hashes go through `resolver` once and
/// fall back to `0x` hex; literal hashes are used as written.
pub fn display_name<R>(record: &PlacementRecord, resolver: &R) -> String
where
    R: ModelNameResolver + ?Sized,
{
    if let Some(name) = record.model_name.as_deref().filter(|n| !n.is_empty()) {
        return name.to_string();
    }

    match &record.model_hash {
        ModelHash::Numeric(hash) => resolver
            .resolve(*hash)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| record.model_hash.to_literal()),
        ModelHash::Literal(text) => text.clone(),
    }
}
