//! Mapping tables
//!
//! A mapping table pairs each source dot-path with one or more destination
//! dot-paths. Tables deserialize from JSON/YAML objects whose values are
//! either a single destination string or a list of them.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Destination side of one table entry as written in a mapping file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Destinations {
    One(String),
    Many(Vec<String>),
}

impl From<Destinations> for Vec<String> {
    fn from(destinations: Destinations) -> Self {
        match destinations {
            Destinations::One(path) => vec![path],
            Destinations::Many(paths) => paths,
        }
    }
}

/// Source path → destination paths
///
/// Entries are kept sorted by source path so compilation, and therefore the
/// order elements are applied in, is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Destinations>",
    into = "BTreeMap<String, Vec<String>>"
)]
pub struct MappingTable {
    entries: BTreeMap<String, Vec<String>>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a destination for `source`, keeping earlier destinations
    pub fn insert(&mut self, source: impl Into<String>, destination: impl Into<String>) {
        self.entries
            .entry(source.into())
            .or_default()
            .push(destination.into());
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, source: impl Into<String>, destination: impl Into<String>) -> Self {
        self.insert(source, destination);
        self
    }

    /// Destinations configured for `source`
    pub fn get(&self, source: &str) -> Option<&[String]> {
        self.entries.get(source).map(Vec::as_slice)
    }

    /// Every (source, destination) pair in application order
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|(source, destinations)| {
            destinations
                .iter()
                .map(move |destination| (source.as_str(), destination.as_str()))
        })
    }

    /// Number of distinct source paths
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of (source, destination) pairs
    pub fn pair_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Parse a table from a JSON object
    pub fn from_json(value: &serde_json::Value) -> crate::Result<Self> {
        Ok(Self::deserialize(value)?)
    }
}

impl From<BTreeMap<String, Destinations>> for MappingTable {
    fn from(raw: BTreeMap<String, Destinations>) -> Self {
        Self {
            entries: raw
                .into_iter()
                .map(|(source, destinations)| (source, destinations.into()))
                .collect(),
        }
    }
}

impl From<MappingTable> for BTreeMap<String, Vec<String>> {
    fn from(table: MappingTable) -> Self {
        table.entries
    }
}

impl From<BTreeMap<String, Vec<String>>> for MappingTable {
    fn from(entries: BTreeMap<String, Vec<String>>) -> Self {
        Self { entries }
    }
}

impl From<HashMap<String, Vec<String>>> for MappingTable {
    fn from(entries: HashMap<String, Vec<String>>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }
}

impl From<BTreeMap<String, String>> for MappingTable {
    fn from(entries: BTreeMap<String, String>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<HashMap<String, String>> for MappingTable {
    fn from(entries: HashMap<String, String>) -> Self {
        entries.into_iter().collect()
    }
}

impl<S, D> FromIterator<(S, D)> for MappingTable
where
    S: Into<String>,
    D: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (S, D)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (source, destination) in iter {
            table.insert(source, destination);
        }
        table
    }
}
