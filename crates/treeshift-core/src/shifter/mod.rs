//! Shift orchestration
//!
//! A [`Shifter`] owns the compiled mapping elements of one table. Applying it
//! runs extraction per element, passes every discovered value through the
//! caller's reporter, and commits the survivors to the destination document.
//!
//! Copyright (c) 2025 Treeshift Team
//! Licensed under the Apache-2.0 license

pub mod options;
pub mod stats;

pub use options::{ErrorPolicy, Reporter, ShiftOptions};
pub use stats::ShiftStats;

use crate::engine::{extract, TreeBuilder};
use crate::path::{compile, DestinationPath, MappingElement, MappingTable};
use crate::Result;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Compiled, reusable remapping plan
///
/// Elements are compiled once at construction and never change, so one
/// shifter can serve any number of `apply` calls, including concurrent ones
/// from several threads.
#[derive(Debug, Clone)]
pub struct Shifter {
    elements: Vec<MappingElement>,
}

impl Shifter {
    /// Compile a mapping table
    ///
    /// Accepts single-destination maps (`source -> destination`),
    /// multi-destination maps (`source -> [destination, ..]`) or a
    /// [`MappingTable`]. Fails without producing a shifter if any pair has
    /// mismatched sequence markers.
    pub fn new(table: impl Into<MappingTable>) -> Result<Self> {
        let table = table.into();
        let elements = compile(&table)?;
        Ok(Self { elements })
    }

    /// Compile a mapping table given as a JSON object
    pub fn from_json(mapping: &Value) -> Result<Self> {
        Self::new(MappingTable::from_json(mapping)?)
    }

    /// The compiled plan, in application order
    pub fn elements(&self) -> &[MappingElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Reshape `source` into a new document
    pub fn apply(&self, source: &Value, options: ShiftOptions<'_>) -> Result<Value> {
        self.apply_with_stats(source, options)
            .map(|(document, _)| document)
    }

    /// Reshape `source` and report what happened
    pub fn apply_with_stats(
        &self,
        source: &Value,
        mut options: ShiftOptions<'_>,
    ) -> Result<(Value, ShiftStats)> {
        let mut document = options
            .destination
            .take()
            .unwrap_or_else(|| Value::Object(Map::new()));
        let stats = self.apply_into(source, &mut document, options)?;
        Ok((document, stats))
    }

    /// Merge the reshaped `source` into a caller-owned document
    ///
    /// `options.destination` is ignored; `destination` is written to instead.
    /// Each element's writes are committed only once its extraction is done,
    /// so after an abort `destination` holds exactly the writes of the
    /// elements before the failing one.
    pub fn apply_into(
        &self,
        source: &Value,
        destination: &mut Value,
        options: ShiftOptions<'_>,
    ) -> Result<ShiftStats> {
        let ShiftOptions {
            destination: ignored,
            mut reporter,
            mut on_error,
        } = options;
        if ignored.is_some() {
            debug!("Destination option ignored, merging into the provided document");
        }

        let mut builder = TreeBuilder::new();
        let mut stats = ShiftStats::default();

        for element in &self.elements {
            stats.elements += 1;
            let mut pending: Vec<(DestinationPath, Value)> = Vec::new();

            let outcome = extract(
                element.terms(),
                &DestinationPath::root(),
                Some(source),
                &mut |path, value| {
                    stats.emitted += 1;
                    let value = match reporter.as_mut() {
                        Some(report) => {
                            report(element.source_path(), element.destination_path(), value)
                        }
                        None => value.cloned(),
                    };
                    match value {
                        Some(value) if !value.is_null() => pending.push((path, value)),
                        _ => stats.suppressed += 1,
                    }
                },
            );

            if let Err(err) = outcome {
                let proceed = on_error.as_mut().is_some_and(|policy| policy(&err));
                if !proceed {
                    warn!(
                        source = element.source_path(),
                        destination = element.destination_path(),
                        error = %err,
                        "Aborting shift"
                    );
                    return Err(err);
                }
                debug!(
                    source = element.source_path(),
                    destination = element.destination_path(),
                    error = %err,
                    "Skipping rest of mapping element"
                );
                stats.skipped += 1;
            }

            for (path, value) in pending {
                let conflicts = builder.conflicts();
                let root = std::mem::take(destination);
                *destination = builder.insert(root, path.segments(), value);
                if builder.conflicts() == conflicts {
                    stats.written += 1;
                }
            }
        }

        stats.conflicts = builder.conflicts();
        debug!(stats = %stats, "Shift completed");
        Ok(stats)
    }
}
