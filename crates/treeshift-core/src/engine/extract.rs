//! Extraction engine
//!
//! Walks a source document along a compiled term list and streams every
//! terminal value together with the destination path it resolves to.
//!
//! Copyright (c) 2025 Treeshift Team
//! Licensed under the Apache-2.0 license

use crate::node::{is_absent, NodeKind};
use crate::path::{DestinationPath, Term};
use crate::{Error, Result};
use serde_json::Value;

/// Walk `node` along `terms`, calling `emit` once per discovered value
///
/// Values are streamed rather than collected. The emitted value is `None`
/// when the path ran through a missing key (or `null`): remaining key terms
/// still extend the destination path so a reporter can supply a value, but a
/// sequence term reached while absent ends the branch silently.
///
/// A sequence node met by a non-sequence term is descended leniently: only
/// its first element is searched, with the term still pending. This is a
/// compatibility policy, not schema inference; mappings that need every
/// element must mark the segment with `[]`.
///
/// Fails with [`Error::StructuralMismatch`] when a scalar sits where a term
/// still expects a container.
pub fn extract<'a, F>(
    terms: &[Term],
    prefix: &DestinationPath,
    node: Option<&'a Value>,
    emit: &mut F,
) -> Result<()>
where
    F: FnMut(DestinationPath, Option<&'a Value>),
{
    let Some((term, rest)) = terms.split_first() else {
        emit(prefix.clone(), if is_absent(node) { None } else { node });
        return Ok(());
    };

    match node {
        None | Some(Value::Null) => {
            propagate_absence(terms, prefix.clone(), emit);
            Ok(())
        }
        Some(Value::Object(map)) => {
            let child = map.get(term.name());
            let path = prefix.extended(term.contribution());
            if term.is_sequence() {
                // consumed only once the child is confirmed to be a sequence
                extract(terms, &path, child, emit)
            } else {
                extract(rest, &path, child, emit)
            }
        }
        Some(Value::Array(items)) => {
            if term.is_sequence() {
                for (index, item) in items.iter().enumerate() {
                    extract(rest, &prefix.with_last_index(index), Some(item), emit)?;
                }
                Ok(())
            } else {
                match items.first() {
                    Some(first) => extract(terms, prefix, Some(first), emit),
                    None => Ok(()),
                }
            }
        }
        Some(scalar) => {
            let (expected, path) = if term.is_sequence() {
                (NodeKind::Array, prefix.to_string())
            } else {
                (NodeKind::Object, prefix.render_with(term.destination()))
            };
            Err(Error::structural(expected, NodeKind::of(scalar), path))
        }
    }
}

fn propagate_absence<'a, F>(terms: &[Term], mut path: DestinationPath, emit: &mut F)
where
    F: FnMut(DestinationPath, Option<&'a Value>),
{
    for term in terms {
        if term.is_sequence() {
            return;
        }
        path.extend_from(term.contribution());
    }
    emit(path, None);
}

/// Collect every emission of [`extract`] into a vector
pub fn extract_all<'a>(
    terms: &[Term],
    node: &'a Value,
) -> Result<Vec<(DestinationPath, Option<&'a Value>)>> {
    let mut emissions = Vec::new();
    extract(terms, &DestinationPath::root(), Some(node), &mut |path, value| {
        emissions.push((path, value))
    })?;
    Ok(emissions)
}
