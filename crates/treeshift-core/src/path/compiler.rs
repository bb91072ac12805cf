//! Path compiler
//!
//! Turns (source, destination) dot-path pairs into ordered [`Term`] lists.
//! Both paths are cut at their `[]` markers; each marker-free range is zipped
//! segment by segment and every marker pair becomes one sequence term.
//!
//! Copyright (c) 2025 Treeshift Team
//! Licensed under the Apache-2.0 license

use super::table::MappingTable;
use super::term::{MappingElement, Term};
use super::{is_sequence_segment, split_path, strip_marker};
use crate::{Error, Result};
use tracing::{debug, trace};

/// Compile every pair of a mapping table
///
/// Fails on the first pair whose sequence marker counts differ; no elements
/// are returned in that case.
pub fn compile(table: &MappingTable) -> Result<Vec<MappingElement>> {
    let mut elements = Vec::with_capacity(table.pair_count());

    for (source, destination) in table.pairs() {
        let terms = compile_pair(source, destination)?;
        trace!(
            source = source,
            destination = destination,
            terms = terms.len(),
            "Compiled mapping element"
        );
        elements.push(MappingElement::new(terms, source, destination));
    }

    debug!(elements = elements.len(), "Compiled mapping table");
    Ok(elements)
}

/// Compile one source/destination pair into its term list
pub fn compile_pair(source_path: &str, destination_path: &str) -> Result<Vec<Term>> {
    let source = split_path(source_path);
    let destination = split_path(destination_path);

    let source_markers = marker_positions(&source);
    let destination_markers = marker_positions(&destination);
    if source_markers.len() != destination_markers.len() {
        return Err(Error::array_arity(
            source_path,
            destination_path,
            source_markers.len(),
            destination_markers.len(),
        ));
    }

    let mut terms = Vec::with_capacity(source.len());
    let mut source_start = 0;
    let mut destination_start = 0;

    for (&source_at, &destination_at) in source_markers.iter().zip(&destination_markers) {
        terms.extend(zip(
            &source[source_start..source_at],
            &destination[destination_start..destination_at],
        ));

        // A leading destination prefix with no source counterpart would be
        // lost by the zip; it rides on the first sequence term instead.
        let mut keys: Vec<String> = Vec::new();
        if terms.is_empty() {
            keys.extend(
                destination[destination_start..destination_at]
                    .iter()
                    .map(|segment| segment.to_string()),
            );
        }
        keys.push(strip_marker(destination[destination_at]).to_string());
        terms.push(Term::sequence(strip_marker(source[source_at]), keys));

        source_start = source_at + 1;
        destination_start = destination_at + 1;
    }

    terms.extend(zip(&source[source_start..], &destination[destination_start..]));
    Ok(terms)
}

fn marker_positions(segments: &[&str]) -> Vec<usize> {
    segments
        .iter()
        .enumerate()
        .filter(|(_, segment)| is_sequence_segment(segment))
        .map(|(i, _)| i)
        .collect()
}

/// Zip a marker-free range: one term per source segment
fn zip(source: &[&str], destination: &[&str]) -> Vec<Term> {
    let last = source.len().saturating_sub(1);

    source
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let keys: &[&str] = if destination.is_empty() {
                &[]
            } else if source.len() == destination.len() {
                &destination[i..=i]
            } else if source.len() > destination.len() {
                let tail = destination.len() - 1;
                if i < tail {
                    &destination[i..=i]
                } else if i == last {
                    &destination[tail..]
                } else {
                    // excess source levels are walked but flattened away
                    &[]
                }
            } else if i == last {
                &destination[i..]
            } else {
                &destination[i..=i]
            };
            Term::field(*name, keys.iter().map(|key| key.to_string()).collect())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn describe(terms: &[Term]) -> Vec<String> {
        terms.iter().map(Term::to_string).collect()
    }

    #[test]
    fn test_equal_length_paths() {
        let terms = compile_pair("a.b.c", "x.y.z").unwrap();
        assert_eq!(describe(&terms), vec!["a -> [x]", "b -> [y]", "c -> [z]"]);
    }

    #[test]
    fn test_longer_source_flattens_middle() {
        let terms = compile_pair("a.b.c.d", "x.y").unwrap();
        assert_eq!(
            describe(&terms),
            vec!["a -> [x]", "b -> []", "c -> []", "d -> [y]"]
        );

        let terms = compile_pair("root.lvl1.lvl2.lvl3", "replaced.lvl3_mapped").unwrap();
        assert_eq!(
            describe(&terms),
            vec![
                "root -> [replaced]",
                "lvl1 -> []",
                "lvl2 -> []",
                "lvl3 -> [lvl3_mapped]"
            ]
        );
    }

    #[test]
    fn test_longer_source_single_destination() {
        let terms = compile_pair("a.b.c", "x").unwrap();
        assert_eq!(describe(&terms), vec!["a -> []", "b -> []", "c -> [x]"]);
    }

    #[test]
    fn test_shorter_source_expands_last() {
        let terms = compile_pair("a", "x.y.z").unwrap();
        assert_eq!(describe(&terms), vec!["a -> [x, y, z]"]);

        let terms = compile_pair("a.b", "x.y.z").unwrap();
        assert_eq!(describe(&terms), vec!["a -> [x]", "b -> [y, z]"]);
    }

    #[test]
    fn test_single_sequence_marker() {
        let terms = compile_pair("root.arr1[].key", "replaced.arr1[].key").unwrap();
        assert_eq!(
            describe(&terms),
            vec!["root -> [replaced]", "arr1[] -> [arr1]", "key -> [key]"]
        );
    }

    #[test]
    fn test_leading_destination_prefix_is_kept() {
        let terms = compile_pair("items[].name", "out.list[].label").unwrap();
        assert_eq!(
            describe(&terms),
            vec!["items[] -> [out, list]", "name -> [label]"]
        );
    }

    #[test]
    fn test_nested_sequence_markers() {
        let terms = compile_pair("a[].b[].c", "x[].y[].z").unwrap();
        assert_eq!(
            describe(&terms),
            vec!["a[] -> [x]", "b[] -> [y]", "c -> [z]"]
        );
    }

    #[test]
    fn test_sequence_with_unequal_ranges() {
        let terms = compile_pair("root.lvl1.imaginaryArr2[].struct.subval1", "replaced.arr2[].val1")
            .unwrap();
        assert_eq!(
            describe(&terms),
            vec![
                "root -> []",
                "lvl1 -> [replaced]",
                "imaginaryArr2[] -> [arr2]",
                "struct -> []",
                "subval1 -> [val1]"
            ]
        );
    }

    #[test]
    fn test_empty_destination_range() {
        let terms = compile_pair("a[].b.c", "x[]").unwrap();
        assert_eq!(describe(&terms), vec!["a[] -> [x]", "b -> []", "c -> []"]);
    }

    #[test]
    fn test_arity_mismatch() {
        let err = compile_pair("a[].b", "x.y").unwrap_err();
        match err {
            Error::ArrayArityMismatch {
                source_path,
                destination_path,
                source_markers,
                destination_markers,
            } => {
                assert_eq!(source_path, "a[].b");
                assert_eq!(destination_path, "x.y");
                assert_eq!(source_markers, 1);
                assert_eq!(destination_markers, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_compile_fails_whole_table() {
        let table = MappingTable::new()
            .with("a.b", "x")
            .with("c[]", "y.z");
        assert!(compile(&table).is_err());
    }

    #[test]
    fn test_compile_multi_destination() {
        let table = MappingTable::new()
            .with("user.name", "profile.name")
            .with("user.name", "audit.actor");
        let elements = compile(&table).unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].destination_path(), "profile.name");
        assert_eq!(elements[1].destination_path(), "audit.actor");
        assert!(elements.iter().all(|e| e.source_path() == "user.name"));
    }
}
