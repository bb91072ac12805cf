//! Compiled matching steps
//!
//! A [`Term`] is one step of a compiled source path: the key to look up at the
//! current level and the destination segments it contributes once matched.
//! A [`MappingElement`] is the full term list of one (source, destination)
//! pair.

use super::PathSegment;
use serde::Serialize;
use std::fmt;

/// One compiled matching step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Term {
    name: String,
    is_sequence: bool,
    destination: Vec<String>,
    /// Destination segments plus the index placeholder for sequence terms
    #[serde(skip)]
    contribution: Vec<PathSegment>,
}

impl Term {
    pub fn new(name: impl Into<String>, is_sequence: bool, destination: Vec<String>) -> Self {
        let mut contribution: Vec<PathSegment> = destination
            .iter()
            .map(|key| PathSegment::Key(key.clone()))
            .collect();
        if is_sequence {
            contribution.push(PathSegment::Index(0));
        }
        Self {
            name: name.into(),
            is_sequence,
            destination,
            contribution,
        }
    }

    /// A term matching a plain key
    pub fn field(name: impl Into<String>, destination: Vec<String>) -> Self {
        Self::new(name, false, destination)
    }

    /// A term matching a key whose value is iterated
    pub fn sequence(name: impl Into<String>, destination: Vec<String>) -> Self {
        Self::new(name, true, destination)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_sequence(&self) -> bool {
        self.is_sequence
    }

    /// Destination keys this term appends, in order
    pub fn destination(&self) -> &[String] {
        &self.destination
    }

    pub(crate) fn contribution(&self) -> &[PathSegment] {
        &self.contribution
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.is_sequence { "[]" } else { "" };
        write!(f, "{}{} -> [{}]", self.name, marker, self.destination.join(", "))
    }
}

/// One compiled (source path, destination path) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingElement {
    terms: Vec<Term>,
    source_path: String,
    destination_path: String,
}

impl MappingElement {
    pub fn new(
        terms: Vec<Term>,
        source_path: impl Into<String>,
        destination_path: impl Into<String>,
    ) -> Self {
        Self {
            terms,
            source_path: source_path.into(),
            destination_path: destination_path.into(),
        }
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Source path as written in the mapping table
    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    /// Destination path as written in the mapping table
    pub fn destination_path(&self) -> &str {
        &self.destination_path
    }

    /// Number of sequence terms, i.e. levels of fan-out
    pub fn fan_out_depth(&self) -> usize {
        self.terms.iter().filter(|term| term.is_sequence()).count()
    }
}

impl fmt::Display for MappingElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.source_path, self.destination_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_term_contribution() {
        let term = Term::sequence("items", vec!["out".into(), "list".into()]);
        assert_eq!(
            term.contribution(),
            &[
                PathSegment::key("out"),
                PathSegment::key("list"),
                PathSegment::Index(0)
            ]
        );
        assert_eq!(term.to_string(), "items[] -> [out, list]");
    }

    #[test]
    fn test_field_term_without_destination() {
        let term = Term::field("skipped", vec![]);
        assert!(term.contribution().is_empty());
        assert!(!term.is_sequence());
    }

    #[test]
    fn test_element_fan_out_depth() {
        let element = MappingElement::new(
            vec![
                Term::sequence("a", vec!["x".into()]),
                Term::sequence("b", vec!["y".into()]),
                Term::field("c", vec!["z".into()]),
            ],
            "a[].b[].c",
            "x[].y[].z",
        );
        assert_eq!(element.fan_out_depth(), 2);
        assert_eq!(element.to_string(), "a[].b[].c => x[].y[].z");
    }
}
