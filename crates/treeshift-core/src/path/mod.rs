//! Dot-path compilation
//!
//! Mapping tables pair a source dot-path with one or more destination
//! dot-paths. This module compiles each pair into an ordered list of
//! [`Term`]s and defines the destination path values the engines build
//! while walking a document.
//!
//! Copyright (c) 2025 Treeshift Team
//! Licensed under the Apache-2.0 license

pub mod compiler;
pub mod table;
pub mod term;


pub use compiler::{compile, compile_pair};
pub use table::{Destinations, MappingTable};
pub use term::{MappingElement, Term};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Suffix marking a path segment as an iteration point
pub const SEQUENCE_MARKER: &str = "[]";

/// Separator between path segments
pub const SEGMENT_SEPARATOR: char = '.';

/// One step of a destination path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Key inside a keyed container
    Key(String),
    /// Position inside an ordered sequence
    Index(usize),
}

impl PathSegment {
    pub fn key(key: impl Into<String>) -> Self {
        PathSegment::Key(key.into())
    }

    pub fn is_index(&self) -> bool {
        matches!(self, PathSegment::Index(_))
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Resolved location in the destination document
///
/// Every recursive branch of an extraction owns its own path; fan-out
/// produces a fresh path per sequence element instead of rewriting a
/// shared one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DestinationPath {
    segments: Vec<PathSegment>,
}

impl DestinationPath {
    /// The empty path, addressing the document root
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append segments in place
    pub fn extend_from(&mut self, segments: &[PathSegment]) {
        self.segments.extend_from_slice(segments);
    }

    /// A new path with `segments` appended
    pub fn extended(&self, segments: &[PathSegment]) -> Self {
        let mut path = Self {
            segments: Vec::with_capacity(self.segments.len() + segments.len()),
        };
        path.segments.extend_from_slice(&self.segments);
        path.segments.extend_from_slice(segments);
        path
    }

    /// A new path whose trailing index placeholder is set to `index`
    ///
    /// If the path does not end in an index (a sequence reached without a
    /// preceding key lookup, e.g. an array document root) the index is
    /// appended instead.
    pub fn with_last_index(&self, index: usize) -> Self {
        let mut path = self.clone();
        match path.segments.last_mut() {
            Some(PathSegment::Index(slot)) => *slot = index,
            _ => path.segments.push(PathSegment::Index(index)),
        }
        path
    }

    /// Render this path followed by not-yet-resolved key segments
    pub fn render_with(&self, pending: &[String]) -> String {
        let mut rendered = self.to_string();
        for key in pending {
            if !rendered.is_empty() {
                rendered.push(SEGMENT_SEPARATOR);
            }
            rendered.push_str(key);
        }
        rendered
    }
}

impl From<Vec<PathSegment>> for DestinationPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }
}

impl fmt::Display for DestinationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) => {
                    if i > 0 {
                        write!(f, "{}", SEGMENT_SEPARATOR)?;
                    }
                    write!(f, "{}", key)?;
                }
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

/// Split a dot-path into its raw segments
pub(crate) fn split_path(path: &str) -> Vec<&str> {
    path.split(SEGMENT_SEPARATOR).collect()
}

/// Whether a raw segment carries the sequence marker
pub(crate) fn is_sequence_segment(segment: &str) -> bool {
    segment.ends_with(SEQUENCE_MARKER)
}

/// Strip the sequence marker from a raw segment
pub(crate) fn strip_marker(segment: &str) -> &str {
    segment.strip_suffix(SEQUENCE_MARKER).unwrap_or(segment)
}

/// Count the sequence markers of a dot-path
pub fn sequence_depth(path: &str) -> usize {
    split_path(path)
        .into_iter()
        .filter(|segment| is_sequence_segment(segment))
        .count()
}
