//! Treeshift Core - structural remapping engine for JSON trees
//!
//! This crate compiles declarative dot-path mappings (`source.path` →
//! `destination.path`) into reusable plans and applies them to documents,
//! renaming, nesting, flattening and fanning out across sequences.
//!
//! # Main Components
//!
//! - **Path Compiler**: turns each mapping pair into an ordered list of terms
//! - **Extraction Engine**: walks a source document along the terms
//! - **Tree Builder**: writes discovered values into the destination tree
//! - **Shifter**: drives the above per mapping element, with reporter and
//!   error-continuation hooks
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use treeshift_core::{MappingTable, ShiftOptions, Shifter};
//!
//! let shifter = Shifter::new(
//!     MappingTable::new()
//!         .with("user.name", "profile.display_name")
//!         .with("user.emails[].address", "contact[].email"),
//! )?;
//!
//! let result = shifter.apply(
//!     &json!({"user": {"name": "Ada", "emails": [{"address": "ada@example.com"}]}}),
//!     ShiftOptions::default(),
//! )?;
//!
//! assert_eq!(result, json!({
//!     "profile": {"display_name": "Ada"},
//!     "contact": [{"email": "ada@example.com"}]
//! }));
//! # Ok::<(), treeshift_core::Error>(())
//! ```

pub mod engine;
pub mod error;
pub mod node;
pub mod path;
pub mod shifter;

mod proptest_strategies;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use node::NodeKind;
pub use path::{
    compile, compile_pair, DestinationPath, Destinations, MappingElement, MappingTable,
    PathSegment, Term,
};
pub use shifter::{ErrorPolicy, Reporter, ShiftOptions, ShiftStats, Shifter};

use serde_json::Value;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compile `mapping` and apply it once with default options
pub fn shift(mapping: impl Into<MappingTable>, source: &Value) -> Result<Value> {
    Shifter::new(mapping)?.apply(source, ShiftOptions::default())
}
