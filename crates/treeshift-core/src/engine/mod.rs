//! Tree algorithms consuming compiled plans
//!
//! [`extract`] reads values out of a source document along a term list and
//! [`insert`] writes them into the destination document.

pub mod extract;
pub mod insert;

pub use extract::{extract, extract_all};
pub use insert::{insert, TreeBuilder};
