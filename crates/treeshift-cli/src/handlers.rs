//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod apply;
mod check;
mod completions;
mod plan;
mod utils;

pub use apply::handle_apply;
pub use check::handle_check;
pub use completions::handle_completions;
pub use plan::handle_plan;
