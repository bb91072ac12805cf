//! Counters collected while applying a shifter

use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened during one `apply` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftStats {
    /// Mapping elements processed
    pub elements: usize,
    /// Elements cut short by a structural error the policy let through
    pub skipped: usize,
    /// Values discovered by extraction, absent ones included
    pub emitted: usize,
    /// Values written into the destination
    pub written: usize,
    /// Emissions not written: suppressed by the reporter, or absent
    pub suppressed: usize,
    /// Writes dropped because the destination had an incompatible shape
    pub conflicts: usize,
}

impl fmt::Display for ShiftStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} elements ({} skipped), {} emitted, {} written, {} suppressed, {} conflicts",
            self.elements, self.skipped, self.emitted, self.written, self.suppressed, self.conflicts
        )
    }
}
