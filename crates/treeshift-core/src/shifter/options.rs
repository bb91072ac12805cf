//! Per-call configuration for applying a shifter

use crate::Error;
use serde_json::Value;
use std::fmt;

/// Intercepts every discovered value before it is written
///
/// Called with the element's source path and destination path as written in
/// the mapping table, plus the discovered value (`None` when absent).
/// Returning `None` suppresses the write; returning `Some` writes the
/// returned value instead of the discovered one.
pub type Reporter<'a> = Box<dyn FnMut(&str, &str, Option<&Value>) -> Option<Value> + 'a>;

/// Decides whether a structural error skips the element (`true`) or aborts
pub type ErrorPolicy<'a> = Box<dyn FnMut(&Error) -> bool + 'a>;

/// Options for one `apply` call
///
/// The default starts from an empty object, writes every discovered value
/// unchanged and aborts on the first structural error.
#[derive(Default)]
pub struct ShiftOptions<'a> {
    /// Existing document to merge writes into instead of a fresh object
    pub destination: Option<Value>,
    /// Value interceptor, see [`Reporter`]
    pub reporter: Option<Reporter<'a>>,
    /// Error continuation policy, see [`ErrorPolicy`]
    pub on_error: Option<ErrorPolicy<'a>>,
}

impl<'a> ShiftOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge writes into `destination`
    ///
    /// The document is moved into the shift. If the shift aborts it is
    /// dropped along with the writes of earlier elements; use
    /// [`Shifter::apply_into`](crate::Shifter::apply_into) to keep them.
    pub fn with_destination(mut self, destination: Value) -> Self {
        self.destination = Some(destination);
        self
    }

    /// Route every discovered value through `reporter`
    pub fn with_reporter<F>(mut self, reporter: F) -> Self
    where
        F: FnMut(&str, &str, Option<&Value>) -> Option<Value> + 'a,
    {
        self.reporter = Some(Box::new(reporter));
        self
    }

    /// Consult `policy` on structural errors
    pub fn with_error_policy<F>(mut self, policy: F) -> Self
    where
        F: FnMut(&Error) -> bool + 'a,
    {
        self.on_error = Some(Box::new(policy));
        self
    }

    /// Skip failing elements instead of aborting
    pub fn continue_on_error(self) -> Self {
        self.with_error_policy(|_| true)
    }
}

impl fmt::Debug for ShiftOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShiftOptions")
            .field("destination", &self.destination)
            .field("reporter", &self.reporter.as_ref().map(|_| "<fn>"))
            .field("on_error", &self.on_error.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
