//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable) with specialized
//! support for shift results, statistics and compiled plans.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use std::io::{self, Write};
use tracing::{debug, trace};
use treeshift_core::{MappingElement, ShiftStats};

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format shift statistics
    fn format_stats(&self, stats: &ShiftStats) -> Result<String>;

    /// Format a compiled plan
    fn format_plan(&self, elements: &[MappingElement], show_terms: bool) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            // Documents read best as pretty JSON
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_stats(&self, stats: &ShiftStats) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_stats_human(stats)),
            _ => self.format(stats),
        }
    }

    fn format_plan(&self, elements: &[MappingElement], show_terms: bool) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_plan_human(elements, show_terms)),
            _ => self.format(&elements),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writer(format, use_color, quiet, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
        }
    }

    /// Whether output is meant for a person rather than a parser
    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), "Outputting data");

        if formatted.ends_with('\n') {
            self.write(&formatted)
        } else {
            self.writeln(&formatted)
        }
    }

    /// Write a reshaped document
    pub fn document(&mut self, document: &Value) -> Result<()> {
        self.data(document)
    }

    /// Write shift statistics
    pub fn stats(&mut self, stats: &ShiftStats) -> Result<()> {
        let formatted = self.format.format_stats(stats)?;
        self.writeln(formatted.trim_end())
    }

    /// Write a compiled plan
    pub fn plan(&mut self, elements: &[MappingElement], show_terms: bool) -> Result<()> {
        let formatted = self.format.format_plan(elements, show_terms)?;
        self.writeln(formatted.trim_end())
    }
}

/// Format shift statistics for human reading
fn format_stats_human(stats: &ShiftStats) -> String {
    let mut output = String::new();
    output.push_str(&format!("  Elements:   {}\n", stats.elements));
    output.push_str(&format!("  Skipped:    {}\n", stats.skipped));
    output.push_str(&format!("  Emitted:    {}\n", stats.emitted));
    output.push_str(&format!("  Written:    {}\n", stats.written));
    output.push_str(&format!("  Suppressed: {}\n", stats.suppressed));
    output.push_str(&format!("  Conflicts:  {}\n", stats.conflicts));
    output
}

/// Format a compiled plan for human reading
fn format_plan_human(elements: &[MappingElement], show_terms: bool) -> String {
    let mut output = String::new();

    for element in elements {
        let depth = element.fan_out_depth();
        if depth > 0 {
            output.push_str(&format!("{} (fan-out depth {})\n", element, depth));
        } else {
            output.push_str(&format!("{}\n", element));
        }

        if show_terms {
            for term in element.terms() {
                output.push_str(&format!("    {}\n", term));
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use treeshift_core::{compile, MappingTable};

    /// Writer that keeps everything written to it
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn writer(format: OutputFormat, quiet: bool) -> (OutputWriter, SharedBuffer) {
        let buffer = SharedBuffer::default();
        let writer = OutputWriter::with_writer(format, false, quiet, Box::new(buffer.clone()));
        (writer, buffer)
    }

    #[test]
    fn test_document_formats() {
        let document = json!({"a": {"b": [1, 2]}});

        let (mut output, buffer) = writer(OutputFormat::Json, false);
        output.document(&document).unwrap();
        assert_eq!(buffer.contents(), "{\"a\":{\"b\":[1,2]}}\n");

        let (mut output, buffer) = writer(OutputFormat::Yaml, false);
        output.document(&document).unwrap();
        let parsed: Value = serde_yaml::from_str(&buffer.contents()).unwrap();
        assert_eq!(parsed, document);
    }

    #[test]
    fn test_messages_only_in_human_format() {
        let (mut output, buffer) = writer(OutputFormat::Json, false);
        output.info("loading").unwrap();
        output.success("done").unwrap();
        output.section("Result").unwrap();
        assert!(buffer.contents().is_empty());

        let (mut output, buffer) = writer(OutputFormat::Human, false);
        output.info("loading").unwrap();
        output.warning("careful").unwrap();
        let contents = buffer.contents();
        assert!(contents.contains("INFO: loading"));
        assert!(contents.contains("WARNING: careful"));
    }

    #[test]
    fn test_quiet_suppresses_chatter_but_not_data() {
        let (mut output, buffer) = writer(OutputFormat::Human, true);
        output.info("loading").unwrap();
        output.success("done").unwrap();
        output.document(&json!({"k": 1})).unwrap();
        assert_eq!(buffer.contents().trim(), "{\n  \"k\": 1\n}");
    }

    #[test]
    fn test_stats_formatting() {
        let stats = ShiftStats {
            elements: 3,
            skipped: 1,
            emitted: 5,
            written: 4,
            suppressed: 1,
            conflicts: 0,
        };

        let human = OutputFormat::Human.format_stats(&stats).unwrap();
        assert!(human.contains("Elements:   3"));
        assert!(human.contains("Skipped:    1"));

        let json = OutputFormat::Json.format_stats(&stats).unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["written"], 4);
    }

    #[test]
    fn test_plan_formatting() {
        let elements = compile(
            &MappingTable::new()
                .with("items[].name", "out[].label")
                .with("id", "meta.id"),
        )
        .unwrap();

        let human = format_plan_human(&elements, true);
        assert!(human.contains("id => meta.id\n"));
        assert!(human.contains("items[].name => out[].label (fan-out depth 1)"));
        assert!(human.contains("    items[] -> "));

        let json = OutputFormat::Json.format_plan(&elements, false).unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["source_path"], "id");
        assert_eq!(parsed[1]["terms"][0]["is_sequence"], true);
    }
}
