//! Apply command handler

use super::utils::{load_document, load_shifter, serialize_for_path};
use crate::cli::ApplyArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use tracing::{info, warn};
use treeshift_core::{ShiftOptions, ShiftStats};

/// Document and statistics printed as one value
#[derive(Serialize)]
struct ShiftReport<'a> {
    document: &'a Value,
    stats: &'a ShiftStats,
}

/// Handle the apply command
pub fn handle_apply(args: ApplyArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let mapping_path = config.mapping_path(args.mapping.as_deref())?;
    output.info(&format!(
        "Applying {} to {}",
        mapping_path.display(),
        args.document.display()
    ))?;

    let shifter = {
        let _timer = Timer::new("compile_mapping");
        load_shifter(&mapping_path)?
    };
    let source = load_document(&args.document)?;
    let base = args.base.as_deref().map(load_document).transpose()?;

    let continue_on_error = args.continue_on_error || config.shift.continue_on_error;
    let (document, stats) = run_shift(&shifter, &source, base, continue_on_error)?;

    info!(stats = %stats, "Shift applied");
    if stats.skipped > 0 {
        output.warning(&format!(
            "⚠ {} mapping element(s) skipped after structural errors",
            stats.skipped
        ))?;
    }
    if stats.conflicts > 0 {
        output.warning(&format!(
            "⚠ {} write(s) dropped on destination shape conflicts",
            stats.conflicts
        ))?;
    }

    match &args.save_to {
        Some(path) => {
            fs::write(path, serialize_for_path(&document, path)?)?;
            output.success(&format!("✓ Output saved to {}", path.display()))?;
        }
        // machine formats keep stdout a single parseable value
        None if args.stats && !output.is_human() => {
            return output.data(&ShiftReport {
                document: &document,
                stats: &stats,
            });
        }
        None => {
            output.section("Result")?;
            output.document(&document)?;
        }
    }

    if args.stats {
        output.section("Statistics")?;
        output.stats(&stats)?;
    }

    Ok(())
}

/// Run the shift with the CLI's error policy
fn run_shift(
    shifter: &treeshift_core::Shifter,
    source: &Value,
    base: Option<Value>,
    continue_on_error: bool,
) -> Result<(Value, ShiftStats)> {
    let _timer = Timer::new("apply_mapping");

    let mut options = ShiftOptions::new();
    if let Some(base) = base {
        options = options.with_destination(base);
    }
    if continue_on_error {
        options = options.with_error_policy(|err| {
            warn!(error = %err, "Skipping mapping element");
            true
        });
    }

    Ok(shifter.apply_with_stats(source, options)?)
}
