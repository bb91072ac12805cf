//! Plan command handler

use super::utils::load_shifter;
use crate::cli::PlanArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;

/// Handle the plan command
pub fn handle_plan(args: PlanArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let mapping_path = config.mapping_path(args.mapping.as_deref())?;
    output.info(&format!("Compiling {}", mapping_path.display()))?;

    let shifter = load_shifter(&mapping_path)?;

    output.section(&format!("Plan ({} elements)", shifter.len()))?;
    output.plan(shifter.elements(), args.terms)?;

    Ok(())
}
