//! Check command handler

use super::utils::load_mapping;
use crate::cli::CheckArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use serde::Serialize;
use treeshift_core::{compile_pair, Error as ShiftError, MappingTable};

/// Outcome of checking one mapping pair
#[derive(Debug, Serialize)]
struct PairReport {
    source: String,
    destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Handle the check command
///
/// Every pair is compiled so all invalid pairs are reported at once.
pub fn handle_check(args: CheckArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let mapping_path = config.mapping_path(args.mapping.as_deref())?;
    output.info(&format!("Checking {}", mapping_path.display()))?;

    let table = load_mapping(&mapping_path)?;
    let (reports, first_error) = check_table(&table);
    let invalid: Vec<&PairReport> = reports.iter().filter(|r| r.error.is_some()).collect();

    match first_error {
        None => {
            output.success(&format!(
                "✓ Mapping is valid ({} pairs from {} source paths)",
                table.pair_count(),
                table.len()
            ))?;
            output.data(&reports)?;
            Ok(())
        }
        Some(error) => {
            for report in &invalid {
                if let Some(message) = &report.error {
                    output.warning(&format!("✗ {}", message))?;
                }
            }
            output.data(&invalid)?;
            Err(error.into())
        }
    }
}

fn check_table(table: &MappingTable) -> (Vec<PairReport>, Option<ShiftError>) {
    let mut reports = Vec::with_capacity(table.pair_count());
    let mut first_error = None;

    for (source, destination) in table.pairs() {
        let error = match compile_pair(source, destination) {
            Ok(_) => None,
            Err(err) => {
                let message = err.to_string();
                first_error.get_or_insert(err);
                Some(message)
            }
        };
        reports.push(PairReport {
            source: source.to_string(),
            destination: destination.to_string(),
            error,
        });
    }

    (reports, first_error)
}
