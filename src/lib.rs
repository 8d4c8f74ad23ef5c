#![doc = include_str!("../README.md")]
use log::debug;

use std::path::Path;

pub mod amount;
pub mod error;
pub mod ledger;
pub mod records;

pub use amount::Amount;
pub use error::{Error, Result};
pub use ledger::Ledger;

/// The branch definition file expected in the working directory.
pub const BRANCH_DEFINITIONS: &str = "branch.lst";
/// The commodity definition file expected in the working directory.
pub const COMMODITY_DEFINITIONS: &str = "commodity.lst";
/// The per-branch summary written on success.
pub const BRANCH_SUMMARY: &str = "branch.out";
/// The per-commodity summary written on success.
pub const COMMODITY_SUMMARY: &str = "commodity.out";

/// Totals every sales record under `dir` and writes both summaries.
///
/// Loads the branch and commodity definitions, selects and orders the sales
/// record files, folds each one into both running totals in sequence order,
/// then writes [`BRANCH_SUMMARY`] and [`COMMODITY_SUMMARY`] back into `dir`.
/// The stages run strictly in that order and the first failure stops the
/// run, so no summary is written unless every record file validated and
/// accumulated cleanly.
///
/// # Errors
///
/// Returns the first [`Error`] raised by any stage.
pub fn run(dir: &Path) -> Result<()> {
    let mut branches = Ledger::from_file(
        dir.join(BRANCH_DEFINITIONS),
        "branch definition file",
        &ledger::BRANCH_CODE,
    )?;
    let mut commodities = Ledger::from_file(
        dir.join(COMMODITY_DEFINITIONS),
        "commodity definition file",
        &ledger::COMMODITY_CODE,
    )?;
    let record_files = records::select_record_files(dir)?;
    for path in &record_files {
        records::process_record_file(path, &mut branches, &mut commodities)?;
    }
    debug!(
        "accumulated {} record files from {}",
        record_files.len(),
        dir.display()
    );
    branches.write_summary(dir.join(BRANCH_SUMMARY))?;
    commodities.write_summary(dir.join(COMMODITY_SUMMARY))?;
    Ok(())
}
