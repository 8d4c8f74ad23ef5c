use log::debug;
use regex::Regex;

use std::{
    ffi::OsStr,
    fs::{self, File},
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    sync::LazyLock,
};

use crate::{
    amount::Amount,
    error::{Error, Result},
    ledger::Ledger,
};

static RECORD_FILE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{8}\.rcd$").expect("Failed to create regex pattern for record file names")
});

/// Returns the sales record files under `dir`, in processing order.
///
/// Only regular files named with exactly eight decimal digits and the `.rcd`
/// extension are kept. The sequence numbers of the retained files must form
/// a contiguous ascending run; gaps and duplicates are both rejected. An
/// empty directory yields an empty sequence, which is not an error.
///
/// # Errors
///
/// Returns [`Error::NonConsecutiveSequence`] if any two adjacent sequence
/// numbers differ by other than one, or [`Error::Unexpected`] if the
/// directory cannot be read.
pub fn select_record_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(OsStr::to_str) else {
            continue;
        };
        if path.is_file() && RECORD_FILE_NAME.is_match(name) {
            files.push(path);
        }
    }
    files.sort();
    for pair in files.windows(2) {
        if sequence_number(&pair[1]) - sequence_number(&pair[0]) != 1 {
            return Err(Error::NonConsecutiveSequence);
        }
    }
    debug!("selected {} record files in {}", files.len(), dir.display());
    Ok(files)
}

/// The leading sequence number of a selected record file.
fn sequence_number(path: &Path) -> u32 {
    path.file_stem()
        .and_then(OsStr::to_str)
        .and_then(|stem| stem.parse().ok())
        .expect("selected record files have numeric stems")
}

/// Reads the record file at `path` and folds it into both ledgers.
///
/// # Errors
///
/// Returns [`Error::Unexpected`] if the file cannot be read, or any error
/// from [`apply_record`].
pub fn process_record_file(path: &Path, branches: &mut Ledger, commodities: &mut Ledger) -> Result<()> {
    let file = BufReader::new(File::open(path)?);
    let lines = file.lines().collect::<std::io::Result<Vec<String>>>()?;
    apply_record(&file_label(path), &lines, branches, commodities)
}

/// Validates one record's raw lines and commits its amount to both running
/// totals, or fails leaving both ledgers untouched.
///
/// A record is exactly three lines: a branch code, a commodity code, and an
/// amount. Both candidate totals are computed and checked against the
/// ten-digit limit before either one is committed, so a failing record never
/// leaves the two tables half-updated.
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] unless there are exactly three lines,
/// [`Error::UnknownBranchCode`] or [`Error::UnknownCommodityCode`] if a code
/// is not defined, [`Error::MalformedAmount`] if the amount is not a plain
/// digit string, or [`Error::AmountOverflow`] if either total would exceed
/// ten digits. `file` names the record in the diagnostics.
pub fn apply_record(
    file: &str,
    lines: &[String],
    branches: &mut Ledger,
    commodities: &mut Ledger,
) -> Result<()> {
    let [branch_code, commodity_code, amount] = lines else {
        return Err(Error::InvalidFormat(file.to_string()));
    };
    if !branches.contains(branch_code) {
        return Err(Error::UnknownBranchCode(file.to_string()));
    }
    if !commodities.contains(commodity_code) {
        return Err(Error::UnknownCommodityCode(file.to_string()));
    }
    let amount: Amount = amount.parse()?;
    let branch_total = branches
        .total(branch_code)
        .and_then(|total| total.checked_add(amount))
        .ok_or(Error::AmountOverflow)?;
    let commodity_total = commodities
        .total(commodity_code)
        .and_then(|total| total.checked_add(amount))
        .ok_or(Error::AmountOverflow)?;
    branches.set_total(branch_code, branch_total);
    commodities.set_total(commodity_code, commodity_total);
    Ok(())
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
