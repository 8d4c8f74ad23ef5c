use log::debug;
use regex::Regex;
use serde::Serialize;

use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    sync::LazyLock,
};

use crate::{
    amount::Amount,
    error::{Error, Result},
};

/// Branch codes are exactly three decimal digits.
pub static BRANCH_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3}$").expect("Failed to create regex pattern for branch codes"));

/// Commodity codes are exactly eight alphanumeric characters.
pub static COMMODITY_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9]{8}$").expect("Failed to create regex pattern for commodity codes")
});

/// Code definitions and running totals for one dimension of the summary
/// (branches or commodities).
///
/// A `Ledger` pairs a code→name mapping with a code→total balance table over
/// an identical key set. Loading seeds every defined code with a zero total;
/// totals change only through accumulation, and a code that was never defined
/// never gains an entry.
#[derive(Debug, Default)]
pub struct Ledger {
    names: BTreeMap<String, String>,
    totals: BTreeMap<String, Amount>,
}

/// One line of a summary file.
#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    code: &'a str,
    name: &'a str,
    total: Amount,
}

impl Ledger {
    /// Reads code definitions from the file at `path`, seeding a zero total
    /// per code.
    ///
    /// The definition file consists of one definition per line, in the
    /// following format:
    ///
    /// ```txt
    /// CODE,NAME
    /// ```
    ///
    /// `CODE` must match `code_pattern`, and `NAME` must be non-empty and
    /// free of commas. A code defined twice keeps its last name. `label`
    /// names the file in diagnostics (for example "branch definition file").
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingFile`] if `path` does not exist,
    /// [`Error::InvalidFormat`] on the first malformed line, or
    /// [`Error::Unexpected`] if the file cannot be read.
    pub fn from_file(path: impl AsRef<Path>, label: &str, code_pattern: &Regex) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::MissingFile(label.to_string()));
        }
        let file = BufReader::new(File::open(path)?);
        let mut ledger = Self::default();
        for line in file.lines() {
            let line = line?;
            let Some((code, name)) = line.split_once(',') else {
                return Err(Error::InvalidFormat(label.to_string()));
            };
            if !code_pattern.is_match(code) || name.is_empty() || name.contains(',') {
                return Err(Error::InvalidFormat(label.to_string()));
            }
            ledger.names.insert(code.to_string(), name.to_string());
            ledger.totals.insert(code.to_string(), Amount::default());
        }
        debug!("loaded {} codes from {label}", ledger.names.len());
        Ok(ledger)
    }

    /// Whether `code` is defined in this ledger.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.names.contains_key(code)
    }

    /// Returns the running total for `code`, if it is defined.
    #[must_use]
    pub fn total(&self, code: &str) -> Option<Amount> {
        self.totals.get(code).copied()
    }

    /// Overwrites the running total for `code`.
    ///
    /// Undefined codes are left alone: the balance table only ever holds
    /// codes from the definition file.
    pub fn set_total(&mut self, code: &str, total: Amount) {
        if let Some(t) = self.totals.get_mut(code) {
            *t = total;
        }
    }

    /// Writes this ledger's summary to `path`: one `code,name,total` line
    /// per defined code, in code order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WriteFailure`] if the file cannot be created or
    /// written.
    pub fn write_summary(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .quote_style(csv::QuoteStyle::Never)
            .from_path(path)
            .map_err(|e| write_failure(path, e))?;
        for (code, name) in &self.names {
            let total = self.totals[code];
            wtr.serialize(SummaryRow { code, name, total })
                .map_err(|e| write_failure(path, e))?;
        }
        wtr.flush()
            .map_err(|e| write_failure(path, csv::Error::from(e)))?;
        debug!("wrote {} summary lines to {}", self.names.len(), path.display());
        Ok(())
    }
}

fn write_failure(path: &Path, source: csv::Error) -> Error {
    let file = path
        .file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned();
    Error::WriteFailure { file, source }
}
