use regex::Regex;
use serde::Serialize;

use std::{
    fmt::{self, Display},
    str::FromStr,
    sync::LazyLock,
};

use crate::error::Error;

/// Accumulated totals must fit in ten decimal digits.
pub const TOTAL_LIMIT: u64 = 10_000_000_000;

static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("Failed to create regex pattern for amounts"));

/// A non-negative sales amount.
///
/// Amounts are parsed from plain decimal text: one or more ASCII digits with
/// no sign, no separators, and no surrounding whitespace. `u64`'s own parser
/// is too permissive here (it accepts a leading `+`), so the shape is checked
/// first. A digit string too wide even for `u64` is reported as an overflow
/// rather than a malformed amount, since any value that wide breaches the
/// ten-digit total limit by construction.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Serialize)]
pub struct Amount(u64);

impl Amount {
    /// Adds `rhs`, or returns `None` if the sum no longer fits in ten digits.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.0.checked_add(rhs.0) {
            Some(sum) if sum < TOTAL_LIMIT => Some(Self(sum)),
            _ => None,
        }
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if !DIGITS.is_match(s) {
            return Err(Error::MalformedAmount);
        }
        s.parse().map(Self).map_err(|_| Error::AmountOverflow)
    }
}
