#![forbid(unsafe_code)]

//! Bounded clearance values
//!
//! A [`ClearanceValue`] is a clearance in millimeters, clamped to
//! `[0.0, 999.999999]` and truncated to six fractional digits. Values are
//! held as an exact integer count of millionths of a millimeter, so parsing,
//! truncation and rendering never go through binary floating point.

use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Number of fractional digits kept
pub const DECIMAL_PLACES: usize = 6;

/// Unit suffix used in rule statements and cell text
pub const UNIT: &str = "mm";

const SCALE: u64 = 1_000_000;

/// Leading digits, then an optional `.` or `,` separator and more digits.
///
/// `[0-9]` rather than `\d`: the latter also matches non-ASCII digits.
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)(?:[.,]([0-9]*))?").expect("leading number pattern is valid")
});

/// A normalized clearance in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ClearanceValue {
    micros: u64,
}

impl ClearanceValue {
    /// Smallest clearance (0.0 mm), also the value of unparsable input
    pub const MIN: ClearanceValue = ClearanceValue { micros: 0 };

    /// Largest clearance (999.999999 mm)
    pub const MAX: ClearanceValue = ClearanceValue {
        micros: 999_999_999,
    };

    /// Normalizes raw user or file text into a clearance
    ///
    /// Never fails: text without a leading number becomes [`Self::MIN`],
    /// numbers outside the range are clamped, and extra fractional digits
    /// are cut off.
    pub fn normalize(raw: &str) -> Self {
        Self::parse_leading(raw).unwrap_or(Self::MIN)
    }

    /// Parses the leading number of `raw`, if there is one
    ///
    /// Returns `None` when `raw` does not start with a digit. Anything after
    /// the number (a unit, whitespace, junk) is ignored.
    pub fn parse_leading(raw: &str) -> Option<Self> {
        let caps = LEADING_NUMBER.captures(raw)?;

        let int_digits = caps[1].trim_start_matches('0');
        let frac_digits = caps.get(2).map_or("", |m| m.as_str());

        let max_int = Self::MAX.micros / SCALE;
        let max_int_digits = max_int.to_string().len();
        if int_digits.len() > max_int_digits {
            return Some(Self::MAX);
        }

        let int_part: u64 = if int_digits.is_empty() {
            0
        } else {
            int_digits.parse().ok()?
        };

        // Cut, then pad, to exactly six digits.
        let frac_part = frac_digits
            .bytes()
            .chain(std::iter::repeat(b'0'))
            .take(DECIMAL_PLACES)
            .fold(0u64, |acc, digit| acc * 10 + u64::from(digit - b'0'));

        Some(Self::from_micros(int_part * SCALE + frac_part))
    }

    /// Builds a value from millionths of a millimeter, clamped to the range
    pub fn from_micros(micros: u64) -> Self {
        ClearanceValue {
            micros: micros.min(Self::MAX.micros),
        }
    }

    /// Millionths of a millimeter
    pub fn micros(&self) -> u64 {
        self.micros
    }

    /// The value in millimeters as a float, for display and JSON only
    pub fn as_mm(&self) -> f64 {
        self.micros as f64 / SCALE as f64
    }

    /// Zero clearances mean "no rule"
    pub fn is_zero(&self) -> bool {
        self.micros == 0
    }

    /// Text used inside a rule statement, e.g. `5.0mm`
    pub fn to_rule_text(&self) -> String {
        format!("{}{}", self, UNIT)
    }

    /// Text shown in an editable cell, e.g. `5.0 mm`
    pub fn to_cell_text(&self) -> String {
        format!("{} {}", self, UNIT)
    }
}

impl fmt::Display for ClearanceValue {
    /// Renders the shortest decimal form with at least one fractional digit
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let int_part = self.micros / SCALE;
        let frac = format!("{:0width$}", self.micros % SCALE, width = DECIMAL_PLACES);
        let frac = frac.trim_end_matches('0');
        let frac = if frac.is_empty() { "0" } else { frac };
        write!(f, "{}.{}", int_part, frac)
    }
}

impl Serialize for ClearanceValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_mm())
    }
}
