//! The `YearMonth` value type.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EngineError, EngineResult};

/// A billing period, serialized as `"YYYY-MM"`.
///
/// The government submission format uses the compact `YYYYMM` form, which
/// [`YearMonth::compact`] produces.
///
/// # Example
///
/// ```
/// use billing_engine::models::YearMonth;
///
/// let ym: YearMonth = "2025-04".parse().unwrap();
/// assert_eq!(ym.compact(), "202504");
/// assert_eq!(ym.to_string(), "2025-04");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a year-month, rejecting months outside 1–12.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) || !(1900..=2999).contains(&year) {
            return Err(EngineError::InvalidYearMonth {
                value: format!("{year:04}-{month:02}"),
            });
        }
        Ok(Self { year, month })
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The calendar month (1–12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The hyphen-free `YYYYMM` form used in Kokuho-Ren records.
    pub fn compact(&self) -> String {
        format!("{:04}{:02}", self.year, self.month)
    }

    /// The first day of this month.
    pub fn first_day(&self) -> NaiveDate {
        // new() guarantees a representable year/month
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// The month immediately after this one.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The Kokuho-Ren submission deadline: the 10th of the following month.
    pub fn submission_deadline(&self) -> NaiveDate {
        let next = self.next();
        NaiveDate::from_ymd_opt(next.year, next.month, 10)
            .unwrap_or(NaiveDate::MAX)
    }
}

impl FromStr for YearMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidYearMonth {
            value: s.to_string(),
        };
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
