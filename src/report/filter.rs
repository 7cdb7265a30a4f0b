use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{parse_iso_date, Entry};
use crate::errors::{LedgerError, Result};

/// An inclusive date bound as entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    Date(NaiveDate),
    /// The raw input did not parse; no entry satisfies this bound.
    Invalid,
}

impl DateBound {
    /// Parses user input. Blank input means "no bound" and yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }
        Some(parse_iso_date(raw).map_or(DateBound::Invalid, DateBound::Date))
    }

    fn admits_from(self, date: NaiveDate) -> bool {
        match self {
            DateBound::Date(from) => date >= from,
            DateBound::Invalid => false,
        }
    }

    fn admits_to(self, date: NaiveDate) -> bool {
        match self {
            DateBound::Date(to) => date <= to,
            DateBound::Invalid => false,
        }
    }
}

impl From<NaiveDate> for DateBound {
    fn from(date: NaiveDate) -> Self {
        DateBound::Date(date)
    }
}

/// Payment-status criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentFilter {
    #[default]
    All,
    Paid,
    Unpaid,
}

impl PaymentFilter {
    pub fn admits(self, paid: bool) -> bool {
        match self {
            PaymentFilter::All => true,
            PaymentFilter::Paid => paid,
            PaymentFilter::Unpaid => !paid,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentFilter::All => "Semua Status",
            PaymentFilter::Paid => "Sudah Dibayar",
            PaymentFilter::Unpaid => "Belum Dibayar",
        }
    }
}

impl FromStr for PaymentFilter {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" | "semua" => Ok(PaymentFilter::All),
            "paid" | "lunas" => Ok(PaymentFilter::Paid),
            "unpaid" | "belum" => Ok(PaymentFilter::Unpaid),
            other => Err(LedgerError::Validation(format!(
                "unknown payment status `{other}` (expected all, paid or unpaid)"
            ))),
        }
    }
}

impl fmt::Display for PaymentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Aggregation dimension for the grouped report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    Name,
    Type,
}

impl GroupBy {
    /// Column header used when rendering grouped rows.
    pub fn header(self) -> &'static str {
        match self {
            GroupBy::Name => "Nama",
            GroupBy::Type => "Jenis",
        }
    }
}

impl FromStr for GroupBy {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" | "by-name" | "nama" => Ok(GroupBy::Name),
            "type" | "by-type" | "jenis" => Ok(GroupBy::Type),
            other => Err(LedgerError::Validation(format!(
                "unknown grouping `{other}` (expected name or type)"
            ))),
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GroupBy::Name => "name",
            GroupBy::Type => "type",
        };
        f.write_str(label)
    }
}

/// Date-range and payment-status criteria. All criteria must hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportFilter {
    pub from: Option<DateBound>,
    pub to: Option<DateBound>,
    pub status: PaymentFilter,
}

impl ReportFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting(mut self, raw: &str) -> Self {
        self.from = DateBound::parse(raw);
        self
    }

    pub fn ending(mut self, raw: &str) -> Self {
        self.to = DateBound::parse(raw);
        self
    }

    pub fn starting_on(mut self, date: NaiveDate) -> Self {
        self.from = Some(date.into());
        self
    }

    pub fn ending_on(mut self, date: NaiveDate) -> Self {
        self.to = Some(date.into());
        self
    }

    pub fn with_status(mut self, status: PaymentFilter) -> Self {
        self.status = status;
        self
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        self.from.map_or(true, |bound| bound.admits_from(entry.date))
            && self.to.map_or(true, |bound| bound.admits_to(entry.date))
            && self.status.admits(entry.paid)
    }
}
