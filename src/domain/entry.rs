//! Income/expense entries and the form draft used to create or edit them.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::category::DEFAULT_FORM_CATEGORY;
use crate::domain::common::{EntryId, Identifiable};
use crate::errors::{LedgerError, Result};

/// Label used when grouping income entries by type.
pub const INCOME_LABEL: &str = "Pemasukan";
/// Label used when grouping expense entries by type.
pub const EXPENSE_LABEL: &str = "Pengeluaran";

/// Direction of money flow for an entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    #[default]
    Expense,
}

impl EntryKind {
    pub fn label(self) -> &'static str {
        match self {
            EntryKind::Income => INCOME_LABEL,
            EntryKind::Expense => EXPENSE_LABEL,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EntryKind {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" | "pemasukan" | "in" => Ok(EntryKind::Income),
            "expense" | "pengeluaran" | "out" => Ok(EntryKind::Expense),
            other => Err(LedgerError::Validation(format!(
                "unknown entry type `{other}` (expected income or expense)"
            ))),
        }
    }
}

/// One recorded income or expense transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub amount: i64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub note: String,
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub paid: bool,
}

impl Entry {
    pub fn is_income(&self) -> bool {
        self.kind == EntryKind::Income
    }

    pub fn toggle_paid(&mut self) -> bool {
        self.paid = !self.paid;
        self.paid
    }
}

impl Identifiable for Entry {
    fn id(&self) -> &EntryId {
        &self.id
    }
}

/// Form state for creating or editing an entry. Amounts arrive as decimal
/// input and are rounded to whole units on validation.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub name: String,
    pub kind: EntryKind,
    pub amount: f64,
    pub category: String,
    pub custom_category: String,
    pub note: String,
    pub date: NaiveDate,
}

impl Default for EntryDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: EntryKind::Expense,
            amount: 0.0,
            category: DEFAULT_FORM_CATEGORY.to_string(),
            custom_category: String::new(),
            note: String::new(),
            date: Local::now().date_naive(),
        }
    }
}

impl EntryDraft {
    pub fn new(name: impl Into<String>, kind: EntryKind, amount: f64, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            kind,
            amount,
            date,
            ..Self::default()
        }
    }

    /// Prefills a draft from an existing entry for editing.
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            name: entry.name.clone(),
            kind: entry.kind,
            amount: entry.amount as f64,
            category: entry.category.clone(),
            custom_category: String::new(),
            note: entry.note.clone(),
            date: entry.date,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_custom_category(mut self, custom: impl Into<String>) -> Self {
        self.custom_category = custom.into();
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Typed custom category wins over the selected one.
    pub fn effective_category(&self) -> String {
        let custom = self.custom_category.trim();
        if custom.is_empty() {
            self.category.clone()
        } else {
            custom.to_string()
        }
    }

    /// Checks the name and amount rules, returning the rounded amount.
    pub fn validate(&self) -> Result<i64> {
        if self.name.trim().is_empty() {
            return Err(LedgerError::Validation("Nama harus diisi".into()));
        }
        let rounded = self.amount.round();
        if !rounded.is_finite() || rounded <= 0.0 {
            return Err(LedgerError::Validation("Nominal harus lebih dari 0".into()));
        }
        if rounded >= i64::MAX as f64 {
            return Err(LedgerError::Validation("Nominal terlalu besar".into()));
        }
        Ok(rounded as i64)
    }

    /// Builds a new unpaid entry with a fresh identifier.
    pub fn into_entry(self) -> Result<Entry> {
        let amount = self.validate()?;
        let category = self.effective_category();
        Ok(Entry {
            id: EntryId::generate(),
            name: self.name.trim().to_string(),
            kind: self.kind,
            amount,
            category,
            note: self.note.trim().to_string(),
            date: self.date,
            paid: false,
        })
    }

    /// Overwrites the editable fields of `entry`; `id` and `paid` are kept.
    pub fn apply_to(&self, entry: &mut Entry) -> Result<()> {
        let amount = self.validate()?;
        entry.name = self.name.clone();
        entry.kind = self.kind;
        entry.amount = amount;
        entry.category = self.effective_category();
        entry.note = self.note.clone();
        entry.date = self.date;
        Ok(())
    }
}

/// Parses a calendar date from `YYYY-MM-DD` or a full RFC 3339 timestamp.
/// Timestamps are converted to the local calendar date.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|stamp| stamp.with_timezone(&Local).date_naive())
}

mod iso_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_iso_date(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid entry date `{raw}`")))
    }
}
