pub mod auth;
pub mod entry;
pub mod report;
pub mod system;

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::cli::core::CommandError;
use crate::cli::registry::CommandRegistry;
use crate::domain::parse_iso_date;

pub fn register_all(registry: &mut CommandRegistry) {
    for entry in auth::definitions()
        .into_iter()
        .chain(entry::definitions())
        .chain(report::definitions())
        .chain(system::definitions())
    {
        registry.register(entry);
    }
}

/// Arguments split into positionals, `--key value` options, and bare flags.
#[derive(Debug, Default)]
pub(crate) struct ParsedArgs<'a> {
    pub positional: Vec<&'a str>,
    options: HashMap<&'static str, &'a str>,
    flags: HashSet<&'static str>,
}

impl<'a> ParsedArgs<'a> {
    /// `value_options` take the following token (or `--key=value`);
    /// `switches` take none. Anything else starting with `--` is rejected.
    pub fn parse(
        args: &[&'a str],
        value_options: &[&'static str],
        switches: &[&'static str],
    ) -> Result<Self, CommandError> {
        let mut parsed = ParsedArgs::default();
        let mut iter = args.iter().copied();
        while let Some(arg) = iter.next() {
            let Some(flag) = arg.strip_prefix("--") else {
                parsed.positional.push(arg);
                continue;
            };
            let (key, inline) = match flag.split_once('=') {
                Some((key, value)) => (key, Some(value)),
                None => (flag, None),
            };
            if let Some(known) = switches.iter().copied().find(|name| *name == key) {
                parsed.flags.insert(known);
            } else if let Some(known) = value_options.iter().copied().find(|name| *name == key) {
                let value = match inline {
                    Some(value) => value,
                    None => iter.next().ok_or_else(|| {
                        CommandError::InvalidArguments(format!("`--{known}` membutuhkan nilai"))
                    })?,
                };
                parsed.options.insert(known, value);
            } else {
                return Err(CommandError::InvalidArguments(format!(
                    "opsi tidak dikenal `{arg}`"
                )));
            }
        }
        Ok(parsed)
    }

    pub fn option(&self, key: &str) -> Option<&'a str> {
        self.options.get(key).copied()
    }

    pub fn flag(&self, key: &str) -> bool {
        self.flags.contains(key)
    }
}

pub(crate) fn parse_date_arg(input: &str) -> Result<NaiveDate, CommandError> {
    parse_iso_date(input).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "tanggal `{input}` tidak valid (gunakan YYYY-MM-DD)"
        ))
    })
}

pub(crate) fn parse_amount_arg(input: &str) -> Result<f64, CommandError> {
    input
        .trim()
        .parse::<f64>()
        .map_err(|_| CommandError::InvalidArguments(format!("nominal `{input}` bukan angka")))
}
