//! Formatting of whole-unit amounts for the configured currency and locale.

/// How amounts are rendered: a currency symbol and the thousands separator
/// of the locale. The default renders IDR the way `id-ID` does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoneyFormat {
    pub symbol: String,
    pub grouping_separator: char,
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self::new("id-ID", "IDR")
    }
}

impl MoneyFormat {
    pub fn new(locale: &str, currency: &str) -> Self {
        Self {
            symbol: symbol_for(&currency.to_ascii_uppercase()),
            grouping_separator: grouping_separator_for(locale),
        }
    }

    /// e.g. `Rp 5.000.000` and `-Rp 50.000`.
    pub fn format(&self, amount: i64) -> String {
        let body = group_digits(&amount.unsigned_abs().to_string(), self.grouping_separator);
        let sign = if amount < 0 { "-" } else { "" };
        format!("{sign}{} {body}", self.symbol)
    }
}

/// Formats an amount as IDR in the `id-ID` locale.
pub fn format_rupiah(amount: i64) -> String {
    MoneyFormat::default().format(amount)
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "IDR" => "Rp".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "SGD" => "S$".into(),
        "MYR" => "RM".into(),
        _ => code.into(),
    }
}

/// Thousands separator for a BCP 47 language tag. Unknown languages fall
/// back to `.`.
pub fn grouping_separator_for(locale: &str) -> char {
    let language = locale
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    match language.as_str() {
        "en" | "ja" | "zh" | "ko" | "th" | "ms" => ',',
        "fr" | "sv" | "nb" | "fi" | "pl" | "cs" => ' ',
        _ => '.',
    }
}

/// Inserts `separator` every three digits from the right.
pub fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.chars().count();
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (len - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_positive_amounts() {
        assert_eq!(format_rupiah(0), "Rp 0");
        assert_eq!(format_rupiah(999), "Rp 999");
        assert_eq!(format_rupiah(1_000), "Rp 1.000");
        assert_eq!(format_rupiah(5_000_000), "Rp 5.000.000");
    }

    #[test]
    fn formats_negative_amounts() {
        assert_eq!(format_rupiah(-50_000), "-Rp 50.000");
        assert_eq!(format_rupiah(i64::MIN), "-Rp 9.223.372.036.854.775.808");
    }

    #[test]
    fn currency_and_locale_change_symbol_and_grouping() {
        let usd = MoneyFormat::new("en-US", "usd");
        assert_eq!(usd.format(5_000_000), "$ 5,000,000");
        assert_eq!(usd.format(-50_000), "-$ 50,000");

        let unknown = MoneyFormat::new("de-DE", "CHF");
        assert_eq!(unknown.format(1_234), "CHF 1.234");
    }
}
