//! Category defaults and the derived category list offered by entry forms.

use std::collections::HashSet;

/// Categories offered before the ledger has any history.
pub const DEFAULT_CATEGORIES: [&str; 9] = [
    "Gaji",
    "Makan & Minum",
    "Transportasi",
    "Tagihan",
    "Belanja",
    "Kesehatan",
    "Edukasi",
    "Hiburan",
    "Lainnya",
];

/// Category preselected in a fresh entry form.
pub const DEFAULT_FORM_CATEGORY: &str = "Makan & Minum";

/// Builds the category list: defaults, then categories observed in the
/// ledger, then the custom value being typed. First occurrence wins and
/// insertion order is preserved. Blank values are skipped.
pub fn derive_categories<'a, I>(observed: I, custom: Option<&'a str>) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut categories = Vec::new();
    let custom = custom.map(str::trim).filter(|value| !value.is_empty());

    let candidates = DEFAULT_CATEGORIES
        .iter()
        .copied()
        .chain(observed)
        .chain(custom);

    for candidate in candidates {
        if candidate.is_empty() {
            continue;
        }
        if seen.insert(candidate) {
            categories.push(candidate.to_string());
        }
    }
    categories
}
