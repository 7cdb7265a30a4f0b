use crate::ledger::Ledger;

pub struct CategoryService;

impl CategoryService {
    /// Categories the entry form should offer, including a custom value
    /// currently being typed.
    pub fn available(ledger: &Ledger, custom: Option<&str>) -> Vec<String> {
        ledger.categories(custom)
    }
}
