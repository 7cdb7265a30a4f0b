use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    output::section("Perintah yang tersedia");
    for entry in registry.list() {
        let marker = if entry.requires_login { "*" } else { " " };
        output::raw(format!("  {:<14}{marker} {}", entry.name, entry.description));
    }
    output::info("Perintah bertanda * memerlukan login.");
    output::info("Gunakan `help <perintah>` untuk detail.");
}

pub fn print_command(entry: &CommandEntry) {
    output::section(format!("Bantuan: {}", entry.name));
    output::raw(format!("  {}", entry.description));
    output::raw(format!("  Penggunaan: {}", entry.usage));
}
