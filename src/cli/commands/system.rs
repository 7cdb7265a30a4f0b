use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::core::services::CategoryService;
use crate::utils::build_info;

use super::ParsedArgs;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "categories",
            "Daftar kategori yang tersedia",
            "categories [kategori baru]",
            cmd_categories,
        )
        .guarded(),
        CommandEntry::new(
            "backups",
            "Daftar cadangan data",
            "backups",
            cmd_backups,
        )
        .guarded(),
        CommandEntry::new(
            "restore",
            "Pulihkan data dari cadangan",
            "restore <nama cadangan> [--yes]",
            cmd_restore,
        )
        .guarded(),
        CommandEntry::new(
            "config",
            "Lihat atau ubah pengaturan",
            "config [show | set <key> <value>]",
            cmd_config,
        ),
        CommandEntry::new("version", "Informasi versi", "version", cmd_version),
        CommandEntry::new("help", "Tampilkan bantuan", "help [perintah]", cmd_help),
        CommandEntry::new("exit", "Keluar dari aplikasi", "exit", cmd_exit),
    ]
}

fn cmd_categories(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let custom = args.join(" ");
    let custom = Some(custom.as_str()).filter(|value| !value.trim().is_empty());
    for category in CategoryService::available(context.manager.ledger(), custom) {
        output::raw(format!("  {category}"));
    }
    Ok(())
}

fn cmd_backups(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let backups = context.manager.list_backups()?;
    if backups.is_empty() {
        output::info("Belum ada cadangan.");
        return Ok(());
    }
    let mut table = Table::new(vec![TableColumn::left("Nama"), TableColumn::right("Ukuran")]);
    for backup in backups {
        table.push_row(vec![backup.name, format!("{} B", backup.size_bytes)]);
    }
    output::raw(table.render());
    Ok(())
}

fn cmd_restore(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[], &["yes"])?;
    let [name] = parsed.positional.as_slice() else {
        return Err(CommandError::InvalidArguments(
            "usage: restore <nama cadangan> [--yes]".into(),
        ));
    };
    let prompt = format!("Ganti semua data dengan cadangan `{name}`?");
    if !context.confirm(&prompt, parsed.flag("yes"))? {
        output::info("Dibatalkan.");
        return Ok(());
    }
    let count = context.manager.restore_backup(name)?;
    output::success(format!("{count} data dipulihkan dari `{name}`."));
    Ok(())
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            for (key, value) in context.config.describe() {
                output::raw(format!("  {key:<18} {value}"));
            }
            Ok(())
        }
        ["set", key, value @ ..] if !value.is_empty() => {
            context.config.set(key, &value.join(" "))?;
            context.persist_config()?;
            output::success(format!("Pengaturan `{key}` disimpan."));
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(
            "usage: config [show | set <key> <value>]".into(),
        )),
    }
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::raw(build_info::current().summary());
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first() {
        None => help::print_overview(&context.registry),
        Some(name) => match context.registry.get(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        },
    }
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}

#[cfg(test)]
mod tests {
    use crate::auth::{VALID_PASSWORD, VALID_USERNAME};
    use crate::cli::core::process_script;
    use crate::config::ConfigManager;
    use crate::report::GroupBy;
    use tempfile::tempdir;

    #[test]
    fn config_set_persists_between_sessions() {
        let dir = tempdir().unwrap();
        process_script(dir.path(), &["config set group-by type", "config set color off"]).unwrap();
        let saved = ConfigManager::in_dir(dir.path()).load().unwrap();
        assert_eq!(saved.default_group_by, GroupBy::Type);
        assert!(!saved.color_enabled);

        let app = process_script(dir.path(), &["config set group-by sideways"]).unwrap();
        assert_eq!(app.config.default_group_by, GroupBy::Type);
    }

    #[test]
    fn restore_brings_back_previous_collection() {
        let dir = tempdir().unwrap();
        let login = format!("login {VALID_USERNAME} {VALID_PASSWORD}");
        let app = process_script(
            dir.path(),
            &[
                login.as_str(),
                "add Sewa expense 1500000",
                "add Bonus income 750000",
            ],
        )
        .unwrap();
        assert_eq!(app.manager.ledger().len(), 2);

        let backups = app.manager.list_backups().unwrap();
        assert_eq!(backups.len(), 1);
        let restore = format!("restore {} --yes", backups[0].name);
        let app = process_script(dir.path(), &[restore.as_str()]).unwrap();
        assert_eq!(app.manager.ledger().len(), 1);
        assert_eq!(app.manager.ledger().entries()[0].name, "Sewa");
        assert_eq!(app.manager.list_backups().unwrap().len(), 2);
    }
}
