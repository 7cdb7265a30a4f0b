use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "login",
            "Masuk dengan username dan password",
            "login <username> <password>",
            cmd_login,
        ),
        CommandEntry::new("logout", "Keluar dari sesi", "logout", cmd_logout),
        CommandEntry::new(
            "status",
            "Tampilkan status sesi dan jumlah data",
            "status",
            cmd_status,
        ),
    ]
}

fn cmd_login(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [username, password] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: login <username> <password>".into(),
        ));
    };
    context.session.login(username, password)?;
    output::success("Berhasil masuk.");
    Ok(())
}

fn cmd_logout(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.session.logout()?;
    output::success("Sesi diakhiri.");
    Ok(())
}

fn cmd_status(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.session.is_logged_in() {
        output::info(format!(
            "Sudah masuk. {} data tersimpan.",
            context.manager.ledger().len()
        ));
    } else {
        output::info("Belum masuk.");
    }
    Ok(())
}
