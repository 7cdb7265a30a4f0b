//! Shell context, dispatch, and CLI error types.

use std::{io, path::Path};

use rustyline::error::ReadlineError;
use strsim::levenshtein;
use tracing::{debug, warn};

use crate::{
    auth::SessionStore,
    config::{Config, ConfigManager},
    core::{services::ServiceError, LedgerManager},
    errors::LedgerError,
    storage::JsonEntryStore,
    utils::paths,
};

use super::commands;
use super::io as cli_io;
use super::output::{self, OutputPreferences};
use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Everything a command handler can reach: the ledger, the session flag,
/// and the user's preferences.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub manager: LedgerManager,
    pub session: SessionStore,
    pub config: Config,
    pub config_manager: ConfigManager,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_root(mode, &paths::app_data_dir())
    }

    /// Builds a context whose files all live under `root`.
    pub fn with_root(mode: CliMode, root: &Path) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = ConfigManager::in_dir(root);
        let config = config_manager.load().unwrap_or_else(|err| {
            warn!(path = %config_manager.path().display(), error = %err, "unreadable config; using defaults");
            Config::default()
        });
        apply_config(&config);

        let store = JsonEntryStore::in_dir(root, config.backup_retention)?;
        let manager = LedgerManager::open(Box::new(store));
        debug!(root = %root.display(), entries = manager.ledger().len(), "shell ready");

        Ok(ShellContext {
            mode,
            registry,
            manager,
            session: SessionStore::in_dir(root),
            config,
            config_manager,
            last_command: None,
            running: true,
        })
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        if self.session.is_logged_in() {
            "catatan> ".to_string()
        } else {
            "catatan (belum masuk)> ".to_string()
        }
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        apply_config(&self.config);
        Ok(())
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(entry) = self.registry.get(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        let handler = entry.handler;
        if entry.requires_login {
            self.session.require_login()?;
        }
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(err);
                return Ok(LoopControl::Continue);
            }
        };
        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };

        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.last_command = Some(line.trim().to_string());

        match self.dispatch(&command, raw, &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            other => other,
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Perintah `{input}` tidak dikenal. Ketik `help` untuk daftar perintah."
        ));
        if let Some(best) = suggest(self.registry.names(), input) {
            output::info(format!("Maksud Anda `{best}`?"));
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action("Keluar dari aplikasi?", true)?)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Gunakan `help <perintah>` untuk cara pemakaian.");
            }
            CommandError::Core(LedgerError::NotAuthenticated) => {
                output::error(LedgerError::NotAuthenticated);
            }
            CommandError::Core(err @ LedgerError::AmbiguousId(_)) => {
                output::error(err);
                output::hint("Tambahkan beberapa karakter ID lagi.");
            }
            other => output::error(other),
        }
    }

    /// Asks before a destructive action. Script mode never prompts, so the
    /// caller must pass `--yes` there.
    pub(crate) fn confirm(&self, prompt: &str, assume_yes: bool) -> Result<bool, CommandError> {
        if assume_yes {
            return Ok(true);
        }
        match self.mode {
            CliMode::Script => Err(CommandError::InvalidArguments(
                "Konfirmasi dibutuhkan; tambahkan `--yes` dalam mode skrip.".into(),
            )),
            CliMode::Interactive => cli_io::confirm_action(prompt, false),
        }
    }
}

/// Closest registered name within edit distance 3.
pub(crate) fn suggest<'a>(
    names: impl Iterator<Item = &'a str>,
    input: &str,
) -> Option<&'a str> {
    let needle = input.to_lowercase();
    names
        .map(|name| (levenshtein(name, &needle), name))
        .filter(|(distance, _)| *distance <= 3)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, name)| name)
}

fn apply_config(config: &Config) {
    output::set_preferences(OutputPreferences {
        color_enabled: config.color_enabled,
    });
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<ServiceError> for CommandError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Ledger(err) => CommandError::Core(err),
        }
    }
}

/// Failures that end the shell itself.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Core(inner) => CliError::Core(inner),
            other => CliError::Command(other.to_string()),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<ReadlineError> for CliError {
    fn from(err: ReadlineError) -> Self {
        CliError::Input(err.to_string())
    }
}

#[cfg(test)]
pub(crate) fn process_script(root: &Path, lines: &[&str]) -> Result<ShellContext, CliError> {
    let mut app = ShellContext::with_root(CliMode::Script, root)?;
    for line in lines {
        match app.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => app.report_error(err),
        }
    }
    Ok(app)
}
