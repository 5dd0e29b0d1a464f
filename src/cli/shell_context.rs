//! Shared runtime state for CLI interactions and command execution.

use dialoguer::{theme::ColorfulTheme, Confirm};
use strsim::levenshtein;
use tracing::{debug, warn};

use crate::{
    cli::{
        commands,
        core::{CliError, CliMode, CommandError, LoopControl},
        io as cli_io,
        registry::{CommandEntry, CommandRegistry},
    },
    config::{Config, ConfigManager},
    core::{LedgerManager, LoadSource},
    currency::{CurrencyFormatter, WholeCurrencyFormatter},
    domain::{DebtLedger, Period},
    errors::PlannerError,
    storage::{JsonFileStore, KeyedRepository},
};

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub manager: LedgerManager,
    pub theme: ColorfulTheme,
    pub formatter: WholeCurrencyFormatter,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub running: bool,
}

impl ShellContext {
    /// Loads configuration and the saved ledger from the application directory.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = match config_manager.load() {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "invalid configuration; using defaults");
                cli_io::print_warning(format!("{err}. Using default settings."));
                Config::default()
            }
        };
        let store = JsonFileStore::new(config_manager.data_dir(&config))?;
        let repository = KeyedRepository::new(store, config.storage_key.clone());
        let manager = LedgerManager::new(Box::new(repository));
        Ok(Self::from_parts(mode, config_manager, config, manager))
    }

    /// Builds a context around an existing manager, loading it if needed.
    pub fn from_parts(
        mode: CliMode,
        config_manager: ConfigManager,
        config: Config,
        mut manager: LedgerManager,
    ) -> Self {
        let metadata = manager.load();
        if metadata.source == LoadSource::Recovered {
            cli_io::print_warning("Saved data could not be read. Starting with an empty plan.");
        }
        for warning in &metadata.warnings {
            cli_io::print_warning(warning);
        }

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        Self {
            mode,
            registry,
            manager,
            theme: ColorfulTheme::default(),
            formatter: config.formatter(),
            config_manager,
            config,
            running: true,
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn prompt(&self) -> String {
        match self.manager.ledger() {
            Some(ledger) if ledger.is_debt_set => {
                format!("debt-planner [{} periods]> ", ledger.periods.len())
            }
            _ => "debt-planner [setup]> ".into(),
        }
    }

    pub fn ledger(&self) -> Result<&DebtLedger, CommandError> {
        self.manager
            .ledger()
            .ok_or(CommandError::Core(PlannerError::NotLoaded))
    }

    /// The ledger, provided the starting debt has been confirmed.
    pub fn tracking_ledger(&self) -> Result<&DebtLedger, CommandError> {
        let ledger = self.ledger()?;
        if !ledger.is_debt_set {
            return Err(CommandError::DebtNotSet);
        }
        Ok(ledger)
    }

    /// Resolves a 1-based period position to its index and record.
    pub fn period_at(&self, position: &str) -> Result<(usize, &Period), CommandError> {
        let ledger = self.tracking_ledger()?;
        let index = parse_position(position, "period")?;
        ledger
            .periods
            .get(index)
            .map(|period| (index, period))
            .ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "period {} does not exist ({} in the plan)",
                    position,
                    ledger.periods.len()
                ))
            })
    }

    /// Resolves 1-based period and expense positions to their ids.
    pub fn expense_at(
        &self,
        period_position: &str,
        expense_position: &str,
    ) -> Result<(String, String), CommandError> {
        let (_, period) = self.period_at(period_position)?;
        let index = parse_position(expense_position, "expense")?;
        let expense = period.expenses.get(index).ok_or_else(|| {
            CommandError::InvalidArguments(format!(
                "expense {} does not exist in period {} ({} listed)",
                expense_position,
                period_position,
                period.expenses.len()
            ))
        })?;
        Ok((period.id.clone(), expense.id.clone()))
    }

    pub fn format(&self, amount: f64) -> String {
        self.formatter.format_amount(amount)
    }

    pub fn refresh_formatter(&mut self) {
        self.formatter = self.config.formatter();
    }

    pub fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            debug!(command, ?args, "dispatching command");
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = crate::cli::shell::parse_command_line(line)
            .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }
        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt("Exit shell?")
            .default(true)
            .interact()?)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(&message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::DebtNotSet => {
                cli_io::print_error(CommandError::DebtNotSet);
                cli_io::print_hint("Try `debt 5000` followed by `start`.");
                Ok(())
            }
            other => {
                cli_io::print_error(other);
                Ok(())
            }
        }
    }
}

fn parse_position(raw: &str, what: &str) -> Result<usize, CommandError> {
    match raw.trim().parse::<usize>() {
        Ok(position) if position >= 1 => Ok(position - 1),
        _ => Err(CommandError::InvalidArguments(format!(
            "{} number must be 1 or greater, got `{}`",
            what, raw
        ))),
    }
}

/// Parses user-entered money such as `1200`, `1,200.50` or `$300`.
pub(crate) fn parse_amount(raw: &str) -> Result<f64, CommandError> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, ',' | '$' | '_'))
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CommandError::InvalidArguments(format!("`{}` is not an amount", raw)))
}
