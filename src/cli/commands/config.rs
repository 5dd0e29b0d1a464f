use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View or change display preferences",
        "config [show|set <locale|currency> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => show_config(context),
        [action] if action.eq_ignore_ascii_case("show") => show_config(context),
        [action, key, value] if action.eq_ignore_ascii_case("set") => {
            set_config_value(context, key, value)
        }
        _ => Err(CommandError::InvalidArguments(
            "usage: config [show|set <locale|currency> <value>]".into(),
        )),
    }
}

fn show_config(context: &mut ShellContext) -> CommandResult {
    let data_dir = context.config_manager.data_dir(&context.config);
    output::section("Configuration");
    io::print_info(format!("  Locale:       {}", context.config.locale));
    io::print_info(format!("  Currency:     {}", context.config.currency));
    io::print_info(format!("  Storage key:  {}", context.config.storage_key));
    io::print_info(format!("  Data dir:     {}", data_dir.display()));
    io::print_info(format!(
        "  Config file:  {}",
        context.config_manager.path().display()
    ));
    io::print_info(format!("  Sample:       {}", context.format(1234.5)));
    Ok(())
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let value = value.trim();
    if value.is_empty() {
        return Err(CommandError::InvalidArguments("value cannot be empty".into()));
    }
    match key.to_ascii_lowercase().as_str() {
        "locale" => context.config.locale = value.to_string(),
        "currency" => context.config.currency = value.to_ascii_uppercase(),
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown config key `{}`",
                other
            )))
        }
    }
    context.config_manager.save(&context.config)?;
    context.refresh_formatter();
    io::print_success("Configuration updated.");
    Ok(())
}
