//! Starting debt, the plan timeline and the summary.

use crate::cli::core::{CliMode, CommandError, CommandResult};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::render::{self, DEBT_FREE_BANNER, PLAN_COMPLETE};
use crate::cli::shell_context::{parse_amount, ShellContext};
use crate::domain::is_positive_amount;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "debt",
            "Set the starting debt (or edit it while tracking)",
            "debt <amount>",
            cmd_debt,
        ),
        CommandEntry::new("start", "Confirm the debt and begin tracking", "start", cmd_start),
        CommandEntry::new("show", "Show the period timeline", "show", cmd_show),
        CommandEntry::new(
            "summary",
            "Show total paid, current debt and progress",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "reset",
            "Delete the debt and every period",
            "reset [--yes]",
            cmd_reset,
        ),
    ]
}

fn cmd_debt(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = match args {
        [raw] => *raw,
        _ => {
            return Err(CommandError::InvalidArguments("usage: debt <amount>".into()));
        }
    };
    let amount = parse_amount(raw)?;
    if !is_positive_amount(amount) {
        return Err(CommandError::InvalidArguments(
            "Starting debt must be greater than zero.".into(),
        ));
    }

    let ledger = context.manager.set_initial_debt(Some(amount))?;
    let tracking = ledger.is_debt_set;
    let formatted = context.format(amount);
    if tracking {
        io::print_success(format!("Starting debt updated to {formatted}."));
    } else {
        io::print_success(format!("Starting debt set to {formatted}."));
        io::print_hint("Run `start` to begin tracking.");
    }
    Ok(())
}

fn cmd_start(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let ledger = context.ledger()?;
    if ledger.is_debt_set {
        io::print_info("Already tracking this debt.");
        return Ok(());
    }
    if !ledger.has_valid_debt() {
        return Err(CommandError::InvalidArguments(
            "Set a starting debt greater than zero first: `debt <amount>`.".into(),
        ));
    }

    context.manager.confirm_debt()?;
    io::print_success("Tracking started.");
    io::print_hint("Add your first period with `period add`.");
    Ok(())
}

fn cmd_show(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let ledger = context.ledger()?;
    if !ledger.is_debt_set {
        match ledger.initial_debt {
            Some(amount) => io::print_info(format!(
                "Starting debt: {} (not started)",
                context.format(amount)
            )),
            None => io::print_info("No starting debt yet."),
        }
        io::print_hint("Use `debt <amount>` and then `start`.");
        return Ok(());
    }

    output::section(format!(
        "Paying off {}",
        context.format(ledger.debt_amount())
    ));
    if ledger.periods.is_empty() {
        io::print_hint("No periods yet. Run `period add`.");
        return Ok(());
    }

    for (index, period) in ledger.periods.iter().enumerate() {
        let Some(projection) = context.manager.period_view(index) else {
            continue;
        };
        output::section(render::period_title(index, period));
        for line in render::period_card(period, &projection, &context.formatter) {
            io::print_info(line);
        }
    }

    if context.manager.is_plan_complete() {
        io::print_success(DEBT_FREE_BANNER);
        io::print_info(PLAN_COMPLETE);
    }
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.tracking_ledger()?;
    let Some(summary) = context.manager.summary() else {
        return Ok(());
    };
    output::section("Summary");
    for line in render::summary_lines(&summary, &context.formatter) {
        io::print_info(line);
    }
    if summary.plan_complete {
        io::print_success(DEBT_FREE_BANNER);
    }
    Ok(())
}

fn cmd_reset(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let forced = match args {
        [] => false,
        [flag] if flag.eq_ignore_ascii_case("--yes") || flag.eq_ignore_ascii_case("-y") => true,
        _ => {
            return Err(CommandError::InvalidArguments("usage: reset [--yes]".into()));
        }
    };

    if !forced {
        if context.mode == CliMode::Script {
            io::print_warning("Reset needs confirmation. Run `reset --yes` to delete all data.");
            return Ok(());
        }
        io::print_warning("This deletes your debt and every period. It cannot be undone.");
        if !context.confirm("Reset All Data?")? {
            io::print_info("Reset cancelled.");
            return Ok(());
        }
    }

    context.manager.reset_all()?;
    io::print_success("All data reset.");
    Ok(())
}
