use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::render::{DEBT_FREE_BANNER, PLAN_COMPLETE};
use crate::cli::shell_context::{parse_amount, ShellContext};
use crate::domain::{is_valid_amount, PeriodField};

const USAGE: &str =
    "period <add|remove <n>|income <n> <amount>|pay <n> <amount>|label <n> <text>>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "period",
        "Add, edit or remove half-month periods",
        USAGE,
        cmd_period,
    )]
}

fn cmd_period(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(format!("usage: {USAGE}")));
    };
    context.tracking_ledger()?;

    match subcommand.to_ascii_lowercase().as_str() {
        "add" | "new" => handle_add(context),
        "remove" | "rm" | "delete" => handle_remove(context, rest),
        "income" => handle_amount(context, rest, "income", PeriodField::Income),
        "pay" | "payment" => handle_amount(context, rest, "pay", PeriodField::PaymentToDebt),
        "label" | "rename" => handle_label(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown period subcommand `{}`. Available: add, remove, income, pay, label",
            other
        ))),
    }
}

fn handle_add(context: &mut ShellContext) -> CommandResult {
    if !context.manager.can_add_period() {
        io::print_success(DEBT_FREE_BANNER);
        io::print_info(format!("{PLAN_COMPLETE} No more periods are needed."));
        return Ok(());
    }
    let ledger = context.manager.add_period()?;
    if let Some(period) = ledger.last_period() {
        io::print_success(format!(
            "Added period {} ({}).",
            ledger.periods.len(),
            period.date_label
        ));
    }
    Ok(())
}

fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [position] = args else {
        return Err(CommandError::InvalidArguments("usage: period remove <n>".into()));
    };
    let (_, period) = context.period_at(position)?;
    let (id, label) = (period.id.clone(), period.date_label.clone());
    context.manager.remove_period(&id)?;
    io::print_success(format!("Removed period {label}."));
    Ok(())
}

fn handle_amount(
    context: &mut ShellContext,
    args: &[&str],
    name: &str,
    field: fn(f64) -> PeriodField,
) -> CommandResult {
    let [position, raw] = args else {
        return Err(CommandError::InvalidArguments(format!(
            "usage: period {name} <n> <amount>"
        )));
    };
    let amount = parse_amount(raw)?;
    if !is_valid_amount(amount) {
        return Err(CommandError::InvalidArguments(
            "Amounts cannot be negative.".into(),
        ));
    }
    let (index, period) = context.period_at(position)?;
    let id = period.id.clone();
    context.manager.update_period(&id, field(amount))?;

    if let Some(remaining) = context.manager.remaining_debt(index) {
        io::print_success(format!(
            "Period {} updated. Remaining debt: {}.",
            position,
            context.format(remaining)
        ));
    }
    Ok(())
}

fn handle_label(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((position, words)) = args.split_first() else {
        return Err(CommandError::InvalidArguments("usage: period label <n> <text>".into()));
    };
    let label = words.join(" ");
    let (_, period) = context.period_at(position)?;
    let id = period.id.clone();
    context
        .manager
        .update_period(&id, PeriodField::DateLabel(label.clone()))?;
    io::print_success(format!("Period {position} renamed to \"{label}\"."));
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::cli::shell_context::test_support::script_context;

    #[test]
    fn period_commands_need_tracking() {
        let (mut context, _temp) = script_context();
        assert!(context.process_line("period add").is_err());
        assert!(context.ledger().unwrap().periods.is_empty());
    }

    #[test]
    fn add_and_edit_periods_by_position() {
        let (mut context, _temp) = script_context();
        for line in ["debt 1000", "start", "period add", "period add"] {
            context.process_line(line).unwrap();
        }
        context.process_line("period income 2 500").unwrap();
        context.process_line("period pay 2 $250").unwrap();
        context.process_line("period label 1 \"March rent month\"").unwrap();

        let ledger = context.ledger().unwrap();
        assert_eq!(ledger.periods.len(), 2);
        assert_eq!(ledger.periods[0].date_label, "March rent month");
        assert_eq!(ledger.periods[1].date_label, "16-31 Mar 2025");
        assert_eq!(ledger.periods[1].income, 500.0);
        assert_eq!(ledger.periods[1].payment_to_debt, 250.0);
    }

    #[test]
    fn rejects_negative_amounts_and_bad_positions() {
        let (mut context, _temp) = script_context();
        for line in ["debt 1000", "start", "period add"] {
            context.process_line(line).unwrap();
        }
        assert!(context.process_line("period income 1 -5").is_err());
        assert!(context.process_line("period income 3 5").is_err());
        assert_eq!(context.ledger().unwrap().periods[0].income, 0.0);
    }

    #[test]
    fn add_is_refused_once_paid_off() {
        let (mut context, _temp) = script_context();
        for line in ["debt 100", "start", "period add", "period pay 1 100", "period add"] {
            context.process_line(line).unwrap();
        }
        assert_eq!(context.ledger().unwrap().periods.len(), 1);

        context.process_line("period remove 1").unwrap();
        assert!(context.ledger().unwrap().periods.is_empty());
    }
}
