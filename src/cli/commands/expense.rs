use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::{parse_amount, ShellContext};
use crate::domain::{is_valid_amount, ExpenseField};

const USAGE: &str =
    "expense <add <n>|label <n> <m> <text>|amount <n> <m> <amount>|remove <n> <m>>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "expense",
        "Manage the expenses of a period",
        USAGE,
        cmd_expense,
    )]
}

fn cmd_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(format!("usage: {USAGE}")));
    };

    match subcommand.to_ascii_lowercase().as_str() {
        "add" | "new" => handle_add(context, rest),
        "label" | "rename" => handle_label(context, rest),
        "amount" | "set" => handle_amount(context, rest),
        "remove" | "rm" | "delete" => handle_remove(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown expense subcommand `{}`. Available: add, label, amount, remove",
            other
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [position] = args else {
        return Err(CommandError::InvalidArguments("usage: expense add <n>".into()));
    };
    let (index, period) = context.period_at(position)?;
    let id = period.id.clone();
    let ledger = context.manager.add_expense(&id)?;
    let count = ledger.periods.get(index).map_or(0, |period| period.expenses.len());
    io::print_success(format!("Added expense {count} to period {position}."));
    Ok(())
}

fn handle_label(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [period_position, expense_position, words @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: expense label <n> <m> <text>".into(),
        ));
    };
    let label = words.join(" ");
    let (period_id, expense_id) = context.expense_at(period_position, expense_position)?;
    context
        .manager
        .update_expense(&period_id, &expense_id, ExpenseField::Label(label.clone()))?;
    io::print_success(format!("Expense {expense_position} renamed to \"{label}\"."));
    Ok(())
}

fn handle_amount(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [period_position, expense_position, raw] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: expense amount <n> <m> <amount>".into(),
        ));
    };
    let amount = parse_amount(raw)?;
    if !is_valid_amount(amount) {
        return Err(CommandError::InvalidArguments(
            "Amounts cannot be negative.".into(),
        ));
    }
    let (period_id, expense_id) = context.expense_at(period_position, expense_position)?;
    context
        .manager
        .update_expense(&period_id, &expense_id, ExpenseField::Amount(amount))?;
    io::print_success(format!(
        "Expense {} set to {}.",
        expense_position,
        context.format(amount)
    ));
    Ok(())
}

fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [period_position, expense_position] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: expense remove <n> <m>".into(),
        ));
    };
    let (period_id, expense_id) = context.expense_at(period_position, expense_position)?;
    context.manager.remove_expense(&period_id, &expense_id)?;
    io::print_success(format!(
        "Removed expense {expense_position} from period {period_position}."
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::cli::shell_context::test_support::script_context;

    #[test]
    fn expense_lifecycle_by_position() {
        let (mut context, _temp) = script_context();
        for line in [
            "debt 1000",
            "start",
            "period add",
            "expense amount 1 1 100",
            "expense add 1",
            "expense label 1 2 Groceries and fuel",
            "expense amount 1 2 60.5",
        ] {
            context.process_line(line).unwrap();
        }

        let period = &context.ledger().unwrap().periods[0];
        assert_eq!(period.expenses.len(), 2);
        assert_eq!(period.expenses[0].label, "Fixed Expense");
        assert_eq!(period.expenses[0].amount, 100.0);
        assert_eq!(period.expenses[1].label, "Groceries and fuel");
        assert_eq!(period.expenses[1].amount, 60.5);

        context.process_line("expense remove 1 1").unwrap();
        context.process_line("expense remove 1 1").unwrap();
        assert!(context.ledger().unwrap().periods[0].expenses.is_empty());
    }

    #[test]
    fn missing_expense_is_an_argument_error() {
        let (mut context, _temp) = script_context();
        for line in ["debt 1000", "start", "period add"] {
            context.process_line(line).unwrap();
        }
        assert!(context.process_line("expense remove 1 2").is_err());
        assert!(context.process_line("expense amount 1 1 -3").is_err());
    }
}
