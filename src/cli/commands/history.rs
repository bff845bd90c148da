use crate::cli::commands::{parse_position, period::print_overview};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{line, section};
use crate::cli::registry::CommandEntry;
use crate::domain::Displayable;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "history",
        "Browse, inspect, and delete closed periods",
        "history list
         history open <number>
         history back
         history delete <number>
         history confirm
         history cancel",
        cmd_history,
    )]
}

fn cmd_history(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    context.tracker.ensure_not_tracking("browsing history")?;
    let Some((sub, rest)) = args.split_first() else {
        return list(context);
    };
    match sub.to_lowercase().as_str() {
        "list" => list(context),
        "open" => open(context, rest),
        "back" => {
            context.tracker.back();
            list(context)
        }
        "delete" => delete(context, rest),
        "confirm" => confirm(context),
        "cancel" => {
            context.tracker.cancel_delete();
            io::print_info("Deletion cancelled.");
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown subcommand `history {}`",
            other
        ))),
    }
}

fn list(context: &mut ShellContext) -> CommandResult {
    let fmt = context.formatter();
    let records = context.tracker.history_newest_first();
    section("Monthly history");
    if records.is_empty() {
        line("  No closed periods yet.");
        return Ok(());
    }
    for (index, record) in records.iter().enumerate() {
        line(format!(
            "  {:>3}. {:<32} {:>12} | {} expense(s) | {}",
            index + 1,
            record.budget.display_label(),
            fmt.date(record.budget.start_date),
            record.expenses.len(),
            fmt.amount(record.total)
        ));
    }
    line(format!("  Grand total: {}", fmt.amount(context.tracker.grand_total())));
    Ok(())
}

/// Resolves a list number (newest first) to a record id.
fn record_id(context: &ShellContext, args: &[&str], usage: &str) -> Result<i64, CommandError> {
    let raw = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments(format!("usage: {}", usage)))?;
    let records = context.tracker.history_newest_first();
    let index = parse_position(raw, records.len(), "record")?;
    Ok(records[index].id)
}

fn open(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = record_id(context, args, "history open <number>")?;
    context.tracker.select_record(id)?;
    print_overview(context);
    Ok(())
}

fn delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = record_id(context, args, "history delete <number>")?;
    let month = context.tracker.request_delete(id)?.budget.month.clone();

    if context.is_interactive() {
        let prompt = format!("Delete the history of `{}`? This cannot be undone.", month);
        if io::confirm_action(&context.theme, &prompt, false)? {
            return confirm(context);
        }
        context.tracker.cancel_delete();
        io::print_info("Deletion cancelled.");
        return Ok(());
    }

    io::print_warning(format!(
        "About to delete `{}`. Run `history confirm` to proceed or `history cancel` to keep it.",
        month
    ));
    Ok(())
}

fn confirm(context: &mut ShellContext) -> CommandResult {
    let record = context.tracker.confirm_delete()?;
    io::print_success(format!("Deleted `{}` from history.", record.budget.month));
    Ok(())
}
