use std::path::PathBuf;

use crate::cli::commands::{parse_position, ParsedArgs};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{line, section};
use crate::cli::registry::CommandEntry;
use crate::core::utils::{ensure_dir, PathResolver};
use crate::errors::BudgetError;
use crate::receipt::{export_receipt, FileReceiptSource, ReceiptImage, ReceiptSource};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "expense",
        "Log expenses and view receipts",
        "expense add <description> <amount> [--receipt <image>]
         expense list
         expense receipt <number> [output path]",
        cmd_expense,
    )]
}

fn cmd_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((sub, rest)) = args.split_first() else {
        return list(context);
    };
    match sub.to_lowercase().as_str() {
        "add" => add(context, rest),
        "list" => list(context),
        "receipt" => receipt(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown subcommand `expense {}`",
            other
        ))),
    }
}

fn add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["receipt"])?;
    let mut receipt_path = parsed.flag("receipt").map(str::to_string);

    let (description, amount) = match parsed.positional.as_slice() {
        [] if context.is_interactive() => {
            ensure_can_add(context)?;
            let description = io::prompt_text(&context.theme, "Description", None)?;
            let amount = io::prompt_text(&context.theme, "Amount", None)?;
            if receipt_path.is_none() {
                let path = io::prompt_text(&context.theme, "Receipt image (optional)", None)?;
                if !path.trim().is_empty() {
                    receipt_path = Some(path.trim().to_string());
                }
            }
            (description, amount)
        }
        [description @ .., amount] if !description.is_empty() => {
            (description.join(" "), amount.to_string())
        }
        _ => {
            return Err(CommandError::Core(BudgetError::Validation(
                "amount and description are required".into(),
            )))
        }
    };

    let receipt = match receipt_path {
        Some(path) => Some(capture(&mut FileReceiptSource::new(path))?),
        None => None,
    };

    let expense = context
        .tracker
        .add_expense(&description, &amount, receipt.map(|image| image.to_data_url()))?;
    let total = context
        .tracker
        .period_view()
        .map(|view| view.total())
        .unwrap_or_default();
    let fmt = context.formatter();
    io::print_success(format!(
        "Added `{}` ({}){}. Running total: {}.",
        expense.description,
        fmt.amount(expense.amount),
        if expense.has_receipt() { " with receipt" } else { "" },
        fmt.amount(total)
    ));
    Ok(())
}

fn capture(source: &mut dyn ReceiptSource) -> Result<ReceiptImage, CommandError> {
    Ok(source.capture()?)
}

/// Fails early, before prompting, when nothing can accept an expense.
fn ensure_can_add(context: &ShellContext) -> CommandResult {
    match context.tracker.period_view() {
        Some(view) if view.read_only => Err(BudgetError::ReadOnly(view.period.month.clone()).into()),
        Some(_) => Ok(()),
        None => Err(BudgetError::NoActivePeriod.into()),
    }
}

fn list(context: &mut ShellContext) -> CommandResult {
    let view = context
        .tracker
        .period_view()
        .ok_or(CommandError::Core(BudgetError::NoActivePeriod))?;
    let fmt = context.formatter();
    section(format!("{}: {}", view.context_label(), view.period.month));
    if view.expenses.is_empty() {
        line("  No expenses recorded yet.");
    }
    for (index, expense) in view.expenses.iter().enumerate() {
        line(format!(
            "  {:>3}. {:<30} {:>14}{}",
            index + 1,
            expense.description,
            fmt.amount(expense.amount),
            if expense.has_receipt() { "  [receipt]" } else { "" }
        ));
    }
    line(format!("  Total: {}", fmt.amount(view.total())));
    Ok(())
}

fn receipt(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(position) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: expense receipt <number> [output path]".into(),
        ));
    };
    let view = context
        .tracker
        .period_view()
        .ok_or(CommandError::Core(BudgetError::NoActivePeriod))?;
    let index = parse_position(position, view.expenses.len(), "expense")?;
    let expense = &view.expenses[index];
    let Some(data_url) = expense.receipt.as_deref() else {
        io::print_info(format!("`{}` has no photo attached.", expense.description));
        return Ok(());
    };

    let destination = match args.get(1) {
        Some(path) => PathBuf::from(path),
        None => {
            let dir = PathResolver::scratch_dir();
            ensure_dir(&dir)?;
            let extension = ReceiptImage::from_data_url(data_url)?.extension();
            dir.join(format!("receipt_{}.{}", expense.id, extension))
        }
    };
    let (width, height) = export_receipt(data_url, &destination)?;
    io::print_success(format!(
        "Receipt for `{}` ({}x{} px) written to {}.",
        expense.description,
        width,
        height,
        destination.display()
    ));
    Ok(())
}
