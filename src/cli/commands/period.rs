use chrono::NaiveDate;

use crate::cli::commands::ParsedArgs;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{line, section};
use crate::cli::registry::CommandEntry;
use crate::core::View;
use crate::currency::{suggested_period_label, DateFormatStyle, LocaleConfig};
use crate::domain::BudgetPeriod;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "period",
        "Start, inspect, or close the monthly budget period",
        "period start [label] [--goal <text>] [--date <date>]
         period show
         period close
         period skip",
        cmd_period,
    )]
}

fn cmd_period(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((sub, rest)) = args.split_first() else {
        print_overview(context);
        return Ok(());
    };
    match sub.to_lowercase().as_str() {
        "start" => start(context, rest),
        "show" => {
            print_overview(context);
            Ok(())
        }
        "close" => close(context),
        "skip" => {
            context.tracker.dismiss_setup();
            io::print_info("Showing monthly history. Use `period start` when you are ready.");
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown subcommand `period {}`",
            other
        ))),
    }
}

fn start(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["goal", "date"])?;
    let locale = context.config.locale_config();
    let today = context.tracker.clock().today();
    let suggested = suggested_period_label(&locale, today);

    let mut label = if parsed.positional.is_empty() {
        None
    } else {
        Some(parsed.positional.join(" "))
    };
    let mut goal = parsed.flag("goal").map(str::to_string);
    let mut date_text = parsed.flag("date").map(str::to_string);

    if context.is_interactive() && label.is_none() {
        label = Some(io::prompt_text(&context.theme, "Reference month", Some(&suggested))?);
        if goal.is_none() {
            goal = Some(io::prompt_text(&context.theme, "Financial goal (optional)", None)?);
        }
        if date_text.is_none() {
            let initial = context.formatter().date(today);
            date_text = Some(io::prompt_text(&context.theme, "Start date", Some(&initial))?);
        }
    }

    let label = label.unwrap_or(suggested);
    let start_date = match date_text {
        Some(raw) => parse_date(&raw, &locale)?,
        None => today,
    };
    let period = BudgetPeriod::new(label.trim(), goal.as_deref(), start_date)?;
    context.tracker.start_period(period)?;
    io::print_success(format!(
        "Budget period `{}` started on {}.",
        label.trim(),
        context.formatter().date(start_date)
    ));
    Ok(())
}

fn close(context: &mut ShellContext) -> CommandResult {
    let record = context.tracker.close_period()?;
    io::print_success(format!(
        "Closed `{}` with {} expense(s), total {}.",
        record.budget.month,
        record.expenses.len(),
        context.formatter().amount(record.total)
    ));
    Ok(())
}

/// Accepts ISO dates and the locale's own day/month order.
pub(crate) fn parse_date(raw: &str, locale: &LocaleConfig) -> Result<NaiveDate, CommandError> {
    let raw = raw.trim();
    let local_format = match locale.date_format {
        DateFormatStyle::DayMonthYear => "%d/%m/%Y",
        DateFormatStyle::MonthDayYear => "%m/%d/%Y",
    };
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, local_format))
        .map_err(|_| CommandError::InvalidArguments(format!("`{}` is not a valid date", raw)))
}

/// Describes the current view: setup prompt, open period, or archive.
pub(crate) fn print_overview(context: &ShellContext) {
    let fmt = context.formatter();
    match context.tracker.view() {
        View::Setup => {
            section("Welcome");
            line("No budget period yet.");
            io::print_hint("Use `period start` to begin, or `period skip` to browse history.");
        }
        View::History { .. } => {
            let records = context.tracker.history().len();
            section("Monthly history");
            line(format!(
                "{} archived period(s), grand total {}.",
                records,
                fmt.amount(context.tracker.grand_total())
            ));
            io::print_hint("Use `history list` to browse or `period start` to open a new month.");
        }
        View::Tracking(_) | View::Inspecting(_) => {
            let Some(view) = context.tracker.period_view() else {
                return;
            };
            section(view.context_label());
            line(format!("  Month      : {}", view.period.month));
            if let Some(goal) = view.period.goal() {
                line(format!("  Goal       : {}", goal));
            }
            line(format!("  Started    : {}", fmt.date(view.period.start_date)));
            line(format!("  Expenses   : {}", view.expenses.len()));
            line(format!("  Total      : {}", fmt.amount(view.total())));
            if view.read_only {
                io::print_hint("Archived periods are read-only. Use `history back` to return.");
            }
        }
    }
}
