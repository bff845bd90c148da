use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::errors::BudgetError;
use crate::report::{ExportOutcome, ReportKind, ReportService};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "report",
        "Export a PDF report of the period on screen",
        "report summary
         report detailed",
        cmd_report,
    )]
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind = match args.first() {
        Some(raw) => ReportKind::parse(raw).ok_or_else(|| {
            CommandError::InvalidArguments(format!(
                "unknown report `{}`; choose `summary` or `detailed`",
                raw
            ))
        })?,
        None => {
            return Err(CommandError::InvalidArguments(
                "usage: report <summary|detailed>".into(),
            ))
        }
    };

    let view = context
        .tracker
        .period_view()
        .ok_or(CommandError::Core(BudgetError::NoActivePeriod))?;
    let fmt = context.formatter();
    let mut sink = context.report_sink();
    io::print_info("Generating report...");
    let outcome = ReportService::generate_pdf(&context.generation, kind, &view, &fmt, &mut sink)?;

    match outcome {
        ExportOutcome::Saved(path) => {
            io::print_success(format!("Report saved to {}.", path.display()));
        }
        ExportOutcome::Alternate(path) => {
            io::print_warning(format!(
                "Could not save into {}; report written to {} instead.",
                sink.dir().display(),
                path.display()
            ));
        }
    }
    Ok(())
}
