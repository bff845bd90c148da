use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{line, section};
use crate::cli::registry::CommandEntry;
use crate::config::CONFIG_KEYS;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change preferences",
        "config show
         config set <locale|currency|ui_color_enabled|report_dir> <value>",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        show(context);
        return Ok(());
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    CONFIG_KEYS.join("|")
                )));
            }
            let key = args[1].to_lowercase();
            let value = args[2..].join(" ");
            context.config.set_field(&key, &value)?;
            context.persist_config()?;
            io::apply_config(&context.config);
            io::print_success(format!("`{}` updated.", key));
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown subcommand `config {}`",
            other
        ))),
    }
}

fn show(context: &ShellContext) {
    let config = &context.config;
    section("Configuration");
    line(format!("  locale           : {}", config.locale));
    line(format!("  currency         : {}", config.currency));
    line(format!("  ui_color_enabled : {}", config.ui_color_enabled));
    line(format!(
        "  report_dir       : {}{}",
        config.resolve_report_dir().display(),
        if config.report_dir.is_none() { " (default)" } else { "" }
    ));
    line(format!(
        "  sample           : {} on {}",
        config.formatter().amount(1234.5),
        config.formatter().date(context.tracker.clock().today())
    ));
}
