use crate::cli::io;
use crate::cli::output::{line, section};
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    section("Available commands");
    for entry in registry.list() {
        line(format!("  {:<10} {}", entry.name, entry.description));
    }
    io::print_hint("Use `help <command>` for details.");
}

pub fn print_command(entry: &CommandEntry) {
    section(format!("Help: {}", entry.name));
    line(format!("  {}", entry.description));
    for usage in entry.usage.lines() {
        line(format!("  usage: {}", usage.trim()));
    }
}
