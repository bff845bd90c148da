pub mod config;
pub mod expense;
pub mod history;
pub mod period;
pub mod report;
pub mod system;

use crate::cli::core::CommandError;
use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in system::definitions()
        .into_iter()
        .chain(period::definitions())
        .chain(expense::definitions())
        .chain(history::definitions())
        .chain(report::definitions())
        .chain(config::definitions())
    {
        registry.register(entry);
    }
}

/// Positional words and `--flag value` pairs of one command line.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct ParsedArgs<'a> {
    pub positional: Vec<&'a str>,
    pub flags: Vec<(&'a str, &'a str)>,
}

impl<'a> ParsedArgs<'a> {
    /// Splits `args`, accepting only the listed flag names (without `--`).
    pub fn parse(args: &[&'a str], known: &[&str]) -> Result<Self, CommandError> {
        let mut parsed = ParsedArgs::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.strip_prefix("--") {
                Some(name) if known.contains(&name) => {
                    let value = iter.next().ok_or_else(|| {
                        CommandError::InvalidArguments(format!("`--{}` needs a value", name))
                    })?;
                    parsed.flags.push((name, value));
                }
                Some(name) => {
                    return Err(CommandError::InvalidArguments(format!(
                        "unknown option `--{}`",
                        name
                    )))
                }
                None => parsed.positional.push(arg),
            }
        }
        Ok(parsed)
    }

    pub fn flag(&self, name: &str) -> Option<&'a str> {
        self.flags
            .iter()
            .rev()
            .find(|(flag, _)| *flag == name)
            .map(|(_, value)| *value)
    }
}

/// Parses a 1-based list position.
pub(crate) fn parse_position(raw: &str, len: usize, what: &str) -> Result<usize, CommandError> {
    match raw.trim().parse::<usize>() {
        Ok(position) if (1..=len).contains(&position) => Ok(position - 1),
        _ if len == 0 => Err(CommandError::InvalidArguments(format!("there are no {}s", what))),
        _ => Err(CommandError::InvalidArguments(format!(
            "{} number must be between 1 and {}",
            what, len
        ))),
    }
}
