use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    core::{BudgetTracker, View},
    currency::AmountFormatter,
    report::{FileReportSink, GenerationFlag},
    storage::JsonFileStore,
};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub tracker: BudgetTracker<JsonFileStore>,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub generation: GenerationFlag,
    pub running: bool,
}

impl ShellContext {
    pub fn formatter(&self) -> AmountFormatter {
        self.config.formatter()
    }

    pub fn report_sink(&self) -> FileReportSink {
        FileReportSink::new(self.config.resolve_report_dir())
    }

    pub fn prompt(&self) -> String {
        match self.tracker.view() {
            View::Setup => "budget(setup)> ".into(),
            View::Tracking(active) => format!("budget[{}]> ", active.period.month),
            View::History { pending_delete: Some(_) } => "budget(history: confirm?)> ".into(),
            View::History { .. } => "budget(history)> ".into(),
            View::Inspecting(record) => format!("budget(history: {})> ", record.budget.month),
        }
    }

    /// `(name, usage)` pairs feeding shell completion.
    pub fn completion_entries(&self) -> Vec<(&'static str, &'static str)> {
        self.registry
            .list()
            .into_iter()
            .map(|entry| (entry.name, entry.usage))
            .collect()
    }
}
