//! PDF summaries and detailed receipt reports for a live or archived period.

pub mod document;
pub mod layout;
pub mod pdf;
pub mod sink;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use thiserror::Error;

use crate::core::view::PeriodView;
use crate::currency::AmountFormatter;
use crate::receipt::ReceiptError;

pub use document::{Align, Document};
pub use pdf::PdfDocument;
pub use sink::{export, ExportOutcome, FileReportSink, ReportSink};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("No expenses were recorded to build the report")]
    EmptyPeriod,
    #[error("A report is already being generated")]
    AlreadyGenerating,
    #[error("Receipt image error: {0}")]
    Image(#[from] ReceiptError),
    #[error("Failed to render report: {0}")]
    Render(String),
    #[error("Failed to export report: {primary}; fallback also failed: {fallback}")]
    Export { primary: String, fallback: String },
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Summary,
    Detailed,
}

impl ReportKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "summary" => Some(ReportKind::Summary),
            "detailed" => Some(ReportKind::Detailed),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ReportKind::Summary => "Monthly Financial Report",
            ReportKind::Detailed => "Detailed Report",
        }
    }

    /// `summary_Março-2025.pdf` / `detailed_Março-2025.pdf`.
    pub fn file_name(self, file_label: &str) -> String {
        let prefix = match self {
            ReportKind::Summary => "summary",
            ReportKind::Detailed => "detailed",
        };
        format!("{}_{}.pdf", prefix, file_label)
    }
}

/// Shared "report in progress" signal.
#[derive(Debug, Clone, Default)]
pub struct GenerationFlag(Arc<AtomicBool>);

impl GenerationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Raises the flag, or fails if it is already raised. Lowered when the guard drops.
    pub fn raise(&self) -> Result<GenerationGuard> {
        self.0
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| ReportError::AlreadyGenerating)?;
        Ok(GenerationGuard(Arc::clone(&self.0)))
    }
}

#[derive(Debug)]
pub struct GenerationGuard(Arc<AtomicBool>);

impl Drop for GenerationGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct ReportService;

impl ReportService {
    /// Renders `kind` for `view` into a fresh document and hands the bytes to `sink`.
    ///
    /// `new_document` is only called once the period is known to be renderable.
    pub fn generate<D, F, K>(
        flag: &GenerationFlag,
        kind: ReportKind,
        view: &PeriodView<'_>,
        fmt: &AmountFormatter,
        new_document: F,
        sink: &mut K,
    ) -> Result<ExportOutcome>
    where
        D: Document,
        F: FnOnce(&str) -> Result<D>,
        K: ReportSink + ?Sized,
    {
        let _guard = flag.raise()?;
        if kind == ReportKind::Detailed && view.expenses.is_empty() {
            return Err(ReportError::EmptyPeriod);
        }

        let mut doc = new_document(kind.title())?;
        match kind {
            ReportKind::Summary => layout::render_summary(&mut doc, view, fmt),
            ReportKind::Detailed => layout::render_detailed(&mut doc, view, fmt)?,
        }
        let bytes = doc.finish().map_err(|err| {
            tracing::error!(error = %err, "report rendering failed");
            err
        })?;

        let file_name = kind.file_name(&view.period.file_label());
        let outcome = export(sink, &file_name, &bytes)?;
        tracing::info!(
            kind = ?kind,
            period = %view.period.month,
            path = %outcome.path().display(),
            "report exported"
        );
        Ok(outcome)
    }

    /// Same as [`ReportService::generate`] with the printpdf-backed document.
    pub fn generate_pdf<K: ReportSink + ?Sized>(
        flag: &GenerationFlag,
        kind: ReportKind,
        view: &PeriodView<'_>,
        fmt: &AmountFormatter,
        sink: &mut K,
    ) -> Result<ExportOutcome> {
        Self::generate(flag, kind, view, fmt, PdfDocument::new, sink)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::{BudgetPeriod, Expense};
    use chrono::NaiveDate;
    use image::DynamicImage;
    use std::{io, path::PathBuf};

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Op {
        FontSize(f32),
        Gray(u8),
        Text {
            text: String,
            x: f32,
            y: f32,
            align: Align,
        },
        AddPage,
        Image {
            x: f32,
            y: f32,
            width: f32,
            height: f32,
        },
    }

    /// Records drawing calls on an A4 page.
    #[derive(Debug)]
    pub(crate) struct RecordingDocument {
        pub ops: Vec<Op>,
        pub pages: usize,
    }

    impl Default for RecordingDocument {
        fn default() -> Self {
            Self {
                ops: Vec::new(),
                pages: 1,
            }
        }
    }

    impl Document for RecordingDocument {
        fn set_font_size(&mut self, size: f32) {
            self.ops.push(Op::FontSize(size));
        }

        fn set_text_gray(&mut self, level: u8) {
            self.ops.push(Op::Gray(level));
        }

        fn text(&mut self, text: &str, x: f32, y: f32, align: Align) {
            self.ops.push(Op::Text {
                text: text.to_string(),
                x,
                y,
                align,
            });
        }

        fn add_page(&mut self) {
            self.pages += 1;
            self.ops.push(Op::AddPage);
        }

        fn image(&mut self, _: &DynamicImage, x: f32, y: f32, width: f32, height: f32) -> Result<()> {
            self.ops.push(Op::Image {
                x,
                y,
                width,
                height,
            });
            Ok(())
        }

        fn page_width(&self) -> f32 {
            210.0
        }

        fn page_height(&self) -> f32 {
            297.0
        }

        fn finish(self) -> Result<Vec<u8>> {
            Ok(format!("{} ops", self.ops.len()).into_bytes())
        }
    }

    #[derive(Default)]
    struct MemorySink {
        saved: Vec<(String, Vec<u8>)>,
        fail_save: bool,
    }

    impl ReportSink for MemorySink {
        fn save(&mut self, file_name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
            if self.fail_save {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
            }
            self.saved.push((file_name.to_string(), bytes.to_vec()));
            Ok(PathBuf::from(file_name))
        }

        fn open_alternate(&mut self, _: &str, _: &[u8]) -> io::Result<PathBuf> {
            Err(io::Error::new(io::ErrorKind::Other, "no viewer"))
        }
    }

    fn period() -> BudgetPeriod {
        BudgetPeriod::new(
            "Março/2025",
            None,
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn summary_is_exported_with_label_in_file_name() {
        let period = period();
        let expenses = vec![Expense::new(1, "Mercado", 120.5)];
        let view = PeriodView {
            period: &period,
            expenses: &expenses,
            read_only: false,
        };
        let flag = GenerationFlag::new();
        let mut sink = MemorySink::default();
        let outcome = ReportService::generate(
            &flag,
            ReportKind::Summary,
            &view,
            &AmountFormatter::default(),
            |_| Ok(RecordingDocument::default()),
            &mut sink,
        )
        .unwrap();

        assert_eq!(outcome, ExportOutcome::Saved("summary_Março-2025.pdf".into()));
        assert_eq!(sink.saved.len(), 1);
        assert!(!flag.is_raised());
    }

    #[test]
    fn empty_detailed_report_creates_no_document() {
        let period = period();
        let view = PeriodView {
            period: &period,
            expenses: &[],
            read_only: false,
        };
        let flag = GenerationFlag::new();
        let mut sink = MemorySink::default();
        let mut created = false;
        let err = ReportService::generate(
            &flag,
            ReportKind::Detailed,
            &view,
            &AmountFormatter::default(),
            |_| {
                created = true;
                Ok(RecordingDocument::default())
            },
            &mut sink,
        )
        .unwrap_err();

        assert!(matches!(err, ReportError::EmptyPeriod));
        assert!(!created);
        assert!(sink.saved.is_empty());
        assert!(!flag.is_raised());
    }

    #[test]
    fn second_request_is_refused_while_generating() {
        let flag = GenerationFlag::new();
        let guard = flag.raise().unwrap();
        assert!(matches!(flag.raise(), Err(ReportError::AlreadyGenerating)));

        let period = period();
        let view = PeriodView {
            period: &period,
            expenses: &[],
            read_only: false,
        };
        let err = ReportService::generate(
            &flag,
            ReportKind::Summary,
            &view,
            &AmountFormatter::default(),
            |_| Ok(RecordingDocument::default()),
            &mut MemorySink::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ReportError::AlreadyGenerating));

        drop(guard);
        assert!(!flag.is_raised());
        assert!(flag.raise().is_ok());
    }

    #[test]
    fn exhausted_export_chain_lowers_the_flag() {
        let period = period();
        let view = PeriodView {
            period: &period,
            expenses: &[],
            read_only: true,
        };
        let flag = GenerationFlag::new();
        let mut sink = MemorySink {
            fail_save: true,
            ..Default::default()
        };
        let err = ReportService::generate(
            &flag,
            ReportKind::Summary,
            &view,
            &AmountFormatter::default(),
            |_| Ok(RecordingDocument::default()),
            &mut sink,
        )
        .unwrap_err();

        match err {
            ReportError::Export { primary, fallback } => {
                assert!(primary.contains("read-only"));
                assert!(fallback.contains("no viewer"));
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(!flag.is_raised());
    }

    #[test]
    fn kinds_parse_from_cli_words() {
        assert_eq!(ReportKind::parse("Summary"), Some(ReportKind::Summary));
        assert_eq!(ReportKind::parse("detailed"), Some(ReportKind::Detailed));
        assert_eq!(ReportKind::parse("full"), None);
    }
}
