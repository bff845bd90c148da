mod common;

use std::fs;

use chrono::NaiveDate;
use common::{png_data_url, setup_test_env, test_home};
use monthly_budget::{
    currency::AmountFormatter,
    domain::BudgetPeriod,
    report::{ExportOutcome, FileReportSink, GenerationFlag, ReportError, ReportKind, ReportService},
};

fn march() -> BudgetPeriod {
    BudgetPeriod::new(
        "Março/2025",
        None,
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
    )
    .unwrap()
}

#[test]
fn both_reports_are_written_as_pdf_files() {
    let (mut tracker, _config, base) = setup_test_env();
    tracker.start_period(march()).unwrap();
    tracker
        .add_expense("Mercado", "120,50", Some(png_data_url(40, 80)))
        .unwrap();
    tracker.add_expense("Luz", "80", None).unwrap();

    let reports = base.join("reports");
    let mut sink = FileReportSink::with_scratch(&reports, base.join("scratch"));
    let flag = GenerationFlag::new();
    let view = tracker.period_view().unwrap();
    let fmt = AmountFormatter::default();

    for kind in [ReportKind::Summary, ReportKind::Detailed] {
        let outcome = ReportService::generate_pdf(&flag, kind, &view, &fmt, &mut sink).unwrap();
        let expected = reports.join(kind.file_name("Março-2025"));
        assert_eq!(outcome, ExportOutcome::Saved(expected.clone()));
        let bytes = fs::read(&expected).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
    assert!(reports.join("summary_Março-2025.pdf").exists());
    assert!(reports.join("detailed_Março-2025.pdf").exists());
    assert!(!flag.is_raised());
}

#[test]
fn archived_periods_can_be_reported_again() {
    let (mut tracker, _config, base) = setup_test_env();
    tracker.start_period(march()).unwrap();
    tracker.add_expense("Água", "35", None).unwrap();
    let record = tracker.close_period().unwrap();
    tracker.select_record(record.id).unwrap();

    let mut sink = FileReportSink::with_scratch(base.join("out"), base.join("scratch"));
    let view = tracker.period_view().unwrap();
    let outcome = ReportService::generate_pdf(
        &GenerationFlag::new(),
        ReportKind::Summary,
        &view,
        &AmountFormatter::default(),
        &mut sink,
    )
    .unwrap();
    assert!(outcome.path().exists());
    assert_eq!(tracker.history().len(), 1);
}

#[test]
fn empty_detailed_report_writes_nothing() {
    let (mut tracker, _config, base) = setup_test_env();
    tracker.start_period(march()).unwrap();

    let reports = base.join("reports");
    let mut sink = FileReportSink::with_scratch(&reports, base.join("scratch"));
    let view = tracker.period_view().unwrap();
    let err = ReportService::generate_pdf(
        &GenerationFlag::new(),
        ReportKind::Detailed,
        &view,
        &AmountFormatter::default(),
        &mut sink,
    )
    .unwrap_err();

    assert!(matches!(err, ReportError::EmptyPeriod));
    assert!(!reports.exists());
}

#[test]
fn unwritable_report_dir_falls_back_to_scratch() {
    let base = test_home();
    let blocked = base.join("blocked");
    fs::write(&blocked, b"not a directory").unwrap();
    let mut sink = FileReportSink::with_scratch(&blocked, base.join("scratch"));

    let period = march();
    let view = monthly_budget::core::PeriodView {
        period: &period,
        expenses: &[],
        read_only: false,
    };
    let outcome = ReportService::generate_pdf(
        &GenerationFlag::new(),
        ReportKind::Summary,
        &view,
        &AmountFormatter::default(),
        &mut sink,
    )
    .unwrap();

    assert_eq!(
        outcome,
        ExportOutcome::Alternate(base.join("scratch").join("summary_Março-2025.pdf"))
    );
}
