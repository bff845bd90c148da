mod common;

use chrono::NaiveDate;
use common::{open_at, png_data_url, setup_test_env};
use monthly_budget::{
    core::View,
    domain::BudgetPeriod,
    errors::BudgetError,
    storage::{KeyValueStore, CURRENT_BUDGET_KEY, CURRENT_EXPENSES_KEY, HISTORY_KEY},
};
use serde_json::Value;

fn march() -> BudgetPeriod {
    BudgetPeriod::new(
        "Março/2025",
        Some("Guardar 300"),
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
    )
    .unwrap()
}

#[test]
fn march_is_tracked_closed_and_archived_on_disk() {
    let (mut tracker, _config, base) = setup_test_env();
    assert_eq!(tracker.view(), &View::Setup);

    tracker.start_period(march()).unwrap();
    tracker.add_expense("Mercado", "120,50", None).unwrap();
    tracker.add_expense("Luz", "80", Some(png_data_url(2, 2))).unwrap();
    let record = tracker.close_period().unwrap();
    assert!((record.total - 200.50).abs() < 1e-9);

    let store = tracker.store();
    assert_eq!(store.get(CURRENT_BUDGET_KEY).unwrap(), None);
    assert_eq!(store.get(CURRENT_EXPENSES_KEY).unwrap(), None);
    let raw = store.get(HISTORY_KEY).unwrap().unwrap();
    let json: Value = serde_json::from_str(&raw).unwrap();
    let archived = &json[0];
    assert_eq!(archived["budget"]["month"], "Março/2025");
    assert_eq!(archived["budget"]["startDate"], "2025-03-01");
    assert_eq!(archived["expenses"].as_array().unwrap().len(), 2);
    assert!(archived["expenses"][0].get("receipt").is_none());
    assert!(archived["expenses"][1]["receipt"]
        .as_str()
        .unwrap()
        .starts_with("data:image/png;base64,"));

    let (reopened, _) = open_at(&base);
    assert!(matches!(reopened.view(), View::History { .. }));
    assert_eq!(reopened.history(), &[record]);
    assert!((reopened.grand_total() - 200.50).abs() < 1e-9);
}

#[test]
fn open_period_survives_restart_with_running_total() {
    let (mut tracker, _config, base) = setup_test_env();
    tracker.start_period(march()).unwrap();
    tracker.add_expense("Padaria", "12.30", None).unwrap();
    tracker.add_expense("Farmácia", "7,70", None).unwrap();

    let (reopened, _) = open_at(&base);
    let active = reopened.active().expect("active period restored");
    assert_eq!(active.period, march());
    assert_eq!(active.expenses.len(), 2);
    assert!((active.total() - 20.0).abs() < 1e-9);
}

#[test]
fn archived_periods_are_read_only_and_deletable() {
    let (mut tracker, _config, base) = setup_test_env();
    tracker.start_period(march()).unwrap();
    tracker.add_expense("Mercado", "50", None).unwrap();
    let first = tracker.close_period().unwrap();

    tracker.select_record(first.id).unwrap();
    assert!(matches!(
        tracker.add_expense("Extra", "1", None),
        Err(BudgetError::ReadOnly(_))
    ));
    assert!(matches!(tracker.close_period(), Err(BudgetError::ReadOnly(_))));
    let view = tracker.period_view().unwrap();
    assert!(view.read_only);
    assert_eq!(view.context_label(), "Monthly history");

    tracker.back();
    tracker.request_delete(first.id).unwrap();
    tracker.cancel_delete();
    assert_eq!(tracker.history().len(), 1);

    tracker.request_delete(first.id).unwrap();
    tracker.confirm_delete().unwrap();
    assert!(tracker.history().is_empty());

    let (reopened, _) = open_at(&base);
    assert!(reopened.history().is_empty());
}

#[test]
fn corrupt_files_degrade_to_an_empty_start() {
    let base = common::test_home();
    let store_dir = base.join("store");
    std::fs::create_dir_all(&store_dir).unwrap();
    std::fs::write(store_dir.join("currentBudget.json"), "{ broken").unwrap();
    std::fs::write(store_dir.join("currentExpenses.json"), "[]").unwrap();
    std::fs::write(store_dir.join("budgetHistory.json"), "not json").unwrap();

    let (tracker, _) = open_at(&base);
    assert_eq!(tracker.view(), &View::Setup);
    assert!(tracker.history().is_empty());
    assert!(!store_dir.join("currentExpenses.json").exists());
}
