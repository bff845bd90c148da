//! Page layout for the two report kinds. Positions are millimetres on an A4 page.

use image::GenericImageView;

use crate::core::view::PeriodView;
use crate::currency::AmountFormatter;
use crate::receipt::ReceiptImage;

use super::document::{Align, Document};
use super::{ReportError, Result};

const MARGIN: f32 = 15.0;
const CENTER_X: f32 = 105.0;

const LIST_START_Y: f32 = 95.0;
const LIST_STEP: f32 = 7.0;
const LIST_LIMIT_Y: f32 = 270.0;
const LIST_RESTART_Y: f32 = 20.0;
const LIST_INDENT_X: f32 = 20.0;

const IMAGE_TOP: f32 = 45.0;
const IMAGE_VERTICAL_RESERVE: f32 = 50.0;
const NOTE_Y: f32 = 50.0;
const NOTE_GRAY: u8 = 100;

pub fn render_summary<D: Document>(doc: &mut D, view: &PeriodView<'_>, fmt: &AmountFormatter) {
    doc.set_font_size(22.0);
    doc.text("Monthly Financial Report", CENTER_X, 20.0, Align::Center);

    doc.set_font_size(12.0);
    doc.text(
        &format!("Reference month: {}", view.period.month),
        MARGIN,
        40.0,
        Align::Left,
    );
    if let Some(goal) = view.period.goal() {
        doc.text(&format!("Financial goal: {}", goal), MARGIN, 48.0, Align::Left);
    }
    doc.text(
        &format!("Start date: {}", fmt.date(view.period.start_date)),
        MARGIN,
        56.0,
        Align::Left,
    );

    doc.set_font_size(16.0);
    doc.text(
        &format!("Total spent: {}", fmt.amount(view.total())),
        MARGIN,
        70.0,
        Align::Left,
    );

    if view.expenses.is_empty() {
        doc.set_font_size(12.0);
        doc.text("No expenses recorded this month.", MARGIN, 85.0, Align::Left);
        return;
    }

    doc.set_font_size(14.0);
    doc.text("Expense statement", MARGIN, 85.0, Align::Left);
    let mut y = LIST_START_Y;
    for (index, expense) in view.expenses.iter().enumerate() {
        if y > LIST_LIMIT_Y {
            doc.add_page();
            y = LIST_RESTART_Y;
        }
        doc.set_font_size(11.0);
        doc.text(
            &format!(
                "{}. {}: {}",
                index + 1,
                expense.description,
                fmt.amount(expense.amount)
            ),
            LIST_INDENT_X,
            y,
            Align::Left,
        );
        y += LIST_STEP;
    }
}

/// One page per expense with its receipt. Refuses periods without expenses.
pub fn render_detailed<D: Document>(
    doc: &mut D,
    view: &PeriodView<'_>,
    fmt: &AmountFormatter,
) -> Result<()> {
    if view.expenses.is_empty() {
        return Err(ReportError::EmptyPeriod);
    }

    doc.set_font_size(22.0);
    doc.text("Detailed Report", CENTER_X, 15.0, Align::Center);
    doc.set_font_size(10.0);
    doc.text(
        &format!("Period: {}", view.period.month),
        CENTER_X,
        22.0,
        Align::Center,
    );

    for (index, expense) in view.expenses.iter().enumerate() {
        if index > 0 {
            doc.add_page();
        }
        doc.set_font_size(14.0);
        doc.text(&format!("Entry {}", index + 1), MARGIN, 20.0, Align::Left);
        doc.set_font_size(12.0);
        doc.text(
            &format!("Description: {}", expense.description),
            MARGIN,
            30.0,
            Align::Left,
        );
        doc.text(
            &format!("Amount: {}", fmt.amount(expense.amount)),
            MARGIN,
            38.0,
            Align::Left,
        );

        match &expense.receipt {
            Some(data_url) => {
                if let Err(err) = place_receipt(doc, data_url) {
                    tracing::error!(expense = expense.id, error = %err, "receipt not rendered");
                    doc.text("Could not load receipt image.", MARGIN, NOTE_Y, Align::Left);
                }
            }
            None => {
                doc.set_font_size(11.0);
                doc.set_text_gray(NOTE_GRAY);
                doc.text("No photo attached.", MARGIN, NOTE_Y, Align::Left);
                doc.set_text_gray(0);
            }
        }
    }
    Ok(())
}

fn place_receipt<D: Document>(doc: &mut D, data_url: &str) -> Result<()> {
    let receipt = ReceiptImage::from_data_url(data_url)?;
    let image = receipt.decode()?;
    let (px_width, px_height) = image.dimensions();
    let page_width = doc.page_width();
    let (width, height) = fit_image(
        px_width,
        px_height,
        page_width - 2.0 * MARGIN,
        doc.page_height() - IMAGE_VERTICAL_RESERVE,
    )
    .ok_or_else(|| ReportError::Render("receipt image has no pixels".into()))?;
    let x = (page_width - width) / 2.0;
    doc.image(&image, x, IMAGE_TOP, width, height)
}

/// Scales `px_width × px_height` to the full box width, shrinking to the box height if
/// needed. Aspect ratio is kept. `None` for empty images.
pub fn fit_image(px_width: u32, px_height: u32, max_width: f32, max_height: f32) -> Option<(f32, f32)> {
    if px_width == 0 || px_height == 0 {
        return None;
    }
    let aspect = px_width as f32 / px_height as f32;
    let mut width = max_width;
    let mut height = width / aspect;
    if height > max_height {
        height = max_height;
        width = height * aspect;
    }
    Some((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BudgetPeriod, Expense};
    use crate::receipt::tests::png_bytes;
    use crate::report::tests::{Op, RecordingDocument};
    use chrono::NaiveDate;

    fn period(goal: Option<&str>) -> BudgetPeriod {
        BudgetPeriod::new(
            "Março/2025",
            goal,
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        )
        .unwrap()
    }

    fn texts(doc: &RecordingDocument) -> Vec<(String, f32, f32)> {
        doc.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, x, y, .. } => Some((text.clone(), *x, *y)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn summary_lists_each_expense_with_brazilian_amounts() {
        let period = period(Some("Save 500"));
        let expenses = vec![
            Expense::new(1, "Mercado", 120.5),
            Expense::new(2, "Luz", 80.0),
        ];
        let view = PeriodView {
            period: &period,
            expenses: &expenses,
            read_only: false,
        };
        let mut doc = RecordingDocument::default();
        render_summary(&mut doc, &view, &AmountFormatter::default());

        let texts = texts(&doc);
        assert!(texts.contains(&("Monthly Financial Report".into(), 105.0, 20.0)));
        assert!(texts.contains(&("Financial goal: Save 500".into(), 15.0, 48.0)));
        assert!(texts.contains(&("Start date: 01/03/2025".into(), 15.0, 56.0)));
        assert!(texts.contains(&("Total spent: R$ 200,50".into(), 15.0, 70.0)));
        assert!(texts.contains(&("1. Mercado: R$ 120,50".into(), 20.0, 95.0)));
        assert!(texts.contains(&("2. Luz: R$ 80,00".into(), 20.0, 102.0)));
        assert_eq!(doc.pages, 1);
    }

    #[test]
    fn summary_without_goal_or_expenses() {
        let period = period(None);
        let view = PeriodView {
            period: &period,
            expenses: &[],
            read_only: true,
        };
        let mut doc = RecordingDocument::default();
        render_summary(&mut doc, &view, &AmountFormatter::default());

        let texts = texts(&doc);
        assert!(!texts.iter().any(|(t, _, _)| t.starts_with("Financial goal")));
        assert!(texts.contains(&("No expenses recorded this month.".into(), 15.0, 85.0)));
        assert!(!texts.iter().any(|(t, _, _)| t == "Expense statement"));
    }

    #[test]
    fn long_summaries_continue_on_new_pages() {
        let period = period(None);
        let expenses: Vec<Expense> = (0..30).map(|i| Expense::new(i, "Café", 5.0)).collect();
        let view = PeriodView {
            period: &period,
            expenses: &expenses,
            read_only: false,
        };
        let mut doc = RecordingDocument::default();
        render_summary(&mut doc, &view, &AmountFormatter::default());

        // 95 + 7 * 26 = 277 > 270, so the 27th line opens page two at y = 20.
        assert_eq!(doc.pages, 2);
        let texts = texts(&doc);
        assert!(texts.contains(&("26. Café: R$ 5,00".into(), 20.0, 270.0)));
        assert!(texts.contains(&("27. Café: R$ 5,00".into(), 20.0, 20.0)));
    }

    #[test]
    fn detailed_report_refuses_empty_periods() {
        let period = period(None);
        let view = PeriodView {
            period: &period,
            expenses: &[],
            read_only: false,
        };
        let mut doc = RecordingDocument::default();
        let err = render_detailed(&mut doc, &view, &AmountFormatter::default()).unwrap_err();
        assert!(matches!(err, ReportError::EmptyPeriod));
        assert!(doc.ops.is_empty());
    }

    #[test]
    fn detailed_report_places_receipts_and_notes() {
        let period = period(None);
        let receipt = crate::receipt::ReceiptImage::from_bytes(png_bytes(100, 200))
            .unwrap()
            .to_data_url();
        let expenses = vec![
            Expense::new(1, "Mercado", 120.5).with_receipt(Some(receipt)),
            Expense::new(2, "Luz", 80.0),
            Expense::new(3, "Farmácia", 12.0)
                .with_receipt(Some("data:image/jpeg;base64,AAAA".into())),
        ];
        let view = PeriodView {
            period: &period,
            expenses: &expenses,
            read_only: false,
        };
        let mut doc = RecordingDocument::default();
        render_detailed(&mut doc, &view, &AmountFormatter::default()).unwrap();

        assert_eq!(doc.pages, 3);
        let image = doc
            .ops
            .iter()
            .find_map(|op| match op {
                Op::Image { x, y, width, height } => Some((*x, *y, *width, *height)),
                _ => None,
            })
            .unwrap();
        // 1:2 portrait in a 180 × 247 box is height-bound.
        assert_eq!(image.1, 45.0);
        assert!((image.3 - 247.0).abs() < 1e-3);
        assert!((image.2 - 123.5).abs() < 1e-3);
        assert!((image.0 - (210.0 - 123.5) / 2.0).abs() < 1e-3);

        let texts = texts(&doc);
        assert!(texts.contains(&("Period: Março/2025".into(), 105.0, 22.0)));
        assert!(texts.contains(&("Entry 2".into(), 15.0, 20.0)));
        assert!(texts.contains(&("No photo attached.".into(), 15.0, 50.0)));
        assert!(texts.contains(&("Could not load receipt image.".into(), 15.0, 50.0)));
        assert!(doc.ops.contains(&Op::Gray(100)));
    }

    #[test]
    fn fit_image_keeps_aspect_ratio() {
        assert_eq!(fit_image(200, 100, 180.0, 247.0), Some((180.0, 90.0)));
        assert_eq!(fit_image(100, 400, 180.0, 247.0), Some((61.75, 247.0)));
        assert_eq!(fit_image(0, 10, 180.0, 247.0), None);
    }
}
