use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::LayoffRecord;
use crate::state::AppState;

const HEADERS: [&str; 9] = [
    "company",
    "country",
    "industry",
    "stage",
    "date",
    "total_laid_off",
    "year",
    "month_name",
    "percentage_laid_off",
];

/// Tabular listing of the records in the current filtered view.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    if state.view.is_empty() {
        ui.label("No records match the current filters.");
        return;
    }

    let records: Vec<&LayoffRecord> = state.visible_records().collect();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(Column::auto().at_least(70.0), HEADERS.len() - 1)
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, records.len(), |mut row| {
                for cell in cells(records[row.index()]) {
                    row.col(|ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}

fn cells(r: &LayoffRecord) -> [String; 9] {
    fn or_blank<T: ToString>(v: Option<T>) -> String {
        v.map(|v| v.to_string()).unwrap_or_default()
    }
    [
        r.company.clone(),
        or_blank(r.country.as_deref()),
        or_blank(r.industry.as_deref()),
        or_blank(r.stage.as_deref()),
        or_blank(r.date),
        or_blank(r.total_laid_off),
        or_blank(r.derived.year),
        or_blank(r.derived.month_name.as_deref()),
        r.derived
            .percentage_laid_off
            .map(|p| format!("{p:.2}"))
            .unwrap_or_default(),
    ]
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn absent_values_render_blank() {
        let mut r = LayoffRecord::new("Acme");
        r.date = NaiveDate::from_ymd_opt(2023, 1, 15);
        r.derived.percentage_laid_off = Some(33.333);
        let row = cells(&r);
        assert_eq!(row[0], "Acme");
        assert_eq!(row[1], "");
        assert_eq!(row[4], "2023-01-15");
        assert_eq!(row[5], "");
        assert_eq!(row[8], "33.33");
    }
}
