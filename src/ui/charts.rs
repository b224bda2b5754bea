use std::ops::RangeInclusive;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Line, Plot, PlotPoint,
    PlotPoints, Points, Polygon, Text,
};

use crate::color;
use crate::data::aggregate::{
    Correlation, CountryDistribution, Histogram, MonthlyTotal, RankedEntry, StageTotals,
    YearMonthTable, CORRELATION_LABELS,
};
use crate::state::{AppState, Tab};
use crate::ui::table;

const CHART_HEIGHT: f32 = 320.0;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// ---------------------------------------------------------------------------
// Tab contents (central panel)
// ---------------------------------------------------------------------------

/// Render the active tab.
pub fn tab_contents(ui: &mut Ui, state: &AppState) {
    match state.active_tab {
        Tab::Trends => ui.columns(2, |cols| {
            cols[0].strong("📈 Monthly Total Layoffs Over Time");
            monthly_line(&mut cols[0], &state.filtered.monthly_totals);
            cols[1].strong("🗓 Heatmap of Layoffs by Year & Month");
            year_month_heatmap(&mut cols[1], &state.full_set.year_month);
        }),
        Tab::CompanyIndustry => ui.columns(2, |cols| {
            cols[0].strong("🏢 Top 10 Companies by Layoff Events");
            ranked_bars(
                &mut cols[0],
                "top_companies",
                &state.filtered.top_companies,
                Color32::from_rgb(250, 128, 114),
                "Layoff events",
            );
            cols[1].strong("🏭 Average Layoffs by Industry");
            ranked_bars(
                &mut cols[1],
                "top_industries",
                &state.full_set.top_industries,
                Color32::from_rgb(218, 112, 214),
                "Mean laid off",
            );
        }),
        Tab::Countries => {
            ui.strong("📊 Layoff % Distribution by Country (Top 10)");
            country_boxes(ui, &state.full_set.country_distributions);
        }
        Tab::Distributions => ui.columns(2, |cols| {
            cols[0].strong("📌 Distribution of Layoff Percentages");
            histogram(&mut cols[0], &state.full_set.percentage_histogram);
            cols[1].strong("🧠 Correlation Between Numerical Fields");
            correlation_heatmap(&mut cols[1], &state.full_set.correlation);
        }),
        Tab::Stage => {
            ui.strong("💰 Total Layoffs by Company Stage");
            stage_bars(ui, &state.full_set.stage_totals);
        }
        Tab::Records => table::records_table(ui, state),
    }
}

fn no_data(ui: &mut Ui, message: &str) {
    ui.add_space(CHART_HEIGHT / 2.0);
    ui.vertical_centered(|ui: &mut Ui| {
        ui.weak(message);
    });
}

fn static_plot(id: &str) -> Plot<'_> {
    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
}

/// Axis labels for integer positions `0..labels.len()`.
fn index_formatter(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let v = mark.value;
        if v.fract().abs() > 1e-6 || v < 0.0 {
            return String::new();
        }
        labels.get(v as usize).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Trends
// ---------------------------------------------------------------------------

/// Months since year 0, so consecutive months are one unit apart.
fn month_index(m: &MonthlyTotal) -> f64 {
    use chrono::Datelike;
    f64::from(m.month.year() * 12) + f64::from(m.month.month0())
}

fn monthly_line(ui: &mut Ui, months: &[MonthlyTotal]) {
    if months.is_empty() {
        no_data(ui, "No records match the current filters.");
        return;
    }
    let points: Vec<[f64; 2]> = months.iter().map(|m| [month_index(m), m.total]).collect();
    let teal = Color32::from_rgb(0, 128, 128);

    static_plot("monthly_totals")
        .y_axis_label("Total Laid Off")
        .include_y(0.0)
        .x_axis_formatter(|mark, _range| {
            let v = mark.value;
            if v.fract().abs() > 1e-6 {
                return String::new();
            }
            let idx = v as i64;
            format!("{}-{:02}", idx.div_euclid(12), idx.rem_euclid(12) + 1)
        })
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .color(teal)
                    .width(2.0)
                    .name("Total laid off"),
            );
            plot_ui.points(Points::new(points).color(teal).radius(2.5));
        });
}

fn year_month_heatmap(ui: &mut Ui, table: &YearMonthTable) {
    if table.is_empty() {
        no_data(ui, "No dated records with layoff counts.");
        return;
    }
    let max = table.max_value().unwrap_or(0.0);

    static_plot("year_month_heatmap")
        .show_grid(false)
        .x_axis_formatter(|mark, _range| {
            let v = mark.value;
            if v.fract().abs() > 1e-6 || !(1.0..=12.0).contains(&v) {
                return String::new();
            }
            MONTHS[v as usize - 1].to_string()
        })
        .y_axis_formatter(|mark, _range| {
            if mark.value.fract().abs() > 1e-6 {
                String::new()
            } else {
                format!("{:.0}", mark.value)
            }
        })
        .show(ui, |plot_ui| {
            for &year in &table.years {
                for month in 1..=12 {
                    let Some(value) = table.get(year, month) else {
                        continue;
                    };
                    let fill = color::heat(if max > 0.0 { value / max } else { 0.0 });
                    let (x, y) = (f64::from(month), f64::from(year));
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(cell(x, y)))
                            .fill_color(fill)
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                    plot_ui.text(Text::new(
                        PlotPoint::new(x, y),
                        RichText::new(format!("{value:.0}"))
                            .size(10.0)
                            .color(color::contrasting_text(fill)),
                    ));
                }
            }
        });
}

/// Unit square centred on `(x, y)`.
fn cell(x: f64, y: f64) -> Vec<[f64; 2]> {
    vec![
        [x - 0.5, y - 0.5],
        [x + 0.5, y - 0.5],
        [x + 0.5, y + 0.5],
        [x - 0.5, y + 0.5],
    ]
}

// ---------------------------------------------------------------------------
// Rankings
// ---------------------------------------------------------------------------

fn ranked_bars(ui: &mut Ui, id: &str, entries: &[RankedEntry], fill: Color32, y_label: &str) {
    if entries.is_empty() {
        no_data(ui, "Nothing to rank.");
        return;
    }
    let bars: Vec<Bar> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| Bar::new(i as f64, e.value).name(&e.label).fill(fill))
        .collect();
    let labels = entries.iter().map(|e| e.label.clone()).collect();

    static_plot(id)
        .y_axis_label(y_label)
        .x_axis_formatter(index_formatter(labels))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(fill).width(0.7));
        });
}

fn stage_bars(ui: &mut Ui, totals: &StageTotals) {
    let entries = match totals {
        StageTotals::NotApplicable => {
            ui.label("ℹ No 'stage' column found in dataset.");
            return;
        }
        StageTotals::Grouped(entries) if entries.is_empty() => {
            no_data(ui, "No records carry a stage.");
            return;
        }
        StageTotals::Grouped(entries) => entries,
    };

    let purple = Color32::from_rgb(128, 0, 128);
    let bars: Vec<Bar> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| Bar::new(i as f64, e.value).name(&e.label).fill(purple))
        .collect();
    let labels = entries.iter().map(|e| e.label.clone()).collect();

    static_plot("stage_totals")
        .height(CHART_HEIGHT * 1.5)
        .x_axis_label("Total Laid Off")
        .y_axis_formatter(index_formatter(labels))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(purple).width(0.7).horizontal());
        });
}

// ---------------------------------------------------------------------------
// Distributions
// ---------------------------------------------------------------------------

fn country_boxes(ui: &mut Ui, distributions: &[CountryDistribution]) {
    if distributions.iter().all(|d| d.summary.is_none()) {
        no_data(ui, "No layoff percentages to summarise.");
        return;
    }
    let palette = color::generate_palette(distributions.len());

    let mut boxes = Vec::new();
    let mut outliers = Vec::new();
    for ((i, dist), &c) in distributions.iter().enumerate().zip(&palette) {
        let Some(s) = &dist.summary else {
            continue;
        };
        let x = i as f64;
        boxes.push(
            BoxElem::new(
                x,
                BoxSpread::new(s.lower_whisker, s.q1, s.median, s.q3, s.upper_whisker),
            )
            .name(format!("{} (n = {})", dist.country, s.count))
            .fill(c.linear_multiply(0.5))
            .stroke(Stroke::new(1.5, c))
            .box_width(0.6),
        );
        outliers.extend(s.outliers.iter().map(|&v| [x, v]));
    }
    let labels = distributions.iter().map(|d| d.country.clone()).collect();

    static_plot("country_boxes")
        .y_axis_label("percentage_laid_off")
        .x_axis_formatter(index_formatter(labels))
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(boxes));
            plot_ui.points(Points::new(outliers).radius(2.0).color(Color32::GRAY));
        });
}

fn histogram(ui: &mut Ui, hist: &Histogram) {
    if hist.is_empty() {
        no_data(ui, "No layoff percentages to bin.");
        return;
    }
    let steelblue = Color32::from_rgb(70, 130, 180);
    let width = hist.bin_width();
    let bars: Vec<Bar> = hist
        .edges
        .windows(2)
        .zip(&hist.counts)
        .map(|(edge, &count)| {
            Bar::new((edge[0] + edge[1]) / 2.0, count as f64)
                .width(width)
                .fill(steelblue.linear_multiply(0.6))
        })
        .collect();

    static_plot("percentage_histogram")
        .legend(Legend::default())
        .x_axis_label("percentage_laid_off")
        .y_axis_label("Count")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(steelblue).name("Records"));
            if !hist.density.is_empty() {
                plot_ui.line(
                    Line::new(PlotPoints::from(hist.density.clone()))
                        .color(steelblue)
                        .width(2.0)
                        .name("Density"),
                );
            }
        });
}

fn correlation_heatmap(ui: &mut Ui, correlation: &Correlation) {
    let Some(matrix) = correlation.matrix() else {
        no_data(ui, "Not enough records with both values to correlate.");
        return;
    };
    let labels: Vec<String> = CORRELATION_LABELS.iter().map(|l| l.to_string()).collect();

    static_plot("correlation")
        .show_grid(false)
        .data_aspect(1.0)
        .x_axis_formatter(index_formatter(labels.clone()))
        .y_axis_formatter(index_formatter(labels))
        .show(ui, |plot_ui| {
            for (row, values) in matrix.iter().enumerate() {
                for (col, value) in values.iter().enumerate() {
                    let (fill, text) = match value {
                        Some(r) => (color::diverging(*r), format!("{r:.2}")),
                        None => (Color32::DARK_GRAY, "n/a".to_string()),
                    };
                    let (x, y) = (col as f64, row as f64);
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(cell(x, y)))
                            .fill_color(fill)
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                    plot_ui.text(Text::new(
                        PlotPoint::new(x, y),
                        RichText::new(text).color(color::contrasting_text(fill)),
                    ));
                }
            }
        });
}
