use chrono::{Datelike, NaiveDate};
use eframe::egui::{self, Color32, Stroke, Ui};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot, PlotPoints, Points};

use nextload_dashboard::data::aggregate::{
    Category, GeoPoint, HistogramBin, Measure, TimeColumn, box_stats, daily_counts, group_stats,
    grouped_mean, histogram, map_points, scatter, value_counts,
};

use crate::color::{DESTINATION_COLOR, ORIGIN_COLOR};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

pub fn geographic(ui: &mut Ui, state: &AppState) {
    ui.strong("Load Origins (Red) and Destinations (Blue)");
    let map = map_points(&state.view);
    Plot::new("load_map")
        .legend(Legend::default())
        .height(420.0)
        .data_aspect(1.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(coords(&map.origins))
                    .name("Origins")
                    .color(ORIGIN_COLOR)
                    .radius(4.0),
            );
            plot_ui.points(
                Points::new(coords(&map.destinations))
                    .name("Destinations")
                    .color(DESTINATION_COLOR)
                    .radius(4.0),
            );
        });

    ui.add_space(8.0);
    ui.strong("Most Popular Routes");
    let routes = value_counts(&state.view, Category::Route, Some(state.config.top_routes));
    ranking_chart(ui, "top_routes", "Number of Loads", &as_f64(routes), |_| ORIGIN_COLOR);
}

pub fn rates(ui: &mut Ui, state: &AppState) {
    let bins = state.config.histogram_bins;
    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].strong("Rate Distribution");
        histogram_chart(
            &mut cols[0],
            "rate_hist",
            "Rate ($)",
            &histogram(&state.view, Measure::RateDollars, bins),
        );
        cols[1].strong("Rate per Mile Distribution");
        histogram_chart(
            &mut cols[1],
            "rate_per_mile_hist",
            "Rate per Mile ($)",
            &histogram(&state.view, Measure::RatePerMileDollars, bins),
        );
    });

    ui.add_space(8.0);
    ui.strong("Rate vs Distance by Equipment Type");
    let series = scatter(
        &state.view,
        Measure::DistanceMiles,
        Measure::RateDollars,
        Category::EquipmentType,
    );
    Plot::new("rate_vs_distance")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("Distance (miles)")
        .y_axis_label("Rate ($)")
        .show(ui, |plot_ui| {
            for (equipment, points) in series {
                let color = state.colors.color_for(&equipment);
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(&equipment)
                        .color(color)
                        .radius(3.0),
                );
            }
        });
}

pub fn equipment(ui: &mut Ui, state: &AppState) {
    let colors = &state.colors;
    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].strong("Load Distribution by Equipment Type");
        let counts = value_counts(&state.view, Category::EquipmentType, None);
        ranking_chart(&mut cols[0], "equipment_counts", "Number of Loads", &as_f64(counts), |e| {
            colors.color_for(e)
        });

        cols[1].strong("Average Rate by Equipment Type");
        // Ascending means: the most expensive equipment ends up on top.
        let mut means = grouped_mean(&state.view, Category::EquipmentType, Measure::RateDollars);
        means.reverse();
        ranking_chart(&mut cols[1], "equipment_rates", "Average Rate ($)", &means, |e| {
            colors.color_for(e)
        });
    });

    ui.add_space(8.0);
    ui.strong("Weight Distribution by Equipment Type");
    let stats = box_stats(&state.view, Category::EquipmentType, Measure::Weight);
    let labels: Vec<String> = stats.iter().map(|s| s.group.clone()).collect();
    let boxes: Vec<BoxElem> = stats
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let color = colors.color_for(&s.group);
            BoxElem::new(i as f64, BoxSpread::new(s.min, s.q1, s.median, s.q3, s.max))
                .name(&s.group)
                .fill(color.linear_multiply(0.4))
                .stroke(Stroke::new(1.5, color))
        })
        .collect();

    Plot::new("weight_box")
        .height(CHART_HEIGHT)
        .y_axis_label("Weight (lbs)")
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .show(ui, |plot_ui| plot_ui.box_plot(BoxPlot::new(boxes)));
}

pub fn companies(ui: &mut Ui, state: &AppState) {
    ui.strong("Top Companies by Load Count");
    let counts = value_counts(&state.view, Category::Company, Some(state.config.top_companies));
    ranking_chart(ui, "top_companies", "Number of Loads", &as_f64(counts), |_| DESTINATION_COLOR);

    ui.add_space(8.0);
    ui.strong("Company Performance Metrics");
    let stats = group_stats(&state.view, Category::Company, state.config.performance_rows);
    egui::Grid::new("company_metrics")
        .striped(true)
        .num_columns(5)
        .show(ui, |ui: &mut Ui| {
            for header in ["Company", "Avg Rate", "Load Count", "Avg Distance", "Avg Weight"] {
                ui.strong(header);
            }
            ui.end_row();
            for s in &stats {
                ui.label(s.group.as_str());
                ui.label(format!("{:.2}", s.avg_rate));
                ui.label(s.load_count.to_string());
                ui.label(format!("{:.2}", s.avg_distance));
                ui.label(format!("{:.2}", s.avg_weight));
                ui.end_row();
            }
        });
}

pub fn timeline(ui: &mut Ui, state: &AppState) {
    ui.strong("Load Postings Over Time");
    date_series_chart(ui, "posted_per_day", "Number of Loads", &daily_counts(&state.view, TimeColumn::Posted));

    ui.add_space(8.0);
    ui.strong("Scheduled Pickups Over Time");
    date_series_chart(ui, "pickups_per_day", "Number of Pickups", &daily_counts(&state.view, TimeColumn::Pickup));
}

// ---------------------------------------------------------------------------
// Chart helpers
// ---------------------------------------------------------------------------

fn coords(points: &[GeoPoint]) -> PlotPoints {
    points.iter().map(|p| [p.longitude, p.latitude]).collect()
}

fn as_f64(counts: Vec<(String, usize)>) -> Vec<(String, f64)> {
    counts.into_iter().map(|(k, n)| (k, n as f64)).collect()
}

/// Axis label for integer positions on a categorical axis.
fn category_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

/// Horizontal bars, `entries[0]` drawn on top.
fn ranking_chart(
    ui: &mut Ui,
    id: &str,
    name: &str,
    entries: &[(String, f64)],
    color_for: impl Fn(&str) -> Color32,
) {
    let n = entries.len();
    let bars: Vec<Bar> = entries
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            Bar::new((n - 1 - i) as f64, *value)
                .name(label)
                .fill(color_for(label))
        })
        .collect();
    // Argument k holds entries[n - 1 - k].
    let labels: Vec<String> = entries.iter().rev().map(|(label, _)| label.clone()).collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .x_axis_label(name)
        .y_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .show(ui, |plot_ui| plot_ui.bar_chart(BarChart::new(bars).horizontal().name(name)));
}

fn histogram_chart(ui: &mut Ui, id: &str, x_label: &str, bins: &[HistogramBin]) {
    let bars: Vec<Bar> = bins
        .iter()
        .map(|b| {
            let width = b.upper - b.lower;
            Bar::new((b.lower + b.upper) / 2.0, b.count as f64)
                .width(if width > 0.0 { width } else { 1.0 })
        })
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(x_label)
        .y_axis_label("Number of Loads")
        .show(ui, |plot_ui| plot_ui.bar_chart(BarChart::new(bars).color(ORIGIN_COLOR)));
}

/// Line over calendar days; x is the day number since 0001-01-01.
fn date_series_chart(ui: &mut Ui, id: &str, y_label: &str, counts: &[(NaiveDate, usize)]) {
    let points: Vec<[f64; 2]> = counts
        .iter()
        .map(|(date, n)| [date.num_days_from_ce() as f64, *n as f64])
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .y_axis_label(y_label)
        .x_axis_formatter(|mark, _range| {
            NaiveDate::from_num_days_from_ce_opt(mark.value.round() as i32)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(PlotPoints::from(points.clone())).name(y_label).width(2.0));
            plot_ui.points(Points::new(PlotPoints::from(points)).radius(3.0));
        });
}
