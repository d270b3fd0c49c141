use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use nextload_dashboard::data::aggregate::KeyMetrics;

use crate::state::{AnalyticsTab, AppState};
use crate::ui::format::{dollars, signed_dollars, signed_thousands, thousands};
use crate::ui::{charts, table};

// ---------------------------------------------------------------------------
// Central panel: metrics, analytics tabs, data table
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    if state.base.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No data available. Open a load postings file (File → Open…)");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Key Metrics");
            key_metrics(ui, &state.metrics);
            ui.separator();

            ui.heading("Analytics");
            ui.horizontal(|ui: &mut Ui| {
                for tab in AnalyticsTab::ALL {
                    ui.selectable_value(&mut state.tab, tab, tab.title());
                }
            });
            ui.add_space(8.0);

            if state.view.is_empty() {
                ui.label("No loads match the current filters.");
            } else {
                match state.tab {
                    AnalyticsTab::Geographic => charts::geographic(ui, state),
                    AnalyticsTab::Rate => charts::rates(ui, state),
                    AnalyticsTab::Equipment => charts::equipment(ui, state),
                    AnalyticsTab::Company => charts::companies(ui, state),
                    AnalyticsTab::Time => charts::timeline(ui, state),
                }
            }
            ui.separator();

            ui.heading("Data Table");
            table::load_table(ui, &state.view);
        });
}

fn key_metrics(ui: &mut Ui, m: &KeyMetrics) {
    ui.columns(4, |cols: &mut [Ui]| {
        metric_card(
            &mut cols[0],
            "Total Loads",
            thousands(m.total_loads.value as u64),
            m.total_loads.delta.map(|d| (signed_thousands(d), d >= 0)),
        );
        metric_card(
            &mut cols[1],
            "Average Rate",
            m.average_rate.value.map_or_else(|| "–".to_string(), dollars),
            m.average_rate.delta.map(|d| (signed_dollars(d), d >= 0.0)),
        );
        metric_card(
            &mut cols[2],
            "Total Distance",
            format!("{} miles", thousands(m.total_distance.value)),
            m.total_distance
                .delta
                .map(|d| (format!("{} miles", signed_thousands(d)), d >= 0)),
        );
        metric_card(
            &mut cols[3],
            "Companies",
            m.companies.value.to_string(),
            m.companies.delta.map(|d| (signed_thousands(d), d >= 0)),
        );
    });
}

/// `delta` is the formatted change and whether it is non-negative.
fn metric_card(ui: &mut Ui, label: &str, value: String, delta: Option<(String, bool)>) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(label);
        ui.label(RichText::new(value).size(24.0).strong());
        if let Some((text, up)) = delta {
            let color = if up { Color32::from_rgb(40, 160, 70) } else { Color32::RED };
            ui.label(RichText::new(text).color(color));
        }
    });
}
