use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use nextload_dashboard::data::model::LoadTable;

use crate::ui::format::thousands;

const HEADERS: [&str; 8] = [
    "Reference #",
    "Route",
    "Equipment",
    "Rate ($)",
    "Distance (miles)",
    "Weight (lbs)",
    "Company",
    "Posted Date",
];

/// Filtered loads, one row per posting.
pub fn load_table(ui: &mut Ui, table: &LoadTable) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(Column::auto().at_least(80.0), HEADERS.len() - 1)
        .column(Column::remainder())
        .max_scroll_height(400.0)
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, table.len(), |mut row| {
                let load = &table.rows()[row.index()];
                let p = load.posting();
                row.col(|ui| {
                    ui.label(p.reference_number.as_str());
                });
                row.col(|ui| {
                    ui.label(load.route());
                });
                row.col(|ui| {
                    ui.label(p.equipment_type.as_str());
                });
                row.col(|ui| {
                    ui.label(format!("{:.2}", load.rate_dollars()));
                });
                row.col(|ui| {
                    ui.label(thousands(p.distance_miles));
                });
                row.col(|ui| {
                    ui.label(thousands(p.weight));
                });
                row.col(|ui| {
                    ui.label(p.company_name.as_str());
                });
                row.col(|ui| {
                    ui.label(load.posted_at().format("%Y-%m-%d %H:%M").to_string());
                });
            });
        });
}
