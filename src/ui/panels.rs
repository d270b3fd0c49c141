use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use nextload_dashboard::data::export::export_csv;
use nextload_dashboard::data::filter::{ALL, RateRange};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.base.is_empty() {
        ui.label("No dataset loaded.");
        return;
    }

    // Edit a copy so the view is recomputed once, after all widgets ran.
    let mut spec = state.filters.clone();
    let mut reset = false;
    let options = &state.options;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            choice(ui, "Equipment Type", &options.equipment_types, &mut spec.equipment_type);
            choice(ui, "State", &options.states, &mut spec.state);
            choice(ui, "Company", &options.companies, &mut spec.company_name);

            if let Some(bounds) = options.rate_bounds {
                rate_range(ui, bounds, &mut spec.rate_range);
            }

            ui.separator();
            reset = ui.button("Reset filters").clicked();
        });

    if reset {
        state.reset_filters();
    } else {
        state.set_filters(spec);
    }
}

/// Combo box with an [`ALL`] entry followed by `values`.
fn choice(ui: &mut Ui, label: &str, values: &[String], selection: &mut Option<String>) {
    ui.strong(label);
    let current = selection.clone().unwrap_or_else(|| ALL.to_string());
    egui::ComboBox::from_id_salt(label)
        .selected_text(current.as_str())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current == ALL, ALL).clicked() {
                *selection = None;
            }
            for value in values {
                if ui.selectable_label(current == *value, value).clicked() {
                    *selection = Some(value.clone());
                }
            }
        });
    ui.add_space(6.0);
}

/// Two sliders over the data's rate bounds. Covering the whole span clears
/// the constraint.
fn rate_range(ui: &mut Ui, bounds: RateRange, selection: &mut Option<RateRange>) {
    ui.strong("Rate Range ($)");
    let mut range = selection.unwrap_or(bounds);
    let span = bounds.min..=bounds.max;

    let min_changed = ui
        .add(egui::Slider::new(&mut range.min, span.clone()).text("min").prefix("$"))
        .changed();
    let max_changed = ui
        .add(egui::Slider::new(&mut range.max, span).text("max").prefix("$"))
        .changed();

    if min_changed || max_changed {
        if range.min > range.max {
            if min_changed {
                range.max = range.min;
            } else {
                range.min = range.max;
            }
        }
        *selection = (range != bounds).then_some(range);
    }
    ui.add_space(6.0);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.source_path.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                state.reload();
                ui.close_menu();
            }
            if ui
                .add_enabled(!state.view.is_empty(), egui::Button::new("Export CSV…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if !state.base.is_empty() {
            ui.label(format!(
                "{} loads loaded, {} visible",
                state.base.len(),
                state.view.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open load postings")
        .add_filter("Supported files", &["json", "csv", "parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_source(&path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered loads")
        .add_filter("CSV", &["csv"])
        .set_file_name("loads.csv")
        .save_file();

    if let Some(path) = file {
        match export_csv(&state.view, &path) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
