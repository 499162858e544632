use std::path::Path;

use anyhow::Context;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use titanic_insights::data::loader;
use titanic_insights::data::passenger::Class;
use titanic_insights::{Analysis, DatasetSource};

use super::color32;
use crate::state::{AppState, View};

// ---------------------------------------------------------------------------
// Left side panel – view selector and class filter
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("View");
    ui.separator();
    for view in View::ALL {
        ui.selectable_value(&mut state.view, view, view.title());
    }

    ui.add_space(8.0);
    ui.heading("Classes");
    ui.separator();

    // Class colours from the scatter chart, when it exists.
    let class_colors = state.summaries.family_chart.as_ref().ok().map(|c| c.colors.clone());

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all();
                }
                if ui.small_button("None").clicked() {
                    state.select_none();
                }
            });

            for class in Class::ALL {
                let mut text = RichText::new(format!("Class {class}"));
                if let Some(colors) = &class_colors {
                    text = text.color(color32(colors.color_for(&class.to_string())));
                }
                let mut checked = state.class_visible(class);
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_class(class);
                }
            }

            if let Some(Ok(chart)) = state.active_chart() {
                ui.add_space(8.0);
                ui.strong(format!("Color: {}", chart.colors.field));
                for (label, color) in chart.colors.legend_entries() {
                    ui.label(RichText::new(format!("■ {label}")).color(color32(color)));
                }
            }

            if let Ok(survival) = &state.summaries.survival {
                if survival.excluded > 0 {
                    ui.add_space(8.0);
                    ui.label(format!(
                        "{} passengers without age group are not charted.",
                        survival.excluded
                    ));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open local copy…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} passengers from {}",
            state.analysis.table().len(),
            state.source
        ));

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
        .set_title("Open passenger list")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match loader::load_file(&path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} passengers with columns {:?}",
                    table.len(),
                    table.column_names
                );
                state.set_dataset(Analysis::new(table), DatasetSource::Local(path));
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

/// Save the active view's chart descriptor (or the surname tally) as JSON.
pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export as JSON")
        .add_filter("JSON", &["json"])
        .set_file_name(format!("{}.json", export_stem(state.view)))
        .save_file();

    if let Some(path) = file {
        match export(state, &path) {
            Ok(()) => {
                log::info!("Exported {} to {}", state.view.title(), path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn export_stem(view: View) -> &'static str {
    match view {
        View::Demographics => "survival_demographics",
        View::Families => "family_fares",
        View::Surnames => "surnames",
    }
}

fn export(state: &AppState, path: &Path) -> anyhow::Result<()> {
    let json = match state.active_chart() {
        Some(chart) => {
            let chart = chart.as_ref().map_err(Clone::clone)?;
            serde_json::to_string_pretty(chart)
        }
        None => {
            let tally = state.summaries.surnames.as_ref().map_err(Clone::clone)?;
            serde_json::to_string_pretty(tally)
        }
    }
    .context("serialising export")?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}
