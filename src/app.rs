use eframe::egui;

use titanic_insights::{Analysis, DatasetSource};

use crate::state::{AppState, View};
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TitanicApp {
    pub state: AppState,
}

impl TitanicApp {
    pub fn new(analysis: Analysis, source: DatasetSource) -> Self {
        Self {
            state: AppState::new(analysis, source),
        }
    }
}

impl eframe::App for TitanicApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: view and class filter ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: summary table (charted views only) ----
        if self.state.view != View::Surnames {
            egui::TopBottomPanel::bottom("summary_table")
                .resizable(true)
                .default_height(260.0)
                .show(ctx, |ui| {
                    table::summary_table(ui, &self.state);
                });
        }

        // ---- Central panel: chart, or the surname tally ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.view {
            View::Surnames => table::surname_table(ui, &self.state),
            _ => plot::chart(ui, &self.state),
        });
    }
}
