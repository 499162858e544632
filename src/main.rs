mod app;
mod state;
mod ui;

use app::TitanicApp;
use eframe::egui;
use titanic_insights::config::DashboardConfig;
use titanic_insights::{Analysis, DatasetSource};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // The dataset is loaded once, before any window opens; failing here ends
    // the process.
    let source = DatasetSource::from_env();
    let analysis = match Analysis::load(&source) {
        Ok(analysis) => analysis,
        Err(e) => {
            log::error!("Failed to load dataset from {source}: {e:#}");
            return Err(e);
        }
    };

    let config = DashboardConfig::default();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.inner_size)
            .with_min_inner_size(config.min_inner_size),
        ..Default::default()
    };

    eframe::run_native(
        "Titanic Insights",
        options,
        Box::new(move |_cc| Ok(Box::new(TitanicApp::new(analysis, source)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
