use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::{AppState, View};

/// Render string rows under a header.
fn simple_table(ui: &mut Ui, id: &str, headers: &[&str], rows: &[Vec<String>]) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .columns(Column::auto().at_least(70.0), headers.len())
            .header(20.0, |mut header| {
                for h in headers {
                    header.col(|ui| {
                        ui.strong(*h);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, rows.len(), |mut row| {
                    let cells = &rows[row.index()];
                    for cell in cells {
                        row.col(|ui| {
                            ui.label(cell.as_str());
                        });
                    }
                });
            });
    });
}

/// Summary rows behind the active chart, restricted to visible classes.
pub fn summary_table(ui: &mut Ui, state: &AppState) {
    match state.view {
        View::Demographics => match &state.summaries.survival {
            Ok(summary) => {
                let rows: Vec<Vec<String>> = summary
                    .rows
                    .iter()
                    .filter(|r| state.class_visible(r.class))
                    .map(|r| {
                        vec![
                            r.class.to_string(),
                            r.sex.to_string(),
                            r.age_group.to_string(),
                            r.n_passengers.to_string(),
                            r.n_survivors.to_string(),
                            format!("{:.3}", r.survival_rate),
                        ]
                    })
                    .collect();
                simple_table(
                    ui,
                    "survival_table",
                    &["Pclass", "Sex", "age_group", "n_passengers", "n_survivors", "survival_rate"],
                    &rows,
                );
            }
            Err(e) => {
                ui.label(RichText::new(e.to_string()).weak());
            }
        },
        View::Families => match &state.summaries.families {
            Ok(summary) => {
                let rows: Vec<Vec<String>> = summary
                    .rows
                    .iter()
                    .filter(|r| state.class_visible(r.class))
                    .map(|r| {
                        vec![
                            r.family_size.to_string(),
                            r.class.to_string(),
                            r.n_passengers.to_string(),
                            format!("{:.2}", r.avg_fare),
                            format!("{:.2}", r.min_fare),
                            format!("{:.2}", r.max_fare),
                        ]
                    })
                    .collect();
                simple_table(
                    ui,
                    "family_table",
                    &["family_size", "Pclass", "n_passengers", "avg_fare", "min_fare", "max_fare"],
                    &rows,
                );
            }
            Err(e) => {
                ui.label(RichText::new(e.to_string()).weak());
            }
        },
        View::Surnames => surname_table(ui, state),
    }
}

/// Surname tally, most common first.
pub fn surname_table(ui: &mut Ui, state: &AppState) {
    let tally = match &state.summaries.surnames {
        Ok(tally) => tally,
        Err(e) => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading(format!("Cannot tally surnames: {e}"));
            });
            return;
        }
    };

    ui.heading(format!(
        "{} surnames across {} passengers",
        tally.counts.len(),
        tally.total()
    ));
    if tally.dropped > 0 {
        ui.label(format!("{} names without a surname were skipped.", tally.dropped));
    }
    ui.separator();

    let rows: Vec<Vec<String>> = tally
        .counts
        .iter()
        .enumerate()
        .map(|(i, c)| vec![(i + 1).to_string(), c.surname.clone(), c.count.to_string()])
        .collect();
    simple_table(ui, "surname_table", &["#", "surname", "count"], &rows);
}
