/// Ranked results table -- size and path, largest first.
///
/// Only visible rows are laid out (`TableBody::rows`), so result sets with
/// hundreds of thousands of entries stay cheap to render. Double-clicking a
/// row reveals the item in the host file browser.
use crate::state::{AppPhase, AppState};
use crate::widgets::share_bar::{fraction_of, share_bar};
use egui::Ui;
use egui_extras::{Column, TableBuilder};
use sizerank_core::model::format_size;

/// Height of each row in pixels.
const ROW_HEIGHT: f32 = 22.0;

/// Draw the results table (centre content area).
pub fn results_panel(ui: &mut Ui, state: &mut AppState) {
    let Some(results) = state.results.as_ref() else {
        let hint = if state.phase == AppPhase::Scanning {
            "Scanning... results appear when the scan completes"
        } else {
            "No scan results. Choose a folder and click Scan."
        };
        ui.centered_and_justified(|ui| {
            ui.label(egui::RichText::new(hint).color(ui.visuals().weak_text_color()));
        });
        return;
    };

    if results.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label(
                egui::RichText::new("The folder contains no readable files.")
                    .color(ui.visuals().weak_text_color()),
            );
        });
        return;
    }

    let unit = state.unit;
    let selected = state.selected;
    let largest = results.entries().first().map_or(0, |e| e.size);
    let mut clicked_row = None;
    let mut reveal_row = None;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .sense(egui::Sense::click())
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::initial(150.0).at_least(90.0))
        .column(Column::exact(90.0))
        .column(Column::remainder().clip(true))
        .header(ROW_HEIGHT, |mut header| {
            header.col(|ui| {
                ui.strong("Size");
            });
            header.col(|ui| {
                ui.strong("Share");
            });
            header.col(|ui| {
                ui.strong("Path");
            });
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, results.len(), |mut row| {
                let index = row.index();
                let entry = &results.entries()[index];
                row.set_selected(selected == Some(index));

                row.col(|ui| {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.add(egui::Label::new(format_size(entry.size, unit)).selectable(false));
                    });
                });
                row.col(|ui| {
                    share_bar(ui, fraction_of(entry.size, largest), 80.0, 10.0);
                });
                row.col(|ui| {
                    ui.add(
                        egui::Label::new(entry.path.display().to_string())
                            .selectable(false)
                            .truncate(),
                    );
                });

                let response = row.response();
                if response.clicked() {
                    clicked_row = Some(index);
                }
                if response.double_clicked() {
                    reveal_row = Some(index);
                }
            });
        });

    if let Some(index) = clicked_row {
        state.selected = Some(index);
    }
    if let Some(index) = reveal_row {
        state.reveal(index);
    }
}
