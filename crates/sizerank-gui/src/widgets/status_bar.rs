/// Bottom status bar -- scan progress and result statistics.
use crate::state::{AppPhase, AppState};
use egui::Ui;
use sizerank_core::model::format_count;

/// Draw the status bar at the bottom of the window.
pub fn status_bar(ui: &mut Ui, state: &AppState) {
    let color_accent = ui.visuals().hyperlink_color;
    let color_weak = ui.visuals().weak_text_color();
    let color_normal = ui.visuals().text_color();
    let color_warning = egui::Color32::from_rgb(0xfa, 0xb3, 0x87);
    let color_success = egui::Color32::from_rgb(0xa6, 0xe3, 0xa1);

    ui.horizontal(|ui| match state.phase {
        AppPhase::Idle => {
            ui.label(
                egui::RichText::new("Choose a folder and scan parameters, then press Scan.")
                    .size(12.0)
                    .color(color_weak),
            );
        }
        AppPhase::Scanning => {
            ui.spinner();

            let display_path = truncate_path(&state.scan_current_path, 80);
            ui.label(
                egui::RichText::new(format!("Scanning {display_path}..."))
                    .size(12.0)
                    .color(color_normal),
            );

            ui.separator();

            ui.label(
                egui::RichText::new(format!(
                    "{} dirs",
                    format_count(state.scan_dirs_visited)
                ))
                .size(12.0)
                .color(color_normal),
            );
        }
        AppPhase::Results => {
            let Some(results) = state.results.as_ref() else {
                return;
            };
            ui.label(
                egui::RichText::new("\u{2713} Scan complete")
                    .size(12.0)
                    .color(color_success),
            );

            ui.separator();

            let noun = match state.results_mode {
                sizerank_core::ScanMode::Files => "files",
                sizerank_core::ScanMode::Folders => "folders",
            };
            ui.label(
                egui::RichText::new(format!("{} {noun}", format_count(results.len() as u64)))
                    .size(12.0)
                    .color(color_normal),
            );

            if let Some(largest) = results.entries().first() {
                ui.separator();
                ui.label(
                    egui::RichText::new(format!("largest {}", state.formatted_size(largest.size)))
                        .size(12.0)
                        .color(color_accent),
                );
            }

            if let Some(duration) = state.scan_duration {
                ui.separator();
                ui.label(
                    egui::RichText::new(format!("{:.1}s", duration.as_secs_f64()))
                        .size(12.0)
                        .color(color_weak),
                );
            }

            let skipped = results.skipped().len() as u64;
            if skipped > 0 {
                ui.separator();
                ui.label(
                    egui::RichText::new(format!("{} skipped", format_count(skipped)))
                        .size(12.0)
                        .color(color_warning),
                )
                .on_hover_text("Entries that could not be read were left out");
            }
        }
    });
}

/// Truncate a path string to at most `max_len` characters, replacing the
/// middle with "..." if needed.
fn truncate_path(path: &str, max_len: usize) -> String {
    let count = path.chars().count();
    if count <= max_len {
        return path.to_string();
    }
    let half = (max_len - 3) / 2;
    let head: String = path.chars().take(half).collect();
    let tail: String = path.chars().skip(count - half).collect();
    format!("{head}...{tail}")
}
