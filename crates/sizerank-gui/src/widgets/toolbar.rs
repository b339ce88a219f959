/// Top action bar -- scan parameters, scan button, export, and theme toggle.
use crate::state::{AppPhase, AppState, ExportFormat};
use egui::Ui;
use sizerank_core::model::SizeUnit;
use sizerank_core::scanner::ScanMode;

/// Draw the toolbar.
pub fn toolbar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new("📏 SizeRank")
                .size(18.0)
                .strong()
                .color(ui.visuals().hyperlink_color),
        );

        ui.separator();

        // Mode and root are scan parameters, frozen while a scan runs.
        let idle = state.phase != AppPhase::Scanning;
        ui.add_enabled_ui(idle, |ui| {
            ui.label("Mode:");
            ui.radio_value(&mut state.mode, ScanMode::Files, ScanMode::Files.label());
            ui.radio_value(&mut state.mode, ScanMode::Folders, ScanMode::Folders.label());
        });

        ui.separator();

        // Unit is display-only and can change at any time.
        ui.label("Units:");
        egui::ComboBox::from_id_salt("size_unit")
            .selected_text(state.unit.label())
            .width(60.0)
            .show_ui(ui, |ui| {
                for unit in SizeUnit::ALL {
                    ui.selectable_value(&mut state.unit, unit, unit.label());
                }
            });

        ui.separator();

        ui.label("Folder:");
        let path_edit = ui.add_enabled(
            idle,
            egui::TextEdit::singleline(&mut state.root_input)
                .desired_width(320.0)
                .hint_text("Directory to scan"),
        );
        let enter_pressed =
            path_edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let scan_btn = ui
            .add_enabled(
                state.can_scan(),
                egui::Button::new("▶ Scan").min_size(egui::vec2(70.0, 28.0)),
            )
            .on_disabled_hover_text(if idle {
                "Enter a folder to scan"
            } else {
                "A scan is already running"
            });
        if scan_btn.clicked() || enter_pressed {
            state.start_scan();
        }

        ui.separator();

        let can_export = state.results.is_some();
        let hint = "Run a scan first to enable export";
        if ui
            .add_enabled(can_export, egui::Button::new("📤 CSV"))
            .on_hover_text("Save results as CSV in the working directory")
            .on_disabled_hover_text(hint)
            .clicked()
        {
            state.export(ExportFormat::Csv);
        }
        if ui
            .add_enabled(can_export, egui::Button::new("📤 JSON"))
            .on_hover_text("Save results as JSON in the working directory")
            .on_disabled_hover_text(hint)
            .clicked()
        {
            state.export(ExportFormat::Json);
        }

        // Right-aligned controls.
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("ℹ").on_hover_text("About SizeRank").clicked() {
                state.show_about = true;
            }

            let theme_label = if state.dark_mode { "☀" } else { "🌙" };
            let theme_tip = if state.dark_mode {
                "Switch to light mode"
            } else {
                "Switch to dark mode"
            };
            if ui.button(theme_label).on_hover_text(theme_tip).clicked() {
                state.dark_mode = !state.dark_mode;
            }
        });
    });
}
