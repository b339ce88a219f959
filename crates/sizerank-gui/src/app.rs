/// Main `eframe::App` implementation for SizeRank.
///
/// This is the top-level UI layout that composes all panels and widgets.
use crate::panels;
use crate::state::{AppPhase, AppState};
use crate::widgets;
use sizerank_core::model::SizeUnit;
use sizerank_core::scanner::ScanMode;
use std::path::PathBuf;

/// Pre-built application state.
///
/// Construct this **before** calling `eframe::run_native` so the first
/// frame renders immediately with the root path already filled in.
pub struct SizeRankState {
    pub(crate) inner: AppState,
}

impl SizeRankState {
    /// Pre-fill `initial_root`, falling back to the working directory.
    pub fn build(initial_root: Option<PathBuf>) -> Self {
        let root = initial_root
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_default();
        Self {
            inner: AppState::new(root),
        }
    }

    /// Initial display unit.
    pub fn with_unit(mut self, unit: SizeUnit) -> Self {
        self.inner.unit = unit;
        self
    }

    /// Initial scan mode.
    pub fn with_mode(mut self, mode: ScanMode) -> Self {
        self.inner.mode = mode;
        self
    }

    pub fn state(&self) -> &AppState {
        &self.inner
    }
}

/// The SizeRank application.
pub struct SizeRankApp {
    state: AppState,
}

impl SizeRankApp {
    /// Create a new application instance from pre-built state.
    pub fn with_state(cc: &eframe::CreationContext<'_>, state: SizeRankState) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        Self { state: state.inner }
    }
}

impl eframe::App for SizeRankApp {
    /// Override the GPU clear colour to match the active theme background,
    /// preventing a colour mismatch flash between frames.
    fn clear_color(&self, visuals: &egui::Visuals) -> [f32; 4] {
        let [r, g, b, a] = visuals.panel_fill.to_array();
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ── Apply theme ───────────────────────────────────────────────────
        if self.state.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        // ── Process background messages ───────────────────────────────────
        self.state.process_scan_messages();

        // The scan thread cannot wake the UI, so poll while it runs.
        if self.state.phase == AppPhase::Scanning {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        // ── Top toolbar ───────────────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .min_height(36.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                widgets::toolbar::toolbar(ui, &mut self.state);
                ui.add_space(4.0);
            });

        // ── Notice dialog (reveal/export/scan failures) ───────────────────
        if let Some(message) = self.state.notice.clone() {
            let mut open = true;
            let mut dismissed = false;
            egui::Window::new("SizeRank")
                .open(&mut open)
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    ui.vertical_centered(|ui| {
                        if ui.button("OK").clicked() {
                            dismissed = true;
                        }
                    });
                });
            if !open || dismissed {
                self.state.notice = None;
            }
        }

        // ── About dialog ──────────────────────────────────────────────────
        let mut show_about = self.state.show_about;
        egui::Window::new("About SizeRank")
            .open(&mut show_about)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .fixed_size([340.0, 0.0])
            .show(ctx, |ui| {
                let accent = ui.visuals().hyperlink_color;
                let muted = ui.visuals().weak_text_color();
                let normal = ui.visuals().text_color();

                ui.vertical_centered(|ui| {
                    ui.add_space(8.0);
                    ui.label(
                        egui::RichText::new("📏 SizeRank")
                            .size(24.0)
                            .strong()
                            .color(accent),
                    );
                    ui.add_space(4.0);
                    ui.label(
                        egui::RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                            .size(13.0)
                            .color(muted),
                    );
                    ui.add_space(12.0);
                    ui.label(
                        egui::RichText::new(
                            "Finds the largest files and folders under a directory.\n\
                             Double-click a row to open its location.",
                        )
                        .size(12.0)
                        .color(normal),
                    );
                    ui.add_space(12.0);
                    ui.label(
                        egui::RichText::new("MIT License - Built with Rust & egui")
                            .size(11.0)
                            .color(muted),
                    );
                    ui.add_space(8.0);
                });
            });
        self.state.show_about = show_about;

        // ── Bottom status bar ─────────────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(24.0)
            .show(ctx, |ui| {
                ui.add_space(2.0);
                widgets::status_bar::status_bar(ui, &self.state);
                ui.add_space(2.0);
            });

        // ── Central panel (results) ───────────────────────────────────────
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::results_panel::results_panel(ui, &mut self.state);
        });
    }
}
