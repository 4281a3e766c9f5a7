//! Toolbar rendering for `OrbitrApp`.
//!
//! Draws the title, projection toggle, reload and offline controls, the
//! dark-mode toggle and the load status.

use eframe::egui;

use orbitr::engine::LoadStatus;
use orbitr::render::ProjectionMode;

use super::OrbitrApp;

impl OrbitrApp {
    /// Render the top toolbar strip.
    pub fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(4.0);
            ui.heading("Orbitr");
            ui.separator();

            // Projection toggle
            let current = self.view.state().mode();
            for mode in [ProjectionMode::TwoD, ProjectionMode::ThreeD] {
                if ui.selectable_label(current == mode, mode.label()).clicked() && current != mode {
                    self.view.change_mode(mode);
                }
            }
            ui.separator();

            if ui
                .add_enabled(!self.view.is_loading(), egui::Button::new("\u{21BB} Reload"))
                .clicked()
            {
                self.reload();
            }

            let mut offline = self.config.offline;
            if ui.checkbox(&mut offline, "Offline almanac").changed() {
                self.set_offline(offline);
            }

            let dark_label = if self.dark_mode { "\u{263E}" } else { "\u{2600}" };
            if ui.button(dark_label).clicked() {
                self.dark_mode = !self.dark_mode;
            }

            ui.separator();
            match self.view.load_status() {
                LoadStatus::Idle => {}
                LoadStatus::Loading => {
                    ui.spinner();
                    ui.label("Loading catalog…");
                }
                LoadStatus::Loaded => {
                    ui.label(format!("Source: {}", self.source_label()));
                }
                LoadStatus::Failed(err) => {
                    ui.colored_label(egui::Color32::from_rgb(255, 80, 80), err.to_string());
                    if ui.button("Retry").clicked() {
                        self.reload();
                    }
                }
            }
        });
    }

    fn source_label(&self) -> String {
        if self.config.offline {
            "bundled almanac".to_string()
        } else {
            self.config.api_base.to_string()
        }
    }
}
